//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the user:
//! - Document session lifecycle and save confirmation

pub mod session;

pub use session::{ActionDecision, DocumentSession, SaveChoice, SessionPrompt};
