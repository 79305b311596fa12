//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Filesystem access and atomic writes
//! - Preference persistence backends
//! - Platform-specific detection
//! - Error types

pub mod error;
pub mod file_ops;
pub mod paths;
pub mod platform;
pub mod preferences;
