//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Colors and their text encoding
//! - Document content and dirty tracking
//! - The settings field schema and value kinds

pub mod color;
pub mod document;
pub mod settings;

pub use color::Rgb;
pub use document::{Document, SessionState};
pub use settings::{EditorFont, FontStyle, LocaleTag, SettingField, SettingValue, Theme};
