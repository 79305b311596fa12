//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (colors, settings schema, Document)
//! - `controllers/` - Orchestration (DocumentSession)
//! - `services/` - Persistent state (RecentFiles, SettingsStore, ChangeNotifier)
//! - `infrastructure/` - External integrations (filesystem, preferences, platform, error)
//! - `config.rs` - Installation-level configuration

pub mod config;
pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use config::PadConfig;
pub use controllers::{ActionDecision, DocumentSession, SaveChoice, SessionPrompt};
pub use domain::{Document, EditorFont, FontStyle, LocaleTag, Rgb, SessionState, SettingField, SettingValue, Theme};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::paths::AppPaths;
pub use infrastructure::platform::detect_system_dark_mode;
pub use services::{ChangeNotifier, PlatformDefaults, RecentFiles, SettingsDefaults, SettingsListener, SettingsStore};
