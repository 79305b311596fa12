//! Services layer - persistent user state and its change signals.
//!
//! This module contains the stores the editor reads and writes at runtime:
//! - Recent files history
//! - Typed settings over a preference backend
//! - Settings change notification
//! - Startup defaults

pub mod defaults;
pub mod notifier;
pub mod recent_files;
pub mod settings_store;

pub use defaults::{PlatformDefaults, SettingsDefaults};
pub use notifier::{ChangeNotifier, ListenerError, SettingsListener, listener};
pub use recent_files::RecentFiles;
pub use settings_store::SettingsStore;
