//! Lifecycle of the active document: dirty tracking and guarded new/open/close.

use std::path::{Path, PathBuf};

use crate::app::domain::document::{Document, SessionState};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::file_ops::{FileOperations, FsFileOperations};
use crate::app::services::recent_files::RecentFiles;

pub const APP_NAME: &str = "ScribePad";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionDecision {
    Proceed,
    Cancelled,
}

/// Questions the session needs answered by the user.
pub trait SessionPrompt {
    /// `name` has unsaved changes; what should happen to them?
    fn confirm_save(&mut self, name: &str) -> SaveChoice;

    /// Pick a destination for an untitled document. `None` means declined.
    fn choose_save_path(&mut self) -> Option<PathBuf>;
}

pub struct DocumentSession<F = FsFileOperations> {
    document: Document,
    recent: RecentFiles,
    files: F,
}

impl<F: FileOperations> DocumentSession<F> {
    pub fn new(files: F, recent: RecentFiles) -> Self {
        Self {
            document: Document::new_untitled(),
            recent,
            files,
        }
    }

    pub fn state(&self) -> SessionState {
        self.document.state()
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.document.file_path.as_deref()
    }

    pub fn content(&self) -> &str {
        self.document.content()
    }

    pub fn display_name(&self) -> String {
        self.document.display_name()
    }

    /// Window title, `*`-prefixed while there are unsaved changes.
    pub fn title(&self) -> String {
        let marker = if self.is_dirty() { "*" } else { "" };
        format!("{}{} - {}", marker, self.display_name(), APP_NAME)
    }

    pub fn content_changed(&mut self, text: impl Into<String>) {
        self.document.set_content(text.into());
    }

    pub fn recent_files(&self) -> &RecentFiles {
        &self.recent
    }

    pub fn recent_files_mut(&mut self) -> &mut RecentFiles {
        &mut self.recent
    }

    /// Decide whether the current document may be replaced or dropped.
    ///
    /// A clean document proceeds without asking. A dirty one asks the user;
    /// choosing to save only proceeds once the save succeeded.
    pub fn request_destructive_action(
        &mut self,
        prompt: &mut impl SessionPrompt,
    ) -> Result<ActionDecision> {
        if !self.is_dirty() {
            return Ok(ActionDecision::Proceed);
        }

        let choice = prompt.confirm_save(&self.display_name());
        tracing::debug!("Unsaved changes in {}: {:?}", self.display_name(), choice);
        match choice {
            SaveChoice::Save => match self.save(prompt)? {
                Some(_) => Ok(ActionDecision::Proceed),
                None => Ok(ActionDecision::Cancelled),
            },
            SaveChoice::Discard => Ok(ActionDecision::Proceed),
            SaveChoice::Cancel => Ok(ActionDecision::Cancelled),
        }
    }

    pub fn new_document(&mut self, prompt: &mut impl SessionPrompt) -> Result<ActionDecision> {
        let decision = self.request_destructive_action(prompt)?;
        if decision == ActionDecision::Proceed {
            self.document = Document::new_untitled();
            tracing::info!("Started a new document");
        }
        Ok(decision)
    }

    /// Replace the current document with the contents of `path`.
    ///
    /// If reading fails after the user agreed, the error is returned and the
    /// current document stays in place.
    pub fn open(&mut self, path: &Path, prompt: &mut impl SessionPrompt) -> Result<ActionDecision> {
        let decision = self.request_destructive_action(prompt)?;
        if decision == ActionDecision::Cancelled {
            return Ok(decision);
        }

        let content = self.files.read(path)?;
        self.document = Document::new_from_file(path.to_path_buf(), content);
        tracing::info!("Opened {}", path.display());
        self.remember(path);
        Ok(ActionDecision::Proceed)
    }

    pub fn close(&mut self, prompt: &mut impl SessionPrompt) -> Result<ActionDecision> {
        let decision = self.request_destructive_action(prompt)?;
        if decision == ActionDecision::Proceed {
            tracing::info!("Closed {}", self.display_name());
            self.document = Document::new_untitled();
        }
        Ok(decision)
    }

    /// Save to the current path, asking for one if the document is untitled.
    /// Returns the path written, or `None` when the user declined to pick one.
    pub fn save(&mut self, prompt: &mut impl SessionPrompt) -> Result<Option<PathBuf>> {
        let path = match self.document.file_path.clone() {
            Some(path) => path,
            None => match prompt.choose_save_path() {
                Some(path) => path,
                None => {
                    tracing::debug!("Save cancelled, no path chosen");
                    return Ok(None);
                }
            },
        };
        self.save_as(&path)?;
        Ok(Some(path))
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.files
            .write(path, self.document.content(), true)
            .inspect_err(|e| tracing::error!("Failed to save {}: {}", path.display(), e))?;
        self.document.mark_saved(path.to_path_buf());
        tracing::info!("Saved {}", path.display());
        self.remember(path);
        Ok(())
    }

    fn remember(&mut self, path: &Path) {
        if let Err(e) = self.recent.add(path) {
            tracing::warn!("Could not record {} in recent files: {}", path.display(), e);
        }
    }
}
