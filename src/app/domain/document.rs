use std::path::{Path, PathBuf};

pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No file and no content.
    UnsavedEmpty,
    /// Content matches the last saved or loaded snapshot.
    Clean,
    /// Content differs from the snapshot.
    Dirty,
}

/// The text being edited together with what was last persisted.
///
/// Dirtiness is an exact comparison against the snapshot rather than a
/// "touched" flag, so undoing an edit by hand makes the document clean again.
/// An untitled document's snapshot is the empty string.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub file_path: Option<PathBuf>,
    content: String,
    snapshot: String,
}

impl Document {
    pub fn new_untitled() -> Self {
        Self::default()
    }

    pub fn new_from_file(path: PathBuf, content: String) -> Self {
        Self {
            file_path: Some(path),
            snapshot: content.clone(),
            content,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn is_dirty(&self) -> bool {
        self.content != self.snapshot
    }

    pub fn state(&self) -> SessionState {
        if self.is_dirty() {
            SessionState::Dirty
        } else if self.file_path.is_none() && self.content.is_empty() {
            SessionState::UnsavedEmpty
        } else {
            SessionState::Clean
        }
    }

    /// Record that the current content now lives at `path`.
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.file_path = Some(path);
        self.snapshot = self.content.clone();
    }

    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .map(extract_filename)
            .unwrap_or_else(|| UNTITLED.to_string())
    }
}

pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untitled_starts_empty() {
        let doc = Document::new_untitled();
        assert_eq!(doc.state(), SessionState::UnsavedEmpty);
        assert_eq!(doc.display_name(), "Untitled");
    }

    #[test]
    fn test_untitled_with_text_is_dirty() {
        let mut doc = Document::new_untitled();
        doc.set_content("hello".into());
        assert_eq!(doc.state(), SessionState::Dirty);
        doc.set_content(String::new());
        assert_eq!(doc.state(), SessionState::UnsavedEmpty);
    }

    #[test]
    fn test_reverting_edit_restores_clean() {
        let mut doc = Document::new_from_file(PathBuf::from("/tmp/notes.txt"), "abc".into());
        assert_eq!(doc.state(), SessionState::Clean);
        doc.set_content("abcd".into());
        assert_eq!(doc.state(), SessionState::Dirty);
        doc.set_content("abc".into());
        assert_eq!(doc.state(), SessionState::Clean);
    }

    #[test]
    fn test_empty_loaded_file_is_clean_not_unsaved() {
        let doc = Document::new_from_file(PathBuf::from("/tmp/empty.txt"), String::new());
        assert_eq!(doc.state(), SessionState::Clean);
        assert_eq!(doc.display_name(), "empty.txt");
    }

    #[test]
    fn test_mark_saved_moves_snapshot() {
        let mut doc = Document::new_untitled();
        doc.set_content("draft".into());
        doc.mark_saved(PathBuf::from("/tmp/draft.txt"));
        assert_eq!(doc.state(), SessionState::Clean);
        assert_eq!(doc.file_path.as_deref(), Some(Path::new("/tmp/draft.txt")));
    }
}
