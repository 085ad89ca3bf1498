//! The active editing session.
//!
//! A [`Session`] owns the note being edited: its file name, its text buffer
//! and the preview rendered from that text. Edits go through
//! [`Session::edit`], which re-renders the preview whenever the text changed.

use crate::editor::EditorBuffer;
use crate::markdown::{Renderer, StyledSpan};
use crate::store::{DocumentStore, StoreError};

/// File name given to a session that has never been saved.
pub const DEFAULT_FILE_NAME: &str = "Untitled.md";

/// Character and word counts shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    file_name: String,
    buffer: EditorBuffer,
    preview: Vec<StyledSpan>,
    rendered_revision: u64,
    renderer: Renderer,
}

impl Session {
    /// An empty, unsaved note.
    pub fn new() -> Self {
        Self::with_renderer(Renderer::default())
    }

    pub fn with_renderer(renderer: Renderer) -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            buffer: EditorBuffer::empty(),
            preview: Vec::new(),
            rendered_revision: 0,
            renderer,
        }
    }

    /// A clean session holding `text` under `file_name`.
    pub fn from_text(file_name: impl Into<String>, text: &str) -> Self {
        let mut session = Self::new();
        session.replace(file_name.into(), text);
        session
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Spans rendered from the current text.
    pub fn preview(&self) -> &[StyledSpan] {
        &self.preview
    }

    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.buffer.text())
    }

    /// Apply a buffer mutation, re-rendering the preview if the text changed.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut EditorBuffer) -> R) -> R {
        let result = f(&mut self.buffer);
        if self.buffer.revision() != self.rendered_revision {
            self.rerender();
        }
        result
    }

    /// Replace the session with the note stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged; the session is left untouched.
    pub fn open(&mut self, store: &DocumentStore, name: &str) -> Result<(), StoreError> {
        let text = store.load(name)?;
        let name = crate::store::normalize_name(name)?;
        self.replace(name, &text);
        Ok(())
    }

    /// Save under the current file name.
    ///
    /// # Errors
    ///
    /// Returns the store error; the buffer stays dirty.
    pub fn save(&mut self, store: &DocumentStore) -> Result<(), StoreError> {
        let name = self.file_name.clone();
        self.save_as(store, &name)
    }

    /// Save under `name` and adopt it as the session's file name.
    ///
    /// # Errors
    ///
    /// Returns the store error; file name and dirty state are unchanged.
    pub fn save_as(&mut self, store: &DocumentStore, name: &str) -> Result<(), StoreError> {
        let stored = store.save(name, &self.buffer.text())?;
        self.file_name = stored;
        self.buffer.mark_clean();
        Ok(())
    }

    fn replace(&mut self, file_name: String, text: &str) {
        self.file_name = file_name;
        self.buffer = EditorBuffer::from_text(text);
        self.rerender();
    }

    fn rerender(&mut self) {
        self.preview = self.renderer.render(&self.buffer.text());
        self.rendered_revision = self.buffer.revision();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Direction;
    use crate::markdown::{RenderLimits, SpanStyle, plain_text};
    use tempfile::tempdir;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new();
        assert_eq!(session.file_name(), DEFAULT_FILE_NAME);
        assert_eq!(session.text(), "");
        assert_eq!(session.preview(), [StyledSpan::plain("")]);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_from_text_renders_preview() {
        let session = Session::from_text("a.md", "**hi**");
        assert_eq!(session.preview().len(), 1);
        assert!(session.preview()[0].style().bold);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_each_edit_rerenders() {
        let mut session = Session::new();
        for ch in "*a".chars() {
            session.edit(|buf| buf.insert_char(ch));
        }
        assert_eq!(plain_text(session.preview()), "*a");
        session.edit(|buf| buf.insert_char('*'));
        assert_eq!(session.preview()[0].style(), &SpanStyle {
            italic: true,
            ..SpanStyle::plain()
        });
        assert!(session.is_dirty());
    }

    #[test]
    fn test_cursor_move_keeps_preview() {
        let mut session = Session::from_text("a.md", "text");
        let before = session.preview().to_vec();
        session.edit(|buf| buf.move_cursor(Direction::Right));
        assert_eq!(session.preview(), before.as_slice());
    }

    #[test]
    fn test_renderer_limits_apply_to_preview() {
        let renderer = Renderer::new(RenderLimits {
            max_document_bytes: 3,
            max_line_bytes: 3,
        });
        let mut session = Session::with_renderer(renderer);
        session.edit(|buf| buf.insert_str("long text"));
        assert_eq!(
            plain_text(session.preview()),
            crate::markdown::FALLBACK_MESSAGE
        );
    }

    #[test]
    fn test_stats_count_chars_and_words() {
        let stats = TextStats::of("héllo  wide\nworld ");
        assert_eq!(stats.characters, 18);
        assert_eq!(stats.words, 3);
        assert_eq!(TextStats::of(""), TextStats::default());
    }

    #[test]
    fn test_save_as_adopts_normalized_name() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let mut session = Session::new();
        session.edit(|buf| buf.insert_str("body"));
        session.save_as(&store, "journal").unwrap();
        assert_eq!(session.file_name(), "journal.md");
        assert!(!session.is_dirty());
        assert_eq!(store.load("journal.md").unwrap(), "body");
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let mut session = Session::new();
        session.edit(|buf| buf.insert_str("body"));
        assert!(session.save_as(&store, "../escape").is_err());
        assert_eq!(session.file_name(), DEFAULT_FILE_NAME);
        assert!(session.is_dirty());
    }

    #[test]
    fn test_open_replaces_buffer() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.save("note.md", "`code`").unwrap();
        let mut session = Session::new();
        session.open(&store, "note.md").unwrap();
        assert_eq!(session.file_name(), "note.md");
        assert_eq!(session.text(), "`code`");
        assert!(session.preview()[0].style().code);
    }

    #[test]
    fn test_open_missing_leaves_session_untouched() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let mut session = Session::from_text("mine.md", "keep me");
        session.edit(|buf| buf.insert_char('!'));
        let err = session.open(&store, "missing.md").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(session.file_name(), "mine.md");
        assert_eq!(session.text(), "!keep me");
        assert!(session.is_dirty());
    }
}
