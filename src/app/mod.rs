//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, Overlay, ToastLevel, ViewMode};
pub use update::{Message, update};

use std::path::PathBuf;

use ratatui::style::Style;

use crate::session::Session;
use crate::store::DocumentStore;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    notes_dir: PathBuf,
    initial_note: Option<String>,
    preview_only: bool,
    pane_style: Style,
    config_global_path: Option<PathBuf>,
}

impl App {
    /// Create a new application storing notes in `notes_dir`.
    pub fn new(notes_dir: PathBuf) -> Self {
        Self {
            notes_dir,
            initial_note: None,
            preview_only: false,
            pane_style: Style::default(),
            config_global_path: None,
        }
    }

    /// Open this note on startup, or start a new note with that name.
    pub fn with_initial_note(mut self, name: Option<String>) -> Self {
        self.initial_note = name;
        self
    }

    /// Start with only the preview pane visible.
    pub const fn with_preview_only(mut self, enabled: bool) -> Self {
        self.preview_only = enabled;
        self
    }

    /// Colors applied to both panes.
    pub const fn with_pane_style(mut self, style: Style) -> Self {
        self.pane_style = style;
        self
    }

    /// Set config path to show in help.
    pub fn with_config_path(mut self, global_path: Option<PathBuf>) -> Self {
        self.config_global_path = global_path;
        self
    }

    /// Build the starting model for a terminal of the given size.
    pub(crate) fn initial_model(&self, terminal_size: (u16, u16)) -> Model {
        let store = DocumentStore::new(self.notes_dir.clone());
        let (session, failure) = initial_session(&store, self.initial_note.as_deref());
        let mut model = Model::new(session, store, terminal_size);
        if self.preview_only {
            model.view_mode = ViewMode::Preview;
        }
        model.pane_style = self.pane_style;
        model
            .global_config_path
            .clone_from(&self.config_global_path);
        if let Some(message) = failure {
            model.show_toast(ToastLevel::Error, message);
        }
        model
    }
}

/// Open `name` from the store, falling back to a fresh note.
///
/// A missing note becomes an empty session that will be saved under that
/// name. Any other failure yields an untitled session plus a message.
fn initial_session(store: &DocumentStore, name: Option<&str>) -> (Session, Option<String>) {
    let Some(name) = name else {
        return (Session::new(), None);
    };
    let mut session = Session::new();
    match session.open(store, name) {
        Ok(()) => (session, None),
        Err(err) if err.is_not_found() => match crate::store::normalize_name(name) {
            Ok(normalized) => (Session::from_text(normalized, ""), None),
            Err(err) => (session, Some(format!("Open failed: {err}"))),
        },
        Err(err) => {
            tracing::warn!(note = name, error = %err, "initial open failed");
            (session, Some(format!("Open failed: {err}")))
        }
    }
}
