use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};

use crate::editor::EditorBuffer;
use crate::session::Session;
use crate::store::DocumentStore;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which panes are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Editor and preview side by side.
    #[default]
    Split,
    /// Preview only.
    Preview,
}

impl ViewMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Split => Self::Preview,
            Self::Preview => Self::Split,
        }
    }
}

/// Modal dialog drawn over the panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Markdown cheat sheet and key bindings.
    Help,
    /// File name prompt for saving.
    Save { input: String },
    /// Stored notes to pick from.
    Open { files: Vec<String>, selected: usize },
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The note being edited and its preview
    pub session: Session,
    /// Where notes are saved and loaded
    pub store: DocumentStore,
    pub view_mode: ViewMode,
    pub overlay: Option<Overlay>,
    /// First visible buffer line in the editor pane
    pub editor_scroll_offset: usize,
    /// First visible line in the preview pane
    pub preview_scroll_offset: usize,
    pub help_scroll_offset: usize,
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
    /// Foreground/background applied to both panes
    pub pane_style: Style,
    pub global_config_path: Option<std::path::PathBuf>,
    toast: Option<Toast>,
    pub should_quit: bool,
    /// Set after a first quit attempt with unsaved changes
    pub quit_confirmed: bool,
    /// Set after a first open attempt with unsaved changes
    pub open_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_name", &self.session.file_name())
            .field("view_mode", &self.view_mode)
            .field("overlay", &self.overlay)
            .field("dirty", &self.session.is_dirty())
            .finish_non_exhaustive()
    }
}

impl Model {
    pub fn new(session: Session, store: DocumentStore, terminal_size: (u16, u16)) -> Self {
        Self {
            session,
            store,
            view_mode: ViewMode::Split,
            overlay: None,
            editor_scroll_offset: 0,
            preview_scroll_offset: 0,
            help_scroll_offset: 0,
            width: terminal_size.0,
            height: terminal_size.1,
            pane_style: Style::default(),
            global_config_path: None,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            open_confirmed: false,
        }
    }

    /// Apply an editor mutation and keep the cursor on screen.
    pub(super) fn edit(&mut self, f: impl FnOnce(&mut EditorBuffer)) {
        self.session.edit(f);
        self.ensure_cursor_visible();
        self.clamp_preview_scroll();
    }

    /// Rows available for text inside a bordered pane.
    pub fn pane_text_rows(&self) -> usize {
        // status bar + top and bottom border
        usize::from(self.height.saturating_sub(3))
    }

    /// Text columns inside the preview pane's borders.
    pub fn preview_text_width(&self) -> u16 {
        let main_area = Rect::new(0, 0, self.width, self.height.saturating_sub(1));
        let pane = match self.view_mode {
            ViewMode::Split => crate::ui::split_panes(main_area)[1],
            ViewMode::Preview => main_area,
        };
        pane.width.saturating_sub(2)
    }

    /// Number of preview rows once wrapped to the pane width.
    pub fn preview_row_count(&self) -> usize {
        let lines = crate::ui::style::preview_lines(self.session.preview(), self.pane_style);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .line_count(self.preview_text_width())
    }

    /// Largest preview offset; the last wrapped row may scroll to the top.
    pub fn max_preview_scroll(&self) -> usize {
        self.preview_row_count().saturating_sub(1)
    }

    pub(super) fn clamp_preview_scroll(&mut self) {
        self.preview_scroll_offset = self.preview_scroll_offset.min(self.max_preview_scroll());
    }

    pub(super) fn ensure_cursor_visible(&mut self) {
        let cursor_line = self.session.buffer().cursor().line;
        let rows = self.pane_text_rows();
        if rows == 0 || cursor_line < self.editor_scroll_offset {
            self.editor_scroll_offset = cursor_line;
        } else if cursor_line >= self.editor_scroll_offset + rows {
            self.editor_scroll_offset = cursor_line + 1 - rows;
        }
    }

    pub(crate) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(
            Session::default(),
            DocumentStore::new(crate::config::default_notes_dir()),
            (80, 24),
        )
    }
}
