use crate::app::model::{Overlay, ToastLevel};
use crate::app::Model;
use crate::editor::Direction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert text at the cursor (paste, tab)
    InsertText(String),
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Split line at cursor (Enter)
    SplitLine,
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    MoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    MoveToEnd,

    // Preview
    /// Switch between split view and preview only
    TogglePreview,
    /// Scroll preview up by n lines
    PreviewScrollUp(usize),
    /// Scroll preview down by n lines
    PreviewScrollDown(usize),

    // Help
    /// Toggle help overlay
    ToggleHelp,
    HelpScrollUp,
    HelpScrollDown,

    // Save dialog
    /// Open the save dialog prefilled with the current file name
    StartSave,
    /// Type into the save dialog
    SaveInput(char),
    /// Delete the last character of the save dialog input
    SaveInputBackspace,
    /// Save under the dialog's name (side effect)
    ConfirmSave,

    // Open dialog
    /// Open the note picker (listing is a side effect)
    StartOpen,
    OpenUp,
    OpenDown,
    /// Load the selected note (side effect)
    ConfirmOpen,

    /// Close whichever overlay is open
    CancelOverlay,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// Store access for saving, opening and listing happens afterwards in the
/// event loop's side-effect handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::ConfirmOpen) {
        model.open_confirmed = false;
    }

    match msg {
        // Editor
        Message::InsertChar(ch) => model.edit(|buf| buf.insert_char(ch)),
        Message::InsertText(text) => model.edit(|buf| buf.insert_str(&text)),
        Message::DeleteBack => model.edit(|buf| {
            buf.delete_back();
        }),
        Message::DeleteForward => model.edit(|buf| {
            buf.delete_forward();
        }),
        Message::SplitLine => model.edit(|buf| buf.split_line()),
        Message::MoveCursor(dir) => model.edit(|buf| buf.move_cursor(dir)),
        Message::MoveHome => model.edit(|buf| buf.move_home()),
        Message::MoveEnd => model.edit(|buf| buf.move_end()),
        Message::MoveWordLeft => model.edit(|buf| buf.move_word_left()),
        Message::MoveWordRight => model.edit(|buf| buf.move_word_right()),
        Message::MoveToStart => model.edit(|buf| buf.move_to_start()),
        Message::MoveToEnd => model.edit(|buf| buf.move_to_end()),

        // Preview
        Message::TogglePreview => {
            model.view_mode = model.view_mode.toggled();
            model.clamp_preview_scroll();
        }
        Message::PreviewScrollUp(n) => {
            model.preview_scroll_offset = model.preview_scroll_offset.saturating_sub(n);
        }
        Message::PreviewScrollDown(n) => {
            model.preview_scroll_offset =
                (model.preview_scroll_offset + n).min(model.max_preview_scroll());
        }

        // Help
        Message::ToggleHelp => {
            model.overlay = if model.overlay == Some(Overlay::Help) {
                None
            } else {
                Some(Overlay::Help)
            };
            model.help_scroll_offset = 0;
        }
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => {
            model.help_scroll_offset += 1;
        }

        // Save dialog
        Message::StartSave => {
            model.overlay = Some(Overlay::Save {
                input: model.session.file_name().to_string(),
            });
        }
        Message::SaveInput(ch) => {
            if let Some(Overlay::Save { input }) = &mut model.overlay {
                input.push(ch);
            }
        }
        Message::SaveInputBackspace => {
            if let Some(Overlay::Save { input }) = &mut model.overlay {
                input.pop();
            }
        }

        // Open dialog
        Message::StartOpen => {
            model.overlay = Some(Overlay::Open {
                files: Vec::new(),
                selected: 0,
            });
        }
        Message::OpenUp => {
            if let Some(Overlay::Open { selected, .. }) = &mut model.overlay {
                *selected = selected.saturating_sub(1);
            }
        }
        Message::OpenDown => {
            if let Some(Overlay::Open { files, selected }) = &mut model.overlay {
                *selected = (*selected + 1).min(files.len().saturating_sub(1));
            }
        }

        Message::CancelOverlay => {
            model.overlay = None;
        }

        // ConfirmSave/ConfirmOpen: handled in side effects (store I/O)
        Message::ConfirmSave | Message::ConfirmOpen => {}

        // Window
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.ensure_cursor_visible();
            model.clamp_preview_scroll();
        }

        // Application
        Message::Quit => {
            if model.session.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}
