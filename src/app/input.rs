use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model, Overlay, ViewMode};
use crate::editor::Direction;

/// Spaces inserted for Tab.
const TAB: &str = "    ";

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::handle_key(*key, model),
            Event::Paste(text) => {
                if model.overlay.is_none() && model.view_mode == ViewMode::Split {
                    Some(Message::InsertText(text.replace("\r\n", "\n").replace('\r', "\n")))
                } else {
                    None
                }
            }
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize");
                Some(Message::Resize(*w, *h))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global bindings work everywhere, overlays included
        if ctrl {
            match key.code {
                KeyCode::Char('q') => return Some(Message::Quit),
                KeyCode::Char('s') if model.overlay.is_none() => return Some(Message::StartSave),
                KeyCode::Char('o') if model.overlay.is_none() => return Some(Message::StartOpen),
                KeyCode::Char('p') if model.overlay.is_none() => {
                    return Some(Message::TogglePreview);
                }
                _ => {}
            }
        }

        match &model.overlay {
            Some(Overlay::Help) => return Self::handle_help_key(key),
            Some(Overlay::Save { .. }) => return Self::handle_save_key(key),
            Some(Overlay::Open { .. }) => return Self::handle_open_key(key),
            None => {}
        }

        let page = model.pane_text_rows().max(1);
        match key.code {
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::PageUp => return Some(Message::PreviewScrollUp(page)),
            KeyCode::PageDown => return Some(Message::PreviewScrollDown(page)),
            _ => {}
        }

        match model.view_mode {
            ViewMode::Preview => Self::handle_preview_key(key),
            ViewMode::Split => Self::handle_editor_key(key),
        }
    }

    fn handle_help_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => Some(Message::ToggleHelp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::HelpScrollDown),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::HelpScrollUp),
            _ => None,
        }
    }

    fn handle_save_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::CancelOverlay),
            KeyCode::Enter => Some(Message::ConfirmSave),
            KeyCode::Backspace => Some(Message::SaveInputBackspace),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::SaveInput(c))
            }
            _ => None,
        }
    }

    fn handle_open_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::CancelOverlay),
            KeyCode::Enter => Some(Message::ConfirmOpen),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::OpenUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::OpenDown),
            _ => None,
        }
    }

    fn handle_preview_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(Message::PreviewScrollDown(1)),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::PreviewScrollUp(1)),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    fn handle_editor_key(key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Tab => Some(Message::InsertText(TAB.to_string())),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            _ => None,
        }
    }
}
