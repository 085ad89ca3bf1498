use crate::app::{App, Message, Model, Overlay, ToastLevel};

impl App {
    /// Run the store I/O a message asks for, after `update` has applied it.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::StartOpen => Self::list_notes(model),
            Message::ConfirmSave => Self::save_note(model),
            Message::ConfirmOpen => Self::open_selected(model),
            _ => {}
        }
    }

    fn list_notes(model: &mut Model) {
        match model.store.list() {
            Ok(mut files) => {
                files.sort_unstable_by_key(|name| name.to_lowercase());
                if files.is_empty() {
                    model.show_toast(
                        ToastLevel::Info,
                        format!("No notes in {}", model.store.root().display()),
                    );
                }
                model.overlay = Some(Overlay::Open { files, selected: 0 });
            }
            Err(err) => {
                tracing::warn!(error = %err, "listing notes failed");
                model.overlay = None;
                model.show_toast(ToastLevel::Error, format!("Listing failed: {err}"));
            }
        }
    }

    fn save_note(model: &mut Model) {
        let Some(Overlay::Save { input }) = &model.overlay else {
            return;
        };
        let name = input.clone();
        match model.session.save_as(&model.store, &name) {
            Ok(()) => {
                model.overlay = None;
                let saved = model.session.file_name().to_string();
                model.show_toast(ToastLevel::Info, format!("Saved {saved}"));
            }
            Err(err) => {
                tracing::warn!(name = %name, error = %err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }

    fn open_selected(model: &mut Model) {
        let Some(Overlay::Open { files, selected }) = &model.overlay else {
            return;
        };
        let Some(name) = files.get(*selected).cloned() else {
            model.overlay = None;
            return;
        };
        // Opening replaces the buffer, so unsaved edits need a second Enter
        if model.session.is_dirty() && !model.open_confirmed {
            model.open_confirmed = true;
            model.show_toast(
                ToastLevel::Warning,
                format!("Unsaved changes! Press Enter again to open {name}, or Esc to cancel"),
            );
            return;
        }
        model.open_confirmed = false;
        model.overlay = None;
        match model.session.open(&model.store, &name) {
            Ok(()) => {
                model.editor_scroll_offset = 0;
                model.preview_scroll_offset = 0;
                model.show_toast(ToastLevel::Info, format!("Opened {name}"));
            }
            Err(err) => {
                tracing::warn!(name = %name, error = %err, "open failed");
                model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
            }
        }
    }
}
