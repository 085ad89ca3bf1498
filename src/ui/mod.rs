//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`style`]: Mapping rendered markdown onto terminal styles
//! - the editor and preview panes, status bar and dialogs

pub mod style;

mod overlays;
mod render;
mod status;

pub use overlays::{HELP_TITLE, OPEN_TITLE, SAVE_TITLE, centered_popup_rect, help_lines};
pub use render::{
    EDITOR_TITLE, PREVIEW_TITLE, horizontal_offset, line_number_width, render, split_panes,
};
pub use status::status_text;

#[cfg(test)]
mod tests;
