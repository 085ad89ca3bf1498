//! Rope-backed text buffer for the note being edited.
//!
//! Columns are counted in chars, so cursor math never lands inside a
//! multi-byte character.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
