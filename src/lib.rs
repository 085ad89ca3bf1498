// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. store::StoreError)
    clippy::module_name_repetitions
)]

//! # Marknote
//!
//! A terminal markdown note editor with a live preview.
//!
//! Marknote edits plain-text notes kept in a single directory and shows an
//! inline-styled preview of the text on every keystroke.
//!
//! ## Architecture
//!
//! Marknote uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`markdown`]: Inline markdown renderer
//! - [`store`]: Flat directory of notes
//! - [`session`]: The note being edited and its preview
//! - [`editor`]: Text buffer with cursor
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod editor;
pub mod markdown;
pub mod session;
pub mod store;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::markdown::{StyledSpan, render};
    pub use crate::session::Session;
    pub use crate::store::{DocumentStore, StoreError};
}
