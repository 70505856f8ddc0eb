// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. entries::EntryList)
    clippy::module_name_repetitions
)]

//! # Resumark
//!
//! A terminal resume editor. Fill in structured profile fields and get a
//! single markdown document back, or edit that markdown by hand.
//!
//! The core is the document synchronization engine:
//! - [`document::compose`] turns a [`profile::ProfileDraft`] into markdown
//! - [`document::SyncController`] decides when composed output replaces the
//!   visible markdown and when hand edits are kept
//! - [`entries::EntryList`] manages one repeated section and its add-form
//! - [`mode::ModeState`] tracks which view is showing
//!
//! ## Architecture
//!
//! The terminal app uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events, actions and background job results
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`profile`]: Structured profile data
//! - [`entries`]: Repeated sections and entry validation
//! - [`document`]: Markdown composition and sync state
//! - [`mode`]: Active view and render mode
//! - [`editor`]: Raw markdown buffer
//! - [`preview`]: Rendered markdown preview
//! - [`services`]: Text improvement, persistence and export
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod entries;
pub mod mode;
pub mod preview;
pub mod profile;
pub mod services;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{MarkdownDocument, SyncController, SyncPolicy, compose};
    pub use crate::entries::{EntryForm, EntryList};
    pub use crate::mode::{ActiveView, ModeState, RenderMode};
    pub use crate::profile::{ContactField, EntryKind, ProfileDraft, TextField};
}
