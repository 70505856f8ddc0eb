//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//! - the form view, the markdown views, and the footer bars

pub mod style;
pub mod viewport;

mod form;
mod overlays;
mod render;
mod status;

pub use form::{FormLayout, layout_form};
pub use render::{body_height, line_number_width, markdown_content_width, render};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;
