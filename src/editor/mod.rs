//! Raw markdown editing.
//!
//! A rope-backed text buffer with a char-indexed cursor, driven by key
//! messages from the app's update loop.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
