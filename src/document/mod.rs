//! The markdown side of a resume session.
//!
//! This module handles:
//! - Composing canonical markdown from a [`ProfileDraft`](crate::profile::ProfileDraft)
//! - Tracking whether the visible markdown still matches that composition
//! - Deciding when a recompute may replace the visible markdown

mod compose;
mod sync;

pub use compose::{compose, contact_markdown, entry_markdown};
pub use sync::{SyncController, SyncOutcome, SyncPolicy, SyncState};

/// The visible markdown, tagged by where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownDocument {
    /// Last produced by the composer from the current draft.
    Derived(String),
    /// Hand-edited or loaded from disk; may not match the draft.
    Diverged(String),
}

impl MarkdownDocument {
    pub fn content(&self) -> &str {
        match self {
            Self::Derived(content) | Self::Diverged(content) => content,
        }
    }

    pub const fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged(_))
    }

    pub const fn state(&self) -> SyncState {
        match self {
            Self::Derived(_) => SyncState::Derived,
            Self::Diverged(_) => SyncState::Diverged,
        }
    }
}

impl Default for MarkdownDocument {
    fn default() -> Self {
        Self::Derived(String::new())
    }
}
