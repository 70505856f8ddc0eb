//! When composed markdown replaces what the user sees.
//!
//! Synchronization runs one way only: draft edits made in the form view are
//! composed into markdown, and hand edits to the markdown never flow back
//! into the draft.

use tracing::debug;

use super::{MarkdownDocument, compose};
use crate::mode::{ActiveView, RenderMode};
use crate::profile::ProfileDraft;

/// What a recompute may do to hand-edited markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Every draft change overwrites the document, diverged or not. The
    /// divergence flag only drives the warning banner.
    #[default]
    Overwrite,
    /// A recompute over diverged markdown is held until confirmed.
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Derived,
    Diverged,
}

/// Result of feeding one draft change to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Replaced,
    /// The recompute produced the document already shown.
    Unchanged,
    /// Diverged content was kept; an overwrite is waiting for confirmation.
    Held,
    /// The form view is not active, so nothing was recomputed.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncController {
    document: MarkdownDocument,
    seed: Option<String>,
    policy: SyncPolicy,
    pending_overwrite: bool,
}

impl SyncController {
    /// Start a session. Persisted content is shown as-is and tagged diverged,
    /// since the empty draft does not describe it.
    pub fn new(seed: Option<String>, policy: SyncPolicy) -> Self {
        let document = seed
            .clone()
            .map_or_else(MarkdownDocument::default, MarkdownDocument::Diverged);
        Self {
            document,
            seed,
            policy,
            pending_overwrite: false,
        }
    }

    pub const fn document(&self) -> &MarkdownDocument {
        &self.document
    }

    pub fn content(&self) -> &str {
        self.document.content()
    }

    pub const fn state(&self) -> SyncState {
        self.document.state()
    }

    pub const fn policy(&self) -> SyncPolicy {
        self.policy
    }

    pub const fn has_pending_overwrite(&self) -> bool {
        self.pending_overwrite
    }

    /// React to a draft mutation.
    ///
    /// Only edits made while the form view is active trigger a recompute.
    pub fn on_draft_changed(
        &mut self,
        draft: &ProfileDraft,
        display_name: &str,
        view: ActiveView,
    ) -> SyncOutcome {
        if view != ActiveView::Form {
            return SyncOutcome::Skipped;
        }
        let next = self.recompute(draft, display_name);
        if next == self.document {
            self.pending_overwrite = false;
            return SyncOutcome::Unchanged;
        }
        if self.policy == SyncPolicy::Confirm && self.document.is_diverged() {
            debug!("holding recompute over edited markdown");
            self.pending_overwrite = true;
            return SyncOutcome::Held;
        }
        if self.document.is_diverged() {
            debug!("overwriting edited markdown with composed output");
        }
        self.document = next;
        self.pending_overwrite = false;
        SyncOutcome::Replaced
    }

    /// Record a hand edit of the markdown text.
    ///
    /// Edits count only in raw mode. Returns `true` if the document changed.
    pub fn on_user_edit(&mut self, text: String, render_mode: RenderMode) -> bool {
        if render_mode != RenderMode::Raw || text == self.document.content() {
            return false;
        }
        self.document = MarkdownDocument::Diverged(text);
        true
    }

    /// Apply a held overwrite. Returns `false` if none was pending.
    pub fn confirm_overwrite(&mut self, draft: &ProfileDraft, display_name: &str) -> bool {
        if !self.pending_overwrite {
            return false;
        }
        self.document = self.recompute(draft, display_name);
        self.pending_overwrite = false;
        debug!("held recompute confirmed");
        true
    }

    /// Keep the edited markdown and forget the held overwrite.
    pub const fn dismiss_pending(&mut self) {
        self.pending_overwrite = false;
    }

    fn recompute(&self, draft: &ProfileDraft, display_name: &str) -> MarkdownDocument {
        let composed = compose(draft, display_name);
        match (&self.seed, composed.is_empty()) {
            (Some(seed), true) => MarkdownDocument::Diverged(seed.clone()),
            _ => MarkdownDocument::Derived(composed),
        }
    }
}
