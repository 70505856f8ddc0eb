use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::document::{MarkdownDocument, SyncController, SyncOutcome, SyncPolicy};
use crate::editor::EditorBuffer;
use crate::entries::{EntryField, ImproveRequest};
use crate::mode::{ModeState, RenderMode};
use crate::preview::Preview;
use crate::profile::{ContactField, EntryKind, ProfileDraft, TextField};
use crate::ui::viewport::Viewport;

/// Hash document content for unsaved-change detection.
pub(super) fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Background work queued by `update` and started by the effects layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Improve(ImproveRequest),
    Save(MarkdownDocument),
    Export(String),
}

/// A focusable element of the form view, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Text(TextField),
    /// A committed entry card.
    Entry(EntryKind, usize),
    AddButton(EntryKind),
    FormField(EntryKind, EntryField),
    CurrentCheckbox(EntryKind),
    ImproveButton(EntryKind),
    SubmitButton(EntryKind),
    CancelButton(EntryKind),
}

impl Focus {
    /// Whether typed characters edit this element.
    pub const fn accepts_text(self) -> bool {
        matches!(self, Self::Text(_) | Self::FormField(..))
    }

    /// Whether Enter inserts a newline instead of activating.
    pub const fn is_multiline(self) -> bool {
        match self {
            Self::Text(field) => field.is_multiline(),
            Self::FormField(_, field) => field.is_multiline(),
            _ => false,
        }
    }

    pub const fn entry_kind(self) -> Option<EntryKind> {
        match self {
            Self::Text(_) => None,
            Self::Entry(kind, _)
            | Self::AddButton(kind)
            | Self::FormField(kind, _)
            | Self::CurrentCheckbox(kind)
            | Self::ImproveButton(kind)
            | Self::SubmitButton(kind)
            | Self::CancelButton(kind) => Some(kind),
        }
    }
}

/// The complete session state.
pub struct Model {
    /// Structured profile being edited in the form view
    pub draft: ProfileDraft,
    /// Visible markdown and its sync state
    pub sync: SyncController,
    pub mode: ModeState,
    /// Display name for the contact header
    pub display_name: String,
    /// Save target, shown in the status bar
    pub file_path: PathBuf,
    pub focus: Focus,
    /// Raw markdown editor, mirrors the document content
    pub editor: EditorBuffer,
    pub editor_scroll_offset: usize,
    /// Rendered preview of the document content
    pub preview: Preview,
    /// Preview scroll position
    pub viewport: Viewport,
    /// Preview needs a rebuild before it is shown again
    preview_stale: bool,
    pub help_visible: bool,
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Jobs waiting to be dispatched by the effects layer
    pub(super) outbox: Vec<Job>,
    /// Hash of content handed to an in-flight save
    pub(super) save_in_flight: Option<u64>,
    pub(super) exporting: bool,
    saved_hash: u64,
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("mode", &self.mode)
            .field("focus", &self.focus)
            .field("sync_state", &self.sync.state())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Start a session, optionally showing previously saved markdown.
    pub fn new(
        file_path: PathBuf,
        seed: Option<String>,
        policy: SyncPolicy,
        terminal_size: (u16, u16),
    ) -> Self {
        let mode = ModeState::new(seed.is_some());
        let sync = SyncController::new(seed, policy);
        let content = sync.content().to_string();
        let (width, height) = terminal_size;
        let mut model = Self {
            draft: ProfileDraft::default(),
            sync,
            mode,
            display_name: String::new(),
            file_path,
            focus: Focus::Text(TextField::Contact(ContactField::Email)),
            editor: EditorBuffer::from_text(&content),
            editor_scroll_offset: 0,
            preview: Preview::default(),
            viewport: Viewport::new(width, crate::ui::body_height(height), 0),
            preview_stale: true,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            outbox: Vec::new(),
            save_in_flight: None,
            exporting: false,
            saved_hash: hash_bytes(content.as_bytes()),
            should_quit: false,
            quit_confirmed: false,
        };
        model.rebuild_preview();
        model
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Current markdown text.
    pub fn content(&self) -> &str {
        self.sync.content()
    }

    /// Whether the document differs from what was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        hash_bytes(self.content().as_bytes()) != self.saved_hash
    }

    pub(super) const fn mark_saved(&mut self, hash: u64) {
        self.saved_hash = hash;
    }

    pub const fn is_saving(&self) -> bool {
        self.save_in_flight.is_some()
    }

    pub const fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Whether the diverged-content banner should show.
    pub const fn show_divergence_banner(&self) -> bool {
        self.sync.document().is_diverged() || self.sync.has_pending_overwrite()
    }

    /// Feed a draft mutation to the sync controller and refresh the views.
    pub(super) fn draft_changed(&mut self) {
        let had_pending = self.sync.has_pending_overwrite();
        let outcome =
            self.sync
                .on_draft_changed(&self.draft, &self.display_name, self.mode.active_view);
        match outcome {
            SyncOutcome::Replaced => self.document_replaced(),
            SyncOutcome::Held if !had_pending => {
                self.show_toast(
                    ToastLevel::Warning,
                    "Markdown has manual edits. Ctrl+Y overwrites, Esc keeps them",
                );
            }
            SyncOutcome::Held | SyncOutcome::Unchanged | SyncOutcome::Skipped => {}
        }
    }

    /// The document content was replaced from outside the raw editor.
    pub(super) fn document_replaced(&mut self) {
        let content = self.sync.content().to_string();
        self.editor.replace_text(&content);
        self.clamp_editor_scroll();
        self.preview_stale = true;
        self.rebuild_preview();
    }

    /// Push the raw editor text into the document after a keystroke.
    pub(super) fn editor_changed(&mut self) {
        if self.sync.on_user_edit(self.editor.text(), self.mode.render_mode) {
            self.preview_stale = true;
        }
        self.clamp_editor_scroll();
    }

    /// Re-lay out the preview if the content or width changed.
    pub(super) fn rebuild_preview(&mut self) {
        if !self.preview_stale {
            return;
        }
        let width = crate::ui::markdown_content_width(self.viewport.width());
        self.preview = Preview::render(self.sync.content(), width);
        self.viewport.set_total_lines(self.preview.line_count());
        self.preview_stale = false;
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, crate::ui::body_height(height));
        self.preview_stale = true;
        if self.mode.render_mode == RenderMode::Rendered {
            self.rebuild_preview();
        }
        self.clamp_editor_scroll();
    }

    /// Keep the editor cursor on screen.
    pub(super) fn clamp_editor_scroll(&mut self) {
        let height = usize::from(self.viewport.height()).max(1);
        let line = self.editor.cursor().line;
        if line < self.editor_scroll_offset {
            self.editor_scroll_offset = line;
        } else if line >= self.editor_scroll_offset + height {
            self.editor_scroll_offset = line + 1 - height;
        }
    }

    /// Focusable elements of the form view, in tab order.
    pub fn focus_targets(&self) -> Vec<Focus> {
        let mut targets: Vec<Focus> = ContactField::ALL
            .into_iter()
            .map(|field| Focus::Text(TextField::Contact(field)))
            .collect();
        targets.push(Focus::Text(TextField::Summary));
        targets.push(Focus::Text(TextField::Skills));
        for kind in EntryKind::ALL {
            let list = self.draft.entries(kind);
            targets.extend((0..list.len()).map(|index| Focus::Entry(kind, index)));
            if list.is_adding() {
                targets.extend(
                    EntryField::ALL
                        .into_iter()
                        .map(|field| Focus::FormField(kind, field)),
                );
                targets.push(Focus::CurrentCheckbox(kind));
                targets.push(Focus::ImproveButton(kind));
                targets.push(Focus::SubmitButton(kind));
                targets.push(Focus::CancelButton(kind));
            } else {
                targets.push(Focus::AddButton(kind));
            }
        }
        targets
    }

    pub(super) fn move_focus(&mut self, forward: bool) {
        let targets = self.focus_targets();
        let current = targets.iter().position(|t| *t == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % targets.len()
        } else {
            (current + targets.len() - 1) % targets.len()
        };
        self.focus = targets[next];
    }

    /// Move focus somewhere valid after entries or forms changed.
    pub(super) fn repair_focus(&mut self) {
        if self.focus_targets().contains(&self.focus) {
            return;
        }
        self.focus = match self.focus {
            Focus::Entry(kind, index) if index > 0 && index - 1 < self.draft.entries(kind).len() => {
                Focus::Entry(kind, index - 1)
            }
            focus => match focus.entry_kind() {
                Some(kind) if self.draft.entries(kind).is_adding() => {
                    Focus::FormField(kind, EntryField::Title)
                }
                Some(kind) => Focus::AddButton(kind),
                None => Focus::Text(TextField::Contact(ContactField::Email)),
            },
        };
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), None, SyncPolicy::default(), (80, 24))
    }
}
