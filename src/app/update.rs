use std::path::PathBuf;

use tracing::debug;

use crate::app::Model;
use crate::app::model::{Focus, Job, ToastLevel, hash_bytes};
use crate::editor::Direction;
use crate::entries::{EntryField, ImproveBlocked, ImproveOutcome};
use crate::profile::{EntryId, EntryKind, TextField};
use crate::services::{PersistenceError, RenderError, SavedRecord, ServiceError};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and background job results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // View
    /// Switch between the form and the markdown view
    ToggleView,
    /// Switch the markdown view between rendered preview and raw editing
    ToggleRenderMode,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Form navigation
    FocusNext,
    FocusPrev,
    /// Press the focused button or advance from a single-line field
    Activate,
    /// Flip the focused "current position" checkbox
    ToggleCheckbox,
    /// Type into the focused field
    InputChar(char),
    InputBackspace,
    /// Line break in a multi-line field
    InputNewline,

    // Form editing
    SetText(TextField, String),
    OpenEntryForm(EntryKind),
    CancelEntryForm(EntryKind),
    SubmitEntryForm(EntryKind),
    SetEntryField(EntryKind, EntryField, String),
    SetEntryCurrent(EntryKind, bool),
    DeleteEntry(EntryKind, EntryId),
    /// Delete the entry card that has focus
    DeleteFocused,
    /// Ask the improvement service to rewrite the open form's description
    ImproveDescription(EntryKind),
    ImproveFinished {
        kind: EntryKind,
        generation: u64,
        result: Result<String, ServiceError>,
    },

    // Markdown view
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to beginning of document
    GoToTop,
    /// Go to end of document
    GoToBottom,
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,

    // Sync
    /// Replace edited markdown with the held composed output
    ConfirmOverwrite,
    /// Keep edited markdown and drop the held overwrite
    DismissOverwrite,

    // Persistence and export
    Save,
    SaveFinished(Result<SavedRecord, PersistenceError>),
    Export,
    ExportFinished(Result<PathBuf, RenderError>),

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

impl Message {
    /// Messages produced by background jobs rather than the user.
    const fn is_completion(&self) -> bool {
        matches!(
            self,
            Self::ImproveFinished { .. }
                | Self::SaveFinished(_)
                | Self::ExportFinished(_)
                | Self::Resize(..)
                | Self::Redraw
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Background work is queued on the model and started by the effects layer.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any user action other than the confirmed one.
    if !matches!(msg, Message::Quit) && !msg.is_completion() {
        model.quit_confirmed = false;
    }

    match msg {
        // View
        Message::ToggleView => {
            model.mode.toggle_view();
            if !model.mode.is_form() {
                model.rebuild_preview();
            }
        }
        Message::ToggleRenderMode => {
            if !model.mode.is_form() {
                model.mode.toggle_render_mode();
                if model.mode.is_raw_editing() {
                    model.clamp_editor_scroll();
                } else {
                    model.rebuild_preview();
                }
            }
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Form navigation
        Message::FocusNext => model.move_focus(true),
        Message::FocusPrev => model.move_focus(false),
        Message::Activate => activate(&mut model),
        Message::ToggleCheckbox => {
            if let Focus::CurrentCheckbox(kind) = model.focus {
                let current = model
                    .draft
                    .entries(kind)
                    .form()
                    .is_some_and(|form| form.current);
                set_entry_current(&mut model, kind, !current);
            }
        }
        Message::InputChar(ch) => edit_focused(&mut model, |value| value.push(ch)),
        Message::InputBackspace => edit_focused(&mut model, |value| {
            value.pop();
        }),
        Message::InputNewline => {
            if model.focus.is_multiline() {
                edit_focused(&mut model, |value| value.push('\n'));
            }
        }

        // Form editing
        Message::SetText(field, value) => {
            if model.draft.set_text(field, value) {
                model.draft_changed();
            }
        }
        Message::OpenEntryForm(kind) => {
            model.draft.entries_mut(kind).open_form();
            model.focus = Focus::FormField(kind, EntryField::Title);
        }
        Message::CancelEntryForm(kind) => {
            model.draft.entries_mut(kind).cancel_form();
            model.focus = Focus::AddButton(kind);
        }
        Message::SubmitEntryForm(kind) => submit_entry_form(&mut model, kind),
        Message::SetEntryField(kind, field, value) => {
            if let Some(form) = model.draft.entries_mut(kind).form_mut() {
                form.set_field(field, value);
            }
        }
        Message::SetEntryCurrent(kind, current) => set_entry_current(&mut model, kind, current),
        Message::DeleteEntry(kind, id) => {
            if model.draft.entries_mut(kind).delete_entry(id) {
                model.repair_focus();
                model.draft_changed();
            }
        }
        Message::DeleteFocused => {
            if let Focus::Entry(kind, index) = model.focus
                && model.draft.entries_mut(kind).delete_at(index).is_some()
            {
                model.repair_focus();
                model.draft_changed();
            }
        }
        Message::ImproveDescription(kind) => match model.draft.entries_mut(kind).begin_improve() {
            Ok(request) => {
                model.outbox.push(Job::Improve(request));
                model.show_toast(ToastLevel::Info, "Improving description...");
            }
            Err(ImproveBlocked::EmptyDescription) => {
                model.show_toast(ToastLevel::Info, "Write a description first");
            }
            Err(ImproveBlocked::InFlight | ImproveBlocked::NoForm) => {}
        },
        Message::ImproveFinished {
            kind,
            generation,
            result,
        } => match model.draft.entries_mut(kind).finish_improve(generation, result) {
            ImproveOutcome::Applied => {
                model.show_toast(ToastLevel::Info, "Description improved with AI");
            }
            ImproveOutcome::Stale => {
                debug!(?kind, generation, "dropping improvement for a closed form");
            }
            ImproveOutcome::Failed(err) => {
                model.show_toast(
                    ToastLevel::Error,
                    format!("Failed to improve description: {err}"),
                );
            }
        },

        // Markdown view
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => {
            if model.mode.is_raw_editing() {
                move_editor_lines(&mut model, Direction::Up);
            } else {
                model.viewport.page_up();
            }
        }
        Message::PageDown => {
            if model.mode.is_raw_editing() {
                move_editor_lines(&mut model, Direction::Down);
            } else {
                model.viewport.page_down();
            }
        }
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),
        Message::EditorInsertChar(ch) => {
            if model.mode.is_raw_editing() {
                model.editor.insert_char(ch);
                model.editor_changed();
            }
        }
        Message::EditorSplitLine => {
            if model.mode.is_raw_editing() {
                model.editor.insert_char('\n');
                model.editor_changed();
            }
        }
        Message::EditorDeleteBack => {
            if model.mode.is_raw_editing() && model.editor.delete_back() {
                model.editor_changed();
            }
        }
        Message::EditorDeleteForward => {
            if model.mode.is_raw_editing() && model.editor.delete_forward() {
                model.editor_changed();
            }
        }
        Message::EditorMoveCursor(direction) => {
            model.editor.move_cursor(direction);
            model.clamp_editor_scroll();
        }
        Message::EditorMoveHome => model.editor.move_home(),
        Message::EditorMoveEnd => model.editor.move_end(),

        // Sync
        Message::ConfirmOverwrite => {
            if model
                .sync
                .confirm_overwrite(&model.draft, &model.display_name)
            {
                model.document_replaced();
                model.show_toast(ToastLevel::Info, "Markdown regenerated from form");
            }
        }
        Message::DismissOverwrite => {
            if model.sync.has_pending_overwrite() {
                model.sync.dismiss_pending();
                model.show_toast(ToastLevel::Info, "Kept manual edits");
            }
        }

        // Persistence and export
        Message::Save => {
            if model.save_in_flight.is_none() {
                model.save_in_flight = Some(hash_bytes(model.content().as_bytes()));
                model.outbox.push(Job::Save(model.sync.document().clone()));
            }
        }
        Message::SaveFinished(result) => {
            let hash = model.save_in_flight.take();
            match result {
                Ok(record) => {
                    if let Some(hash) = hash {
                        model.mark_saved(hash);
                    }
                    model.show_toast(
                        ToastLevel::Info,
                        format!(
                            "Saved {} ({} bytes, {})",
                            record.path.display(),
                            record.bytes,
                            record.saved_at.format("%H:%M:%S")
                        ),
                    );
                }
                Err(err) => model.show_toast(ToastLevel::Error, format!("Save failed: {err}")),
            }
        }
        Message::Export => {
            if model.exporting {
                return model;
            }
            if model.content().trim().is_empty() {
                model.show_toast(ToastLevel::Warning, "Nothing to export yet");
            } else {
                model.exporting = true;
                model.outbox.push(Job::Export(model.content().to_string()));
                model.show_toast(ToastLevel::Info, "Exporting...");
            }
        }
        Message::ExportFinished(result) => {
            model.exporting = false;
            match result {
                Ok(path) => {
                    model.show_toast(ToastLevel::Info, format!("Exported to {}", path.display()));
                }
                Err(err) => model.show_toast(ToastLevel::Error, format!("Export failed: {err}")),
            }
        }

        // Window
        Message::Resize(width, height) => model.resize(width, height),
        Message::Redraw => {}

        // Application
        Message::Quit => {
            if model.is_dirty() && !model.quit_confirmed {
                model.quit_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes. Ctrl+Q again to quit, Ctrl+S to save",
                );
            } else {
                model.should_quit = true;
            }
        }
    }

    model
}

/// Enter on the focused element.
fn activate(model: &mut Model) {
    match model.focus {
        Focus::AddButton(kind) => {
            model.draft.entries_mut(kind).open_form();
            model.focus = Focus::FormField(kind, EntryField::Title);
        }
        Focus::SubmitButton(kind) => submit_entry_form(model, kind),
        Focus::CancelButton(kind) => {
            model.draft.entries_mut(kind).cancel_form();
            model.focus = Focus::AddButton(kind);
        }
        Focus::CurrentCheckbox(kind) => {
            let current = model
                .draft
                .entries(kind)
                .form()
                .is_some_and(|form| form.current);
            set_entry_current(model, kind, !current);
        }
        Focus::ImproveButton(kind) => {
            *model = update(std::mem::take(model), Message::ImproveDescription(kind));
        }
        Focus::Text(_) | Focus::FormField(..) => model.move_focus(true),
        Focus::Entry(..) => {}
    }
}

fn submit_entry_form(model: &mut Model, kind: EntryKind) {
    match model.draft.entries_mut(kind).submit_form() {
        Some(Ok(_)) => {
            model.focus = Focus::AddButton(kind);
            model.draft_changed();
        }
        Some(Err(errors)) => {
            if let Some(first) = errors.iter().next() {
                model.focus = Focus::FormField(kind, first.field());
            }
        }
        None => {}
    }
}

fn set_entry_current(model: &mut Model, kind: EntryKind, current: bool) {
    if let Some(form) = model.draft.entries_mut(kind).form_mut() {
        form.set_current(current);
    }
}

/// Apply a text edit to whichever field has focus.
fn edit_focused(model: &mut Model, edit: impl FnOnce(&mut String)) {
    match model.focus {
        Focus::Text(field) => {
            let mut value = model.draft.text(field).to_string();
            edit(&mut value);
            if model.draft.set_text(field, value) {
                model.draft_changed();
            }
        }
        Focus::FormField(kind, field) => {
            if let Some(form) = model.draft.entries_mut(kind).form_mut() {
                let mut value = form.field(field).to_string();
                edit(&mut value);
                form.set_field(field, value);
            }
        }
        _ => {}
    }
}

fn move_editor_lines(model: &mut Model, direction: Direction) {
    for _ in 0..model.viewport.height() {
        model.editor.move_cursor(direction);
    }
    model.clamp_editor_scroll();
}
