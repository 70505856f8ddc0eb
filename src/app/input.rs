use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Focus, Message, Model};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.mode.is_form() {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown if model.mode.is_raw_editing() => {
                Some(Message::EditorMoveCursor(Direction::Down))
            }
            MouseEventKind::ScrollUp if model.mode.is_raw_editing() => {
                Some(Message::EditorMoveCursor(Direction::Up))
            }
            MouseEventKind::ScrollDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(3)),
            MouseEventKind::ScrollUp => model
                .viewport
                .can_scroll_up()
                .then_some(Message::ScrollUp(3)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys
        match key.code {
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::F(2) => return Some(Message::ToggleView),
            KeyCode::Char('t') if ctrl => return Some(Message::ToggleView),
            KeyCode::Char('e') if ctrl => {
                return (!model.mode.is_form()).then_some(Message::ToggleRenderMode);
            }
            KeyCode::Char('s') if ctrl => return Some(Message::Save),
            KeyCode::Char('p') if ctrl => return Some(Message::Export),
            KeyCode::Char('y') if ctrl => return Some(Message::ConfirmOverwrite),
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Esc if model.sync.has_pending_overwrite() => {
                return Some(Message::DismissOverwrite);
            }
            _ => {}
        }

        if model.mode.is_form() {
            Self::handle_form_key(key, model)
        } else if model.mode.is_raw_editing() {
            Self::handle_editor_key(key)
        } else {
            Self::handle_preview_key(key, model)
        }
    }

    fn handle_form_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let focus = model.focus;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Tab | KeyCode::Down => Some(Message::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Message::FocusPrev),
            KeyCode::Enter if focus.is_multiline() => Some(Message::InputNewline),
            KeyCode::Enter => Some(Message::Activate),
            KeyCode::Char(' ') if matches!(focus, Focus::CurrentCheckbox(_)) => {
                Some(Message::ToggleCheckbox)
            }
            KeyCode::Char(' ') if !focus.accepts_text() => Some(Message::Activate),
            KeyCode::Char('d') if ctrl => {
                matches!(focus, Focus::Entry(..)).then_some(Message::DeleteFocused)
            }
            KeyCode::Char('g') if ctrl => {
                let kind = focus.entry_kind()?;
                model
                    .draft
                    .entries(kind)
                    .is_adding()
                    .then_some(Message::ImproveDescription(kind))
            }
            KeyCode::Char(c) if plain && focus.accepts_text() => Some(Message::InputChar(c)),
            KeyCode::Backspace if focus.accepts_text() => Some(Message::InputBackspace),
            KeyCode::Esc => {
                let kind = focus.entry_kind()?;
                model
                    .draft
                    .entries(kind)
                    .is_adding()
                    .then_some(Message::CancelEntryForm(kind))
            }
            _ => None,
        }
    }

    fn handle_editor_key(key: KeyEvent) -> Option<Message> {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) if plain => Some(Message::EditorInsertChar(c)),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            _ => None,
        }
    }

    fn handle_preview_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => model
                .viewport
                .can_scroll_up()
                .then_some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => {
                model.viewport.can_scroll_up().then_some(Message::PageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('?') => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }
}
