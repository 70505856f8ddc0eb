//! The structured profile form.
//!
//! The form is laid out as a flat list of lines; the focused element's first
//! line is tracked so the view can scroll to keep it visible.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::{Focus, Model};
use crate::entries::{EntryField, EntryList};
use crate::profile::{ContactField, EntryKind, TextField};

use super::{DOCUMENT_LEFT_PADDING, style};

const LABEL_WIDTH: usize = 19;

/// Form lines plus the row the focused element starts on.
pub struct FormLayout {
    pub lines: Vec<Line<'static>>,
    pub focus_row: usize,
}

impl FormLayout {
    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::raw(""));
    }

    fn mark(&mut self, focused: bool) {
        if focused {
            self.focus_row = self.lines.len();
        }
    }
}

/// Lay out every section of the form.
pub fn layout_form(model: &Model) -> FormLayout {
    let mut out = FormLayout {
        lines: Vec::new(),
        focus_row: 0,
    };

    out.push(Line::styled("Contact", style::section_title()));
    for field in ContactField::ALL {
        let focus = Focus::Text(TextField::Contact(field));
        text_field(
            &mut out,
            model,
            focus,
            field.label(),
            model.draft.text(TextField::Contact(field)),
            field.placeholder(),
        );
    }
    out.blank();

    for (field, placeholder) in [
        (TextField::Summary, "A few sentences about your experience"),
        (TextField::Skills, "Languages, tools, domains"),
    ] {
        out.push(Line::styled(field.label(), style::section_title()));
        text_field(
            &mut out,
            model,
            Focus::Text(field),
            "",
            model.draft.text(field),
            placeholder,
        );
        out.blank();
    }

    for kind in EntryKind::ALL {
        entry_section(&mut out, model, model.draft.entries(kind));
        out.blank();
    }
    out
}

/// Render the form, scrolled so the focused element is on screen.
pub fn render_form(model: &Model, frame: &mut Frame, area: Rect) {
    let FormLayout { lines, focus_row } = layout_form(model);
    let height = usize::from(area.height).max(1);
    let scroll = focus_row.saturating_sub(height.saturating_sub(3));
    let visible: Vec<Line> = lines.into_iter().skip(scroll).take(height).collect();

    let block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

fn marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("› ", style::field_label(true))
    } else {
        Span::raw("  ")
    }
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    if label.is_empty() {
        Span::raw("")
    } else {
        Span::styled(
            format!("{label:<LABEL_WIDTH$}"),
            style::field_label(focused),
        )
    }
}

/// A labelled value. Multi-line values continue under the value column.
fn text_field(
    out: &mut FormLayout,
    model: &Model,
    focus: Focus,
    label: &str,
    value: &str,
    placeholder: &str,
) {
    let focused = model.focus == focus;
    out.mark(focused);
    let indent = if label.is_empty() { 0 } else { LABEL_WIDTH };

    if value.is_empty() {
        let mut spans = vec![marker(focused), label_span(label, focused)];
        if focused {
            spans.push(Span::styled(" ", style::cursor()));
        }
        spans.push(Span::styled(placeholder.to_string(), style::placeholder()));
        out.push(Line::from(spans));
        return;
    }

    let rows: Vec<&str> = value.split('\n').collect();
    let last = rows.len() - 1;
    for (idx, row) in rows.into_iter().enumerate() {
        let mut spans = if idx == 0 {
            vec![marker(focused), label_span(label, focused)]
        } else {
            vec![Span::raw(" ".repeat(2 + indent))]
        };
        spans.push(Span::raw(row.to_string()));
        if focused && idx == last {
            spans.push(Span::styled(" ", style::cursor()));
        }
        out.push(Line::from(spans));
    }
}

fn entry_section(out: &mut FormLayout, model: &Model, list: &EntryList) {
    let kind = list.kind();
    out.push(Line::styled(kind.section_title(), style::section_title()));

    for (index, entry) in list.entries().iter().enumerate() {
        let focused = model.focus == Focus::Entry(kind, index);
        out.mark(focused);
        let title_style = if focused {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        out.push(Line::from(vec![
            marker(focused),
            Span::styled(entry.heading(), title_style),
            Span::styled(format!("  {}", entry.date_range()), style::placeholder()),
        ]));
        if !entry.description.trim().is_empty() {
            for row in entry.description.lines() {
                out.push(Line::raw(format!("    {row}")));
            }
        }
    }

    let Some(form) = list.form() else {
        let focused = model.focus == Focus::AddButton(kind);
        out.mark(focused);
        out.push(Line::from(vec![
            marker(focused),
            Span::styled(format!("[+ Add {}]", kind.label()), style::button(focused)),
        ]));
        return;
    };

    for field in EntryField::ALL {
        let focus = Focus::FormField(kind, field);
        if field == EntryField::EndDate && form.current {
            let focused = model.focus == focus;
            out.mark(focused);
            out.push(Line::from(vec![
                marker(focused),
                label_span(field.label(), focused),
                Span::styled("Present", style::disabled()),
            ]));
        } else {
            text_field(
                out,
                model,
                focus,
                field.label(),
                form.field(field),
                field.placeholder(),
            );
        }
        if let Some(err) = list.errors().get(field) {
            out.push(Line::from(vec![
                Span::raw(" ".repeat(2 + LABEL_WIDTH)),
                Span::styled(err.to_string(), style::field_error()),
            ]));
        }
    }
    let checkbox_focused = model.focus == Focus::CurrentCheckbox(kind);
    out.mark(checkbox_focused);
    let check = if form.current { "[x]" } else { "[ ]" };
    out.push(Line::from(vec![
        marker(checkbox_focused),
        Span::styled(
            format!("{check} {}", current_label(kind)),
            style::field_label(checkbox_focused),
        ),
    ]));

    let improve_focused = model.focus == Focus::ImproveButton(kind);
    let submit_focused = model.focus == Focus::SubmitButton(kind);
    let cancel_focused = model.focus == Focus::CancelButton(kind);
    out.mark(improve_focused || submit_focused || cancel_focused);
    let improve = if list.is_improving() {
        Span::styled("[Improving...]", style::disabled())
    } else if list.can_improve() {
        Span::styled("[Improve with AI]", style::button(improve_focused))
    } else {
        Span::styled(
            "[Improve with AI]",
            if improve_focused {
                style::button(true)
            } else {
                style::disabled()
            },
        )
    };
    out.push(Line::from(vec![
        marker(improve_focused || submit_focused || cancel_focused),
        improve,
        Span::raw("  "),
        Span::styled(format!("[Add {}]", kind.label()), style::button(submit_focused)),
        Span::raw("  "),
        Span::styled("[Cancel]", style::button(cancel_focused)),
    ]));
}

const fn current_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Experience => "I currently work here",
        EntryKind::Education => "I currently study here",
        EntryKind::Project => "This project is ongoing",
    }
}
