use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::{DOCUMENT_LEFT_PADDING, form, overlays, status, style};

/// Rows available to the body once the status bar is drawn.
pub const fn body_height(total_height: u16) -> u16 {
    total_height.saturating_sub(1)
}

/// Wrap width of the rendered preview for a terminal width.
pub const fn markdown_content_width(total_width: u16) -> u16 {
    let width = total_width.saturating_sub(DOCUMENT_LEFT_PADDING);
    if width == 0 { 1 } else { width }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let banner_active = model.show_divergence_banner();
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active) + u16::from(banner_active);
    let body_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let banner_area = Rect {
        y: area.y + area.height.saturating_sub(footer_rows),
        height: 1,
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    if model.mode.is_form() {
        form::render_form(model, frame, body_area);
    } else if model.mode.is_raw_editing() {
        render_editor(model, frame, body_area);
    } else {
        render_preview(model, frame, body_area);
    }

    if banner_active {
        status::render_divergence_banner(model, frame, banner_area);
    }
    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let width = markdown_content_width(area.width);
    let range = model.viewport.visible_range();
    let visible_lines = model.preview.visible_lines(range.start, range.len());

    let mut content: Vec<Line> = Vec::new();
    for line in visible_lines {
        let line_style = style::style_for_line_type(line.line_type());
        let spans: Vec<Span> = match line.spans() {
            Some(spans) => spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        style::style_for_inline(line_style, span.style()),
                    )
                })
                .collect(),
            None => vec![Span::styled(line.content().to_string(), line_style)],
        };
        let mut rendered = Line::from(spans);
        if line.is_centered() {
            rendered = rendered.alignment(Alignment::Center);
        }
        content.push(rendered);
    }

    if content.is_empty() {
        content.push(Line::styled(
            "Nothing here yet. Fill in the form (F2) or switch to raw editing (Ctrl+E).",
            style::placeholder(),
        ));
    }

    let doc_block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING));
    let doc_area = Rect {
        width: width.saturating_add(DOCUMENT_LEFT_PADDING).min(area.width),
        ..area
    };
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(doc_block), doc_area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = &model.editor;

    // Line number gutter width
    let total_lines = buf.line_count();
    let gutter_width = usize::from(line_number_width(total_lines));

    let visible_height = usize::from(area.height);
    let start = model.editor_scroll_offset;
    let end = (start + visible_height).min(total_lines);
    let cursor = buf.cursor();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>gutter_width$} ", line_idx + 1);

        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if line_idx == cursor.line {
            // Split line at cursor position for cursor rendering
            let chars: Vec<char> = line_text.chars().collect();
            let col = cursor.col.min(chars.len());
            let before: String = chars[..col].iter().collect();
            let cursor_char = chars.get(col).map_or_else(|| " ".to_string(), char::to_string);
            let after: String = chars.get(col + 1..).unwrap_or_default().iter().collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(cursor_char, style::cursor()));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
