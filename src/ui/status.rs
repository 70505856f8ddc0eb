use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::document::{SyncPolicy, SyncState};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    let dirty_indicator = if model.is_dirty() { " [modified]" } else { "" };
    let sync_indicator = match model.sync.state() {
        SyncState::Derived => "",
        SyncState::Diverged => " [edited]",
    };
    let mut busy = String::new();
    if model.is_saving() {
        busy.push_str(" [saving]");
    }
    if model.is_exporting() {
        busy.push_str(" [exporting]");
    }

    let (label, position, bg) = if model.mode.is_form() {
        ("FORM", String::new(), Color::DarkGray)
    } else if model.mode.is_raw_editing() {
        let c = model.editor.cursor();
        (
            "RAW",
            format!("  Ln {}, Col {}", c.line + 1, c.col + 1),
            Color::Magenta,
        )
    } else {
        let line_info = format!(
            "  [{}%]  Line {}/{}",
            model.viewport.scroll_percent(),
            model.viewport.offset() + 1,
            model.viewport.total_lines()
        );
        ("MARKDOWN", line_info, Color::DarkGray)
    };

    let status = format!(
        " {label}  {filename}{dirty_indicator}{sync_indicator}{busy}{position}  F1:help"
    );
    let status_bar = Paragraph::new(status).style(Style::default().bg(bg).fg(Color::White));
    frame.render_widget(status_bar, area);
}

/// Warn that the visible markdown no longer matches the form.
pub fn render_divergence_banner(model: &Model, frame: &mut Frame, area: Rect) {
    let (text, style) = if model.sync.has_pending_overwrite() {
        (
            "Form changed. Ctrl+Y regenerates the markdown, Esc keeps your edits",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        )
    } else {
        let text = match model.sync.policy() {
            SyncPolicy::Overwrite => "Markdown differs from the form. Form changes will replace it",
            SyncPolicy::Confirm => "Markdown differs from the form. Form changes will ask first",
        };
        (text, Style::default().bg(Color::Blue).fg(Color::White))
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
