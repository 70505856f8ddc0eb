//! Rendered markdown preview for the terminal.
//!
//! Parses with comrak and flattens the AST into wrapped, styled lines. Raw
//! HTML is not drawn, but `<div align="center">` blocks center what they
//! enclose so the composed contact header reads the same as it prints.

mod types;

pub use types::{InlineSpan, InlineStyle, LineType, RenderedLine};

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use unicode_width::UnicodeWidthStr;

/// Enable the GFM extensions used by both the preview and export.
pub fn apply_extensions(options: &mut Options) {
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
}

/// A parsed document laid out for a given width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    lines: Vec<RenderedLine>,
}

impl Preview {
    /// Parse and lay out `source` for `width` terminal columns.
    pub fn render(source: &str, width: u16) -> Self {
        let arena = Arena::new();
        let mut options = Options::default();
        apply_extensions(&mut options);
        let root = parse_document(&arena, source, &options);

        let mut walker = Walker {
            lines: Vec::new(),
            width: usize::from(width.max(1)),
            centered: false,
        };
        walker.block(root, 0);
        while walker
            .lines
            .last()
            .is_some_and(|line| line.line_type() == LineType::Empty)
        {
            walker.lines.pop();
        }
        Self {
            lines: walker.lines,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    /// Lines from `offset` to `offset + count`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> &[RenderedLine] {
        let start = offset.min(self.lines.len());
        let end = offset.saturating_add(count).min(self.lines.len());
        &self.lines[start..end]
    }
}

struct Walker {
    lines: Vec<RenderedLine>,
    width: usize,
    centered: bool,
}

impl Walker {
    fn block<'a>(&mut self, node: &'a AstNode<'a>, depth: usize) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                let text = extract_text(node);
                if !self.lines.is_empty() {
                    self.ensure_blank();
                }
                let centered = self.centered || has_centered_html(node);
                self.lines.push(
                    RenderedLine::new(
                        format!("{} {}", "#".repeat(usize::from(heading.level)), text.trim()),
                        LineType::Heading(heading.level),
                    )
                    .centered(centered),
                );
                self.push_blank();
            }
            NodeValue::Paragraph => {
                self.paragraph(node, LineType::Paragraph, "", "");
                self.push_blank();
            }
            NodeValue::HtmlBlock(html) => {
                let literal = html.literal.to_ascii_lowercase();
                let opens = literal.contains("align=\"center\"");
                let closes = literal.contains("</div>");
                if opens && !closes {
                    self.centered = true;
                } else if closes {
                    self.centered = false;
                }
            }
            NodeValue::List(list) => {
                let ordered = list.list_type == ListType::Ordered;
                for (index, item) in node.children().enumerate() {
                    let marker = if ordered {
                        format!("{}. ", list.start + index)
                    } else {
                        "• ".to_string()
                    };
                    self.list_item(item, depth, &marker);
                }
                if depth == 0 {
                    self.push_blank();
                }
            }
            NodeValue::BlockQuote => {
                for child in node.children() {
                    if matches!(child.data.borrow().value, NodeValue::Paragraph) {
                        self.paragraph(child, LineType::BlockQuote, "│ ", "│ ");
                    }
                }
                self.push_blank();
            }
            NodeValue::CodeBlock(code) => {
                for line in code.literal.lines() {
                    self.lines
                        .push(RenderedLine::new(format!("  {line}"), LineType::CodeBlock));
                }
                self.push_blank();
            }
            NodeValue::ThematicBreak => {
                self.lines.push(RenderedLine::new(
                    "─".repeat(self.width),
                    LineType::HorizontalRule,
                ));
                self.push_blank();
            }
            _ => {
                for child in node.children() {
                    self.block(child, depth);
                }
            }
        }
    }

    fn list_item<'a>(&mut self, item: &'a AstNode<'a>, depth: usize, marker: &str) {
        let indent = "  ".repeat(depth);
        let first = format!("{indent}{marker}");
        let hanging = " ".repeat(first.width());
        let mut first_paragraph = true;
        for child in item.children() {
            match &child.data.borrow().value {
                NodeValue::Paragraph => {
                    let prefix = if first_paragraph { &first } else { &hanging };
                    self.paragraph(child, LineType::ListItem(depth), prefix, &hanging);
                    first_paragraph = false;
                }
                NodeValue::List(_) => self.block(child, depth + 1),
                _ => {}
            }
        }
    }

    fn paragraph<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        line_type: LineType,
        prefix_first: &str,
        prefix_next: &str,
    ) {
        let spans = collect_inline_spans(node);
        if spans.iter().all(|span| span.text().trim().is_empty()) {
            return;
        }
        for line_spans in wrap_spans(&spans, self.width, prefix_first, prefix_next) {
            let content = spans_to_string(&line_spans);
            self.lines.push(
                RenderedLine::with_spans(content, line_type, line_spans).centered(self.centered),
            );
        }
    }

    fn push_blank(&mut self) {
        self.lines.push(RenderedLine::new(String::new(), LineType::Empty));
    }

    fn ensure_blank(&mut self) {
        if self
            .lines
            .last()
            .is_some_and(|line| line.line_type() != LineType::Empty)
        {
            self.push_blank();
        }
    }
}

fn has_centered_html<'a>(node: &'a AstNode<'a>) -> bool {
    node.children().any(|child| match &child.data.borrow().value {
        NodeValue::HtmlInline(html) => html.to_ascii_lowercase().contains("align=\"center\""),
        _ => false,
    })
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    spans_to_string(&collect_inline_spans(node))
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_inline_spans_recursive(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    let mut next = style;
    match &node.data.borrow().value {
        NodeValue::Text(text) => {
            spans.push(InlineSpan::new(text.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
            return;
        }
        NodeValue::HtmlInline(_) => return,
        NodeValue::Emph => next.emphasis = true,
        NodeValue::Strong => next.strong = true,
        NodeValue::Strikethrough => next.strikethrough = true,
        NodeValue::Link(_) => next.link = true,
        _ => {}
    }
    for child in node.children() {
        collect_inline_spans_recursive(child, next, spans);
    }
}

fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let tokens: Vec<InlineSpan> = spans.iter().flat_map(split_inline_tokens).collect();

    let mut lines = Vec::new();
    let mut current = prefixed(prefix_first);
    let mut current_width = prefix_first.width();
    let mut has_word = false;

    for token in tokens {
        let token_width = token.text().width();
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_width + token_width > width && has_word {
            trim_trailing_whitespace(&mut current, prefix_first.len().min(1));
            lines.push(std::mem::replace(&mut current, prefixed(prefix_next)));
            current_width = prefix_next.width();
            has_word = false;
        }
        if token_is_ws && !has_word {
            // Drop leading whitespace at wrapped line starts.
            continue;
        }
        current_width += token_width;
        current.push(token);
        has_word = true;
    }

    trim_trailing_whitespace(&mut current, usize::from(!prefix_next.is_empty()));
    lines.push(current);
    lines
}

fn trim_trailing_whitespace(line: &mut Vec<InlineSpan>, keep: usize) {
    while line.len() > keep
        && line
            .last()
            .is_some_and(|span| span.text().chars().all(char::is_whitespace))
    {
        line.pop();
    }
}

fn prefixed(prefix: &str) -> Vec<InlineSpan> {
    if prefix.is_empty() {
        Vec::new()
    } else {
        vec![InlineSpan::new(prefix.to_string(), InlineStyle::default())]
    }
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }
    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }
    out
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::compose;
    use crate::profile::ProfileDraft;

    fn contents(preview: &Preview) -> Vec<&str> {
        preview.lines().iter().map(RenderedLine::content).collect()
    }

    #[test]
    fn test_empty_source_has_no_lines() {
        assert_eq!(Preview::render("", 80).line_count(), 0);
    }

    #[test]
    fn test_heading_and_paragraph() {
        let preview = Preview::render("## Skills\n\nRust, Go", 80);
        assert_eq!(contents(&preview), vec!["## Skills", "", "Rust, Go"]);
        assert_eq!(preview.lines()[0].line_type(), LineType::Heading(2));
    }

    #[test]
    fn test_paragraph_wraps_to_width() {
        let preview = Preview::render("one two three four five", 10);
        assert_eq!(contents(&preview), vec!["one two", "three four", "five"]);
    }

    #[test]
    fn test_contact_header_is_centered_without_html() {
        let mut draft = ProfileDraft::default();
        draft.contact.email = Some("a@b.com".to_string());
        draft.summary = "Built things".to_string();
        let preview = Preview::render(&compose(&draft, "Jane Doe"), 80);

        let heading = &preview.lines()[0];
        assert_eq!(heading.content(), "## Jane Doe");
        assert!(heading.is_centered());

        let contact = preview
            .lines()
            .iter()
            .find(|line| line.content().contains("a@b.com"))
            .unwrap();
        assert!(contact.is_centered());
        assert!(!contact.content().contains("div"));

        let summary = preview
            .lines()
            .iter()
            .find(|line| line.content() == "Built things")
            .unwrap();
        assert!(!summary.is_centered());
    }

    #[test]
    fn test_link_text_is_styled() {
        let preview = Preview::render("💼 [LinkedIn](https://x)", 80);
        let spans = preview.lines()[0].spans().unwrap();
        assert!(spans.iter().any(|s| s.text() == "LinkedIn" && s.style().link));
        assert_eq!(preview.lines()[0].content(), "💼 LinkedIn");
    }

    #[test]
    fn test_list_uses_hanging_indent() {
        let preview = Preview::render("- alpha beta gamma", 10);
        assert_eq!(contents(&preview), vec!["• alpha", "  beta", "  gamma"]);
        assert_eq!(preview.lines()[0].line_type(), LineType::ListItem(0));
    }

    #[test]
    fn test_visible_lines_clamps() {
        let preview = Preview::render("a\n\nb\n\nc", 80);
        assert_eq!(preview.visible_lines(2, 10).len(), 3);
        assert!(preview.visible_lines(50, 10).is_empty());
    }
}
