//! Which view is on screen and how the markdown view shows the document.
//!
//! Purely presentational: nothing here touches the draft or the document.

/// Top-level view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveView {
    #[default]
    Form,
    Markdown,
}

/// Markdown sub-mode. Only meaningful while the markdown view is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Rendered,
    Raw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeState {
    pub active_view: ActiveView,
    pub render_mode: RenderMode,
}

impl ModeState {
    /// Sessions that open persisted content start on the markdown view.
    pub const fn new(has_seed: bool) -> Self {
        Self {
            active_view: if has_seed {
                ActiveView::Markdown
            } else {
                ActiveView::Form
            },
            render_mode: RenderMode::Rendered,
        }
    }

    pub const fn toggle_view(&mut self) {
        self.active_view = match self.active_view {
            ActiveView::Form => ActiveView::Markdown,
            ActiveView::Markdown => ActiveView::Form,
        };
    }

    pub const fn toggle_render_mode(&mut self) {
        self.render_mode = match self.render_mode {
            RenderMode::Rendered => RenderMode::Raw,
            RenderMode::Raw => RenderMode::Rendered,
        };
    }

    pub const fn is_form(&self) -> bool {
        matches!(self.active_view, ActiveView::Form)
    }

    /// Keystrokes go to the raw markdown buffer.
    pub const fn is_raw_editing(&self) -> bool {
        matches!(
            (self.active_view, self.render_mode),
            (ActiveView::Markdown, RenderMode::Raw)
        )
    }
}
