use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::playground::preview::SandboxPolicy;
use crate::theme;

/// Scroll state of the preview pane.
#[derive(Debug, Default)]
pub struct PreviewState {
    pub scroll_offset: u16,
    pub content_height: u16,
    /// Inner height at the last render, for paging.
    pub viewport_height: u16,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        let max_scroll = self.content_height.saturating_sub(self.viewport_height);
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max_scroll);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.saturating_sub(2));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.saturating_sub(2));
    }
}

/// Row counts past `u16::MAX` pin to it.
fn clamp_rows(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Shows the document currently loaded in the sandboxed frame.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    document: &str,
    policy: SandboxPolicy,
    state: &mut PreviewState,
) {
    let title = format!(" Preview · sandbox: {} ", policy.attribute());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border_style(false))
        .title(title);
    let inner = block.inner(area);

    let body = if document.is_empty() {
        "Press F5 or Run to render the preview.".to_string()
    } else {
        document.to_string()
    };
    state.content_height = clamp_rows(body.lines().count());
    state.viewport_height = inner.height;
    let max_scroll = state.content_height.saturating_sub(inner.height);
    state.scroll_offset = state.scroll_offset.min(max_scroll);

    let paragraph = Paragraph::new(body)
        .block(block)
        .style(theme::editor_style())
        .scroll((state.scroll_offset, 0));
    frame.render_widget(paragraph, area);

    // Scrollbar
    if state.content_height > inner.height {
        let mut scrollbar_state = ScrollbarState::new(state.content_height as usize)
            .position(state.scroll_offset as usize)
            .viewport_content_length(inner.height as usize);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_style(Style::default().fg(theme::LINE_NUMBER))
            .track_style(Style::default().fg(theme::BORDER));
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}
