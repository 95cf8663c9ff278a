use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::HitRegion;
use crate::playground::buffers::Pane;
use crate::playground::listeners::ElementId;
use crate::playground::tabs::TabController;
use crate::theme;

const TITLE: &str = "  Codify  ";

/// Toolbar buttons, left to right.
const ACTIONS: [(&str, ElementId); 4] = [
    ("Run", ElementId::RunButton),
    ("Open preview", ElementId::OpenPreviewButton),
    ("Save", ElementId::SaveButton),
    ("Load", ElementId::LoadButton),
];

/// Renders title, pane tabs and toolbar. Returns the clickable regions.
pub fn render(frame: &mut Frame, area: Rect, tabs: &TabController) -> Vec<HitRegion> {
    let mut regions = Vec::new();

    // Left side: title + one selector per pane
    let mut left_spans = vec![Span::styled(TITLE, theme::title_style())];
    let mut x = area.x + TITLE.len() as u16;
    for pane in Pane::ALL {
        let label = format!(" {} ", pane.label());
        let width = label.len() as u16;
        let style = if tabs.is_active(pane) {
            Style::default()
                .fg(theme::WHITE)
                .bg(theme::ACTIVE_TAB)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::INACTIVE_TAB).bg(theme::BAR_BG)
        };
        push_region(&mut regions, area, x, width, ElementId::TabStrip, Some(pane));
        left_spans.push(Span::styled(label, style));
        x += width;
    }

    // Right side: action buttons separated by a space
    let mut right_spans: Vec<Span> = Vec::new();
    let mut button_widths = Vec::new();
    for (label, element) in ACTIONS {
        let text = format!(" {} ", label);
        let bg = if element == ElementId::RunButton {
            theme::RUN_BUTTON_BG
        } else {
            theme::BUTTON_BG
        };
        button_widths.push((text.len() as u16, element));
        right_spans.push(Span::styled(text, theme::button_style(bg)));
        right_spans.push(Span::styled(" ", theme::header_style()));
    }
    let right_width: u16 = right_spans.iter().map(|s| s.width() as u16).sum();

    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(right_width),
    ])
    .split(area);

    let mut x = chunks[1].x;
    for (width, element) in button_widths {
        push_region(&mut regions, chunks[1], x, width, element, None);
        x += width + 1;
    }

    // Fill background
    let bg = Paragraph::new("").style(theme::header_style());
    frame.render_widget(bg, area);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
    frame.render_widget(Paragraph::new(Line::from(right_spans)), chunks[1]);

    regions
}

fn push_region(
    regions: &mut Vec<HitRegion>,
    bounds: Rect,
    x: u16,
    width: u16,
    element: ElementId,
    pane: Option<Pane>,
) {
    let area = Rect::new(x, bounds.y, width, 1).intersection(bounds);
    if area.width > 0 && area.height > 0 {
        regions.push(HitRegion { area, element, pane });
    }
}
