use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::HitRegion;
use crate::playground::listeners::ElementId;
use crate::playground::output::{Level, OutputLine};
use crate::theme;

const BUTTONS: [(&str, ElementId); 2] = [
    ("Run with tests", ElementId::RunTestsButton),
    ("Clear log", ElementId::ClearOutputButton),
];

/// Renders the output console with its buttons underneath. Newest lines stay
/// in view. Returns the button regions.
pub fn render(frame: &mut Frame, area: Rect, lines: &[OutputLine]) -> Vec<HitRegion> {
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border_style(false))
        .title(" Output ");
    let inner = block.inner(chunks[0]);
    let text: Vec<Line> = lines
        .iter()
        .map(|line| Line::from(Span::styled(line.text.clone(), level_style(line.level))))
        .collect();
    let console = Paragraph::new(text).wrap(Wrap { trim: false });
    // Rows after wrapping, not entries
    let rows = console.line_count(inner.width);
    let overflow = u16::try_from(rows.saturating_sub(usize::from(inner.height))).unwrap_or(u16::MAX);
    frame.render_widget(block, chunks[0]);
    frame.render_widget(console.scroll((overflow, 0)), inner);

    let mut regions = Vec::new();
    let mut spans = Vec::new();
    let mut x = chunks[1].x;
    for (label, element) in BUTTONS {
        let text = format!(" {} ", label);
        let width = text.len() as u16;
        let bg = if element == ElementId::RunTestsButton {
            theme::TESTS_BUTTON_BG
        } else {
            theme::BUTTON_BG
        };
        let area = Rect::new(x, chunks[1].y, width, 1).intersection(chunks[1]);
        if area.width > 0 && area.height > 0 {
            regions.push(HitRegion {
                area,
                element,
                pane: None,
            });
        }
        spans.push(Span::styled(text, theme::button_style(bg)));
        spans.push(Span::raw(" "));
        x += width + 1;
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

    regions
}

fn level_style(level: Level) -> Style {
    match level {
        Level::Info => Style::default().fg(theme::SUCCESS),
        Level::Warn => Style::default().fg(theme::WARNING),
        Level::Error => Style::default().fg(theme::ERROR),
    }
}
