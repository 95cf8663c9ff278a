use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};

use crate::components::editor;
use crate::playground::fields::TextFields;
use crate::theme;

/// Which side field, if any, has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFocus {
    Assignment,
    Test,
}

/// Renders the assignment and validation-test fields stacked vertically.
pub fn render(frame: &mut Frame, area: Rect, fields: &mut TextFields, focus: Option<FieldFocus>) {
    let chunks = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let panels = [
        (&mut fields.assignment, " Task / Assignment ", FieldFocus::Assignment),
        (&mut fields.test, " Validation tests ", FieldFocus::Test),
    ];
    for ((textarea, title, which), chunk) in panels.into_iter().zip(chunks.iter()) {
        let focused = focus == Some(which);
        editor::configure_field(textarea, focused);
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::panel_border_style(focused))
                .title(title),
        );
        frame.render_widget(&*textarea, *chunk);
    }
}
