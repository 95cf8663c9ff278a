use ratatui::style::{Color, Modifier, Style};

// Base colors; Color::Reset inherits terminal defaults
pub const BG: Color = Color::Reset;
pub const FG: Color = Color::Reset;
pub const BORDER: Color = Color::DarkGray;

// UI elements
pub const BAR_BG: Color = Color::Reset;
pub const LINE_NUMBER: Color = Color::DarkGray;
pub const SELECTION: Color = Color::Blue;
pub const TITLE: Color = Color::Rgb(130, 170, 255);

// Output console levels
pub const SUCCESS: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const ERROR: Color = Color::Red;

// White for text on colored backgrounds
pub const WHITE: Color = Color::White;

// Tab colors
pub const ACTIVE_TAB: Color = Color::Blue;
pub const INACTIVE_TAB: Color = Color::Gray;

// Action buttons
pub const BUTTON_BG: Color = Color::DarkGray;
pub const RUN_BUTTON_BG: Color = Color::Green;
pub const TESTS_BUTTON_BG: Color = Color::Yellow;

// Pre-built styles
pub fn editor_style() -> Style {
    Style::default()
}

pub fn header_style() -> Style {
    Style::default()
}

pub fn status_style() -> Style {
    Style::default()
}

pub fn line_number_style() -> Style {
    Style::default().fg(LINE_NUMBER)
}

pub fn cursor_line_style() -> Style {
    Style::default()
}

pub fn title_style() -> Style {
    Style::default().fg(TITLE).add_modifier(Modifier::BOLD)
}

pub fn panel_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACTIVE_TAB)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn button_style(bg: Color) -> Style {
    Style::default()
        .fg(WHITE)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}
