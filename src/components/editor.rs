use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

use crate::playground::buffers::EditorOptions;
use crate::theme;

pub fn configure_textarea(textarea: &mut TextArea, options: &EditorOptions) {
    // Cursor line highlighting
    textarea.set_cursor_line_style(theme::cursor_line_style());

    // Line numbers
    textarea.set_line_number_style(theme::line_number_style());

    // Editor area style
    textarea.set_style(theme::editor_style());

    // Selection style
    textarea.set_selection_style(Style::default().bg(theme::SELECTION));

    textarea.set_tab_length(options.tab_size);

    // Soft tabs: Tab inserts spaces
    textarea.set_hard_tab_indent(!options.soft_tabs);

    // Hidden until the editor is focused
    set_cursor_visible(textarea, false);
}

pub fn set_cursor_visible(textarea: &mut TextArea, visible: bool) {
    let style = if visible {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    };
    textarea.set_cursor_style(style);
}

/// Plain-text input styling for the side fields.
pub fn configure_field(textarea: &mut TextArea, focused: bool) {
    textarea.set_cursor_line_style(theme::cursor_line_style());
    textarea.set_style(theme::editor_style());
    set_cursor_visible(textarea, focused);
}
