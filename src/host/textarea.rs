//! The terminal editor widget: a `tui-textarea` behind the editor capability set.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{CursorMove, Input, TextArea};

use crate::components::editor;
use crate::playground::buffers::{
    ContentKind, CursorPlacement, EditorFactory, EditorOptions, EditorWidget,
};
use crate::playground::commands::{Command, KeyCommand};
use crate::playground::fields::text_area;

/// `tui-textarea` is linked in, so the library is always present.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextAreaFactory;

impl EditorFactory for TextAreaFactory {
    type Widget = TextAreaWidget;

    fn available(&self) -> bool {
        true
    }

    fn create(&self, id: &str, kind: ContentKind, options: &EditorOptions) -> TextAreaWidget {
        let mut textarea = TextArea::default();
        editor::configure_textarea(&mut textarea, options);
        TextAreaWidget {
            id: id.to_string(),
            kind,
            options: *options,
            textarea,
            commands: Vec::new(),
            focused: false,
        }
    }
}

pub struct TextAreaWidget {
    id: String,
    kind: ContentKind,
    options: EditorOptions,
    textarea: TextArea<'static>,
    commands: Vec<KeyCommand>,
    focused: bool,
}

impl TextAreaWidget {
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
        editor::set_cursor_visible(&mut self.textarea, false);
    }

    /// (row, col) of the cursor, zero based.
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    /// Handles a key press. A registered chord yields its command; anything
    /// else goes to the text area.
    pub fn input(&mut self, key: KeyEvent) -> Option<Command> {
        if let Some(bound) = self
            .commands
            .iter()
            .find(|c| chord_matches(c.chord.for_platform(), &key))
        {
            return Some(bound.command.clone());
        }
        self.textarea.input(Input::from(key));
        None
    }

    pub fn insert_str(&mut self, text: &str) {
        self.textarea.insert_str(text);
    }

    /// Scrolls the viewport by `rows`, negative is up.
    pub fn scroll(&mut self, rows: i16) {
        self.textarea.scroll((rows, 0));
    }
}

impl EditorWidget for TextAreaWidget {
    fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn set_value(&mut self, text: &str, cursor: CursorPlacement) {
        self.textarea = text_area(text);
        editor::configure_textarea(&mut self.textarea, &self.options);
        editor::set_cursor_visible(&mut self.textarea, self.focused);
        match cursor {
            CursorPlacement::Start => self.textarea.move_cursor(CursorMove::Top),
            CursorPlacement::End => {
                self.textarea.move_cursor(CursorMove::Bottom);
                self.textarea.move_cursor(CursorMove::End);
            }
        }
    }

    // The text area measures its area on every draw; what can go stale while
    // the pane was hidden is a cursor outside the last measured viewport.
    fn resize(&mut self, _force: bool) {
        self.textarea.move_cursor(CursorMove::InViewport);
    }

    fn focus(&mut self) {
        self.focused = true;
        editor::set_cursor_visible(&mut self.textarea, true);
    }

    fn destroy(&mut self) {
        tracing::debug!(id = %self.id, "destroying editor");
        self.commands.clear();
        self.textarea = TextArea::default();
        self.focused = false;
    }

    fn add_command(&mut self, command: KeyCommand) {
        self.commands.push(command);
    }

    fn commands(&self) -> &[KeyCommand] {
        &self.commands
    }
}

/// Parses an editor-command chord such as `Ctrl-Enter` or `Command-S`.
pub fn parse_chord(chord: &str) -> Option<(KeyModifiers, KeyCode)> {
    let mut parts = chord.split('-');
    let key = parts.next_back()?;

    let mut modifiers = KeyModifiers::NONE;
    for part in parts {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" | "option" => KeyModifiers::ALT,
            "command" | "cmd" => KeyModifiers::SUPER,
            _ => return None,
        };
    }

    let lower = key.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                (Some('f'), Some(_)) => KeyCode::F(lower[1..].parse().ok()?),
                _ => return None,
            }
        }
    };
    Some((modifiers, code))
}

fn chord_matches(chord: &str, key: &KeyEvent) -> bool {
    let Some((modifiers, code)) = parse_chord(chord) else {
        return false;
    };
    if key.modifiers != modifiers {
        return false;
    }
    match (code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
        (a, b) => a == b,
    }
}
