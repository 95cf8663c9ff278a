//! The assignment and validation-test text fields beside the editors.

use tui_textarea::TextArea;

/// Plain multi-line inputs; their text is part of every saved project.
pub struct TextFields {
    pub assignment: TextArea<'static>,
    pub test: TextArea<'static>,
}

impl Default for TextFields {
    fn default() -> Self {
        Self {
            assignment: TextArea::default(),
            test: TextArea::default(),
        }
    }
}

impl TextFields {
    pub fn assignment(&self) -> String {
        self.assignment.lines().join("\n")
    }

    pub fn test(&self) -> String {
        self.test.lines().join("\n")
    }

    pub fn set_assignment(&mut self, text: &str) {
        self.assignment = text_area(text);
    }

    pub fn set_test(&mut self, text: &str) {
        self.test = text_area(text);
    }
}

/// A fresh text area holding exactly `text`; `lines().join("\n")` gives it back.
pub(crate) fn text_area(text: &str) -> TextArea<'static> {
    TextArea::new(text.split('\n').map(String::from).collect())
}
