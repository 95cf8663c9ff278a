//! Inline load prompt: the terminal's file chooser.
//!
//! Opened by Ctrl+O or the Load button. Confirming hands the path to the
//! file input and raises its change event, which starts the import.

use super::*;

impl App {
    /// Opens the prompt seeded with the export directory.
    pub(super) fn start_pick(&mut self) {
        self.pick_buf = format!("{}{}", self.export_dir.display(), std::path::MAIN_SEPARATOR);
        self.pick_cursor = self.pick_buf.len();
        self.picking = true;
    }

    /// Enter confirms, Esc cancels, printable chars edit the path.
    pub(super) fn handle_pick_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.picking = false;
                self.pick_buf.clear();
            }
            KeyCode::Enter => {
                self.confirm_pick();
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.pick_buf.remove(prev);
                    self.pick_cursor = prev;
                }
            }
            KeyCode::Delete => {
                if self.pick_cursor < self.pick_buf.len() {
                    self.pick_buf.remove(self.pick_cursor);
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.pick_cursor = prev;
                }
            }
            KeyCode::Right => {
                if let Some(ch) = self.pick_buf[self.pick_cursor..].chars().next() {
                    self.pick_cursor += ch.len_utf8();
                }
            }
            KeyCode::Home => {
                self.pick_cursor = 0;
            }
            KeyCode::End => {
                self.pick_cursor = self.pick_buf.len();
            }
            KeyCode::Char(ch) => {
                self.pick_buf.insert(self.pick_cursor, ch);
                self.pick_cursor += ch.len_utf8();
            }
            _ => {}
        }
    }

    pub(super) fn insert_pick_text(&mut self, text: &str) {
        for ch in text.chars().filter(|ch| *ch != '\n' && *ch != '\r') {
            self.pick_buf.insert(self.pick_cursor, ch);
            self.pick_cursor += ch.len_utf8();
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.pick_buf[..self.pick_cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn confirm_pick(&mut self) {
        self.picking = false;
        let path = self.pick_buf.trim().to_string();
        self.pick_buf.clear();
        if path.is_empty() {
            self.set_status("Load cancelled: empty path");
            return;
        }

        let path = PathBuf::from(path);
        self.set_status(&format!("Loading {}", path.display()));
        self.playground
            .surface_mut()
            .select_file(ElementId::FileInput, path);
        self.dispatch(UiEvent::change(ElementId::FileInput));
    }
}
