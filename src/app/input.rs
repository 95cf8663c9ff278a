//! Input handling: keyboard events, mouse events, and paste.

use super::*;

impl App {
    /// Handles bracketed paste events. Goes to the load prompt when it is
    /// open, otherwise into whatever has focus.
    pub(super) fn handle_paste(&mut self, text: String) {
        if self.picking {
            self.insert_pick_text(&text);
            return;
        }
        match self.focus {
            Focus::Editor => {
                if let Some(editor) = self.playground.active_editor_mut() {
                    editor.insert_str(&text);
                    self.modified = true;
                }
            }
            Focus::Assignment => {
                self.playground.fields_mut().assignment.insert_str(text);
                self.modified = true;
            }
            Focus::Tests => {
                self.playground.fields_mut().test.insert_str(text);
                self.modified = true;
            }
        }
    }

    // ─── Key handling ────────────────────────────────────────────────────

    /// Main key handler. Processes modal states first, then Esc-as-back,
    /// then global keybindings, then delegates to the focused input.
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        // Help modal: any key dismisses it (swallows the keypress)
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Load prompt: all keys go to the inline path input
        if self.picking {
            self.handle_pick_key(key);
            return;
        }

        // Esc: back to the editor
        if key.code == KeyCode::Esc && key.modifiers.is_empty() {
            self.focus = Focus::Editor;
            return;
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.quit();
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('o')) => {
                self.run_command(Command::PickFile);
                return;
            }
            (KeyModifiers::ALT, KeyCode::Char('a')) => {
                self.focus = Focus::Assignment;
                return;
            }
            (KeyModifiers::ALT, KeyCode::Char('t')) => {
                self.focus = Focus::Tests;
                return;
            }
            (KeyModifiers::ALT, KeyCode::Up) => {
                self.preview.scroll_up(1);
                return;
            }
            (KeyModifiers::ALT, KeyCode::Down) => {
                self.preview.scroll_down(1);
                return;
            }
            (KeyModifiers::ALT, KeyCode::PageUp) => {
                self.preview.page_up();
                return;
            }
            (KeyModifiers::ALT, KeyCode::PageDown) => {
                self.preview.page_down();
                return;
            }
            (_, KeyCode::F(1)) => {
                self.show_help = true;
                return;
            }
            (_, KeyCode::F(n @ 2..=4)) => {
                let pane = Pane::ALL[usize::from(n - 2)];
                self.focus = Focus::Editor;
                self.run_command(Command::SelectPane(pane));
                return;
            }
            (_, KeyCode::F(5)) => {
                self.run_command(Command::Run);
                return;
            }
            (_, KeyCode::F(6)) => {
                self.run_command(Command::RunWithTests);
                return;
            }
            (_, KeyCode::F(7)) => {
                self.run_command(Command::OpenPreview);
                return;
            }
            (_, KeyCode::F(8)) => {
                self.run_command(Command::ClearOutput);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::Assignment => {
                if self.playground.fields_mut().assignment.input(Input::from(key)) {
                    self.modified = true;
                }
            }
            Focus::Tests => {
                if self.playground.fields_mut().test.input(Input::from(key)) {
                    self.modified = true;
                }
            }
        }
    }

    /// Sends the key to the visible editor. Bound chords come back as
    /// commands; everything else edits the text.
    fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.playground.active_editor_mut() else {
            return;
        };
        let before = editor.value();
        match editor.input(key) {
            Some(command) => self.run_command(command),
            None => {
                if editor.value() != before {
                    self.modified = true;
                }
            }
        }
    }

    // ─── Mouse handling ──────────────────────────────────────────────────

    /// Clicks hit-test the regions drawn last frame; the wheel scrolls the
    /// panel under the pointer.
    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_at(position, -(SCROLL_LINES as i16)),
            MouseEventKind::ScrollDown => self.scroll_at(position, SCROLL_LINES as i16),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.show_help {
                    self.show_help = false;
                    return;
                }
                if self.picking {
                    return;
                }
                let hit = self
                    .hit_regions
                    .iter()
                    .rev()
                    .find(|region| region.contains(mouse.column, mouse.row))
                    .copied();
                if let Some(region) = hit {
                    let event = match region.element {
                        ElementId::TabStrip => {
                            self.focus = Focus::Editor;
                            UiEvent::tab_click(region.pane)
                        }
                        element => UiEvent::click(element),
                    };
                    self.dispatch(event);
                    return;
                }

                if self.panels.editor.contains(position) {
                    self.focus = Focus::Editor;
                } else if self.panels.assignment.contains(position) {
                    self.focus = Focus::Assignment;
                } else if self.panels.tests.contains(position) {
                    self.focus = Focus::Tests;
                }
            }
            _ => {}
        }
    }

    fn scroll_at(&mut self, position: Position, rows: i16) {
        if self.panels.preview.contains(position) {
            if rows < 0 {
                self.preview.scroll_up(rows.unsigned_abs());
            } else {
                self.preview.scroll_down(rows as u16);
            }
        } else if self.panels.editor.contains(position) {
            if let Some(editor) = self.playground.active_editor_mut() {
                editor.scroll(rows);
            }
        } else if self.panels.assignment.contains(position) {
            self.playground.fields_mut().assignment.scroll((rows, 0));
        } else if self.panels.tests.contains(position) {
            self.playground.fields_mut().test.scroll((rows, 0));
        }
    }
}
