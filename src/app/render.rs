//! UI rendering: main frame layout, editor panel, help modal, and the
//! element table the playground listens on.

use super::*;

/// Maximum width for the UI content area. Wider terminals get centered, capped layout.
const MAX_WIDTH: u16 = 200;

impl App {
    /// Runs one frame of the main loop: draw, the frame's callbacks, then tick.
    pub fn render_frame<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> std::io::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        self.playground.run_frame();
        self.tick();
        Ok(())
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let full = frame.area();

        let bg = Paragraph::new("").style(theme::editor_style());
        frame.render_widget(bg, full);

        // Cap width and center horizontally
        let capped_width = full.width.min(MAX_WIDTH);
        let x_offset = (full.width - capped_width) / 2;
        let usable_area = Rect::new(x_offset, full.y, capped_width, full.height);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Divider / load prompt
            Constraint::Min(1),    // Panels
            Constraint::Length(1), // Status
        ])
        .split(usable_area);

        let mut regions = header::render(frame, chunks[0], self.playground.tabs());

        if self.picking {
            self.render_pick_prompt(frame, chunks[1]);
        } else {
            let divider = Paragraph::new("\u{2500}".repeat(chunks[1].width as usize))
                .style(Style::default().fg(theme::BORDER));
            frame.render_widget(divider, chunks[1]);
        }

        let columns = Layout::horizontal([
            Constraint::Percentage(22), // Assignment + tests
            Constraint::Fill(1),        // Editor + preview
            Constraint::Percentage(26), // Output
        ])
        .split(chunks[2]);

        let side = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);
        sidebar::render(
            frame,
            columns[0],
            self.playground.fields_mut(),
            self.focus.field(),
        );

        let centre = Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);
        self.render_editor(frame, centre[0]);
        preview::render(
            frame,
            centre[1],
            self.playground.frame().document(),
            self.playground.frame().policy(),
            &mut self.preview,
        );

        regions.extend(output::render(
            frame,
            columns[2],
            self.playground.output().lines(),
        ));

        self.panels = PanelAreas {
            editor: centre[0],
            assignment: side[0],
            tests: side[1],
            preview: centre[1],
        };

        let (line, col) = self.cursor_position();
        status::render(
            frame,
            chunks[3],
            status::StatusInfo {
                line,
                col,
                message: &self.status_message,
                pane_label: self.playground.tabs().current().label(),
                saved: !self.modified,
            },
        );

        self.publish_elements(regions);

        // Help modal overlay, rendered last so it sits on top of everything
        if self.show_help {
            self.render_help(frame);
        }
    }

    /// Records the drawn elements and mirrors them onto the playground's
    /// surface. The file input is the load prompt, which is always available.
    fn publish_elements(&mut self, regions: Vec<HitRegion>) {
        let surface = self.playground.surface_mut();
        for element in ElementId::ALL {
            let drawn = element == ElementId::FileInput
                || regions.iter().any(|region| region.element == element);
            if drawn {
                surface.attach(element);
            } else {
                surface.detach(element);
            }
        }
        self.hit_regions = regions;
    }

    /// The visible editor pane inside a titled border.
    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let pane = self.playground.tabs().current();
        let focused = self.focus == Focus::Editor;

        // The cursor shows only while keys go to the editor.
        if let Some(editor) = self.playground.buffers_mut().handle_mut(pane) {
            if !focused && editor.is_focused() {
                editor.blur();
            } else if focused && !editor.is_focused() {
                editor.focus();
            }
        }

        let kind = self
            .playground
            .buffers()
            .handle(pane)
            .map_or(pane.kind(), |editor| editor.kind());
        let title = format!(" {} · mode: {} ", pane.label(), kind.mode_hint());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::panel_border_style(focused))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.playground.buffers().handle(pane) {
            Some(editor) => frame.render_widget(editor.textarea(), inner),
            None => {
                let waiting = Paragraph::new("Starting editors...")
                    .style(Style::default().fg(theme::LINE_NUMBER));
                frame.render_widget(waiting, inner);
            }
        }
    }

    /// "Load project:" input line with a block cursor.
    fn render_pick_prompt(&self, frame: &mut Frame, area: Rect) {
        let (before, after) = self.pick_buf.split_at(self.pick_cursor);
        let mut rest = after.chars();
        let under = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let line = Line::from(vec![
            Span::styled(" Load project: ", theme::title_style()),
            Span::raw(before.to_string()),
            Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(rest.as_str().to_string()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Renders a centered modal overlay listing all keybindings.
    /// Dismissed by pressing any key.
    fn render_help(&self, frame: &mut Frame) {
        let area = frame.area();
        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 24u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let help_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, help_area);

        // Must match the handlers in input.rs
        let bindings: [(&str, &str); 17] = [
            ("F2 / F3 / F4", "HTML / CSS / JavaScript"),
            ("Ctrl+Enter, F5", "Run"),
            ("F6", "Run with tests"),
            ("F7", "Open preview in browser"),
            ("F8", "Clear output"),
            ("Ctrl+S", "Save (in an editor)"),
            ("Ctrl+O", "Load project file"),
            ("Alt+A", "Edit assignment"),
            ("Alt+T", "Edit validation tests"),
            ("Esc", "Back to editor"),
            ("Alt+Up / Alt+Down", "Scroll preview"),
            ("Alt+PgUp / PgDn", "Page preview"),
            ("F1", "This help"),
            ("Ctrl+Q", "Quit"),
            ("Click tabs", "Switch pane"),
            ("Click buttons", "Run / Save / Load ..."),
            ("Mouse wheel", "Scroll panel"),
        ];
        let mut help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default()
                    .fg(theme::TITLE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (keys, action) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<20}", keys), Style::default().fg(theme::ACTIVE_TAB)),
                Span::raw(action),
            ]));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().fg(theme::FG).bg(theme::BAR_BG));

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, help_area);
    }
}
