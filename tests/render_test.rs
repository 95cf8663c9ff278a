use codify::app::App;
use codify::config::Paths;
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
use tempfile::TempDir;

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Creates an App whose files all live in a fresh temp dir.
fn new_app() -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let app = App::new(&Paths::for_testing(dir.path()));
    (app, dir)
}

/// Draws frames through the main-loop path (draw, frame callbacks, tick)
/// and returns the last buffer. The first frame starts the playground.
fn render_frames(app: &mut App, width: u16, height: u16, frames: usize) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    for _ in 0..frames {
        app.render_frame(&mut terminal).unwrap();
    }
    terminal.backend().buffer().clone()
}

/// A started app drawn twice at 140x40.
fn live_buffer(app: &mut App) -> Buffer {
    render_frames(app, 140, 40, 2)
}

/// Extracts the text content of a single row from the buffer (stripping trailing spaces).
fn buffer_line_text(buf: &Buffer, row: u16) -> String {
    let width = buf.area.width;
    let mut text = String::new();
    for col in 0..width {
        if let Some(cell) = buf.cell((col, row)) {
            text.push_str(cell.symbol());
        }
    }
    text.trim_end().to_string()
}

/// Searches the entire buffer for a substring and returns true if found.
fn buffer_contains(buf: &Buffer, needle: &str) -> bool {
    (0..buf.area.height).any(|row| buffer_line_text(buf, row).contains(needle))
}

/// Column of the first occurrence of `needle` on `row`.
fn column_of(buf: &Buffer, row: u16, needle: &str) -> Option<u16> {
    let mut cells = Vec::new();
    for col in 0..buf.area.width {
        cells.push(buf.cell((col, row)).unwrap().symbol().to_string());
    }
    let line: String = cells.concat();
    let byte = line.find(needle)?;
    // Map the byte offset back to a cell index
    let mut seen = 0;
    for (col, symbol) in cells.iter().enumerate() {
        if seen == byte {
            return Some(col as u16);
        }
        seen += symbol.len();
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════
// A. Header
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn header_shows_title_tabs_and_buttons() {
    let (mut app, _dir) = new_app();
    let buf = live_buffer(&mut app);
    let header = buffer_line_text(&buf, 0);
    assert!(header.contains("Codify"), "header: {header}");
    for label in ["HTML", "CSS", "JavaScript", "Run", "Open preview", "Save", "Load"] {
        assert!(header.contains(label), "missing {label} in {header}");
    }
}

#[test]
fn active_tab_is_highlighted() {
    let (mut app, _dir) = new_app();
    let buf = live_buffer(&mut app);
    let html = column_of(&buf, 0, " HTML ").unwrap();
    let css = column_of(&buf, 0, " CSS ").unwrap();
    assert_eq!(buf.cell((html + 1, 0)).unwrap().bg, codify::theme::ACTIVE_TAB);
    assert_ne!(buf.cell((css + 1, 0)).unwrap().bg, codify::theme::ACTIVE_TAB);
}

// ═══════════════════════════════════════════════════════════════════════
// B. Panels
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn editor_shows_sample_markup_on_first_start() {
    let (mut app, _dir) = new_app();
    let buf = live_buffer(&mut app);
    assert!(buffer_contains(&buf, "HTML · mode: html"));
    assert!(buffer_contains(&buf, "Welcome to Codify"));
}

#[test]
fn editor_panel_waits_until_started() {
    let (mut app, _dir) = new_app();
    let backend = TestBackend::new(140, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    assert!(buffer_contains(terminal.backend().buffer(), "Starting editors..."));
}

#[test]
fn side_fields_and_output_panel_are_drawn() {
    let (mut app, _dir) = new_app();
    let buf = live_buffer(&mut app);
    assert!(buffer_contains(&buf, "Task / Assignment"));
    assert!(buffer_contains(&buf, "Validation tests"));
    assert!(buffer_contains(&buf, "Output"));
    assert!(buffer_contains(&buf, "Run with tests"));
    assert!(buffer_contains(&buf, "Clear log"));
    assert!(buffer_contains(&buf, "Ready - Web-only Editor"));
}

#[test]
fn preview_pane_names_the_sandbox_policy() {
    let (mut app, _dir) = new_app();
    let buf = live_buffer(&mut app);
    assert!(buffer_contains(&buf, "sandbox: allow-scripts allow-modals"));
    assert!(!buffer_contains(&buf, "allow-same-origin"));
    assert!(buffer_contains(&buf, "Press F5 or Run"));
}

#[test]
fn preview_pane_shows_document_after_run() {
    let (mut app, _dir) = new_app();
    live_buffer(&mut app);
    app.playground.run(false);
    let buf = render_frames(&mut app, 140, 40, 1);
    assert!(buffer_contains(&buf, "<!doctype html>"));
}

#[test]
fn error_lines_are_red() {
    let (mut app, _dir) = new_app();
    live_buffer(&mut app);
    app.playground.output_mut().error("Invalid project file");
    let buf = render_frames(&mut app, 140, 40, 1);
    let row = (0..buf.area.height)
        .find(|row| buffer_line_text(&buf, *row).contains("Invalid project file"))
        .unwrap();
    let col = column_of(&buf, row, "Invalid").unwrap();
    assert_eq!(buf.cell((col, row)).unwrap().fg, Color::Red);
}

#[test]
fn newest_output_line_stays_visible_when_lines_wrap() {
    let (mut app, _dir) = new_app();
    live_buffer(&mut app);
    for n in 0..30 {
        app.playground.output_mut().error(format!(
            "Could not read /home/learner/projects/lesson-{n}/project.json: No such file or directory"
        ));
    }
    app.playground.output_mut().info("LATEST-LINE");
    let buf = render_frames(&mut app, 140, 40, 1);
    assert!(buffer_contains(&buf, "LATEST-LINE"));
}

// ═══════════════════════════════════════════════════════════════════════
// C. Status bar & overlays
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn status_bar_shows_cursor_pane_and_save_state() {
    let (mut app, _dir) = new_app();
    let buf = live_buffer(&mut app);
    let status = buffer_line_text(&buf, 39);
    assert!(status.contains("Ln 1, Col 0"), "status: {status}");
    assert!(status.contains("HTML | Saved"), "status: {status}");

    app.modified = true;
    let buf = render_frames(&mut app, 140, 40, 1);
    assert!(buffer_line_text(&buf, 39).contains("Unsaved"));
}

#[test]
fn help_modal_lists_keybindings() {
    let (mut app, _dir) = new_app();
    live_buffer(&mut app);
    app.show_help = true;
    let buf = render_frames(&mut app, 140, 40, 1);
    assert!(buffer_contains(&buf, "Keybindings"));
    assert!(buffer_contains(&buf, "Run with tests"));
    assert!(buffer_contains(&buf, "Load project file"));
}

#[test]
fn load_prompt_replaces_the_divider() {
    let (mut app, _dir) = new_app();
    live_buffer(&mut app);
    app.picking = true;
    app.pick_buf = "/tmp/lesson.json".to_string();
    app.pick_cursor = app.pick_buf.len();
    let buf = render_frames(&mut app, 140, 40, 1);
    assert!(buffer_line_text(&buf, 1).contains("Load project: /tmp/lesson.json"));
}

#[test]
fn narrow_terminal_does_not_panic() {
    let (mut app, _dir) = new_app();
    render_frames(&mut app, 30, 8, 3);
    assert!(app.playground.is_initialized());
}

// ═══════════════════════════════════════════════════════════════════════
// D. Flicker Regression
// ═══════════════════════════════════════════════════════════════════════

/// Backend wrapper that counts how many cells are written per draw() call.
struct TrackingBackend {
    inner: TestBackend,
    last_draw_count: usize,
}

impl TrackingBackend {
    fn new(width: u16, height: u16) -> Self {
        Self {
            inner: TestBackend::new(width, height),
            last_draw_count: 0,
        }
    }
}

impl ratatui::backend::Backend for TrackingBackend {
    fn draw<'a, I>(&mut self, content: I) -> std::io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a ratatui::buffer::Cell)>,
    {
        let cells: Vec<_> = content.collect();
        self.last_draw_count = cells.len();
        self.inner.draw(cells.into_iter())
    }

    fn hide_cursor(&mut self) -> std::io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> std::io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> std::io::Result<ratatui::layout::Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<ratatui::layout::Position>>(
        &mut self,
        position: P,
    ) -> std::io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> std::io::Result<()> {
        self.inner.clear()
    }

    fn size(&self) -> std::io::Result<ratatui::layout::Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> std::io::Result<ratatui::backend::WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[test]
fn render_frame_idle_writes_zero_cells() {
    // ratatui diffs each frame against the previous one. Once the
    // playground has started, an idle frame must write nothing; a resize
    // or clear inside render_frame() would rewrite every cell.
    let (mut app, _dir) = new_app();
    let mut terminal = Terminal::new(TrackingBackend::new(100, 30)).unwrap();

    // Frame 1 draws the shell, then starts the playground; frame 2 shows it.
    app.render_frame(&mut terminal).unwrap();
    app.render_frame(&mut terminal).unwrap();
    assert!(terminal.backend().last_draw_count > 0);

    app.render_frame(&mut terminal).unwrap();
    assert_eq!(
        terminal.backend().last_draw_count,
        0,
        "Idle frame wrote {} cells instead of 0",
        terminal.backend().last_draw_count
    );
}
