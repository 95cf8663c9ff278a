use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::Input;

use crate::components::preview::PreviewState;
use crate::components::sidebar::FieldFocus;
use crate::components::{header, output, preview, sidebar, status, HitRegion};
use crate::config::Paths;
use crate::host::frame::{SandboxedFrameFile, SystemBrowser};
use crate::host::store::{DirectoryDownloads, FileStore};
use crate::host::textarea::TextAreaFactory;
use crate::playground::buffers::{EditorWidget, Pane};
use crate::playground::commands::Command;
use crate::playground::listeners::{ElementId, UiEvent};
use crate::playground::persistence::PersistenceManager;
use crate::playground::{HostRequest, InitOutcome, Playground};
use crate::theme;

/// How long status bar messages stay visible before auto-clearing.
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Lines to scroll per mouse wheel tick.
const SCROLL_LINES: u16 = 3;

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Assignment,
    Tests,
}

impl Focus {
    fn field(self) -> Option<FieldFocus> {
        match self {
            Focus::Editor => None,
            Focus::Assignment => Some(FieldFocus::Assignment),
            Focus::Tests => Some(FieldFocus::Test),
        }
    }
}

/// Panel rectangles from the last render, for mouse hit-testing.
#[derive(Debug, Default, Clone, Copy)]
struct PanelAreas {
    editor: Rect,
    assignment: Rect,
    tests: Rect,
    preview: Rect,
}

pub struct App {
    // --- Core state ---
    pub playground: Playground<TextAreaFactory>,
    pub focus: Focus,
    /// Edits since the last save.
    pub modified: bool,
    pub should_quit: bool,

    // --- Preview pane ---
    pub preview: PreviewState,

    // --- Status bar ---
    pub status_message: String,
    pub status_time: Option<Instant>,

    // --- Load prompt (Ctrl+O or the Load button) ---
    pub picking: bool,
    pub pick_buf: String,
    pub pick_cursor: usize,

    // --- Help modal (F1) ---
    pub show_help: bool,

    // --- Internal tracking ---
    /// Clickable elements from the last render.
    hit_regions: Vec<HitRegion>,
    panels: PanelAreas,
    /// Seeds the load prompt.
    export_dir: PathBuf,
    /// Successful saves already reflected in `modified`.
    saves_seen: u64,
    /// Imported once the playground is live.
    startup_import: Option<PathBuf>,
}

impl App {
    pub fn new(paths: &Paths) -> Self {
        let persistence = PersistenceManager::new(
            Box::new(FileStore::new(paths.store_dir())),
            Box::new(DirectoryDownloads::new(paths.export_dir.clone())),
        );
        let window = if paths.launch_browser {
            SystemBrowser::new(paths.full_preview_page())
        } else {
            SystemBrowser::headless(paths.full_preview_page())
        };
        let playground = Playground::new(
            TextAreaFactory,
            persistence,
            Box::new(SandboxedFrameFile::new(paths.frame_page())),
            Box::new(window),
        );

        Self {
            playground,
            focus: Focus::Editor,
            modified: false,
            should_quit: false,
            preview: PreviewState::new(),
            status_message: "F1: help | F5: run | Ctrl+S: save | Ctrl+Q: quit".to_string(),
            status_time: Some(Instant::now()),
            picking: false,
            pick_buf: String::new(),
            pick_cursor: 0,
            show_help: false,
            hit_regions: Vec::new(),
            panels: PanelAreas::default(),
            export_dir: paths.export_dir.clone(),
            saves_seen: 0,
            startup_import: None,
        }
    }

    /// Imports `path` as soon as the playground has started.
    pub fn import_on_start(&mut self, path: PathBuf) {
        self.startup_import = Some(path);
    }

    // ─── Tick / timers ───────────────────────────────────────────────────

    /// Called from the main loop after each draw.
    pub fn tick(&mut self) {
        let now = Instant::now();

        // The first draw attaches the view elements; start once they exist.
        if !self.playground.is_initialized() && !self.should_quit {
            if self.playground.init(now) == InitOutcome::Initialized {
                self.modified = false;
                if let Some(path) = self.startup_import.take() {
                    self.run_command(Command::ImportFile(path));
                }
            }
        }

        let logged = self.playground.output().lines().len();
        self.playground.tick(now);
        self.after_commands(logged, Vec::new());

        // Auto-clear status messages after STATUS_DURATION
        if let Some(time) = self.status_time {
            if time.elapsed() >= STATUS_DURATION {
                self.status_message.clear();
                self.status_time = None;
            }
        }
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Top-level event handler. Dispatches to key, mouse, or paste handlers.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Bracketed paste (enabled via EnableBracketedPaste in main.rs)
            Event::Paste(text) => self.handle_paste(text),
            _ => {}
        }
    }

    /// Runs a command and mirrors whatever it logged into the status bar.
    pub(super) fn run_command(&mut self, command: Command) {
        let logged = self.playground.output().lines().len();
        let request = self.playground.execute(command);
        self.after_commands(logged, request.into_iter().collect());
    }

    /// Routes a view event through the playground's listeners.
    pub(super) fn dispatch(&mut self, event: UiEvent) {
        let logged = self.playground.output().lines().len();
        let requests = self.playground.dispatch(&event);
        self.after_commands(logged, requests);
    }

    fn after_commands(&mut self, logged: usize, requests: Vec<HostRequest>) {
        let fresh: Vec<String> = self
            .playground
            .output()
            .lines()
            .get(logged..)
            .unwrap_or_default()
            .iter()
            .map(|line| line.text.clone())
            .collect();
        let saves = self.playground.save_count();
        if saves != self.saves_seen {
            self.saves_seen = saves;
            self.modified = false;
        }
        if let Some(text) = fresh.last() {
            self.set_status(text);
        }
        for request in requests {
            match request {
                HostRequest::PickFile => self.start_pick(),
            }
        }
    }

    /// Destroys the playground and stops the main loop.
    pub fn quit(&mut self) {
        self.playground.destroy();
        self.should_quit = true;
    }

    /// Shows a temporary message in the status bar.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = msg.to_string();
        self.status_time = Some(Instant::now());
    }

    /// (line, col) for the status bar, one-based line.
    fn cursor_position(&self) -> (usize, usize) {
        let (row, col) = match self.focus {
            Focus::Editor => self
                .playground
                .buffers()
                .handle(self.playground.tabs().current())
                .map(|editor| editor.cursor())
                .unwrap_or((0, 0)),
            Focus::Assignment => self.playground.fields().assignment.cursor(),
            Focus::Tests => self.playground.fields().test.cursor(),
        };
        (row + 1, col)
    }

    pub fn editor_text(&self, pane: Pane) -> String {
        self.playground
            .buffers()
            .handle(pane)
            .map(|editor| editor.value())
            .unwrap_or_default()
    }
}

mod input;
mod prompt;
mod render;
