//! The playground controller: one owned instance per view, with an explicit
//! init/destroy lifecycle.

use std::io;
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub mod buffers;
pub mod commands;
pub mod fields;
pub mod listeners;
pub mod output;
pub mod persistence;
pub mod preview;
pub mod schedule;
pub mod tabs;

use crate::error::ProjectError;
use crate::project::Project;
use buffers::{BufferStore, EditorFactory, Pane};
use commands::Command;
use fields::TextFields;
use listeners::{ElementId, EventKind, Handler, ListenerScope, Surface, UiEvent};
use output::OutputLog;
use persistence::{PersistenceManager, RestoreSource, SaveOutcome};
use preview::{BrowserWindow, PreviewFrame, Sources};
use schedule::{FrameQueue, FrameTask, TimerTask, Timers};
use tabs::TabController;

/// Delay between attempts to wire the action elements.
pub const ACTION_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Attempts before action wiring gives up (5 s at the retry delay).
pub const ACTION_RETRY_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized,
    AlreadyInitialized,
    /// The editor widget library is not present yet; call `init` again later.
    LibraryUnavailable,
}

/// Something only the host view can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    /// Let the user choose a project file for the file input.
    PickFile,
}

/// A project file being read off the event loop.
struct PendingRead {
    path: PathBuf,
    generation: u64,
    handle: JoinHandle<io::Result<String>>,
}

pub struct Playground<F: EditorFactory> {
    library: F,
    buffers: BufferStore<F::Widget>,
    tabs: TabController,
    fields: TextFields,
    persistence: PersistenceManager,
    frame: Box<dyn PreviewFrame>,
    window: Box<dyn BrowserWindow>,
    surface: Surface,
    listeners: ListenerScope,
    frames: FrameQueue,
    timers: Timers,
    output: OutputLog,
    pending_reads: Vec<PendingRead>,
    /// Bumped on every init and destroy; stale file reads compare against it.
    generation: u64,
    initialized: bool,
    saves: u64,
}

impl<F: EditorFactory> Playground<F> {
    pub fn new(
        library: F,
        persistence: PersistenceManager,
        frame: Box<dyn PreviewFrame>,
        window: Box<dyn BrowserWindow>,
    ) -> Self {
        Self {
            library,
            buffers: BufferStore::new(),
            tabs: TabController::new(),
            fields: TextFields::default(),
            persistence,
            frame,
            window,
            surface: Surface::new(),
            listeners: ListenerScope::new(),
            frames: FrameQueue::default(),
            timers: Timers::default(),
            output: OutputLog::new(),
            pending_reads: Vec::new(),
            generation: 0,
            initialized: false,
            saves: 0,
        }
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Builds the editors, wires listeners and restores the last project.
    /// Does nothing if already live or if the widget library is missing.
    pub fn init(&mut self, now: Instant) -> InitOutcome {
        if self.initialized {
            return InitOutcome::AlreadyInitialized;
        }
        if !self.library.available() {
            tracing::debug!("editor library not available yet");
            return InitOutcome::LibraryUnavailable;
        }

        self.initialized = true;
        self.generation += 1;
        self.tabs = TabController::new();

        for pane in Pane::ALL {
            match self.buffers.create(&self.library, pane, pane.kind()) {
                Ok(editor) => commands::bind(editor),
                Err(e) => tracing::error!(error = %e, "could not create editor"),
            }
        }

        let on_tab: Handler = |event, _| event.pane.map(Command::SelectPane);
        self.listeners
            .subscribe(&mut self.surface, ElementId::TabStrip, EventKind::Click, on_tab);
        self.wire_actions(now, 0);

        let source = self.restore();
        tracing::info!(?source, generation = self.generation, "playground initialized");
        self.output.info("Ready - Web-only Editor");
        InitOutcome::Initialized
    }

    /// Removes every listener init installed and destroys the editors.
    /// Safe to call repeatedly; a later `init` starts from scratch.
    pub fn destroy(&mut self) {
        self.listeners.dispose_all(&mut self.surface);
        self.buffers.destroy_all();
        self.frames.clear();
        self.timers.clear();
        self.generation += 1;
        if self.initialized {
            tracing::info!("playground destroyed");
        }
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn wire_actions(&mut self, now: Instant, attempt: u32) {
        if !self.surface.contains(ElementId::RunButton) {
            if attempt >= ACTION_RETRY_LIMIT {
                self.output.error("Editor actions unavailable");
                return;
            }
            if attempt == 0 {
                self.output.warn("Editor view not ready, retrying actions");
            }
            tracing::debug!(attempt, "retrying action wiring");
            self.timers.schedule(
                now,
                ACTION_RETRY_DELAY,
                TimerTask::WireActions {
                    attempt: attempt + 1,
                },
            );
            return;
        }

        let actions: [(ElementId, EventKind, Handler); 7] = [
            (ElementId::RunButton, EventKind::Click, |_, _| Some(Command::Run)),
            (ElementId::RunTestsButton, EventKind::Click, |_, _| Some(Command::RunWithTests)),
            (ElementId::ClearOutputButton, EventKind::Click, |_, _| Some(Command::ClearOutput)),
            (ElementId::SaveButton, EventKind::Click, |_, _| Some(Command::Save)),
            (ElementId::OpenPreviewButton, EventKind::Click, |_, _| Some(Command::OpenPreview)),
            (ElementId::LoadButton, EventKind::Click, |_, _| Some(Command::PickFile)),
            (ElementId::FileInput, EventKind::Change, |_, surface| {
                surface
                    .selected_file(ElementId::FileInput)
                    .cloned()
                    .map(Command::ImportFile)
            }),
        ];
        for (target, kind, handler) in actions {
            self.listeners.subscribe(&mut self.surface, target, kind, handler);
        }
    }

    // ─── Event loop hooks ────────────────────────────────────────────────

    /// Runs the callbacks requested for the frame that was just drawn.
    pub fn run_frame(&mut self) {
        for task in self.frames.take() {
            match task {
                FrameTask::ResizeAndFocus(pane) => {
                    self.buffers.resize(pane);
                    self.buffers.focus(pane);
                }
            }
        }
    }

    /// Fires due timers and finishes completed file reads.
    pub fn tick(&mut self, now: Instant) {
        for task in self.timers.due(now) {
            match task {
                TimerTask::WireActions { attempt } => {
                    if self.initialized {
                        self.wire_actions(now, attempt);
                    }
                }
            }
        }
        self.poll_reads();
    }

    fn poll_reads(&mut self) {
        let (finished, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_reads)
            .into_iter()
            .partition(|read| read.handle.is_finished());
        self.pending_reads = pending;

        for read in finished {
            let result = read.handle.join();
            if !self.initialized || read.generation != self.generation {
                tracing::debug!(path = %read.path.display(), "discarding file read from a torn-down session");
                continue;
            }
            match result {
                Ok(Ok(content)) => {
                    if self.import_from_file(&content).is_ok() {
                        tracing::info!(path = %read.path.display(), "imported project");
                    }
                }
                Ok(Err(e)) => self
                    .output
                    .error(format!("Could not read {}: {}", read.path.display(), e)),
                Err(_) => self.output.error("Reading the project file failed"),
            }
        }
    }

    pub fn has_pending_reads(&self) -> bool {
        !self.pending_reads.is_empty()
    }

    /// Routes a view event through the installed listeners.
    pub fn dispatch(&mut self, event: &UiEvent) -> Vec<HostRequest> {
        let commands = self.surface.dispatch(event);
        commands
            .into_iter()
            .filter_map(|command| self.execute(command))
            .collect()
    }

    pub fn execute(&mut self, command: Command) -> Option<HostRequest> {
        if !self.initialized {
            tracing::debug!(?command, "ignoring command while not initialized");
            return None;
        }
        match command {
            Command::Run => self.run(false),
            Command::RunWithTests => self.run(true),
            Command::ClearOutput => self.output.clear(),
            Command::Save => {
                self.save();
            }
            Command::OpenPreview => self.open_preview(),
            Command::PickFile => return Some(HostRequest::PickFile),
            Command::ImportFile(path) => self.begin_import(path),
            Command::SelectPane(pane) => self.tabs.select(pane, &mut self.frames),
        }
        None
    }

    // ─── Preview ─────────────────────────────────────────────────────────

    pub fn build_document(&self, include_tests: bool) -> String {
        let html = self.buffers.get(Pane::Html);
        let css = self.buffers.get(Pane::Css);
        let js = self.buffers.get(Pane::Js);
        let sources = Sources {
            html: &html,
            css: &css,
            js: &js,
        };
        preview::build_document(&sources, &self.fields.test(), include_tests)
    }

    /// Loads a fresh document into the sandboxed frame.
    pub fn run(&mut self, include_tests: bool) {
        let document = self.build_document(include_tests);
        if let Err(e) = self.frame.set_document(&document) {
            self.output.error(format!("Could not update preview: {e}"));
            return;
        }
        self.output.info(if include_tests {
            "Run with tests."
        } else {
            "Preview updated."
        });
    }

    /// Writes the document into a new top-level browser window.
    pub fn open_preview(&mut self) {
        let document = self.build_document(false);
        if let Err(e) = self.window.open_document(&document) {
            self.output.error(format!("Could not open preview: {e}"));
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Project {
        PersistenceManager::snapshot(&self.buffers, &self.fields)
    }

    pub fn save(&mut self) -> SaveOutcome {
        let outcome = self
            .persistence
            .save(&self.buffers, &self.fields, &mut self.output);
        if outcome.is_saved() {
            self.saves += 1;
        }
        outcome
    }

    /// Saves that wrote the project somewhere, over this controller's life.
    pub fn save_count(&self) -> u64 {
        self.saves
    }

    pub fn restore(&mut self) -> RestoreSource {
        self.persistence
            .restore(&mut self.buffers, &mut self.fields, &mut self.output)
    }

    pub fn import_from_file(&mut self, content: &str) -> Result<Project, ProjectError> {
        PersistenceManager::import_from_file(content, &mut self.buffers, &mut self.fields, &mut self.output)
    }

    /// Reads `path` on a worker thread; `tick` applies it when done.
    pub fn begin_import(&mut self, path: PathBuf) {
        let worker_path = path.clone();
        let handle = std::thread::spawn(move || std::fs::read_to_string(worker_path));
        self.pending_reads.push(PendingRead {
            path,
            generation: self.generation,
            handle,
        });
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn buffers(&self) -> &BufferStore<F::Widget> {
        &self.buffers
    }

    pub fn buffers_mut(&mut self) -> &mut BufferStore<F::Widget> {
        &mut self.buffers
    }

    /// The editor of the visible pane.
    pub fn active_editor_mut(&mut self) -> Option<&mut F::Widget> {
        let pane = self.tabs.current();
        self.buffers.handle_mut(pane)
    }

    pub fn tabs(&self) -> &TabController {
        &self.tabs
    }

    pub fn fields(&self) -> &TextFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut TextFields {
        &mut self.fields
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputLog {
        &mut self.output
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn frame(&self) -> &dyn PreviewFrame {
        self.frame.as_ref()
    }

    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }
}
