//! The three source buffers and the editor widget capability they sit on.

use crate::error::BufferError;
use crate::playground::commands::KeyCommand;

/// One of the three source panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pane {
    Html,
    Css,
    Js,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Html, Pane::Css, Pane::Js];

    /// Element id of the pane's editor host.
    pub fn editor_id(self) -> &'static str {
        match self {
            Pane::Html => "ed_html",
            Pane::Css => "ed_css",
            Pane::Js => "ed_js",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pane::Html => "HTML",
            Pane::Css => "CSS",
            Pane::Js => "JavaScript",
        }
    }

    /// The only content kind this pane may be created with.
    pub fn kind(self) -> ContentKind {
        match self {
            Pane::Html => ContentKind::Markup,
            Pane::Css => ContentKind::Style,
            Pane::Js => ContentKind::Script,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Pane::Html => 0,
            Pane::Css => 1,
            Pane::Js => 2,
        }
    }
}

/// Recognized content kinds an editor can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Markup,
    Style,
    Script,
}

impl ContentKind {
    /// Mode hint handed to the editor widget.
    pub fn mode_hint(self) -> &'static str {
        match self {
            ContentKind::Markup => "html",
            ContentKind::Style => "css",
            ContentKind::Script => "javascript",
        }
    }
}

/// Fixed editing options every buffer is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub tab_size: u8,
    pub soft_tabs: bool,
    pub wrap: bool,
    pub print_margin: bool,
}

pub const EDITOR_OPTIONS: EditorOptions = EditorOptions {
    tab_size: 2,
    soft_tabs: true,
    wrap: true,
    print_margin: false,
};

/// Where the cursor lands after a programmatic `set_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPlacement {
    Start,
    End,
}

/// The capability set of an external text-editing widget.
pub trait EditorWidget {
    fn value(&self) -> String;
    fn set_value(&mut self, text: &str, cursor: CursorPlacement);
    /// Recomputes internal geometry. `force` skips any size-unchanged shortcut.
    fn resize(&mut self, force: bool);
    fn focus(&mut self);
    fn destroy(&mut self);
    /// Registers a named key command on the widget's own key handling.
    fn add_command(&mut self, command: KeyCommand);
    fn commands(&self) -> &[KeyCommand];
}

/// Creates editor widgets, if the widget library is present in the host.
pub trait EditorFactory {
    type Widget: EditorWidget;

    /// Presence check for the widget library.
    fn available(&self) -> bool;

    fn create(&self, id: &str, kind: ContentKind, options: &EditorOptions) -> Self::Widget;
}

/// Owns one editor handle per pane.
pub struct BufferStore<W> {
    handles: [Option<W>; 3],
}

impl<W> Default for BufferStore<W> {
    fn default() -> Self {
        Self {
            handles: std::array::from_fn(|_| None),
        }
    }
}

impl<W: EditorWidget> BufferStore<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the editor for `pane`. `kind` must be the pane's own content kind.
    pub fn create<F>(&mut self, factory: &F, pane: Pane, kind: ContentKind) -> Result<&mut W, BufferError>
    where
        F: EditorFactory<Widget = W>,
    {
        if kind != pane.kind() {
            return Err(BufferError::ModeMismatch {
                pane,
                expected: pane.kind(),
                requested: kind,
            });
        }
        let slot = &mut self.handles[pane.index()];
        if slot.is_some() {
            return Err(BufferError::AlreadyCreated(pane));
        }
        Ok(slot.insert(factory.create(pane.editor_id(), kind, &EDITOR_OPTIONS)))
    }

    /// Current text of `pane`, or "" when it has no editor.
    pub fn get(&self, pane: Pane) -> String {
        self.handle(pane).map(W::value).unwrap_or_default()
    }

    /// Replaces the text of `pane` and moves the cursor to the start.
    pub fn set(&mut self, pane: Pane, text: &str) {
        if let Some(handle) = self.handle_mut(pane) {
            handle.set_value(text, CursorPlacement::Start);
        }
    }

    pub fn resize(&mut self, pane: Pane) {
        if let Some(handle) = self.handle_mut(pane) {
            handle.resize(true);
        }
    }

    pub fn focus(&mut self, pane: Pane) {
        if let Some(handle) = self.handle_mut(pane) {
            handle.focus();
        }
    }

    pub fn handle(&self, pane: Pane) -> Option<&W> {
        self.handles[pane.index()].as_ref()
    }

    pub fn handle_mut(&mut self, pane: Pane) -> Option<&mut W> {
        self.handles[pane.index()].as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.iter().all(Option::is_none)
    }

    /// Destroys every live editor and empties all slots. No-op when empty.
    pub fn destroy_all(&mut self) {
        for slot in &mut self.handles {
            if let Some(mut handle) = slot.take() {
                handle.destroy();
            }
        }
    }
}
