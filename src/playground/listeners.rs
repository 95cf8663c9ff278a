//! The host element table, its event listeners, and the scope that owns them.
//!
//! `Surface` is what the view hands the controller: which elements are
//! currently attached and which listeners are installed on them. Listeners
//! are plain functions from an event to an optional [`Command`], so
//! dispatching never needs to borrow the controller.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use crate::playground::buffers::Pane;
use crate::playground::commands::Command;

/// Elements of the playground view the controller listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    /// The strip holding the three pane selectors.
    TabStrip,
    RunButton,
    RunTestsButton,
    ClearOutputButton,
    SaveButton,
    OpenPreviewButton,
    LoadButton,
    /// The file chooser the load button opens.
    FileInput,
}

impl ElementId {
    pub const ALL: [ElementId; 8] = [
        ElementId::TabStrip,
        ElementId::RunButton,
        ElementId::RunTestsButton,
        ElementId::ClearOutputButton,
        ElementId::SaveButton,
        ElementId::OpenPreviewButton,
        ElementId::LoadButton,
        ElementId::FileInput,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
}

/// An event raised by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub target: ElementId,
    pub kind: EventKind,
    /// Pane selector under the pointer, for clicks on the tab strip.
    pub pane: Option<Pane>,
}

impl UiEvent {
    pub fn click(target: ElementId) -> Self {
        Self {
            target,
            kind: EventKind::Click,
            pane: None,
        }
    }

    pub fn tab_click(pane: Option<Pane>) -> Self {
        Self {
            target: ElementId::TabStrip,
            kind: EventKind::Click,
            pane,
        }
    }

    pub fn change(target: ElementId) -> Self {
        Self {
            target,
            kind: EventKind::Change,
            pane: None,
        }
    }
}

pub type Handler = fn(&UiEvent, &Surface) -> Option<Command>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Listener {
    target: ElementId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
pub struct Surface {
    attached: BTreeSet<ElementId>,
    listeners: BTreeMap<ListenerId, Listener>,
    selected_files: HashMap<ElementId, PathBuf>,
    next_id: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, element: ElementId) {
        self.attached.insert(element);
    }

    pub fn detach(&mut self, element: ElementId) {
        self.attached.remove(&element);
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.attached.contains(&element)
    }

    /// Sets the file a file-chooser element currently holds.
    pub fn select_file(&mut self, element: ElementId, path: PathBuf) {
        self.selected_files.insert(element, path);
    }

    pub fn selected_file(&self, element: ElementId) -> Option<&PathBuf> {
        self.selected_files.get(&element)
    }

    pub fn add_listener(&mut self, target: ElementId, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Listener { target, kind, handler });
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Runs every listener installed for the event's target and kind, in
    /// installation order, collecting the commands they produce.
    pub fn dispatch(&self, event: &UiEvent) -> Vec<Command> {
        if !self.contains(event.target) {
            return Vec::new();
        }
        self.listeners
            .values()
            .filter(|l| l.target == event.target && l.kind == event.kind)
            .filter_map(|l| (l.handler)(event, self))
            .collect()
    }
}

/// Removes one listener when invoked.
pub struct Disposer(Box<dyn FnOnce(&mut Surface)>);

impl Disposer {
    pub fn new(dispose: impl FnOnce(&mut Surface) + 'static) -> Self {
        Self(Box::new(dispose))
    }

    fn dispose(self, surface: &mut Surface) {
        (self.0)(surface)
    }
}

/// Owns the disposers of every listener one controller lifetime installed.
#[derive(Default)]
pub struct ListenerScope {
    disposers: Vec<Disposer>,
}

impl ListenerScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a listener if `target` is attached. Returns whether it was.
    pub fn subscribe(
        &mut self,
        surface: &mut Surface,
        target: ElementId,
        kind: EventKind,
        handler: Handler,
    ) -> bool {
        if !surface.contains(target) {
            return false;
        }
        let id = surface.add_listener(target, kind, handler);
        self.disposers.push(Disposer::new(move |s| {
            s.remove_listener(id);
        }));
        true
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Invokes every disposer exactly once, then forgets them.
    pub fn dispose_all(&mut self, surface: &mut Surface) {
        for disposer in self.disposers.drain(..) {
            disposer.dispose(surface);
        }
    }
}
