//! Project persistence: the local cache, exported downloads and imports.

use std::io;
use std::path::PathBuf;

use crate::error::ProjectError;
use crate::playground::buffers::{BufferStore, EditorWidget, Pane};
use crate::playground::fields::TextFields;
use crate::playground::output::OutputLog;
use crate::project::Project;

/// Key the current project is cached under.
pub const STORAGE_KEY: &str = "academy-codelab-web";

/// File name offered when a project is exported.
pub const EXPORT_FILE_NAME: &str = "academy-web.json";

/// A persistent string store. Last write wins.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Somewhere to hand the user a file, returning where it ended up.
pub trait Downloads {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Where a restored project came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
    Cache,
    Sample,
}

/// What a save managed to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub project: Project,
    pub cached: bool,
    pub exported: bool,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        self.cached || self.exported
    }
}

pub struct PersistenceManager {
    store: Box<dyn KeyValueStore>,
    downloads: Box<dyn Downloads>,
}

impl PersistenceManager {
    pub fn new(store: Box<dyn KeyValueStore>, downloads: Box<dyn Downloads>) -> Self {
        Self { store, downloads }
    }

    /// Reads the current project out of the fields and buffers.
    pub fn snapshot<W: EditorWidget>(buffers: &BufferStore<W>, fields: &TextFields) -> Project {
        Project {
            assignment: fields.assignment(),
            test: fields.test(),
            html: buffers.get(Pane::Html),
            css: buffers.get(Pane::Css),
            js: buffers.get(Pane::Js),
        }
    }

    /// Caches the snapshot and offers it as a download. Either write may fail
    /// without stopping the other; the project counts as saved if one lands.
    pub fn save<W: EditorWidget>(
        &mut self,
        buffers: &BufferStore<W>,
        fields: &TextFields,
        output: &mut OutputLog,
    ) -> SaveOutcome {
        let project = Self::snapshot(buffers, fields);
        let json = match project.to_pretty_json() {
            Ok(json) => json,
            Err(e) => {
                output.error(format!("Could not serialize project: {e}"));
                output.error("Project not saved.");
                return SaveOutcome {
                    project,
                    cached: false,
                    exported: false,
                };
            }
        };

        let cached = match self.store.set_item(STORAGE_KEY, &json) {
            Ok(()) => true,
            Err(e) => {
                output.error(format!("Could not cache project: {e}"));
                false
            }
        };
        let exported = match self.downloads.offer(EXPORT_FILE_NAME, json.as_bytes()) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "exported project");
                true
            }
            Err(e) => {
                output.error(format!("Could not export project: {e}"));
                false
            }
        };

        let outcome = SaveOutcome {
            project,
            cached,
            exported,
        };
        if outcome.is_saved() {
            output.info("Project saved.");
        } else {
            output.error("Project not saved.");
        }
        outcome
    }

    /// Loads the cached project, or the built-in sample when there is none
    /// or it cannot be read. Never fails.
    pub fn restore<W: EditorWidget>(
        &self,
        buffers: &mut BufferStore<W>,
        fields: &mut TextFields,
        output: &mut OutputLog,
    ) -> RestoreSource {
        match self.cached() {
            Some(project) => {
                Self::apply(&project, buffers, fields);
                output.info("Project loaded.");
                RestoreSource::Cache
            }
            None => {
                Self::apply(&Project::sample(), buffers, fields);
                RestoreSource::Sample
            }
        }
    }

    fn cached(&self) -> Option<Project> {
        let text = self.store.get_item(STORAGE_KEY)?;
        if text.is_empty() {
            return None;
        }
        match Project::parse(&text) {
            Ok(project) => Some(project),
            Err(e) => {
                tracing::warn!(error = %e, "cached project is unreadable, using sample");
                None
            }
        }
    }

    /// Imports a project file's content. On failure nothing changes and the
    /// user sees "Invalid project file".
    pub fn import_from_file<W: EditorWidget>(
        content: &str,
        buffers: &mut BufferStore<W>,
        fields: &mut TextFields,
        output: &mut OutputLog,
    ) -> Result<Project, ProjectError> {
        match Project::parse(content) {
            Ok(project) => {
                Self::apply(&project, buffers, fields);
                output.info("Project loaded.");
                Ok(project)
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected project file");
                output.error("Invalid project file");
                Err(e)
            }
        }
    }

    pub fn apply<W: EditorWidget>(project: &Project, buffers: &mut BufferStore<W>, fields: &mut TextFields) {
        fields.set_assignment(&project.assignment);
        fields.set_test(&project.test);
        for pane in Pane::ALL {
            buffers.set(pane, project.source(pane));
        }
    }
}
