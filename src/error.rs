use std::io;

use thiserror::Error;

use crate::playground::buffers::{ContentKind, Pane};

/// Errors produced while reading a project document.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON is valid but the top level is not an object.
    #[error("project document must be a JSON object")]
    NotAnObject,
    /// The project file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors produced by the buffer store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("pane {pane:?} edits {expected:?} content, not {requested:?}")]
    ModeMismatch {
        pane: Pane,
        expected: ContentKind,
        requested: ContentKind,
    },
    #[error("pane {0:?} already has a live editor")]
    AlreadyCreated(Pane),
}
