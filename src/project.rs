//! The saved playground session: five flat string fields, tolerant parsing.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::ProjectError;
use crate::playground::buffers::Pane;

/// One saved playground session. Field order is the serialized order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Project {
    pub assignment: String,
    pub test: String,
    pub html: String,
    pub css: String,
    pub js: String,
}

const SAMPLE_HTML: &str = r#"<section class="card">
  <h1>Welcome to Codify</h1>
  <button id="btn">Click me</button>
</section>"#;

const SAMPLE_CSS: &str = "body { font-family: system-ui; }
button { padding: 8px 12px; }";

const SAMPLE_JS: &str = "document.getElementById('btn')?.addEventListener('click', () => {
  alert('Well done!');
});";

impl Project {
    /// The built-in sample shown on a fresh session.
    pub fn sample() -> Self {
        Self {
            assignment: String::new(),
            test: String::new(),
            html: SAMPLE_HTML.to_string(),
            css: SAMPLE_CSS.to_string(),
            js: SAMPLE_JS.to_string(),
        }
    }

    /// Coerces any JSON value into a Project. Never fails: string fields are
    /// kept, everything else (missing, null, numbers, arrays, ...) becomes "".
    pub fn normalize(raw: &Value) -> Self {
        let field = |name: &str| -> String {
            raw.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            assignment: field("assignment"),
            test: field("test"),
            html: field("html"),
            css: field("css"),
            js: field("js"),
        }
    }

    /// Parses a project document. The top level must be a JSON object.
    pub fn parse(text: &str) -> Result<Self, ProjectError> {
        let raw: Value = serde_json::from_str(text)?;
        if !raw.is_object() {
            return Err(ProjectError::NotAnObject);
        }
        Ok(Self::normalize(&raw))
    }

    /// Reads and parses a project file.
    pub fn read_from(path: &Path) -> Result<Self, ProjectError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Source text of the given pane.
    pub fn source(&self, pane: Pane) -> &str {
        match pane {
            Pane::Html => &self.html,
            Pane::Css => &self.css,
            Pane::Js => &self.js,
        }
    }
}
