//! Preview surfaces backed by HTML files.
//!
//! The embedded preview is a host page holding a sandboxed `<iframe>` whose
//! `srcdoc` is the built document. The full-page preview is the document on
//! its own, handed to the system browser.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::playground::preview::{escape_attribute, BrowserWindow, PreviewFrame, SandboxPolicy};

pub struct SandboxedFrameFile {
    path: PathBuf,
    policy: SandboxPolicy,
    document: String,
}

impl SandboxedFrameFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: SandboxPolicy::PREVIEW,
            document: String::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The page that embeds `document` in a sandboxed frame.
pub fn host_page(document: &str, policy: SandboxPolicy) -> String {
    format!(
        "<!doctype html>
<html>
<head>
<meta charset=\"utf-8\">
<title>Codify preview</title>
<style>html, body, iframe {{ margin: 0; border: 0; width: 100%; height: 100%; }}</style>
</head>
<body>
<iframe sandbox=\"{}\" srcdoc=\"{}\"></iframe>
</body>
</html>
",
        policy.attribute(),
        escape_attribute(document)
    )
}

impl PreviewFrame for SandboxedFrameFile {
    fn set_document(&mut self, document: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, host_page(document, self.policy))?;
        self.document = document.to_string();
        Ok(())
    }

    fn document(&self) -> &str {
        &self.document
    }

    fn policy(&self) -> SandboxPolicy {
        self.policy
    }
}

/// Opens full-page previews in the system browser.
pub struct SystemBrowser {
    path: PathBuf,
    launch: bool,
}

impl SystemBrowser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            launch: true,
        }
    }

    /// Writes the page but never starts a browser.
    pub fn headless(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            launch: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BrowserWindow for SystemBrowser {
    fn open_document(&mut self, document: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, document)?;
        if self.launch {
            open::that(&self.path)?;
        }
        tracing::info!(path = %self.path.display(), launched = self.launch, "opened full-page preview");
        Ok(())
    }
}
