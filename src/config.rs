//! Where the playground keeps its files.

use std::io;
use std::path::{Path, PathBuf};

/// Resolved directories for one run.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Cached project, preview pages and the log file.
    pub data_dir: PathBuf,
    /// Where "Save" drops the exported project file.
    pub export_dir: PathBuf,
    /// Hand full-page previews to the system browser.
    pub launch_browser: bool,
}

impl Paths {
    /// Resolves the platform directories. Only `main` should call this.
    pub fn from_system() -> io::Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
            })?
            .join("codify");
        let export_dir = match dirs::download_dir() {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        Ok(Self {
            data_dir,
            export_dir,
            launch_browser: true,
        })
    }

    /// Everything under `root`, and no browser launches.
    pub fn for_testing(root: &Path) -> Self {
        Self {
            data_dir: root.join("data"),
            export_dir: root.join("downloads"),
            launch_browser: false,
        }
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Directory of the key/value store.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    /// Host page embedding the sandboxed preview frame.
    pub fn frame_page(&self) -> PathBuf {
        self.data_dir.join("preview").join("frame.html")
    }

    /// Document written for "Open preview".
    pub fn full_preview_page(&self) -> PathBuf {
        self.data_dir.join("preview").join("full.html")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("codify.log")
    }
}
