//! The output console shown next to the editors.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub level: Level,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct OutputLog {
    lines: Vec<OutputLine>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line and mirrors it to the tracing log.
    pub fn log(&mut self, level: Level, text: impl Into<String>) {
        let text = text.into();
        match level {
            Level::Info => tracing::info!(target: "codify::output", "{text}"),
            Level::Warn => tracing::warn!(target: "codify::output", "{text}"),
            Level::Error => tracing::error!(target: "codify::output", "{text}"),
        }
        self.lines.push(OutputLine { level, text });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.log(Level::Info, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.log(Level::Warn, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.log(Level::Error, text);
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&OutputLine> {
        self.lines.last()
    }

    /// True if any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
