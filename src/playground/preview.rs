//! Preview document synthesis and the two surfaces it is delivered to.

use std::io;

/// The three learner sources a document is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sources<'a> {
    pub html: &'a str,
    pub css: &'a str,
    pub js: &'a str,
}

/// Builds a self-contained document from the learner's sources.
///
/// The script buffer and, when `include_tests` is set, the test script share
/// one `<script>` block wrapped in a single try/catch, so a fault in either
/// lands in the preview's own console instead of aborting the page.
pub fn build_document(sources: &Sources<'_>, tests: &str, include_tests: bool) -> String {
    let tests = if include_tests { tests } else { "" };
    format!(
        "<!doctype html>
<html>
<head>
<meta charset=\"utf-8\">
<style>{css}</style>
</head>
<body>
{html}
<script>
try {{
{js}
{tests}
}} catch (e) {{ console.error(e); }}
</script>
</body>
</html>",
        css = sources.css,
        html = sources.html,
        js = sources.js,
        tests = tests,
    )
}

/// Capabilities granted to the isolated preview frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPolicy {
    pub allow_scripts: bool,
    pub allow_modals: bool,
    pub allow_same_origin: bool,
}

impl SandboxPolicy {
    /// Scripts and dialogs run; the frame gets an opaque origin.
    pub const PREVIEW: SandboxPolicy = SandboxPolicy {
        allow_scripts: true,
        allow_modals: true,
        allow_same_origin: false,
    };

    /// Value of the frame's `sandbox` attribute.
    pub fn attribute(&self) -> String {
        let mut tokens = Vec::new();
        if self.allow_scripts {
            tokens.push("allow-scripts");
        }
        if self.allow_same_origin {
            tokens.push("allow-same-origin");
        }
        if self.allow_modals {
            tokens.push("allow-modals");
        }
        tokens.join(" ")
    }
}

/// An isolated frame embedded in the playground. Setting a document replaces
/// whatever it showed before.
pub trait PreviewFrame {
    fn set_document(&mut self, document: &str) -> io::Result<()>;
    fn document(&self) -> &str;
    fn policy(&self) -> SandboxPolicy;
}

/// A new top-level browsing context for full-page previews.
pub trait BrowserWindow {
    fn open_document(&mut self, document: &str) -> io::Result<()>;
}

/// Escapes text for use inside a double-quoted HTML attribute.
pub fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
