//! Controller commands and the run/save chords bound inside every editor.

use std::path::PathBuf;

use crate::playground::buffers::{EditorWidget, Pane};

/// Everything a listener, chord or host key can ask the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build without tests and load it into the sandboxed frame.
    Run,
    /// Build with the validation tests appended.
    RunWithTests,
    ClearOutput,
    Save,
    /// Full-page preview in a new browser window.
    OpenPreview,
    /// Ask the host to let the user choose a project file.
    PickFile,
    /// Read the chosen project file and import it.
    ImportFile(PathBuf),
    SelectPane(Pane),
}

/// A key combination in editor-command notation (`Ctrl-Enter`, `Command-S`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub win: &'static str,
    pub mac: &'static str,
}

impl KeyChord {
    /// The chord for the platform we are running on.
    pub fn for_platform(&self) -> &'static str {
        if cfg!(target_os = "macos") {
            self.mac
        } else {
            self.win
        }
    }
}

/// A named command registered on an editor's own key handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCommand {
    pub name: &'static str,
    pub chord: KeyChord,
    pub command: Command,
}

pub const RUN_CHORD: KeyChord = KeyChord {
    win: "Ctrl-Enter",
    mac: "Command-Enter",
};

pub const SAVE_CHORD: KeyChord = KeyChord {
    win: "Ctrl-S",
    mac: "Command-S",
};

/// The commands every buffer carries, whichever pane has focus.
pub fn editor_commands() -> [KeyCommand; 2] {
    [
        KeyCommand {
            name: "run",
            chord: RUN_CHORD,
            command: Command::Run,
        },
        KeyCommand {
            name: "save",
            chord: SAVE_CHORD,
            command: Command::Save,
        },
    ]
}

/// Registers the run and save commands on one editor.
pub fn bind<W: EditorWidget>(widget: &mut W) {
    for command in editor_commands() {
        widget.add_command(command);
    }
}

/// Finds the command registered under `name` on `widget`.
pub fn lookup<W: EditorWidget>(widget: &W, name: &str) -> Option<Command> {
    widget
        .commands()
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.command.clone())
}
