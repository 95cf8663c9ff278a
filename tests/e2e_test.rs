use std::process::Command;
use std::time::Duration;

use expectrl::{Eof, Regex, Session};
use tempfile::TempDir;

// ─── Raw byte constants (what a terminal actually sends) ────────────────

const CTRL_Q: &[u8] = b"\x11"; // Ctrl+Q
const CTRL_S: &[u8] = b"\x13"; // Ctrl+S
const CTRL_O: &[u8] = b"\x0f"; // Ctrl+O
const ENTER: &[u8] = b"\r"; // Enter/Return
const F1: &[u8] = b"\x1bOP"; // F1
const F5: &[u8] = b"\x1b[15~"; // F5

// ─── Helpers ─────────────────────────────────────────────────────────────

fn codify_command(dir: &TempDir) -> Command {
    let bin = env!("CARGO_BIN_EXE_codify");
    let mut cmd = Command::new(bin);
    cmd.arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--export-dir")
        .arg(dir.path().join("downloads"));
    cmd
}

fn spawn_codify() -> (Session, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut cmd = codify_command(&dir);
    cmd.env("TERM", "xterm-256color");

    let mut session = Session::spawn(cmd).expect("Failed to spawn codify");
    // The keyboard-enhancement probe waits for a reply the pty never sends
    session.set_expect_timeout(Some(Duration::from_secs(10)));
    (session, dir)
}

/// Small delay to let the TUI render.
fn short_delay() {
    std::thread::sleep(Duration::from_millis(300));
}

/// Send bytes and wait a moment for the TUI to process.
fn send_and_wait(session: &mut Session, bytes: &[u8]) {
    session.send(bytes).expect("Failed to send bytes");
    short_delay();
}

/// Cleanly quit the codify process.
fn quit(session: &mut Session) {
    send_and_wait(session, CTRL_Q);
    let _ = session.expect(Eof);
}

fn write_project(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════
// A. App Lifecycle
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn app_launches_shows_sample_and_ctrl_q_exits() {
    let (mut session, _dir) = spawn_codify();
    session
        .expect(Regex("Welcome to Codify"))
        .expect("Should see the sample markup");
    send_and_wait(&mut session, CTRL_Q);
    let _ = session.expect(Eof);
}

#[test]
fn ctrl_s_caches_and_exports_the_project() {
    let (mut session, dir) = spawn_codify();
    session.expect("Welcome to Codify").expect("started");
    session.send(b"ADDED").expect("send text");
    short_delay();
    send_and_wait(&mut session, CTRL_S);
    session
        .expect("Project saved.")
        .expect("Should see the save confirmation");
    quit(&mut session);

    let cached = std::fs::read_to_string(
        dir.path()
            .join("data")
            .join("storage")
            .join("academy-codelab-web.json"),
    )
    .unwrap();
    assert!(cached.contains("ADDED"), "cache: {cached}");
    assert!(dir.path().join("downloads").join("academy-web.json").exists());
}

#[test]
fn file_argument_is_loaded_on_start() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "lesson.json", r#"{"html":"<h2>Lesson seven</h2>"}"#);
    let mut cmd = codify_command(&dir);
    cmd.arg(&project);
    cmd.env("TERM", "xterm-256color");
    let mut session = Session::spawn(cmd).expect("Failed to spawn codify");
    session.set_expect_timeout(Some(Duration::from_secs(10)));

    session
        .expect("Lesson seven")
        .expect("Should show the imported markup");
    quit(&mut session);
}

#[test]
fn f5_reports_preview_update() {
    let (mut session, dir) = spawn_codify();
    session.expect("Welcome to Codify").expect("started");
    send_and_wait(&mut session, F5);
    session
        .expect("Preview updated.")
        .expect("Should log the preview update");
    quit(&mut session);
    assert!(dir.path().join("data").join("preview").join("frame.html").exists());
}

#[test]
fn load_prompt_imports_typed_path() {
    let (mut session, dir) = spawn_codify();
    let project = write_project(&dir, "picked.json", r#"{"html":"<em>picked file</em>"}"#);
    session.expect("Welcome to Codify").expect("started");

    send_and_wait(&mut session, CTRL_O);
    session.expect("Load project:").expect("prompt opens");
    // Replace the seeded directory with the full path: Ctrl+U is not bound,
    // so erase with backspaces.
    let seeded = format!("{}/", dir.path().join("downloads").display());
    for _ in 0..seeded.chars().count() {
        session.send(b"\x7f").expect("send backspace");
    }
    session.send(project.display().to_string()).expect("send path");
    send_and_wait(&mut session, ENTER);

    session
        .expect("picked file")
        .expect("Should show the loaded markup");
    quit(&mut session);
}

#[test]
fn help_modal_opens_with_f1() {
    let (mut session, _dir) = spawn_codify();
    session.expect("Welcome to Codify").expect("started");
    send_and_wait(&mut session, F1);
    session.expect("Keybindings").expect("help shows");
    // Any key dismisses the modal, so quit needs two presses
    send_and_wait(&mut session, b"x");
    quit(&mut session);
}

// ═══════════════════════════════════════════════════════════════════════
// B. render subcommand
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn render_prints_the_document() {
    let dir = TempDir::new().unwrap();
    let project = write_project(
        &dir,
        "p.json",
        r#"{"html":"<p>hi</p>","css":"p{}","js":"run()","test":"check()"}"#,
    );
    let output = codify_command(&dir)
        .arg("render")
        .arg(&project)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<!doctype html>"));
    assert!(stdout.contains("<style>p{}</style>"));
    assert!(stdout.contains("run()"));
    assert!(!stdout.contains("check()"));
}

#[test]
fn render_with_tests_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "p.json", r#"{"js":"run()","test":"check()"}"#);
    let out = dir.path().join("out.html");
    let status = codify_command(&dir)
        .arg("render")
        .arg(&project)
        .arg("--with-tests")
        .arg("-o")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    let document = std::fs::read_to_string(out).unwrap();
    assert!(document.contains("check()"));
}

#[test]
fn render_rejects_invalid_project() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "bad.json", "[1, 2, 3]");
    let output = codify_command(&dir)
        .arg("render")
        .arg(&project)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid project file"));
}
