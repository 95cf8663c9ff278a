use std::io::{self, Write};
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use codify::app::App;
use codify::config::Paths;
use codify::error::ProjectError;
use codify::logging;
use codify::playground::preview::{self, Sources};
use codify::project::Project;

#[derive(Parser)]
#[command(name = "codify", version, about = "A terminal HTML/CSS/JavaScript playground")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory for the cached project, preview pages and log file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory that receives saved project files
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Project file to load after start-up
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the preview document built from a project file
    Render {
        /// Project file (.json)
        project: PathBuf,
        /// Append the project's validation tests to the script
        #[arg(long)]
        with_tests: bool,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands first
    if let Some(Commands::Render {
        project,
        with_tests,
        output,
    }) = cli.command
    {
        return handle_render(&project, with_tests, output.as_deref());
    }

    let mut paths = Paths::from_system()?;
    if let Some(dir) = cli.data_dir {
        paths = paths.with_data_dir(dir);
    }
    if let Some(dir) = cli.export_dir {
        paths = paths.with_export_dir(dir);
    }

    if !logging::init_global(&paths.log_file()) {
        eprintln!("Warning: could not open log file {}", paths.log_file().display());
    }
    tracing::info!(data_dir = %paths.data_dir.display(), "starting codify");

    run_playground(&paths, cli.file)
}

/// Handles `codify render project.json`: builds the document and exits.
fn handle_render(project: &Path, with_tests: bool, output: Option<&Path>) -> io::Result<()> {
    let project = match Project::read_from(project) {
        Ok(project) => project,
        Err(ProjectError::Io(e)) => {
            eprintln!("Error: could not read {}: {}", project.display(), e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Invalid project file: {}", e);
            std::process::exit(1);
        }
    };

    let sources = Sources {
        html: &project.html,
        css: &project.css,
        js: &project.js,
    };
    let document = preview::build_document(&sources, &project.test, with_tests);

    match output {
        Some(path) => {
            std::fs::write(path, document)?;
            println!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Sets up the terminal, runs the TUI, and restores the terminal on exit.
fn run_playground(paths: &Paths, file: Option<PathBuf>) -> io::Result<()> {
    // Setup panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    // Ctrl+Enter is indistinguishable from Enter without the kitty protocol
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, paths, file);

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "playground stopped");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    paths: &Paths,
    file: Option<PathBuf>,
) -> io::Result<()> {
    let mut app = App::new(paths);
    if let Some(file) = file {
        app.import_on_start(file);
    }

    loop {
        app.render_frame(terminal)?;

        // Block up to 50ms waiting for the first event, so timers (the action
        // retry runs every 50ms) and file reads are serviced promptly.
        if event::poll(Duration::from_millis(50))? {
            // Drain all queued events without blocking, then render immediately.
            loop {
                let ev = event::read()?;
                app.handle_event(ev);
                if app.should_quit {
                    break;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    // Popping is harmless when nothing was pushed
    let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    Ok(())
}
