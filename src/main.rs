// LogConsole - main.rs
//
// Headless console entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Replaying a plain-text log through the console
// 4. Restoring and saving the console session
// 5. Printing the filtered, colour-coded view and counters

use clap::Parser;
use logconsole::app::replay;
use logconsole::app::state::ConsoleState;
use logconsole::core::export;
use logconsole::core::filter::FilterState;
use logconsole::core::model::Severity;
use logconsole::platform::config::{self, PlatformPaths};
use logconsole::ui::rows::DisplayRow;
use logconsole::ui::theme;
use logconsole::util::error::{LogConsoleError, Result};
use logconsole::util::{constants, logging};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code for an invalid filter regex.
const EXIT_BAD_FILTER: u8 = 2;

/// LogConsole - filter and colour-code a log the way the editor console does.
///
/// Each line of the input becomes one entry; its severity is inferred from
/// keywords such as "error" and "warning".
#[derive(Parser, Debug)]
#[command(name = "logconsole", version, about)]
struct Cli {
    /// Log file to read (stdin if omitted).
    path: Option<PathBuf>,

    /// Hide Normal entries.
    #[arg(long)]
    hide_normal: bool,

    /// Hide Warning entries.
    #[arg(long)]
    hide_warning: bool,

    /// Hide Error entries.
    #[arg(long)]
    hide_error: bool,

    /// Text filter applied to messages (case-sensitive substring).
    #[arg(short = 'f', long = "filter")]
    filter: Option<String>,

    /// Interpret --filter as a regular expression.
    #[arg(short = 'r', long)]
    regex: bool,

    /// Write the filtered view to this file (.csv or .json).
    #[arg(short = 'e', long)]
    export: Option<PathBuf>,

    /// Print without ANSI colours.
    #[arg(long)]
    no_colour: bool,

    /// Directory containing config.toml (platform default if omitted).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Start from the filter and toggles saved by a previous --save-session.
    /// Filter flags given on the command line still apply on top.
    #[arg(long)]
    restore_session: bool,

    /// Save the effective filter and toggles for the next --restore-session.
    #[arg(long)]
    save_session: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform_paths.config_dir.clone());
    let (app_config, config_warnings) = config::load_config(&config_dir);

    logging::init(cli.debug, app_config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "LogConsole starting"
    );

    match run(&cli, &platform_paths, &app_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            match e {
                LogConsoleError::Filter(_) => ExitCode::from(EXIT_BAD_FILTER),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: &Cli, paths: &PlatformPaths, app_config: &config::AppConfig) -> Result<()> {
    let mut state = ConsoleState::new();
    app_config.apply_to(&mut state);

    if cli.restore_session && !state.restore_session(&paths.data_dir) {
        tracing::info!("No saved session; using defaults");
    }

    load_input(cli, &mut state)?;
    let filter = effective_filter(cli, state.filter_state());
    state.set_filter(filter)?;

    if let Err(e) = print_view(&state, !cli.no_colour) {
        // Broken pipe (e.g. piped into `head`) is not an error worth reporting.
        if e.kind() != io::ErrorKind::BrokenPipe {
            return Err(LogConsoleError::Io {
                path: PathBuf::from("<stdout>"),
                operation: "write",
                source: e,
            });
        }
    }

    if let Some(ref path) = cli.export {
        let visible: Vec<_> = state.visible_entries().cloned().collect();
        let count = export::export_to_file(&visible, path)?;
        tracing::info!(entries = count, path = %path.display(), "Exported filtered view");
    }

    if cli.save_session {
        state.save_session(&paths.data_dir)?;
    }

    Ok(())
}

/// Command-line filter flags layered over `base` (defaults or a restored
/// session). Hide flags only ever hide; `--filter` replaces the text.
fn effective_filter(cli: &Cli, base: &FilterState) -> FilterState {
    let mut filter = base.clone();
    if cli.hide_normal {
        filter.visibility.show_normal = false;
    }
    if cli.hide_warning {
        filter.visibility.show_warning = false;
    }
    if cli.hide_error {
        filter.visibility.show_error = false;
    }
    if let Some(ref text) = cli.filter {
        filter.filter_text = text.clone();
        filter.use_regex = cli.regex;
    } else if cli.regex {
        filter.use_regex = true;
    }
    filter
}

fn load_input(cli: &Cli, state: &mut ConsoleState) -> Result<usize> {
    let path = cli.path.as_deref().unwrap_or(Path::new("<stdin>"));
    let read_err = |e| LogConsoleError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source: e,
    };
    match cli.path {
        Some(_) => {
            let file = std::fs::File::open(path).map_err(read_err)?;
            replay::replay_lines(BufReader::new(file), path, state).map_err(read_err)
        }
        None => replay::replay_lines(io::stdin().lock(), path, state).map_err(read_err),
    }
}

fn format_row(row: &DisplayRow, colour: bool) -> String {
    let location = if row.location.is_empty() {
        String::new()
    } else {
        format!("  ({})", row.location)
    };
    if colour {
        format!(
            "{}{}{}{location}",
            theme::ansi_foreground(row.colour),
            row.message,
            theme::ANSI_RESET
        )
    } else {
        format!("[{}] {}{location}", row.severity.short_label(), row.message)
    }
}

fn print_view(state: &ConsoleState, colour: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in state.rows() {
        writeln!(out, "{}", format_row(&row, colour))?;
    }
    let counters: Vec<String> = Severity::all()
        .iter()
        .map(|s| state.counter_label(*s))
        .collect();
    writeln!(
        out,
        "{}  ({} shown)",
        counters.join("  "),
        state.filtered_indices().len()
    )?;
    out.flush()
}
