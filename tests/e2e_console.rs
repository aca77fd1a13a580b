// LogConsole - tests/e2e_console.rs
//
// End-to-end tests for the console pipeline: config on disk, replayed
// input, filtered views, colour rules, pause hook, export and session.
//
// These tests use the real filesystem via tempfile; no mocks.

use egui::Color32;
use logconsole::app::logger::ConsoleLogger;
use logconsole::app::replay::replay_lines;
use logconsole::app::session::{self, SessionData};
use logconsole::app::state::ConsoleState;
use logconsole::core::export::export_to_file;
use logconsole::core::filter::Visibility;
use logconsole::core::model::{LogEntry, Severity};
use logconsole::core::store::LogStore;
use logconsole::platform::config::{config_path, load_config};
use logconsole::ui::colour_rules::ColourRules;
use logconsole::ui::theme::SeverityPalette;
use logconsole::util::error::FilterError;
use std::cell::Cell;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

// =============================================================================
// Helpers
// =============================================================================

const SAMPLE_LOG: &str = "\
Scene 'Arena' loaded
net: connected to 10.0.0.2
Warning: texture 'rock_04' missing mipmaps
net: packet loss 12%
Error: NullReferenceException in EnemySpawner
Player spawned
";

fn replayed_state() -> ConsoleState {
    let mut state = ConsoleState::new();
    replay_lines(Cursor::new(SAMPLE_LOG), Path::new("Player.log"), &mut state).unwrap();
    state
}

fn visible(state: &ConsoleState) -> Vec<String> {
    state
        .visible_entries()
        .map(|e| e.message().to_string())
        .collect()
}

// =============================================================================
// Store properties
// =============================================================================

#[test]
fn e2e_fruit_filters() {
    let mut store = LogStore::new();
    for fruit in ["apple", "banana", "grape"] {
        store.record(LogEntry::new(fruit, "", 0, Severity::Normal));
    }

    let substring = store.query(Visibility::all(), "ap", false).unwrap();
    let names: Vec<_> = substring.iter().map(|e| e.message()).collect();
    assert_eq!(names, vec!["apple", "grape"]);

    let regex = store.query(Visibility::all(), "^a", true).unwrap();
    let names: Vec<_> = regex.iter().map(|e| e.message()).collect();
    assert_eq!(names, vec!["apple"]);

    assert!(matches!(
        store.query(Visibility::all(), "(unclosed", true),
        Err(FilterError::InvalidRegex { .. })
    ));
    assert!(store
        .query(Visibility::none(), "", false)
        .unwrap()
        .is_empty());
}

#[test]
fn e2e_replay_counts_and_filters() {
    let mut state = replayed_state();
    assert_eq!(state.counter_label(Severity::Normal), "N: 4");
    assert_eq!(state.counter_label(Severity::Warning), "W: 1");
    assert_eq!(state.counter_label(Severity::Error), "E: 1");

    state.set_use_regex(true).unwrap();
    state.set_filter_text(r"^net: .*\d+%$").unwrap();
    assert_eq!(visible(&state), vec!["net: packet loss 12%"]);

    state.set_use_regex(false).unwrap();
    state.set_filter_text("net").unwrap();
    state.toggle_severity(Severity::Normal).unwrap();
    assert!(visible(&state).is_empty());

    state.clear();
    assert_eq!(state.counts().total(), 0);
    assert!(state.rows().is_empty());
}

// =============================================================================
// Config + colours
// =============================================================================

#[test]
fn e2e_config_rules_colour_rows() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        config_path(dir.path()),
        r##"
[colours]
normal = "#C0C0C0"

[[colour_rules]]
pattern = "^net:"
colour = "#3366FF"

[[colour_rules]]
pattern = "Exception"
colour = "#FF00FF"
"##,
    )
    .unwrap();

    let (config, warnings) = load_config(dir.path());
    assert!(warnings.is_empty(), "{warnings:?}");

    let mut state = ConsoleState::new();
    config.apply_to(&mut state);
    replay_lines(Cursor::new(SAMPLE_LOG), Path::new("Player.log"), &mut state).unwrap();

    let rows = state.rows();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].colour, Color32::from_rgb(0xC0, 0xC0, 0xC0));
    assert_eq!(rows[1].colour, Color32::from_rgb(0x33, 0x66, 0xFF));
    assert_eq!(rows[2].colour, SeverityPalette::default().warning);
    assert_eq!(rows[4].colour, Color32::from_rgb(0xFF, 0x00, 0xFF));
    assert_eq!(rows[4].location, "Player.log:5");
}

#[test]
fn e2e_colour_rule_precedence() {
    let rules =
        ColourRules::from_pairs([("err.*", Color32::RED), ("warn.*", Color32::YELLOW)]).unwrap();
    let entry = LogEntry::new("error: bad", "", 0, Severity::Warning);
    assert_eq!(
        rules.resolve(&entry, &SeverityPalette::default()),
        Color32::RED
    );
}

// =============================================================================
// Pause hook + logger
// =============================================================================

#[test]
fn e2e_logger_pauses_on_error() {
    let pauses = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pauses);
    let mut state = ConsoleState::new().with_pause_hook(move |_: &LogEntry| {
        counter.set(counter.get() + 1);
    });
    state.pause_on_error = true;

    let mut log = ConsoleLogger::new(&mut state);
    log.normal("tick");
    log.warning("slow frame");
    log.error("collider missing");
    log.error("collider still missing");

    assert_eq!(pauses.get(), 2);
    let entry = state.store.get(2).unwrap();
    assert!(entry.file_path().ends_with("e2e_console.rs"));
    assert!(entry.line_number() > 0);
}

// =============================================================================
// Export + session
// =============================================================================

#[test]
fn e2e_export_filtered_view() {
    let mut state = replayed_state();
    state
        .set_visibility(Visibility {
            show_normal: false,
            show_warning: true,
            show_error: true,
        })
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("view.csv");
    let visible_entries: Vec<_> = state.visible_entries().cloned().collect();
    assert_eq!(export_to_file(&visible_entries, &csv_path).unwrap(), 2);

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Warning,Player.log,3,"));
    assert!(csv.contains("Error,Player.log,5,"));

    let json_path = dir.path().join("view.json");
    export_to_file(&visible_entries, &json_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap())
        .unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn e2e_session_restores_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = session::session_path(dir.path());

    let mut first = replayed_state();
    first.set_filter_text("net:").unwrap();
    first.auto_scroll = true;
    first.save_session(dir.path()).unwrap();
    assert_eq!(session::load(&path), Some(SessionData::capture(&first)));

    let mut second = replayed_state();
    assert!(second.restore_session(dir.path()));
    assert!(second.auto_scroll);
    assert_eq!(
        visible(&second),
        vec!["net: connected to 10.0.0.2", "net: packet loss 12%"]
    );
}

#[cfg(target_os = "linux")]
#[test]
fn e2e_export_to_full_disk_is_an_error() {
    let state = replayed_state();
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("view.json");
    std::os::unix::fs::symlink("/dev/full", &json_path).unwrap();

    let visible_entries: Vec<_> = state.visible_entries().cloned().collect();
    assert!(export_to_file(&visible_entries, &json_path).is_err());
}
