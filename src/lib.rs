// LogConsole - lib.rs
//
// Library entry point. The CLI in `main.rs` is one presentation layer over
// these modules; editor hosts embed `app::state::ConsoleState` directly.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
