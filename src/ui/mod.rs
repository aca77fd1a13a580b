// LogConsole - ui/mod.rs
//
// Presentation helpers: colours and display rows.
// Dependencies: core (read-only models), egui colour types.
// Must NOT depend on: app, platform, direct I/O.

pub mod colour_rules;
pub mod rows;
pub mod theme;
