// LogConsole - core/mod.rs
//
// Core business logic layer: entries, the store, filtering, export.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod filter;
pub mod model;
pub mod store;
