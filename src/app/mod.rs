// LogConsole - app/mod.rs
//
// Application layer: console state, logging facade, host hooks, persistence.
// Dependencies: core, ui.
// Must NOT depend on: platform specifics.

pub mod logger;
pub mod pause;
pub mod replay;
pub mod session;
pub mod state;
