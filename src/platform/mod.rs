// LogConsole - platform/mod.rs
//
// Platform abstraction layer: directories and config.toml.

pub mod config;
