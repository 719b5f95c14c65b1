//! different utility modules used throughout the project
/// plotter settings with defaults, builder setters and a TOML loader
pub mod config;
/// terminal + file logger built on simplelog
pub mod logger;
/// message sink with an auto-dismiss countdown
pub mod message;
