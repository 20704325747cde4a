//! # Armswatch Library
//!
//! Internal library for the armswatch binary.
//!
//! This library exists to enable testing of the schedule arithmetic and provide
//! clean separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Armswatch` struct provides the application API with resource management
//! - **Schedule Core**: `schedule` module holds the pure Arms Race cycle arithmetic
//! - **Configuration**: `config` module for TOML-based settings
//! - **Presentation**: `display` module renders schedule frames to the terminal
//! - **Infrastructure**: Time source abstraction, signal handling, and logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod config;
pub mod constants;
pub mod display;
pub mod schedule;
pub mod signals;
pub mod time_source;

// Internal modules
mod armswatch;

// Re-export for binary
pub use armswatch::Armswatch;
