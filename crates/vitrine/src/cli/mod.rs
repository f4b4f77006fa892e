//! # CLI Behavior
//!
//! Running `vitrine` with no subcommand is the same as `vitrine browse`.
//!
//! ## Global Options
//!
//! - `--catalog PATH`: catalog document, overriding configuration
//! - `--output text|json`: human output or the raw `CmdResult` as JSON
//! - `--verbose`: debug logging on stderr (`RUST_LOG` takes precedence)
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Logging setup, context wiring and dispatch
//! - `render`: Text and JSON output
//! - `styles`: Terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
