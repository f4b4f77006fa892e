//! # Vitrine CLI
//!
//! A terminal client for the vitrine catalog. The binary is thin: argument
//! parsing, context wiring and rendering live in `src/cli/`, and everything they
//! call comes from the `vitrineapp` library.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/vitrine/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Logging, context wiring, dispatch (commands.rs)          │
//! │  - Text and JSON rendering (render.rs, styles.rs)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  vitrineapp: VitrineApi → commands → filters / pipeline     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only this crate writes to stdout/stderr or chooses exit codes. Rendering is
//! tested with canned `CmdResult` values; end-to-end behavior is covered by
//! `tests/` against a temporary catalog file.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
