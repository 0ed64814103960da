//! Command Line Interface (CLI) layer for medslice.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `convert` and `slice`
//! subcommands. It wires user-provided options to the underlying library
//! functionality exposed via `medslice::api`.
//!
//! If you are embedding medslice into another application, prefer using
//! the high-level `medslice::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
