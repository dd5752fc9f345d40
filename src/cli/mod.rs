//! Command Line Interface (CLI) layer for dataprep.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `resize` and `split`
//! subcommands. Flags override values from an optional JSON config file,
//! which in turn override the library defaults.
//!
//! If you are embedding dataprep into another application, prefer using
//! the high-level `dataprep::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
