//! CLI module for taskflow - command-line interface and subcommands.
//!
//! Provides the `run` and `view` subcommands plus the interactive prompt
//! shown after a run.

pub mod commands;
pub mod prompt;

pub use commands::Cli;
