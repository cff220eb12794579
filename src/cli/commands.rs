//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: execute the nested loops with the live dashboard
//! - view: open a markdown report in the interactive viewer

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// TaskFlow - a nested task runner with live progress tracking
#[derive(Parser, Debug)]
#[command(name = "taskflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the nested loops with live progress tracking
    Run(RunArgs),

    /// View a markdown report in an interactive viewer
    View {
        /// Path to the markdown report file
        report_path: PathBuf,
    },
}

/// Flags for `taskflow run`; unset values fall back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Number of outer loop iterations (0-1000)
    #[arg(short, long)]
    pub outer: Option<usize>,

    /// Number of middle loop iterations (0-10)
    #[arg(short, long)]
    pub middle: Option<usize>,

    /// Max inner loop iterations (1-20)
    #[arg(short, long)]
    pub inner: Option<usize>,

    /// Path for the output report file (.md)
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Probability of short-circuiting each inner step (0.0-1.0)
    #[arg(short = 's', long = "short-circuit")]
    pub short_circuit: Option<f64>,

    /// Minimum simulated work per inner step, in milliseconds
    #[arg(long)]
    pub sleep_min: Option<u64>,

    /// Maximum simulated work per inner step, in milliseconds
    #[arg(long)]
    pub sleep_max: Option<u64>,

    /// Skip the splash screen
    #[arg(long)]
    pub no_splash: bool,

    /// Do not offer to open the report afterwards
    #[arg(long)]
    pub no_view: bool,
}
