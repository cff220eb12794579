use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, RunArgs};
use cli::prompt::Answer;
use config::Config;
use taskflow::report::{RunStatus, display_summary, generate_report, save_report};
use taskflow::{RunConfig, RunStats, Session, TaskflowError};

const EXIT_CONFIG_ERROR: i32 = 1;
const EXIT_CANCELLED: i32 = 130;

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskflow")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskflow.log");

    // The terminal belongs to the dashboard, so logs only go to the file
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level.filter(|_| std::env::var_os("RUST_LOG").is_none()) {
        builder.parse_filters(level);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<i32> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => handle_run_command(&RunArgs::default(), config).await,
        Some(Commands::Run(args)) => handle_run_command(args, config).await,
        Some(Commands::View { report_path }) => handle_view_command(report_path).await,
    }
}

/// Merge CLI flags over config-file defaults and validate.
fn build_run_config(args: &RunArgs, config: &Config) -> taskflow::Result<RunConfig> {
    let defaults = &config.run;
    let sleep_min_ms = args.sleep_min.unwrap_or(defaults.sleep_min_ms);
    let sleep_max_ms = args.sleep_max.unwrap_or(defaults.sleep_max_ms);

    RunConfig::builder()
        .outer(args.outer.unwrap_or(defaults.outer))
        .middle(args.middle.unwrap_or(defaults.middle))
        .inner(args.inner.unwrap_or(defaults.inner))
        .short_circuit_probability(args.short_circuit.unwrap_or(defaults.short_circuit_probability))
        .sleep_range(sleep_min_ms as f64 / 1000.0, sleep_max_ms as f64 / 1000.0)
        .report_path(args.report.clone().unwrap_or_else(|| defaults.report_path.clone()))
        .build()
}

fn print_configuration(config: &RunConfig) {
    let value = |v: String| v.cyan();
    println!("{}", "Configuration:".bold());
    println!("  Outer iterations:  {}", value(config.outer_iterations().to_string()));
    println!("  Middle iterations: {}", value(config.middle_iterations().to_string()));
    println!("  Inner iterations:  {} (max)", value(config.inner_iterations().to_string()));
    println!(
        "  Short circuit:     {}",
        value(format!("{:.0}%", config.short_circuit_probability() * 100.0))
    );
    println!(
        "  Sleep range:       {}",
        value(format!(
            "{:.0}-{:.0} ms",
            config.sleep_min() * 1000.0,
            config.sleep_max() * 1000.0
        ))
    );
    println!("  Report path:       {}", value(config.report_path().display().to_string()));
    println!();
}

fn write_report(config: &RunConfig, stats: &RunStats, status: RunStatus) -> Result<PathBuf> {
    let path = config.report_path();
    let content = generate_report(config, stats, status);
    save_report(&content, path).context(format!("Failed to save report to {}", path.display()))?;
    Ok(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()))
}

async fn handle_run_command(args: &RunArgs, config: &Config) -> Result<i32> {
    if !args.no_splash {
        taskflow::splash::display_splash();
    }

    let run_config = match build_run_config(args, config) {
        Ok(run_config) => run_config,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return Ok(EXIT_CONFIG_ERROR);
        }
    };
    print_configuration(&run_config);

    let session = Session::with_log_lines(run_config.clone(), config.dashboard.log_lines)
        .with_refresh_rate(config.dashboard.refresh_per_second);

    let stats = match session.run_inline().await {
        Ok(stats) => stats,
        Err(TaskflowError::Cancelled { stats }) => {
            println!();
            println!("{}", "Execution cancelled by user.".yellow());
            let saved = write_report(&run_config, &stats, RunStatus::Cancelled)?;
            println!("{} {}", "Partial report saved to:".yellow(), saved.display());
            return Ok(EXIT_CANCELLED);
        }
        Err(e) => return Err(e).context("Run failed"),
    };
    println!();

    display_summary(&run_config, &stats);

    let saved = write_report(&run_config, &stats, RunStatus::Completed)?;
    println!("{} {}", "Report saved to:".green(), saved.display());
    println!();
    println!("{}", "Commands:".bold());
    println!(
        "  View report: {}",
        format!("taskflow view {}", run_config.report_path().display()).cyan()
    );
    println!();

    if !args.no_view {
        let ask = || cli::prompt::confirm("Would you like to view the report now?", true);
        match cli::prompt::ask_until(ask, cli::prompt::ctrl_c()).await? {
            Answer::Yes => taskflow::tui::view_report(run_config.report_path()).await?,
            Answer::Interrupted => {
                println!();
                return Ok(EXIT_CANCELLED);
            }
            Answer::No | Answer::Skipped => {}
        }
    }

    Ok(0)
}

async fn handle_view_command(report_path: &Path) -> Result<i32> {
    info!("Viewing report: {}", report_path.display());

    let is_markdown = report_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
    if !is_markdown {
        eprintln!("{} File must be a markdown (.md) file", "Error:".red());
        return Ok(EXIT_CONFIG_ERROR);
    }
    if !report_path.is_file() {
        eprintln!("{} {} does not exist", "Error:".red(), report_path.display());
        return Ok(EXIT_CONFIG_ERROR);
    }

    taskflow::tui::view_report(report_path).await?;
    println!("{}", "Viewer closed.".dimmed());
    Ok(0)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let level = if cli.is_verbose() {
        Some("debug")
    } else {
        config.log_level.as_deref()
    };
    setup_logging(level).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    let code = run_application(&cli, &config).await.context("Application failed")?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_run_config_uses_config_defaults() {
        let mut config = Config::default();
        config.run.outer = 8;
        config.run.sleep_min_ms = 2;
        config.run.sleep_max_ms = 4;

        let run_config = build_run_config(&RunArgs::default(), &config).unwrap();
        assert_eq!(run_config.outer_iterations(), 8);
        assert_eq!(run_config.middle_iterations(), 3);
        assert_eq!(run_config.sleep_min(), 0.002);
        assert_eq!(run_config.sleep_max(), 0.004);
    }

    #[test]
    fn test_build_run_config_flags_override() {
        let args = RunArgs {
            outer: Some(2),
            inner: Some(1),
            short_circuit: Some(1.0),
            report: Some(PathBuf::from("out/x.md")),
            ..RunArgs::default()
        };
        let run_config = build_run_config(&args, &Config::default()).unwrap();
        assert_eq!(run_config.outer_iterations(), 2);
        assert_eq!(run_config.inner_iterations(), 1);
        assert_eq!(run_config.short_circuit_probability(), 1.0);
        assert_eq!(run_config.report_path(), Path::new("out/x.md"));
    }

    #[test]
    fn test_build_run_config_rejects_out_of_bounds() {
        let args = RunArgs {
            middle: Some(11),
            ..RunArgs::default()
        };
        let err = build_run_config(&args, &Config::default()).unwrap_err();
        assert!(matches!(err, TaskflowError::InvalidConfig(_)));
    }

    #[test]
    fn test_build_run_config_rejects_inverted_sleep_range() {
        let args = RunArgs {
            sleep_min: Some(50),
            sleep_max: Some(10),
            ..RunArgs::default()
        };
        assert!(build_run_config(&args, &Config::default()).is_err());
    }

    #[tokio::test]
    async fn test_view_rejects_non_markdown() {
        assert_eq!(handle_view_command(Path::new("notes.txt")).await.unwrap(), EXIT_CONFIG_ERROR);
    }

    #[tokio::test]
    async fn test_view_rejects_missing_file() {
        let code = handle_view_command(Path::new("/nonexistent/taskflow/report.md")).await.unwrap();
        assert_eq!(code, EXIT_CONFIG_ERROR);
    }
}
