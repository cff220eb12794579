//! Markdown report generation.

use std::fs;
use std::path::Path;

use chrono::Local;
use log::info;

use crate::domain::{RunConfig, RunStats};
use crate::error::Result;

/// How the reported run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
}

impl RunStatus {
    fn label(self) -> &'static str {
        match self {
            RunStatus::Completed => "Completed",
            RunStatus::Cancelled => "Cancelled (partial results)",
        }
    }
}

/// Render the markdown report for a run.
pub fn generate_report(config: &RunConfig, stats: &RunStats, status: RunStatus) -> String {
    let mut lines = vec![
        "# TaskFlow Execution Report".to_string(),
        String::new(),
        format!("> Generated at {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
        String::new(),
    ];

    lines.extend(section(
        "Configuration",
        "Setting",
        vec![
            ("Outer iterations", config.outer_iterations().to_string()),
            ("Middle iterations", config.middle_iterations().to_string()),
            ("Inner iterations (max)", config.inner_iterations().to_string()),
            (
                "Short-circuit probability",
                format!("{:.0}%", config.short_circuit_probability() * 100.0),
            ),
            (
                "Sleep range",
                format!("{:.0}-{:.0} ms", config.sleep_min() * 1000.0, config.sleep_max() * 1000.0),
            ),
        ],
    ));

    lines.extend(section(
        "Statistics",
        "Metric",
        vec![
            ("Status", status.label().to_string()),
            ("Outer iterations completed", stats.total_outer.to_string()),
            ("Middle iterations completed", stats.total_middle.to_string()),
            ("Inner steps completed", stats.total_inner.to_string()),
            ("Short-circuits", stats.short_circuit_count.to_string()),
            ("Short-circuit rate", format!("{:.1}%", stats.short_circuit_rate() * 100.0)),
            (
                "Average inner steps per middle iteration",
                format!("{:.2}", stats.average_inner_per_middle()),
            ),
            ("Total elapsed time", format!("{:.2} s", stats.total_elapsed_seconds)),
        ],
    ));

    lines.push("## Execution Log".to_string());
    lines.push(String::new());
    if stats.messages.is_empty() {
        lines.push("_No messages recorded._".to_string());
    }
    lines.extend(stats.messages.iter().map(|message| format!("- {}", message)));

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

/// A `## title` heading followed by a two-column table and a blank line.
fn section(title: &str, key_header: &str, rows: Vec<(&str, String)>) -> Vec<String> {
    let mut lines = vec![
        format!("## {}", title),
        String::new(),
        format!("| {} | Value |", key_header),
        format!("|{}|-------|", "-".repeat(key_header.len() + 2)),
    ];
    lines.extend(rows.into_iter().map(|(key, value)| format!("| {} | {} |", key, value)));
    lines.push(String::new());
    lines
}

/// Write `content` to `path`, creating missing parent directories.
pub fn save_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!("Report saved to {}", path.display());
    Ok(())
}
