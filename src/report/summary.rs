//! Console summary of a finished run.

use colored::*;

use crate::domain::{RunConfig, RunStats};

/// Label/value rows of the summary table.
pub fn summary_rows(config: &RunConfig, stats: &RunStats) -> Vec<(&'static str, String)> {
    vec![
        (
            "Outer iterations",
            format!("{}/{}", stats.total_outer, config.outer_iterations()),
        ),
        (
            "Middle iterations",
            format!(
                "{}/{}",
                stats.total_middle,
                config.outer_iterations() * config.middle_iterations()
            ),
        ),
        ("Inner steps", stats.total_inner.to_string()),
        ("Short-circuits", stats.short_circuit_count.to_string()),
        ("Short-circuit rate", format!("{:.1}%", stats.short_circuit_rate() * 100.0)),
        ("Avg inner per middle", format!("{:.2}", stats.average_inner_per_middle())),
        ("Elapsed", format!("{:.2}s", stats.total_elapsed_seconds)),
    ]
}

/// Print the run summary to stdout.
pub fn display_summary(config: &RunConfig, stats: &RunStats) {
    println!();
    println!("{}", "Execution Summary".bold().green());
    for (label, value) in summary_rows(config, stats) {
        println!("  {:<22} {}", format!("{}:", label), value.cyan());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rows() {
        let config = RunConfig::builder().outer(2).middle(3).inner(4).build().unwrap();
        let mut stats = RunStats::new();
        stats.total_outer = 2;
        stats.total_middle = 6;
        stats.total_inner = 15;
        stats.short_circuit_count = 2;
        stats.total_elapsed_seconds = 0.5;

        let rows = summary_rows(&config, &stats);
        assert_eq!(rows[0], ("Outer iterations", "2/2".to_string()));
        assert_eq!(rows[1], ("Middle iterations", "6/6".to_string()));
        assert_eq!(rows[2].1, "15");
        assert_eq!(rows[4].1, "33.3%");
        assert_eq!(rows[5].1, "2.50");
        assert_eq!(rows[6].1, "0.50s");
    }

    #[test]
    fn test_summary_rows_for_empty_stats() {
        let config = RunConfig::builder().build().unwrap();
        let rows = summary_rows(&config, &RunStats::new());
        assert_eq!(rows[0].1, "0/5");
        assert_eq!(rows[4].1, "0.0%");
    }
}
