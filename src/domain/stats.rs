//! Run statistics.

/// Statistics accumulated by the executor during a run.
///
/// Written only by the executor; the caller reads it once the run returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub total_outer: usize,
    pub total_middle: usize,
    pub total_inner: usize,
    pub short_circuit_count: usize,
    pub total_elapsed_seconds: f64,
    /// Full audit trail, in call order
    pub messages: Vec<String>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Fraction of middle iterations that ended in a short-circuit.
    pub fn short_circuit_rate(&self) -> f64 {
        if self.total_middle == 0 {
            0.0
        } else {
            self.short_circuit_count as f64 / self.total_middle as f64
        }
    }

    /// Average inner steps completed per middle iteration.
    pub fn average_inner_per_middle(&self) -> f64 {
        if self.total_middle == 0 {
            0.0
        } else {
            self.total_inner as f64 / self.total_middle as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_empty() {
        let stats = RunStats::new();
        assert_eq!(stats.total_outer, 0);
        assert!(stats.messages.is_empty());
        assert_eq!(stats.short_circuit_rate(), 0.0);
        assert_eq!(stats.average_inner_per_middle(), 0.0);
    }

    #[test]
    fn test_add_message_preserves_order() {
        let mut stats = RunStats::new();
        stats.add_message("first");
        stats.add_message(String::from("second"));
        assert_eq!(stats.messages, vec!["first", "second"]);
    }

    #[test]
    fn test_rates() {
        let stats = RunStats {
            total_middle: 4,
            total_inner: 10,
            short_circuit_count: 1,
            ..RunStats::default()
        };
        assert_eq!(stats.short_circuit_rate(), 0.25);
        assert_eq!(stats.average_inner_per_middle(), 2.5);
    }
}
