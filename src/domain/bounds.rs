//! Iteration policy limits.

use std::ops::RangeInclusive;

/// Inclusive limits for each loop level's iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationBounds {
    pub outer_min: usize,
    pub outer_max: usize,
    pub middle_min: usize,
    pub middle_max: usize,
    pub inner_min: usize,
    pub inner_max: usize,
}

impl Default for IterationBounds {
    fn default() -> Self {
        Self {
            outer_min: 0,
            outer_max: 1000,
            middle_min: 0,
            middle_max: 10,
            inner_min: 1,
            inner_max: 20,
        }
    }
}

impl IterationBounds {
    pub fn outer(&self) -> RangeInclusive<usize> {
        self.outer_min..=self.outer_max
    }

    pub fn middle(&self) -> RangeInclusive<usize> {
        self.middle_min..=self.middle_max
    }

    pub fn inner(&self) -> RangeInclusive<usize> {
        self.inner_min..=self.inner_max
    }

    /// Check a count against one level's range.
    ///
    /// Returns the message used for configuration errors on failure.
    pub fn check(&self, field: &str, value: usize, range: RangeInclusive<usize>) -> Result<(), String> {
        if range.contains(&value) {
            Ok(())
        } else {
            Err(format!(
                "{} must be between {} and {} (got {})",
                field,
                range.start(),
                range.end(),
                value
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let bounds = IterationBounds::default();
        assert_eq!(bounds.outer(), 0..=1000);
        assert_eq!(bounds.middle(), 0..=10);
        assert_eq!(bounds.inner(), 1..=20);
    }

    #[test]
    fn test_check_within_range() {
        let bounds = IterationBounds::default();
        assert!(bounds.check("inner_iterations", 1, bounds.inner()).is_ok());
        assert!(bounds.check("inner_iterations", 20, bounds.inner()).is_ok());
    }

    #[test]
    fn test_check_outside_range() {
        let bounds = IterationBounds::default();
        let err = bounds.check("inner_iterations", 0, bounds.inner()).unwrap_err();
        assert_eq!(err, "inner_iterations must be between 1 and 20 (got 0)");
        assert!(bounds.check("middle_iterations", 11, bounds.middle()).is_err());
    }
}
