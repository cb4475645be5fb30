//! Thresholds used by the consistency validator
//!
//! The thresholds are quality signals. Exceeding one produces a warning
//! and never makes a report inconsistent.

use crate::error::ConsistencyResult;
use serde::{Deserialize, Serialize};

/// Comparison thresholds for a pair of renders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsistencyPolicy {
    /// Largest accepted difference between the two render times
    pub max_time_skew_ms: u64,
    /// Largest accepted ratio of the bigger output to the smaller one
    pub max_size_ratio: f64,
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self {
            max_time_skew_ms: 1000,
            max_size_ratio: 2.0,
        }
    }
}

impl ConsistencyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tighter thresholds for controlled benchmark runs
    pub fn strict() -> Self {
        Self {
            max_time_skew_ms: 250,
            max_size_ratio: 1.5,
        }
    }

    /// Looser thresholds for loaded or slow machines
    pub fn relaxed() -> Self {
        Self {
            max_time_skew_ms: 5000,
            max_size_ratio: 4.0,
        }
    }

    pub fn with_max_time_skew_ms(mut self, ms: u64) -> Self {
        self.max_time_skew_ms = ms;
        self
    }

    pub fn with_max_size_ratio(mut self, ratio: f64) -> Self {
        self.max_size_ratio = ratio;
        self
    }

    /// Load a policy from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> ConsistencyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let policy = ConsistencyPolicy::default();
        assert_eq!(policy.max_time_skew_ms, 1000);
        assert_eq!(policy.max_size_ratio, 2.0);
    }

    #[test]
    fn test_presets_are_ordered() {
        let (strict, normal, relaxed) = (
            ConsistencyPolicy::strict(),
            ConsistencyPolicy::default(),
            ConsistencyPolicy::relaxed(),
        );
        assert!(strict.max_time_skew_ms < normal.max_time_skew_ms);
        assert!(normal.max_time_skew_ms < relaxed.max_time_skew_ms);
        assert!(strict.max_size_ratio < normal.max_size_ratio);
        assert!(normal.max_size_ratio < relaxed.max_size_ratio);
    }

    #[test]
    fn test_from_json() {
        let policy = ConsistencyPolicy::from_json(r#"{"maxSizeRatio": 3.5}"#).unwrap();
        assert_eq!(policy.max_size_ratio, 3.5);
        assert_eq!(policy.max_time_skew_ms, 1000);

        assert!(ConsistencyPolicy::from_json("not json").is_err());
    }

    #[test]
    fn test_builders() {
        let policy = ConsistencyPolicy::new()
            .with_max_time_skew_ms(10)
            .with_max_size_ratio(1.1);
        assert_eq!(policy.max_time_skew_ms, 10);
        assert_eq!(policy.max_size_ratio, 1.1);
    }
}
