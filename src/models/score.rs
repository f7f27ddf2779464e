use serde::{Deserialize, Serialize};

/// One row of `neighborhood_overall_scores.csv`. Other columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRecord {
    pub score_id: String,
    pub score_normalized: Option<f64>,
}

/// A score present in both outputs, with the delta in hundredths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDelta {
    pub score_id: String,
    pub modular: f64,
    pub original: f64,
    pub delta: i64,
}

impl ScoreDelta {
    pub fn new(score_id: impl Into<String>, modular: f64, original: f64) -> Self {
        // Scores are compared as truncated integer percentages.
        let delta = (modular * 100.0).trunc() as i64 - (original * 100.0).trunc() as i64;
        ScoreDelta {
            score_id: score_id.into(),
            modular,
            original,
            delta,
        }
    }

    pub fn is_within(&self, tolerance: i64) -> bool {
        (-tolerance..=tolerance).contains(&self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_truncates_before_subtracting() {
        let d = ScoreDelta::new("people", 0.4567, 0.4499);
        assert_eq!(d.delta, 1);
        let d = ScoreDelta::new("people", 0.10, 0.25);
        assert_eq!(d.delta, -15);
    }

    #[test]
    fn test_within_is_inclusive() {
        assert!(ScoreDelta::new("a", 0.60, 0.50).is_within(10));
        assert!(!ScoreDelta::new("a", 0.65, 0.50).is_within(10));
        assert!(ScoreDelta::new("a", 0.40, 0.50).is_within(10));
    }
}
