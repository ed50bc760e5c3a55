// Score severity tiers

use serde::{Deserialize, Serialize};

pub const CRITICAL_SCORE: f64 = 85.0;
pub const HIGH_SCORE: f64 = 70.0;
pub const MEDIUM_SCORE: f64 = 50.0;

/// Ordinal tier derived from a case score on the backend's 0-100 scale.
/// The backend decides sanctions; this is display classification only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn from_score(score: f64) -> Self {
        if score >= CRITICAL_SCORE {
            Severity::Critical
        } else if score >= HIGH_SCORE {
            Severity::High
        } else if score >= MEDIUM_SCORE {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_score_boundaries() {
        assert_eq!(Severity::from_score(92.0), Severity::Critical);
        assert_eq!(Severity::from_score(85.0), Severity::Critical);
        assert_eq!(Severity::from_score(84.9), Severity::High);
        assert_eq!(Severity::from_score(70.0), Severity::High);
        assert_eq!(Severity::from_score(50.0), Severity::Medium);
        assert_eq!(Severity::from_score(12.0), Severity::Low);
    }
}
