//! Core data types for risk reporting

use serde::{Deserialize, Serialize};

/// Discrete risk tier derived from a score.
///
/// Ordered from least to most severe; `Unknown` is reserved for packages
/// whose registry metadata could not be retrieved and always carries a
/// score of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Score below 25: actively maintained, no concerns
    Low,
    /// Score 25-49: some staleness or sparsity signals
    Medium,
    /// Score 50-74: strong abandonment signals
    High,
    /// Score 75-100: almost certainly abandoned
    Critical,
    /// Registry metadata unobtainable; treated as maximal risk
    Unknown,
}

impl Verdict {
    /// Map a risk score to its tier. Never produces `Unknown`; that tier
    /// is only synthesized by the orchestrator for fetch failures.
    pub fn from_score(score: u8) -> Self {
        if score < 25 {
            Self::Low
        } else if score < 50 {
            Self::Medium
        } else if score < 75 {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Lowercase label used in the JSON output contract
    pub fn as_lower(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Risk assessment for a single package.
///
/// Created once per package per scan, either by the scorer or synthesized
/// by the orchestrator for unreachable packages, and never mutated after
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// Package name as it appeared in the manifest
    pub name: String,
    /// Risk score 0-100; higher means more abandonment risk
    pub score: u8,
    /// Days since the most recent published artifact, or -1 when unknown
    pub last_release_days: i64,
    /// Count of distinct identified maintainer/author roles (0 only for
    /// unreachable packages)
    pub maintainer_count: u32,
    /// Number of release identifiers with at least one published artifact
    pub release_count: u32,
    /// Risk tier derived from the score
    pub verdict: Verdict,
    /// Display date of the latest release (`YYYY-MM-DD`), empty if unknown
    pub last_release_date: String,
    /// Human-readable reasons contributing to the score
    pub factors: Vec<String>,
}

impl RiskReport {
    /// Maximal-risk placeholder for a package whose metadata could not be
    /// retrieved. Unreachable is never treated as safe.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 100,
            last_release_days: -1,
            maintainer_count: 0,
            release_count: 0,
            verdict: Verdict::Unknown,
            last_release_date: String::new(),
            factors: vec!["registry metadata unavailable".to_string()],
        }
    }
}
