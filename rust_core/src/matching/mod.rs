//! Team Name Resolution
//!
//! Result and policy types for resolving a raw team string against a
//! [`crate::VariantIndex`]. The resolution passes themselves live in
//! [`team`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::error::CanonError;

pub mod team;

/// How a raw string was matched. Ordered by strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Fuzzy = 1,     // Similarity above threshold
    Substring = 2, // Word-aligned containment
    Exact = 3,     // Normalized exact variant
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Fuzzy => "fuzzy",
            MatchMethod::Substring => "substring",
            MatchMethod::Exact => "exact",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Similarity metric used by the fuzzy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyMetric {
    /// 1 - edit_distance / max_len
    #[default]
    Levenshtein,
    JaroWinkler,
}

impl FuzzyMetric {
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match self {
            FuzzyMetric::Levenshtein => normalized_levenshtein(a, b),
            FuzzyMetric::JaroWinkler => jaro_winkler(a, b),
        }
    }

    /// Upper bound on the similarity of two strings of these lengths, if the
    /// metric has a cheap one.
    pub(crate) fn upper_bound(&self, len_a: usize, len_b: usize) -> Option<f64> {
        match self {
            FuzzyMetric::Levenshtein => {
                let max = len_a.max(len_b);
                if max == 0 {
                    return Some(1.0);
                }
                Some(1.0 - len_a.abs_diff(len_b) as f64 / max as f64)
            }
            FuzzyMetric::JaroWinkler => None,
        }
    }
}

impl FromStr for FuzzyMetric {
    type Err = CanonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "levenshtein" | "edit" | "edit_distance" => Ok(FuzzyMetric::Levenshtein),
            "jaro_winkler" | "jarowinkler" | "jaro-winkler" => Ok(FuzzyMetric::JaroWinkler),
            other => Err(CanonError::Config {
                key: "FUZZY_METRIC".to_string(),
                value: other.to_string(),
                reason: "expected levenshtein|jaro_winkler".to_string(),
            }),
        }
    }
}

/// Tunable matching parameters, fixed for the lifetime of an index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Minimum similarity for a fuzzy match (inclusive)
    pub fuzzy_threshold: f64,
    pub fuzzy_metric: FuzzyMetric,
    /// Shortest string (in chars) allowed to match by containment.
    /// Anything shorter only ever matches exactly.
    pub min_substring_len: usize,
}

impl MatchPolicy {
    pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;
    pub const DEFAULT_MIN_SUBSTRING_LEN: usize = 4;

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_fuzzy_metric(mut self, metric: FuzzyMetric) -> Self {
        self.fuzzy_metric = metric;
        self
    }

    pub fn with_min_substring_len(mut self, len: usize) -> Self {
        self.min_substring_len = len;
        self
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            fuzzy_threshold: Self::DEFAULT_FUZZY_THRESHOLD,
            fuzzy_metric: FuzzyMetric::default(),
            min_substring_len: Self::DEFAULT_MIN_SUBSTRING_LEN,
        }
    }
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMatch {
    pub key: String,
    pub display_name: String,
    pub method: MatchMethod,
    /// 1.0 for exact; containment coverage or similarity otherwise
    pub score: f64,
    /// The normalized indexed variant that produced the match
    pub variant: String,
}

/// Outcome of resolving one raw string. `Unresolved` is a normal outcome
/// that callers count, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Matched(TeamMatch),
    Unresolved,
}

impl Resolution {
    pub fn key(&self) -> Option<&str> {
        match self {
            Resolution::Matched(m) => Some(m.key.as_str()),
            Resolution::Unresolved => None,
        }
    }

    pub fn method(&self) -> Option<MatchMethod> {
        match self {
            Resolution::Matched(m) => Some(m.method),
            Resolution::Unresolved => None,
        }
    }

    pub fn as_match(&self) -> Option<&TeamMatch> {
        match self {
            Resolution::Matched(m) => Some(m),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_ordering() {
        assert!(MatchMethod::Exact > MatchMethod::Substring);
        assert!(MatchMethod::Substring > MatchMethod::Fuzzy);
    }

    #[test]
    fn test_levenshtein_similarity() {
        let metric = FuzzyMetric::Levenshtein;
        assert!((metric.similarity("dukes", "duke") - 0.8).abs() < 1e-9);
        assert!((metric.similarity("duke", "duke") - 1.0).abs() < 1e-9);
        let bound = metric.upper_bound(5, 4).unwrap();
        assert!((bound - 0.8).abs() < 1e-9);
        assert_eq!(FuzzyMetric::JaroWinkler.upper_bound(5, 4), None);
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("Jaro-Winkler".parse::<FuzzyMetric>().unwrap(), FuzzyMetric::JaroWinkler);
        assert_eq!("levenshtein".parse::<FuzzyMetric>().unwrap(), FuzzyMetric::Levenshtein);
        assert!("soundex".parse::<FuzzyMetric>().is_err());
    }

    #[test]
    fn test_policy_builder() {
        let policy = MatchPolicy::default()
            .with_fuzzy_threshold(0.9)
            .with_min_substring_len(5);
        assert_eq!(policy.fuzzy_threshold, 0.9);
        assert_eq!(policy.min_substring_len, 5);
        assert_eq!(policy.fuzzy_metric, FuzzyMetric::Levenshtein);
    }

    #[test]
    fn test_resolution_serialization() {
        let unresolved = serde_json::to_value(Resolution::Unresolved).unwrap();
        assert_eq!(unresolved, serde_json::json!({ "status": "unresolved" }));

        let matched = Resolution::Matched(TeamMatch {
            key: "DUKE".to_string(),
            display_name: "Duke Blue Devils".to_string(),
            method: MatchMethod::Exact,
            score: 1.0,
            variant: "duke".to_string(),
        });
        let value = serde_json::to_value(&matched).unwrap();
        assert_eq!(value["status"], "matched");
        assert_eq!(value["key"], "DUKE");
        assert_eq!(value["method"], "exact");
        assert_eq!(matched.key(), Some("DUKE"));
        assert!(matched.is_resolved());
    }
}
