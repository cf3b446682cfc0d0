//! Canonicalizer configuration.
//!
//! Names the team data source, the leagues to load and the match policy.
//! Built explicitly or from environment variables:
//! - `TEAM_DATA_DIR`: directory of `<league>.json` documents (unset: bundled data)
//! - `LEAGUES`: comma-separated league codes (default `nba,nfl`)
//! - `FUZZY_THRESHOLD`: minimum fuzzy similarity (default 0.8, clamped to 0.5..=1.0)
//! - `FUZZY_METRIC`: `levenshtein` or `jaro_winkler`
//! - `MIN_SUBSTRING_LEN`: shortest containment match in chars (default 4)

use std::env;
use std::path::PathBuf;

use crate::error::CanonError;
use crate::matching::{FuzzyMetric, MatchPolicy};
use crate::source::{BuiltinSource, JsonDirSource, TeamSource};
use crate::types::League;

pub const DEFAULT_LEAGUES: &str = "nba,nfl";

/// Where team data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Builtin,
    JsonDir(PathBuf),
}

impl SourceKind {
    pub fn open(&self) -> Box<dyn TeamSource> {
        match self {
            SourceKind::Builtin => Box::new(BuiltinSource),
            SourceKind::JsonDir(dir) => Box::new(JsonDirSource::new(dir)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CanonConfig {
    pub source: SourceKind,
    pub leagues: Vec<League>,
    pub policy: MatchPolicy,
}

impl CanonConfig {
    /// Bundled data for the given leagues, default policy.
    pub fn builtin(leagues: &[League]) -> Self {
        Self {
            source: SourceKind::Builtin,
            leagues: dedup_leagues(leagues.iter().copied()),
            policy: MatchPolicy::default(),
        }
    }

    /// JSON documents under `data_dir` for the given leagues, default policy.
    pub fn json_dir<P: Into<PathBuf>>(data_dir: P, leagues: &[League]) -> Self {
        Self {
            source: SourceKind::JsonDir(data_dir.into()),
            leagues: dedup_leagues(leagues.iter().copied()),
            policy: MatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, CanonError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CanonConfig::from_env`] with an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CanonError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = match lookup("TEAM_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) => SourceKind::JsonDir(PathBuf::from(dir.trim())),
            None => SourceKind::Builtin,
        };

        let raw_leagues = lookup("LEAGUES").unwrap_or_else(|| DEFAULT_LEAGUES.to_string());
        let leagues = parse_leagues(&raw_leagues)?;

        let mut policy = MatchPolicy::default();

        if let Some(raw) = lookup("FUZZY_THRESHOLD") {
            let threshold = raw.trim().parse::<f64>().map_err(|_| CanonError::Config {
                key: "FUZZY_THRESHOLD".to_string(),
                value: raw.clone(),
                reason: "expected a number".to_string(),
            })?;
            if !threshold.is_finite() {
                return Err(CanonError::Config {
                    key: "FUZZY_THRESHOLD".to_string(),
                    value: raw,
                    reason: "expected a finite number".to_string(),
                });
            }
            policy.fuzzy_threshold = threshold.clamp(0.5, 1.0);
        }

        if let Some(raw) = lookup("FUZZY_METRIC") {
            policy.fuzzy_metric = raw.parse::<FuzzyMetric>()?;
        }

        if let Some(raw) = lookup("MIN_SUBSTRING_LEN") {
            let len = raw.trim().parse::<usize>().map_err(|_| CanonError::Config {
                key: "MIN_SUBSTRING_LEN".to_string(),
                value: raw.clone(),
                reason: "expected a positive integer".to_string(),
            })?;
            policy.min_substring_len = len.max(1);
        }

        Ok(Self {
            source,
            leagues,
            policy,
        })
    }
}

fn parse_leagues(raw: &str) -> Result<Vec<League>, CanonError> {
    let parsed = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<League>)
        .collect::<Result<Vec<_>, _>>()?;

    if parsed.is_empty() {
        return Err(CanonError::Config {
            key: "LEAGUES".to_string(),
            value: raw.to_string(),
            reason: "must name at least one league".to_string(),
        });
    }
    Ok(dedup_leagues(parsed))
}

fn dedup_leagues<I: IntoIterator<Item = League>>(leagues: I) -> Vec<League> {
    let mut out = Vec::new();
    for league in leagues {
        if !out.contains(&league) {
            out.push(league);
        }
    }
    out
}
