//! Batch canonicalization across leagues.
//!
//! This module provides:
//! - `load`: build one league's index from the configured source
//! - `TeamCanonicalizer`: shared indexes for every configured league
//! - Parallel batch resolution
//! - `ResolveStats`: audit counters for batch callers

#[cfg(feature = "python")]
use pyo3::prelude::*;

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::CanonConfig;
use crate::error::CanonError;
use crate::matching::{MatchMethod, Resolution};
use crate::source::TeamSource;
use crate::types::League;
use crate::variant_index::VariantIndex;

/// Default number of unresolved inputs kept for the audit report.
pub const DEFAULT_UNRESOLVED_SAMPLE_LIMIT: usize = 20;

/// Load one league's records from the configured source and build its index.
pub fn load(config: &CanonConfig, league: League) -> Result<VariantIndex, CanonError> {
    let source = config.source.open();
    load_from(source.as_ref(), league, config)
}

fn load_from(
    source: &dyn TeamSource,
    league: League,
    config: &CanonConfig,
) -> Result<VariantIndex, CanonError> {
    info!("Loading {} team data from {}", league, source.describe(league));
    let records = source.load_records(league)?;
    VariantIndex::build(league, records, config.policy)
}

/// Resolve many inputs against one index in parallel. Output order matches
/// input order.
pub fn resolve_batch<S>(index: &VariantIndex, inputs: &[S]) -> Vec<Resolution>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|raw| index.resolve(raw.as_ref()))
        .collect()
}

/// One index per loaded league.
#[derive(Debug, Clone, Default)]
pub struct TeamCanonicalizer {
    indexes: BTreeMap<League, Arc<VariantIndex>>,
}

impl TeamCanonicalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every configured league, failing on the first error.
    pub fn load(config: &CanonConfig) -> Result<Self, CanonError> {
        let source = config.source.open();
        let source = source.as_ref();
        let indexes = config
            .leagues
            .par_iter()
            .map(|&league| load_from(source, league, config).map(|idx| (league, Arc::new(idx))))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self { indexes })
    }

    /// Load every configured league, skipping and returning the ones that fail.
    pub fn load_lenient(config: &CanonConfig) -> (Self, Vec<(League, CanonError)>) {
        let source = config.source.open();
        let source = source.as_ref();
        let results: Vec<(League, Result<VariantIndex, CanonError>)> = config
            .leagues
            .par_iter()
            .map(|&league| (league, load_from(source, league, config)))
            .collect();

        let mut canon = Self::new();
        let mut failures = Vec::new();
        for (league, result) in results {
            match result {
                Ok(index) => {
                    canon.insert(index);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", league, e);
                    failures.push((league, e));
                }
            }
        }
        (canon, failures)
    }

    /// Add or replace a league's index.
    pub fn insert(&mut self, index: VariantIndex) -> Option<Arc<VariantIndex>> {
        self.indexes.insert(index.league(), Arc::new(index))
    }

    pub fn index(&self, league: League) -> Option<&Arc<VariantIndex>> {
        self.indexes.get(&league)
    }

    pub fn contains(&self, league: League) -> bool {
        self.indexes.contains_key(&league)
    }

    pub fn leagues(&self) -> Vec<League> {
        self.indexes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Resolve within one league. A league that was never loaded yields
    /// `Unresolved`.
    pub fn resolve(&self, league: League, raw: &str) -> Resolution {
        match self.indexes.get(&league) {
            Some(index) => index.resolve(raw),
            None => {
                warn!("No {} index loaded; '{}' left unresolved", league, raw);
                Resolution::Unresolved
            }
        }
    }

    pub fn resolve_batch<S>(&self, league: League, inputs: &[S]) -> Vec<Resolution>
    where
        S: AsRef<str> + Sync,
    {
        match self.indexes.get(&league) {
            Some(index) => resolve_batch(index, inputs),
            None => {
                warn!("No {} index loaded; {} inputs left unresolved", league, inputs.len());
                vec![Resolution::Unresolved; inputs.len()]
            }
        }
    }
}

/// Resolution counters for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveStats {
    pub total: usize,
    pub exact: usize,
    pub substring: usize,
    pub fuzzy: usize,
    pub unresolved: usize,
    /// First unresolved inputs, up to `sample_limit`
    pub unresolved_samples: Vec<String>,
    #[serde(skip)]
    sample_limit: usize,
}

impl ResolveStats {
    pub fn new(sample_limit: usize) -> Self {
        Self {
            total: 0,
            exact: 0,
            substring: 0,
            fuzzy: 0,
            unresolved: 0,
            unresolved_samples: Vec::new(),
            sample_limit,
        }
    }

    pub fn record(&mut self, raw: &str, resolution: &Resolution) {
        self.total += 1;
        match resolution.method() {
            Some(MatchMethod::Exact) => self.exact += 1,
            Some(MatchMethod::Substring) => self.substring += 1,
            Some(MatchMethod::Fuzzy) => self.fuzzy += 1,
            None => {
                self.unresolved += 1;
                if self.unresolved_samples.len() < self.sample_limit {
                    self.unresolved_samples.push(raw.to_string());
                }
            }
        }
    }

    pub fn resolved(&self) -> usize {
        self.total - self.unresolved
    }

    /// Fraction of inputs resolved; 1.0 for an empty batch.
    pub fn resolution_rate(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.resolved() as f64 / self.total as f64
    }

    pub fn merge(&mut self, other: &ResolveStats) {
        self.total += other.total;
        self.exact += other.exact;
        self.substring += other.substring;
        self.fuzzy += other.fuzzy;
        self.unresolved += other.unresolved;
        for sample in &other.unresolved_samples {
            if self.unresolved_samples.len() >= self.sample_limit {
                break;
            }
            self.unresolved_samples.push(sample.clone());
        }
    }
}

impl Default for ResolveStats {
    fn default() -> Self {
        Self::new(DEFAULT_UNRESOLVED_SAMPLE_LIMIT)
    }
}

// ============================================================================
// PyO3 Bindings
// ============================================================================

/// Python wrapper for a league's VariantIndex
#[cfg(feature = "python")]
#[pyclass(name = "VariantIndex")]
pub struct PyVariantIndex {
    inner: Arc<VariantIndex>,
}

#[cfg(feature = "python")]
#[pymethods]
impl PyVariantIndex {
    /// Load a league from a data directory, or bundled data when omitted.
    #[staticmethod]
    #[pyo3(signature = (league, data_dir=None))]
    fn load(league: &str, data_dir: Option<String>) -> PyResult<Self> {
        let league: League = league
            .parse()
            .map_err(|e: CanonError| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;
        let config = match data_dir {
            Some(dir) => CanonConfig::json_dir(dir, &[league]),
            None => CanonConfig::builtin(&[league]),
        };
        let index = load(&config, league)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyIOError, _>(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(index),
        })
    }

    /// Canonical key, or None when unresolved.
    fn resolve(&self, raw: &str) -> Option<String> {
        self.inner.resolve(raw).key().map(|k| k.to_string())
    }

    /// (key, method, score), or None when unresolved.
    fn resolve_detail(&self, raw: &str) -> Option<(String, String, f64)> {
        self.inner
            .resolve(raw)
            .as_match()
            .map(|m| (m.key.clone(), m.method.as_str().to_string(), m.score))
    }

    fn resolve_many(&self, inputs: Vec<String>) -> Vec<Option<String>> {
        resolve_batch(&self.inner, inputs.as_slice())
            .into_iter()
            .map(|r| r.key().map(|k| k.to_string()))
            .collect()
    }

    fn league(&self) -> String {
        self.inner.league().as_str().to_string()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
