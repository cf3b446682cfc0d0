//! Pickgrade Core - team-name canonicalization for pick grading.
//!
//! This module provides:
//! - League partitions and per-league static configuration
//! - Team-variant data sources (JSON directory, bundled, in-memory)
//! - An immutable per-league variant index with collision detection
//! - Resolution of free-text team names: exact, containment, then fuzzy
//! - Batch resolution with rayon and audit counters for unresolved inputs
//!
//! ```no_run
//! use pickgrade_core::{load, CanonConfig, League};
//!
//! let config = CanonConfig::builtin(&[League::NFL]);
//! let index = load(&config, League::NFL)?;
//! assert_eq!(index.resolve("Pittsburgh Steelers").key(), Some("PIT"));
//! # Ok::<(), pickgrade_core::CanonError>(())
//! ```

mod types;

pub mod canonicalizer;
pub mod config;
pub mod error;
pub mod league_config;
pub mod matching;
pub mod source;
pub mod utils;
pub mod variant_index;

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub use canonicalizer::{load, resolve_batch, ResolveStats, TeamCanonicalizer};
pub use config::{CanonConfig, SourceKind};
pub use error::CanonError;
pub use matching::team::resolve;
pub use matching::{FuzzyMetric, MatchMethod, MatchPolicy, Resolution, TeamMatch};
pub use source::{BuiltinSource, JsonDirSource, StaticSource, TeamSource};
pub use types::*;
pub use utils::matching::normalize;
pub use variant_index::VariantIndex;

/// Normalize a team string the way the index does (Python function).
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "normalize")]
fn py_normalize(raw: &str) -> String {
    normalize(raw)
}

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn pickgrade_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<canonicalizer::PyVariantIndex>()?;
    m.add_class::<league_config::PyLeagueConfig>()?;
    m.add_function(wrap_pyfunction!(league_config::py_get_league_configs, m)?)?;
    m.add_function(wrap_pyfunction!(py_normalize, m)?)?;
    Ok(())
}
