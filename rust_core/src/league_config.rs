//! League configuration for supported leagues.
//!
//! This module provides:
//! - Static configuration for all supported leagues
//! - Data file naming for league team-variant sources

#[cfg(feature = "python")]
use pyo3::prelude::*;

use serde::Serialize;

use crate::types::League;

/// Professional or college competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Professional,
    College,
}

/// Configuration for a single league.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueConfig {
    pub league: League,
    /// Human-readable name (e.g., "College Basketball")
    pub display_name: &'static str,
    /// Sport family (e.g., "basketball")
    pub sport: &'static str,
    pub level: Level,
    /// File name of the league's team-variant document within a data directory
    pub data_file: &'static str,
    /// Whether team data for this league is bundled with the library
    pub builtin: bool,
}

/// Static configuration for all supported leagues, in `League` order.
pub static LEAGUE_CONFIGS: &[LeagueConfig] = &[
    // Basketball
    LeagueConfig {
        league: League::NBA,
        display_name: "NBA",
        sport: "basketball",
        level: Level::Professional,
        data_file: "nba.json",
        builtin: true,
    },
    LeagueConfig {
        league: League::NCAAB,
        display_name: "College Basketball",
        sport: "basketball",
        level: Level::College,
        data_file: "ncaab.json",
        builtin: false,
    },
    // Football
    LeagueConfig {
        league: League::NFL,
        display_name: "NFL",
        sport: "football",
        level: Level::Professional,
        data_file: "nfl.json",
        builtin: true,
    },
    LeagueConfig {
        league: League::NCAAF,
        display_name: "College Football",
        sport: "football",
        level: Level::College,
        data_file: "ncaaf.json",
        builtin: false,
    },
    // Hockey
    LeagueConfig {
        league: League::NHL,
        display_name: "NHL",
        sport: "hockey",
        level: Level::Professional,
        data_file: "nhl.json",
        builtin: false,
    },
    // Baseball
    LeagueConfig {
        league: League::MLB,
        display_name: "MLB",
        sport: "baseball",
        level: Level::Professional,
        data_file: "mlb.json",
        builtin: false,
    },
];

impl League {
    pub fn config(&self) -> &'static LeagueConfig {
        &LEAGUE_CONFIGS[*self as usize]
    }
}

/// Get league configuration by code or alias.
pub fn get_league_config(code: &str) -> Option<&'static LeagueConfig> {
    code.parse::<League>().ok().map(|league| league.config())
}

/// Leagues with bundled team data.
pub fn get_builtin_leagues() -> Vec<League> {
    LEAGUE_CONFIGS
        .iter()
        .filter(|c| c.builtin)
        .map(|c| c.league)
        .collect()
}

// ============================================================================
// PyO3 Bindings
// ============================================================================

/// Python wrapper for LeagueConfig
#[cfg(feature = "python")]
#[pyclass(name = "LeagueConfig")]
#[derive(Clone)]
pub struct PyLeagueConfig {
    #[pyo3(get)]
    pub code: String,
    #[pyo3(get)]
    pub display_name: String,
    #[pyo3(get)]
    pub sport: String,
    #[pyo3(get)]
    pub college: bool,
    #[pyo3(get)]
    pub builtin: bool,
}

#[cfg(feature = "python")]
impl From<&LeagueConfig> for PyLeagueConfig {
    fn from(config: &LeagueConfig) -> Self {
        Self {
            code: config.league.as_str().to_string(),
            display_name: config.display_name.to_string(),
            sport: config.sport.to_string(),
            college: config.level == Level::College,
            builtin: config.builtin,
        }
    }
}

/// Get all league configurations (Python function).
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "get_league_configs")]
pub fn py_get_league_configs() -> Vec<PyLeagueConfig> {
    LEAGUE_CONFIGS.iter().map(|c| c.into()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configs_follow_league_order() {
        assert_eq!(LEAGUE_CONFIGS.len(), League::ALL.len());
        for league in League::ALL {
            assert_eq!(league.config().league, league);
        }
    }

    #[test]
    fn test_get_league_config_by_alias() {
        let cbb = get_league_config("cbb").unwrap();
        assert_eq!(cbb.league, League::NCAAB);
        assert_eq!(cbb.level, Level::College);
        assert_eq!(cbb.data_file, "ncaab.json");
        assert!(get_league_config("nonexistent").is_none());
    }

    #[test]
    fn test_data_file_matches_code() {
        for config in LEAGUE_CONFIGS {
            assert_eq!(config.data_file, format!("{}.json", config.league.as_str()));
        }
    }

    #[test]
    fn test_builtin_leagues() {
        assert_eq!(get_builtin_leagues(), vec![League::NBA, League::NFL]);
    }
}
