use anyhow::{Context, Result};
use pickgrade_core::canonicalizer::DEFAULT_UNRESOLVED_SAMPLE_LIMIT;
use pickgrade_core::league_config::get_builtin_leagues;
use pickgrade_core::{CanonConfig, League, SourceKind};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub canon: CanonConfig,
    /// Pick file to read; stdin when unset
    pub input_path: Option<PathBuf>,
    pub unresolved_sample_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let canon = CanonConfig::from_lookup(&lookup).context("Invalid canonicalizer settings")?;

        let input_path = lookup("INPUT_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let unresolved_sample_limit = match lookup("UNRESOLVED_SAMPLE_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().with_context(|| {
                format!("Invalid UNRESOLVED_SAMPLE_LIMIT: {raw} (expected integer)")
            })?,
            None => DEFAULT_UNRESOLVED_SAMPLE_LIMIT,
        };

        Ok(Self {
            canon,
            input_path,
            unresolved_sample_limit,
        })
    }

    /// Configured leagues that have no bundled data, when reading bundled data.
    pub fn unbundled_leagues(&self) -> Vec<League> {
        if self.canon.source != SourceKind::Builtin {
            return Vec::new();
        }
        let bundled = get_builtin_leagues();
        self.canon
            .leagues
            .iter()
            .copied()
            .filter(|league| !bundled.contains(league))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.canon.source, SourceKind::Builtin);
        assert_eq!(config.canon.leagues, vec![League::NBA, League::NFL]);
        assert_eq!(config.input_path, None);
        assert_eq!(config.unresolved_sample_limit, DEFAULT_UNRESOLVED_SAMPLE_LIMIT);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LEAGUES", "ncaab"),
            ("TEAM_DATA_DIR", "/data/teams"),
            ("INPUT_PATH", " picks.tsv "),
            ("UNRESOLVED_SAMPLE_LIMIT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.canon.leagues, vec![League::NCAAB]);
        assert_eq!(config.input_path, Some(PathBuf::from("picks.tsv")));
        assert_eq!(config.unresolved_sample_limit, 5);
    }

    #[test]
    fn test_unbundled_leagues() {
        let config = Config::from_lookup(lookup(&[("LEAGUES", "nba,ncaab,nhl")])).unwrap();
        assert_eq!(config.unbundled_leagues(), vec![League::NCAAB, League::NHL]);

        let from_dir = Config::from_lookup(lookup(&[
            ("LEAGUES", "nba,ncaab"),
            ("TEAM_DATA_DIR", "/data/teams"),
        ]))
        .unwrap();
        assert!(from_dir.unbundled_leagues().is_empty());
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[("UNRESOLVED_SAMPLE_LIMIT", "many")])).is_err());

        let err = Config::from_lookup(lookup(&[("FUZZY_METRIC", "soundex")])).unwrap_err();
        assert!(format!("{:#}", err).contains("FUZZY_METRIC"));
    }
}
