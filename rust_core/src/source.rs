//! Team-variant data sources.
//!
//! A league's records come from one of:
//! - a JSON document per league in a data directory
//! - data bundled with the library (NBA, NFL)
//! - records assembled in memory by the caller
//!
//! Document format: canonical key -> entry.
//!
//! ```json
//! {
//!   "DUKE": {
//!     "display_name": "Duke Blue Devils",
//!     "nickname": "Blue Devils",
//!     "conference": "ACC",
//!     "variants": ["duke", "blue devils"]
//!   }
//! }
//! ```

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CanonError;
use crate::types::{League, TeamRecord};

/// Where a league's team records come from.
pub trait TeamSource: Send + Sync {
    /// Human-readable location of the league's data, for errors and logs.
    fn describe(&self, league: League) -> String;

    /// Read and parse the league's records. Validation beyond the schema
    /// happens when the index is built.
    fn load_records(&self, league: League) -> Result<Vec<TeamRecord>, CanonError>;
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TeamEntry {
    display_name: String,
    nickname: String,
    #[serde(default)]
    conference: Option<String>,
    variants: Vec<String>,
}

/// Map entries in document order, keeping repeated keys so they can be
/// reported instead of silently overwritten.
struct TeamDocument(Vec<(String, TeamEntry)>);

impl<'de> Deserialize<'de> for TeamDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = TeamDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of canonical key to team entry")
            }

            fn visit_map<A>(self, mut map: A) -> Result<TeamDocument, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, entry)) = map.next_entry::<String, TeamEntry>()? {
                    entries.push((key, entry));
                }
                Ok(TeamDocument(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Parse a team-variant JSON document.
pub fn parse_records(source_name: &str, json: &str) -> Result<Vec<TeamRecord>, CanonError> {
    let TeamDocument(entries) = serde_json::from_str(json)
        .map_err(|e| CanonError::data_load(source_name, format!("malformed team data: {}", e)))?;

    if entries.is_empty() {
        return Err(CanonError::data_load(source_name, "no team records"));
    }

    Ok(entries
        .into_iter()
        .map(|(key, entry)| {
            let mut record = TeamRecord::new(&key, &entry.display_name, &entry.nickname)
                .with_variants(entry.variants);
            record.conference = entry.conference.filter(|c| !c.trim().is_empty());
            record
        })
        .collect())
}

/// One `<code>.json` document per league in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    data_dir: PathBuf,
}

impl JsonDirSource {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, league: League) -> PathBuf {
        self.data_dir.join(league.config().data_file)
    }
}

impl TeamSource for JsonDirSource {
    fn describe(&self, league: League) -> String {
        self.path_for(league).display().to_string()
    }

    fn load_records(&self, league: League) -> Result<Vec<TeamRecord>, CanonError> {
        let path = self.path_for(league);
        let source_name = path.display().to_string();

        if !path.exists() {
            return Err(CanonError::data_load(source_name, "source missing"));
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| CanonError::data_load(&source_name, format!("unreadable: {}", e)))?;

        let records = parse_records(&source_name, &content)?;
        debug!("Read {} {} records from {}", records.len(), league, source_name);
        Ok(records)
    }
}

/// Team data compiled into the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl BuiltinSource {
    fn document(league: League) -> Option<&'static str> {
        match league {
            League::NBA => Some(include_str!("../data/nba.json")),
            League::NFL => Some(include_str!("../data/nfl.json")),
            _ => None,
        }
    }
}

impl TeamSource for BuiltinSource {
    fn describe(&self, league: League) -> String {
        format!("builtin:{}", league)
    }

    fn load_records(&self, league: League) -> Result<Vec<TeamRecord>, CanonError> {
        let source_name = self.describe(league);
        match Self::document(league) {
            Some(json) => parse_records(&source_name, json),
            None => Err(CanonError::data_load(source_name, "no bundled data for league")),
        }
    }
}

/// Records assembled by the caller.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: HashMap<League, Vec<TeamRecord>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_league(mut self, league: League, records: Vec<TeamRecord>) -> Self {
        self.records.insert(league, records);
        self
    }
}

impl TeamSource for StaticSource {
    fn describe(&self, league: League) -> String {
        format!("static:{}", league)
    }

    fn load_records(&self, league: League) -> Result<Vec<TeamRecord>, CanonError> {
        self.records
            .get(&league)
            .cloned()
            .ok_or_else(|| CanonError::data_load(self.describe(league), "no records for league"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchPolicy;
    use crate::variant_index::VariantIndex;

    #[test]
    fn test_parse_records() {
        let json = r#"{
            "DUKE": {
                "display_name": "Duke Blue Devils",
                "nickname": "Blue Devils",
                "conference": "ACC",
                "variants": ["duke", "blue devils"]
            },
            "GONZ": {
                "display_name": "Gonzaga Bulldogs",
                "nickname": "Bulldogs",
                "variants": ["gonzaga", "zags"]
            }
        }"#;

        let records = parse_records("test", json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "DUKE");
        assert_eq!(records[0].conference.as_deref(), Some("ACC"));
        assert_eq!(records[1].conference, None);
        assert_eq!(records[1].variants, vec!["gonzaga", "zags"]);
    }

    #[test]
    fn test_parse_missing_field() {
        let json = r#"{ "DUKE": { "display_name": "Duke", "variants": [] } }"#;
        let err = parse_records("test", json).unwrap_err();
        match err {
            CanonError::DataLoad { reason, .. } => assert!(reason.contains("nickname")),
            other => panic!("expected DataLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_field_and_bad_shape() {
        let json = r#"{ "DUKE": { "display_name": "Duke", "nickname": "Devils", "variants": [], "mascot": "x" } }"#;
        assert!(matches!(parse_records("test", json), Err(CanonError::DataLoad { .. })));

        assert!(matches!(parse_records("test", "[1, 2]"), Err(CanonError::DataLoad { .. })));
        assert!(matches!(parse_records("test", "{"), Err(CanonError::DataLoad { .. })));
        assert!(matches!(parse_records("test", "{}"), Err(CanonError::DataLoad { .. })));
    }

    #[test]
    fn test_repeated_key_is_kept_for_validation() {
        let json = r#"{
            "DUKE": { "display_name": "Duke", "nickname": "Blue Devils", "variants": [] },
            "DUKE": { "display_name": "Duke Again", "nickname": "Blue Devils", "variants": [] }
        }"#;
        let records = parse_records("test", json).unwrap();
        assert_eq!(records.len(), 2);

        let err = VariantIndex::build(League::NCAAB, records, MatchPolicy::default()).unwrap_err();
        assert!(matches!(err, CanonError::DuplicateKey { .. }));
    }

    #[test]
    fn test_json_dir_missing_file() {
        let source = JsonDirSource::new("/nonexistent/team-data");
        let err = source.load_records(League::NCAAF).unwrap_err();
        match err {
            CanonError::DataLoad { source_name, reason } => {
                assert!(source_name.ends_with("ncaaf.json"));
                assert_eq!(reason, "source missing");
            }
            other => panic!("expected DataLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_leagues_build_cleanly() {
        for league in [League::NBA, League::NFL] {
            let records = BuiltinSource.load_records(league).unwrap();
            let expected = if league == League::NBA { 30 } else { 32 };
            assert_eq!(records.len(), expected);

            let index = VariantIndex::build(league, records, MatchPolicy::default()).unwrap();
            for team in index.teams() {
                for variant in team.indexed_variants() {
                    assert_eq!(index.owner_of(&variant), Some(team.key.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_builtin_without_data() {
        let err = BuiltinSource.load_records(League::NHL).unwrap_err();
        assert!(matches!(err, CanonError::DataLoad { .. }));
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::new().with_league(
            League::NFL,
            vec![TeamRecord::new("PIT", "Pittsburgh Steelers", "Steelers")],
        );
        assert_eq!(source.load_records(League::NFL).unwrap().len(), 1);
        assert!(source.load_records(League::NBA).is_err());
    }
}
