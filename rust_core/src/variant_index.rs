//! Read-only variant index for one league.
//!
//! This module provides:
//! - Validation of team records (keys, display names, usable variants)
//! - Collision detection: a normalized variant belongs to exactly one team
//! - Exact lookup table plus a sorted variant list for the containment and
//!   fuzzy passes

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::error::CanonError;
use crate::matching::{team, MatchPolicy, Resolution};
use crate::types::{League, TeamRecord};
use crate::utils::matching::{char_len, normalize};

/// One normalized variant and the team that owns it.
#[derive(Debug, Clone)]
pub(crate) struct IndexedVariant {
    pub(crate) text: String,
    pub(crate) char_len: usize,
    pub(crate) team: usize,
}

/// Immutable mapping from normalized variant to canonical key within one
/// league. Build once, share freely (`Send + Sync`, no interior mutability).
#[derive(Debug, Clone)]
pub struct VariantIndex {
    league: League,
    policy: MatchPolicy,
    /// Sorted by normalized key
    pub(crate) teams: Vec<TeamRecord>,
    /// Normalized key -> team
    by_key: FxHashMap<String, usize>,
    /// Normalized variant -> team
    pub(crate) exact: FxHashMap<String, usize>,
    /// Every indexed variant, sorted by text for deterministic scans
    pub(crate) variants: Vec<IndexedVariant>,
}

impl VariantIndex {
    /// Build an index from a league's records.
    ///
    /// Fails on an empty or blank key or display name, a record with no
    /// usable variant, a repeated canonical key, or a variant claimed by two
    /// different teams. Input order does not affect the result.
    pub fn build(
        league: League,
        records: Vec<TeamRecord>,
        policy: MatchPolicy,
    ) -> Result<Self, CanonError> {
        let source_name = format!("{} records", league);
        if records.is_empty() {
            return Err(CanonError::data_load(source_name, "no team records"));
        }

        let mut keyed: Vec<(String, TeamRecord)> = Vec::with_capacity(records.len());
        for record in records {
            let norm_key = normalize(&record.key);
            if norm_key.is_empty() {
                return Err(CanonError::data_load(
                    source_name,
                    format!("team '{}' has an empty canonical key", record.display_name),
                ));
            }
            if record.display_name.trim().is_empty() {
                return Err(CanonError::data_load(
                    source_name,
                    format!("team {} has an empty display name", record.key),
                ));
            }
            keyed.push((norm_key, record));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.key.cmp(&b.1.key)));

        let mut teams = Vec::with_capacity(keyed.len());
        let mut by_key: FxHashMap<String, usize> = FxHashMap::default();
        let mut exact: FxHashMap<String, usize> = FxHashMap::default();

        for (norm_key, record) in keyed {
            let idx = teams.len();
            if by_key.insert(norm_key, idx).is_some() {
                return Err(CanonError::DuplicateKey {
                    league,
                    key: record.key,
                });
            }

            for variant in record.indexed_variants() {
                if let Some(&owner) = exact.get(&variant) {
                    let first: &TeamRecord = &teams[owner];
                    return Err(CanonError::DuplicateVariant {
                        league,
                        variant,
                        first: first.key.clone(),
                        second: record.key,
                    });
                }
                exact.insert(variant, idx);
            }
            teams.push(record);
        }

        let mut variants: Vec<IndexedVariant> = exact
            .iter()
            .map(|(text, &team)| IndexedVariant {
                text: text.clone(),
                char_len: char_len(text),
                team,
            })
            .collect();
        variants.sort_by(|a, b| a.text.cmp(&b.text));

        info!(
            "Built {} variant index: {} teams, {} variants",
            league,
            teams.len(),
            variants.len()
        );
        debug!("{} match policy: {:?}", league, policy);

        Ok(Self {
            league,
            policy,
            teams,
            by_key,
            exact,
            variants,
        })
    }

    /// Resolve a raw team string to a canonical key.
    pub fn resolve(&self, raw: &str) -> Resolution {
        team::resolve(self, raw)
    }

    pub fn league(&self) -> League {
        self.league
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Number of teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Number of indexed variants across all teams.
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Teams in canonical key order.
    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    /// Look up a team by canonical key (case and punctuation insensitive).
    pub fn team(&self, key: &str) -> Option<&TeamRecord> {
        self.by_key.get(&normalize(key)).map(|&idx| &self.teams[idx])
    }

    /// Canonical key owning a normalized variant, without any fallback passes.
    pub fn owner_of(&self, variant: &str) -> Option<&str> {
        self.exact
            .get(&normalize(variant))
            .map(|&idx| self.teams[idx].key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duke() -> TeamRecord {
        TeamRecord::new("DUKE", "Duke Blue Devils", "Blue Devils")
            .with_conference("ACC")
            .with_variants(["duke", "duke blue devils", "blue devils"])
    }

    fn unc() -> TeamRecord {
        TeamRecord::new("UNC", "North Carolina Tar Heels", "Tar Heels")
            .with_conference("ACC")
            .with_variants(["north carolina", "unc", "tar heels", "carolina"])
    }

    #[test]
    fn test_build_counts() {
        let index = VariantIndex::build(League::NCAAB, vec![duke(), unc()], MatchPolicy::default())
            .unwrap();

        assert_eq!(index.league(), League::NCAAB);
        assert_eq!(index.len(), 2);
        // duke: duke, duke blue devils, blue devils
        // unc: unc, north carolina tar heels, north carolina, tar heels, carolina
        assert_eq!(index.variant_count(), 8);
        assert_eq!(index.teams()[0].key, "DUKE");
    }

    #[test]
    fn test_team_and_owner_lookup() {
        let index = VariantIndex::build(League::NCAAB, vec![duke(), unc()], MatchPolicy::default())
            .unwrap();

        assert_eq!(index.team("unc").map(|t| t.nickname.as_str()), Some("Tar Heels"));
        assert_eq!(index.owner_of("Blue Devils"), Some("DUKE"));
        assert_eq!(index.owner_of("wake forest"), None);
    }

    #[test]
    fn test_duplicate_variant_rejected() {
        let usc = TeamRecord::new("USC", "South Carolina Gamecocks", "Gamecocks")
            .with_variants(["south carolina", "carolina"]);

        let err = VariantIndex::build(League::NCAAB, vec![unc(), usc], MatchPolicy::default())
            .unwrap_err();

        match err {
            CanonError::DuplicateVariant {
                league,
                variant,
                first,
                second,
            } => {
                assert_eq!(league, League::NCAAB);
                assert_eq!(variant, "carolina");
                assert_eq!(first, "UNC");
                assert_eq!(second, "USC");
            }
            other => panic!("expected DuplicateVariant, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_variant_reported_in_key_order() {
        let a = TeamRecord::new("AAA", "Alpha", "A").with_variants(["shared"]);
        let b = TeamRecord::new("BBB", "Beta", "B").with_variants(["Shared"]);

        let err = VariantIndex::build(League::NBA, vec![b, a], MatchPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            CanonError::DuplicateVariant { ref first, ref second, .. } if first == "AAA" && second == "BBB"
        ));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let again = TeamRecord::new("duke", "Duke Again", "Devils");
        let err = VariantIndex::build(League::NCAAB, vec![duke(), again], MatchPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CanonError::DuplicateKey { .. }));
    }

    #[test]
    fn test_invalid_records_rejected() {
        let blank_key = TeamRecord::new("  ", "Nobody", "None");
        let err = VariantIndex::build(League::NFL, vec![blank_key], MatchPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CanonError::DataLoad { .. }));

        let blank_name = TeamRecord::new("NOBODY", " ", "None");
        let err = VariantIndex::build(League::NFL, vec![blank_name], MatchPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CanonError::DataLoad { .. }));

        let err = VariantIndex::build(League::NFL, Vec::new(), MatchPolicy::default()).unwrap_err();
        assert!(matches!(err, CanonError::DataLoad { .. }));
    }

    #[test]
    fn test_index_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VariantIndex>();
    }
}
