//! League and team record types shared by every canonicalization stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CanonError;
use crate::utils::matching::normalize;

/// Supported leagues. Teams never cross-match between leagues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    NBA,
    NCAAB,
    NFL,
    NCAAF,
    NHL,
    MLB,
}

impl League {
    pub const ALL: [League; 6] = [
        League::NBA,
        League::NCAAB,
        League::NFL,
        League::NCAAF,
        League::NHL,
        League::MLB,
    ];

    /// Lowercase league code, also used as the data file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            League::NBA => "nba",
            League::NCAAB => "ncaab",
            League::NFL => "nfl",
            League::NCAAF => "ncaaf",
            League::NHL => "nhl",
            League::MLB => "mlb",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = CanonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "nba" => Ok(League::NBA),
            "ncaab" | "ncaam" | "cbb" | "college basketball" => Ok(League::NCAAB),
            "nfl" => Ok(League::NFL),
            "ncaaf" | "cfb" | "college football" => Ok(League::NCAAF),
            "nhl" => Ok(League::NHL),
            "mlb" => Ok(League::MLB),
            _ => Err(CanonError::UnknownLeague(s.trim().to_string())),
        }
    }
}

/// One real-world team within a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Canonical key, unique within the league (e.g. "DUKE", "PIT")
    pub key: String,
    pub display_name: String,
    pub nickname: String,
    /// Conference or division
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    /// Raw variant strings as they appear in external feeds
    #[serde(default)]
    pub variants: Vec<String>,
}

impl TeamRecord {
    pub fn new(key: &str, display_name: &str, nickname: &str) -> Self {
        Self {
            key: key.trim().to_string(),
            display_name: display_name.trim().to_string(),
            nickname: nickname.trim().to_string(),
            conference: None,
            variants: Vec::new(),
        }
    }

    pub fn with_conference(mut self, conference: &str) -> Self {
        self.conference = Some(conference.trim().to_string());
        self
    }

    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants.extend(variants.into_iter().map(Into::into));
        self
    }

    /// Normalized strings this team is indexed under: its key, its display
    /// name, then every listed variant. Order is preserved, duplicates and
    /// strings that normalize to nothing are dropped.
    ///
    /// The nickname is not included; mascots are frequently shared between
    /// teams and must be listed as a variant explicitly.
    pub fn indexed_variants(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.variants.len() + 2);
        let raw = [self.key.as_str(), self.display_name.as_str()]
            .into_iter()
            .chain(self.variants.iter().map(String::as_str));
        for s in raw {
            let norm = normalize(s);
            if !norm.is_empty() && !out.contains(&norm) {
                out.push(norm);
            }
        }
        out
    }
}
