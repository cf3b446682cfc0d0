//! Team resolution passes: exact, containment, fuzzy.
//!
//! Exact always beats containment, which always beats fuzzy. Within the
//! containment and fuzzy passes, ties between different teams go to the
//! display name that sorts first, then the canonical key, so repeated
//! grading runs produce identical output.

use std::cmp::Ordering;
use tracing::debug;

use super::{MatchMethod, Resolution, TeamMatch};
use crate::types::TeamRecord;
use crate::utils::matching::{char_len, contains_phrase, normalize};
use crate::variant_index::{IndexedVariant, VariantIndex};

/// Similarity scores are compared with this slack so that values such as
/// `1 - 1/5` land on the inclusive side of a 0.8 threshold.
const SCORE_EPSILON: f64 = 1e-9;

/// A containment or fuzzy candidate.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    variant: &'a IndexedVariant,
    /// Primary rank: variant length for containment, unused for fuzzy
    rank: usize,
    score: f64,
}

/// Resolve a raw team string against an index.
pub fn resolve(index: &VariantIndex, raw: &str) -> Resolution {
    let norm = normalize(raw);
    if norm.is_empty() {
        return Resolution::Unresolved;
    }

    // 1. Exact variant
    if let Some(&team) = index.exact.get(&norm) {
        return matched(index, team, MatchMethod::Exact, 1.0, norm);
    }

    let input_len = char_len(&norm);

    // 2. Word-aligned containment
    if let Some(c) = best_substring(index, &norm, input_len) {
        return matched(
            index,
            c.variant.team,
            MatchMethod::Substring,
            c.score,
            c.variant.text.clone(),
        );
    }

    // 3. Fuzzy
    if let Some(c) = best_fuzzy(index, &norm, input_len) {
        return matched(
            index,
            c.variant.team,
            MatchMethod::Fuzzy,
            c.score,
            c.variant.text.clone(),
        );
    }

    debug!("No {} team for '{}'", index.league(), raw);
    Resolution::Unresolved
}

fn matched(
    index: &VariantIndex,
    team: usize,
    method: MatchMethod,
    score: f64,
    variant: String,
) -> Resolution {
    let record = &index.teams[team];
    Resolution::Matched(TeamMatch {
        key: record.key.clone(),
        display_name: record.display_name.clone(),
        method,
        score,
        variant,
    })
}

/// Either the variant occurs inside the input or the input inside the
/// variant, on word boundaries. The contained string must be at least
/// `min_substring_len` chars. The longer variant wins in both directions;
/// the reported score is the contained share of the container.
fn best_substring<'a>(
    index: &'a VariantIndex,
    norm: &str,
    input_len: usize,
) -> Option<Candidate<'a>> {
    let min_len = index.policy().min_substring_len.max(1);
    let mut best: Option<Candidate<'a>> = None;

    for variant in &index.variants {
        let (contained, container) = if variant.char_len < input_len {
            if !contains_phrase(norm, &variant.text) {
                continue;
            }
            (variant.char_len, input_len)
        } else if input_len < variant.char_len {
            if !contains_phrase(&variant.text, norm) {
                continue;
            }
            (input_len, variant.char_len)
        } else {
            continue;
        };

        if contained < min_len {
            continue;
        }

        let candidate = Candidate {
            variant,
            rank: variant.char_len,
            score: contained as f64 / container as f64,
        };
        if is_better(index, &candidate, best.as_ref()) {
            best = Some(candidate);
        }
    }

    best
}

/// Best similarity at or above the policy threshold.
fn best_fuzzy<'a>(index: &'a VariantIndex, norm: &str, input_len: usize) -> Option<Candidate<'a>> {
    let policy = index.policy();
    let threshold = policy.fuzzy_threshold - SCORE_EPSILON;
    let mut best: Option<Candidate<'a>> = None;

    for variant in &index.variants {
        if let Some(bound) = policy.fuzzy_metric.upper_bound(input_len, variant.char_len) {
            if bound < threshold {
                continue;
            }
        }

        let score = policy.fuzzy_metric.similarity(norm, &variant.text);
        if score < threshold {
            continue;
        }

        let candidate = Candidate {
            variant,
            rank: 0,
            score,
        };
        if is_better(index, &candidate, best.as_ref()) {
            best = Some(candidate);
        }
    }

    best
}

fn is_better(index: &VariantIndex, candidate: &Candidate<'_>, best: Option<&Candidate<'_>>) -> bool {
    let Some(best) = best else {
        return true;
    };

    let by_quality = candidate.rank.cmp(&best.rank).then_with(|| {
        if (candidate.score - best.score).abs() <= SCORE_EPSILON {
            Ordering::Equal
        } else if candidate.score > best.score {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    });

    match by_quality {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            // Variants are scanned in sorted order, so for the same team the
            // first one seen is kept.
            let a = &index.teams[candidate.variant.team];
            let b = &index.teams[best.variant.team];
            display_order(a, b) == Ordering::Less
        }
    }
}

/// Alphabetical display-name order ignoring case, then raw display name,
/// then canonical key.
fn display_order(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    a.display_name
        .to_lowercase()
        .cmp(&b.display_name.to_lowercase())
        .then_with(|| a.display_name.cmp(&b.display_name))
        .then_with(|| a.key.cmp(&b.key))
}
