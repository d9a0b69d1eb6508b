//! Identifier scoring strategies
//!
//! Each strategy scores one (query, identifier) pair independently; the
//! identifier's score is the maximum over all strategies that apply.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::similarity::similarity;

/// Which heuristic produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Exact,
    Containment,
    Phonetic,
    Fuzzy,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Exact => "exact",
            Strategy::Containment => "containment",
            Strategy::Phonetic => "phonetic",
            Strategy::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match result from a strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrategyMatch {
    pub score: f64,
    pub strategy: Strategy,
}

impl StrategyMatch {
    fn new(score: f64, strategy: Strategy) -> Self {
        Self { score, strategy }
    }
}

/// Normalized equality
#[inline]
pub fn exact_match(query: &str, identifier: &str, config: &MatchConfig) -> Option<StrategyMatch> {
    (query == identifier).then(|| StrategyMatch::new(config.exact_score, Strategy::Exact))
}

/// One normalized string contains the other.
///
/// Scaled by the shorter/longer length ratio, so "anaperez" in "anaperez95"
/// beats "ana" in "anaperez".
pub fn containment_match(
    query: &str,
    identifier: &str,
    config: &MatchConfig,
) -> Option<StrategyMatch> {
    if query.is_empty() || identifier.is_empty() {
        return None;
    }
    if !identifier.contains(query) && !query.contains(identifier) {
        return None;
    }

    let query_len = query.chars().count();
    let identifier_len = identifier.chars().count();
    let ratio = query_len.min(identifier_len) as f64 / query_len.max(identifier_len) as f64;

    Some(StrategyMatch::new(
        config.containment_base + config.containment_weight * ratio,
        Strategy::Containment,
    ))
}

/// Equal Spanish phonetic codes. The query code must be long enough to mean
/// something.
#[inline]
pub fn phonetic_match(
    query_code: &str,
    identifier_code: &str,
    config: &MatchConfig,
) -> Option<StrategyMatch> {
    (query_code.len() > config.phonetic_min_code_len && query_code == identifier_code)
        .then(|| StrategyMatch::new(config.phonetic_score, Strategy::Phonetic))
}

/// Levenshtein similarity above `fuzzy_min_similarity`
pub fn fuzzy_match(query: &str, identifier: &str, config: &MatchConfig) -> Option<StrategyMatch> {
    let sim = similarity(query, identifier);
    (sim > config.fuzzy_min_similarity).then(|| {
        StrategyMatch::new(
            config.fuzzy_base + config.fuzzy_weight * sim,
            Strategy::Fuzzy,
        )
    })
}

/// Every strategy that applies, in order exact, containment, phonetic, fuzzy.
///
/// Identifiers that normalize to nothing never match.
pub fn applicable(
    query: &str,
    query_code: &str,
    identifier: &str,
    identifier_code: &str,
    config: &MatchConfig,
) -> Vec<StrategyMatch> {
    if query.is_empty() || identifier.is_empty() {
        return Vec::new();
    }

    [
        exact_match(query, identifier, config),
        containment_match(query, identifier, config),
        phonetic_match(query_code, identifier_code, config),
        fuzzy_match(query, identifier, config),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Highest score; earlier strategies win ties.
pub fn best_of(matches: &[StrategyMatch]) -> Option<StrategyMatch> {
    matches.iter().copied().fold(None, |best, m| match best {
        Some(b) if b.score >= m.score => Some(b),
        _ => Some(m),
    })
}
