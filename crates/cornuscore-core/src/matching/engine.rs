//! Matcher - resolve a free-text query to the best candidate profile

use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::strategies::{self, Strategy, StrategyMatch};
use crate::config::MatchConfig;
use crate::normalize::normalize;
use crate::phonetic;

/// Anything that can be found by one of several identifiers
pub trait Candidate: Sync {
    fn identifiers(&self) -> &[String];
}

impl Candidate for Vec<String> {
    fn identifiers(&self) -> &[String] {
        self
    }
}

/// A query with its normalized form and phonetic code computed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    raw: String,
    normalized: String,
    phonetic: String,
}

impl PreparedQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: normalize(raw),
            phonetic: phonetic::encode(raw),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn phonetic(&self) -> &str {
        &self.phonetic
    }

    /// Queries that normalize to nothing match nothing
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Best-scoring candidate for a query
#[derive(Debug, Clone)]
pub struct BestMatch<'a, C> {
    pub candidate: &'a C,
    /// Position of `candidate` in the input slice
    pub index: usize,
    pub score: f64,
    pub strategy: Strategy,
    /// The identifier that produced `score`
    pub identifier: &'a str,
}

/// Per-strategy breakdown for one identifier
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub query: String,
    pub normalized_query: String,
    pub query_phonetic: String,
    pub identifier: String,
    pub normalized_identifier: String,
    pub identifier_phonetic: String,
    pub strategies: Vec<StrategyMatch>,
    pub best: Option<StrategyMatch>,
    pub is_match: bool,
}

/// Identifier-level score for one candidate
#[derive(Debug, Clone, Copy)]
struct Scored {
    identifier: usize,
    hit: StrategyMatch,
}

/// Identity matcher.
///
/// Stateless apart from its configuration, so a single instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    /// Create a matcher with the default scoring constants
    pub fn new() -> Self {
        Self::with_config(MatchConfig::default())
    }

    pub fn with_config(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Whether `score` is high enough to report as a match
    pub fn is_match(&self, score: f64) -> bool {
        score >= self.config.match_threshold
    }

    /// Score one identifier against a prepared query
    pub fn score_identifier(
        &self,
        query: &PreparedQuery,
        identifier: &str,
    ) -> Option<StrategyMatch> {
        let normalized = normalize(identifier);
        let code = phonetic::encode(identifier);
        strategies::best_of(&strategies::applicable(
            query.normalized(),
            query.phonetic(),
            &normalized,
            &code,
            &self.config,
        ))
    }

    /// Highest identifier score for a candidate with the identifier that won.
    ///
    /// Earlier identifiers win ties.
    pub fn score_candidate<C: Candidate>(
        &self,
        query: &PreparedQuery,
        candidate: &C,
    ) -> Option<(usize, StrategyMatch)> {
        self.score_one(query, candidate).map(|s| (s.identifier, s.hit))
    }

    /// The best candidate if its score clears `match_threshold`.
    ///
    /// `None` means "no sufficiently confident match", including the empty
    /// query and empty candidate list cases.
    pub fn best_match<'a, C: Candidate>(
        &self,
        query: &str,
        candidates: &'a [C],
    ) -> Option<BestMatch<'a, C>> {
        self.closest(query, candidates)
            .filter(|m| self.is_match(m.score))
    }

    /// The highest-scoring candidate regardless of threshold.
    ///
    /// Earlier candidates win ties.
    pub fn closest<'a, C: Candidate>(
        &self,
        query: &str,
        candidates: &'a [C],
    ) -> Option<BestMatch<'a, C>> {
        let prepared = PreparedQuery::new(query);
        if prepared.is_empty() {
            return None;
        }

        let scored = self.score_all(&prepared, candidates);

        let mut best: Option<(usize, Scored)> = None;
        for (index, s) in scored.into_iter().enumerate() {
            let Some(s) = s else { continue };
            let best_score = best.map(|(_, b)| b.hit.score).unwrap_or(0.0);
            if s.hit.score > best_score {
                best = Some((index, s));
            }
        }

        best.map(|(index, s)| self.build_match(candidates, index, s))
    }

    /// Candidates scoring at least `min_score`, best first.
    ///
    /// Equal scores keep input order.
    pub fn rank<'a, C: Candidate>(
        &self,
        query: &str,
        candidates: &'a [C],
        limit: usize,
        min_score: f64,
    ) -> Vec<BestMatch<'a, C>> {
        let prepared = PreparedQuery::new(query);
        if prepared.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<BestMatch<'a, C>> = self
            .score_all(&prepared, candidates)
            .into_iter()
            .enumerate()
            .filter_map(|(index, s)| s.map(|s| self.build_match(candidates, index, s)))
            .filter(|m| m.score > 0.0 && m.score >= min_score)
            .collect();

        // Stable sort, so ties stay in input order
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked.truncate(limit);
        ranked
    }

    /// Full strategy breakdown for a single (query, identifier) pair
    pub fn explain(&self, query: &str, identifier: &str) -> Explanation {
        let prepared = PreparedQuery::new(query);
        let normalized_identifier = normalize(identifier);
        let identifier_phonetic = phonetic::encode(identifier);

        let strategies = strategies::applicable(
            prepared.normalized(),
            prepared.phonetic(),
            &normalized_identifier,
            &identifier_phonetic,
            &self.config,
        );
        let best = strategies::best_of(&strategies);
        let is_match = best.map(|b| self.is_match(b.score)).unwrap_or(false);

        Explanation {
            query: query.to_string(),
            normalized_query: prepared.normalized().to_string(),
            query_phonetic: prepared.phonetic().to_string(),
            identifier: identifier.to_string(),
            normalized_identifier,
            identifier_phonetic,
            strategies,
            best,
            is_match,
        }
    }

    fn build_match<'a, C: Candidate>(
        &self,
        candidates: &'a [C],
        index: usize,
        s: Scored,
    ) -> BestMatch<'a, C> {
        let candidate = &candidates[index];
        BestMatch {
            candidate,
            index,
            score: s.hit.score,
            strategy: s.hit.strategy,
            identifier: candidate.identifiers()[s.identifier].as_str(),
        }
    }

    /// Score a single candidate across all its identifiers
    fn score_one<C: Candidate>(&self, query: &PreparedQuery, candidate: &C) -> Option<Scored> {
        let mut best: Option<Scored> = None;
        for (idx, identifier) in candidate.identifiers().iter().enumerate() {
            if let Some(hit) = self.score_identifier(query, identifier) {
                if best.map(|b| hit.score > b.hit.score).unwrap_or(true) {
                    best = Some(Scored {
                        identifier: idx,
                        hit,
                    });
                }
            }
        }
        best
    }

    /// Score every candidate - parallel above the threshold with the
    /// `parallel` feature. Output order always matches input order.
    #[cfg(feature = "parallel")]
    fn score_all<C: Candidate>(
        &self,
        query: &PreparedQuery,
        candidates: &[C],
    ) -> Vec<Option<Scored>> {
        if candidates.len() >= self.config.parallel_threshold {
            candidates
                .par_iter()
                .map(|c| self.score_one(query, c))
                .collect()
        } else {
            self.score_sequential(query, candidates)
        }
    }

    /// Score every candidate sequentially
    #[cfg(not(feature = "parallel"))]
    fn score_all<C: Candidate>(
        &self,
        query: &PreparedQuery,
        candidates: &[C],
    ) -> Vec<Option<Scored>> {
        self.score_sequential(query, candidates)
    }

    fn score_sequential<C: Candidate>(
        &self,
        query: &PreparedQuery,
        candidates: &[C],
    ) -> Vec<Option<Scored>> {
        candidates
            .iter()
            .map(|c| self.score_one(query, c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn test_candidates() -> Vec<Vec<String>> {
        vec![
            ids(&["ana perez", "anita.perez95", "1122334455"]),
            ids(&["carlos gomez", "charlyg", "5544332211"]),
            ids(&["Cintia Fernandez", "sintiafer"]),
        ]
    }

    #[test]
    fn test_prepared_query() {
        let q = PreparedQuery::new("  Cintia.Fernández ");
        assert_eq!(q.raw(), "  Cintia.Fernández ");
        assert_eq!(q.normalized(), "cintiafernández");
        assert_eq!(q.phonetic(), "sintiafernandes");
        assert!(!q.is_empty());
        assert!(PreparedQuery::new(" ._ ").is_empty());
    }

    #[test]
    fn test_exact_match_wins() {
        let candidates = test_candidates();
        let best = Matcher::new().best_match("Ana Perez", &candidates).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.score, 100.0);
        assert_eq!(best.strategy, Strategy::Exact);
        assert_eq!(best.identifier, "ana perez");
    }

    #[test]
    fn test_matches_handle() {
        let candidates = test_candidates();
        let best = Matcher::new().best_match("@charlyg", &candidates).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.identifier, "charlyg");
        assert_eq!(best.strategy, Strategy::Containment);
    }

    #[test]
    fn test_phonetic_variant() {
        let candidates = vec![ids(&["pedro navaja"]), ids(&["sintiafer"])];
        let best = Matcher::new().best_match("cintiafer", &candidates).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.identifier, "sintiafer");
        assert_eq!(best.strategy, Strategy::Phonetic);
        assert_eq!(best.score, 80.0);
    }

    #[test]
    fn test_below_threshold() {
        let candidates = test_candidates();
        let matcher = Matcher::new();
        assert!(matcher.best_match("xyz123notfound", &candidates).is_none());
        assert!(matcher.best_match("totallyunrelatedstring", &candidates).is_none());
    }

    #[test]
    fn test_empty_inputs() {
        let matcher = Matcher::new();
        let candidates = test_candidates();
        let none: Vec<Vec<String>> = Vec::new();
        assert!(matcher.best_match("", &candidates).is_none());
        assert!(matcher.best_match("  -  ", &candidates).is_none());
        assert!(matcher.best_match("ana perez", &none).is_none());
        assert!(matcher.best_match("ana perez", &[Vec::<String>::new()]).is_none());
    }

    #[test]
    fn test_earlier_candidate_wins_tie() {
        let candidates = vec![ids(&["sofilu"]), ids(&["sofi.lu"])];
        let best = Matcher::new().best_match("sofilu", &candidates).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let candidates = vec![ids(&["anaperez"])];
        // Containment 70 + 25 * 3/8
        let strict = Matcher::with_config(MatchConfig {
            match_threshold: 80.0,
            ..Default::default()
        });
        assert!(strict.best_match("ana", &candidates).is_none());
        assert!(strict.closest("ana", &candidates).is_some());
        assert!(Matcher::new().best_match("ana", &candidates).is_some());
    }

    #[test]
    fn test_rank_orders_and_limits() {
        let candidates = vec![
            ids(&["ana"]),
            ids(&["carlos gomez"]),
            ids(&["anaperez95"]),
            ids(&["anaperez"]),
        ];
        let ranked = Matcher::new().rank("anaperez", &candidates, 10, 60.0);
        let order: Vec<usize> = ranked.iter().map(|m| m.index).collect();
        assert_eq!(order, vec![3, 2, 0]);

        let top = Matcher::new().rank("anaperez", &candidates, 1, 60.0);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].index, 3);
    }

    #[test]
    fn test_explain() {
        let matcher = Matcher::new();
        let e = matcher.explain("Sintia Fernandez", "Cintia Fernandez");
        assert_eq!(e.normalized_query, "sintiafernandez");
        assert_eq!(e.normalized_identifier, "cintiafernandez");
        assert_eq!(e.query_phonetic, e.identifier_phonetic);
        let kinds: Vec<Strategy> = e.strategies.iter().map(|s| s.strategy).collect();
        assert_eq!(kinds, vec![Strategy::Phonetic, Strategy::Fuzzy]);
        assert_eq!(e.best.unwrap().strategy, Strategy::Phonetic);
        assert!(e.is_match);

        let miss = matcher.explain("totallyunrelatedstring", "ana perez");
        assert!(miss.strategies.is_empty());
        assert!(miss.best.is_none());
        assert!(!miss.is_match);
    }

    #[test]
    fn test_score_candidate_reports_identifier() {
        let matcher = Matcher::new();
        let query = PreparedQuery::new("anita perez 95");
        let (idx, hit) = matcher
            .score_candidate(&query, &ids(&["ana perez", "anita.perez95"]))
            .unwrap();
        assert_eq!(idx, 1);
        assert_eq!(hit.strategy, Strategy::Exact);
    }

    #[test]
    fn test_is_match_boundary() {
        let matcher = Matcher::new();
        assert!(matcher.is_match(60.0));
        assert!(matcher.is_match(100.0));
        assert!(!matcher.is_match(59.99));
        assert!(!matcher.is_match(0.0));

        // best_match and closest agree with is_match
        let candidates = vec![ids(&["anaperez"])];
        let strict = Matcher::with_config(MatchConfig {
            match_threshold: 80.0,
            ..Default::default()
        });
        let closest = strict.closest("ana", &candidates).unwrap();
        assert!(!strict.is_match(closest.score));
        assert!(strict.best_match("ana", &candidates).is_none());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let mut candidates: Vec<Vec<String>> = (0..48)
            .map(|i| vec![format!("persona{}", i % 12), format!("x{}y", i)])
            .collect();
        candidates.push(ids(&["Cintia Fernandez"]));
        candidates.push(ids(&["persona"]));
        candidates.push(ids(&["sintiafer"]));

        let parallel = Matcher::with_config(MatchConfig {
            parallel_threshold: 1,
            ..Default::default()
        });
        let sequential = Matcher::with_config(MatchConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        });

        let summary = |m: &BestMatch<'_, Vec<String>>| {
            (m.index, m.score, m.strategy, m.identifier.to_string())
        };

        for query in ["persona1", "cintiafer", "persona", "x1y", "zzz"] {
            assert_eq!(
                parallel.best_match(query, &candidates).map(|m| summary(&m)),
                sequential.best_match(query, &candidates).map(|m| summary(&m)),
                "best_match differs for {:?}",
                query
            );

            let par: Vec<_> = parallel
                .rank(query, &candidates, 100, 0.0)
                .iter()
                .map(summary)
                .collect();
            let seq: Vec<_> = sequential
                .rank(query, &candidates, 100, 0.0)
                .iter()
                .map(summary)
                .collect();
            assert_eq!(par, seq, "rank differs for {:?}", query);
        }

        // Ties across repeated identifiers resolve to the earliest candidate
        let tied = parallel.best_match("persona1", &candidates).unwrap();
        assert_eq!(tied.index, 1);
        assert_eq!(tied.score, 100.0);
    }
}
