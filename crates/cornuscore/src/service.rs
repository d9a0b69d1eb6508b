//! Reputation service
//!
//! Wraps a [`ProfileStore`] and a [`Matcher`] behind a `parking_lot::RwLock`.
//! Lookups and rankings take the read lock; review submission takes the write
//! lock, so a submitted review is visible to every later lookup.

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use cornuscore_core::matching::{BestMatch, Matcher, Strategy};
use cornuscore_core::{
    normalize, MemoryStore, NewReview, PersonProfile, ProfileStore, Review,
};

use crate::error::{Error, Result};

/// Number of profiles per ranking list when no limit is given
pub const DEFAULT_RANKING_LIMIT: usize = 5;

const PROFILE_ID_PREFIX: &str = "prof";
const REVIEW_ID_PREFIX: &str = "rev";

/// A resolved profile with the evidence for the match
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub profile: PersonProfile,
    pub score: f64,
    pub strategy: Strategy,
    pub matched_identifier: String,
}

impl LookupResult {
    fn from_match(m: &BestMatch<'_, PersonProfile>) -> Self {
        Self {
            profile: m.candidate.clone(),
            score: m.score,
            strategy: m.strategy,
            matched_identifier: m.identifier.to_string(),
        }
    }
}

/// Most negative and most positive profiles
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub top_negative: Vec<PersonProfile>,
    pub top_positive: Vec<PersonProfile>,
}

struct State<S> {
    store: S,
    next_profile_id: u64,
    next_review_id: u64,
}

impl<S> State<S> {
    fn take_profile_id(&mut self) -> String {
        let id = format!("{}{}", PROFILE_ID_PREFIX, self.next_profile_id);
        self.next_profile_id += 1;
        id
    }

    fn take_review_id(&mut self) -> String {
        let id = format!("{}{}", REVIEW_ID_PREFIX, self.next_review_id);
        self.next_review_id += 1;
        id
    }
}

/// Thread-safe reputation lookup and review service
pub struct ReputationService<S = MemoryStore> {
    state: RwLock<State<S>>,
    matcher: Matcher,
}

impl ReputationService<MemoryStore> {
    /// In-memory service over `profiles`
    pub fn in_memory(profiles: Vec<PersonProfile>, matcher: Matcher) -> Result<Self> {
        Self::new(MemoryStore::with_profiles(profiles)?, matcher)
    }
}

impl<S: ProfileStore> ReputationService<S> {
    /// Create a service over an existing store.
    ///
    /// New ids continue after the highest `prof<n>` / `rev<n>` already stored.
    pub fn new(store: S, matcher: Matcher) -> Result<Self> {
        let profiles = store.profiles()?;
        let next_profile_id =
            next_sequence(profiles.iter().map(|p| p.id.as_str()), PROFILE_ID_PREFIX);
        let next_review_id = next_sequence(
            profiles
                .iter()
                .flat_map(|p| p.reviews.iter().map(|r| r.id.as_str())),
            REVIEW_ID_PREFIX,
        );

        info!(
            profiles = profiles.len(),
            next_profile_id, next_review_id, "Reputation service ready"
        );

        Ok(Self {
            state: RwLock::new(State {
                store,
                next_profile_id,
                next_review_id,
            }),
            matcher,
        })
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Resolve `query` to the best profile above the match threshold.
    ///
    /// `Ok(None)` means no sufficiently confident match.
    pub fn lookup(&self, query: &str) -> Result<Option<LookupResult>> {
        let profiles = self.state.read().store.profiles()?;

        let closest = self.matcher.closest(query, &profiles);
        match &closest {
            Some(m) => debug!(
                query,
                candidate = %m.candidate.id,
                identifier = m.identifier,
                score = m.score,
                strategy = %m.strategy,
                "Closest candidate"
            ),
            None => debug!(query, "No candidate scored"),
        }

        let result = closest
            .filter(|m| self.matcher.is_match(m.score))
            .map(|m| LookupResult::from_match(&m));

        match &result {
            Some(r) => info!(
                query,
                profile = %r.profile.id,
                score = r.score,
                strategy = %r.strategy,
                "Profile matched"
            ),
            None => info!(
                query,
                threshold = self.matcher.config().match_threshold,
                "No confident match"
            ),
        }

        Ok(result)
    }

    /// Every profile scoring at or above the match threshold, best first
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<LookupResult>> {
        let profiles = self.state.read().store.profiles()?;
        let threshold = self.matcher.config().match_threshold;

        let results: Vec<LookupResult> = self
            .matcher
            .rank(query, &profiles, limit, threshold)
            .iter()
            .map(LookupResult::from_match)
            .collect();

        debug!(query, results = results.len(), "Search complete");
        Ok(results)
    }

    /// Record a review for the person identified by `new.person_identifier`.
    ///
    /// Attaches to the profile holding that exact identifier (case-insensitive),
    /// otherwise creates a new profile with it. The review's score comes from
    /// its category.
    pub fn submit_review(&self, new: NewReview) -> Result<Review> {
        let identifier = new.person_identifier.trim().to_string();
        if normalize(&identifier).is_empty() {
            return Err(Error::Validation(
                "person identifier must not be empty".to_string(),
            ));
        }
        if new.text.trim().is_empty() {
            return Err(Error::Validation("review text must not be empty".to_string()));
        }

        let mut state = self.state.write();
        let existing = state.store.find_by_identifier(&identifier)?;
        if existing.is_none() && new.country.trim().is_empty() {
            return Err(Error::Validation(
                "country is required for a new profile".to_string(),
            ));
        }

        let review = Review {
            id: state.take_review_id(),
            category: new.category,
            text: new.text.trim().to_string(),
            score: new.category.score(),
            date: Utc::now(),
            pseudo_author: new.author(),
            confirmations: 0,
            evidence_url: new
                .evidence_url
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            person_reviewed: Some(identifier.clone()),
        };

        match existing {
            Some(mut profile) => {
                profile.add_review(review.clone());
                info!(
                    profile = %profile.id,
                    review = %review.id,
                    category = %review.category,
                    total_score = profile.total_score,
                    "Review added to existing profile"
                );
                state.store.update(profile)?;
            }
            None => {
                let id = state.take_profile_id();
                let mut profile =
                    PersonProfile::new(id, vec![identifier], new.country.trim());
                profile.add_review(review.clone());
                info!(
                    profile = %profile.id,
                    review = %review.id,
                    category = %review.category,
                    "Created profile for new review"
                );
                state.store.put(profile)?;
            }
        }

        Ok(review)
    }

    /// Profiles ordered by total score.
    ///
    /// `top_negative` ascends from the lowest score; `top_positive` is the
    /// same ordering reversed. Each holds at most `limit` profiles.
    pub fn rankings(&self, limit: usize) -> Result<Rankings> {
        let mut sorted = self.state.read().store.profiles()?;
        sorted.sort_by_key(|p| p.total_score);

        let top_negative = sorted.iter().take(limit).cloned().collect();
        let top_positive = sorted.iter().rev().take(limit).cloned().collect();

        Ok(Rankings {
            top_negative,
            top_positive,
        })
    }

    /// All profiles, in store order
    pub fn profiles(&self) -> Result<Vec<PersonProfile>> {
        Ok(self.state.read().store.profiles()?)
    }
}

/// One past the highest numeric suffix among ids with `prefix`, or 1.
fn next_sequence<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
}
