//! Profile, review, and reputation types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::Candidate;

/// Kind of community review. Each category carries a fixed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewCategory {
    Infidelity,
    Theft,
    Betrayal,
    Toxic,
    Positive,
}

impl ReviewCategory {
    pub const ALL: [ReviewCategory; 5] = [
        ReviewCategory::Infidelity,
        ReviewCategory::Theft,
        ReviewCategory::Betrayal,
        ReviewCategory::Toxic,
        ReviewCategory::Positive,
    ];

    /// Score contribution of a review in this category
    pub fn score(&self) -> i64 {
        match self {
            ReviewCategory::Infidelity => -3,
            ReviewCategory::Theft => -4,
            ReviewCategory::Betrayal => -3,
            ReviewCategory::Toxic => -2,
            ReviewCategory::Positive => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewCategory::Infidelity => "INFIDELITY",
            ReviewCategory::Theft => "THEFT",
            ReviewCategory::Betrayal => "BETRAYAL",
            ReviewCategory::Toxic => "TOXIC",
            ReviewCategory::Positive => "POSITIVE",
        }
    }
}

impl fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized review category name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown review category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ReviewCategory {
    type Err = UnknownCategory;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Overall standing derived from a profile's total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReputationLevel {
    Positive,
    Warning,
    Risk,
    /// No profile or no reviews to judge from
    Unknown,
}

impl ReputationLevel {
    /// `> 0` is Positive, `> -3` is Warning, anything lower is Risk
    pub fn from_score(total_score: i64) -> Self {
        if total_score > 0 {
            ReputationLevel::Positive
        } else if total_score > -3 {
            ReputationLevel::Warning
        } else {
            ReputationLevel::Risk
        }
    }
}

/// A single community review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub category: ReviewCategory,
    pub text: String,
    pub score: i64,
    pub date: DateTime<Utc>,
    pub pseudo_author: String,
    pub confirmations: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_reviewed: Option<String>,
}

/// A review as submitted, before it is assigned an id and attached to a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    /// Name, handle or phone number of the person reviewed
    pub person_identifier: String,
    /// Used when the review creates a new profile
    pub country: String,
    pub category: ReviewCategory,
    pub text: String,
    #[serde(default)]
    pub pseudo_author: Option<String>,
    #[serde(default)]
    pub reviewer_instagram: Option<String>,
    #[serde(default)]
    pub evidence_url: Option<String>,
}

impl NewReview {
    /// Display name for the author: explicit pseudonym, then Instagram
    /// handle, then "Anónimo".
    pub fn author(&self) -> String {
        [&self.pseudo_author, &self.reviewer_instagram]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
            .to_string()
    }
}

/// Author shown for reviews submitted without a name
pub const ANONYMOUS_AUTHOR: &str = "Anónimo";

/// A reviewed person and their aggregated reputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub id: String,
    /// e.g. `["John Doe", "johndoe", "123456789"]`
    pub identifiers: Vec<String>,
    pub country: String,
    pub total_score: i64,
    pub reputation: ReputationLevel,
    pub reviews: Vec<Review>,
}

impl PersonProfile {
    /// Create a profile with no reviews
    pub fn new(
        id: impl Into<String>,
        identifiers: Vec<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            identifiers,
            country: country.into(),
            total_score: 0,
            reputation: ReputationLevel::from_score(0),
            reviews: Vec::new(),
        }
    }

    /// Create a profile and derive its totals from `reviews`
    pub fn with_reviews(
        id: impl Into<String>,
        identifiers: Vec<String>,
        country: impl Into<String>,
        reviews: Vec<Review>,
    ) -> Self {
        let mut profile = Self::new(id, identifiers, country);
        profile.reviews = reviews;
        profile.recompute();
        profile
    }

    /// Append a review and update score and reputation
    pub fn add_review(&mut self, review: Review) {
        self.total_score += review.score;
        self.reviews.push(review);
        self.reputation = ReputationLevel::from_score(self.total_score);
    }

    /// Recalculate total score and reputation from the review list
    pub fn recompute(&mut self) {
        self.total_score = self.reviews.iter().map(|r| r.score).sum();
        self.reputation = ReputationLevel::from_score(self.total_score);
    }

    /// Case-insensitive equality against any identifier, ignoring
    /// surrounding whitespace in `raw`.
    pub fn has_identifier(&self, raw: &str) -> bool {
        let wanted = raw.trim().to_lowercase();
        self.identifiers.iter().any(|id| id.to_lowercase() == wanted)
    }
}

impl Candidate for PersonProfile {
    fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn review(id: &str, category: ReviewCategory, score: i64) -> Review {
        Review {
            id: id.to_string(),
            category,
            text: "text".to_string(),
            score,
            date: DateTime::<Utc>::default(),
            pseudo_author: "user1".to_string(),
            confirmations: 0,
            evidence_url: None,
            person_reviewed: None,
        }
    }

    #[test]
    fn test_reputation_thresholds() {
        assert_eq!(ReputationLevel::from_score(1), ReputationLevel::Positive);
        assert_eq!(ReputationLevel::from_score(0), ReputationLevel::Warning);
        assert_eq!(ReputationLevel::from_score(-2), ReputationLevel::Warning);
        assert_eq!(ReputationLevel::from_score(-3), ReputationLevel::Risk);
        assert_eq!(ReputationLevel::from_score(-40), ReputationLevel::Risk);
    }

    #[test]
    fn test_category_scores() {
        assert_eq!(ReviewCategory::Theft.score(), -4);
        assert_eq!(ReviewCategory::Positive.score(), 2);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("toxic".parse::<ReviewCategory>(), Ok(ReviewCategory::Toxic));
        assert_eq!(" BETRAYAL ".parse::<ReviewCategory>(), Ok(ReviewCategory::Betrayal));
        assert_eq!(
            "gossip".parse::<ReviewCategory>(),
            Err(UnknownCategory("gossip".to_string()))
        );
    }

    #[test]
    fn test_add_review_updates_reputation() {
        let mut profile = PersonProfile::new("prof1", vec!["ana perez".into()], "Argentina");
        profile.add_review(review("rev1", ReviewCategory::Positive, 2));
        assert_eq!(profile.total_score, 2);
        assert_eq!(profile.reputation, ReputationLevel::Positive);

        profile.add_review(review("rev2", ReviewCategory::Theft, -4));
        assert_eq!(profile.total_score, -2);
        assert_eq!(profile.reputation, ReputationLevel::Warning);

        profile.add_review(review("rev3", ReviewCategory::Infidelity, -3));
        assert_eq!(profile.total_score, -5);
        assert_eq!(profile.reputation, ReputationLevel::Risk);
        assert_eq!(profile.reviews.len(), 3);
    }

    #[test]
    fn test_has_identifier() {
        let profile = PersonProfile::new(
            "prof6",
            vec!["Cintia Fernandez".into(), "sintiafer".into()],
            "Chile",
        );
        assert!(profile.has_identifier("  cintia fernandez "));
        assert!(profile.has_identifier("SINTIAFER"));
        assert!(!profile.has_identifier("cintia.fernandez"));
    }

    #[test]
    fn test_author_fallback() {
        let mut new = NewReview {
            person_identifier: "ana perez".into(),
            country: "Argentina".into(),
            category: ReviewCategory::Toxic,
            text: "text".into(),
            pseudo_author: None,
            reviewer_instagram: None,
            evidence_url: None,
        };
        assert_eq!(new.author(), ANONYMOUS_AUTHOR);

        new.reviewer_instagram = Some("insta_user".into());
        assert_eq!(new.author(), "insta_user");

        new.pseudo_author = Some("user123".into());
        assert_eq!(new.author(), "user123");

        new.pseudo_author = Some("   ".into());
        assert_eq!(new.author(), "insta_user");
    }

    #[test]
    fn test_serde_shape() {
        let profile = PersonProfile::with_reviews(
            "prof5",
            vec!["pedro navaja".into()],
            "Perú",
            vec![review("rev9", ReviewCategory::Toxic, -2)],
        );
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["totalScore"], -2);
        assert_eq!(json["reputation"], "WARNING");
        assert_eq!(json["reviews"][0]["category"], "TOXIC");
        assert_eq!(json["reviews"][0]["pseudoAuthor"], "user1");
        assert!(json["reviews"][0].get("evidenceUrl").is_none());

        let back: PersonProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
