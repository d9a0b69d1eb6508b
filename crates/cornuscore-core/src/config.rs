//! Match scoring configuration
//!
//! Every constant used by the identity matcher lives here. The defaults are
//! hand-tuned and can be overridden from JSON or `CORNUSCORE_*` environment
//! variables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a [`MatchConfig`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric field is outside its allowed range
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An environment variable could not be parsed
    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    /// Malformed JSON config
    #[error("invalid match config: {0}")]
    Parse(String),
}

/// Scoring constants for the identity matcher.
///
/// Scores are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum best score required to report a match
    pub match_threshold: f64,
    /// Score for normalized equality
    pub exact_score: f64,
    /// Base score when one normalized string contains the other
    pub containment_base: f64,
    /// Added to `containment_base`, scaled by the shorter/longer length ratio
    pub containment_weight: f64,
    /// Score when phonetic codes are equal
    pub phonetic_score: f64,
    /// The query's phonetic code must be longer than this
    pub phonetic_min_code_len: usize,
    /// Edit similarity must exceed this for a fuzzy score
    pub fuzzy_min_similarity: f64,
    /// Base fuzzy score
    pub fuzzy_base: f64,
    /// Added to `fuzzy_base`, scaled by edit similarity
    pub fuzzy_weight: f64,
    /// Candidate count at which scoring switches to rayon (`parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            match_threshold: 60.0,
            exact_score: 100.0,
            containment_base: 70.0,
            containment_weight: 25.0,
            phonetic_score: 80.0,
            phonetic_min_code_len: 2,
            fuzzy_min_similarity: 0.75,
            fuzzy_base: 40.0,
            fuzzy_weight: 30.0,
            parallel_threshold: 1000,
        }
    }
}

impl MatchConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `CORNUSCORE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (e.g. the process environment).
    ///
    /// Recognized keys: `CORNUSCORE_MATCH_THRESHOLD`, `CORNUSCORE_EXACT_SCORE`,
    /// `CORNUSCORE_CONTAINMENT_BASE`, `CORNUSCORE_CONTAINMENT_WEIGHT`,
    /// `CORNUSCORE_PHONETIC_SCORE`, `CORNUSCORE_PHONETIC_MIN_CODE_LEN`,
    /// `CORNUSCORE_FUZZY_MIN_SIMILARITY`, `CORNUSCORE_FUZZY_BASE`,
    /// `CORNUSCORE_FUZZY_WEIGHT`, `CORNUSCORE_PARALLEL_THRESHOLD`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_field(&lookup, "CORNUSCORE_MATCH_THRESHOLD", &mut self.match_threshold)?;
        override_field(&lookup, "CORNUSCORE_EXACT_SCORE", &mut self.exact_score)?;
        override_field(&lookup, "CORNUSCORE_CONTAINMENT_BASE", &mut self.containment_base)?;
        override_field(
            &lookup,
            "CORNUSCORE_CONTAINMENT_WEIGHT",
            &mut self.containment_weight,
        )?;
        override_field(&lookup, "CORNUSCORE_PHONETIC_SCORE", &mut self.phonetic_score)?;
        override_field(
            &lookup,
            "CORNUSCORE_PHONETIC_MIN_CODE_LEN",
            &mut self.phonetic_min_code_len,
        )?;
        override_field(
            &lookup,
            "CORNUSCORE_FUZZY_MIN_SIMILARITY",
            &mut self.fuzzy_min_similarity,
        )?;
        override_field(&lookup, "CORNUSCORE_FUZZY_BASE", &mut self.fuzzy_base)?;
        override_field(&lookup, "CORNUSCORE_FUZZY_WEIGHT", &mut self.fuzzy_weight)?;
        override_field(
            &lookup,
            "CORNUSCORE_PARALLEL_THRESHOLD",
            &mut self.parallel_threshold,
        )?;

        self.validate()?;
        Ok(self)
    }

    /// Check that scores are on the 0-100 scale and ratios within [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("match_threshold", self.match_threshold, 0.0, 100.0)?;
        check_range("exact_score", self.exact_score, 0.0, 100.0)?;
        check_range("phonetic_score", self.phonetic_score, 0.0, 100.0)?;
        check_range("fuzzy_min_similarity", self.fuzzy_min_similarity, 0.0, 1.0)?;
        check_range("containment_base", self.containment_base, 0.0, 100.0)?;
        check_range("containment_weight", self.containment_weight, 0.0, 100.0)?;
        check_range("fuzzy_base", self.fuzzy_base, 0.0, 100.0)?;
        check_range("fuzzy_weight", self.fuzzy_weight, 0.0, 100.0)?;
        // The weighted strategies peak at base + weight
        check_range(
            "containment_base + containment_weight",
            self.containment_base + self.containment_weight,
            0.0,
            100.0,
        )?;
        check_range(
            "fuzzy_base + fuzzy_weight",
            self.fuzzy_base + self.fuzzy_weight,
            0.0,
            100.0,
        )?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons, so test for containment rather than exclusion
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn override_field<F, T>(lookup: &F, key: &str, field: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(raw) = lookup(key) {
        *field = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}
