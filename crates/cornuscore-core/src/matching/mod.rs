//! Identity Resolution
//!
//! Decides which stored profile, if any, a free-text query refers to.
//!
//! # Strategies
//!
//! Every identifier of every candidate is scored by all strategies; the
//! identifier keeps its highest score:
//!
//! 1. Exact normalized match (score: 100)
//! 2. Containment (score: 70-95, scaled by length ratio)
//! 3. Spanish phonetic code match (score: 80)
//! 4. Levenshtein similarity above 0.75 (score: 62.5-70)
//!
//! The candidate holding the highest identifier score wins, and is reported
//! only if that score reaches the match threshold (60). All constants come
//! from [`MatchConfig`](crate::config::MatchConfig).
//!
//! # Example
//!
//! ```rust
//! use cornuscore_core::matching::{Matcher, Strategy};
//!
//! let profiles = vec![vec!["Cintia Fernandez".to_string()]];
//! let best = Matcher::new()
//!     .best_match("Sintia Fernández", &profiles)
//!     .unwrap();
//! assert_eq!(best.strategy, Strategy::Phonetic);
//! ```

mod engine;
mod strategies;

pub use engine::{BestMatch, Candidate, Explanation, Matcher, PreparedQuery};
pub use strategies::{Strategy, StrategyMatch};
