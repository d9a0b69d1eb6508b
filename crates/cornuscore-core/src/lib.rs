//! CornuScore Core Engine
//!
//! Identity resolution and reputation model for CornuScore. Everything in this
//! crate is pure and synchronous: no I/O, no logging, no global state.
//!
//! # Features
//!
//! - `parallel` - Score large candidate sets in parallel via rayon
//!
//! # Example
//!
//! ```rust
//! use cornuscore_core::matching::Matcher;
//!
//! let profiles = vec![
//!     vec!["ana perez".to_string(), "anita.perez95".to_string()],
//!     vec!["carlos gomez".to_string(), "charlyg".to_string()],
//! ];
//!
//! let matcher = Matcher::new();
//! let best = matcher.best_match("Ana Perez", &profiles).unwrap();
//! assert_eq!(best.index, 0);
//! assert_eq!(best.score, 100.0);
//! ```

pub mod config;
pub mod matching;
pub mod normalize;
pub mod phonetic;
pub mod profile;
pub mod seed;
pub mod similarity;
pub mod storage;

// Re-export main types at crate root
pub use config::{ConfigError, MatchConfig};
pub use matching::{BestMatch, Candidate, Explanation, Matcher, PreparedQuery, Strategy};
pub use normalize::normalize;
pub use profile::{
    NewReview, PersonProfile, ReputationLevel, Review, ReviewCategory, UnknownCategory,
};
pub use storage::{MemoryStore, ProfileStore, StoreError, StoreResult};
