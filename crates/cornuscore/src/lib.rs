//! CornuScore Service
//!
//! Reputation lookup on top of `cornuscore-core`: resolves free-text queries
//! to profiles, records community reviews, and ranks profiles by score.
//!
//! ## Module Structure
//!
//! - `service` - Thread-safe reputation service (lookup, reviews, rankings)
//! - `snapshot` - JSON snapshot persistence for the profile store
//! - `logging` - tracing-subscriber setup
//! - `error` - Error type shared by the service and CLI

pub mod error;
pub mod logging;
pub mod service;
pub mod snapshot;

pub use error::{Error, Result};
pub use service::{LookupResult, Rankings, ReputationService, DEFAULT_RANKING_LIMIT};
