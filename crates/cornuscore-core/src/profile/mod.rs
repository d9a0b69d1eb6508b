//! Person profiles, community reviews, and reputation
//!
//! A profile aggregates reviews under one or more identifiers. Its total score
//! is the sum of review scores and its reputation level follows from that
//! total.

mod types;

pub use types::{
    NewReview, PersonProfile, ReputationLevel, Review, ReviewCategory, UnknownCategory,
    ANONYMOUS_AUTHOR,
};
