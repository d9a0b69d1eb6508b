//! Storage abstraction for person profiles
//!
//! `ProfileStore` abstracts over storage backends. `MemoryStore` keeps
//! profiles in a `Vec` in insertion order, which the matcher relies on for
//! tie-breaking: when two profiles score equally, the earlier one wins.
//!
//! # Example
//!
//! ```rust
//! use cornuscore_core::storage::{MemoryStore, ProfileStore};
//! use cornuscore_core::PersonProfile;
//!
//! let mut store = MemoryStore::new();
//! store
//!     .put(PersonProfile::new("prof1", vec!["ana perez".into()], "Argentina"))
//!     .unwrap();
//!
//! let found = store.find_by_identifier("Ana Perez").unwrap();
//! assert_eq!(found.map(|p| p.id), Some("prof1".to_string()));
//! ```

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::ProfileStore;
