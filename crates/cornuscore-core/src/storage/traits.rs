//! Storage trait definitions

use crate::profile::PersonProfile;
use crate::storage::error::StoreResult;

/// Core storage operations for person profiles.
///
/// Implementations store profiles as given; score and reputation upkeep is
/// the caller's job.
pub trait ProfileStore {
    /// Store a new profile.
    ///
    /// Returns `StoreError::AlreadyExists` if the ID is taken and
    /// `StoreError::InvalidData` if the ID is blank.
    fn put(&mut self, profile: PersonProfile) -> StoreResult<()>;

    /// Retrieve a profile by ID.
    fn get(&self, id: &str) -> StoreResult<Option<PersonProfile>>;

    /// Check if a profile exists.
    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Replace an existing profile.
    ///
    /// Returns `StoreError::NotFound` if the profile doesn't exist.
    fn update(&mut self, profile: PersonProfile) -> StoreResult<()>;

    /// Delete a profile by ID.
    ///
    /// Returns `true` if the profile was deleted, `false` if it didn't exist.
    fn delete(&mut self, id: &str) -> StoreResult<bool>;

    /// All profiles, in insertion order.
    fn profiles(&self) -> StoreResult<Vec<PersonProfile>>;

    /// First profile holding `identifier`, compared case-insensitively after
    /// trimming.
    fn find_by_identifier(&self, identifier: &str) -> StoreResult<Option<PersonProfile>> {
        Ok(self
            .profiles()?
            .into_iter()
            .find(|p| p.has_identifier(identifier)))
    }

    /// Total number of profiles.
    fn count(&self) -> StoreResult<usize> {
        Ok(self.profiles()?.len())
    }

    /// Remove all profiles.
    fn clear(&mut self) -> StoreResult<()>;
}
