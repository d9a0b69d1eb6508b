//! In-memory storage backend
//!
//! Keeps profiles in a `Vec`. No persistence; the application crate snapshots
//! the contents to disk when it needs to.

use crate::profile::PersonProfile;
use crate::storage::error::{StoreError, StoreResult};
use crate::storage::traits::ProfileStore;

/// In-memory profile store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    profiles: Vec<PersonProfile>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// Create a memory store with initial profiles.
    ///
    /// Profiles with duplicate IDs after the first are rejected.
    pub fn with_profiles(profiles: Vec<PersonProfile>) -> StoreResult<Self> {
        let mut store = Self::new();
        for profile in profiles {
            store.put(profile)?;
        }
        Ok(store)
    }

    /// Borrow all profiles without cloning.
    pub fn as_slice(&self) -> &[PersonProfile] {
        &self.profiles
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.id == id)
    }
}

impl ProfileStore for MemoryStore {
    fn put(&mut self, profile: PersonProfile) -> StoreResult<()> {
        if profile.id.trim().is_empty() {
            return Err(StoreError::InvalidData("profile id is empty".to_string()));
        }
        if self.position(&profile.id).is_some() {
            return Err(StoreError::AlreadyExists(profile.id));
        }
        self.profiles.push(profile);
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<PersonProfile>> {
        Ok(self.profiles.iter().find(|p| p.id == id).cloned())
    }

    fn update(&mut self, profile: PersonProfile) -> StoreResult<()> {
        match self.position(&profile.id) {
            Some(idx) => {
                self.profiles[idx] = profile;
                Ok(())
            }
            None => Err(StoreError::NotFound(profile.id)),
        }
    }

    fn delete(&mut self, id: &str) -> StoreResult<bool> {
        match self.position(id) {
            Some(idx) => {
                self.profiles.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn profiles(&self) -> StoreResult<Vec<PersonProfile>> {
        Ok(self.profiles.clone())
    }

    fn find_by_identifier(&self, identifier: &str) -> StoreResult<Option<PersonProfile>> {
        Ok(self
            .profiles
            .iter()
            .find(|p| p.has_identifier(identifier))
            .cloned())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.profiles.len())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.profiles.clear();
        Ok(())
    }
}
