//! JSON snapshot persistence for profiles
//!
//! The whole profile set is written as one versioned JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "profiles": [ { "id": "prof1", "identifiers": [...], ... } ]
//! }
//! ```
//!
//! Writes go to a temp file in the same directory, which is persisted over
//! the target. A failed write leaves no temp file behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use cornuscore_core::seed::initial_profiles;
use cornuscore_core::PersonProfile;

use crate::error::{Error, Result};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    profiles: Vec<PersonProfile>,
}

/// Read profiles from a snapshot file.
pub fn load(path: &Path) -> Result<Vec<PersonProfile>> {
    let data = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&data)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(Error::Validation(format!(
            "unsupported snapshot version {} in {} (expected {})",
            snapshot.version,
            path.display(),
            SNAPSHOT_VERSION
        )));
    }

    debug!(path = %path.display(), profiles = snapshot.profiles.len(), "Snapshot loaded");
    Ok(snapshot.profiles)
}

/// Write profiles to a snapshot file, replacing any previous contents.
pub fn save(path: &Path, profiles: &[PersonProfile]) -> Result<()> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        profiles: profiles.to_vec(),
    };
    let data = serde_json::to_string_pretty(&snapshot)?;

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    // Dropping the temp file on any error below removes it
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), profiles = profiles.len(), "Snapshot saved");
    Ok(())
}

/// Load the snapshot at `path`, or create it from the demo profiles on first
/// use.
pub fn load_or_seed(path: &Path) -> Result<Vec<PersonProfile>> {
    if path.exists() {
        return load(path);
    }

    let profiles = initial_profiles();
    save(path, &profiles)?;
    info!(
        path = %path.display(),
        profiles = profiles.len(),
        "No snapshot found, initialized with demo profiles"
    );
    Ok(profiles)
}
