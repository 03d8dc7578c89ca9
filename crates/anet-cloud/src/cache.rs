//! Cache management for fetched resources
//!
//! Manages the `ansible-atlantic_net.cache` snapshot file which keeps the
//! last fetched resource data and the last built inventory between runs.
//! The age of the cache is the modification time of that file.

use crate::error::Result;
use crate::inventory::Inventory;
use crate::resource::ResourceSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;

const CACHE_FILE: &str = "ansible-atlantic_net.cache";
const CACHE_TMP_SUFFIX: &str = "tmp";

/// Persisted pair of raw resource data and the inventory built from it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    #[serde(default)]
    pub data: ResourceSet,

    #[serde(default)]
    pub inventory: Inventory,
}

/// Returns true while `modified + max_age` lies strictly after `now`
///
/// An expiry beyond what `SystemTime` can represent never passes.
pub fn is_fresh(modified: SystemTime, max_age: Duration, now: SystemTime) -> bool {
    modified
        .checked_add(max_age)
        .is_none_or(|expires_at| expires_at > now)
}

/// Cache store for reading/writing the snapshot file
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            path: cache_dir.as_ref().join(CACHE_FILE),
        }
    }

    /// Get the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension(CACHE_TMP_SUFFIX)
    }

    /// Check whether the snapshot exists and is younger than `max_age`
    pub async fn is_valid(&self, max_age: Duration) -> bool {
        let modified = match fs::metadata(&self.path).await.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => {
                tracing::debug!("Cache file not found: {}", self.path.display());
                return false;
            }
        };

        let valid = is_fresh(modified, max_age, SystemTime::now());
        tracing::debug!(
            "Cache {} is {} (max age {}s)",
            self.path.display(),
            if valid { "valid" } else { "stale" },
            max_age.as_secs()
        );
        valid
    }

    /// Load the snapshot, falling back to an empty one when it cannot be read
    pub async fn load(&self) -> CacheSnapshot {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Cache not readable ({}), starting empty", e);
                return CacheSnapshot::default();
            }
        };

        match serde_json::from_str::<CacheSnapshot>(&content) {
            Ok(snapshot) => {
                tracing::debug!(
                    "Loaded cache with {} resource kinds",
                    snapshot.data.iter().count()
                );
                snapshot
            }
            Err(e) => {
                tracing::warn!("Ignoring unparsable cache {}: {}", self.path.display(), e);
                CacheSnapshot::default()
            }
        }
    }

    /// Save the snapshot, replacing any previous one
    pub async fn save(&self, snapshot: &CacheSnapshot) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir).await?;
            tracing::debug!("Created cache directory: {}", dir.display());
        }

        let content = serde_json::to_string_pretty(snapshot)?;

        // Write next to the target and rename so readers never see a partial file
        let tmp = self.tmp_path();
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;

        tracing::debug!("Saved cache to {}", self.path.display());
        Ok(())
    }
}
