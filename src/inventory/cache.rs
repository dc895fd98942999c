use super::store::{InventoryDoc, InventoryStore};
use anyhow::Result;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk snapshot of the inventory store, reused across invocations to
/// avoid regenerating data. Whole-file read/write, no locking, no schema
/// versioning; a corrupt file is treated the same as a missing one.
pub struct InventoryCache {
    path: PathBuf,
}

impl Default for InventoryCache {
    fn default() -> Self {
        InventoryCache::new(InventoryCache::default_path())
    }
}

impl InventoryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        InventoryCache { path: path.into() }
    }

    /// Snapshot location under the platform cache directory, falling back
    /// to a relative path when none is available.
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dyninv")
            .join("inventory.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the store's snapshot, creating the containing directory if
    /// absent and overwriting any existing file.
    pub fn save(&self, store: &InventoryStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let encoded = serde_json::to_string_pretty(&store.to_doc())?;
        fs::write(&self.path, encoded)?;
        debug!("Saved inventory snapshot to {}", self.path.display());

        Ok(())
    }

    /// Loads the snapshot if present and parseable; a missing file or any
    /// read/parse failure yields a fresh empty store instead of an error.
    pub fn load(&self) -> InventoryStore {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(
                    "No usable snapshot at {}: {e}, starting empty",
                    self.path.display()
                );
                return InventoryStore::new();
            }
        };

        match serde_json::from_str::<InventoryDoc>(&raw) {
            Ok(doc) => InventoryStore::from_doc(doc),
            Err(e) => {
                warn!(
                    "Discarding corrupt snapshot {}: {e}",
                    self.path.display()
                );
                InventoryStore::new()
            }
        }
    }

    /// Removes the snapshot file; a missing file is a no-op.
    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!("Deleted inventory snapshot {}", self.path.display());
        }

        Ok(())
    }
}
