//! File-backed player record storage.
//!
//! One record per player, keyed by uuid, stored as `<uuid>.dat` under the
//! data directory. Reads degrade every failure to "absent": a player with
//! no record simply has never played here, and a corrupt record must not
//! take the resolver down with it.

use crate::core::{Result, StoreError};
use crate::nbt::TagCompound;
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct PlayerDataStore {
    data_dir: PathBuf,
}

impl PlayerDataStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .map_err(|e| StoreError::Io(format!("Failed to create player data directory: {}", e)))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Backing file for a record. Exposed only so callers can fall back to
    /// file timestamps; nothing else may be inferred from the path.
    pub fn data_file(&self, id: Uuid) -> PathBuf {
        self.data_dir.join(format!("{}.dat", id))
    }

    /// Loads a player's record. Missing, unreadable, and corrupt records
    /// all read as absent; corruption is logged and dropped.
    pub fn load(&self, id: Uuid) -> Option<TagCompound> {
        match self.read_record(id) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Discarding unreadable player record {}: {}", id, err);
                None
            }
        }
    }

    fn read_record(&self, id: Uuid) -> Result<Option<TagCompound>> {
        let path = self.data_file(id);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let reader = BufReader::new(file);
        let root = rmp_serde::from_read(reader).map_err(|e| {
            StoreError::Codec(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        Ok(Some(root))
    }

    /// Last-modified time of the backing file in epoch millis, `0` when the
    /// record does not exist.
    pub fn last_modified_millis(&self, id: Uuid) -> i64 {
        let path = self.data_file(id);
        match fs::metadata(&path).and_then(|meta| meta.modified()) {
            Ok(mtime) => DateTime::<Utc>::from(mtime).timestamp_millis(),
            Err(_) => 0,
        }
    }

    /// Writes a player's record atomically: the bytes land in a temp file in
    /// the same directory and are renamed over the target. The resolver never
    /// writes; this is the host's save path.
    pub fn save(&self, id: Uuid, root: &TagCompound) -> Result<()> {
        let bytes = rmp_serde::to_vec(root)
            .map_err(|e| StoreError::Codec(format!("Failed to encode player record {}: {}", id, e)))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)
            .map_err(|e| StoreError::Io(format!("Failed to create temp file: {}", e)))?;
        tmp.write_all(&bytes)
            .map_err(|e| StoreError::Io(format!("Failed to write player record {}: {}", id, e)))?;
        tmp.persist(self.data_file(id))
            .map_err(|e| StoreError::Io(format!("Failed to persist player record {}: {}", id, e)))?;
        Ok(())
    }
}
