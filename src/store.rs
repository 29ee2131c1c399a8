// src/store.rs
//
// Per-item vote cache kept as one JSON document under `.store/`:
//
//   { "v17": { "updatedAt": 1718000000000, "votes": [ … ] }, … }
//
// Entries are replaced whole; there is no merging and no eviction.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{ItemId, Vote};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("cache file is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cache encode: {0}")]
    Encode(#[source] serde_json::Error),
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io { path: path.to_path_buf(), source }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// Oldest first
    pub votes: Vec<Vote>,
}

impl CacheEntry {
    /// Strictly younger than `freshness`.
    pub fn is_fresh(&self, now: DateTime<Utc>, freshness: TimeDelta) -> bool {
        now - self.updated_at < freshness
    }
}

#[derive(Debug, Default)]
pub struct VoteCache {
    /// None → memory only, `save` is a no-op
    path: Option<PathBuf>,
    entries: BTreeMap<ItemId, CacheEntry>,
}

impl VoteCache {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load `path`, or start empty when it is missing. A damaged file is
    /// logged and ignored; it gets overwritten on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(&path) {
            Ok(cache) => cache,
            Err(e) => {
                loge!("Vote cache unreadable, starting empty: {e}");
                Self { path: Some(path), entries: BTreeMap::new() }
            }
        }
    }

    /// Strict load: a missing file is an empty cache, anything else that goes
    /// wrong is an error.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let entries = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).map_err(StoreError::Decode)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(io_err(path)(e)),
        };
        Ok(Self { path: Some(path.to_path_buf()), entries })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, item: &ItemId) -> Option<&CacheEntry> {
        self.entries.get(item)
    }

    /// The entry, if it is still within the freshness window.
    pub fn get_fresh(&self, item: &ItemId, now: DateTime<Utc>, freshness: TimeDelta) -> Option<&CacheEntry> {
        self.get(item).filter(|e| e.is_fresh(now, freshness))
    }

    pub fn put(&mut self, item: ItemId, updated_at: DateTime<Utc>, votes: Vec<Vote>) {
        self.entries.insert(item, CacheEntry { updated_at, votes });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the whole document. Goes through a sibling temp file and a
    /// rename so an interrupted write leaves the previous file intact.
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else { return Ok(()) };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err(parent))?;
            }
        }

        let json = serde_json::to_string(&self.entries).map_err(StoreError::Encode)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, path).map_err(io_err(path))?;

        logd!("Saved vote cache ({} items) to {}", self.entries.len(), path.display());
        Ok(())
    }
}
