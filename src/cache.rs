//! # Visibility table cache
//!
//! Computing a visibility table over several centuries is by far the most expensive
//! stage, so the result is persisted and reused by later runs.
//!
//! ## Keys
//!
//! A [`CacheKey`] always starts with the textual form of the requested range
//! (`20210101T000000Z_20220101T000000Z`). Under [`CacheKeyPolicy::Full`] it is
//! followed by the first 16 hex digits of a SHA-256 digest of every parameter that
//! changes the table: observer coordinates, twilight offset, treeline angle, time
//! zone, padding, tracked bodies and rise/set recording. Under
//! [`CacheKeyPolicy::RangeOnly`] the range alone is used, so two observers asking for
//! the same range share one artifact.
//!
//! ## Storage
//!
//! [`DiskCache`] keeps one JSON file per key, `visibility_<key>.json`, in a directory
//! (by default `<user cache dir>/planetary_parade/visibility`). Files are written to a
//! temporary name and renamed into place. An unreadable or malformed artifact is
//! reported as a miss.

use std::fmt;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::ParadeConfig;
use crate::parade_errors::ParadeError;
use crate::table::VisibilityTable;
use crate::time::DateRange;

/// Which request parameters address a cached table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CacheKeyPolicy {
    /// Range plus a digest of every parameter that changes the table.
    #[default]
    Full,
    /// Range only. Different observers over the same range collide.
    RangeOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_request(range: &DateRange, config: &ParadeConfig, policy: CacheKeyPolicy) -> Self {
        match policy {
            CacheKeyPolicy::RangeOnly => CacheKey(range.key_text()),
            CacheKeyPolicy::Full => {
                let bodies: Vec<&str> = config.tracked_bodies().iter().map(|b| b.name()).collect();
                let fingerprint = format!(
                    "lat={:?};lon={:?};elev={:?};dusk={};treeline={:?};tz={};pad={};bodies={};rise_set={}",
                    config.latitude,
                    config.longitude,
                    config.elevation_m,
                    config.dusk_minutes,
                    config.treeline_degrees,
                    config.timezone,
                    config.pad_days,
                    bodies.join(","),
                    config.record_rise_set,
                );
                let digest = hex::encode(Sha256::digest(fingerprint.as_bytes()));
                CacheKey(format!("{}_{}", range.key_text(), &digest[..16]))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage of visibility tables addressed by [`CacheKey`].
pub trait TableCache: Send + Sync {
    /// The stored table, or `None` on a miss. Never fails.
    fn load(&self, key: &CacheKey) -> Option<VisibilityTable>;

    /// Persist `table` under `key`, replacing any previous artifact.
    fn store(&self, key: &CacheKey, table: &VisibilityTable) -> Result<(), ParadeError>;
}

/// JSON files in a directory.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: Utf8PathBuf,
}

impl DiskCache {
    /// Open (and create if needed) a cache directory.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Result<Self, ParadeError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(DiskCache { dir })
    }

    /// `<user cache dir>/planetary_parade/visibility`
    pub fn default_dir() -> Result<Utf8PathBuf, ParadeError> {
        let base_dir = BaseDirs::new().ok_or_else(|| {
            ParadeError::Utf8PathError("cannot determine the user cache directory".into())
        })?;
        let cache_path = Utf8Path::from_path(base_dir.cache_dir()).ok_or_else(|| {
            ParadeError::Utf8PathError(format!(
                "cache directory {} is not valid UTF-8",
                base_dir.cache_dir().display()
            ))
        })?;
        Ok(cache_path.join("planetary_parade").join("visibility"))
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn path_for(&self, key: &CacheKey) -> Utf8PathBuf {
        self.dir.join(format!("visibility_{key}.json"))
    }
}

impl TableCache for DiskCache {
    fn load(&self, key: &CacheKey) -> Option<VisibilityTable> {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("cache miss for {key}: {e}");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(table) => {
                log::info!("loaded visibility table from {path}");
                Some(table)
            }
            Err(e) => {
                log::debug!("ignoring unreadable cache artifact {path}: {e}");
                None
            }
        }
    }

    fn store(&self, key: &CacheKey, table: &VisibilityTable) -> Result<(), ParadeError> {
        let path = self.path_for(key);
        let tmp = self
            .dir
            .join(format!("visibility_{key}.json.{}.tmp", std::process::id()));

        fs::write(&tmp, serde_json::to_vec(table)?)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        log::info!("stored visibility table in {path}");
        Ok(())
    }
}
