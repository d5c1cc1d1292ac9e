use crate::{ActionAnnotation, AnnotateError, Clip};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// What is persisted per video.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoData {
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub annotations: Vec<ActionAnnotation>,
}

/// Keyed persistence for per-video work.
pub trait VideoStore {
    fn save(&mut self, key: &str, data: &VideoData) -> Result<(), AnnotateError>;
    /// `Ok(None)` when nothing usable is stored under `key`.
    fn load(&mut self, key: &str) -> Result<Option<VideoData>, AnnotateError>;
}

/// Storage key for a video file name: the name without its final extension.
pub fn video_key(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() && !file_name[dot + 1..].contains('/') => {
            &file_name[..dot]
        }
        _ => file_name,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    dir: PathBuf,
    prefix: String,
    ttl: Duration,
}

impl StoreConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "clips_".to_string(),
            ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }

    /// Set the file name prefix put in front of every key.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set how long saved data stays valid.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    // Getters
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[derive(Serialize, Deserialize)]
struct StoredData {
    #[serde(flatten)]
    data: VideoData,
    /// Milliseconds since the Unix epoch.
    timestamp: u64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One JSON file per key. Entries older than the TTL are deleted when read.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config: StoreConfig,
}

impl JsonFileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.config
            .dir
            .join(format!("{}{}.json", self.config.prefix, key))
    }

    /// Save with an explicit timestamp in milliseconds since the Unix epoch.
    pub fn save_at(&self, key: &str, data: &VideoData, timestamp: u64) -> Result<(), AnnotateError> {
        std::fs::create_dir_all(&self.config.dir)?;
        let stored = StoredData {
            data: data.clone(),
            timestamp,
        };
        std::fs::write(self.path_for(key), serde_json::to_string(&stored)?)?;
        Ok(())
    }

    /// Load as of `now` (milliseconds since the Unix epoch).
    pub fn load_at(&self, key: &str, now: u64) -> Result<Option<VideoData>, AnnotateError> {
        let path = self.path_for(key);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let stored: StoredData = match serde_json::from_str(&json) {
            Ok(stored) => stored,
            Err(err) => {
                log::warn!("ignoring unreadable {}: {}", path.display(), err);
                return Ok(None);
            }
        };

        let age = Duration::from_millis(now.saturating_sub(stored.timestamp));
        if age > self.config.ttl {
            log::info!("{} expired, removing", path.display());
            std::fs::remove_file(&path)?;
            return Ok(None);
        }
        Ok(Some(stored.data))
    }
}

impl VideoStore for JsonFileStore {
    fn save(&mut self, key: &str, data: &VideoData) -> Result<(), AnnotateError> {
        self.save_at(key, data, now_millis())
    }

    fn load(&mut self, key: &str) -> Result<Option<VideoData>, AnnotateError> {
        self.load_at(key, now_millis())
    }
}

/// Process-local store, for tests and sessions that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, VideoData>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&VideoData> {
        self.entries.get(key)
    }

    /// Number of `save` calls so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl VideoStore for MemoryStore {
    fn save(&mut self, key: &str, data: &VideoData) -> Result<(), AnnotateError> {
        self.saves += 1;
        self.entries.insert(key.to_string(), data.clone());
        Ok(())
    }

    fn load(&mut self, key: &str) -> Result<Option<VideoData>, AnnotateError> {
        Ok(self.entries.get(key).cloned())
    }
}
