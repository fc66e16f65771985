//! Key-value storage backends for the narrative document.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{SaveError, SaveResult};

/// Persistent string storage keyed by name.
pub trait Storage {
    /// Load the value stored under `key`. `Ok(None)` if nothing is stored.
    fn load(&self, key: &str) -> SaveResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> SaveResult<()>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> SaveResult<()>;
}

/// Stores each key as `<key>.json` in a directory.
///
/// The default directory is the platform data directory:
/// - Linux: `~/.local/share/arena-quest`
/// - macOS: `~/Library/Application Support/io.arenaquest.arena-quest`
/// - Windows: `C:\Users\<User>\AppData\Roaming\arenaquest\arena-quest\data`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Store files under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store files in the platform data directory.
    pub fn default_location() -> SaveResult<Self> {
        ProjectDirs::from("io", "arenaquest", "arena-quest")
            .map(|dirs| Self::new(dirs.data_dir()))
            .ok_or_else(|| SaveError::Unavailable("no home directory".to_string()))
    }

    /// The directory files are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> SaveResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> SaveResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SaveResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage with an optional size limit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Unlimited in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any single value larger than `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Seed a value directly, bypassing the quota.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// The raw stored value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> SaveResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> SaveResult<()> {
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(SaveError::QuotaExceeded {
                needed: value.len(),
                limit,
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SaveResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
