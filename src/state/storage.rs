use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

/// A key changed by another context sharing the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
}

/// String key/value storage shared by every context attached to it.
pub trait Storage {
    fn get(&mut self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Keys written by someone else since this handle last read or wrote
    /// them. Own writes never show up here.
    fn poll_events(&mut self) -> Vec<StorageEvent> {
        Vec::new()
    }
}

/// Process-local storage, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a data directory.
///
/// Several handles (processes) may point at the same directory; each one
/// remembers the last content it saw per key so that `poll_events` can report
/// changes made by the others.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    seen: HashMap<String, Option<String>>,
}

impl FileStorage {
    /// Open (and create if needed) a data directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            seen: HashMap::new(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read_raw(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Storage for FileStorage {
    /// The first read of a key starts watching it. Later reads leave the
    /// baseline alone so a foreign write is still reported by `poll_events`.
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        let value = self.read_raw(key)?;
        self.seen
            .entry(key.to_string())
            .or_insert_with(|| value.clone());
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Write beside the target and rename so readers never see half a file.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        self.seen.insert(key.to_string(), Some(value.to_string()));
        debug!(key, path = %path.display(), "storage write");
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<StorageEvent> {
        let keys: Vec<String> = self.seen.keys().cloned().collect();
        let mut events = Vec::new();

        for key in keys {
            let current = match self.read_raw(&key) {
                Ok(current) => current,
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to poll storage key");
                    continue;
                }
            };
            if self.seen.get(&key) != Some(&current) {
                self.seen.insert(key.clone(), current);
                events.push(StorageEvent { key });
            }
        }
        events
    }
}
