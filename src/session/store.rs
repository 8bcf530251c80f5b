use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::Result;

/// Durable string key-value storage, the analogue of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> { self.entries.read().get(key).cloned() }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// One JSON object on disk holding every key. The whole map is cached in memory and
/// rewritten on each mutation; the cache only changes once the write succeeded. A
/// missing or corrupt file starts out empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        debug!(target: "session", "opened session file {:?} with {} keys", path, entries.len());
        Self { path, entries: RwLock::new(entries) }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() { std::fs::create_dir_all(dir)?; }
        }
        let text = serde_json::to_string_pretty(entries)?;
        // write-then-rename
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn load_entries(path: &Path) -> HashMap<String, String> {
    let Ok(text) = std::fs::read_to_string(path) else { return HashMap::new(); };
    match serde_json::from_str::<HashMap<String, String>>(&text) {
        Ok(m) => m,
        Err(e) => {
            warn!(target: "session", "session file {:?} is unreadable, starting empty: {}", path, e);
            HashMap::new()
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> { self.entries.read().get(key).cloned() }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.entries.write();
        let mut next = guard.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self.entries.write();
        if !guard.contains_key(key) { return Ok(()); }
        let mut next = guard.clone();
        next.remove(key);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}
