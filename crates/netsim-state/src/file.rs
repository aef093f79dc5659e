//! JSON file backed state store.
//!
//! Every `set` is written through to disk so a session that dies mid-way
//! keeps everything written before the crash. The file is replaced via a
//! temporary sibling and a rename, so a single write is never torn; a
//! handler that performs two writes can still be interrupted between them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use netsim_types::{Result, StateError};
use serde_json::Value;

use crate::StateStore;

/// A [`StateStore`] persisted as a single JSON object.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileStore {
    /// Open the store at `path`. A missing file yields an empty store; the
    /// file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str::<Value>(&text)? {
                    Value::Object(map) => map.into_iter().collect(),
                    other => {
                        return Err(StateError::Corrupt {
                            key: path.display().to_string(),
                            reason: format!("expected a JSON object, found {}", kind(&other)),
                        }
                        .into());
                    },
                }
            }
        } else {
            BTreeMap::new()
        };
        log::debug!("Opened state file {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.persist()?;
        log::info!("Device state saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netsim_types::NetsimError;
    use serde_json::json;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("hostname").unwrap(), None);
    }

    #[test]
    fn writes_are_visible_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("hostname", json!("Edge1")).unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("hostname").unwrap(), Some(json!("Edge1")));
    }

    #[test]
    fn remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("vlans", json!({"10": {"name": "Sales", "members": []}})).unwrap();
        store.remove("vlans").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("vlans").unwrap(), None);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labs/day1/state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.flush().unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn empty_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "  \n").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn non_object_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, NetsimError::State(StateError::Corrupt { .. })));
    }

    #[test]
    fn malformed_json_is_state_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();
        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, NetsimError::State(StateError::Json(_))));
    }
}
