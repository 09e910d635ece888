//! Saved form inputs
//!
//! The last-used links, size and player 2 scripts are kept verbatim so the
//! UI can restore them on next open.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// The three saved input slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedInputs {
    pub saved_links: String,
    pub saved_size: String,
    #[serde(rename = "savedPlayer2Scripts")]
    pub saved_player2_scripts: String,
}

/// Storage backend for [`SavedInputs`]
pub trait InputStore {
    /// Loads saved inputs; a store with nothing saved yields empty slots
    fn load(&self) -> Result<SavedInputs>;

    /// Replaces all three saved slots
    fn save(&self, inputs: &SavedInputs) -> Result<()>;
}

/// Saves inputs as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputStore for JsonFileStore {
    fn load(&self) -> Result<SavedInputs> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SavedInputs::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, inputs: &SavedInputs) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(inputs)?)?;
        debug!(path = %self.path.display(), "saved inputs");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutolinksError;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("inputs.json"));
        assert_eq!(store.load().unwrap(), SavedInputs::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/inputs.json"));
        let inputs = SavedInputs {
            saved_links: "a 1080p\nb 720p".to_string(),
            saved_size: "3 GB".to_string(),
            saved_player2_scripts: "a.mkv : <iframe></iframe>".to_string(),
        };
        store.save(&inputs).unwrap();
        assert_eq!(store.load().unwrap(), inputs);
    }

    #[test]
    fn test_json_slot_names() {
        let json = serde_json::to_value(SavedInputs::default()).expect("Serialization should succeed");
        assert!(json.get("savedLinks").is_some());
        assert!(json.get("savedSize").is_some());
        assert!(json.get("savedPlayer2Scripts").is_some());
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.json");
        fs::write(&path, "not json").unwrap();
        let result = JsonFileStore::new(path).load();
        assert!(matches!(result, Err(AutolinksError::Serialization(_))));
    }
}
