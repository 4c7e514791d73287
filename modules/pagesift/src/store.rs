//! Write-once persistence of action results as pretty-printed JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write result: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Saves JSON-serializable records under a local directory.
///
/// Filenames are caller-supplied stems, typically `<category>_<unixSeconds>`;
/// a stem collision within the same second silently overwrites.
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialize `record` and write it to `<dir>/<stem>.json`, creating the
    /// directory if needed. Returns the file path on success.
    pub fn save<T: Serialize>(&self, record: &T, stem: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(format!("{stem}.json"));
        fs::write(&path, serde_json::to_string_pretty(record)?)?;
        info!(path = %path.display(), "Result saved");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResultStore::new(tmp.path().join("data"));

        let path = store
            .save(&json!({ "url": "https://example.com" }), "single_url_1700000000")
            .unwrap();

        assert_eq!(path, tmp.path().join("data/single_url_1700000000.json"));
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({ "url": "https://example.com" }));
    }

    #[test]
    fn test_directory_creation_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResultStore::new(tmp.path().join("data"));

        store.save(&json!(1), "analysis_1700000000").unwrap();
        store.save(&json!(2), "analysis_1700000001").unwrap();

        let files: Vec<_> = fs::read_dir(tmp.path().join("data")).unwrap().collect();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_same_stem_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResultStore::new(tmp.path());

        store.save(&json!("first"), "search_1700000000").unwrap();
        let path = store.save(&json!("second"), "search_1700000000").unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!("second"));
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResultStore::new(tmp.path());

        let path = store
            .save(&json!({ "a": 1, "b": 2 }), "insights_1700000000")
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'), "expected multi-line pretty JSON, got {text:?}");
    }
}
