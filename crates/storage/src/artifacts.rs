// storage/src/artifacts.rs

use crate::{ActionName, StorageResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const RESULT_SUFFIX: &str = ".json";
pub const SIGNED_TX_SUFFIX: &str = "-tx.json";
const TEMP_SUFFIX: &str = ".tmp";

/// Writes RPC results under the target directory, one file per action.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    target_dir: PathBuf,
}

impl ArtifactStore {
    /// Open (creating if needed) the artifact directory.
    pub fn new(target_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let target_dir = target_dir.into();
        fs::create_dir_all(&target_dir)?;
        Ok(Self { target_dir })
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn result_path(&self, action: &ActionName) -> PathBuf {
        self.target_dir
            .join(format!("{}{}", action.as_str(), RESULT_SUFFIX))
    }

    pub fn signed_tx_path(&self, action: &ActionName) -> PathBuf {
        self.target_dir
            .join(format!("{}{}", action.as_str(), SIGNED_TX_SUFFIX))
    }

    /// Persist a result as `<action>.json` and return its path.
    ///
    /// Keys are written in sorted order, so the same result always yields the
    /// same bytes. Rewriting an existing action replaces the file atomically.
    pub fn persist(&self, result: &serde_json::Value, action: &ActionName) -> StorageResult<PathBuf> {
        let path = self.result_path(action);
        write_json_atomic(&path, result)?;
        tracing::debug!(action = %action, path = %path.display(), "persisted result");
        Ok(path)
    }

    /// Remove a signed transaction left over from an earlier run, so that the
    /// file can only exist afterwards if the signer wrote it.
    pub fn discard_signed_tx(&self, action: &ActionName) -> StorageResult<()> {
        let path = self.signed_tx_path(action);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(action = %action, path = %path.display(), "removed stale signed tx");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Write an arbitrary document (e.g. the run summary) next to the artifacts.
    pub fn write_document<T: Serialize>(&self, file_name: &str, doc: &T) -> StorageResult<PathBuf> {
        let path = self.target_dir.join(file_name);
        write_json_atomic(&path, doc)?;
        Ok(path)
    }
}

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, doc: &T) -> StorageResult<()> {
    let mut bytes = serde_json::to_vec_pretty(doc)?;
    bytes.push(b'\n');

    let mut temp = path.as_os_str().to_owned();
    temp.push(TEMP_SUFFIX);
    let temp = PathBuf::from(temp);

    fs::write(&temp, &bytes)?;
    fs::rename(&temp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (ArtifactStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().join("artifacts")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_paths_derive_from_action() {
        let (store, _dir) = store();
        let action = ActionName::create("SimpleStorage", 0).unwrap();

        assert_eq!(
            store.result_path(&action),
            store.target_dir().join("create-SimpleStorage-0.json")
        );
        assert_eq!(
            store.signed_tx_path(&action),
            store.target_dir().join("create-SimpleStorage-0-tx.json")
        );
    }

    #[test]
    fn test_persist_writes_full_result() {
        let (store, _dir) = store();
        let action = ActionName::create("LogEvents", 3).unwrap();
        let result = json!({"contract_address": "0x01", "tx": {"inputs": [1, 2]}});

        let path = store.persist(&result, &action).unwrap();
        let on_disk: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, result);
    }

    #[test]
    fn test_persist_is_byte_identical_on_rerun() {
        let (store, _dir) = store();
        let action = ActionName::call("SimpleStorage", "0x01", "0x60fe47b1", 1).unwrap();
        let result = json!({"z": 1, "a": {"y": [3, 2], "b": null}});

        let path = store.persist(&result, &action).unwrap();
        let first = std::fs::read(&path).unwrap();
        store.persist(&result, &action).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_discard_signed_tx() {
        let (store, _dir) = store();
        let action = ActionName::create("SimpleStorage", 0).unwrap();

        // Nothing to remove is fine.
        store.discard_signed_tx(&action).unwrap();

        std::fs::write(store.signed_tx_path(&action), b"{\"stale\":true}").unwrap();
        store.discard_signed_tx(&action).unwrap();
        assert!(!store.signed_tx_path(&action).exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (store, _dir) = store();
        let action = ActionName::create("SelfDestruct", 0).unwrap();
        store.persist(&json!({}), &action).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(store.target_dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(TEMP_SUFFIX))
            .collect();
        assert!(leftovers.is_empty());
    }
}
