use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;

/// A named slot of durable storage holding a JSON-encoded list of records.
///
/// Loads never fail: a missing file is an empty collection, and corrupt
/// contents are discarded with a warning so the application starts from
/// scratch instead of refusing to run.
#[derive(Debug)]
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonStore<T> {
    pub fn new(data_dir: &Path, slot: &str) -> Self {
        JsonStore {
            path: data_dir.join(slot),
            _marker: PhantomData,
        }
    }

    pub fn load(&self) -> Vec<T> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!("failed to read {}: {}", self.path.display(), err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "discarding malformed data in {}: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Replaces the stored list wholesale.
    pub fn save(&self, items: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string(items)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}
