//! Local persistence of the selected environment name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{EnvgateError, EnvgateResult};
use crate::SelectionStore;

/// Selection stored verbatim in a single file
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionStore for FileSelectionStore {
    fn get(&self) -> EnvgateResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EnvgateError::storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn set(&self, name: &str) -> EnvgateResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, name).map_err(|e| {
            EnvgateError::storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        debug!("Stored selected environment in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> EnvgateResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EnvgateError::storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// In-process store, for embedding and tests
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    value: Mutex<Option<String>>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(name: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(name.into())),
        }
    }
}

impl SelectionStore for MemorySelectionStore {
    fn get(&self) -> EnvgateResult<Option<String>> {
        let value = self
            .value
            .lock()
            .map_err(|e| EnvgateError::storage(e.to_string()))?;
        Ok(value.clone().filter(|v| !v.is_empty()))
    }

    fn set(&self, name: &str) -> EnvgateResult<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| EnvgateError::storage(e.to_string()))?;
        *value = Some(name.to_string());
        Ok(())
    }

    fn clear(&self) -> EnvgateResult<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| EnvgateError::storage(e.to_string()))?;
        *value = None;
        Ok(())
    }
}
