use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{History, Store};
use crate::error::StoreError;

/// History kept as one pretty-printed JSON array on disk
#[derive(Debug, Clone)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    atomic: bool,
}

impl JsonFileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            atomic: false,
        }
    }

    /// Write through a temporary sibling file renamed into place
    pub(crate) fn with_atomic_write(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomic(&self, content: &str) -> Result<(), StoreError> {
        let mut tmp = NamedTempFile::new_in(self.parent_dir()).map_err(|e| self.write_err(e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| self.write_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<History, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(History::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, history: &History) -> Result<(), StoreError> {
        // Serialize before touching the filesystem so a failure leaves the file intact
        let content = serde_json::to_string_pretty(history).map_err(StoreError::Serialize)?;

        fs::create_dir_all(self.parent_dir()).map_err(|e| self.write_err(e))?;

        if self.atomic {
            self.write_atomic(&content)
        } else {
            fs::write(&self.path, content).map_err(|e| self.write_err(e))
        }
    }
}
