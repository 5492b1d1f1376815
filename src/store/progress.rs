use std::fs;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::schema::ProgressData;

const PROGRESS_FILE: &str = "progress_v1.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt progress file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Owns the progress file directory. Read-modify-write is the only contract;
/// one interactive session is assumed, so there is no locking.
pub struct ProgressStore {
    base_dir: PathBuf,
}

impl ProgressStore {
    pub fn new() -> Result<Self, StoreError> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typedrill");
        Self::with_base_dir(base_dir)
    }

    /// Store rooted at an explicit directory. Used by tests.
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir).map_err(|source| StoreError::Io {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(PROGRESS_FILE)
    }

    /// Missing file is a fresh install, not an error. An unreadable or
    /// unparseable file is returned as a typed error so the caller can apply
    /// its default-and-warn policy.
    pub fn load(&self) -> Result<ProgressData, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(ProgressData::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Write pretty JSON to a temp file, fsync, then rename over the
    /// canonical path, so readers never observe a partial write.
    pub fn save(&self, data: &ProgressData) -> Result<(), StoreError> {
        let path = self.path();
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(data).map_err(|source| StoreError::Io {
            path: path.clone(),
            source: source.into(),
        })?;

        let io_err = |source, at: &PathBuf| StoreError::Io {
            path: at.clone(),
            source,
        };

        let mut file = fs::File::create(&tmp_path).map_err(|e| io_err(e, &tmp_path))?;
        file.write_all(json.as_bytes())
            .map_err(|e| io_err(e, &tmp_path))?;
        file.sync_all().map_err(|e| io_err(e, &tmp_path))?;

        fs::rename(&tmp_path, &path).map_err(|e| io_err(e, &path))?;
        Ok(())
    }
}
