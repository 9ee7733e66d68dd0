//! Flat-file JSON store

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{error, warn};

use super::Store;
use crate::domain::StoreDocument;

/// Store backed by a single pretty-printed JSON file.
///
/// Opening initializes the file with an empty document so a fresh deployment
/// starts from `{"users": [], "transactions": []}`. After that, read and
/// write failures degrade: `load` falls back to an empty document, `save`
/// logs and drops the write.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `path`, creating parent directories and the initial
    /// empty document if the file does not exist. This is the only fallible
    /// step; a deployment that cannot create its data file should not start.
    pub async fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        if tokio::fs::try_exists(&path).await? {
            return Ok(Self { path });
        }
        write_document(&path, &StoreDocument::default()).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn write_document(path: &Path, doc: &StoreDocument) -> io::Result<()> {
    let json = serde_json::to_string_pretty(doc).map_err(io::Error::other)?;
    tokio::fs::write(path, json).await
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load(&self) -> StoreDocument {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to read data file, falling back to empty document: {}", e);
                return StoreDocument::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to parse data file, falling back to empty document: {}", e);
                StoreDocument::default()
            }
        }
    }

    async fn save(&self, doc: &StoreDocument) {
        if let Err(e) = write_document(&self.path, doc).await {
            error!(path = %self.path.display(), "Failed to write data file, mutation not persisted: {}", e);
        }
    }
}
