// src/utils/json_file.rs

use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};

/// A JSON document that is read and written wholesale.
pub trait Document: Default + Serialize + DeserializeOwned + Send {
    /// Repairs a freshly loaded document (e.g. backfills missing keys).
    fn normalize(&mut self) {}
}

/// A JSON file on disk holding one [`Document`].
///
/// Every read-modify-write goes through [`JsonFile::update`], which holds an
/// async mutex for the whole cycle, so writers inside this process never
/// interleave. Another process pointed at the same file can still race.
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Loads the document.
    ///
    /// A missing file is created with the default document. A file that does
    /// not parse is treated as the default document.
    pub async fn load<T: Document>(&self) -> AppResult<T> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Loads, mutates and saves the document under one lock.
    pub async fn update<T, R, F>(&self, mutate: F) -> AppResult<R>
    where
        T: Document,
        F: FnOnce(&mut T) -> AppResult<(R, bool)>,
    {
        let _guard = self.lock.lock().await;
        let mut doc: T = self.read_unlocked().await?;
        let (result, changed) = mutate(&mut doc)?;
        if changed {
            self.write_unlocked(&doc).await?;
        }
        Ok(result)
    }

    async fn read_unlocked<T: Document>(&self) -> AppResult<T> {
        if !tokio::fs::try_exists(&self.path).await? {
            let mut doc = T::default();
            doc.normalize();
            self.write_unlocked(&doc).await?;
            return Ok(doc);
        }

        let raw = tokio::fs::read(&self.path).await?;
        let mut doc = match serde_json::from_slice::<T>(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    "Malformed JSON in {}, falling back to an empty document: {}",
                    self.path.display(),
                    e
                );
                T::default()
            }
        };
        doc.normalize();
        Ok(doc)
    }

    async fn write_unlocked<T: Document>(&self, doc: &T) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(doc)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}
