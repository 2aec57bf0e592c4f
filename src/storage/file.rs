//! File-backed session store
//!
//! The whole origin lives in one JSON document. Every write replaces the
//! document through a temp file and `rename`, so a crash mid-write leaves
//! either the old document or the new one, never half of each.

use super::SessionStore;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

type Document = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Document::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current document for a write; a corrupt document is discarded.
    async fn read_for_write(&self) -> Result<Document> {
        match self.read_document().await {
            Ok(doc) => Ok(doc),
            Err(Error::Json(e)) => {
                tracing::warn!(path = %self.path.display(), "Replacing unreadable store: {}", e);
                Ok(Document::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn write_document(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.temp_path();
        let content = serde_json::to_string_pretty(doc)?;
        fs::write(&tmp, content).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(Error::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileStore {
    async fn load(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        let doc = self.read_document().await?;
        Ok(keys.iter().map(|k| doc.get(*k).cloned()).collect())
    }

    async fn store_all(&self, entries: &[(&str, String)]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_for_write().await?;
        for (key, value) in entries {
            doc.insert(key.to_string(), value.clone());
        }
        self.write_document(&doc).await
    }

    async fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_for_write().await?;
        for key in keys {
            doc.remove(*key);
        }
        if doc.is_empty() {
            return match fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            };
        }
        self.write_document(&doc).await
    }
}
