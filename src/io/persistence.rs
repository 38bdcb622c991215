use std::fs;
use std::path::{Path, PathBuf};

use crate::io::storage::{KeyValueStore, StorageError, atomic_write};
use crate::model::document::Document;
use crate::ops::import::ImportError;

/// Error type for export and explicit save operations
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("could not serialize document: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    StorageError(#[from] StorageError),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Serialize a document in the compact storage form
pub fn serialize(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string(doc)
}

/// Serialize a document in the pretty-printed (2-space) export form
pub fn serialize_pretty(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Parse a stored document. Any failure is reported as `None`.
pub fn deserialize(text: &str) -> Option<Document> {
    match serde_json::from_str::<Document>(text) {
        Ok(mut doc) => {
            if doc.normalize_order() {
                tracing::warn!("stored board order was inconsistent and has been repaired");
            }
            Some(doc)
        }
        Err(e) => {
            tracing::warn!("stored document is malformed, ignoring it: {e}");
            None
        }
    }
}

/// Reads and writes the whole document under one storage key
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Persistence {
            store: Box::new(store),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the document, propagating failures
    pub fn try_save(&mut self, doc: &Document) -> Result<(), PersistError> {
        let text = serialize(doc)?;
        self.store.set(&self.key, &text)?;
        Ok(())
    }

    /// Write the document. Failures are logged and swallowed; returns whether
    /// the write went through.
    pub fn save(&mut self, doc: &Document) -> bool {
        match self.try_save(doc) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, "error saving document: {e}");
                false
            }
        }
    }

    /// Read the stored document. Missing, unreadable and malformed data all
    /// come back as `None`.
    pub fn load(&self) -> Option<Document> {
        match self.store.get(&self.key) {
            Ok(Some(text)) => deserialize(&text),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %self.key, "error loading document: {e}");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Export / import files
// ---------------------------------------------------------------------------

/// Write a pretty-printed backup of the document to `dir/file_name`.
/// Returns the path written.
pub fn export_to_file(doc: &Document, dir: &Path, file_name: &str) -> Result<PathBuf, PersistError> {
    let path = dir.join(file_name);
    let mut content = serialize_pretty(doc)?;
    content.push('\n');
    atomic_write(&path, content.as_bytes()).map_err(|e| PersistError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

/// Read an import file and parse it as JSON. Shape is not checked here.
pub fn read_import_file(path: &Path) -> Result<serde_json::Value, ImportError> {
    let text = fs::read_to_string(path).map_err(|e| ImportError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_import_text(&text)
}

/// Parse import text as JSON
pub fn parse_import_text(text: &str) -> Result<serde_json::Value, ImportError> {
    serde_json::from_str(text).map_err(ImportError::InvalidJson)
}
