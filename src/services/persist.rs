use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use super::{PersistenceError, PersistenceService, SavedRecord};
use crate::document::MarkdownDocument;

/// Saves the document to a single markdown file.
///
/// Content goes to a sibling temp file first and is renamed into place, so a
/// failed write never truncates the previous save.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, err: &std::io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

impl PersistenceService for FilePersistence {
    fn save(&self, document: &MarkdownDocument) -> Result<SavedRecord, PersistenceError> {
        let content = document.content();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.write_error(&err))?;
        }
        let temp = self.temp_path();
        fs::write(&temp, content).map_err(|err| self.write_error(&err))?;
        if let Err(err) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(self.write_error(&err));
        }
        info!(path = %self.path.display(), bytes = content.len(), "document saved");
        Ok(SavedRecord {
            path: self.path.clone(),
            bytes: content.len(),
            saved_at: Local::now(),
        })
    }
}
