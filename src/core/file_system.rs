//! Notebook file location and whole-file I/O

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::{Result, StoreError};

/// Fixed name of the notebook file inside its directory
pub const NOTEBOOK_FILE: &str = "notebook.md";

/// Directory holding one notebook file
#[derive(Debug, Clone)]
pub struct NotebookLocation {
    dir: PathBuf,
}

impl NotebookLocation {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory containing the notebook
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the notebook file
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(NOTEBOOK_FILE)
    }

    /// Create the directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))
    }

    /// Read the whole notebook; a missing file reads as empty text
    pub fn read(&self) -> Result<String> {
        self.ensure_dir()?;
        let path = self.file_path();
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Replace the whole notebook file.
    ///
    /// The text goes to a sibling temp file first and is renamed over the
    /// notebook, so readers see either the old or the new bytes.
    pub fn write(&self, text: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.file_path();
        let tmp_path = self.dir.join(format!(".{NOTEBOOK_FILE}.tmp"));

        fs::write(&tmp_path, text).map_err(|e| StoreError::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(path, e));
        }
        Ok(())
    }
}
