//! Section store over a single notebook file
//!
//! Every operation reads the whole notebook, computes the new text in
//! memory and writes it back in one go. Nothing is cached between calls.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use super::document::{self, DEFAULT_PREAMBLE};
use super::error::{Result, StoreError};
use super::file_system::NotebookLocation;

/// Fingerprint of notebook bytes: lowercase hex SHA-256
pub fn etag_of(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// Store exposing page operations over one notebook
#[derive(Debug, Clone)]
pub struct SectionStore {
    location: NotebookLocation,
}

impl SectionStore {
    /// Create a store for the notebook inside `dir`; nothing is touched yet
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: NotebookLocation::new(dir),
        }
    }

    pub fn dir(&self) -> &Path {
        self.location.dir()
    }

    /// Path of the notebook file
    pub fn document_path(&self) -> PathBuf {
        self.location.file_path()
    }

    /// Current notebook text, empty if it was never written
    pub fn read(&self) -> Result<String> {
        let text = self.location.read()?;
        tracing::debug!("Read notebook: {} bytes", text.len());
        Ok(text)
    }

    /// Replace the whole notebook text
    pub fn write(&self, text: &str) -> Result<()> {
        self.location.write(text)?;
        tracing::info!(
            "Saved notebook: {} ({} bytes)",
            self.document_path().display(),
            text.len()
        );
        Ok(())
    }

    /// Titles of all sections in file order, duplicates included
    pub fn list_pages(&self) -> Result<Vec<String>> {
        let text = self.read()?;
        let titles: Vec<String> = document::split(&text)
            .into_iter()
            .map(|section| section.title)
            .collect();
        tracing::debug!("Listed {} pages", titles.len());
        Ok(titles)
    }

    /// Content of the first section titled `title`
    pub fn load_page(&self, title: &str) -> Result<String> {
        let text = self.read()?;
        document::find_section(&text, title)
            .map(|span| span.content(&text).to_string())
            .ok_or_else(|| StoreError::NotFound(title.to_string()))
    }

    /// Replace the section titled `old_title` with a fresh block carrying
    /// `new_title` and `html`.
    ///
    /// Heading and content are swapped in a single splice; bytes outside
    /// the section are kept as they are.
    pub fn save_page(&self, old_title: &str, new_title: &str, html: &str) -> Result<()> {
        let text = self.read()?;
        let spans = document::scan(&text);
        if spans.is_empty() {
            return Err(StoreError::NoSections);
        }
        let span = spans
            .iter()
            .find(|span| span.title(&text) == old_title)
            .ok_or_else(|| StoreError::SectionNotFound(old_title.to_string()))?;

        let updated = splice(
            &text,
            span.whole.clone(),
            &document::section_block(new_title, html),
        );
        self.write(&updated)
    }

    /// ETag of the notebook as it is on disk right now
    pub fn compute_etag(&self) -> Result<String> {
        Ok(etag_of(&self.read()?))
    }

    /// `save_page` gated on the caller's last seen ETag.
    ///
    /// An empty `expected_etag` skips the check. The check and the save read
    /// the file separately, so this detects conflicting edits made before
    /// the call; it does not lock out writers racing with it.
    pub fn save_page_if_match(
        &self,
        old_title: &str,
        new_title: &str,
        html: &str,
        expected_etag: &str,
    ) -> Result<()> {
        if !expected_etag.is_empty() {
            let actual = self.compute_etag()?;
            if actual != expected_etag {
                tracing::warn!(
                    "Rejected save of '{}': etag {} does not match {}",
                    old_title,
                    expected_etag,
                    actual
                );
                return Err(StoreError::EtagMismatch {
                    expected: expected_etag.to_string(),
                    actual,
                });
            }
        }
        self.save_page(old_title, new_title, html)
    }

    /// Append a new section titled `title` with placeholder content
    pub fn insert_new_section(&self, title: &str) -> Result<()> {
        let text = self.read()?;
        let stub = document::new_section_stub(title);
        let updated = if text.is_empty() {
            format!("{DEFAULT_PREAMBLE}{stub}")
        } else {
            format!("{text}{stub}")
        };
        self.write(&updated)
    }

    /// Rewrite only the heading line of the section titled `old_title`
    pub fn rename_section(&self, old_title: &str, new_title: &str) -> Result<()> {
        let text = self.read()?;
        let span = document::find_section(&text, old_title)
            .ok_or_else(|| StoreError::SectionNotFound(old_title.to_string()))?;

        let updated = splice(&text, span.heading, &document::heading_line(new_title));
        self.write(&updated)
    }
}

/// New text with `range` of `text` replaced by `replacement`
fn splice(text: &str, range: std::ops::Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - range.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}
