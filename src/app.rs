//! Caller-facing notebook operations
//!
//! Wraps the section store with configuration and optional git snapshots.
//! Store errors pass through unchanged, so callers can downcast to
//! [`StoreError`](crate::core::StoreError).

use anyhow::Result;

use crate::core::config::AppConfig;
use crate::core::store::SectionStore;
use crate::core::vcs;

/// A notebook opened for one caller session
#[derive(Debug, Clone)]
pub struct Notebook {
    store: SectionStore,
    config: AppConfig,
}

impl Notebook {
    /// Open the notebook in the configured directory
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: SectionStore::new(config.notebook_dir.clone()),
            config,
        }
    }

    pub fn store(&self) -> &SectionStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Titles of all pages
    pub fn list_pages(&self) -> Result<Vec<String>> {
        Ok(self.store.list_pages()?)
    }

    /// Content of a page by title
    pub fn load_page(&self, title: &str) -> Result<String> {
        Ok(self.store.load_page(title)?)
    }

    /// Replace a page, optionally only if the notebook still has `expected_etag`
    pub fn save_page(
        &self,
        old_title: &str,
        new_title: &str,
        html: &str,
        expected_etag: Option<&str>,
    ) -> Result<()> {
        self.store
            .save_page_if_match(old_title, new_title, html, expected_etag.unwrap_or(""))?;
        self.after_edit(&format!("Save page {new_title}"));
        Ok(())
    }

    /// Current notebook ETag
    pub fn etag(&self) -> Result<String> {
        Ok(self.store.compute_etag()?)
    }

    /// Append a new page
    pub fn new_page(&self, title: &str) -> Result<()> {
        self.store.insert_new_section(title)?;
        self.after_edit(&format!("New page {title}"));
        Ok(())
    }

    /// Change a page title, keeping its content
    pub fn rename_page(&self, old_title: &str, new_title: &str) -> Result<()> {
        self.store.rename_section(old_title, new_title)?;
        self.after_edit(&format!("Rename page {old_title} to {new_title}"));
        Ok(())
    }

    /// Commit the notebook file into git and return the commit id
    pub fn snapshot(&self, message: &str) -> Result<String> {
        let id = vcs::commit_notebook(
            self.store.dir(),
            message,
            &self.config.commit_author,
            &self.config.default_branch,
        )?;
        Ok(id)
    }

    fn after_edit(&self, message: &str) {
        if !self.config.auto_commit {
            return;
        }
        // The edit is already on disk; a failed snapshot must not undo it
        if let Err(e) = self.snapshot(message) {
            tracing::warn!("Auto-commit failed: {}", e);
        }
    }
}
