//! Markupbook - a single-file markdown notebook
//!
//! The notebook is one `notebook.md` split into pages by `## ` heading
//! lines. Pages can be listed, read, replaced, renamed and appended, with
//! ETags to detect edits made behind the caller's back.

pub mod app;
pub mod core;

pub use app::Notebook;
pub use crate::core::{Section, SectionStore, StoreError};
