//! Core functionality: section parsing, the notebook store, configuration
//! and git snapshots

pub mod config;
pub mod document;
pub mod error;
pub mod file_system;
pub mod store;
pub mod vcs;

pub use document::Section;
pub use error::StoreError;
pub use store::SectionStore;
