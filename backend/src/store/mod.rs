//! Document store access.
//!
//! Questionnaire sections and per-network-function version lists are JSON
//! documents. Handlers only see the `DocumentStore` trait; `SqliteStore` is the
//! implementation wired up in `main.rs` and, backed by an in-memory database,
//! the one used by the tests.

mod sqlite;

pub use sqlite::SqliteStore;

use common::model::file_record::FileRecord;
use common::model::network_function::{NetworkFunction, VersionDescriptor};
use common::model::questionnaire::{QuestionnaireSection, SectionKey};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("malformed document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("document store connection lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Operations the HTTP services need from the document store.
///
/// Each call is atomic on its own. Nothing groups several calls together, so
/// flows that issue more than one call (such as marking the latest version)
/// can interleave with concurrent requests.
pub trait DocumentStore: Send + Sync {
    /// Sections of one network function version in insertion order, optionally
    /// narrowed to a single section name.
    fn find_sections(
        &self,
        nf_name: &str,
        version: &str,
        section_name: Option<&str>,
    ) -> StoreResult<Vec<QuestionnaireSection>>;

    /// Replaces the questions of a section, creating the section if needed.
    /// The section's files are left untouched.
    fn upsert_questions(&self, key: &SectionKey, questions: &[Value]) -> StoreResult<()>;

    /// Adds `record` to the section's file set, creating the section if needed.
    /// Returns `false` when an identical record was already present.
    fn add_file(&self, key: &SectionKey, record: &FileRecord) -> StoreResult<bool>;

    /// Removes every record named `filename` from the section and returns how
    /// many were removed.
    fn remove_files(&self, key: &SectionKey, filename: &str) -> StoreResult<usize>;

    fn list_network_functions(&self) -> StoreResult<Vec<NetworkFunction>>;

    /// Sets `status` and `latest` on the named version. A missing network
    /// function or version is not an error.
    fn set_version_state(
        &self,
        nf_name: &str,
        version: &str,
        status: &str,
        latest: bool,
    ) -> StoreResult<()>;

    /// Sets `latest = false` on every version of the network function.
    fn clear_latest(&self, nf_name: &str) -> StoreResult<()>;

    /// Sets `latest = true` on the named version only.
    fn mark_latest(&self, nf_name: &str, version: &str) -> StoreResult<()>;

    /// Adds the descriptor to the version set. Returns `false` when the network
    /// function does not exist.
    fn add_version(&self, nf_name: &str, version: &VersionDescriptor) -> StoreResult<bool>;
}
