//! Shared application state.
//!
//! `AppState` is built once in `main.rs` and injected into every worker as
//! `web::Data<AppState>`. It carries the two external collaborators the
//! services work against, behind trait objects so tests can substitute them.

use crate::artifactory::{ArtifactRoot, ArtifactStore};
use crate::store::DocumentStore;
use std::sync::Arc;

/// Clonable handle to the stores used by the request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authoritative store for questionnaire documents and file metadata.
    pub documents: Arc<dyn DocumentStore>,

    /// Authoritative store for file bytes.
    pub artifacts: Arc<dyn ArtifactStore>,

    /// Prefix used to resolve the remote path of every file.
    pub artifact_root: ArtifactRoot,
}
