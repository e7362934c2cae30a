//! Remote artifact repository.
//!
//! File bytes live in an HTTP object store (Artifactory); the questionnaire
//! documents only keep metadata about them. Every object is addressed by a
//! `RemotePath` derived from the identifying fields of the upload, so the same
//! fields always resolve to the same object and a second upload overwrites the
//! first one.
//!
//! Handlers talk to the repository through the `ArtifactStore` trait and get the
//! raw HTTP status back: what counts as success differs per operation (`201` for
//! uploads, any `2xx` for deletes and downloads) and is decided by the caller.

mod client;

pub use client::ArtifactoryClient;

use actix_web::web::Bytes;
use async_trait::async_trait;
use reqwest::Url;
use std::fs::File;

pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NOT_FOUND: u16 = 404;

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to build artifact repository client: {0}")]
    Client(reqwest::Error),
    #[error("artifact repository request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result of a GET against the repository. `body` is empty unless `status` is a success.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub body: Bytes,
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Stores `content` (already rewound to its first byte) at `path`.
    async fn put(
        &self,
        path: &RemotePath,
        content_type: &str,
        content: File,
        content_length: u64,
    ) -> Result<u16, ArtifactError>;

    async fn get(&self, path: &RemotePath) -> Result<Fetched, ArtifactError>;

    async fn delete(&self, path: &RemotePath) -> Result<u16, ArtifactError>;
}

/// Fixed prefix of every remote path: repository base URL plus environment segment.
#[derive(Debug, Clone)]
pub struct ArtifactRoot {
    base_url: String,
    env_location: String,
}

impl ArtifactRoot {
    pub fn new(base_url: impl Into<String>, env_location: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            env_location: env_location.into(),
        }
    }

    /// `<base>/<env>/<nf_name>/<version>/<section>/<filename>`, no escaping applied.
    pub fn path_for(
        &self,
        nf_name: &str,
        version: &str,
        section: &str,
        filename: &str,
    ) -> RemotePath {
        RemotePath {
            url: format!(
                "{}/{}/{}/{}/{}/{}",
                self.base_url, self.env_location, nf_name, version, section, filename
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    url: String,
}

impl RemotePath {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Last segment of the URL path once the URL has been parsed.
    ///
    /// This is the name a download is served under. It can differ from the
    /// name used to build the path: characters such as spaces come back
    /// percent-encoded, and anything after a `?` or `#` is not part of the path.
    pub fn file_name(&self) -> String {
        match Url::parse(&self.url) {
            Ok(url) => url
                .path()
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string(),
            Err(_) => self.url.rsplit('/').next().unwrap_or_default().to_string(),
        }
    }
}
