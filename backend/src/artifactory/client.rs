use super::{ArtifactError, ArtifactStore, Fetched, RemotePath};
use actix_web::web::Bytes;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client};
use std::fs::File;

/// `ArtifactStore` talking to Artifactory over HTTPS with basic auth.
pub struct ArtifactoryClient {
    http: Client,
    username: String,
    password: String,
}

impl ArtifactoryClient {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ArtifactError> {
        let http = Client::builder().build().map_err(ArtifactError::Client)?;
        Ok(Self {
            http,
            username: username.into(),
            password: password.into(),
        })
    }
}

#[async_trait]
impl ArtifactStore for ArtifactoryClient {
    async fn put(
        &self,
        path: &RemotePath,
        content_type: &str,
        content: File,
        content_length: u64,
    ) -> Result<u16, ArtifactError> {
        // The spooled file is streamed, not read into memory.
        let body = Body::from(tokio::fs::File::from_std(content));
        let response = self
            .http
            .put(path.url())
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, content_length)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!("PUT {} -> {}", path.url(), status);
        Ok(status)
    }

    async fn get(&self, path: &RemotePath) -> Result<Fetched, ArtifactError> {
        let response = self
            .http
            .get(path.url())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        debug!("GET {} -> {}", path.url(), status);
        let body = if status.is_success() {
            response.bytes().await?
        } else {
            Bytes::new()
        };
        Ok(Fetched {
            status: status.as_u16(),
            body,
        })
    }

    async fn delete(&self, path: &RemotePath) -> Result<u16, ArtifactError> {
        let response = self
            .http
            .delete(path.url())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!("DELETE {} -> {}", path.url(), status);
        Ok(status)
    }
}
