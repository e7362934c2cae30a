//! Runtime configuration.
//!
//! Everything the server needs from the environment is resolved once in `main`
//! and then handed to the stores; request handlers never read environment
//! variables. A `.env` file in the working directory is honoured through
//! `dotenvy` before the lookup happens.

use std::path::PathBuf;

const DEFAULT_DOCUMENT_STORE_PATH: &str = "naavi.sqlite";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5004;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Credentials and location of the remote artifact repository.
#[derive(Clone)]
pub struct ArtifactoryConfig {
    /// Base URL including the repository path, e.g.
    /// `https://artifacts.example.com/artifactory/generic-prod/naavi`.
    pub url: String,
    pub username: String,
    pub password: String,
    /// Environment segment inserted right after the base URL.
    pub env_location: String,
}

impl std::fmt::Debug for ArtifactoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactoryConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("env_location", &self.env_location)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub artifactory: ArtifactoryConfig,
    pub document_store_path: PathBuf,
    pub bind_address: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let artifactory = ArtifactoryConfig {
            url: required("ARTIFACTORY_URL")?
                .trim_end_matches('/')
                .to_string(),
            username: required("ARTIFACTORY_USERNAME")?,
            password: required("ARTIFACTORY_PASSWORD")?,
            env_location: required("ENV_LOCATION")?,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            artifactory,
            document_store_path: lookup("DOCUMENT_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT_STORE_PATH)),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
        })
    }
}
