//! Fixtures shared by the handler tests: an in-memory artifact repository, an
//! in-memory document store and a small multipart body builder.

use crate::artifactory::{ArtifactError, ArtifactRoot, ArtifactStore, Fetched, RemotePath};
use crate::state::AppState;
use crate::store::{DocumentStore, SqliteStore, StoreError, StoreResult};
use actix_web::web::Bytes;
use async_trait::async_trait;
use common::model::file_record::FileRecord;
use common::model::network_function::{NetworkFunction, VersionDescriptor};
use common::model::questionnaire::{QuestionnaireSection, SectionKey};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::sync::{Arc, Mutex};

pub const ARTIFACT_BASE: &str = "https://artifacts.test/naavi";
pub const ENV_LOCATION: &str = "dev";

/// Builds the test app around `$state` with the production routes.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .service(crate::services::configure_routes()),
        )
        .await
    };
}
pub(crate) use test_app;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Artifact repository kept in a map keyed by URL.
///
/// Behaves like Artifactory for the statuses the services care about: `201` on
/// PUT, `200`/`404` on GET and DELETE. `fail_with` makes every later call answer
/// with the given status, `fail_call` only the n-th call (counting from 1). A
/// failing call leaves the stored objects alone.
#[derive(Default)]
pub struct FakeArtifactStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    forced_status: Mutex<Option<u16>>,
    scripted: Mutex<HashMap<usize, u16>>,
    requests: Mutex<Vec<String>>,
}

impl FakeArtifactStore {
    pub fn fail_with(&self, status: u16) {
        *self.forced_status.lock().unwrap() = Some(status);
    }

    pub fn fail_call(&self, call: usize, status: u16) {
        self.scripted.lock().unwrap().insert(call, status);
    }

    /// Every request received so far, as `"<METHOD> <url>"`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn insert(&self, url: &str, bytes: &[u8]) {
        self.objects.lock().unwrap().insert(
            url.to_string(),
            StoredObject {
                content_type: "application/octet-stream".to_string(),
                bytes: bytes.to_vec(),
            },
        );
    }

    pub fn object(&self, url: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(url).cloned()
    }

    /// Logs the request and returns the status it is scripted to fail with.
    fn record(&self, method: &str, path: &RemotePath) -> Option<u16> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(format!("{} {}", method, path.url()));
        let call = requests.len();
        self.scripted
            .lock()
            .unwrap()
            .remove(&call)
            .or(*self.forced_status.lock().unwrap())
    }
}

#[async_trait]
impl ArtifactStore for FakeArtifactStore {
    async fn put(
        &self,
        path: &RemotePath,
        content_type: &str,
        mut content: File,
        content_length: u64,
    ) -> Result<u16, ArtifactError> {
        if let Some(status) = self.record("PUT", path) {
            return Ok(status);
        }
        let mut bytes = Vec::new();
        content.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes.len() as u64, content_length);
        self.objects.lock().unwrap().insert(
            path.url().to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(201)
    }

    async fn get(&self, path: &RemotePath) -> Result<Fetched, ArtifactError> {
        if let Some(status) = self.record("GET", path) {
            return Ok(Fetched {
                status,
                body: Bytes::new(),
            });
        }
        Ok(match self.object(path.url()) {
            Some(object) => Fetched {
                status: 200,
                body: Bytes::from(object.bytes),
            },
            None => Fetched {
                status: 404,
                body: Bytes::new(),
            },
        })
    }

    async fn delete(&self, path: &RemotePath) -> Result<u16, ArtifactError> {
        if let Some(status) = self.record("DELETE", path) {
            return Ok(status);
        }
        Ok(match self.objects.lock().unwrap().remove(path.url()) {
            Some(_) => 204,
            None => 404,
        })
    }
}

/// Document store whose file-set writes fail; everything else goes to `inner`.
pub struct ReadOnlyFiles {
    inner: Arc<SqliteStore>,
}

impl DocumentStore for ReadOnlyFiles {
    fn find_sections(
        &self,
        nf_name: &str,
        version: &str,
        section_name: Option<&str>,
    ) -> StoreResult<Vec<QuestionnaireSection>> {
        self.inner.find_sections(nf_name, version, section_name)
    }

    fn upsert_questions(&self, key: &SectionKey, questions: &[Value]) -> StoreResult<()> {
        self.inner.upsert_questions(key, questions)
    }

    fn add_file(&self, _key: &SectionKey, _record: &FileRecord) -> StoreResult<bool> {
        Err(StoreError::Database(rusqlite::Error::QueryReturnedNoRows))
    }

    fn remove_files(&self, _key: &SectionKey, _filename: &str) -> StoreResult<usize> {
        Err(StoreError::Database(rusqlite::Error::QueryReturnedNoRows))
    }

    fn list_network_functions(&self) -> StoreResult<Vec<NetworkFunction>> {
        self.inner.list_network_functions()
    }

    fn set_version_state(
        &self,
        nf_name: &str,
        version: &str,
        status: &str,
        latest: bool,
    ) -> StoreResult<()> {
        self.inner.set_version_state(nf_name, version, status, latest)
    }

    fn clear_latest(&self, nf_name: &str) -> StoreResult<()> {
        self.inner.clear_latest(nf_name)
    }

    fn mark_latest(&self, nf_name: &str, version: &str) -> StoreResult<()> {
        self.inner.mark_latest(nf_name, version)
    }

    fn add_version(&self, nf_name: &str, version: &VersionDescriptor) -> StoreResult<bool> {
        self.inner.add_version(nf_name, version)
    }
}

pub struct TestContext {
    pub state: AppState,
    pub documents: Arc<SqliteStore>,
    pub artifacts: Arc<FakeArtifactStore>,
}

pub fn test_context() -> TestContext {
    let documents = Arc::new(SqliteStore::open_in_memory().unwrap());
    let artifacts = Arc::new(FakeArtifactStore::default());
    let state = AppState {
        documents: documents.clone(),
        artifacts: artifacts.clone(),
        artifact_root: ArtifactRoot::new(ARTIFACT_BASE, ENV_LOCATION),
    };
    TestContext {
        state,
        documents,
        artifacts,
    }
}

/// Like `test_context`, but the services see `ReadOnlyFiles`. `documents` is
/// still the writable store underneath, for seeding and inspection.
pub fn read_only_files_context() -> TestContext {
    let mut ctx = test_context();
    ctx.state.documents = Arc::new(ReadOnlyFiles {
        inner: ctx.documents.clone(),
    });
    ctx
}

pub fn remote_url(nf_name: &str, version: &str, section: &str, filename: &str) -> String {
    format!("{ARTIFACT_BASE}/{ENV_LOCATION}/{nf_name}/{version}/{section}/{filename}")
}

pub fn md5_hex(data: &[u8]) -> String {
    let mut context = md5::Context::new();
    context.consume(data);
    format!("{:x}", context.finalize())
}

const BOUNDARY: &str = "questionnaire-test-boundary";

/// Hand-built `multipart/form-data` payload.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
