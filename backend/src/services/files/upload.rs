use super::checksum::{spool_and_hash, SpoolError, SpooledFile};
use crate::artifactory::{ArtifactError, STATUS_CREATED};
use crate::state::AppState;
use crate::store::StoreError;
use actix_multipart::{Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use common::model::file_record::FileRecord;
use common::model::questionnaire::SectionKey;
use common::responses::{ErrorResponse, UploadResponse};
use futures_util::StreamExt;
use log::{error, info, warn};
use std::collections::HashMap;

const FILE_FIELD: &str = "file";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Why an upload request failed. The `Display` text is what the client sees;
/// the underlying causes are only logged.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file part")]
    NoFilePart,
    #[error("Missing form field: {0}")]
    MissingField(&'static str),
    #[error("Malformed multipart payload")]
    Multipart(#[from] MultipartError),
    #[error("Failed to process file")]
    Spool(#[from] SpoolError),
    #[error("Failed to process file")]
    Transport(#[from] ArtifactError),
    #[error("Failed to upload file to Artifactory")]
    Rejected,
    #[error("Failed to update database")]
    Database(#[from] StoreError),
}

impl UploadError {
    fn status(&self) -> StatusCode {
        match self {
            UploadError::NoFilePart | UploadError::MissingField(_) | UploadError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An upload failure, plus the files already stored when it happened inside
/// the batch (`None` when the request was rejected before the batch started).
#[derive(Debug)]
pub struct UploadFailure {
    pub error: UploadError,
    pub files: Option<Vec<String>>,
}

impl From<UploadError> for UploadFailure {
    fn from(error: UploadError) -> Self {
        Self { error, files: None }
    }
}

/// Where the files of one request belong.
#[derive(Debug)]
struct UploadTarget {
    nf_name: String,
    section: String,
    version: String,
    question_id: String,
}

impl UploadTarget {
    fn section_key(&self) -> SectionKey {
        SectionKey::new(&self.nf_name, &self.version, &self.section)
    }
}

#[derive(Debug)]
struct PendingFile {
    filename: String,
    content_type: String,
    spooled: SpooledFile,
}

/// HTTP handler for `POST /api/upload`.
///
/// - `201 Created` with the stored filenames on success.
/// - `400 Bad Request` when the `file` part or a form field is missing.
/// - `500 Internal Server Error` when the repository rejects a file or the
///   metadata cannot be written.
pub async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    match upload_files(&state, payload).await {
        Ok(uploaded) => HttpResponse::Created().json(uploaded),
        Err(failure) => HttpResponse::build(failure.error.status()).json(ErrorResponse {
            error: failure.error.to_string(),
            files: failure.files,
        }),
    }
}

/// Reads the whole form, then stores every file in request order.
///
/// Files are spooled while the form is read because text fields may follow the
/// file parts in the payload. Processing stops at the first failing file; files
/// stored before it stay stored, both remotely and in the document store.
pub async fn upload_files(
    state: &AppState,
    payload: Multipart,
) -> Result<UploadResponse, UploadFailure> {
    let (target, files) = read_form(payload).await?;

    let mut uploaded = Vec::with_capacity(files.len());
    for file in files {
        let filename = file.filename.clone();
        if let Err(error) = store_file(state, &target, file).await {
            return Err(UploadFailure {
                error,
                files: Some(uploaded),
            });
        }
        uploaded.push(filename);
    }

    Ok(UploadResponse {
        message: "File uploaded successfully".to_string(),
        files: uploaded,
        nf_name: target.nf_name,
        section: target.section,
        version: target.version,
    })
}

async fn read_form(
    mut payload: Multipart,
) -> Result<(UploadTarget, Vec<PendingFile>), UploadError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut files = Vec::new();
    let mut has_file_part = false;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
            .unwrap_or_default();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()));

        match filename {
            Some(filename) => {
                has_file_part |= name == FILE_FIELD;
                let content_type = field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
                let spooled = spool_and_hash(&mut field).await.map_err(|e| {
                    error!("Failed to spool upload {}: {}", filename, e);
                    e
                })?;
                files.push(PendingFile {
                    filename,
                    content_type,
                    spooled,
                });
            }
            None => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    bytes.extend_from_slice(&chunk?);
                }
                fields.insert(name, String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }

    if !has_file_part {
        return Err(UploadError::NoFilePart);
    }

    let mut take =
        |key: &'static str| fields.remove(key).ok_or(UploadError::MissingField(key));
    let target = UploadTarget {
        nf_name: take("nf_name")?,
        section: take("section")?,
        version: take("version")?,
        question_id: take("questionId")?,
    };

    Ok((target, files))
}

/// PUTs one file and records it. Metadata is written only after a `201`; if the
/// metadata write then fails, the remote object is left in place.
async fn store_file(
    state: &AppState,
    target: &UploadTarget,
    file: PendingFile,
) -> Result<(), UploadError> {
    let path = state.artifact_root.path_for(
        &target.nf_name,
        &target.version,
        &target.section,
        &file.filename,
    );

    let status = state
        .artifacts
        .put(
            &path,
            &file.content_type,
            file.spooled.file,
            file.spooled.size,
        )
        .await
        .map_err(|e| {
            error!("Failed to send {} to Artifactory: {}", path.url(), e);
            e
        })?;
    if status != STATUS_CREATED {
        warn!("Artifactory answered {} to PUT {}", status, path.url());
        return Err(UploadError::Rejected);
    }

    let record = FileRecord {
        filename: file.filename,
        checksum: file.spooled.checksum,
        question_id: target.question_id.clone(),
    };
    let inserted = state
        .documents
        .add_file(&target.section_key(), &record)
        .map_err(|e| {
            error!("Error updating database for {}: {:?}", path.url(), e);
            e
        })?;

    info!(
        "Uploaded {} ({}) to {}{}",
        record.filename,
        record.checksum,
        path.url(),
        if inserted { "" } else { ", metadata unchanged" }
    );
    Ok(())
}
