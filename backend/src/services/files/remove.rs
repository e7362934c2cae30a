use crate::artifactory::{is_success, ArtifactError, STATUS_NOT_FOUND};
use crate::services::errors::{json_error, remote_status};
use crate::state::AppState;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use common::model::questionnaire::SectionKey;
use common::requests::FileQuery;
use common::responses::MessageResponse;
use log::{error, info, warn};

/// How a delete request was resolved.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Removed remotely and from the document store.
    Deleted,
    /// Removed remotely, but no record carried that filename.
    NotInDatabase,
    /// The remote object was already gone; metadata was cleaned up anyway.
    AlreadyAbsent,
    /// The repository refused the delete with this status; metadata untouched.
    RemoteFailed(u16),
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("artifact repository unreachable: {0}")]
    Transport(#[from] ArtifactError),
    #[error("document store update failed: {0}")]
    Database(#[from] StoreError),
}

/// HTTP handler for `DELETE /api/delete_file`.
///
/// - `200 OK` when the file is gone from both stores, including when the
///   repository no longer had it.
/// - `404 Not Found` when the repository deleted it but no record matched.
/// - The repository's own status when it refused the delete.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<FileQuery>,
) -> impl Responder {
    let file_name = &query.file_name;
    match delete_file(&state, &query).await {
        Ok(DeleteOutcome::Deleted) | Ok(DeleteOutcome::AlreadyAbsent) => HttpResponse::Ok()
            .json(MessageResponse::new(format!(
                "File {} deleted successfully",
                file_name
            ))),
        Ok(DeleteOutcome::NotInDatabase) => json_error(
            StatusCode::NOT_FOUND,
            format!("File {} not found in database", file_name),
        ),
        Ok(DeleteOutcome::RemoteFailed(status)) => json_error(
            remote_status(status),
            format!("Failed to delete file {}", file_name),
        ),
        Err(DeleteError::Transport(e)) => {
            error!("Failed to reach Artifactory to delete {}: {}", file_name, e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to delete file {}", file_name),
            )
        }
        Err(DeleteError::Database(e)) => {
            error!("Error updating database after deleting {}: {:?}", file_name, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update database")
        }
    }
}

/// Deletes the remote object first, then every record named `file_name` in the
/// owning section. Metadata is only touched when the remote answer was a success
/// or a `404`.
pub async fn delete_file(
    state: &AppState,
    query: &FileQuery,
) -> Result<DeleteOutcome, DeleteError> {
    let path = state.artifact_root.path_for(
        &query.nf_name,
        &query.version_name,
        &query.section,
        &query.file_name,
    );
    let key = SectionKey::new(&query.nf_name, &query.version_name, &query.section);

    let status = state.artifacts.delete(&path).await?;

    if is_success(status) {
        let removed = state.documents.remove_files(&key, &query.file_name)?;
        if removed == 0 {
            warn!("Deleted {} remotely but no record matched", path.url());
            return Ok(DeleteOutcome::NotInDatabase);
        }
        info!("Deleted {} ({} record(s))", path.url(), removed);
        return Ok(DeleteOutcome::Deleted);
    }

    if status == STATUS_NOT_FOUND {
        let removed = state.documents.remove_files(&key, &query.file_name)?;
        info!(
            "{} was already absent remotely, removed {} stale record(s)",
            path.url(),
            removed
        );
        return Ok(DeleteOutcome::AlreadyAbsent);
    }

    warn!("Artifactory answered {} to DELETE {}", status, path.url());
    Ok(DeleteOutcome::RemoteFailed(status))
}
