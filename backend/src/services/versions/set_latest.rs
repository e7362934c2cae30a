use crate::services::errors::json_error;
use crate::state::AppState;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SetLatestQuery;
use common::responses::MessageResponse;
use log::error;

pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<SetLatestQuery>,
) -> impl Responder {
    match set_latest(&state, &query) {
        Ok(()) => HttpResponse::Created().json(MessageResponse::new(format!(
            "{} updated to be latest version.",
            query.version_name
        ))),
        Err(e) => {
            error!(
                "Error marking {} {} as latest: {:?}",
                query.nf_name, query.version_name, e
            );
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update database")
        }
    }
}

/// Clears `latest` on every version, then sets it on the requested one.
///
/// These are two separate store updates. A concurrent request can observe the
/// network function with no latest version in between, and two concurrent calls
/// for different versions can leave both unmarked or both marked.
pub fn set_latest(state: &AppState, query: &SetLatestQuery) -> Result<(), StoreError> {
    state.documents.clear_latest(&query.nf_name)?;
    state
        .documents
        .mark_latest(&query.nf_name, &query.version_name)
}
