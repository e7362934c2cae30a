use crate::services::errors::json_error;
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use common::requests::AddVersionRequest;
use common::responses::MessageResponse;
use log::{error, info};

/// Handler for `POST /api/add_version`.
///
/// Adding a descriptor that is already present is accepted and changes nothing.
/// Returns `404 Not Found` when the network function does not exist.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<AddVersionRequest>,
) -> impl Responder {
    let AddVersionRequest { nf_name, version } = payload.into_inner();

    match state.documents.add_version(&nf_name, &version) {
        Ok(true) => {
            info!("Version {} added to {}", version.name, nf_name);
            HttpResponse::Ok().json(MessageResponse::new(format!(
                "Version {} added to {}",
                version.name, nf_name
            )))
        }
        Ok(false) => json_error(
            StatusCode::NOT_FOUND,
            format!("NF {} not found", nf_name),
        ),
        Err(e) => {
            error!("Error adding version {} to {}: {:?}", version.name, nf_name, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update database")
        }
    }
}
