use crate::services::errors::json_error;
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use log::error;

pub async fn process(state: web::Data<AppState>) -> impl Responder {
    match state.documents.list_network_functions() {
        Ok(network_functions) => HttpResponse::Ok().json(network_functions),
        Err(e) => {
            error!("Error listing network functions: {:?}", e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve network functions",
            )
        }
    }
}
