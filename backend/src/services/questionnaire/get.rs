use crate::services::errors::json_error;
use crate::state::AppState;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::requests::QuestionnaireQuery;
use common::responses::QuestionnaireResponse;
use log::error;

/// Actix web handler for `GET /api/questionnaire`.
///
/// # Returns
/// - `200 OK` with `{"nfName", "version", "sections"}`. An unknown network
///   function or version yields an empty `sections` list.
/// - `500 Internal Server Error` if the document store cannot be read.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<QuestionnaireQuery>,
) -> HttpResponse {
    match get_questionnaire(&state, query.into_inner()) {
        Ok(questionnaire) => HttpResponse::Ok().json(questionnaire),
        Err(e) => {
            error!("Error retrieving questionnaire: {:?}", e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve questionnaire",
            )
        }
    }
}

pub fn get_questionnaire(
    state: &AppState,
    query: QuestionnaireQuery,
) -> Result<QuestionnaireResponse, StoreError> {
    let sections = state.documents.find_sections(
        &query.nf_name,
        &query.version,
        query.section.as_deref(),
    )?;

    Ok(QuestionnaireResponse {
        nf_name: query.nf_name,
        version: query.version,
        sections,
    })
}
