use crate::services::errors::json_error;
use crate::state::AppState;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use common::model::questionnaire::SectionKey;
use common::requests::SaveQuestionnaireRequest;
use common::responses::MessageResponse;
use log::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("No questions provided")]
    NoQuestions { section_name: String },
    #[error("Failed to update database")]
    Database(#[from] StoreError),
}

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveQuestionnaireRequest>,
) -> impl Responder {
    match save_questionnaire(&state, &payload) {
        Ok(()) => HttpResponse::Created()
            .json(MessageResponse::new("Questionnaire created successfully")),
        Err(SaveError::NoQuestions { section_name }) => {
            warn!("Section {} of {} has no questions", section_name, payload.nf_name);
            json_error(StatusCode::BAD_REQUEST, "No questions provided")
        }
        Err(e @ SaveError::Database(_)) => {
            error!("Error saving questionnaire: {:?}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Upserts the questions of each section in order, then records `status` and
/// `latest` on the matching version of the network function.
///
/// Sections are written one by one: a section without questions stops the
/// request, but the sections before it have already been saved and the version
/// status is left unchanged.
pub fn save_questionnaire(
    state: &AppState,
    payload: &SaveQuestionnaireRequest,
) -> Result<(), SaveError> {
    for section in &payload.sections {
        if section.questions.is_empty() {
            return Err(SaveError::NoQuestions {
                section_name: section.section_name.clone(),
            });
        }
        let key = SectionKey::new(&payload.nf_name, &payload.version, &section.section_name);
        state.documents.upsert_questions(&key, &section.questions)?;
    }

    state.documents.set_version_state(
        &payload.nf_name,
        &payload.version,
        &payload.status,
        payload.latest,
    )?;

    info!(
        "Saved {} section(s) of {} {}",
        payload.sections.len(),
        payload.nf_name,
        payload.version
    );
    Ok(())
}
