use crate::model::questionnaire::QuestionnaireSection;
use serde::Serialize;

/// Body returned by every failing endpoint.
///
/// `files` is only present on upload failures that happen while the batch is
/// being processed; it lists the files that were stored before the failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            files: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<String>,
    pub nf_name: String,
    pub section: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    pub nf_name: String,
    pub version: String,
    pub sections: Vec<QuestionnaireSection>,
}
