use crate::model::network_function::VersionDescriptor;
use serde::Deserialize;
use serde_json::Value;

/// Query string shared by the file download and delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct FileQuery {
    pub nf_name: String,
    pub version_name: String,
    pub section: String,
    pub file_name: String,
}

/// Query string of `GET /api/questionnaire`. Without `section` every section
/// of the network function version is returned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireQuery {
    pub nf_name: String,
    pub version: String,
    pub section: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    pub section_name: String,
    pub questions: Vec<Value>,
}

/// Body of `POST /api/questionnaire`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuestionnaireRequest {
    pub nf_name: String,
    pub version: String,
    pub status: String,
    #[serde(default)]
    pub latest: bool,
    pub sections: Vec<SectionPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetLatestQuery {
    pub nf_name: String,
    pub version_name: String,
}

/// Body of `POST /api/add_version`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVersionRequest {
    pub nf_name: String,
    pub version: VersionDescriptor,
}
