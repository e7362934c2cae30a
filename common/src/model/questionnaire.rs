use crate::model::file_record::FileRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies one questionnaire section document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionKey {
    pub nf_name: String,
    pub version: String,
    pub section_name: String,
}

impl SectionKey {
    pub fn new(
        nf_name: impl Into<String>,
        version: impl Into<String>,
        section_name: impl Into<String>,
    ) -> Self {
        Self {
            nf_name: nf_name.into(),
            version: version.into(),
            section_name: section_name.into(),
        }
    }
}

/// A questionnaire section as stored in the document store.
///
/// `questions` is kept as free-form JSON: the structure of a question is owned
/// by the client that renders the form, the backend only stores and returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSection {
    pub nf_name: String,
    pub version: String,
    pub section_name: String,
    #[serde(default)]
    pub questions: Vec<Value>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}
