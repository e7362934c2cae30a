use serde::{Deserialize, Serialize};

/// Metadata of one uploaded artifact, embedded in the `files` set of a
/// questionnaire section.
///
/// Two records are the same record only when all three fields match, so the
/// set keeps one entry per distinct `(filename, checksum, question_id)`. A file
/// re-uploaded with different content under the same name gets a second entry
/// instead of replacing the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Name the file was uploaded with; also the last segment of its remote path.
    pub filename: String,
    /// Lowercase hex MD5 digest of the file content.
    pub checksum: String,
    /// The question this file answers.
    pub question_id: String,
}
