//! Files attached to questionnaire answers.
//!
//! File bytes are proxied to the artifact repository while the questionnaire
//! section keeps a set of `FileRecord`s describing them. Mutating endpoints
//! always talk to the repository first and only touch the document store once
//! the remote side has answered.
//!
//! The provided routes are:
//! - `POST /api/upload`: multipart/form-data with one or more file parts (at
//!   least one named `file`) and the text fields `nf_name`, `section`,
//!   `version` and `questionId`. Each file is hashed while it is spooled, PUT to
//!   the repository, and recorded in the section on a `201`. The first failing
//!   file stops the batch.
//!
//! - `DELETE /api/delete_file`: removes the remote object, then every record
//!   with the same filename. A remote `404` still cleans the metadata up.
//!
//! - `GET /api/download_file`: streams the remote object back as an attachment.
//!   The document store is not consulted.

use actix_web::web::{delete, get, post, ServiceConfig};

mod checksum;
mod download;
mod remove;
mod upload;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.route("/upload", post().to(upload::process))
        .route("/delete_file", delete().to(remove::process))
        .route("/download_file", get().to(download::process));
}
