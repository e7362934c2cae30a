//! # Questionnaire Service Module
//!
//! Reads and writes questionnaire sections. A questionnaire is stored as one
//! document per `(nf_name, version, section_name)`; the endpoints here work on
//! the `questions` of those documents and never on their `files`, which belong
//! to the file services.
//!
//! ## Sub-modules:
//! - `get`: returns one or all sections of a network function version.
//! - `save`: upserts the questions of every submitted section and updates the
//!   version's status.

mod get;
mod save;

use actix_web::web::{get, post, ServiceConfig};

/// Registers `GET /questionnaire` and `POST /questionnaire` on the API scope.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.route("/questionnaire", get().to(get::process))
        .route("/questionnaire", post().to(save::process));
}
