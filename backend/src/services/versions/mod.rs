//! Version metadata of network functions.
//!
//! Each network function document holds an ordered list of version descriptors
//! (`name`, `status`, `latest`). Network function documents are provisioned
//! outside this service; the routes below only read them and edit their
//! version lists.
//!
//! - `GET /api/nf_info`: every network function with its versions.
//! - `POST /api/add_version`: adds a descriptor to an existing network function.
//! - `POST /api/set_latest`: moves the `latest` flag to one version.

mod add;
mod list;
mod set_latest;

use actix_web::web::{get, post, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.route("/nf_info", get().to(list::process))
        .route("/add_version", post().to(add::process))
        .route("/set_latest", post().to(set_latest::process));
}
