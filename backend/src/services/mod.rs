pub mod errors;
mod files;
mod questionnaire;
mod versions;

use actix_web::web::{scope, JsonConfig, QueryConfig};
use actix_web::Scope;

const API_PATH: &str = "/api";

/// Configures and returns the Actix scope holding every `/api` route.
///
/// The three route groups share one scope: actix matches scopes by prefix, so a
/// second `/api` scope would never be reached.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .app_data(QueryConfig::default().error_handler(errors::query_error_handler))
        .app_data(
            JsonConfig::default()
                .limit(10 * 1024 * 1024) // 10 MB
                .error_handler(errors::json_error_handler),
        )
        .configure(files::configure)
        .configure(questionnaire::configure)
        .configure(versions::configure)
}
