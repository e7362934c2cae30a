mod artifactory;
mod config;
mod services;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use crate::artifactory::{ArtifactRoot, ArtifactoryClient};
use crate::config::Config;
use crate::state::AppState;
use crate::store::SqliteStore;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // A missing .env file is fine; the variables may come from the environment.
    let _ = dotenvy::dotenv();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let documents = SqliteStore::open(&config.document_store_path).map_err(|e| {
        error!(
            "Failed to open document store {}: {}",
            config.document_store_path.display(),
            e
        );
        io::Error::other(e)
    })?;
    let artifacts = ArtifactoryClient::new(
        config.artifactory.username.clone(),
        config.artifactory.password.clone(),
    )
    .map_err(io::Error::other)?;

    let state = AppState {
        documents: Arc::new(documents),
        artifacts: Arc::new(artifacts),
        artifact_root: ArtifactRoot::new(
            config.artifactory.url.clone(),
            config.artifactory.env_location.clone(),
        ),
    };

    info!(
        "Server running at http://{}:{} (artifacts under {}/{})",
        config.bind_address, config.port, config.artifactory.url, config.artifactory.env_location
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(services::configure_routes())
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
