use astra::Server;
use log::{error, info};

use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::errors::ServerError;
use crate::responses::error_response;
use crate::router::handle;

mod config;
mod db;
mod domain;
mod errors;
mod export;
mod reminders;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    if let Some(parent) = config.db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            error!("Could not create data directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }

    let db = Database::new(config.db_path.to_string_lossy());

    if let Err(e) = init_db(&db) {
        error!("Database initialization failed: {e}");
        std::process::exit(1);
    }
    info!("database ready at {}", config.db_path.display());

    if std::env::args().any(|arg| arg == "--seed") {
        if let Err(e) = db::seed::seed_database(&db) {
            error!("Seeding failed: {e}");
            std::process::exit(1);
        }
    }

    info!("starting server at http://{}", config.bind_addr);

    let server = Server::bind(&config.bind_addr).max_workers(8);

    let serve_config = config.clone();
    let result = server.serve(move |req, _info| match handle(req, &db, &serve_config) {
        Ok(resp) => resp,
        Err(err) => {
            // 404s are routine; anything else deserves a log line.
            if !matches!(err, ServerError::NotFound) {
                error!("request failed: {err}");
            }
            error_response(err)
        }
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}
