mod assets;
mod config;
mod error;
mod multipart;
mod normalize;
mod services;
mod upstream;

use crate::config::Config;
use crate::upstream::{ProductApi, UpstreamClient, API_KEY_ENV};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    if std::env::var(API_KEY_ENV).map_or(true, |key| key.is_empty()) {
        warn!("{} is not set; upstream calls will fail until it is", API_KEY_ENV);
    }

    let client = UpstreamClient::new(&config.upstream, API_KEY_ENV)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let api: Arc<dyn ProductApi> = Arc::new(client);
    let api = web::Data::from(api);

    let host = config.server.host.clone();
    let port = config.server.port;
    info!(
        "Server running at http://{}:{} (upstream {})",
        host, port, config.upstream.base_url
    );

    let server_config = config.server.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(api.clone())
            .configure(services::configure(server_config.clone()))
            .default_service(web::route().to(assets::serve_embedded))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
