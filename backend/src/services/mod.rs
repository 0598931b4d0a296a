//! # API Services
//!
//! HTTP surface of the proxy. Every route validates its input locally and
//! then makes exactly one call through the shared `ProductApi`
//! (`web::Data<dyn ProductApi>`), forwarding the upstream JSON body as-is.
//!
//! ## Sub-modules:
//! - `find`: product lookup by barcode.
//! - `products`: product listing and the dual-encoding (JSON / multipart) update.
//! - `update`: legacy JSON-only update that hand-encodes the multipart body.

use crate::config::ServerConfig;
use crate::error::ProxyError;
use actix_web::web::{self, Bytes};
use actix_web::{HttpResponse, ResponseError};
use log::warn;

/// Builds an app with every `/api` route, a recording upstream and default
/// server limits.
#[cfg(test)]
macro_rules! test_app {
    ($api:expr) => {{
        let api: std::sync::Arc<dyn crate::upstream::ProductApi> = $api;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(api))
                .configure(crate::services::configure(
                    crate::config::ServerConfig::default(),
                )),
        )
    }};
}

pub mod find;
pub mod products;
pub mod update;

/// Registers server limits, the JSON extractor policy and all API scopes.
pub fn configure(server: ServerConfig) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(
            web::JsonConfig::default()
                .limit(server.body_limit_bytes)
                .error_handler(|err, _req| {
                    ProxyError::BadRequest(format!("Invalid JSON body: {}", err)).into()
                }),
        )
        .app_data(web::Data::new(server))
        .service(find::configure_routes())
        .service(products::configure_routes())
        .service(update::configure_routes());
    }
}

/// `200 OK` carrying the upstream body unchanged.
pub(crate) fn forward_json(body: Bytes) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(body)
}

/// Logs and renders a handler failure.
pub(crate) fn reject(err: ProxyError) -> HttpResponse {
    warn!("Request rejected ({}): {}", err.status_code(), err);
    err.error_response()
}
