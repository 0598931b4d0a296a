//! # Product Lookup Service
//!
//! Backend logic for `GET /api/find/{barcode}`.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives the raw barcode from the URL path. A request
//!     with no path segment (`/api/find` or `/api/find/`) is routed to `process_missing`
//!     and treated as an empty barcode.
//!
//! 2.  **Validation**: `find_product` parses the value into a `Barcode`. A malformed or
//!     empty barcode ends the request with `400` before any outbound call.
//!
//! 3.  **Upstream Call**: the validated barcode is looked up through the shared
//!     `ProductApi` exactly once.
//!
//! 4.  **HTTP Response**: the upstream JSON body is returned unchanged with `200 OK`, or the
//!     mapped upstream error is rendered as `{"statusCode", "message"}`.

use crate::error::ProxyError;
use crate::services::{forward_json, reject};
use crate::upstream::ProductApi;
use actix_web::web::{self, Bytes};
use actix_web::Responder;
use common::model::barcode::Barcode;

/// Handler for `GET /api/find/{barcode}`.
///
/// # Returns
/// - `200 OK` with the upstream JSON body.
/// - `400 Bad Request` when the barcode is malformed.
/// - Upstream status (or `500`) with a JSON error body otherwise.
pub(crate) async fn process(
    barcode: web::Path<String>,
    api: web::Data<dyn ProductApi>,
) -> impl Responder {
    match find_product(&barcode, api.get_ref()).await {
        Ok(body) => forward_json(body),
        Err(e) => reject(e),
    }
}

/// Handler for `GET /api/find` and `GET /api/find/`: always `400 Barcode is required`.
pub(crate) async fn process_missing(api: web::Data<dyn ProductApi>) -> impl Responder {
    match find_product("", api.get_ref()).await {
        Ok(body) => forward_json(body),
        Err(e) => reject(e),
    }
}

pub async fn find_product(raw: &str, api: &dyn ProductApi) -> Result<Bytes, ProxyError> {
    let barcode = Barcode::parse(raw)?;
    api.find(&barcode).await
}
