//! Legacy update endpoint.
//!
//! - `POST /api/update`: JSON-only predecessor of `POST /api/products/update`,
//!   still used by older web clients. Accepts `{ "barcode", "images": [data URLs] }`,
//!   applies the same validation, and forwards the photos as a multipart body
//!   it frames itself (`multipart::encode_images`) instead of going through the
//!   HTTP client's form builder.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod legacy;

const API_PATH: &str = "/api/update";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(legacy::process))
}
