//! Product lookup.
//!
//! - `GET /api/find/{barcode}`: validates the barcode (digits only, length 8,
//!   12, 13 or 14) and returns the product service's record for it. Invalid
//!   barcodes are answered with `400` without contacting the service.
//! - `GET /api/find` and `GET /api/find/`: the barcode is missing, always `400`.

use actix_web::web::{get, scope};
use actix_web::Scope;

mod lookup;

const API_PATH: &str = "/api/find";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(lookup::process_missing))
        .route("/", get().to(lookup::process_missing))
        .route("/{barcode}", get().to(lookup::process))
}
