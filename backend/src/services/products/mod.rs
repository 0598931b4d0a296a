//! Product listing and updates.
//!
//! The provided routes are:
//! - `GET /api/products`: returns the product service's full product list.
//!
//! - `POST /api/products/update`: uploads photos for a product. Two encodings
//!   are accepted and normalized into the same request before validation:
//!   a `multipart/form-data` body whose `image/*` file parts are the photos
//!   (barcode in the `?barcode=` query parameter, as sent by the mobile app),
//!   or a JSON body `{ "barcode": "...", "images": ["data:image/jpeg;base64,..."] }`
//!   as sent by the web client.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod list;
mod update;

const API_PATH: &str = "/api/products";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/update", post().to(update::process))
}
