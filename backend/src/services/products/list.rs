//! # Product Listing Service
//!
//! Backend logic for `GET /api/products`. The request carries no input; the product
//! service's list is fetched once and forwarded as-is.

use crate::services::{forward_json, reject};
use crate::upstream::ProductApi;
use actix_web::{web, Responder};

/// Handler for `GET /api/products`.
///
/// # Returns
/// - `200 OK` with the upstream list body.
/// - Upstream status (or `500`) with a JSON error body when the list cannot be fetched.
pub(crate) async fn process(api: web::Data<dyn ProductApi>) -> impl Responder {
    match api.list_products().await {
        Ok(body) => forward_json(body),
        Err(e) => reject(e),
    }
}
