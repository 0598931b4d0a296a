//! # Product Update Service
//!
//! Backend logic for `POST /api/products/update`, which accepts two encodings.
//!
//! ## Workflow
//!
//! 1.  **Encoding Detection**: a `Content-Type` containing `multipart/form-data` selects the
//!     multipart path, with the barcode taken from the `barcode` query parameter. Anything
//!     else is read as a JSON body `{barcode, images}` with base64 data-URL images.
//!
//! 2.  **Decoding**: multipart bodies are drained by `read_multipart_form_data`; JSON bodies
//!     are read up to `server.body_limit_bytes` and shape-checked by `parse_json_body`.
//!
//! 3.  **Normalization**: `normalize` reduces both encodings to one barcode plus an ordered
//!     image list and applies the shared validation rules.
//!
//! 4.  **Upstream Call**: the images are sent to `update/{barcode}` as `image1.jpg`,
//!     `image2.jpg`, ... through `ProductApi::update`.

use crate::config::ServerConfig;
use crate::error::ProxyError;
use crate::multipart::{read_multipart_form_data, MultipartPart};
use crate::normalize::{normalize, parse_json_body, UpdateInput};
use crate::services::{forward_json, reject};
use crate::upstream::ProductApi;
use actix_multipart::Multipart;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::web::{self, Bytes, BytesMut};
use actix_web::{HttpRequest, Responder};
use common::requests::UpdateQuery;
use futures_util::StreamExt;
use log::info;

/// Handler for `POST /api/products/update`.
///
/// - `200 OK` with the upstream confirmation body.
/// - `400 Bad Request` for any validation failure; nothing is sent upstream.
/// - `500` when a multipart body cannot be decoded.
/// - Upstream status (or `500`) when the product service rejects the update.
pub(crate) async fn process(
    req: HttpRequest,
    payload: web::Payload,
    server: web::Data<ServerConfig>,
    api: web::Data<dyn ProductApi>,
) -> impl Responder {
    match update_product(&req, payload, &server, api.get_ref()).await {
        Ok(body) => forward_json(body),
        Err(e) => reject(e),
    }
}

async fn update_product(
    req: &HttpRequest,
    payload: web::Payload,
    server: &ServerConfig,
    api: &dyn ProductApi,
) -> Result<Bytes, ProxyError> {
    let input = read_input(req, payload, server.body_limit_bytes).await?;
    let update = normalize(input)?;
    info!(
        "Forwarding update for {}: {} image(s), {} KB",
        update.barcode,
        update.images.len(),
        update.total_bytes() / 1024
    );
    api.update(&update.barcode, update.images).await
}

/// Decodes the body according to its declared content type.
async fn read_input(
    req: &HttpRequest,
    payload: web::Payload,
    limit: usize,
) -> Result<UpdateInput, ProxyError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.contains("multipart/form-data") {
        let barcode = web::Query::<UpdateQuery>::from_query(req.query_string())
            .ok()
            .and_then(|q| q.into_inner().barcode);
        let parts = read_multipart_form_data(Multipart::new(req.headers(), payload)).await?;
        info!(
            "Received multipart request: barcode={:?}, parts={:?}",
            barcode,
            parts.iter().map(MultipartPart::name).collect::<Vec<_>>()
        );
        Ok(UpdateInput::Multipart { barcode, parts })
    } else {
        let body = read_body(payload, limit).await?;
        let request = parse_json_body(&body)?;
        info!(
            "Received JSON request: barcode={:?}, images={}",
            request.barcode,
            request.images.as_ref().map_or(0, Vec::len)
        );
        Ok(UpdateInput::Json(request))
    }
}

async fn read_body(mut payload: web::Payload, limit: usize) -> Result<BytesMut, ProxyError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk =
            chunk.map_err(|e| ProxyError::BadRequest(format!("Failed to read request body: {}", e)))?;
        if body.len() + chunk.len() > limit {
            return Err(ProxyError::BadRequest(format!(
                "Request body exceeds {} bytes",
                limit
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
