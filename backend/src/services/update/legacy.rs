//! # Legacy Update Service
//!
//! Backend logic for `POST /api/update`. JSON only: the body is validated like the JSON
//! branch of `/api/products/update`, then the images are framed into a multipart body by
//! hand (`encode_images`) and posted upstream with that body's own boundary.

use crate::error::ProxyError;
use crate::multipart::encode_images;
use crate::normalize::{normalize, UpdateInput};
use crate::services::{forward_json, reject};
use crate::upstream::ProductApi;
use actix_web::web::{self, Bytes};
use actix_web::Responder;
use common::requests::UpdateProductRequest;
use log::info;

pub(crate) async fn process(
    payload: web::Json<UpdateProductRequest>,
    api: web::Data<dyn ProductApi>,
) -> impl Responder {
    match upload_images(payload.into_inner(), api.get_ref()).await {
        Ok(body) => forward_json(body),
        Err(e) => reject(e),
    }
}

async fn upload_images(
    request: UpdateProductRequest,
    api: &dyn ProductApi,
) -> Result<Bytes, ProxyError> {
    let update = normalize(UpdateInput::Json(request))?;
    for image in &update.images {
        info!(
            "Processing image {}: {} bytes",
            image.index + 1,
            image.data.len()
        );
    }
    let form = encode_images(&update.images);
    api.upload(&update.barcode, form).await
}
