//! multipart/form-data in both directions.
//!
//! - [`read_multipart_form_data`] drains an inbound `actix_multipart::Multipart`
//!   stream into owned parts. File contents are accumulated chunk by chunk and
//!   finalized into one buffer when the part ends. A stream error aborts the
//!   whole decode; callers never see a partial part list.
//! - [`encode_images`] builds an outbound body by hand for the legacy update
//!   endpoint, which does not go through `reqwest::multipart`.

use crate::error::ProxyError;
use crate::normalize::ImagePart;
use actix_multipart::Multipart;
use futures_util::StreamExt;

/// One decoded part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    Field {
        name: String,
        value: Vec<u8>,
    },
    File {
        name: String,
        filename: String,
        content_type: Option<String>,
        data: Vec<u8>,
    },
}

impl MultipartPart {
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Field { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

/// Reads every part of `payload`, in order.
pub async fn read_multipart_form_data(
    mut payload: Multipart,
) -> Result<Vec<MultipartPart>, ProxyError> {
    let mut parts = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ProxyError::Decode(e.to_string()))?;
        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()));
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ProxyError::Decode(e.to_string()))?;
            data.extend_from_slice(&chunk);
        }

        parts.push(match filename {
            Some(filename) => MultipartPart::File {
                name,
                filename,
                content_type,
                data,
            },
            None => MultipartPart::Field { name, value: data },
        });
    }

    Ok(parts)
}

/// A ready-to-send multipart body and the boundary it was framed with.
#[derive(Debug, Clone)]
pub struct EncodedForm {
    pub boundary: String,
    pub body: Vec<u8>,
}

impl EncodedForm {
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Encodes `images` as `images` file parts under a fresh random boundary.
pub fn encode_images(images: &[ImagePart]) -> EncodedForm {
    let boundary = format!("----WebKitFormBoundary{}", uuid::Uuid::new_v4().simple());
    encode_images_with_boundary(boundary, images)
}

pub fn encode_images_with_boundary(boundary: String, images: &[ImagePart]) -> EncodedForm {
    let mut body = Vec::with_capacity(images.iter().map(|i| i.data.len() + 160).sum());

    for image in images {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                boundary,
                image.filename(),
                ImagePart::CONTENT_TYPE,
            )
            .as_bytes(),
        );
        body.extend_from_slice(&image.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    EncodedForm { boundary, body }
}
