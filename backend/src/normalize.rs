//! Turns either accepted update encoding into one validated request.
//!
//! Decoding happens first ([`UpdateInput`] → raw barcode + image bytes), then
//! the shared checks run in a fixed order, first failure wins:
//!
//! 1. barcode present
//! 2. barcode is digits only
//! 3. barcode length is 8, 12, 13 or 14
//! 4. at least one image
//!
//! Nothing here touches the network, so a rejected request never reaches the
//! product service.

use crate::error::ProxyError;
use crate::multipart::MultipartPart;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use common::model::barcode::Barcode;
use common::requests::UpdateProductRequest;
use serde_json::Value;

/// One uploaded image. `index` is its position in the request and drives
/// the filename sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub index: usize,
    pub data: Vec<u8>,
}

impl ImagePart {
    /// Every image is forwarded as JPEG regardless of what the client declared.
    pub const CONTENT_TYPE: &'static str = "image/jpeg";

    pub fn new(index: usize, data: Vec<u8>) -> Self {
        Self { index, data }
    }

    /// `image1.jpg`, `image2.jpg`, ...
    pub fn filename(&self) -> String {
        format!("image{}.jpg", self.index + 1)
    }
}

/// The two request encodings the update endpoint accepts.
#[derive(Debug)]
pub enum UpdateInput {
    /// multipart/form-data body; the barcode travels in the query string.
    Multipart {
        barcode: Option<String>,
        parts: Vec<MultipartPart>,
    },
    /// JSON body with base64 data-URL images.
    Json(UpdateProductRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUpdate {
    pub barcode: Barcode,
    pub images: Vec<ImagePart>,
}

impl NormalizedUpdate {
    pub fn total_bytes(&self) -> usize {
        self.images.iter().map(|i| i.data.len()).sum()
    }
}

pub const DATA_URL_ERROR: &str = "All images must be base64 data URLs";

/// Standard alphabet, padding optional.
const DATA_URL_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn normalize(input: UpdateInput) -> Result<NormalizedUpdate, ProxyError> {
    let (barcode, images) = match input {
        UpdateInput::Multipart { barcode, parts } => (barcode, image_files(parts)),
        UpdateInput::Json(request) => {
            let images = request
                .images
                .unwrap_or_default()
                .iter()
                .map(|value| {
                    value
                        .as_str()
                        .and_then(decode_data_url)
                        .ok_or_else(|| ProxyError::BadRequest(DATA_URL_ERROR.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            (request.barcode, images)
        }
    };

    let barcode = Barcode::parse(barcode.as_deref().unwrap_or_default())?;
    if images.is_empty() {
        return Err(ProxyError::BadRequest("No images provided".to_string()));
    }

    Ok(NormalizedUpdate {
        barcode,
        images: images
            .into_iter()
            .enumerate()
            .map(|(index, data)| ImagePart::new(index, data))
            .collect(),
    })
}

/// Keeps the file parts declared as `image/*`, in decode order.
fn image_files(parts: Vec<MultipartPart>) -> Vec<Vec<u8>> {
    parts
        .into_iter()
        .filter_map(|part| match part {
            MultipartPart::File {
                content_type: Some(content_type),
                data,
                ..
            } if content_type.starts_with("image/") => Some(data),
            _ => None,
        })
        .collect()
}

/// Decodes `data:<media-type>;base64,<payload>` into the payload bytes.
///
/// The payload may be unpadded or wrapped across lines.
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let (header, payload) = url.strip_prefix("data:")?.split_once(',')?;
    if !header.ends_with(";base64") {
        return None;
    }
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    DATA_URL_ENGINE.decode(compact).ok()
}

/// Parses a JSON update body, reporting shape errors as client errors.
pub fn parse_json_body(bytes: &[u8]) -> Result<UpdateProductRequest, ProxyError> {
    let invalid = || {
        ProxyError::BadRequest(
            "Invalid request format. Required: barcode (string) and images (array)".to_string(),
        )
    };
    match serde_json::from_slice::<Value>(bytes).map_err(|_| invalid())? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_input(body: Value) -> UpdateInput {
        UpdateInput::Json(serde_json::from_value(body).unwrap())
    }

    fn message(err: ProxyError) -> String {
        match err {
            ProxyError::BadRequest(msg) => msg,
            other => panic!("expected a client error, got {other:?}"),
        }
    }

    #[test]
    fn decodes_a_single_byte_image() {
        let update = normalize(json_input(json!({
            "barcode": "12345678",
            "images": ["data:image/jpeg;base64,QQ=="]
        })))
        .unwrap();
        assert_eq!(update.barcode.as_str(), "12345678");
        assert_eq!(update.images, vec![ImagePart::new(0, vec![0x41])]);
        assert_eq!(update.images[0].filename(), "image1.jpg");
    }

    #[test]
    fn accepts_unpadded_and_wrapped_payloads() {
        assert_eq!(decode_data_url("data:image/jpeg;base64,QQ"), Some(b"A".to_vec()));
        assert_eq!(
            decode_data_url("data:image/jpeg;base64,QUJD\nREVG"),
            Some(b"ABCDEF".to_vec())
        );
        assert_eq!(
            decode_data_url("data:image/png;base64,QUJD\r\n REVG\r\nR0g="),
            Some(b"ABCDEFGH".to_vec())
        );
        assert_eq!(decode_data_url("data:image/png;base64,QQ=="), Some(b"A".to_vec()));
    }

    #[test]
    fn rejects_images_that_are_not_data_urls() {
        for bad in [json!("QQ=="), json!("data:image/jpeg,QQ=="), json!(42), json!("data:image/png;base64,@@@")] {
            let err = normalize(json_input(json!({ "barcode": "12345678", "images": [bad] })))
                .unwrap_err();
            assert!(message(err).contains("base64 data URLs"));
        }
    }

    #[test]
    fn barcode_rules_apply_in_order() {
        let cases = [
            (json!({ "images": [] }), "Barcode is required"),
            (json!({ "barcode": "", "images": [] }), "Barcode is required"),
            (json!({ "barcode": "12ab", "images": [] }), "Barcode must contain only digits"),
            (json!({ "barcode": "1234567", "images": [] }), "Invalid barcode length"),
            (json!({ "barcode": "1234567890123", "images": [] }), "No images provided"),
            (json!({ "barcode": "1234567890123" }), "No images provided"),
        ];
        for (body, expected) in cases {
            let msg = message(normalize(json_input(body)).unwrap_err());
            assert!(msg.starts_with(expected), "{msg} should start with {expected}");
        }
    }

    #[test]
    fn multipart_keeps_only_image_files_in_order() {
        let parts = vec![
            MultipartPart::Field {
                name: "barcode".into(),
                value: b"ignored".to_vec(),
            },
            MultipartPart::File {
                name: "images".into(),
                filename: "b.png".into(),
                content_type: Some("image/png".into()),
                data: vec![2],
            },
            MultipartPart::File {
                name: "doc".into(),
                filename: "c.txt".into(),
                content_type: Some("text/plain".into()),
                data: vec![3],
            },
            MultipartPart::File {
                name: "images".into(),
                filename: "d.heic".into(),
                content_type: Some("image/heic".into()),
                data: vec![4, 4],
            },
            MultipartPart::File {
                name: "images".into(),
                filename: "e".into(),
                content_type: None,
                data: vec![5],
            },
        ];
        let update = normalize(UpdateInput::Multipart {
            barcode: Some("12345678901234".into()),
            parts,
        })
        .unwrap();
        assert_eq!(
            update.images,
            vec![ImagePart::new(0, vec![2]), ImagePart::new(1, vec![4, 4])]
        );
        assert_eq!(update.total_bytes(), 3);
    }

    #[test]
    fn multipart_barcode_comes_from_the_query() {
        let err = normalize(UpdateInput::Multipart {
            barcode: None,
            parts: vec![MultipartPart::Field {
                name: "barcode".into(),
                value: b"12345678".to_vec(),
            }],
        })
        .unwrap_err();
        assert_eq!(message(err), "Barcode is required");
    }

    #[test]
    fn malformed_json_bodies_are_client_errors() {
        let bodies: [&[u8]; 3] = [b"not json", b"[1,2]", b"{\"barcode\": 5}"];
        for body in bodies {
            let msg = message(parse_json_body(body).unwrap_err());
            assert!(msg.starts_with("Invalid request format"));
        }
        let parsed = parse_json_body(br#"{"barcode":"12345678","images":["data:image/png;base64,AA=="]}"#)
            .unwrap();
        assert_eq!(parsed.barcode.as_deref(), Some("12345678"));
    }
}
