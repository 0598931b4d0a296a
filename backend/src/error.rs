//! Uniform error type for every `/api` handler.
//!
//! Each variant maps to an HTTP status and is rendered as
//! `{"statusCode": .., "message": ..}` (`common::model::error::ApiErrorBody`).

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::barcode::BarcodeError;
use common::model::error::ApiErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Malformed client input: barcode, image list, data URLs, JSON shape.
    #[error("{0}")]
    BadRequest(String),

    /// Transport failure or non-2xx answer from the product service.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// The multipart stream could not be read to completion.
    #[error("Invalid multipart/form-data request: {0}")]
    Decode(String),

    /// Missing or unusable server-side configuration.
    #[error("{0}")]
    Configuration(String),
}

impl From<BarcodeError> for ProxyError {
    fn from(err: BarcodeError) -> Self {
        ProxyError::BadRequest(err.to_string())
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Decode(_) | ProxyError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ApiErrorBody {
            status_code: status.as_u16(),
            message: self.to_string(),
        })
    }
}
