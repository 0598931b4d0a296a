//! Recording stand-in for the product service, used by handler tests.

use super::errors::{upstream_error, Operation};
use super::ProductApi;
use crate::error::ProxyError;
use crate::multipart::EncodedForm;
use crate::normalize::ImagePart;
use actix_web::web::Bytes;
use async_trait::async_trait;
use common::model::barcode::Barcode;
use serde_json::Value;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Find(String),
    ListProducts,
    Update {
        barcode: String,
        images: Vec<ImagePart>,
    },
    Upload {
        barcode: String,
        content_type: String,
        body: Vec<u8>,
    },
}

enum Reply {
    Body(&'static str),
    Failure { status: u16, body: Value },
}

pub struct FakeProductApi {
    reply: Reply,
    calls: Mutex<Vec<Call>>,
}

impl FakeProductApi {
    /// Answers every call with `body`.
    pub fn ok(body: &'static str) -> Self {
        Self {
            reply: Reply::Body(body),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every call as if the upstream returned `status` with `body`.
    pub fn failing(status: u16, body: Value) -> Self {
        Self {
            reply: Reply::Failure { status, body },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, op: Operation, call: Call) -> Result<Bytes, ProxyError> {
        self.calls.lock().unwrap().push(call);
        match &self.reply {
            Reply::Body(body) => Ok(Bytes::from_static(body.as_bytes())),
            Reply::Failure { status, body } => Err(upstream_error(
                op,
                Some(*status),
                Some(body),
                &format!("upstream responded with status {}", status),
            )),
        }
    }
}

#[async_trait]
impl ProductApi for FakeProductApi {
    async fn find(&self, barcode: &Barcode) -> Result<Bytes, ProxyError> {
        self.answer(Operation::Find, Call::Find(barcode.to_string()))
    }

    async fn list_products(&self) -> Result<Bytes, ProxyError> {
        self.answer(Operation::ListProducts, Call::ListProducts)
    }

    async fn update(&self, barcode: &Barcode, images: Vec<ImagePart>) -> Result<Bytes, ProxyError> {
        self.answer(
            Operation::Update,
            Call::Update {
                barcode: barcode.to_string(),
                images,
            },
        )
    }

    async fn upload(&self, barcode: &Barcode, form: EncodedForm) -> Result<Bytes, ProxyError> {
        self.answer(
            Operation::Update,
            Call::Upload {
                barcode: barcode.to_string(),
                content_type: form.content_type(),
                body: form.body,
            },
        )
    }
}
