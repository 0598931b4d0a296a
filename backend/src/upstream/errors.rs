//! Maps failed upstream calls onto [`ProxyError::Upstream`].
//!
//! The status is the upstream status when there was a response, otherwise
//! 500. The message is taken from the upstream error body when it has one
//! (FastAPI-style `detail` list or string, or `message`), falling back to the
//! operation name plus the transport error text.

use crate::error::ProxyError;
use actix_web::http::StatusCode;
use serde_json::Value;

/// Outbound operation, used to phrase fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Find,
    ListProducts,
    Update,
}

impl Operation {
    fn failure(self) -> &'static str {
        match self {
            Operation::Find => "Failed to fetch product",
            Operation::ListProducts => "Failed to fetch products list",
            Operation::Update => "Failed to update product",
        }
    }
}

pub fn upstream_error(
    op: Operation,
    status: Option<u16>,
    body: Option<&Value>,
    cause: &str,
) -> ProxyError {
    let status = status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    ProxyError::Upstream {
        status,
        message: describe_failure(op, status, body, cause),
    }
}

pub fn describe_failure(
    op: Operation,
    status: StatusCode,
    body: Option<&Value>,
    cause: &str,
) -> String {
    let detail = body.and_then(|b| b.get("detail"));

    if let Some(Value::Array(entries)) = detail {
        let joined = join_validation_messages(entries);
        return if status == StatusCode::UNPROCESSABLE_ENTITY {
            format!("Validation error: {}", joined)
        } else {
            joined
        };
    }

    let free_text = detail
        .and_then(Value::as_str)
        .or_else(|| body.and_then(|b| b.get("message")).and_then(Value::as_str));
    match free_text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("{}: {}", op.failure(), cause),
    }
}

/// `[{ "msg": "a" }, { "loc": [..] }]` -> `a; {"loc":[..]}`
fn join_validation_messages(entries: &[Value]) -> String {
    entries
        .iter()
        .map(|entry| match entry.get("msg").and_then(Value::as_str) {
            Some(msg) => msg.to_string(),
            None => entry.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
