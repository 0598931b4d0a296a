use serde::{Deserialize, Serialize};

/// JSON body returned by the proxy for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub message: String,
}
