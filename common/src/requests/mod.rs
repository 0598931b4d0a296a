use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body for `POST /api/products/update` and the legacy `POST /api/update`.
///
/// Both fields are optional at the wire level so that a missing barcode or
/// image list is reported by validation with a specific message instead of a
/// generic deserialization error. Images are kept as raw JSON values for the
/// same reason: a non-string entry must fail as "not a data URL".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Value>>,
}

/// Query string of the multipart variant of the update endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuery {
    pub barcode: Option<String>,
}
