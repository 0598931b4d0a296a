//! Calls from the browser to the proxy's `/api` routes.

use common::model::barcode::Barcode;
use common::model::product::ScanPayload;
use gloo_console as console;
use gloo_net::http::Request;

/// Message stored on the scan state when the proxy answers with a non-2xx status.
pub const FETCH_FAILED: &str = "Failed to fetch product data";

/// Looks a product up through `GET /api/find/{barcode}`.
///
/// The barcode is sent as typed; the proxy validates it. Transport and decode
/// failures surface their own message, any non-2xx answer becomes
/// [`FETCH_FAILED`].
pub async fn find_product(barcode: &str) -> Result<ScanPayload, String> {
    let url = format!("/api/find/{}", barcode.trim());
    let response = Request::get(&url).send().await.map_err(|e| {
        console::error!(format!("Error fetching product data: {}", e));
        e.to_string()
    })?;

    if !response.ok() {
        console::error!(format!(
            "Error fetching product data: {} answered {}",
            url,
            response.status()
        ));
        return Err(FETCH_FAILED.to_string());
    }

    response.json::<ScanPayload>().await.map_err(|e| {
        console::error!(format!("Error decoding product data: {}", e));
        e.to_string()
    })
}

/// Local pre-check used by the scanner form to avoid obviously bad lookups.
pub fn check_barcode(raw: &str) -> Result<(), String> {
    Barcode::parse(raw.trim())
        .map(|_| ())
        .map_err(|e| e.to_string())
}
