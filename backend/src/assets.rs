//! Embedded frontend bundle.
//!
//! `build.rs` copies the trunk output into `static/dist`, which is compiled
//! into the binary. Any path that is not an asset gets `index.html` so the
//! client router can resolve it, except under `/api/`, where an unknown
//! route is a JSON `404` like every other API error.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use common::model::error::ApiErrorBody;
use include_dir::{include_dir, Dir, File};
use mime_guess::{from_path, Mime};

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

/// Resolves a request path to an embedded file and its content type.
fn resolve(path: &str) -> Option<(&'static File<'static>, Mime)> {
    let relative = path.trim_start_matches('/');
    let relative = if relative.is_empty() { INDEX } else { relative };

    match STATIC_DIR.get_file(relative) {
        Some(file) => Some((file, from_path(relative).first_or_octet_stream())),
        None => STATIC_DIR
            .get_file(INDEX)
            .map(|index| (index, mime_guess::mime::TEXT_HTML_UTF_8)),
    }
}

/// Default service of the app.
pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path();
    if path == "/api" || path.starts_with("/api/") {
        return HttpResponse::NotFound().json(ApiErrorBody {
            status_code: StatusCode::NOT_FOUND.as_u16(),
            message: format!("No API route for {} {}", req.method(), path),
        });
    }

    match resolve(path) {
        Some((file, mime)) => HttpResponse::Ok()
            .content_type(mime.as_ref())
            .body(file.contents()),
        None => HttpResponse::NotFound().body("Not Found"),
    }
}
