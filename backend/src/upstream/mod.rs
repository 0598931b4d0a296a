//! Outbound client for the product-data service.
//!
//! Handlers talk to the service through the [`ProductApi`] trait and receive
//! the upstream JSON body untouched on success. [`UpstreamClient`] is the
//! `reqwest` implementation used in production; handler tests swap in the
//! recording fake from `fake.rs`.
//!
//! Every call carries the shared secret in the `x-api-key` header, the
//! configured user agent and `Accept: application/json`. The secret is read
//! when the call is made, so rotating `API_SECRET_KEY` does not need a
//! restart.

pub mod errors;
#[cfg(test)]
pub mod fake;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::multipart::EncodedForm;
use crate::normalize::ImagePart;
use actix_web::web::Bytes;
use async_trait::async_trait;
use common::model::barcode::Barcode;
use errors::{upstream_error, Operation};
use log::{error, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "API_SECRET_KEY";
const API_KEY_HEADER: &str = "x-api-key";

#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `GET find/{barcode}`
    async fn find(&self, barcode: &Barcode) -> Result<Bytes, ProxyError>;

    /// `GET products`
    async fn list_products(&self) -> Result<Bytes, ProxyError>;

    /// `POST update/{barcode}` with one `images` file part per image.
    async fn update(&self, barcode: &Barcode, images: Vec<ImagePart>) -> Result<Bytes, ProxyError>;

    /// `POST update/{barcode}` with a body that was already multipart-encoded.
    async fn upload(&self, barcode: &Barcode, form: EncodedForm) -> Result<Bytes, ProxyError>;
}

pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    /// Environment variable the credential is read from on every call.
    api_key_env: &'static str,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig, api_key_env: &'static str) -> Result<Self, reqwest::Error> {
        if config.accept_invalid_certs {
            warn!(
                "TLS certificate validation toward {} is DISABLED (upstream.accept_invalid_certs)",
                config.base_url
            );
        }
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key_env,
        })
    }

    fn api_key(&self) -> Result<String, ProxyError> {
        std::env::var(self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProxyError::Configuration(format!("{} is not set", self.api_key_env)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ProxyError> {
        let key = self.api_key()?;
        Ok(self
            .http
            .request(method, self.url(path))
            .header(API_KEY_HEADER, key)
            .header(ACCEPT, "application/json"))
    }

    async fn send(op: Operation, request: RequestBuilder) -> Result<Bytes, ProxyError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("{:?} request failed: {}", op, e);
                return Err(upstream_error(op, e.status().map(|s| s.as_u16()), None, &e.to_string()));
            }
        };

        let status = response.status();
        if status.is_success() {
            return response.bytes().await.map_err(|e| {
                error!("{:?} response body could not be read: {}", op, e);
                upstream_error(op, None, None, &e.to_string())
            });
        }

        let body = response
            .bytes()
            .await
            .ok()
            .and_then(|bytes| serde_json::from_slice::<serde_json::Value>(&bytes).ok());
        error!("{:?} upstream answered {}: {:?}", op, status, body);
        Err(upstream_error(
            op,
            Some(status.as_u16()),
            body.as_ref(),
            &format!("upstream responded with status {}", status),
        ))
    }
}

#[async_trait]
impl ProductApi for UpstreamClient {
    async fn find(&self, barcode: &Barcode) -> Result<Bytes, ProxyError> {
        let path = format!("find/{}", barcode);
        info!("Fetching from: {}", self.url(&path));
        Self::send(Operation::Find, self.request(Method::GET, &path)?).await
    }

    async fn list_products(&self) -> Result<Bytes, ProxyError> {
        Self::send(Operation::ListProducts, self.request(Method::GET, "products")?).await
    }

    async fn update(&self, barcode: &Barcode, images: Vec<ImagePart>) -> Result<Bytes, ProxyError> {
        let path = format!("update/{}", barcode);
        let count = images.len();
        let mut form = Form::new();
        for image in images {
            let filename = image.filename();
            let part = Part::bytes(image.data)
                .file_name(filename)
                .mime_str(ImagePart::CONTENT_TYPE)
                .map_err(|e| ProxyError::Configuration(e.to_string()))?;
            form = form.part("images", part);
        }
        info!("Sending update request to {} with {} image(s)", self.url(&path), count);
        Self::send(
            Operation::Update,
            self.request(Method::POST, &path)?.multipart(form),
        )
        .await
    }

    async fn upload(&self, barcode: &Barcode, form: EncodedForm) -> Result<Bytes, ProxyError> {
        let path = format!("update/{}", barcode);
        info!(
            "Sending update request to {} ({} bytes)",
            self.url(&path),
            form.body.len()
        );
        let request = self
            .request(Method::POST, &path)?
            .header(CONTENT_TYPE, form.content_type())
            .body(form.body);
        Self::send(Operation::Update, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multipart::{encode_images, read_multipart_form_data, MultipartPart};
    use actix_multipart::Multipart;
    use actix_web::dev::ServerHandle;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::json;

    const FIND_BODY: &str = r#"{"barcode": "12345678",  "product_name":"Milk"}"#;

    fn authorized(req: &HttpRequest) -> bool {
        req.headers()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            == Some("test-key")
    }

    async fn find(req: HttpRequest, barcode: web::Path<String>) -> HttpResponse {
        if !authorized(&req) {
            return HttpResponse::Unauthorized().json(json!({ "detail": "Invalid API key" }));
        }
        match barcode.as_str() {
            "12345678" => HttpResponse::Ok()
                .content_type("application/json")
                .body(FIND_BODY),
            _ => HttpResponse::NotFound().json(json!({ "detail": "Product not found" })),
        }
    }

    async fn update(req: HttpRequest, payload: Multipart) -> HttpResponse {
        if !authorized(&req) {
            return HttpResponse::Unauthorized().finish();
        }
        let parts = match read_multipart_form_data(payload).await {
            Ok(parts) => parts,
            Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
        };
        let mut received = Vec::new();
        for part in parts {
            if let MultipartPart::File {
                name,
                filename,
                content_type,
                data,
            } = part
            {
                if data.is_empty() {
                    return HttpResponse::UnprocessableEntity().json(json!({
                        "detail": [{ "msg": "bad size" }, { "msg": "bad type" }]
                    }));
                }
                received.push(json!([name, filename, content_type, data.len()]));
            }
        }
        HttpResponse::Ok().json(json!({ "received": received }))
    }

    async fn start_upstream() -> (String, ServerHandle) {
        let server = HttpServer::new(|| {
            App::new()
                .route("/find/{barcode}", web::get().to(find))
                .route(
                    "/products",
                    web::get().to(|| async { HttpResponse::Ok().body("[]") }),
                )
                .route("/update/{barcode}", web::post().to(update))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{}/", addr), handle)
    }

    // Each variable holds one fixed value for the whole test run, so
    // parallel tests never observe a change.
    const TEST_KEY_ENV: &str = "SCAN_PROXY_TEST_KEY";
    const WRONG_KEY_ENV: &str = "SCAN_PROXY_TEST_WRONG_KEY";

    fn client(base_url: &str, api_key_env: &'static str) -> UpstreamClient {
        std::env::set_var(TEST_KEY_ENV, "test-key");
        std::env::set_var(WRONG_KEY_ENV, "wrong");
        let config = UpstreamConfig {
            base_url: base_url.to_string(),
            ..UpstreamConfig::default()
        };
        UpstreamClient::new(&config, api_key_env).unwrap()
    }

    fn barcode(raw: &str) -> Barcode {
        Barcode::parse(raw).unwrap()
    }

    #[test]
    fn joins_paths_onto_the_base_url() {
        let client = client("https://upstream.example/", TEST_KEY_ENV);
        assert_eq!(client.url("find/12345678"), "https://upstream.example/find/12345678");
    }

    #[actix_web::test]
    async fn find_returns_the_upstream_body_verbatim() {
        let (base, handle) = start_upstream().await;
        let client = client(&base, TEST_KEY_ENV);

        let body = client.find(&barcode("12345678")).await.unwrap();
        assert_eq!(body, Bytes::from_static(FIND_BODY.as_bytes()));

        let err = client.find(&barcode("87654321")).await.unwrap_err();
        match err {
            ProxyError::Upstream { status, message } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(message, "Product not found");
            }
            other => panic!("unexpected {other:?}"),
        }
        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn wrong_credential_maps_the_upstream_status() {
        let (base, handle) = start_upstream().await;
        let client = client(&base, WRONG_KEY_ENV);
        let err = client.find(&barcode("12345678")).await.unwrap_err();
        assert_eq!(actix_web::ResponseError::status_code(&err).as_u16(), 401);
        assert_eq!(err.to_string(), "Invalid API key");
        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn update_sends_one_jpeg_part_per_image() {
        let (base, handle) = start_upstream().await;
        let client = client(&base, TEST_KEY_ENV);

        let images = vec![ImagePart::new(0, vec![1, 2, 3]), ImagePart::new(1, vec![4])];
        let body = client.update(&barcode("1234567890123"), images).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({ "received": [
                ["images", "image1.jpg", "image/jpeg", 3],
                ["images", "image2.jpg", "image/jpeg", 1]
            ]})
        );
        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn upload_forwards_a_hand_encoded_body() {
        let (base, handle) = start_upstream().await;
        let client = client(&base, TEST_KEY_ENV);

        let form = encode_images(&[ImagePart::new(0, vec![9; 10])]);
        let body = client.upload(&barcode("12345678"), form).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["received"][0], json!(["images", "image1.jpg", "image/jpeg", 10]));

        let form = encode_images(&[ImagePart::new(0, Vec::new())]);
        let err = client.upload(&barcode("12345678"), form).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation error: bad size; bad type");
        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn missing_credential_fails_before_any_request() {
        // Port 9 (discard) is never contacted: the key lookup fails first.
        let client = client("http://127.0.0.1:9", "SCAN_PROXY_TEST_UNSET_KEY");
        let err = client.find(&barcode("12345678")).await.unwrap_err();
        assert!(matches!(err, ProxyError::Configuration(_)));
        assert!(err.to_string().contains("SCAN_PROXY_TEST_UNSET_KEY"));
    }

    #[actix_web::test]
    async fn unreachable_upstream_is_a_server_error() {
        let (base, handle) = start_upstream().await;
        handle.stop(true).await;
        let client = client(&base, TEST_KEY_ENV);

        let err = client.list_products().await.unwrap_err();
        assert_eq!(actix_web::ResponseError::status_code(&err).as_u16(), 500);
        assert!(err.to_string().starts_with("Failed to fetch products list: "));
    }
}
