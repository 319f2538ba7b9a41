//! Router fixtures shared by handler tests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use flamecheck_config::AppConfig;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::routes;
use crate::ServerState;

const BOUNDARY: &str = "flamecheck-test-boundary";

/// Temporary application root with templates, static assets and references:
/// `fire/` holds `blaze.jpg` and `both.jpg`, `not_fire/` holds `forest.jpg`
/// and `both.jpg`.
pub struct Fixture {
    pub root: TempDir,
    pub app: Router,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let root = tempfile::tempdir().unwrap();
        let path = root.path();

        for dir in ["fire", "not_fire", "templates", "static"] {
            std::fs::create_dir(path.join(dir)).unwrap();
        }
        for name in ["blaze.jpg", "both.jpg"] {
            std::fs::write(path.join("fire").join(name), b"ref").unwrap();
        }
        for name in ["forest.jpg", "both.jpg"] {
            std::fs::write(path.join("not_fire").join(name), b"ref").unwrap();
        }
        std::fs::write(path.join("templates/index.html"), "<h1>home</h1>").unwrap();
        std::fs::write(path.join("templates/fire_detection.html"), "<h1>detect</h1>").unwrap();
        std::fs::write(path.join("static/fire_detection.js"), "// client").unwrap();

        let mut config = AppConfig::from_root(path);
        tweak(&mut config);

        let state = ServerState::init(config).await.unwrap();
        let app = routes::build(Arc::new(state));

        Self { root, app }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.root.path().join("uploads")
    }
}

pub struct Part {
    name: String,
    filename: Option<String>,
    bytes: Vec<u8>,
}

impl Part {
    pub fn file(name: &str, filename: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            filename: Some(filename.to_string()),
            bytes: bytes.to_vec(),
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            filename: None,
            bytes: value.as_bytes().to_vec(),
        }
    }
}

pub fn multipart_request(parts: &[Part]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match &part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Sends a request expecting a JSON body.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Issues a GET and returns the body as text.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
