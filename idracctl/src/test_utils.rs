//! Test utilities for client testing
//!
//! Provides a mock Redfish endpoint that serves the captured iDRAC
//! responses from `assets/responses`.

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri, Version},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Credentials the mock server accepts.
pub const MOCK_USERNAME: &str = "admin";
pub const MOCK_PASSWORD: &str = "secret";

/// `Basic` header value for `admin:secret`.
const MOCK_AUTHORIZATION: &str = "Basic YWRtaW46c2VjcmV0";

const ACCESS_DENIED_FIXTURE: &str = "access_denied_error_1.json";
const NOT_FOUND_FIXTURE: &str = "not_found_error_1.json";

/// Mock server state
#[derive(Debug, Clone)]
pub struct MockServerState {
    /// Request path to fixture file name; fixed at construction.
    routes: Arc<HashMap<String, String>>,
    data_dir: PathBuf,
}

/// Mock Redfish server for testing
pub struct MockServer {
    state: MockServerState,
    port: u16,
}

impl MockServer {
    /// Create a mock server answering each exact path with its fixture
    pub fn new(routes: &[(&str, &str)]) -> Self {
        let routes = routes
            .iter()
            .map(|(path, fixture)| (path.to_string(), fixture.to_string()))
            .collect();

        Self {
            state: MockServerState {
                routes: Arc::new(routes),
                data_dir: PathBuf::from(concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/../assets/responses"
                )),
            },
            port: 0, // Will be assigned when server starts
        }
    }

    /// Start the mock server and return the address
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = Router::new()
            .fallback(handle_request)
            .with_state(self.state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.port = addr.port();

        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }
}

async fn handle_request(
    State(state): State<MockServerState>,
    method: Method,
    version: Version,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(MOCK_AUTHORIZATION);
    if !authorized {
        return serve_fixture(&state, ACCESS_DENIED_FIXTURE, StatusCode::UNAUTHORIZED).await;
    }

    if method != Method::GET {
        return (StatusCode::BAD_REQUEST, "Bad Request, expecting GET").into_response();
    }

    if uri.path().ends_with("/replay_request") {
        return replay_request(&method, version, &uri, &headers).into_response();
    }

    match state.routes.get(uri.path()) {
        Some(fixture) => serve_fixture(&state, fixture, StatusCode::OK).await,
        None => serve_fixture(&state, NOT_FOUND_FIXTURE, StatusCode::NOT_FOUND).await,
    }
}

async fn serve_fixture(state: &MockServerState, fixture: &str, status: StatusCode) -> Response {
    match tokio::fs::read(state.data_dir.join(fixture)).await {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json;charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Echo the request line and headers back as plain text.
fn replay_request(method: &Method, version: Version, uri: &Uri, headers: &HeaderMap) -> String {
    let mut dump = format!("{} {} {:?}\r\n", method, uri, version);
    for (name, value) in headers {
        dump.push_str(&format!(
            "{}: {}\r\n",
            name,
            value.to_str().unwrap_or_default()
        ));
    }
    dump.push_str("\r\n");
    dump
}
