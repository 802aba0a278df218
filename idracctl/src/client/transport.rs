//! Authenticated request execution against a Redfish endpoint.

use super::RedfishClient;
use idrac_core::{RedfishError, Result};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use tracing::debug;

const ACCEPT_JSON: &str = "application/json;charset=utf-8";

impl RedfishClient {
    /// Send one request and return the response body.
    ///
    /// `path` is joined to the base URL with a single leading `/`. At most
    /// `data_limit` body bytes are read; the rest is dropped without error.
    /// Anything other than `200 OK` becomes [`RedfishError::Status`]
    /// carrying the (possibly truncated) body.
    pub(crate) async fn call_api(
        &self,
        method: Method,
        content_type: Option<&str>,
        path: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let url = self.request_url(path);
        debug!("{} request to {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header(ACCEPT, ACCEPT_JSON)
            .header(CACHE_CONTROL, "no-cache")
            .basic_auth(&self.username, Some(&self.password));
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let mut response = request
            .send()
            .await
            .map_err(|e| classify_send_error(e, &url))?;

        let status = response.status();
        debug!("API server responded with {}", status);

        let body = self.read_limited(&mut response, &url).await?;

        if status != StatusCode::OK {
            return Err(RedfishError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }

    fn request_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn read_limited(&self, response: &mut Response, url: &str) -> Result<Vec<u8>> {
        let mut body = Vec::new();

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| RedfishError::Transport {
                url: url.to_string(),
                message: format!("failed to read response body: {}", e),
            })?
        {
            let room = self.data_limit - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                debug!("Response body from {} truncated at {} bytes", url, self.data_limit);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

/// Split send failures into "never got through" and "got through, no answer".
///
/// Builder, connect (DNS, refused, TLS) and timeout failures are transport
/// errors. A request that reached the server but saw the connection close
/// before any response arrived is an empty response.
fn classify_send_error(err: reqwest::Error, url: &str) -> RedfishError {
    if err.is_request() && !err.is_connect() && !err.is_timeout() {
        RedfishError::EmptyResponse {
            url: url.to_string(),
        }
    } else {
        RedfishError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
