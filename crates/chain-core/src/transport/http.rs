use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Method, Url};
use tracing::{debug, info, trace, warn};

use crate::config::Credentials;
use crate::error::ChainError;

use super::{HttpMethod, RawResponse, RequestDescriptor, Transport};

/// Basic-auth HTTP(S) transport over a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
    credentials: Credentials,
    verbose: bool,
}

impl HttpTransport {
    pub fn new(
        credentials: Credentials,
        timeout: Option<Duration>,
        verbose: bool,
    ) -> Result<Self, ChainError> {
        let mut builder = reqwest::Client::builder().tcp_nodelay(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChainError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            verbose,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, ChainError> {
        let url = Url::parse(&request.url).map_err(|e| {
            ChainError::RequestConstruction(format!("invalid request url `{}`: {e}", request.url))
        })?;

        if self.verbose {
            info!(http.method = %request.method, url = %url, "api request");
        } else {
            debug!(http.method = %request.method, url = %url, "api request");
        }

        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Put => Method::PUT,
        };
        let mut builder = self
            .client
            .request(method, url)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret));
        if let Some(body) = &request.body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            if self.verbose {
                warn!(url = %request.url, error = %e, "api request failed");
            }
            ChainError::Transport(format!("HTTP error: {e}"))
        })?;
        let status = response.status();

        let body = response.bytes().await.map_err(|e| {
            if self.verbose {
                warn!(url = %request.url, error = %e, "reading api response failed");
            }
            ChainError::Transport(format!("read response body: {e}"))
        })?;
        debug!(url = %request.url, %status, body_len = body.len(), "api response");
        trace!(url = %request.url, body = %String::from_utf8_lossy(&body), "api response body");

        Ok(RawResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
