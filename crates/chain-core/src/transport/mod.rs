//! HTTP transport seam.
//!
//! Defines the [`Transport`] trait and provides a `reqwest` implementation
//! ([`HttpTransport`]) plus a recording test double (`mock::MockTransport`).

mod http;
#[cfg(test)]
pub mod mock;

pub use http::HttpTransport;

use async_trait::async_trait;

use crate::error::ChainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully composed request, built per call and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    /// Only set for `PUT`.
    pub body: Option<String>,
}

impl RequestDescriptor {
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            body: None,
        }
    }

    pub fn put(url: String, body: String) -> Self {
        Self {
            method: HttpMethod::Put,
            url,
            body: Some(body),
        }
    }
}

/// Status and full body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes exactly one authenticated HTTP call per `send`.
///
/// Implementations attach credentials themselves and must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, ChainError>;
}
