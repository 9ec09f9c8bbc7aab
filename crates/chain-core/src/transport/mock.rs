use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ChainError;

use super::{RawResponse, RequestDescriptor, Transport};

/// A recording transport for tests. Answers every request with the same
/// canned response (or failure) and keeps every descriptor it was handed.
pub struct MockTransport {
    response: Result<RawResponse, String>,
    sent: Mutex<Vec<RequestDescriptor>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            response: Ok(RawResponse {
                status: 200,
                body: b"{}".to_vec(),
            }),
        }
    }

    /// Requests seen so far, in send order.
    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().expect("mock lock poisoned").clone()
    }
}

pub struct MockTransportBuilder {
    response: Result<RawResponse, String>,
}

impl MockTransportBuilder {
    pub fn with_response(mut self, status: u16, body: &str) -> Self {
        self.response = Ok(RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        });
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.response = Err(message.to_owned());
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            response: self.response,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, ChainError> {
        self.sent
            .lock()
            .expect("mock lock poisoned")
            .push(request.clone());
        self.response.clone().map_err(ChainError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_requests_and_replays_response() {
        let mock = MockTransport::builder().with_response(201, "created").build();
        let response = mock
            .send(&RequestDescriptor::put("http://x/transactions".into(), "{}".into()))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, b"created");
        assert_eq!(mock.sent().len(), 1);
    }

    #[tokio::test]
    async fn failing_mock_returns_transport_error() {
        let mock = MockTransport::builder().failing("connection reset").build();
        let err = mock
            .send(&RequestDescriptor::get("http://x/blocks/".into()))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("connection reset"));
    }
}
