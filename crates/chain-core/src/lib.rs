//! Client for the Chain.com blockchain REST API.
//!
//! Requests are authenticated with HTTP basic auth and responses are handed
//! back as raw bodies with their status code. See [`ChainClient`].

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ChainClient;
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_URL};
pub use error::ChainError;
pub use types::{ApiResponse, BlockHeight, Diagnostic, Network};
