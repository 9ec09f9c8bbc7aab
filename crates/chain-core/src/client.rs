//! The client facade: one validated configuration, one transport, and an
//! async method per API operation.

use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::endpoints::{Endpoint, EndpointBuilder};
use crate::error::ChainError;
use crate::transport::{HttpTransport, Transport};
use crate::types::{ApiResponse, BlockHeight};

/// Authenticated client for the Chain.com REST API.
///
/// A value of this type only exists once configuration has been validated,
/// so there is no separate "initialized" flag to check. Cloning is cheap and
/// clones share the same transport; the configuration is read-only.
#[derive(Clone)]
pub struct ChainClient {
    config: Arc<ClientConfig>,
    endpoints: EndpointBuilder,
    transport: Arc<dyn Transport>,
}

impl ChainClient {
    /// Validate credentials and network (`bitcoin` or `testnet3`) and
    /// build a client against the public API.
    pub fn initialize(
        api_key: &str,
        api_secret: &str,
        network: &str,
        verbose: bool,
    ) -> Result<Self, ChainError> {
        Self::new(ClientConfig::new(api_key, api_secret, network, verbose)?)
    }

    pub fn new(config: ClientConfig) -> Result<Self, ChainError> {
        let transport = HttpTransport::new(
            config.credentials().clone(),
            config.timeout(),
            config.verbose(),
        )?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let endpoints = EndpointBuilder::new(config.base_url(), config.network());
        Self {
            config: Arc::new(config),
            endpoints,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn execute(
        &self,
        operation: &'static str,
        endpoint: Endpoint,
    ) -> Result<ApiResponse, ChainError> {
        debug!(
            operation,
            network = %self.config.network(),
            diagnostics = endpoint.diagnostics.len(),
            "dispatching api call"
        );
        let raw = self.transport.send(&endpoint.request).await?;
        Ok(ApiResponse {
            status: raw.status,
            body: raw.body,
            diagnostics: endpoint.diagnostics,
        })
    }

    // ==========================================================================
    // Addresses
    // ==========================================================================

    pub async fn get_address(&self, address: &str) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.address(address)?;
        self.execute("address", endpoint).await
    }

    /// Look up several addresses in one call. An empty list is rejected
    /// without contacting the API.
    pub async fn get_addresses<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.addresses(addresses)?;
        self.execute("addresses", endpoint).await
    }

    /// `limit` above the API maximum is reduced, and the response carries a
    /// [`Diagnostic::LimitClamped`](crate::Diagnostic::LimitClamped).
    pub async fn get_address_transactions(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.address_transactions(address, limit)?;
        self.execute("address_transactions", endpoint).await
    }

    pub async fn get_addresses_transactions<S: AsRef<str>>(
        &self,
        addresses: &[S],
        limit: u32,
    ) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.addresses_transactions(addresses, limit)?;
        self.execute("addresses_transactions", endpoint).await
    }

    pub async fn get_address_unspents(&self, address: &str) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.address_unspents(address)?;
        self.execute("address_unspents", endpoint).await
    }

    /// Only the first 200 addresses are queried; see
    /// [`Diagnostic::AddressesTruncated`](crate::Diagnostic::AddressesTruncated).
    pub async fn get_addresses_unspents<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.addresses_unspents(addresses)?;
        self.execute("addresses_unspents", endpoint).await
    }

    pub async fn get_address_op_returns(&self, address: &str) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.address_op_returns(address)?;
        self.execute("address_op_returns", endpoint).await
    }

    // ==========================================================================
    // Transactions
    // ==========================================================================

    pub async fn get_transaction(&self, hash: &str) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.transaction(hash)?;
        self.execute("transaction", endpoint).await
    }

    pub async fn get_transaction_op_return(&self, hash: &str) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.transaction_op_return(hash)?;
        self.execute("transaction_op_return", endpoint).await
    }

    /// Submit a signed transaction. The payload is sent verbatim.
    pub async fn send_transaction(&self, payload: &str) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.send_transaction(payload)?;
        self.execute("send_transaction", endpoint).await
    }

    // ==========================================================================
    // Blocks
    // ==========================================================================

    pub async fn get_block_by_hash(&self, hash: &str) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.block_by_hash(hash)?;
        self.execute("block_by_hash", endpoint).await
    }

    pub async fn get_block_by_height(
        &self,
        height: BlockHeight,
    ) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.block_by_height(height);
        self.execute("block_by_height", endpoint).await
    }

    pub async fn get_block_latest(&self) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.block_latest();
        self.execute("block_latest", endpoint).await
    }

    pub async fn get_block_op_returns_by_hash(
        &self,
        hash: &str,
    ) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.block_op_returns_by_hash(hash)?;
        self.execute("block_op_returns_by_hash", endpoint).await
    }

    pub async fn get_block_op_returns_by_height(
        &self,
        height: BlockHeight,
    ) -> Result<ApiResponse, ChainError> {
        let endpoint = self.endpoints.block_op_returns_by_height(height);
        self.execute("block_op_returns_by_height", endpoint).await
    }
}
