//! URL composition for every API resource.
//!
//! Construction is pure: inputs are validated and normalized, a
//! [`RequestDescriptor`] is produced, and nothing touches the network.
//! Address- and transaction-lookup paths carry the network segment; block
//! resources and transaction submission do not.

use bitcoin::{BlockHash, Txid};
use tracing::warn;

use crate::error::ChainError;
use crate::transport::RequestDescriptor;
use crate::types::{BlockHeight, Diagnostic, Network};

/// Largest `limit` the transactions endpoints accept.
pub const MAX_TRANSACTION_LIMIT: u32 = 500;

/// Largest address list the multi-address unspent endpoint accepts.
pub const MAX_UNSPENT_ADDRESSES: usize = 200;

/// A composed request plus any notices about inputs adjusted on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub request: RequestDescriptor,
    pub diagnostics: Vec<Diagnostic>,
}

impl Endpoint {
    fn plain(request: RequestDescriptor) -> Self {
        Self {
            request,
            diagnostics: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    base_url: String,
    network: Network,
}

impl EndpointBuilder {
    /// `base_url` must already be validated and free of a trailing slash.
    pub fn new(base_url: &str, network: Network) -> Self {
        Self {
            base_url: base_url.to_owned(),
            network,
        }
    }

    fn addresses_url(&self, joined: &str) -> String {
        format!("{}/{}/addresses/{joined}", self.base_url, self.network.segment())
    }

    fn transactions_url(&self, hash: &str) -> String {
        format!("{}/{}/transactions/{hash}", self.base_url, self.network.segment())
    }

    fn blocks_url(&self, block: &str) -> String {
        format!("{}/blocks/{block}", self.base_url)
    }

    // ==========================================================================
    // Addresses
    // ==========================================================================

    pub fn address(&self, address: &str) -> Result<Endpoint, ChainError> {
        let address = normalize_address(address)?;
        Ok(Endpoint::plain(RequestDescriptor::get(self.addresses_url(address))))
    }

    pub fn addresses<S: AsRef<str>>(&self, addresses: &[S]) -> Result<Endpoint, ChainError> {
        let joined = join_addresses(addresses)?;
        Ok(Endpoint::plain(RequestDescriptor::get(self.addresses_url(&joined))))
    }

    pub fn address_transactions(&self, address: &str, limit: u32) -> Result<Endpoint, ChainError> {
        self.addresses_transactions(&[address], limit)
    }

    pub fn addresses_transactions<S: AsRef<str>>(
        &self,
        addresses: &[S],
        limit: u32,
    ) -> Result<Endpoint, ChainError> {
        let joined = join_addresses(addresses)?;
        let (limit, diagnostic) = clamp_limit(limit);
        let url = format!("{}/transactions?limit={limit}", self.addresses_url(&joined));
        Ok(Endpoint {
            request: RequestDescriptor::get(url),
            diagnostics: diagnostic.into_iter().collect(),
        })
    }

    pub fn address_unspents(&self, address: &str) -> Result<Endpoint, ChainError> {
        let address = normalize_address(address)?;
        let url = format!("{}/unspent", self.addresses_url(address));
        Ok(Endpoint::plain(RequestDescriptor::get(url)))
    }

    pub fn addresses_unspents<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Result<Endpoint, ChainError> {
        let mut diagnostics = Vec::new();
        let kept = if addresses.len() > MAX_UNSPENT_ADDRESSES {
            warn!(
                supplied = addresses.len(),
                kept = MAX_UNSPENT_ADDRESSES,
                "address list exceeds maximum; keeping the first entries"
            );
            diagnostics.push(Diagnostic::AddressesTruncated {
                supplied: addresses.len(),
                kept: MAX_UNSPENT_ADDRESSES,
            });
            &addresses[..MAX_UNSPENT_ADDRESSES]
        } else {
            addresses
        };

        let joined = join_addresses(kept)?;
        let url = format!("{}/unspent", self.addresses_url(&joined));
        Ok(Endpoint {
            request: RequestDescriptor::get(url),
            diagnostics,
        })
    }

    pub fn address_op_returns(&self, address: &str) -> Result<Endpoint, ChainError> {
        let address = normalize_address(address)?;
        let url = format!("{}/op-returns", self.addresses_url(address));
        Ok(Endpoint::plain(RequestDescriptor::get(url)))
    }

    // ==========================================================================
    // Transactions
    // ==========================================================================

    pub fn transaction(&self, hash: &str) -> Result<Endpoint, ChainError> {
        let hash = normalize_txid(hash)?;
        Ok(Endpoint::plain(RequestDescriptor::get(self.transactions_url(&hash))))
    }

    pub fn transaction_op_return(&self, hash: &str) -> Result<Endpoint, ChainError> {
        let hash = normalize_txid(hash)?;
        let url = format!("{}/op-return", self.transactions_url(&hash));
        Ok(Endpoint::plain(RequestDescriptor::get(url)))
    }

    /// `payload` is forwarded untouched as the PUT body.
    pub fn send_transaction(&self, payload: &str) -> Result<Endpoint, ChainError> {
        if payload.trim().is_empty() {
            return Err(ChainError::Input(
                "signed transaction payload is empty".to_owned(),
            ));
        }
        let url = format!("{}/transactions", self.base_url);
        Ok(Endpoint::plain(RequestDescriptor::put(url, payload.to_owned())))
    }

    // ==========================================================================
    // Blocks
    // ==========================================================================

    pub fn block_by_hash(&self, hash: &str) -> Result<Endpoint, ChainError> {
        let hash = normalize_block_hash(hash)?;
        Ok(Endpoint::plain(RequestDescriptor::get(self.blocks_url(&hash))))
    }

    pub fn block_by_height(&self, height: BlockHeight) -> Endpoint {
        Endpoint::plain(RequestDescriptor::get(self.blocks_url(&height.to_string())))
    }

    pub fn block_latest(&self) -> Endpoint {
        Endpoint::plain(RequestDescriptor::get(self.blocks_url("")))
    }

    pub fn block_op_returns_by_hash(&self, hash: &str) -> Result<Endpoint, ChainError> {
        let hash = normalize_block_hash(hash)?;
        let url = format!("{}/op-returns", self.blocks_url(&hash));
        Ok(Endpoint::plain(RequestDescriptor::get(url)))
    }

    pub fn block_op_returns_by_height(&self, height: BlockHeight) -> Endpoint {
        let url = format!("{}/op-returns", self.blocks_url(&height.to_string()));
        Endpoint::plain(RequestDescriptor::get(url))
    }
}

fn clamp_limit(limit: u32) -> (u32, Option<Diagnostic>) {
    if limit <= MAX_TRANSACTION_LIMIT {
        return (limit, None);
    }
    warn!(
        requested = limit,
        applied = MAX_TRANSACTION_LIMIT,
        "transaction limit exceeds maximum; reduced"
    );
    (
        MAX_TRANSACTION_LIMIT,
        Some(Diagnostic::LimitClamped {
            requested: limit,
            applied: MAX_TRANSACTION_LIMIT,
        }),
    )
}

fn normalize_address(address: &str) -> Result<&str, ChainError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(ChainError::Input("address is empty".to_owned()));
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, ',' | '/' | '?' | '#'))
    {
        return Err(ChainError::Input(format!(
            "address `{trimmed}` contains invalid character {bad:?}"
        )));
    }
    Ok(trimmed)
}

fn join_addresses<S: AsRef<str>>(addresses: &[S]) -> Result<String, ChainError> {
    if addresses.is_empty() {
        return Err(ChainError::Input("no addresses provided".to_owned()));
    }
    let normalized = addresses
        .iter()
        .map(|a| normalize_address(a.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(normalized.join(","))
}

fn normalize_txid(hash: &str) -> Result<String, ChainError> {
    let txid: Txid = hash
        .trim()
        .parse()
        .map_err(|e| ChainError::Input(format!("invalid transaction hash `{hash}`: {e}")))?;
    Ok(txid.to_string())
}

fn normalize_block_hash(hash: &str) -> Result<String, ChainError> {
    let block: BlockHash = hash
        .trim()
        .parse()
        .map_err(|e| ChainError::Input(format!("invalid block hash `{hash}`: {e}")))?;
    Ok(block.to_string())
}
