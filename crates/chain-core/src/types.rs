//! Shared value types: network selection, block heights, clamping
//! diagnostics, and the raw response handed back to callers.

use std::borrow::Cow;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

// ==============================================================================
// Network
// ==============================================================================

/// The two networks served by the API. The wire name doubles as the path
/// segment for address- and transaction-scoped resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "bitcoin")]
    Mainnet,
    #[serde(rename = "testnet3")]
    Testnet,
}

impl Network {
    pub fn segment(self) -> &'static str {
        match self {
            Self::Mainnet => "bitcoin",
            Self::Testnet => "testnet3",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for Network {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bitcoin" => Ok(Self::Mainnet),
            "testnet3" => Ok(Self::Testnet),
            other => Err(ChainError::Config(format!(
                "network must be 'bitcoin' or 'testnet3', got `{other}`"
            ))),
        }
    }
}

// ==============================================================================
// Block Height
// ==============================================================================

/// A block height, wrapped so heights and hashes cannot be confused at
/// call sites that accept either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHeight(pub u32);

impl From<u32> for BlockHeight {
    fn from(h: u32) -> Self {
        Self(h)
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==============================================================================
// Diagnostics
// ==============================================================================

/// Notice that an input was silently adjusted before the request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Transaction limit exceeded the API maximum and was reduced.
    LimitClamped { requested: u32, applied: u32 },
    /// Address list exceeded the API maximum; only the first `kept` were sent.
    AddressesTruncated { supplied: usize, kept: usize },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LimitClamped { requested, applied } => {
                write!(f, "limit {requested} exceeds maximum; reduced to {applied}")
            }
            Self::AddressesTruncated { supplied, kept } => {
                write!(f, "{supplied} addresses exceed maximum; only the first {kept} were sent")
            }
        }
    }
}

// ==============================================================================
// Response
// ==============================================================================

/// Raw response of a single API call.
///
/// The status is reported but never interpreted: error responses come back
/// through the same path as successful ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn into_text(self) -> String {
        match String::from_utf8(self.body) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    /// Decode the body as JSON into any serde type. Decoding is optional;
    /// the raw bytes stay available on `body`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_parses_only_wire_names() {
        assert_eq!("bitcoin".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("testnet3".parse::<Network>().unwrap(), Network::Testnet);

        for bad in [
            "mainnet", "testnet", "Bitcoin", "regtest", "", " testnet3 ", " bitcoin\n",
        ] {
            let err = bad.parse::<Network>().expect_err("must reject unknown network");
            assert!(err.is_config(), "unexpected error for `{bad}`: {err}");
        }
    }

    #[test]
    fn block_height_from_u32() {
        let height: BlockHeight = 308_920.into();
        assert_eq!(height, BlockHeight(308_920));
        assert_eq!(height.to_string(), "308920");
    }

    #[test]
    fn network_serializes_as_segment() {
        let json = serde_json::to_string(&Network::Testnet).unwrap();
        assert_eq!(json, "\"testnet3\"");
        let back: Network = serde_json::from_str("\"bitcoin\"").unwrap();
        assert_eq!(back, Network::Mainnet);
    }

    #[test]
    fn response_status_and_text() {
        let response = ApiResponse {
            status: 404,
            body: br#"{"message":"not found"}"#.to_vec(),
            diagnostics: Vec::new(),
        };
        assert!(!response.is_success());
        assert_eq!(response.text(), r#"{"message":"not found"}"#);

        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["message"], "not found");
    }

    #[test]
    fn into_text_is_lossy_on_invalid_utf8() {
        let response = ApiResponse {
            status: 200,
            body: vec![b'o', b'k', 0xff],
            diagnostics: Vec::new(),
        };
        assert_eq!(response.into_text(), "ok\u{fffd}");
    }

    #[test]
    fn diagnostic_display() {
        let clamp = Diagnostic::LimitClamped {
            requested: 1000,
            applied: 500,
        };
        assert_eq!(clamp.to_string(), "limit 1000 exceeds maximum; reduced to 500");
    }
}
