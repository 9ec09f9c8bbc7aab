use std::str::FromStr;

use clap::{Parser, Subcommand};

use chain_core::BlockHeight;

/// chain: query the Chain.com blockchain API and print raw responses.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// API key (basic-auth username).
    #[arg(long, env = "CHAIN_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// API secret (basic-auth password).
    #[arg(long, env = "CHAIN_API_SECRET", hide_env_values = true)]
    pub api_secret: String,

    /// Network: `bitcoin` or `testnet3`.
    #[arg(long, default_value = "bitcoin", env = "CHAIN_NETWORK")]
    pub network: String,

    /// Log request URLs and transport failures.
    #[arg(
        long,
        short,
        env = "CHAIN_VERBOSE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub verbose: bool,

    /// API root. Override to target a proxy or mock server.
    #[arg(long, default_value = chain_core::DEFAULT_BASE_URL, env = "CHAIN_BASE_URL")]
    pub base_url: String,

    /// Per-request timeout in seconds (no timeout when omitted).
    #[arg(long, env = "CHAIN_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Balance and totals for one address.
    Address { address: String },

    /// Balance and totals for several addresses.
    Addresses {
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Transactions involving one address.
    AddressTransactions {
        address: String,
        /// Values above 500 are reduced to 500.
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Transactions involving any of several addresses.
    AddressesTransactions {
        #[arg(required = true)]
        addresses: Vec<String>,
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Unspent outputs of one address.
    AddressUnspents { address: String },

    /// Unspent outputs of up to 200 addresses; extra addresses are dropped.
    AddressesUnspents {
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// OP_RETURN outputs sent from or to an address.
    AddressOpReturns { address: String },

    /// One transaction by hash.
    Transaction { hash: String },

    /// The OP_RETURN output of a transaction.
    TransactionOpReturn { hash: String },

    /// Submit a signed transaction payload (JSON, e.g. `{"hex":"..."}`).
    SendTransaction { payload: String },

    /// One block by hash or height.
    Block { block: BlockRef },

    /// The most recent block.
    BlockLatest,

    /// OP_RETURN outputs in a block, by hash or height.
    BlockOpReturns { block: BlockRef },
}

/// A block addressed either by height (all digits) or by hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockRef {
    Height(BlockHeight),
    Hash(String),
}

impl FromStr for BlockRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("block hash or height must not be empty".to_owned());
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<u32>()
                .map(|h| Self::Height(h.into()))
                .map_err(|e| format!("invalid block height `{s}`: {e}"));
        }
        Ok(Self::Hash(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["chain", "--api-key", "k", "--api-secret", "s"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("arguments must parse")
    }

    #[test]
    fn defaults_to_mainnet_and_public_api() {
        let cli = parse(&["block-latest"]);
        assert_eq!(cli.network, "bitcoin");
        assert_eq!(cli.base_url, chain_core::DEFAULT_BASE_URL);
        assert_eq!(cli.command, Command::BlockLatest);
    }

    #[test]
    fn parses_multi_address_transactions() {
        let cli = parse(&[
            "--network",
            "testnet3",
            "addresses-transactions",
            "addrA",
            "addrB",
            "--limit",
            "1000",
        ]);
        assert_eq!(cli.network, "testnet3");
        assert_eq!(
            cli.command,
            Command::AddressesTransactions {
                addresses: vec!["addrA".into(), "addrB".into()],
                limit: 1000,
            }
        );
    }

    // The only test touching CHAIN_VERBOSE / CHAIN_TIMEOUT_SECS; other tests
    // must not assert on those fields.
    #[test]
    fn verbose_and_timeout_fall_back_to_env() {
        std::env::set_var("CHAIN_VERBOSE", "1");
        std::env::set_var("CHAIN_TIMEOUT_SECS", "15");
        let cli = parse(&["block-latest"]);
        assert!(cli.verbose);
        assert_eq!(cli.timeout_secs, Some(15));

        std::env::set_var("CHAIN_VERBOSE", "0");
        assert!(!parse(&["block-latest"]).verbose);

        std::env::remove_var("CHAIN_VERBOSE");
        std::env::remove_var("CHAIN_TIMEOUT_SECS");
        let cli = parse(&["block-latest"]);
        assert!(!cli.verbose);
        assert!(cli.timeout_secs.is_none());
        assert!(parse(&["--verbose", "block-latest"]).verbose);
    }

    #[test]
    fn multi_address_commands_require_an_address() {
        let result = Cli::try_parse_from(["chain", "--api-key", "k", "--api-secret", "s", "addresses"]);
        assert!(result.is_err());
    }

    #[test]
    fn block_ref_distinguishes_height_and_hash() {
        assert_eq!(
            "308920".parse::<BlockRef>().unwrap(),
            BlockRef::Height(BlockHeight(308_920))
        );
        assert_eq!(
            "00000000839a8e68".parse::<BlockRef>().unwrap(),
            BlockRef::Hash("00000000839a8e68".into())
        );
        assert!("".parse::<BlockRef>().is_err());
        assert!("99999999999".parse::<BlockRef>().is_err());
    }
}
