mod cli;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};

use chain_core::{ApiResponse, ChainClient, ChainError, ClientConfig};

use cli::{BlockRef, Command};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    let default_filter = if args.verbose {
        "info,chain_core=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .init();

    let mut config = ClientConfig::new(&args.api_key, &args.api_secret, &args.network, args.verbose)
        .wrap_err("invalid client configuration")?
        .with_base_url(&args.base_url)
        .wrap_err("invalid base url")?;
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = ChainClient::new(config).wrap_err("initialize api client")?;
    tracing::debug!(network = %client.config().network(), "api client ready");

    let response = run(&client, args.command)
        .await
        .map_err(|err| eyre!(describe_failure(&err)).wrap_err(err))?;

    for diagnostic in &response.diagnostics {
        tracing::warn!(%diagnostic, "request input adjusted");
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response.body)
        .wrap_err("write response body")?;
    writeln!(stdout).wrap_err("write response body")?;

    if !response.is_success() {
        return Err(eyre!("API responded with HTTP status {}", response.status));
    }
    Ok(())
}

async fn run(client: &ChainClient, command: Command) -> Result<ApiResponse, ChainError> {
    match command {
        Command::Address { address } => client.get_address(&address).await,
        Command::Addresses { addresses } => client.get_addresses(&addresses).await,
        Command::AddressTransactions { address, limit } => {
            client.get_address_transactions(&address, limit).await
        }
        Command::AddressesTransactions { addresses, limit } => {
            client.get_addresses_transactions(&addresses, limit).await
        }
        Command::AddressUnspents { address } => client.get_address_unspents(&address).await,
        Command::AddressesUnspents { addresses } => {
            client.get_addresses_unspents(&addresses).await
        }
        Command::AddressOpReturns { address } => client.get_address_op_returns(&address).await,
        Command::Transaction { hash } => client.get_transaction(&hash).await,
        Command::TransactionOpReturn { hash } => client.get_transaction_op_return(&hash).await,
        Command::SendTransaction { payload } => client.send_transaction(&payload).await,
        Command::Block { block } => match block {
            BlockRef::Height(height) => client.get_block_by_height(height).await,
            BlockRef::Hash(hash) => client.get_block_by_hash(&hash).await,
        },
        Command::BlockLatest => client.get_block_latest().await,
        Command::BlockOpReturns { block } => match block {
            BlockRef::Height(height) => client.get_block_op_returns_by_height(height).await,
            BlockRef::Hash(hash) => client.get_block_op_returns_by_hash(&hash).await,
        },
    }
}

fn describe_failure(err: &ChainError) -> String {
    let hint = match err {
        ChainError::Config(_) => "check --api-key, --api-secret and --network",
        ChainError::Input(_) => "check the command arguments",
        ChainError::RequestConstruction(_) => "check --base-url",
        ChainError::Transport(msg) if msg.contains("dns error") => {
            "hostname resolution failed; verify the base url and your DNS/network"
        }
        ChainError::Transport(msg) if msg.contains("certificate") || msg.contains("tls") => {
            "TLS handshake failed; verify certificate trust and that the endpoint uses HTTPS"
        }
        ChainError::Transport(_) => "request could not be completed; verify network access",
    };
    format!("hint: {hint}")
}
