use std::time::Duration;

use reqwest::Url;

use crate::error::ChainError;
use crate::types::Network;

pub const DEFAULT_BASE_URL: &str = "https://api.chain.com/v1";

/// Basic-auth credentials: the API key is the username, the secret the
/// password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: &str, api_secret: &str) -> Result<Self, ChainError> {
        match (api_key.trim().is_empty(), api_secret.trim().is_empty()) {
            (false, false) => Ok(Self {
                api_key: api_key.to_owned(),
                api_secret: api_secret.to_owned(),
            }),
            (true, true) => Err(ChainError::Config(
                "api key and api secret are missing".to_owned(),
            )),
            (true, false) => Err(ChainError::Config("api key is missing".to_owned())),
            (false, true) => Err(ChainError::Config("api secret is missing".to_owned())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Validated, immutable client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    credentials: Credentials,
    network: Network,
    base_url: String,
    verbose: bool,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Validate credentials and network name against the default base URL.
    pub fn new(
        api_key: &str,
        api_secret: &str,
        network: &str,
        verbose: bool,
    ) -> Result<Self, ChainError> {
        let network: Network = network.parse()?;
        let credentials = Credentials::new(api_key, api_secret)?;
        Ok(Self {
            credentials,
            network,
            base_url: DEFAULT_BASE_URL.to_owned(),
            verbose,
            timeout: None,
        })
    }

    /// Point the client at another API root (e.g. a local mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ChainError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Per-request deadline. Without one, calls wait as long as the
    /// connection stays open.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<String, ChainError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| {
        ChainError::RequestConstruction(format!(
            "invalid base url `{base_url}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ChainError::RequestConstruction(format!(
            "base url `{base_url}` must not carry a query or fragment"
        )));
    }
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_owned()),
        other => Err(ChainError::RequestConstruction(format!(
            "unsupported base url scheme `{other}`; expected http or https"
        ))),
    }
}
