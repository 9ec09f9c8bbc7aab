/// Error taxonomy for every client operation.
///
/// Configuration and input errors are raised before any request leaves the
/// process. Transport errors are returned as-is; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("cannot construct request: {0}")]
    RequestConstruction(String),
}

impl ChainError {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
