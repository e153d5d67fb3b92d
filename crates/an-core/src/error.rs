/// Errors from an-core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown provider: {name}")]
    UnknownProvider { name: String },

    #[error("invalid API key for {provider}")]
    InvalidApiKey { provider: String },
}

impl CoreError {
    pub fn is_retryable(&self) -> bool {
        false
    }
}
