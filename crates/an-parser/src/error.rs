/// Why a file could not be turned into syntax units.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("no grammar registered for {path}")]
    UnsupportedLanguage { path: String },

    #[error("{path} is {size} bytes, over the {max} byte limit")]
    FileTooLarge { path: String, size: u64, max: u64 },

    #[error("cannot read {path} as text: {reason}")]
    InvalidEncoding { path: String, reason: &'static str },

    #[error("cannot parse {path}: {reason}")]
    ParseFailed { path: String, reason: String },
}

impl ParserError {
    /// Every parser failure is a property of the file itself, so retrying the
    /// same bytes gives the same answer.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
