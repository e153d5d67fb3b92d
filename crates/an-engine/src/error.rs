use std::path::PathBuf;

/// Engine errors. Each one is fatal for the file it names, never for a batch.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("parser error: {0}")]
    Parser(#[from] an_parser::error::ParserError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} changed on disk while it was being processed")]
    ConcurrentModification { path: PathBuf },
}

impl EngineError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_concurrent_modification_is_retryable() {
        let changed = EngineError::ConcurrentModification { path: "a.go".into() };
        assert!(changed.is_retryable());

        let write = EngineError::WriteFailed {
            path: "a.go".into(),
            source: std::io::Error::other("disk full"),
        };
        assert!(!write.is_retryable());
        assert!(write.to_string().contains("a.go"));
    }
}
