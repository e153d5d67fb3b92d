use serde::{Deserialize, Serialize};

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a completion conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Errors raised by a completion backend.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {reason}")]
    Request { provider: String, reason: String },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode {provider} response: {reason}")]
    Decode { provider: String, reason: String },

    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: String },

    #[error("no API key configured for {provider}")]
    MissingApiKey { provider: String },
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// A text-completion backend: conversation in, text out.
pub trait CompletionProvider {
    /// Short backend name used in logs and errors.
    fn name(&self) -> &str;

    fn complete(&self, messages: &[Message], max_tokens: u32) -> Result<String, ProviderError>;
}

impl<P: CompletionProvider + ?Sized> CompletionProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete(&self, messages: &[Message], max_tokens: u32) -> Result<String, ProviderError> {
        (**self).complete(messages, max_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses() {
        let status = |s| ProviderError::Status {
            provider: "ollama".into(),
            status: s,
            body: String::new(),
        };
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!ProviderError::EmptyCompletion { provider: "groq".into() }.is_retryable());
    }

    #[test]
    fn message_constructors() {
        assert_eq!(Message::system("a").role, Role::System);
        assert_eq!(Message::user("b").content, "b");
    }
}
