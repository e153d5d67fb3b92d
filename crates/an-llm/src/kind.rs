use an_core::CoreError;
use serde::{Deserialize, Serialize};

/// Completion backends annotr can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Ollama,
    Anthropic,
    OpenAi,
    Groq,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [Self::Ollama, Self::Anthropic, Self::OpenAi, Self::Groq];

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "groq" => Ok(Self::Groq),
            _ => Err(CoreError::UnknownProvider {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Groq => "groq",
        }
    }

    /// Default URL. For Ollama this is the server base; the others are full
    /// request URLs.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::Ollama => "http://localhost:11434",
            Self::Anthropic => "https://api.anthropic.com/v1/messages",
            Self::OpenAi => "https://api.openai.com/v1/chat/completions",
            Self::Groq => "https://api.groq.com/openai/v1/chat/completions",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Ollama => "qwen2.5-coder:1.5b",
            Self::Anthropic => "claude-sonnet-4-20250514",
            Self::OpenAi => "gpt-4o-mini",
            Self::Groq => "llama-3.3-70b-versatile",
        }
    }

    pub fn requires_api_key(self) -> bool {
        !matches!(self, Self::Ollama)
    }

    fn key_prefix(self) -> Option<&'static str> {
        match self {
            Self::Ollama => None,
            Self::Anthropic => Some("sk-ant-"),
            Self::OpenAi => Some("sk-"),
            Self::Groq => Some("gsk_"),
        }
    }

    /// Check the key's shape against the provider's prefix. Ollama accepts
    /// anything, including no key.
    pub fn validate_api_key(self, key: &str) -> Result<(), CoreError> {
        match self.key_prefix() {
            None => Ok(()),
            Some(prefix) if key.starts_with(prefix) => Ok(()),
            Some(_) => Err(CoreError::InvalidApiKey {
                provider: self.name().to_string(),
            }),
        }
    }

    /// Infer the provider from a key's prefix.
    pub fn from_api_key(key: &str) -> Option<Self> {
        // `sk-ant-` must be tested before the broader `sk-`.
        if key.starts_with("sk-ant-") {
            Some(Self::Anthropic)
        } else if key.starts_with("gsk_") {
            Some(Self::Groq)
        } else if key.starts_with("sk-") {
            Some(Self::OpenAi)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in ProviderKind::ALL {
            assert_eq!(ProviderKind::from_name(kind.name()).unwrap(), kind);
        }
        assert_eq!(ProviderKind::from_name(" OpenAI ").unwrap(), ProviderKind::OpenAi);
        assert!(matches!(
            ProviderKind::from_name("bard"),
            Err(CoreError::UnknownProvider { .. })
        ));
    }

    #[test]
    fn serde_names_match() {
        assert_eq!(serde_json::to_string(&ProviderKind::OpenAi).unwrap(), "\"openai\"");
        let kind: ProviderKind = serde_json::from_str("\"groq\"").unwrap();
        assert_eq!(kind, ProviderKind::Groq);
    }

    #[test]
    fn key_validation() {
        assert!(ProviderKind::Anthropic.validate_api_key("sk-ant-abc").is_ok());
        assert!(ProviderKind::Anthropic.validate_api_key("sk-abc").is_err());
        assert!(ProviderKind::OpenAi.validate_api_key("sk-abc").is_ok());
        assert!(ProviderKind::Groq.validate_api_key("gsk_abc").is_ok());
        assert!(ProviderKind::Groq.validate_api_key("").is_err());
        assert!(ProviderKind::Ollama.validate_api_key("").is_ok());
    }

    #[test]
    fn provider_from_key() {
        assert_eq!(ProviderKind::from_api_key("sk-ant-123"), Some(ProviderKind::Anthropic));
        assert_eq!(ProviderKind::from_api_key("sk-proj-123"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_api_key("gsk_123"), Some(ProviderKind::Groq));
        assert_eq!(ProviderKind::from_api_key("hello"), None);
    }

    #[test]
    fn only_ollama_is_keyless() {
        let keyless: Vec<_> = ProviderKind::ALL.into_iter().filter(|k| !k.requires_api_key()).collect();
        assert_eq!(keyless, vec![ProviderKind::Ollama]);
    }
}
