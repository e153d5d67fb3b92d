mod anthropic;
mod http;
mod kind;
mod ollama;
mod openai;

pub use anthropic::AnthropicProvider;
pub use kind::ProviderKind;
pub use ollama::OllamaProvider;
pub use openai::OpenAiCompatibleProvider;

use an_core::{CompletionProvider, ProviderError};

/// Build the provider for `kind`.
///
/// `endpoint` overrides the kind's default URL (the server base URL for
/// Ollama). Remote providers fail with `MissingApiKey` when no key is given.
pub fn build_provider(
    kind: ProviderKind,
    api_key: Option<&str>,
    model: &str,
    endpoint: Option<&str>,
) -> Result<Box<dyn CompletionProvider>, ProviderError> {
    let endpoint = endpoint.unwrap_or(kind.default_endpoint());
    let key = || {
        api_key
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: kind.name().to_string(),
            })
    };

    let provider: Box<dyn CompletionProvider> = match kind {
        ProviderKind::Ollama => Box::new(OllamaProvider::new(endpoint, model)?),
        ProviderKind::Anthropic => Box::new(AnthropicProvider::new(endpoint, &key()?, model)?),
        ProviderKind::OpenAi | ProviderKind::Groq => {
            Box::new(OpenAiCompatibleProvider::new(kind.name(), endpoint, &key()?, model)?)
        }
    };
    tracing::debug!(provider = kind.name(), model, endpoint, "provider ready");
    Ok(provider)
}
