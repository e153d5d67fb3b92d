use an_core::{CompletionProvider, Message, ProviderError};
use serde::{Deserialize, Serialize};

use crate::http::JsonClient;

/// Local Ollama server, `/api/chat` with streaming off.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    http: JsonClient,
    url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl OllamaProvider {
    /// `base_url` is the server root, e.g. `http://localhost:11434`.
    pub fn new(base_url: &str, model: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            http: JsonClient::new("ollama")?,
            url: format!("{}/api/chat", base_url.trim_end_matches('/')),
            model: model.to_string(),
        })
    }

    fn request<'a>(&'a self, messages: &'a [Message], max_tokens: u32) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: ChatOptions {
                num_predict: max_tokens,
            },
        }
    }
}

impl CompletionProvider for OllamaProvider {
    fn name(&self) -> &str {
        self.http.provider()
    }

    fn complete(&self, messages: &[Message], max_tokens: u32) -> Result<String, ProviderError> {
        let response: ChatResponse = self.http.post(&self.url, &[], &self.request(messages, max_tokens))?;
        self.http.non_empty(response.message.content)
    }
}
