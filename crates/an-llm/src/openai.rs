use an_core::{CompletionProvider, Message, ProviderError};
use serde::{Deserialize, Serialize};

use crate::http::JsonClient;

/// Any `/chat/completions` endpoint speaking the OpenAI wire format.
/// Serves both OpenAI and Groq.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    http: JsonClient,
    url: String,
    authorization: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: &str, url: &str, api_key: &str, model: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            http: JsonClient::new(name)?,
            url: url.to_string(),
            authorization: format!("Bearer {api_key}"),
            model: model.to_string(),
        })
    }
}

fn first_choice(response: CompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default()
}

impl CompletionProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        self.http.provider()
    }

    fn complete(&self, messages: &[Message], max_tokens: u32) -> Result<String, ProviderError> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens,
        };
        let headers = [("authorization", self.authorization.as_str())];
        let response: CompletionResponse = self.http.post(&self.url, &headers, &body)?;
        self.http.non_empty(first_choice(response))
    }
}
