use an_core::{CompletionProvider, Message, ProviderError, Role};
use serde::{Deserialize, Serialize};

use crate::http::JsonClient;

const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    http: JsonClient,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<&'a Message>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicProvider {
    pub fn new(url: &str, api_key: &str, model: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            http: JsonClient::new("anthropic")?,
            url: url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// The Messages API takes system text as a top-level field, not as a
    /// conversation turn.
    fn request<'a>(&'a self, messages: &'a [Message], max_tokens: u32) -> MessagesRequest<'a> {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();
        MessagesRequest {
            model: &self.model,
            max_tokens,
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            messages: messages.iter().filter(|m| m.role != Role::System).collect(),
        }
    }
}

fn first_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .map(|block| block.text)
        .unwrap_or_default()
}

impl CompletionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        self.http.provider()
    }

    fn complete(&self, messages: &[Message], max_tokens: u32) -> Result<String, ProviderError> {
        let headers = [("x-api-key", self.api_key.as_str()), ("anthropic-version", API_VERSION)];
        let response: MessagesResponse = self.http.post(&self.url, &headers, &self.request(messages, max_tokens))?;
        self.http.non_empty(first_text(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new("https://api.anthropic.com/v1/messages", "sk-ant-test", "claude").unwrap()
    }

    #[test]
    fn system_prompt_moves_to_top_level() {
        let p = provider();
        let messages = [Message::system("rules"), Message::user("code")];
        let body = serde_json::to_value(p.request(&messages, 128)).unwrap();
        assert_eq!(body["system"], "rules");
        assert_eq!(body["max_tokens"], 128);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn no_system_field_without_system_messages() {
        let p = provider();
        let messages = [Message::user("code")];
        let body = serde_json::to_value(p.request(&messages, 16)).unwrap();
        assert!(body.get("system").is_none());
    }

    #[test]
    fn first_text_block_wins() {
        let raw = r#"{"id":"msg_1","content":[{"type":"thinking","thinking":"..."},{"type":"text","text":"Parses input."}],"model":"claude"}"#;
        let parsed: MessagesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(first_text(parsed), "Parses input.");
    }

    #[test]
    fn empty_content_yields_empty_text() {
        let parsed: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert_eq!(first_text(parsed), "");
    }
}
