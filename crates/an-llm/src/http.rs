use std::time::Duration;

use an_core::ProviderError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Local models can take a while on first load.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Blocking JSON-over-HTTP transport shared by every provider.
#[derive(Debug, Clone)]
pub(crate) struct JsonClient {
    provider: String,
    client: Client,
}

impl JsonClient {
    pub(crate) fn new(provider: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Request {
                provider: provider.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            provider: provider.to_string(),
            client,
        })
    }

    pub(crate) fn provider(&self) -> &str {
        &self.provider
    }

    /// POST `body` as JSON and decode the JSON answer. Non-2xx answers become
    /// `ProviderError::Status` carrying the response text.
    pub(crate) fn post<Req, Resp>(&self, url: &str, headers: &[(&str, &str)], body: &Req) -> Result<Resp, ProviderError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().map_err(|e| ProviderError::Request {
            provider: self.provider.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Status {
                provider: self.provider.clone(),
                status: status.as_u16(),
                body,
            });
        }

        response.json().map_err(|e| ProviderError::Decode {
            provider: self.provider.clone(),
            reason: e.to_string(),
        })
    }

    /// Reject a blank completion.
    pub(crate) fn non_empty(&self, text: String) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            Err(ProviderError::EmptyCompletion {
                provider: self.provider.clone(),
            })
        } else {
            Ok(text)
        }
    }
}
