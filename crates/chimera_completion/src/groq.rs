//! Reqwest-backed client for the Groq OpenAI-compatible API.

use crate::api_types::{ChatRequest, ChatResponse};
use crate::client::{CompletionClient, ServiceError};
use chimera_core::error::ConfigError;
use reqwest::Client;
use std::env;

/// Environment variable consulted when no key is passed explicitly.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone)]
pub struct GroqClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GroqClient {
    /// Build a client with an explicit bearer token.
    ///
    /// Requests carry no client-side timeout: a call blocks its caller until
    /// the service answers or the connection drops.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a client, reading the token from `GROQ_API_KEY` when no usable
    /// explicit one is given. Fails fast when neither is present.
    pub fn from_env(base_url: &str, api_key: Option<String>) -> Result<Self, ConfigError> {
        let key = api_key
            .filter(|k| !k.is_empty())
            .or_else(|| env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(Self::new(base_url, &key))
    }
}

#[async_trait::async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ServiceError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %request.model, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(model: &str, text: &str) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user(text)],
            temperature: None,
            max_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_complete_parses_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.3-70b-versatile",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "It depends."},
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GroqClient::new(&mock_server.uri(), "test-key");
        let response = client
            .complete(request("llama-3.3-70b-versatile", "hello"))
            .await
            .unwrap();
        assert_eq!(response.first_text(), Some("It depends."));
    }

    #[tokio::test]
    async fn test_non_success_status_is_service_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&mock_server)
            .await;

        let client = GroqClient::new(&mock_server.uri(), "test-key");
        let err = client
            .complete(request("llama-3.3-70b-versatile", "hello"))
            .await
            .unwrap_err();
        match err {
            ServiceError::Status { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("rate limited"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_env_prefers_explicit_key() {
        let client = GroqClient::from_env("http://localhost/", Some("abc".to_string())).unwrap();
        assert_eq!(client.api_key, "abc");
        // Trailing slash is trimmed so path joins stay clean.
        assert_eq!(client.base_url, "http://localhost");
    }

    #[test]
    fn test_missing_key_fails_fast() {
        env::remove_var(API_KEY_ENV);
        let err = GroqClient::from_env("http://localhost", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        // An empty explicit key falls back to the environment, then fails.
        let err = GroqClient::from_env("http://localhost", Some(String::new())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }
}
