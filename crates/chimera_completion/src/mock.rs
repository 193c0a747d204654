//! Mock completion client — deterministic responses for testing without API
//! keys or network access.

use crate::api_types::{
    AssistantMessage, ChatRequest, ChatResponse, Choice, ContentPart, MessageContent, Role,
};
use crate::client::{CompletionClient, ServiceError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A scripted [`CompletionClient`]. Records every request it sees and counts
/// calls, so tests can assert on prompts and call volume.
pub struct MockCompletion {
    behavior: Behavior,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

enum Behavior {
    /// Reply with the text of the last user message.
    Echo,
    /// Pop replies front-to-back; empty replies with an empty string.
    Scripted(Mutex<Vec<String>>),
    /// Always fail with this HTTP status and body.
    Fail { status: u16, body: String },
}

impl MockCompletion {
    /// Replies with the last user message, verbatim.
    pub fn echo() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    /// Replies with `responses` in order, then empty strings.
    pub fn with_responses(responses: Vec<&str>) -> Self {
        Self::with_behavior(Behavior::Scripted(Mutex::new(
            responses.into_iter().map(String::from).collect(),
        )))
    }

    /// Fails every call with a non-success status.
    pub fn failing(status: u16, body: &str) -> Self {
        Self::with_behavior(Behavior::Fail {
            status,
            body: body.to_string(),
        })
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// How many times `complete` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copies of every request seen so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn last_user_text(request: &ChatRequest) -> String {
        request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| match &m.content {
                MessageContent::Text(text) => text.clone(),
                MessageContent::Parts(parts) => parts
                    .iter()
                    .filter_map(|p| match p {
                        ContentPart::Text { text } => Some(text.as_str()),
                        ContentPart::ImageUrl { .. } => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .unwrap_or_default()
    }

    fn reply(text: String) -> ChatResponse {
        ChatResponse {
            choices: vec![Choice {
                message: AssistantMessage {
                    content: Some(text),
                },
                finish_reason: Some("stop".to_string()),
            }],
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Simulated network round trip.
        tokio::time::sleep(Duration::from_millis(5)).await;
        let text = match &self.behavior {
            Behavior::Echo => Self::last_user_text(&request),
            Behavior::Scripted(queue) => {
                let mut queue = queue.lock().unwrap_or_else(|e| e.into_inner());
                if queue.is_empty() {
                    String::new()
                } else {
                    queue.remove(0)
                }
            }
            Behavior::Fail { status, body } => {
                self.requests
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(request);
                return Err(ServiceError::Status {
                    status: *status,
                    body: body.clone(),
                });
            }
        };
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        Ok(Self::reply(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::ChatMessage;

    fn user_request(text: &str) -> ChatRequest {
        ChatRequest {
            model: "test-model".to_string(),
            messages: vec![ChatMessage::user(text)],
            temperature: None,
            max_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_echo_returns_user_text() {
        let mock = MockCompletion::echo();
        let response = mock.complete(user_request("hello")).await.unwrap();
        assert_eq!(response.into_text().unwrap(), "hello");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_scripted_pops_in_order() {
        let mock = MockCompletion::with_responses(vec!["one", "two"]);
        assert_eq!(
            mock.complete(user_request("a")).await.unwrap().into_text().unwrap(),
            "one"
        );
        assert_eq!(
            mock.complete(user_request("b")).await.unwrap().into_text().unwrap(),
            "two"
        );
        assert_eq!(
            mock.complete(user_request("c")).await.unwrap().into_text().unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_failing_surfaces_status() {
        let mock = MockCompletion::failing(500, "boom");
        let err = mock.complete(user_request("a")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 500, .. }));
        // The request is still recorded for assertions.
        assert_eq!(mock.requests().len(), 1);
    }
}
