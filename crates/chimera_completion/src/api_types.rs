//! Wire types for the chat-completions endpoint.

use crate::client::ServiceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// User message made of typed parts (image + instruction).
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }
}

/// Message content is either a bare string or a list of typed parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

// Request payload
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

// Response payload
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if the service returned one.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }

    /// Consume the response, yielding the first choice's text.
    pub fn into_text(mut self) -> Result<String, ServiceError> {
        if self.choices.is_empty() {
            return Err(ServiceError::EmptyResponse);
        }
        self.choices
            .swap_remove(0)
            .message
            .content
            .ok_or(ServiceError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_openai_shape() {
        let request = ChatRequest {
            model: "llama-3.3-70b-versatile".to_string(),
            messages: vec![
                ChatMessage::system("be concise"),
                ChatMessage::user("hello"),
            ],
            temperature: Some(0.7),
            max_tokens: Some(150),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama-3.3-70b-versatile");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hello");
        assert_eq!(value["max_tokens"], 150);
    }

    #[test]
    fn test_optional_params_are_omitted() {
        let request = ChatRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::user("hi")],
            temperature: None,
            max_tokens: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn test_image_parts_serialize_tagged() {
        let message = ChatMessage::user_parts(vec![
            ContentPart::image_url("data:image/jpeg;base64,AAAA"),
            ContentPart::text("Describe this image in detail."),
        ]);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["content"][0]["type"], "image_url");
        assert_eq!(
            value["content"][0]["image_url"]["url"],
            "data:image/jpeg;base64,AAAA"
        );
        assert_eq!(value["content"][1]["type"], "text");
    }

    #[test]
    fn test_response_parses_and_extracts_text() {
        let body = json!({
            "choices": [{
                "message": {"role": "assistant", "content": "answer"},
                "finish_reason": "stop"
            }]
        });
        let response: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.first_text(), Some("answer"));
        assert_eq!(response.into_text().unwrap(), "answer");
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            response.into_text().unwrap_err(),
            ServiceError::EmptyResponse
        ));
    }
}
