use serde::{Deserialize, Serialize};

use super::{Message, MessageRole};

/// Parameters for a single chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: None,
        }
    }

    pub fn builder() -> LlmRequestBuilder {
        LlmRequestBuilder::new()
    }

    /// Content of the first system message, if any
    pub fn system_text(&self) -> Option<&str> {
        self.first_with_role(MessageRole::System)
    }

    /// Content of the first user message, if any
    pub fn user_text(&self) -> Option<&str> {
        self.first_with_role(MessageRole::User)
    }

    fn first_with_role(&self, role: MessageRole) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content_text())
    }
}

/// Builder for LlmRequest
#[derive(Debug, Default)]
pub struct LlmRequestBuilder {
    messages: Vec<Message>,
    temperature: Option<f32>,
}

impl LlmRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Message::system(content))
    }

    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Message::user(content))
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn build(self) -> LlmRequest {
        LlmRequest {
            messages: self.messages,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = LlmRequest::builder()
            .system("You are a helpful assistant")
            .user("Hello!")
            .temperature(0.0)
            .build();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.system_text(), Some("You are a helpful assistant"));
        assert_eq!(request.user_text(), Some("Hello!"));
    }

    #[test]
    fn test_request_without_system_message() {
        let request = LlmRequest::new(vec![Message::user("Only user")]);

        assert!(request.system_text().is_none());
        assert_eq!(request.user_text(), Some("Only user"));
    }

    #[test]
    fn test_optional_fields_are_skipped() {
        let request = LlmRequest::builder().user("Hi").build();
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("temperature").is_none());
    }
}
