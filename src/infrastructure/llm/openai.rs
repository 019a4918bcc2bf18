use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{DomainError, LlmProvider, LlmRequest, LlmResponse, Message, Usage};

/// DashScope's OpenAI-compatible endpoint (Qwen models)
pub const DEFAULT_OPENAI_COMPATIBLE_BASE_URL: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1";

/// Provider for any endpoint speaking the OpenAI chat completions protocol
///
/// `base_url` includes the version segment, e.g. `https://api.openai.com/v1`.
#[derive(Debug)]
pub struct OpenAiCompatibleProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiCompatibleProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_COMPATIBLE_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<OpenAiMessage> =
            request.messages.iter().map(OpenAiMessage::from_domain).collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| DomainError::provider("openai", "No content in response"))?;

        let mut llm_response = LlmResponse::new(Message::assistant(content.trim()));

        if let Some(usage) = response.usage {
            llm_response =
                llm_response.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiCompatibleProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

impl OpenAiMessage {
    fn from_domain(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content_text().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;
    use crate::infrastructure::llm::http_client::HttpClient;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "qwen-plus",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18 }
        })
    }

    #[tokio::test]
    async fn test_chat() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("  0.9\n"));
        let provider = OpenAiCompatibleProvider::new(client, "test-api-key");

        let request = LlmRequest::builder().system("grade").user("doc").build();
        let response = provider.chat("qwen-plus", request).await.unwrap();

        assert_eq!(response.content(), "0.9");
        assert_eq!(response.usage, Some(Usage::new(10, 8)));
    }

    #[tokio::test]
    async fn test_request_body_carries_both_messages() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("ok"));
        let provider = OpenAiCompatibleProvider::new(client, "k");

        let request = LlmRequest::builder()
            .system("instruction")
            .user("content")
            .temperature(0.0)
            .build();
        provider.chat("qwen-plus", request).await.unwrap();

        let requests = provider.client.requests();
        let body = &requests[0].1;
        assert_eq!(body["model"], "qwen-plus");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "instruction");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["stream"], false);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let client = MockHttpClient::new().with_error(TEST_URL, "API key invalid");
        let provider = OpenAiCompatibleProvider::new(client, "invalid-key");

        let result = provider.chat("qwen-plus", LlmRequest::builder().user("Hi").build()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_choices_is_error() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({"id": "x", "model": "qwen-plus", "choices": []}),
        );
        let provider = OpenAiCompatibleProvider::new(client, "k");

        let err = provider
            .chat("qwen-plus", LlmRequest::builder().user("Hi").build())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No choices"));
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let custom_url = "http://localhost:8000/v1/chat/completions";
        let client = MockHttpClient::new().with_response(custom_url, completion("Custom"));
        let provider =
            OpenAiCompatibleProvider::with_base_url(client, "k", "http://localhost:8000/v1/");

        let response = provider
            .chat("local", LlmRequest::builder().user("Test").build())
            .await
            .unwrap();

        assert_eq!(response.content(), "Custom");
    }

    #[tokio::test]
    async fn test_null_content_is_error() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            }),
        );
        let provider = OpenAiCompatibleProvider::new(client, "k");

        let err = provider
            .chat("qwen-plus", LlmRequest::builder().user("Hi").build())
            .await
            .unwrap_err();

        assert!(err.is_provider());
        assert!(err.to_string().contains("No content"));
    }

    #[tokio::test]
    async fn test_chat_against_http_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(header("Content-Type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "qwen-plus",
                "stream": false,
                "temperature": 0.0,
                "messages": [
                    {"role": "system", "content": "grade"},
                    {"role": "user", "content": "doc"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(" 0.8 ")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiCompatibleProvider::with_base_url(
            HttpClient::new(),
            "sk-test",
            format!("{}/v1", server.uri()),
        );
        let request = LlmRequest::builder()
            .system("grade")
            .user("doc")
            .temperature(0.0)
            .build();

        let response = provider.chat("qwen-plus", request).await.unwrap();

        assert_eq!(response.content(), "0.8");
    }
}
