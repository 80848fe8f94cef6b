//! OpenAI chat-completion provider.
//!
//! Uses [`async_openai`] for type-safe request/response handling. The
//! provider makes exactly one kind of call: a non-streaming chat
//! completion over the orchestrator's prompt sequence.

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use async_openai::Client;
use secrecy::{ExposeSecret, SecretString};

use intervue_core::llm::provider::LlmProvider;
use intervue_types::error::ConfigError;
use intervue_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
};

/// OpenAI provider backed by the official chat completions endpoint.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

// Manual Debug impl: redacts the client (and its API key) while still allowing
// `Result<OpenAiProvider, _>` to be unwrapped in tests. See the note above on
// why Debug is not derived.
impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("client", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiProvider {
    /// Create a provider from an API key and model identifier.
    ///
    /// An empty key is rejected here, at construction: the credential check
    /// happens at startup, never lazily on the first request.
    pub fn new(api_key: &SecretString, model: impl Into<String>) -> Result<Self, ConfigError> {
        let key = api_key.expose_secret();
        if key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let config = OpenAIConfig::new().with_api_key(key);
        Ok(Self {
            client: Client::with_config(config),
            model: model.into(),
        })
    }

    /// Model identifier this provider was configured with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic
    /// [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            })
            .collect();

        // Use the model from the request if set, otherwise the configured default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
            presence_penalty: Some(request.presence_penalty),
            frequency_penalty: Some(request.frequency_penalty),
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            usage,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited
            } else if code == "server_error" || error_type == "overloaded_error" {
                LlmError::Overloaded(api_err.message.clone())
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if let Some(status) = reqwest_err.status() {
                match status.as_u16() {
                    401 => LlmError::AuthenticationFailed,
                    429 => LlmError::RateLimited,
                    529 => LlmError::Overloaded(err.to_string()),
                    _ => LlmError::Provider {
                        message: err.to_string(),
                    },
                }
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervue_types::llm::PromptMessage;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn test_missing_key_fails_construction() {
        let err = OpenAiProvider::new(&secret(""), "gpt-4o-mini").unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = OpenAiProvider::new(&secret("   "), "gpt-4o-mini").unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_construction_with_key() {
        let provider = OpenAiProvider::new(&secret("sk-test"), "gpt-4o-mini").unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_build_request_maps_roles_and_params() {
        let provider = OpenAiProvider::new(&secret("sk-test"), "gpt-4o-mini").unwrap();
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                PromptMessage::system("You are an interviewer."),
                PromptMessage::user("hello"),
                PromptMessage::assistant("hi, ready when you are"),
            ],
            max_tokens: 500,
            temperature: 0.7,
            presence_penalty: 0.1,
            frequency_penalty: 0.1,
        };

        let oai_request = provider.build_request(&request);
        assert_eq!(oai_request.model, "gpt-4o-mini");
        assert_eq!(oai_request.messages.len(), 3);
        assert_eq!(oai_request.max_completion_tokens, Some(500));
        assert_eq!(oai_request.temperature, Some(0.7));
        assert_eq!(oai_request.presence_penalty, Some(0.1));
        assert_eq!(oai_request.frequency_penalty, Some(0.1));

        assert!(matches!(
            oai_request.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            oai_request.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
        assert!(matches!(
            oai_request.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
    }

    #[test]
    fn test_build_request_empty_model_falls_back_to_default() {
        let provider = OpenAiProvider::new(&secret("sk-test"), "gpt-4o-mini").unwrap();
        let request = CompletionRequest {
            model: String::new(),
            messages: vec![PromptMessage::user("hello")],
            max_tokens: 500,
            temperature: 0.7,
            presence_penalty: 0.1,
            frequency_penalty: 0.1,
        };

        let oai_request = provider.build_request(&request);
        assert_eq!(oai_request.model, "gpt-4o-mini");
    }
}
