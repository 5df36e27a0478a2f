//! OpenAI-compatible HTTP client.
//!
//! Works with any server exposing the `/chat/completions` and
//! `/audio/transcriptions` endpoints (OpenAI, Azure OpenAI, LocalAI,
//! Ollama in compatibility mode, ...). Transport failures surface as
//! errors; there is no retry here.

use reqwest::{header, multipart, Client};
use serde::{Deserialize, Serialize};

use hearth_core::config::OpenAiConfig;

use crate::error::AssistantError;

/// Sampling temperature for completion requests.
const TEMPERATURE: f32 = 0.3;
/// Token budget for the assistant reply.
const MAX_TOKENS: u32 = 1024;

/// Thin client over the completion and transcription endpoints.
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.api_key)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn transcriptions_url(&self) -> String {
        format!("{}/audio/transcriptions", self.config.base_url)
    }

    /// Issue one completion request and return the first choice's content.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, AssistantError> {
        let body = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header(header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Network(format!("HTTP {}: {}", status, body)));
        }

        let envelope: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Api(e.to_string()))?;

        let choice = envelope
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AssistantError::Api("no choices in response".to_string()))?;

        // A null content still counts as an (empty) structured reply.
        Ok(choice.message.content.unwrap_or_else(|| "{}".to_string()))
    }

    /// Transcribe an audio payload and return the transcript text.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Result<String, AssistantError> {
        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(audio).file_name(file_name.to_string()),
            )
            .text("model", self.config.transcription_model.clone());

        let response = self
            .client
            .post(self.transcriptions_url())
            .header(header::AUTHORIZATION, self.auth_header())
            .multipart(form)
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Network(format!("HTTP {}: {}", status, body)));
        }

        let envelope: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Transcription(e.to_string()))?;

        Ok(envelope.text)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OpenAiConfig {
        OpenAiConfig {
            api_key: "sk-test".to_string(),
            base_url: "https://example.test/v1".to_string(),
            ..OpenAiConfig::default()
        }
    }

    #[test]
    fn test_endpoint_urls() {
        let client = OpenAiClient::new(test_config());
        assert_eq!(
            client.completions_url(),
            "https://example.test/v1/chat/completions"
        );
        assert_eq!(
            client.transcriptions_url(),
            "https://example.test/v1/audio/transcriptions"
        );
    }

    #[test]
    fn test_completion_request_shape() {
        let body = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: "sys".to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: "hi".to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["max_tokens"], 1024);
    }

    #[test]
    fn test_response_envelope_parses_first_choice() {
        let raw = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "hello" } }
            ],
            "usage": { "prompt_tokens": 10, "completion_tokens": 2 }
        }"#;
        let envelope: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            envelope.choices[0].message.content.as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn test_transcription_envelope() {
        let envelope: TranscriptionResponse =
            serde_json::from_str(r#"{"text": "pay rent"}"#).unwrap();
        assert_eq!(envelope.text, "pay rent");
    }
}
