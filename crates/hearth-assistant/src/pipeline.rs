//! The prompt pipeline: user text in, applied actions and a message out.

use std::sync::Arc;

use tracing::{debug, info};

use hearth_core::config::OpenAiConfig;
use hearth_storage::Database;

use crate::client::OpenAiClient;
use crate::error::AssistantError;
use crate::interpreter::{ActionInterpreter, InterpretOutcome};
use crate::prompt::SYSTEM_PROMPT;

/// Guidance returned when no usable API key is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Please set your OpenAI API key in the [openai] section of the Hearth config file.";

/// Orchestrates one completion round-trip per user prompt.
pub struct AssistantPipeline {
    config: OpenAiConfig,
    client: OpenAiClient,
    interpreter: ActionInterpreter,
}

impl AssistantPipeline {
    pub fn new(config: OpenAiConfig, db: Arc<Database>) -> Self {
        Self {
            client: OpenAiClient::new(config.clone()),
            interpreter: ActionInterpreter::new(db),
            config,
        }
    }

    /// Process one free-text prompt.
    ///
    /// Without a configured key this short-circuits with a guidance
    /// message and touches neither the network nor the store. Transport
    /// failures propagate; malformed replies degrade to a plain message.
    pub async fn process_prompt(
        &self,
        user_text: &str,
    ) -> Result<InterpretOutcome, AssistantError> {
        if !self.config.is_configured() {
            debug!("Assistant invoked without a configured API key");
            return Ok(InterpretOutcome {
                message: NOT_CONFIGURED_MESSAGE.to_string(),
                records_created: 0,
            });
        }

        let reply = self.client.complete(SYSTEM_PROMPT, user_text).await?;
        let outcome = self.interpreter.apply(&reply)?;
        info!(
            records_created = outcome.records_created,
            "Prompt processed"
        );
        Ok(outcome)
    }

    /// Transcribe an audio payload via the transcription endpoint.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Result<String, AssistantError> {
        self.client.transcribe(audio, file_name).await
    }
}
