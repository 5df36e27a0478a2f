//! Natural-language assistant for Hearth.
//!
//! Turns free-text user input into validated store mutations: an
//! OpenAI-compatible client, an action interpreter, the prompt pipeline
//! that ties them together, and a cancellable voice-listen loop.

pub mod client;
pub mod error;
pub mod interpreter;
pub mod pipeline;
pub mod prompt;
pub mod voice;

pub use client::OpenAiClient;
pub use error::AssistantError;
pub use interpreter::{ActionInterpreter, InterpretOutcome};
pub use pipeline::{AssistantPipeline, NOT_CONFIGURED_MESSAGE};
pub use voice::{listen, ListenOutcome, SpeechSource};
