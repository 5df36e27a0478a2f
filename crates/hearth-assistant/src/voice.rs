//! Cancellable voice-listen loop.
//!
//! A [`SpeechSource`] yields transcript fragments as they are recognized.
//! [`listen`] accumulates them, forwards each growing partial to an
//! optional channel, and checks a cancellation signal cooperatively: on
//! stop it returns whatever partial transcript had been captured, which
//! the caller then still acts on.

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

use crate::error::AssistantError;

/// A source of incremental transcript fragments.
#[async_trait]
pub trait SpeechSource: Send {
    /// The next recognized fragment, or `None` when the stream ends.
    async fn next_fragment(&mut self) -> Result<Option<String>, AssistantError>;
}

/// Result of a listen session.
#[derive(Debug, Clone, PartialEq)]
pub struct ListenOutcome {
    /// The accumulated transcript (possibly partial).
    pub text: String,
    /// Whether the session ended via the cancellation signal.
    pub cancelled: bool,
}

/// Listen until the source is exhausted or the cancel signal fires.
///
/// Fragment errors propagate; cancellation does not — it surrenders the
/// partial transcript instead. A dropped cancel sender counts as a stop.
pub async fn listen<S: SpeechSource>(
    source: &mut S,
    partials: Option<mpsc::UnboundedSender<String>>,
    mut cancel: watch::Receiver<bool>,
) -> Result<ListenOutcome, AssistantError> {
    let mut transcript = String::new();

    if *cancel.borrow() {
        return Ok(ListenOutcome {
            text: transcript,
            cancelled: true,
        });
    }

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    return Ok(ListenOutcome {
                        text: transcript,
                        cancelled: true,
                    });
                }
            }
            fragment = source.next_fragment() => {
                match fragment? {
                    Some(part) => {
                        if !transcript.is_empty() {
                            transcript.push(' ');
                        }
                        transcript.push_str(&part);
                        if let Some(tx) = &partials {
                            let _ = tx.send(transcript.clone());
                        }
                    }
                    None => {
                        return Ok(ListenOutcome {
                            text: transcript,
                            cancelled: false,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Scripted source: yields queued fragments, then hangs or ends.
    struct ScriptedSource {
        fragments: VecDeque<String>,
        hang_when_empty: bool,
    }

    impl ScriptedSource {
        fn new(fragments: &[&str], hang_when_empty: bool) -> Self {
            Self {
                fragments: fragments.iter().map(|s| s.to_string()).collect(),
                hang_when_empty,
            }
        }
    }

    #[async_trait]
    impl SpeechSource for ScriptedSource {
        async fn next_fragment(&mut self) -> Result<Option<String>, AssistantError> {
            match self.fragments.pop_front() {
                Some(fragment) => Ok(Some(fragment)),
                None if self.hang_when_empty => {
                    // Simulates an open microphone with no further speech.
                    std::future::pending::<()>().await;
                    unreachable!()
                }
                None => Ok(None),
            }
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SpeechSource for FailingSource {
        async fn next_fragment(&mut self) -> Result<Option<String>, AssistantError> {
            Err(AssistantError::Transcription("microphone lost".to_string()))
        }
    }

    #[tokio::test]
    async fn test_listen_until_source_exhausted() {
        let mut source = ScriptedSource::new(&["pay", "fifty", "for lunch"], false);
        let (_tx, rx) = watch::channel(false);

        let outcome = listen(&mut source, None, rx).await.unwrap();
        assert_eq!(outcome.text, "pay fifty for lunch");
        assert!(!outcome.cancelled);
    }

    #[tokio::test]
    async fn test_cancellation_surrenders_partial_transcript() {
        let mut source = ScriptedSource::new(&["pay", "fifty"], true);
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            // Give the listener time to drain both fragments.
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = tx.send(true);
        });

        let outcome = listen(&mut source, None, rx).await.unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.text, "pay fifty");
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_already_cancelled_returns_immediately() {
        let mut source = ScriptedSource::new(&["never read"], true);
        let (tx, rx) = watch::channel(true);

        let outcome = listen(&mut source, None, rx).await.unwrap();
        assert!(outcome.cancelled);
        assert!(outcome.text.is_empty());
        drop(tx);
    }

    #[tokio::test]
    async fn test_dropped_cancel_sender_counts_as_stop() {
        let mut source = ScriptedSource::new(&[], true);
        let (tx, rx) = watch::channel(false);
        drop(tx);

        let outcome = listen(&mut source, None, rx).await.unwrap();
        assert!(outcome.cancelled);
    }

    #[tokio::test]
    async fn test_partials_channel_sees_growing_transcript() {
        let mut source = ScriptedSource::new(&["add", "ten"], false);
        let (partials_tx, mut partials_rx) = mpsc::unbounded_channel();
        let (_tx, rx) = watch::channel(false);

        let outcome = listen(&mut source, Some(partials_tx), rx).await.unwrap();
        assert_eq!(outcome.text, "add ten");

        assert_eq!(partials_rx.recv().await.unwrap(), "add");
        assert_eq!(partials_rx.recv().await.unwrap(), "add ten");
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let mut source = FailingSource;
        let (_tx, rx) = watch::channel(false);

        let err = listen(&mut source, None, rx).await.unwrap_err();
        assert!(matches!(err, AssistantError::Transcription(_)));
    }
}
