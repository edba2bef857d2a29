use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};

use super::models::{MessageRecord, Sender, SnapshotHistory, Transcript};
use crate::ai::provider::BoxedProvider;
use crate::chat::store::save_history;

/// Result of sending a user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing was sent
    Empty,
    /// The provider failed or returned nothing so only the user
    /// message was recorded
    NoReply { user: MessageRecord },
    Replied {
        user: MessageRecord,
        bot: MessageRecord,
    },
}

/// Result of editing a past user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Blank replacement text, nothing changed
    Abandoned,
    Replayed {
        /// Records dropped from the transcript by the edit
        removed: Vec<MessageRecord>,
        outcome: SendOutcome,
    },
}

/// A single conversation with one LLM provider.
///
/// Owns the live transcript and the history of snapshots taken before
/// each edit. All changes go through `send_user_message` and `edit`
/// which keep ids contiguous.
///
/// Use `Chat::builder()` to construct a valid `Chat`.
pub struct Chat {
    provider: BoxedProvider,
    model_id: String,
    transcript: Transcript,
    history: SnapshotHistory,
    history_path: Option<PathBuf>,
    label_turns: bool,
    dispatch_delay: Duration,
}

impl Chat {
    pub fn builder(provider: BoxedProvider, model_id: &str) -> ChatBuilder {
        ChatBuilder::new(provider, model_id)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn prompt(&self) -> String {
        if self.label_turns {
            self.transcript.render_as_labeled_prompt()
        } else {
            self.transcript.render_as_prompt()
        }
    }

    /// Appends the user's message and asks the provider for a reply
    /// using the whole transcript as context. Provider failures are
    /// logged and never retried.
    pub async fn send_user_message(&mut self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Empty;
        }

        let user = self.transcript.append(Sender::User, text);
        let prompt = self.prompt();

        if !self.dispatch_delay.is_zero() {
            tokio::time::sleep(self.dispatch_delay).await;
        }

        tracing::debug!(
            "Sending {} message(s) to {} ({})",
            self.transcript.len(),
            self.provider.name(),
            self.model_id
        );
        match self.provider.send(&prompt, &self.model_id).await {
            Ok(reply) if !reply.trim().is_empty() => {
                let bot = self.transcript.append(Sender::Bot, &reply);
                SendOutcome::Replied { user, bot }
            }
            Ok(_) => {
                tracing::warn!("Empty response from {}", self.provider.name());
                SendOutcome::NoReply { user }
            }
            Err(e) => {
                tracing::warn!("No response from {}: {:?}", self.provider.name(), e);
                SendOutcome::NoReply { user }
            }
        }
    }

    /// Replaces a past user message. The message and everything after
    /// it is dropped, the prior transcript is snapshotted, and the new
    /// text is sent as if it were a fresh message.
    pub async fn edit(&mut self, target_id: u64, new_content: &str) -> Result<EditOutcome> {
        if new_content.trim().is_empty() {
            return Ok(EditOutcome::Abandoned);
        }

        match self.transcript.get(target_id) {
            Some(r) if r.sender == Sender::User => {}
            Some(r) => bail!("Message {} was sent by {} and can't be edited", target_id, r.sender),
            None => bail!("No message with id {}", target_id),
        }

        let chat_id = self.history.record(&self.transcript);
        let removed = self.transcript.truncate_from(target_id);
        tracing::info!(
            "Edited message {}, removed {} message(s), snapshot {}",
            target_id,
            removed.len(),
            chat_id
        );

        let outcome = self.send_user_message(new_content).await;
        Ok(EditOutcome::Replayed { removed, outcome })
    }

    /// Takes a final snapshot and writes the full history to disk,
    /// overwriting whatever was there. Failing to save is logged.
    pub fn close(mut self) -> SnapshotHistory {
        self.history.record(&self.transcript);
        if let Some(path) = &self.history_path {
            match save_history(&self.history, path) {
                Ok(()) => tracing::info!(
                    "Saved {} snapshot(s) to {}",
                    self.history.len(),
                    path.display()
                ),
                Err(e) => tracing::error!("Failed to save chat history: {:?}", e),
            }
        }
        self.history
    }
}

pub struct ChatBuilder {
    provider: BoxedProvider,
    model_id: String,
    transcript: Transcript,
    history: SnapshotHistory,
    history_path: Option<PathBuf>,
    label_turns: bool,
    dispatch_delay: Duration,
}

impl ChatBuilder {
    pub fn new(provider: BoxedProvider, model_id: &str) -> Self {
        Self {
            provider,
            model_id: model_id.to_string(),
            transcript: Transcript::new(),
            history: SnapshotHistory::new(),
            history_path: None,
            label_turns: false,
            dispatch_delay: Duration::ZERO,
        }
    }

    pub fn build(self) -> Chat {
        Chat {
            provider: self.provider,
            model_id: self.model_id,
            transcript: self.transcript,
            history: self.history,
            history_path: self.history_path,
            label_turns: self.label_turns,
            dispatch_delay: self.dispatch_delay,
        }
    }

    pub fn transcript(mut self, records: Vec<MessageRecord>) -> Self {
        self.transcript = Transcript::new_with_records(records);
        self
    }

    /// Where `Chat::close` writes the snapshot history
    pub fn history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    pub fn label_turns(mut self, label_turns: bool) -> Self {
        self.label_turns = label_turns;
        self
    }

    pub fn dispatch_delay(mut self, delay: Duration) -> Self {
        self.dispatch_delay = delay;
        self
    }
}
