//! The core models for managing a stateful chat with an LLM.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    fn prompt_label(&self) -> &'static str {
        match self {
            Sender::User => "User: ",
            Sender::Bot => "Model: ",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single turn in the conversation. Records are never mutated once
/// created, editing removes them and appends a replacement.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MessageRecord {
    #[serde(rename = "msg_id", alias = "id")]
    pub id: u64,
    pub sender: Sender,
    pub content: String,
}

impl MessageRecord {
    pub fn new(id: u64, sender: Sender, content: &str) -> Self {
        MessageRecord {
            id,
            sender,
            content: content.to_string(),
        }
    }
}

/// Ordered log of messages keyed by id. Ids are always contiguous
/// from 1 since the only ways to change the log are `append` and
/// `truncate_from`.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Transcript(BTreeMap<u64, MessageRecord>);

impl Transcript {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Rebuilds a transcript from records in conversation order,
    /// reassigning ids so they start at 1.
    pub fn new_with_records(records: Vec<MessageRecord>) -> Self {
        let mut transcript = Self::new();
        for r in records.into_iter() {
            transcript.append(r.sender, &r.content);
        }
        transcript
    }

    pub fn append(&mut self, sender: Sender, content: &str) -> MessageRecord {
        let id = self.0.len() as u64 + 1;
        let record = MessageRecord::new(id, sender, content);
        self.0.insert(id, record.clone());
        record
    }

    /// Removes the record with `id` and everything after it. Returns
    /// the removed records in order.
    pub fn truncate_from(&mut self, id: u64) -> Vec<MessageRecord> {
        self.0.split_off(&id).into_values().collect()
    }

    pub fn get(&self, id: u64) -> Option<&MessageRecord> {
        self.0.get(&id)
    }

    pub fn last(&self) -> Option<&MessageRecord> {
        self.0.values().next_back()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> Vec<MessageRecord> {
        self.0.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageRecord> {
        self.0.values()
    }

    /// Flattens the conversation into the single prompt sent to the
    /// model. Sender labels are not included.
    pub fn render_as_prompt(&self) -> String {
        let mut prompt = String::new();
        for r in self.iter() {
            prompt.push_str(&r.content);
            prompt.push('\n');
        }
        prompt.trim_end().to_string()
    }

    /// Same as `render_as_prompt` but each line is prefixed with who
    /// said it.
    pub fn render_as_labeled_prompt(&self) -> String {
        let mut prompt = String::new();
        for r in self.iter() {
            prompt.push_str(r.sender.prompt_label());
            prompt.push_str(&r.content);
            prompt.push('\n');
        }
        prompt.trim_end().to_string()
    }
}

/// A copy of the transcript taken right before it was changed.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub chat_id: u64,
    pub chatlog: Vec<MessageRecord>,
}

/// Every snapshot taken during a session keyed by a sequential id
/// starting at 1. Serializes as a JSON object with string keys.
#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct SnapshotHistory(BTreeMap<u64, Snapshot>);

impl SnapshotHistory {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn record(&mut self, transcript: &Transcript) -> u64 {
        let chat_id = self.0.len() as u64 + 1;
        self.0.insert(
            chat_id,
            Snapshot {
                chat_id,
                chatlog: transcript.records(),
            },
        );
        chat_id
    }

    pub fn get(&self, chat_id: u64) -> Option<&Snapshot> {
        self.0.get(&chat_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.0.values()
    }
}
