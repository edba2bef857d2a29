//! Test utilities for integration tests
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;

use chatlog::ai::chat::{Chat, MessageRecord, Sender};
use chatlog::ai::provider::Provider;

/// A provider that plays back a fixed list of replies in order and
/// records every prompt it was sent. An `Err` entry simulates a
/// failed request. Once the script runs out it replies with an empty
/// string.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        let replies = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            replies: Arc::new(Mutex::new(replies)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn send(&self, prompt: &str, _model_id: &str) -> Result<String, Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Ok(String::new()),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Builds a chat backed by a scripted provider. The returned handle
/// shares state with the provider inside the chat.
pub fn scripted_chat(replies: Vec<Result<&str, &str>>) -> (Chat, ScriptedProvider) {
    let provider = ScriptedProvider::new(replies);
    let chat = Chat::builder(Box::new(provider.clone()), "test-model").build();
    (chat, provider)
}

/// `[{1,User,"hi"},{2,Bot,"hello"},{3,User,"bye"}]`
pub fn hi_hello_bye() -> Vec<MessageRecord> {
    vec![
        MessageRecord::new(1, Sender::User, "hi"),
        MessageRecord::new(2, Sender::Bot, "hello"),
        MessageRecord::new(3, Sender::User, "bye"),
    ]
}
