use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;

use crate::ai::provider::Provider;
use crate::openai::{Message, Role, completion};

/// Sends the conversation to OpenAI as a single user message.
pub struct OpenAiProvider {
    api_hostname: String,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(api_hostname: &str, api_key: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn send(&self, prompt: &str, model_id: &str) -> Result<String, Error> {
        let messages = vec![Message::new(Role::User, prompt)];
        let resp = completion(&messages, None, &self.api_hostname, &self.api_key, model_id).await?;

        let msg = resp["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(anyhow!("No message received. Resp:\n\n {}", resp))?;
        Ok(msg.to_string())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
