//! Anyscale Endpoints speaks the OpenAI chat completions protocol so
//! this reuses the OpenAI client with its own host and defaults.
use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::ai::provider::Provider;
use crate::openai::{Message, Role, completion};

const SYSTEM_MESSAGE: &str = "You are a helpful assistant.";
const TEMPERATURE: f64 = 0.01;
const NO_RESPONSE: &str = "No response generated.";

pub struct AnyscaleProvider {
    api_hostname: String,
    api_key: String,
}

impl AnyscaleProvider {
    pub fn new(api_hostname: &str, api_key: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl Provider for AnyscaleProvider {
    async fn send(&self, prompt: &str, model_id: &str) -> Result<String, Error> {
        let messages = vec![
            Message::new(Role::System, SYSTEM_MESSAGE),
            Message::new(Role::User, prompt),
        ];
        let resp = completion(
            &messages,
            Some(TEMPERATURE),
            &self.api_hostname,
            &self.api_key,
            model_id,
        )
        .await?;

        // A null message content still counts as a reply
        let msg = resp["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or(NO_RESPONSE);
        Ok(msg.to_string())
    }

    fn name(&self) -> &'static str {
        "anyscale"
    }
}
