//! Client for the Anthropic Messages API.
//!
//! Only the non-streaming request/response shape is supported. The
//! whole conversation goes up as one user message.

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ai::provider::Provider;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 800;

#[derive(Serialize, Debug)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize, Debug)]
pub struct RequestMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Content block in a response. Anything that isn't text (e.g. a
/// tool_use block) is kept but ignored.
#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Token usage information
#[derive(Deserialize, Debug)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Deserialize, Debug)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

impl MessagesResponse {
    /// Text of the first text block
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

pub async fn messages(
    prompt: &str,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<MessagesResponse, Error> {
    let payload = MessagesRequest {
        model,
        max_tokens: MAX_TOKENS,
        messages: vec![RequestMessage {
            role: "user",
            content: prompt,
        }],
    };
    let url = format!("{}/v1/messages", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json::<MessagesResponse>()
        .await?;

    if let Some(usage) = &response.usage {
        tracing::debug!(
            "Claude usage: input={} output={}",
            usage.input_tokens,
            usage.output_tokens
        );
    }

    Ok(response)
}

pub struct ClaudeProvider {
    api_hostname: String,
    api_key: String,
}

impl ClaudeProvider {
    pub fn new(api_hostname: &str, api_key: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl Provider for ClaudeProvider {
    async fn send(&self, prompt: &str, model_id: &str) -> Result<String, Error> {
        let resp = messages(prompt, &self.api_hostname, &self.api_key, model_id).await?;
        let text = resp.text().ok_or(anyhow!(
            "No text content received. Stop reason: {:?}",
            resp.stop_reason
        ))?;
        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}
