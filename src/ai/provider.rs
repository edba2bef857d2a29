//! The boundary between the chat and the LLM vendors. Each vendor
//! gets one adapter implementing `Provider` and the chat only ever
//! talks to the trait object.
use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;

use crate::anthropic::ClaudeProvider;
use crate::anyscale::AnyscaleProvider;
use crate::core::AppConfig;
use crate::openai::OpenAiProvider;

#[async_trait]
pub trait Provider {
    /// Sends the full conversation as a single prompt and returns the
    /// model's reply text.
    async fn send(&self, prompt: &str, model_id: &str) -> Result<String, Error>;
    fn name(&self) -> &'static str;
}

pub type BoxedProvider = Box<dyn Provider + Send + Sync + 'static>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Anyscale,
}

impl ProviderKind {
    /// Builds the adapter for this provider from the config. Fails if
    /// no API key was supplied for it.
    pub fn build(&self, config: &AppConfig) -> Result<BoxedProvider> {
        let missing_key = |var: &str| {
            anyhow!(
                "Missing API key for {:?}. Pass it as a flag or set {}",
                self,
                var
            )
        };
        let provider: BoxedProvider = match self {
            ProviderKind::OpenAi => Box::new(OpenAiProvider::new(
                &config.openai_api_hostname,
                config
                    .openai_api_key
                    .as_deref()
                    .ok_or_else(|| missing_key("OPENAI_API_KEY"))?,
            )),
            ProviderKind::Anthropic => Box::new(ClaudeProvider::new(
                &config.anthropic_api_hostname,
                config
                    .anthropic_api_key
                    .as_deref()
                    .ok_or_else(|| missing_key("ANTHROPIC_API_KEY"))?,
            )),
            ProviderKind::Anyscale => Box::new(AnyscaleProvider::new(
                &config.anyscale_api_hostname,
                config
                    .anyscale_api_key
                    .as_deref()
                    .ok_or_else(|| missing_key("ANYSCALE_API_KEY"))?,
            )),
        };
        tracing::debug!("Using provider {}", provider.name());
        Ok(provider)
    }
}
