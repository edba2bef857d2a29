use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::ai::provider::ProviderKind;

pub const DEFAULT_OPENAI_HOST: &str = "https://api.openai.com";
pub const DEFAULT_ANTHROPIC_HOST: &str = "https://api.anthropic.com";
pub const DEFAULT_ANYSCALE_HOST: &str = "https://api.endpoints.anyscale.com";
pub const DEFAULT_HISTORY_PATH: &str = "./chat_history.json";

/// The closed set of models a user can pick from. The label shown to
/// the user and the model that actually answers are chosen
/// separately so they don't have to match.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelName {
    #[value(name = "GPT-4")]
    Gpt4,
    #[value(name = "Llama3")]
    Llama3,
    #[value(name = "Claude3")]
    Claude3,
}

impl ModelName {
    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "GPT-4" => Ok(ModelName::Gpt4),
            "Llama3" => Ok(ModelName::Llama3),
            "Claude3" => Ok(ModelName::Claude3),
            _ => Err(anyhow!(
                "Invalid LLM name: {}. Expected one of GPT-4, Llama3, Claude3",
                label
            )),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelName::Gpt4 => "GPT-4",
            ModelName::Llama3 => "Llama3",
            ModelName::Claude3 => "Claude3",
        }
    }

    /// The concrete model identifier the backend expects.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelName::Gpt4 => "gpt-4-0125-preview",
            ModelName::Llama3 => "meta-llama/Meta-Llama-3-70B-Instruct",
            ModelName::Claude3 => "claude-3-haiku-20240307",
        }
    }

    pub fn provider(&self) -> ProviderKind {
        match self {
            ModelName::Gpt4 => ProviderKind::OpenAi,
            ModelName::Llama3 => ProviderKind::Anyscale,
            ModelName::Claude3 => ProviderKind::Anthropic,
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub given_model: ModelName,
    pub true_model: ModelName,
    pub openai_api_hostname: String,
    pub openai_api_key: Option<String>,
    pub anthropic_api_hostname: String,
    pub anthropic_api_key: Option<String>,
    pub anyscale_api_hostname: String,
    pub anyscale_api_key: Option<String>,
    pub history_path: String,
    pub label_turns: bool,
    pub dispatch_delay: Duration,
}

impl AppConfig {
    /// Config with default hosts and no API keys. Doesn't read the
    /// environment.
    pub fn new(given_model: ModelName, true_model: ModelName) -> Self {
        Self {
            given_model,
            true_model,
            openai_api_hostname: DEFAULT_OPENAI_HOST.to_string(),
            openai_api_key: None,
            anthropic_api_hostname: DEFAULT_ANTHROPIC_HOST.to_string(),
            anthropic_api_key: None,
            anyscale_api_hostname: DEFAULT_ANYSCALE_HOST.to_string(),
            anyscale_api_key: None,
            history_path: DEFAULT_HISTORY_PATH.to_string(),
            label_turns: false,
            dispatch_delay: Duration::ZERO,
        }
    }

    /// Config with hosts, keys, and the history path filled in from
    /// environment variables where set.
    pub fn from_env(given_model: ModelName, true_model: ModelName) -> Self {
        let mut config = Self::new(given_model, true_model);
        if let Ok(host) = env::var("CHATLOG_OPENAI_HOST") {
            config.openai_api_hostname = host;
        }
        if let Ok(host) = env::var("CHATLOG_ANTHROPIC_HOST") {
            config.anthropic_api_hostname = host;
        }
        if let Ok(host) = env::var("CHATLOG_ANYSCALE_HOST") {
            config.anyscale_api_hostname = host;
        }
        if let Ok(path) = env::var("CHATLOG_HISTORY_PATH") {
            config.history_path = path;
        }
        config.openai_api_key = env::var("OPENAI_API_KEY").ok();
        config.anthropic_api_key = env::var("ANTHROPIC_API_KEY").ok();
        config.anyscale_api_key = env::var("ANYSCALE_API_KEY").ok();
        config
    }

    pub fn model_id(&self) -> &'static str {
        self.true_model.model_id()
    }
}
