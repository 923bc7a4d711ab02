//! Chat completion providers

use super::error::DomainError;
use super::model::Model;
use serde::{Deserialize, Serialize};

/// A chat completion provider reachable through an OpenAI-compatible API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    DeepSeek,
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "deepseek",
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "https://api.deepseek.com",
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::Anthropic => "https://api.anthropic.com",
        }
    }

    pub fn default_model(&self) -> Model {
        match self {
            Provider::DeepSeek => Model::new("deepseek-chat"),
            Provider::OpenAi => Model::new("gpt-3.5-turbo"),
            Provider::Anthropic => Model::new("claude-3-haiku-20240307"),
        }
    }

    /// Environment variable that conventionally holds this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn all() -> &'static [Provider] {
        &[Provider::DeepSeek, Provider::OpenAi, Provider::Anthropic]
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Ok(Provider::DeepSeek),
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provider_is_deepseek() {
        let provider = Provider::default();
        assert_eq!(provider, Provider::DeepSeek);
        assert_eq!(provider.default_base_url(), "https://api.deepseek.com");
        assert_eq!(provider.default_model().as_str(), "deepseek-chat");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!(" anthropic ".parse::<Provider>().unwrap(), Provider::Anthropic);
    }

    #[test]
    fn test_parse_unknown_provider() {
        let err = "mistral".parse::<Provider>().unwrap_err();
        assert_eq!(err, DomainError::UnknownProvider("mistral".to_string()));
    }

    #[test]
    fn test_display_matches_parse() {
        for provider in Provider::all() {
            assert_eq!(provider.to_string().parse::<Provider>().unwrap(), *provider);
        }
    }
}
