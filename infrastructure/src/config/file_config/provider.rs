//! Provider configuration from TOML (`[provider]` section)

use toolloop_domain::{ConfigIssue, ConfigIssueCode, Model, Provider};
use serde::{Deserialize, Serialize};

/// Raw provider configuration from TOML
///
/// # Example
///
/// ```toml
/// [provider]
/// name = "openai"                          # "deepseek", "openai", "anthropic"
/// base_url = "https://api.openai.com/v1"   # optional, provider default otherwise
/// model = "gpt-4o-mini"                    # optional, provider default otherwise
/// api_key_env = "MY_OPENAI_KEY"            # optional, provider default otherwise
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub name: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// Inline API key. Prefer `api_key_env` for anything checked in.
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            name: Provider::default().as_str().to_string(),
            base_url: None,
            model: None,
            api_key: None,
            api_key_env: None,
        }
    }
}

impl FileProviderConfig {
    /// Parse the provider name, falling back to the default provider.
    pub fn parse_provider(&self) -> (Provider, Vec<ConfigIssue>) {
        match self.name.parse::<Provider>() {
            Ok(provider) => (provider, vec![]),
            Err(_) => {
                let valid: Vec<_> = Provider::all().iter().map(|p| p.as_str()).collect();
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider,
                    format!(
                        "provider.name: unknown value '{}' (valid: {}), falling back to '{}'",
                        self.name,
                        valid.join(", "),
                        Provider::default()
                    ),
                );
                (Provider::default(), vec![issue])
            }
        }
    }

    pub fn base_url(&self, provider: Provider) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| provider.default_base_url().to_string())
    }

    pub fn model(&self, provider: Provider) -> Model {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(Model::new)
            .unwrap_or_else(|| provider.default_model())
    }

    /// Resolve the API key: inline key first, then the configured or
    /// conventional environment variable.
    pub fn resolve_api_key(&self, provider: Provider) -> (Option<String>, Vec<ConfigIssue>) {
        self.resolve_api_key_with(provider, |name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with(
        &self,
        provider: Provider,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> (Option<String>, Vec<ConfigIssue>) {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return (Some(key.clone()), vec![]);
        }

        let env_name = self
            .api_key_env
            .as_deref()
            .unwrap_or_else(|| provider.api_key_env());
        match lookup(env_name).filter(|k| !k.trim().is_empty()) {
            Some(key) => (Some(key), vec![]),
            None => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::MissingApiKey,
                    format!(
                        "no API key for provider '{}': set provider.api_key or {}",
                        provider, env_name
                    ),
                );
                (None, vec![issue])
            }
        }
    }
}
