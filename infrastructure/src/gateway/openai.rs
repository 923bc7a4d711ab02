//! OpenAI-compatible chat completions gateway
//!
//! Works against any endpoint that speaks `POST /chat/completions`
//! (DeepSeek, OpenAI and compatible proxies).

use super::wire::{build_request, decode_body, status_error};
use crate::tools::JsonSchemaToolConverter;
use async_trait::async_trait;
use std::time::Duration;
use toolloop_application::ports::completion_gateway::{CompletionGateway, GatewayError};
use toolloop_domain::{Completion, CompletionOptions, Conversation};
use tracing::{debug, warn};

/// [`CompletionGateway`] over HTTP.
///
/// The client-level timeout bounds each request. Loops additionally bound
/// the call with their own timeout, so either may fire first.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    schema: JsonSchemaToolConverter,
}

impl OpenAiCompatibleGateway {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint_url(base_url),
            api_key,
            schema: JsonSchemaToolConverter,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::Connection(e.to_string())
    } else {
        GatewayError::Other(e.to_string())
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompatibleGateway {
    async fn complete(
        &self,
        conversation: &Conversation,
        options: &CompletionOptions,
    ) -> Result<Completion, GatewayError> {
        let body = build_request(conversation, options, &self.schema);

        debug!(
            endpoint = %self.endpoint,
            model = %body.model,
            messages = body.messages.len(),
            tools = body.tools.as_ref().map_or(0, Vec::len),
            "Sending completion request"
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(send_error)?;
        let status = response.status();
        let text = response.text().await.map_err(send_error)?;

        if !status.is_success() {
            warn!(status = %status, "Completion request rejected");
            return Err(status_error(status.as_u16(), text));
        }

        decode_body(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        assert_eq!(
            endpoint_url("https://api.deepseek.com/"),
            "https://api.deepseek.com/chat/completions"
        );
        assert_eq!(
            endpoint_url("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let gateway =
            OpenAiCompatibleGateway::new("http://127.0.0.1:9", None, Duration::from_secs(2))
                .unwrap();
        let err = gateway
            .complete(
                &Conversation::with_system_prompt("sys"),
                &CompletionOptions::new("m".into()),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Connection(_) | GatewayError::Timeout
        ));
    }
}
