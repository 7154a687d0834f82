//! HTTP client for the Gemini text-generation API.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use webgen_core::{ProjectData, Result, WebgenConfig, WebgenError};

use crate::prompt::build_prompt;
use crate::protocol::{GenerateContentRequest, GenerateContentResponse};
use crate::response::{classify_error, extract_text, parse_project};

/// Client that turns a project description into generated files.
///
/// One call to [`generate`](Self::generate) is exactly one request. There are
/// no retries; the transport timeout is the only deadline.
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GenerationClient {
    pub fn new(endpoint: String, model: String, api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    /// Build a client from config. Fails if no usable API key is configured.
    pub fn from_config(config: &WebgenConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::new(
            config.generation.endpoint.clone(),
            config.generation.model.clone(),
            api_key,
            Duration::from_secs(config.generation.request_timeout_secs),
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    /// Generate a project for a (non-blank) description.
    #[instrument(skip(self, description), fields(model = %self.model))]
    pub async fn generate(&self, description: &str) -> Result<ProjectData> {
        let request = GenerateContentRequest::json_reply(build_prompt(description));

        debug!(chars = description.len(), "Sending generation request");
        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| WebgenError::Generation(format!("request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| WebgenError::Generation(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            let err = classify_error(status, &body);
            warn!(%status, "Generation request rejected: {}", err);
            return Err(err);
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| WebgenError::Parse(format!("unexpected API envelope ({e})")))?;
        let text = extract_text(envelope)?;
        let project = parse_project(&text)?;

        info!(files = project.files.len(), "Project generated");
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_targets_generate_content_for_model() {
        let client = GenerationClient::new(
            "https://generativelanguage.googleapis.com/".into(),
            "gemini-2.5-flash".into(),
            "key".into(),
            Duration::from_secs(5),
        );
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_asks_for_json() {
        let request = GenerateContentRequest::json_reply(build_prompt("a calculator"));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["contents"][0]["role"], "user");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("a calculator"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_generation_error() {
        let client = GenerationClient::new(
            "http://127.0.0.1:9".into(),
            "gemini-2.5-flash".into(),
            "key".into(),
            Duration::from_secs(2),
        );
        let err = client.generate("a todo app").await.unwrap_err();
        assert!(matches!(err, WebgenError::Generation(_)));
    }
}
