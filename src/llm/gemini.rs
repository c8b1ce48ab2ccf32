use super::{GenerateRequest, LlmError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

fn build_request(request: &GenerateRequest) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            parts: vec![GeminiPart {
                text: Some(request.prompt.clone()),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: request.temperature,
        },
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
fn extract_text(body: &str) -> Result<Option<String>, LlmError> {
    let data: GeminiResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(e.to_string()))?;
    Ok(data
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text))
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, timeout: Option<Duration>) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Submit one prompt and return the first candidate's text, if any.
    ///
    /// The request URL carries the API key, so it is stripped from transport errors.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, LlmError> {
        let body = build_request(request);

        let resp = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.without_url()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status,
                message: text,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| LlmError::Http(e.without_url()))?;
        debug!(bytes = text.len(), "received generateContent response");
        extract_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = build_request(&GenerateRequest {
            prompt: "hello".into(),
            temperature: 0.2,
        });
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        let temp = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = GeminiConfig::new("k".into());
        config.base_url = "http://localhost:9000/".into();
        assert_eq!(
            config.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig::new("super-secret".into());
        let shown = format!("{:?}", config);
        assert!(!shown.contains("super-secret"));
    }

    #[test]
    fn test_extract_text_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "  first  "}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        }"#;
        assert_eq!(extract_text(body).unwrap().as_deref(), Some("  first  "));
    }

    #[test]
    fn test_extract_text_missing_shape() {
        assert_eq!(extract_text("{}").unwrap(), None);
        assert_eq!(extract_text(r#"{"candidates": []}"#).unwrap(), None);
        assert_eq!(
            extract_text(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap(),
            None
        );
        assert_eq!(
            extract_text(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_extract_text_malformed() {
        assert!(matches!(extract_text("not json"), Err(LlmError::Parse(_))));
        assert!(matches!(
            extract_text(r#"{"candidates": "nope"}"#),
            Err(LlmError::Parse(_))
        ));
    }
}
