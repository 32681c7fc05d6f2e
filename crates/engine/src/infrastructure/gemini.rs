//! Gemini `generateContent` client (upstream text generator for the oracle
//! proxy).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest};
use crate::infrastructure::settings::GeminiSettings;

/// Env var holding the upstream API key.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        // Use 120 second timeout for generation requests (they can be slow)
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, settings }
    }

    /// Create client from environment variables.
    pub fn from_env() -> Self {
        Self::new(GeminiSettings::from_env())
    }

    pub fn has_credential(&self) -> bool {
        self.settings.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait]
impl LlmPort for GeminiClient {
    async fn generate(&self, request: LlmRequest) -> Result<String, LlmError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingCredential(API_KEY_VAR))?;

        let payload = build_payload(&request);
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(first_candidate_text(body))
    }
}

fn build_payload(request: &LlmRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: request
            .contents
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.as_str().to_string()),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect(),
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: request.system_instruction.clone(),
            }],
        },
    }
}

fn first_candidate_text(body: GenerateContentResponse) -> String {
    body.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .unwrap_or_default()
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use civicsim_shared::ChatTurnDto;

    fn settings(key: Option<&str>) -> GeminiSettings {
        GeminiSettings {
            api_key: key.map(str::to_string),
            model: "test-model".into(),
            base_url: "http://127.0.0.1:9/v1beta/".into(),
        }
    }

    #[test]
    fn payload_matches_generate_content_shape() {
        let request = LlmRequest::new(vec![ChatTurnDto::model("Hello"), ChatTurnDto::user("Hi")])
            .with_system_instruction("Be brief.");
        let json = serde_json::to_value(build_payload(&request)).unwrap();

        assert_eq!(json["contents"][0]["role"], "model");
        assert_eq!(json["contents"][1]["parts"][0]["text"], "Hi");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Be brief.");
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Sure."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(first_candidate_text(body), "Sure.");

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_candidate_text(empty), "");
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new(settings(Some("k")));
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9/v1beta/models/test-model:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = GeminiClient::new(settings(None));
        let err = client.generate(LlmRequest::new(vec![])).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential(API_KEY_VAR)));
    }
}
