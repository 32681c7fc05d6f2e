//! HTTP client for the dialogue oracle (`/api/chat`, `/api/judge`).

use std::time::Duration;

use async_trait::async_trait;
use civicsim_domain::OrdinanceOutcome;
use civicsim_shared::{judgment_or_error, ChatRequest, ChatResponse, JudgeRequest};
use reqwest::Client;

use crate::infrastructure::correlation::{CorrelationId, CORRELATION_HEADER};
use crate::infrastructure::ports::{DialogueOraclePort, OracleError};

/// Oracle calls wait on a text generator; keep the timeout generous.
const ORACLE_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct HttpDialogueOracle {
    client: Client,
    base_url: String,
}

impl HttpDialogueOracle {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, ORACLE_TIMEOUT_SECS)
    }

    /// Create client with custom timeout (for testing).
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<String, OracleError> {
        let correlation_id = CorrelationId::new();
        tracing::debug!(
            correlation_id = %correlation_id.short(),
            path,
            "Calling dialogue oracle"
        );

        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header(CORRELATION_HEADER, correlation_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                correlation_id = %correlation_id.short(),
                status = status.as_u16(),
                path,
                "Dialogue oracle returned an error status"
            );
            return Err(OracleError::Upstream {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| OracleError::RequestFailed(e.to_string()))
    }
}

#[async_trait]
impl DialogueOraclePort for HttpDialogueOracle {
    async fn chat(&self, request: ChatRequest) -> Result<String, OracleError> {
        let body = self.post("/api/chat", &request).await?;
        let reply: ChatResponse =
            serde_json::from_str(&body).map_err(|e| OracleError::InvalidResponse(e.to_string()))?;
        Ok(reply.text)
    }

    async fn judge(&self, issue_context: String) -> Result<OrdinanceOutcome, OracleError> {
        let body = self
            .post("/api/judge", &JudgeRequest { issue_context })
            .await?;
        Ok(judgment_or_error(&body))
    }
}
