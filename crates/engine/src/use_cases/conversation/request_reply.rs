//! Request the next NPC line from the dialogue oracle.

use std::sync::Arc;

use civicsim_domain::ActorId;
use civicsim_shared::ChatRequest;

use crate::infrastructure::ports::{DialogueOraclePort, OracleError};

pub struct RequestReply {
    oracle: Arc<dyn DialogueOraclePort>,
}

impl RequestReply {
    pub fn new(oracle: Arc<dyn DialogueOraclePort>) -> Self {
        Self { oracle }
    }

    /// Ask the oracle for a reply. The caller owns the transcript; this never
    /// touches progress state.
    pub async fn execute(&self, actor_id: &ActorId, request: ChatRequest) -> Result<String, OracleError> {
        let turns = request.history.len();
        match self.oracle.chat(request).await {
            Ok(text) => {
                tracing::debug!(actor_id = %actor_id, turns, "NPC reply received");
                Ok(text.trim().to_string())
            }
            Err(e) => {
                tracing::warn!(actor_id = %actor_id, error = %e, "NPC reply failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockDialogueOraclePort;

    #[tokio::test]
    async fn trims_reply_text() {
        let mut oracle = MockDialogueOraclePort::new();
        oracle
            .expect_chat()
            .withf(|req| req.system_text == "persona")
            .times(1)
            .returning(|_| Ok("  Hello there.\n".to_string()));

        let use_case = RequestReply::new(Arc::new(oracle));
        let request = ChatRequest {
            history: vec![],
            system_text: "persona".into(),
        };
        let reply = use_case.execute(&ActorId::new("parent"), request).await.unwrap();
        assert_eq!(reply, "Hello there.");
    }

    #[tokio::test]
    async fn passes_upstream_errors_through() {
        let mut oracle = MockDialogueOraclePort::new();
        oracle
            .expect_chat()
            .returning(|_| Err(OracleError::Upstream { status: 502 }));

        let use_case = RequestReply::new(Arc::new(oracle));
        let err = use_case
            .execute(&ActorId::new("parent"), ChatRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OracleError::Upstream { status: 502 }));
    }
}
