//! External service port traits (dialogue oracle, upstream text generator).

use async_trait::async_trait;
use civicsim_domain::OrdinanceOutcome;
use civicsim_shared::{ChatRequest, ChatTurnDto};

use super::error::{LlmError, OracleError};

// =============================================================================
// Dialogue Oracle
// =============================================================================

/// The service that produces NPC replies and judges ordinances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogueOraclePort: Send + Sync {
    /// Next NPC line for the given history.
    async fn chat(&self, request: ChatRequest) -> Result<String, OracleError>;

    /// Judge a proposal. A reply that is not valid structured data comes back
    /// as `Ok` with an error outcome, never as `Err`.
    async fn judge(&self, issue_context: String) -> Result<OrdinanceOutcome, OracleError>;
}

// =============================================================================
// Upstream Text Generator
// =============================================================================

/// Request for the upstream generator behind the oracle proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    /// Conversation so far, oldest first
    pub contents: Vec<ChatTurnDto>,
    /// System instruction
    pub system_instruction: String,
}

impl LlmRequest {
    pub fn new(contents: Vec<ChatTurnDto>) -> Self {
        Self {
            contents,
            system_instruction: String::new(),
        }
    }

    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = text.into();
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    /// Generate text. Returns the first candidate's text, possibly empty.
    async fn generate(&self, request: LlmRequest) -> Result<String, LlmError>;
}
