//! Oracle proxy use cases: forward chat turns and evaluate ordinances with
//! the upstream text generator.

use std::sync::Arc;

use civicsim_domain::OrdinanceOutcome;
use civicsim_shared::{judgment_or_error, ChatRequest, ChatResponse, ChatTurnDto, JudgeRequest};

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest};

pub const JUDGE_SYSTEM_PROMPT: &str = "You are an AI city councilor. Evaluate a student's proposed \
ordinance based on the context. Your response MUST be a single valid JSON object. The JSON should \
have: `status` ('success', 'failure', or 'partial_success'), `score` (0-100 integer total score), \
`feedback` (detailed evaluation, at most 10 sentences), `mission` (if not full success), and \
`citizen_outcomes` (an array of objects, each with citizen `id` and resulting `state`: 'happy' or 'sad').";

fn judge_user_text(issue_context: &str) -> String {
    format!(
        "Context:\n{}\nOutput only JSON matching the schema above.",
        issue_context
    )
}

/// Forward a chat history to the upstream generator.
pub struct ForwardChat {
    llm: Arc<dyn LlmPort>,
}

impl ForwardChat {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    pub async fn execute(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let llm_request =
            LlmRequest::new(request.history).with_system_instruction(request.system_text);
        let text = self.llm.generate(llm_request).await?;
        Ok(ChatResponse { text })
    }
}

/// Ask the upstream generator for a verdict and parse it.
///
/// A reply that does not parse is a successful evaluation with
/// `status: error`; only upstream failures are `Err`.
pub struct EvaluateOrdinance {
    llm: Arc<dyn LlmPort>,
}

impl EvaluateOrdinance {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    pub async fn execute(&self, request: JudgeRequest) -> Result<OrdinanceOutcome, LlmError> {
        let llm_request = LlmRequest::new(vec![ChatTurnDto::user(judge_user_text(
            &request.issue_context,
        ))])
        .with_system_instruction(JUDGE_SYSTEM_PROMPT);
        let raw = self.llm.generate(llm_request).await?;
        Ok(judgment_or_error(&raw))
    }
}

/// Container for oracle proxy use cases.
pub struct OracleUseCases {
    pub forward_chat: Arc<ForwardChat>,
    pub evaluate_ordinance: Arc<EvaluateOrdinance>,
}

impl OracleUseCases {
    pub fn new(forward_chat: Arc<ForwardChat>, evaluate_ordinance: Arc<EvaluateOrdinance>) -> Self {
        Self {
            forward_chat,
            evaluate_ordinance,
        }
    }
}
