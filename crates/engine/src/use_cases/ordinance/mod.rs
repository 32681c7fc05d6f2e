//! Ordinance submission: judge context and the judge call.

use std::sync::Arc;

use civicsim_domain::{Issue, IssueKey, OrdinanceOutcome};

use crate::infrastructure::ports::{DialogueOraclePort, OracleError};

/// Feedback shown when the judge could not be reached at all.
pub const JUDGE_UNAVAILABLE_FEEDBACK: &str =
    "Failed to fetch the council's evaluation. Please try again later.";

/// Describe the issue, every citizen's concern and the proposal for the judge.
pub fn build_issue_context(issue: &Issue, proposal: &str) -> String {
    let concerns = issue
        .citizens()
        .iter()
        .map(|c| {
            format!(
                "{}({}): {}",
                c.profile.display_name, c.profile.role, c.profile.persona
            )
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "Issue: {}. Citizens' concerns: {}. Student's proposal: {}",
        issue.title(),
        concerns,
        proposal
    )
}

/// Send a proposal to the judge.
///
/// An unparseable verdict already arrives as an error outcome from the port;
/// only transport and status failures are `Err`.
pub struct JudgeOrdinance {
    oracle: Arc<dyn DialogueOraclePort>,
}

impl JudgeOrdinance {
    pub fn new(oracle: Arc<dyn DialogueOraclePort>) -> Self {
        Self { oracle }
    }

    pub async fn execute(
        &self,
        issue_key: &IssueKey,
        issue_context: String,
    ) -> Result<OrdinanceOutcome, OracleError> {
        match self.oracle.judge(issue_context).await {
            Ok(outcome) => {
                tracing::info!(
                    issue = %issue_key,
                    status = ?outcome.status,
                    score = ?outcome.score,
                    outcomes = outcome.outcomes().len(),
                    "Ordinance judged"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(issue = %issue_key, error = %e, "Ordinance judge failed");
                Err(e)
            }
        }
    }
}

/// Container for ordinance use cases.
pub struct OrdinanceUseCases {
    pub judge: Arc<JudgeOrdinance>,
}

impl OrdinanceUseCases {
    pub fn new(judge: Arc<JudgeOrdinance>) -> Self {
        Self { judge }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockDialogueOraclePort;
    use civicsim_domain::OrdinanceStatus;

    #[test]
    fn context_lists_every_citizen() {
        let registry = crate::world::city_issues().unwrap();
        let issue = registry.get(&IssueKey::new("scooter")).unwrap();
        let ctx = build_issue_context(issue, "Designated parking zones.");

        assert!(ctx.starts_with("Issue: Shared E-Scooter Conflict (North). Citizens' concerns: Kim Minjun("));
        assert!(ctx.ends_with(". Student's proposal: Designated parking zones."));
        assert_eq!(ctx.matches("; ").count(), 3);
    }

    #[tokio::test]
    async fn forwards_context_to_the_judge() {
        let mut oracle = MockDialogueOraclePort::new();
        oracle
            .expect_judge()
            .withf(|ctx| ctx == "ctx")
            .times(1)
            .returning(|_| Ok(OrdinanceOutcome::error("bad json")));

        let judge = JudgeOrdinance::new(Arc::new(oracle));
        let outcome = judge.execute(&IssueKey::new("pet"), "ctx".into()).await.unwrap();
        assert_eq!(outcome.status, OrdinanceStatus::Error);
    }
}
