//! Applies a judged ordinance to the progress aggregate.

use civicsim_domain::{CitizenOutcome, CivicProgress, IssueRegistry, OrdinanceOutcome, OutcomeApplication};

pub struct OutcomeApplier;

impl OutcomeApplier {
    /// Apply the verdict's citizen outcomes in order.
    ///
    /// Entries naming an unknown actor are dropped before anything is
    /// written, so they can neither change happiness nor claim the badge.
    pub fn apply(
        registry: &IssueRegistry,
        progress: &mut CivicProgress,
        outcome: &OrdinanceOutcome,
    ) -> OutcomeApplication {
        let known: Vec<CitizenOutcome> = outcome
            .outcomes()
            .iter()
            .filter(|entry| {
                let found = registry.find_actor(&entry.id).is_some();
                if !found {
                    tracing::debug!(actor_id = %entry.id, "Ignoring outcome for unknown actor");
                }
                found
            })
            .cloned()
            .collect();

        progress.apply_outcomes(&known)
    }
}
