//! Quest and conversation progress tracker.
//!
//! Owns the [`CivicProgress`] aggregate for the running session and writes
//! every mutation through to the [`StateStore`]. Store failures are logged
//! and never roll back the in-memory state.

use std::sync::Arc;

use civicsim_domain::{
    Actor, ActorId, CivicProgress, ConversationTurn, DomainError, IssueKey, IssueRegistry,
    OrdinanceOutcome, OutcomeApplication,
};
use civicsim_shared::{
    OrdinanceFormView, QuestCitizenView, QuestIssueView, QuestListView, TranscriptLine,
    TranscriptView,
};

use super::outcome::OutcomeApplier;
use crate::infrastructure::ports::StateStore;
use crate::use_cases::conversation::greeting;

/// Where an interaction with an actor leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionRoute {
    Conversation {
        issue_key: IssueKey,
        actor_id: ActorId,
        /// The citizen was added to the completion set by this interaction.
        newly_completed: bool,
    },
    OrdinanceSubmission {
        issue_key: IssueKey,
        draft: String,
    },
}

pub struct ProgressTracker {
    registry: Arc<IssueRegistry>,
    progress: CivicProgress,
    store: Arc<dyn StateStore>,
}

impl ProgressTracker {
    /// Read the persisted record and overlay it on the fixed issue definitions.
    /// A missing or unreadable record starts a fresh session.
    pub fn load(registry: Arc<IssueRegistry>, store: Arc<dyn StateStore>) -> Self {
        let mut progress = match store.load() {
            Ok(Some(progress)) => {
                tracing::info!("Restored saved progress");
                progress
            }
            Ok(None) => CivicProgress::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load saved progress, starting fresh");
                CivicProgress::new()
            }
        };
        let pruned = progress.overlay(&registry);
        if pruned > 0 {
            tracing::warn!(pruned, "Dropped saved completions for unknown citizens");
        }
        Self {
            registry,
            progress,
            store,
        }
    }

    pub fn progress(&self) -> &CivicProgress {
        &self.progress
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.progress) {
            tracing::warn!(error = %e, "Failed to persist progress");
        }
    }

    fn require_actor(&self, actor_id: &ActorId) -> Result<Actor<'_>, DomainError> {
        self.registry
            .find_actor(actor_id)
            .map(|(_, actor)| actor)
            .ok_or_else(|| DomainError::not_found("Actor", actor_id.as_str()))
    }

    // =========================================================================
    // Interaction routing
    // =========================================================================

    /// Handle a confirmed interaction with `actor_id`.
    ///
    /// Citizens are recorded as heard (once per session) and routed to a
    /// conversation. Councilors route to ordinance submission only when all
    /// four citizens of their issue are recorded.
    pub fn handle_interaction(&mut self, actor_id: &ActorId) -> Result<InteractionRoute, DomainError> {
        let (issue, actor) = self
            .registry
            .find_actor(actor_id)
            .ok_or_else(|| DomainError::not_found("Actor", actor_id.as_str()))?;
        let issue_key = issue.key().clone();

        match actor {
            Actor::Citizen(_) => {
                let newly_completed = self
                    .progress
                    .mark_completed(issue_key.clone(), actor_id.clone())?;
                if newly_completed {
                    tracing::info!(
                        issue = %issue_key,
                        actor_id = %actor_id,
                        heard = self.progress.completed_count(&issue_key),
                        "Citizen heard"
                    );
                    self.persist();
                }
                Ok(InteractionRoute::Conversation {
                    issue_key,
                    actor_id: actor_id.clone(),
                    newly_completed,
                })
            }
            Actor::Councilor(councilor) => {
                let ready = self
                    .progress
                    .completion(&issue_key)
                    .is_some_and(|p| councilor.accepts_ordinance(p));
                if ready {
                    let draft = self.progress.draft(&issue_key).unwrap_or_default().to_string();
                    Ok(InteractionRoute::OrdinanceSubmission { issue_key, draft })
                } else {
                    Ok(InteractionRoute::Conversation {
                        issue_key,
                        actor_id: actor_id.clone(),
                        newly_completed: false,
                    })
                }
            }
        }
    }

    pub fn is_issue_ready(&self, issue_key: &IssueKey) -> bool {
        self.progress
            .completion(issue_key)
            .is_some_and(|p| p.is_complete())
    }

    // =========================================================================
    // Conversations
    // =========================================================================

    /// Append the greeting if the actor's log is empty. Returns `true` when a
    /// greeting was added.
    pub fn open_conversation(&mut self, actor_id: &ActorId) -> Result<bool, DomainError> {
        if self.progress.has_conversation(actor_id) {
            return Ok(false);
        }
        let actor = self.require_actor(actor_id)?;
        let text = greeting(actor, self.progress.happiness(actor_id));
        self.progress
            .append_turn(actor_id.clone(), ConversationTurn::npc(text));
        self.persist();
        Ok(true)
    }

    pub fn append_turn(&mut self, actor_id: &ActorId, turn: ConversationTurn) {
        self.progress.append_turn(actor_id.clone(), turn);
        self.persist();
    }

    /// Empty every transcript and persist. Returns `false` if nothing was cleared.
    pub fn clear_conversations(&mut self) -> bool {
        let cleared = self.progress.clear_conversations();
        self.persist();
        cleared
    }

    // =========================================================================
    // Ordinances
    // =========================================================================

    pub fn save_draft(&mut self, issue_key: &IssueKey, text: &str) {
        self.progress.save_draft(issue_key.clone(), text);
        self.persist();
    }

    pub fn apply_outcome(&mut self, outcome: &OrdinanceOutcome) -> OutcomeApplication {
        let applied = OutcomeApplier::apply(&self.registry, &mut self.progress, outcome);
        if !applied.updated.is_empty() {
            self.persist();
        }
        applied
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Forget all progress and delete the persisted record. Nothing is
    /// written back until the next mutation.
    pub fn reset(&mut self) {
        self.progress.reset();
        self.progress.overlay(&self.registry);
        if let Err(e) = self.store.remove() {
            tracing::warn!(error = %e, "Failed to remove saved progress");
        }
        tracing::info!("Progress reset");
    }

    // =========================================================================
    // Read models
    // =========================================================================

    pub fn quest_list(&self) -> QuestListView {
        let issues = self
            .registry
            .issues()
            .iter()
            .map(|issue| QuestIssueView {
                issue_key: issue.key().to_string(),
                title: issue.title().to_string(),
                zone: issue.zone(),
                citizens: issue
                    .citizens()
                    .iter()
                    .map(|c| QuestCitizenView {
                        actor_id: c.profile.id.to_string(),
                        display_name: c.profile.display_name.clone(),
                        role: c.profile.role.clone(),
                        done: self.progress.is_completed(issue.key(), &c.profile.id),
                        happiness: self.progress.happiness(&c.profile.id),
                    })
                    .collect(),
                ready_for_ordinance: self.is_issue_ready(issue.key()),
            })
            .collect();

        let badges = self
            .progress
            .badges()
            .iter()
            .map(|id| match self.registry.find_actor(id) {
                Some((_, actor)) => actor.profile().display_name.clone(),
                None => id.to_string(),
            })
            .collect();

        QuestListView { issues, badges }
    }

    pub fn transcript(&self, actor_id: &ActorId, awaiting_reply: bool) -> Option<TranscriptView> {
        let (_, actor) = self.registry.find_actor(actor_id)?;
        let lines = self
            .progress
            .conversation(actor_id)
            .map(|log| {
                log.turns()
                    .iter()
                    .map(|t| TranscriptLine {
                        speaker: t.speaker,
                        text: t.text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Some(TranscriptView {
            actor_id: actor_id.to_string(),
            title: actor.display_title(),
            role: actor.profile().role.clone(),
            lines,
            awaiting_reply,
        })
    }

    pub fn ordinance_form(&self, issue_key: &IssueKey) -> Option<OrdinanceFormView> {
        let issue = self.registry.get(issue_key)?;
        Some(OrdinanceFormView {
            issue_key: issue_key.to_string(),
            title: issue.title().to_string(),
            draft: self.progress.draft(issue_key).unwrap_or_default().to_string(),
        })
    }
}
