//! CivicProgress aggregate - everything the player has achieved so far
//!
//! This is the single persisted record. It overlays the immutable issue and
//! actor definitions with mutable per-session state: happiness, transcripts,
//! completion sets, ordinance drafts and badges.
//!
//! # Invariants
//!
//! - A completion set never exceeds four members and only grows, except
//!   through [`CivicProgress::reset`].
//! - Conversation logs are append-only, except through
//!   [`CivicProgress::clear_conversations`] and [`CivicProgress::reset`].
//! - Every mutation returns enough information for the caller to decide
//!   whether a write-through to the state store is needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::IssueRegistry;
use crate::error::DomainError;
use crate::ids::{ActorId, IssueKey};
use crate::value_objects::{
    BadgeSet, CitizenOutcome, ConversationLog, ConversationTurn, HappinessState, OutcomeState,
    QuestProgress,
};

/// Result of applying a list of citizen outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutcomeApplication {
    /// Actors whose happiness was written, in list order.
    pub updated: Vec<ActorId>,
    /// Actor that received a new badge, if any.
    pub badge_awarded: Option<ActorId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CivicProgress {
    #[serde(default)]
    happiness_states: BTreeMap<ActorId, HappinessState>,
    #[serde(default)]
    conversation_logs: BTreeMap<ActorId, ConversationLog>,
    #[serde(default)]
    completion_sets: BTreeMap<IssueKey, QuestProgress>,
    #[serde(default)]
    ordinance_drafts: BTreeMap<IssueKey, String>,
    #[serde(default)]
    badge_list: BadgeSet,
}

impl CivicProgress {
    // =========================================================================
    // Construction
    // =========================================================================

    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure every registered issue has a completion set, and drop
    /// completion entries for citizens that no longer belong to their issue.
    /// Returns the number of entries dropped.
    pub fn overlay(&mut self, registry: &IssueRegistry) -> usize {
        registry
            .issues()
            .iter()
            .map(|issue| {
                self.completion_sets
                    .entry(issue.key().clone())
                    .or_default()
                    .retain(|id| issue.has_citizen(id))
            })
            .sum()
    }

    // =========================================================================
    // Happiness
    // =========================================================================

    /// Neutral unless an ordinance outcome said otherwise.
    pub fn happiness(&self, actor: &ActorId) -> HappinessState {
        self.happiness_states.get(actor).copied().unwrap_or_default()
    }

    pub fn set_happiness(&mut self, actor: ActorId, state: HappinessState) {
        self.happiness_states.insert(actor, state);
    }

    /// Apply judged outcomes in order.
    ///
    /// Only the first `happy` entry is considered for a badge, and only if that
    /// actor does not hold one yet.
    pub fn apply_outcomes(&mut self, outcomes: &[CitizenOutcome]) -> OutcomeApplication {
        let mut result = OutcomeApplication::default();
        for outcome in outcomes {
            self.set_happiness(outcome.id.clone(), outcome.state.into());
            result.updated.push(outcome.id.clone());
        }
        if let Some(first_happy) = outcomes.iter().find(|o| o.state == OutcomeState::Happy) {
            if self.badge_list.award(first_happy.id.clone()) {
                result.badge_awarded = Some(first_happy.id.clone());
            }
        }
        result
    }

    // =========================================================================
    // Conversations
    // =========================================================================

    pub fn conversation(&self, actor: &ActorId) -> Option<&ConversationLog> {
        self.conversation_logs.get(actor)
    }

    pub fn has_conversation(&self, actor: &ActorId) -> bool {
        self.conversation(actor).is_some_and(|log| !log.is_empty())
    }

    pub fn append_turn(&mut self, actor: ActorId, turn: ConversationTurn) {
        self.conversation_logs.entry(actor).or_default().append(turn);
    }

    /// Empty every transcript. Returns `false` if there was nothing to clear.
    pub fn clear_conversations(&mut self) -> bool {
        let had_any = !self.conversation_logs.is_empty();
        self.conversation_logs.clear();
        had_any
    }

    // =========================================================================
    // Quest progress
    // =========================================================================

    pub fn completion(&self, issue: &IssueKey) -> Option<&QuestProgress> {
        self.completion_sets.get(issue)
    }

    pub fn completed_count(&self, issue: &IssueKey) -> usize {
        self.completion(issue).map_or(0, QuestProgress::len)
    }

    pub fn is_completed(&self, issue: &IssueKey, citizen: &ActorId) -> bool {
        self.completion(issue).is_some_and(|p| p.contains(citizen))
    }

    /// Returns `Ok(true)` when the citizen was newly recorded.
    pub fn mark_completed(&mut self, issue: IssueKey, citizen: ActorId) -> Result<bool, DomainError> {
        self.completion_sets.entry(issue).or_default().mark_completed(citizen)
    }

    // =========================================================================
    // Drafts and badges
    // =========================================================================

    pub fn draft(&self, issue: &IssueKey) -> Option<&str> {
        self.ordinance_drafts.get(issue).map(String::as_str)
    }

    pub fn save_draft(&mut self, issue: IssueKey, text: impl Into<String>) {
        self.ordinance_drafts.insert(issue, text.into());
    }

    pub fn badges(&self) -> &BadgeSet {
        &self.badge_list
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Forget everything. Callers re-overlay the registry afterwards.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
