//! Per-issue quest progress and the badge set.
//!
//! Both are insertion-ordered sets. The persisted form is a plain list, and
//! insertion order is the canonical order, so a save/load round trip always
//! reproduces the same list. Loading a completion list is lenient: duplicates
//! are dropped and only the first [`CITIZENS_PER_ISSUE`] ids are kept.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ActorId;

/// Number of citizens attached to every issue.
pub const CITIZENS_PER_ISSUE: usize = 4;

/// Completed citizens for one issue. Never exceeds [`CITIZENS_PER_ISSUE`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ActorId>", into = "Vec<ActorId>")]
pub struct QuestProgress {
    completed: Vec<ActorId>,
}

impl QuestProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a citizen as completed.
    ///
    /// Returns `Ok(true)` when the citizen was newly added, `Ok(false)` when it
    /// was already present.
    pub fn mark_completed(&mut self, citizen: ActorId) -> Result<bool, DomainError> {
        if self.completed.contains(&citizen) {
            return Ok(false);
        }
        if self.completed.len() >= CITIZENS_PER_ISSUE {
            return Err(DomainError::capacity_exceeded(
                self.completed.len(),
                CITIZENS_PER_ISSUE,
            ));
        }
        self.completed.push(citizen);
        Ok(true)
    }

    pub fn contains(&self, citizen: &ActorId) -> bool {
        self.completed.contains(citizen)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// All citizens of the issue have been heard.
    pub fn is_complete(&self) -> bool {
        self.completed.len() == CITIZENS_PER_ISSUE
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorId> {
        self.completed.iter()
    }

    /// Keep only the citizens matching `keep`. Returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&ActorId) -> bool) -> usize {
        let before = self.completed.len();
        self.completed.retain(|id| keep(id));
        before - self.completed.len()
    }
}

impl From<Vec<ActorId>> for QuestProgress {
    fn from(ids: Vec<ActorId>) -> Self {
        let mut completed = Vec::with_capacity(CITIZENS_PER_ISSUE);
        for id in ids {
            if completed.len() == CITIZENS_PER_ISSUE {
                break;
            }
            if !completed.contains(&id) {
                completed.push(id);
            }
        }
        Self { completed }
    }
}

impl From<QuestProgress> for Vec<ActorId> {
    fn from(progress: QuestProgress) -> Self {
        progress.completed
    }
}

/// Actors that earned a badge, in award order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeSet {
    holders: Vec<ActorId>,
}

impl BadgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award a badge. Returns `false` if the actor already holds one.
    pub fn award(&mut self, actor: ActorId) -> bool {
        if self.holders.contains(&actor) {
            return false;
        }
        self.holders.push(actor);
        true
    }

    pub fn contains(&self, actor: &ActorId) -> bool {
        self.holders.contains(actor)
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorId> {
        self.holders.iter()
    }
}
