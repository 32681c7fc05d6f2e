//! Civic issues and the registry that holds them.
//!
//! An issue belongs to exactly one zone and groups one councilor with four
//! citizens. The registry is built once at startup; its declaration order is
//! the order used for interaction selection and for the quest list.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, Citizen, Councilor};
use crate::error::DomainError;
use crate::ids::{ActorId, IssueKey};
use crate::value_objects::{Zone, CITIZENS_PER_ISSUE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    key: IssueKey,
    zone: Zone,
    title: String,
    councilor: Councilor,
    citizens: Vec<Citizen>,
}

impl Issue {
    /// Build an issue. Exactly [`CITIZENS_PER_ISSUE`] citizens are required.
    pub fn new(
        key: impl Into<IssueKey>,
        zone: Zone,
        title: impl Into<String>,
        councilor: Councilor,
        citizens: Vec<Citizen>,
    ) -> Result<Self, DomainError> {
        let key = key.into();
        if citizens.len() != CITIZENS_PER_ISSUE {
            return Err(DomainError::validation(format!(
                "issue {} needs {} citizens, got {}",
                key,
                CITIZENS_PER_ISSUE,
                citizens.len()
            )));
        }
        Ok(Self {
            key,
            zone,
            title: title.into(),
            councilor,
            citizens,
        })
    }

    pub fn key(&self) -> &IssueKey {
        &self.key
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn councilor(&self) -> &Councilor {
        &self.councilor
    }

    pub fn citizens(&self) -> &[Citizen] {
        &self.citizens
    }

    /// Citizens in declaration order, then the councilor.
    pub fn actors(&self) -> impl Iterator<Item = Actor<'_>> {
        self.citizens
            .iter()
            .map(Actor::Citizen)
            .chain(std::iter::once(Actor::Councilor(&self.councilor)))
    }

    pub fn actor(&self, id: &ActorId) -> Option<Actor<'_>> {
        self.actors().find(|a| a.id() == id)
    }

    pub fn has_citizen(&self, id: &ActorId) -> bool {
        self.citizens.iter().any(|c| &c.profile.id == id)
    }
}

/// Ordered, immutable set of issues.
#[derive(Debug, Clone, Default)]
pub struct IssueRegistry {
    issues: Vec<Issue>,
}

impl IssueRegistry {
    /// Rejects duplicate issue keys and actor ids shared between issues.
    pub fn new(issues: Vec<Issue>) -> Result<Self, DomainError> {
        let mut seen_keys: Vec<&IssueKey> = Vec::new();
        let mut seen_actors: Vec<&ActorId> = Vec::new();
        for issue in &issues {
            if seen_keys.contains(&issue.key()) {
                return Err(DomainError::validation(format!("duplicate issue key: {}", issue.key())));
            }
            seen_keys.push(issue.key());
            for actor in issue.actors() {
                if seen_actors.contains(&actor.id()) {
                    return Err(DomainError::validation(format!("duplicate actor id: {}", actor.id())));
                }
                seen_actors.push(actor.id());
            }
        }
        Ok(Self { issues })
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn get(&self, key: &IssueKey) -> Option<&Issue> {
        self.issues.iter().find(|i| i.key() == key)
    }

    pub fn require(&self, key: &IssueKey) -> Result<&Issue, DomainError> {
        self.get(key)
            .ok_or_else(|| DomainError::not_found("Issue", key.as_str()))
    }

    pub fn by_zone(&self, zone: Zone) -> Option<&Issue> {
        self.issues.iter().find(|i| i.zone() == zone)
    }

    /// Every actor in selection order, paired with its issue.
    pub fn actors(&self) -> impl Iterator<Item = (&Issue, Actor<'_>)> {
        self.issues
            .iter()
            .flat_map(|issue| issue.actors().map(move |a| (issue, a)))
    }

    pub fn find_actor(&self, id: &ActorId) -> Option<(&Issue, Actor<'_>)> {
        self.actors().find(|(_, a)| a.id() == id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &IssueKey> {
        self.issues.iter().map(Issue::key)
    }
}
