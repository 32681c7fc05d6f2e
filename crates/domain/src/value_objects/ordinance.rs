//! Judged ordinance outcome.
//!
//! This is the structured verdict the dialogue oracle returns for a submitted
//! ordinance. It is deliberately lenient on input (scores may arrive as
//! strings, optional fields may be missing) because the upstream is a text
//! generator.

use serde::{Deserialize, Deserializer, Serialize};

use super::happiness::HappinessState;
use crate::ids::ActorId;

/// Maximum score the judge can award.
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdinanceStatus {
    Success,
    Failure,
    PartialSuccess,
    Error,
}

impl OrdinanceStatus {
    /// The ordinance was (at least partly) enacted.
    pub fn is_enacted(&self) -> bool {
        matches!(self, OrdinanceStatus::Success | OrdinanceStatus::PartialSuccess)
    }
}

/// Resulting mood of a citizen after the ordinance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeState {
    Happy,
    Sad,
}

impl From<OutcomeState> for HappinessState {
    fn from(state: OutcomeState) -> Self {
        match state {
            OutcomeState::Happy => HappinessState::Happy,
            OutcomeState::Sad => HappinessState::Sad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenOutcome {
    pub id: ActorId,
    pub state: OutcomeState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinanceOutcome {
    pub status: OrdinanceStatus,
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<u8>,
    #[serde(default)]
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizen_outcomes: Option<Vec<CitizenOutcome>>,
}

impl OrdinanceOutcome {
    /// Synthetic error result used whenever a real verdict is unavailable.
    pub fn error(feedback: impl Into<String>) -> Self {
        Self {
            status: OrdinanceStatus::Error,
            score: None,
            feedback: feedback.into(),
            mission: None,
            citizen_outcomes: None,
        }
    }

    pub fn outcomes(&self) -> &[CitizenOutcome] {
        self.citizen_outcomes.as_deref().unwrap_or(&[])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts integers, floats and numeric strings; clamps into `0..=100`.
/// Non-numeric strings become `None`.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScore>::deserialize(deserializer)?;
    let value = match raw {
        None => return Ok(None),
        Some(RawScore::Int(n)) => n,
        Some(RawScore::Float(f)) if f.is_finite() => f.trunc() as i64,
        Some(RawScore::Float(_)) => return Ok(None),
        Some(RawScore::Text(s)) => match leading_integer(&s) {
            Some(n) => n,
            None => return Ok(None),
        },
    };
    Ok(Some(value.clamp(0, i64::from(MAX_SCORE)) as u8))
}

/// Parse the leading integer of a string (`"85pts"` → 85), like a lenient
/// `parseInt`.
fn leading_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
