//! NPC happiness state.
//!
//! Starts neutral for everyone and only changes when a judged ordinance
//! reports an outcome for the actor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HappinessState {
    #[default]
    Neutral,
    Happy,
    Sad,
}

impl HappinessState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HappinessState::Neutral => "neutral",
            HappinessState::Happy => "happy",
            HappinessState::Sad => "sad",
        }
    }
}

impl fmt::Display for HappinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HappinessState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(HappinessState::Neutral),
            "happy" => Ok(HappinessState::Happy),
            "sad" => Ok(HappinessState::Sad),
            _ => Err(DomainError::parse(format!("Unknown happiness state: {}", s))),
        }
    }
}
