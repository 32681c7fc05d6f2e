//! Read models for the presentation surface
//!
//! The simulation produces these; a renderer (or the headless driver) only
//! consumes them. IDs are plain strings so the types stay renderer-agnostic.

use civicsim_domain::{HappinessState, OrdinanceOutcome, OrdinanceStatus, Speaker, Zone};
use serde::{Deserialize, Serialize};

/// Side length of the minimap in map units.
pub const MAP_SIZE: f32 = 200.0;

// =============================================================================
// Per-frame snapshot
// =============================================================================

/// Minimap coordinate. World origin maps to the map centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

impl MapPoint {
    /// Project a ground position onto the minimap: `(w / size) * MAP_SIZE + MAP_SIZE / 2`.
    pub fn project(world_x: f32, world_z: f32, world_size: f32) -> Self {
        let scale = if world_size > 0.0 { MAP_SIZE / world_size } else { 0.0 };
        Self {
            x: world_x * scale + MAP_SIZE / 2.0,
            y: world_z * scale + MAP_SIZE / 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    pub actor_id: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionTargetView {
    pub issue_key: String,
    pub actor_id: String,
    pub display_name: String,
    pub role: String,
}

/// Confirmation prompt shown while a zone transition is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonePromptView {
    pub zone: Zone,
    pub title: String,
    pub body: String,
}

impl ZonePromptView {
    pub fn new(zone: Zone, issue_title: Option<&str>) -> Self {
        let name = issue_title.unwrap_or(zone.as_str());
        Self {
            zone,
            title: format!("Move to {}", name),
            body: format!("Do you want to enter the {} issue zone?", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub tick: u64,
    pub player: MapPoint,
    pub interaction_prompt_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactable: Option<InteractionTargetView>,
    pub markers: Vec<MarkerView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_prompt: Option<ZonePromptView>,
}

// =============================================================================
// Quest list
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCitizenView {
    pub actor_id: String,
    pub display_name: String,
    pub role: String,
    pub done: bool,
    pub happiness: HappinessState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestIssueView {
    pub issue_key: String,
    pub title: String,
    pub zone: Zone,
    pub citizens: Vec<QuestCitizenView>,
    pub ready_for_ordinance: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestListView {
    pub issues: Vec<QuestIssueView>,
    pub badges: Vec<String>,
}

// =============================================================================
// Conversation and ordinance
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptView {
    pub actor_id: String,
    pub title: String,
    pub role: String,
    pub lines: Vec<TranscriptLine>,
    /// A reply is outstanding; input should be disabled.
    pub awaiting_reply: bool,
}

/// Ordinance form pre-filled with the saved draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdinanceFormView {
    pub issue_key: String,
    pub title: String,
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdinanceResultView {
    pub issue_key: String,
    pub status: OrdinanceStatus,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
}

impl OrdinanceResultView {
    pub fn from_outcome(issue_key: impl Into<String>, outcome: &OrdinanceOutcome) -> Self {
        let headline = match outcome.status {
            OrdinanceStatus::Success => "[Mission complete!] The ordinance has been enacted!",
            OrdinanceStatus::PartialSuccess => "[Partial success!] The ordinance has been enacted!",
            OrdinanceStatus::Failure => "[New mission!] The ordinance needs more work.",
            OrdinanceStatus::Error => "Something went wrong",
        };
        Self {
            issue_key: issue_key.into(),
            status: outcome.status,
            headline: headline.to_string(),
            score: outcome.score,
            feedback: outcome.feedback.clone(),
            mission: outcome.mission.clone().filter(|m| !m.trim().is_empty()),
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// One-shot events for toasts and log lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    ChatReplied { actor_id: String },
    ChatFailed { actor_id: String, message: String },
    QuestReady { issue_key: String },
    OrdinanceJudged { issue_key: String, status: OrdinanceStatus },
    BadgeAwarded { actor_id: String, message: String },
    ConversationsCleared,
    ProgressReset,
}
