//! CivicSim Shared - contracts between the simulation, the oracle proxy and
//! any presentation surface
//!
//! - Oracle wire DTOs (`/api/chat`, `/api/judge`)
//! - Judge reply parsing into domain outcomes
//! - Read models for rendering (frame snapshot, quest list, transcripts)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, regex-lite, thiserror, tracing
//! 2. **No business logic** - pure data types, serialization and parsing
//! 3. **No domain IDs in DTOs** - identifiers travel as plain strings

pub mod judgment;
pub mod oracle;
pub mod presentation;

pub use judgment::{
    judgment_or_error, parse_judgment, strip_code_fences, JudgmentParseError,
    PARSE_FAILURE_FEEDBACK,
};
pub use oracle::{ChatRequest, ChatResponse, ChatRole, ChatTurnDto, ErrorBody, JudgeRequest};
pub use presentation::{
    FrameSnapshot, InteractionTargetView, MapPoint, MarkerView, Notification, OrdinanceFormView,
    OrdinanceResultView, QuestCitizenView, QuestIssueView, QuestListView, TranscriptLine,
    TranscriptView, ZonePromptView, MAP_SIZE,
};
