//! Opening lines and system text for NPC conversations.

use civicsim_domain::{Actor, ConversationLog, HappinessState, Speaker};
use civicsim_shared::{ChatRequest, ChatTurnDto};

pub const THANKFUL_GREETING: &str = "Hello! Thanks to you, my problem is finally solved. Thank you so much!";

pub const UNRESOLVED_PREFIX: &str = "My problem still hasn't been resolved...";

pub const COUNCILOR_INVITATION: &str = "Please submit an ordinance that can solve the problem.";

/// Shown in place of a reply when the oracle cannot be reached. Never persisted.
pub const FALLBACK_REPLY: &str = "Sorry, I can't talk right now. Please try again in a moment.";

const REPLY_RULES: &str = "Rules: (1) At most two sentences. (2) Lead with the key point. \
(3) If needed, end with one very short question. (4) Do not repeat yourself. \
(5) Never mention being an AI and do not over-apologize. (6) Do not force solutions on the student.";

/// First NPC line of an empty conversation.
pub fn greeting(actor: Actor<'_>, happiness: HappinessState) -> String {
    let request = &actor.profile().initial_request;
    if actor.is_councilor() {
        return format!("{}\n{}", request, COUNCILOR_INVITATION);
    }
    match happiness {
        HappinessState::Neutral => request.clone(),
        HappinessState::Happy => THANKFUL_GREETING.to_string(),
        HappinessState::Sad => format!("{} {}", UNRESOLVED_PREFIX, request),
    }
}

fn mood_line(happiness: HappinessState) -> &'static str {
    match happiness {
        HappinessState::Happy => " Your personal problem has mostly been solved and you feel relieved.",
        HappinessState::Sad => " Your personal problem is still unsolved and you feel frustrated.",
        HappinessState::Neutral => " You are in an ordinary mood.",
    }
}

pub fn system_text(actor: Actor<'_>, happiness: HappinessState) -> String {
    let profile = actor.profile();
    let voice = format!(
        "Voice: speak naturally and politely, the way a real {} would. Avoid long generalities.",
        profile.role.to_lowercase()
    );
    format!("{}{}\n{}\n{}", profile.persona, mood_line(happiness), voice, REPLY_RULES)
}

/// Map a transcript onto the oracle's chat history (player → user, npc → model).
pub fn build_chat_request(actor: Actor<'_>, happiness: HappinessState, log: &ConversationLog) -> ChatRequest {
    let history = log
        .turns()
        .iter()
        .map(|turn| match turn.speaker {
            Speaker::Player => ChatTurnDto::user(turn.text.clone()),
            Speaker::Npc => ChatTurnDto::model(turn.text.clone()),
        })
        .collect();
    ChatRequest {
        history,
        system_text: system_text(actor, happiness),
    }
}
