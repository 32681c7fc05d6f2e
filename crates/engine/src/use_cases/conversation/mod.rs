//! Conversation use cases.

mod greeting;
mod request_reply;

pub use greeting::{
    build_chat_request, greeting, system_text, COUNCILOR_INVITATION, FALLBACK_REPLY,
    THANKFUL_GREETING, UNRESOLVED_PREFIX,
};
pub use request_reply::RequestReply;

use std::sync::Arc;

/// Container for conversation use cases.
pub struct ConversationUseCases {
    pub request_reply: Arc<RequestReply>,
}

impl ConversationUseCases {
    pub fn new(request_reply: Arc<RequestReply>) -> Self {
        Self { request_reply }
    }
}
