//! Correlation IDs tying an oracle request to its log lines on both sides of
//! the wire.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header carrying the correlation id from the oracle client to the proxy.
pub const CORRELATION_HEADER: &str = "x-correlation-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an incoming header value; anything malformed gets a fresh id.
    pub fn from_header(value: Option<&str>) -> Self {
        value
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map(Self)
            .unwrap_or_default()
    }

    /// First 8 hex characters, for log fields.
    pub fn short(&self) -> String {
        let mut buf = Uuid::encode_buffer();
        self.0.simple().encode_lower(&mut buf)[..8].to_string()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_is_eight_chars() {
        assert_eq!(CorrelationId::new().short().len(), 8);
    }

    #[test]
    fn header_round_trip() {
        let id = CorrelationId::new();
        let parsed = CorrelationId::from_header(Some(&id.to_string()));
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_header_yields_fresh_id() {
        let a = CorrelationId::from_header(Some("not-a-uuid"));
        let b = CorrelationId::from_header(None);
        assert_ne!(a, b);
    }
}
