//! Parsing of judge output into an [`OrdinanceOutcome`].
//!
//! The judge is a text generator, so its reply is often wrapped in a Markdown
//! code fence and the score may come back as a string. Parsing never panics;
//! callers that cannot surface an error use [`judgment_or_error`].

use std::sync::LazyLock;

use civicsim_domain::OrdinanceOutcome;
use regex_lite::Regex;
use thiserror::Error;

/// Feedback used when the judge reply is not valid structured data.
pub const PARSE_FAILURE_FEEDBACK: &str = "Could not read the council's evaluation (invalid JSON).";

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json|JSON)?").expect("valid regex"));

#[derive(Debug, Error)]
pub enum JudgmentParseError {
    #[error("judge reply is empty")]
    Empty,
    #[error("judge reply is not a valid outcome: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Remove Markdown code fences and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw.trim(), "").trim().to_string()
}

/// Parse a judge reply into an outcome.
pub fn parse_judgment(raw: &str) -> Result<OrdinanceOutcome, JudgmentParseError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(JudgmentParseError::Empty);
    }
    Ok(serde_json::from_str(&cleaned)?)
}

/// Like [`parse_judgment`], but substitutes a synthetic error outcome.
pub fn judgment_or_error(raw: &str) -> OrdinanceOutcome {
    match parse_judgment(raw) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(error = %e, "Judge reply could not be parsed");
            OrdinanceOutcome::error(PARSE_FAILURE_FEEDBACK)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civicsim_domain::OrdinanceStatus;

    #[test]
    fn strips_json_fences() {
        let raw = "```json\n{\"status\":\"success\",\"score\":90,\"feedback\":\"ok\"}\n```";
        let outcome = parse_judgment(raw).unwrap();
        assert_eq!(outcome.status, OrdinanceStatus::Success);
        assert_eq!(outcome.score, Some(90));
    }

    #[test]
    fn plain_json_parses() {
        let outcome = parse_judgment(r#"{"status":"failure","score":"40","feedback":"no"}"#).unwrap();
        assert_eq!(outcome.score, Some(40));
    }

    #[test]
    fn garbage_becomes_error_outcome() {
        let outcome = judgment_or_error("The council is thinking...");
        assert_eq!(outcome.status, OrdinanceStatus::Error);
        assert!(!outcome.feedback.is_empty());
    }

    #[test]
    fn empty_reply_is_an_error() {
        assert!(matches!(parse_judgment("  ``` ```  "), Err(JudgmentParseError::Empty)));
    }
}
