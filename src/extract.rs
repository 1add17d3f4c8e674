//! Defensive decoding of model replies into typed records.
//!
//! Models asked for "ONLY valid JSON" still like to wrap it in a markdown
//! fence, with or without a language tag. The decoder tolerates exactly
//! that noise and nothing more; anything else is a parse failure that
//! aborts the owning stage.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::AuditError;
use crate::pipeline::TextGenerator;
use crate::util::truncate_chars;

/// Longest slice of a malformed reply kept for diagnostics.
const EXCERPT_LIMIT: usize = 500;

/// Send `prompt` to the generator and decode the reply as a `T` record.
/// No retry: one failed extraction is final.
pub async fn extract_record<T, G>(llm: &G, prompt: &str) -> Result<T, AuditError>
where
    T: DeserializeOwned,
    G: TextGenerator,
{
    let raw = llm.generate(prompt).await?;
    decode_reply(&raw)
}

/// Decode a model reply, tolerating a surrounding code fence.
pub fn decode_reply<T: DeserializeOwned>(raw: &str) -> Result<T, AuditError> {
    serde_json::from_str(strip_fences(raw)).map_err(|e| AuditError::Parse {
        reason: e.to_string(),
        excerpt: truncate_chars(raw.trim(), EXCERPT_LIMIT).to_string(),
    })
}

/// Log an extraction failure with enough context to diagnose it.
pub fn log_failure(stage: &str, err: &AuditError) {
    match err {
        AuditError::Parse { reason, excerpt } => {
            warn!("{} extraction failed: {}; raw reply: {:?}", stage, reason, excerpt)
        }
        other => warn!("{} failed: {}", stage, other),
    }
}

/// Strip one optional ``` fence (with or without a language tag) around `raw`.
fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let body = match rest.find("```") {
        Some(end) => &rest[..end],
        None => rest,
    };
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::PageAudit;

    const PAYLOAD: &str = r#"{"title_tag": "Example", "primary_keyword": "example topic"}"#;

    #[test]
    fn bare_payload_decodes() {
        let audit: PageAudit = decode_reply(PAYLOAD).unwrap();
        assert_eq!(audit.title_tag, "Example");
    }

    #[test]
    fn fenced_payload_matches_bare_payload() {
        let bare: PageAudit = decode_reply(PAYLOAD).unwrap();
        let fenced: PageAudit =
            decode_reply(&format!("```json\n{}\n```", PAYLOAD)).unwrap();
        let untagged: PageAudit = decode_reply(&format!("```\n{}\n```", PAYLOAD)).unwrap();
        assert_eq!(bare.title_tag, fenced.title_tag);
        assert_eq!(bare.primary_keyword, fenced.primary_keyword);
        assert_eq!(bare.title_tag, untagged.title_tag);
    }

    #[test]
    fn unterminated_fence_still_decodes() {
        let audit: PageAudit = decode_reply(&format!("```json\n{}", PAYLOAD)).unwrap();
        assert_eq!(audit.primary_keyword, "example topic");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let audit: PageAudit =
            decode_reply(&format!("\n\n  ```json\n{}\n```  \n", PAYLOAD)).unwrap();
        assert_eq!(audit.title_tag, "Example");
    }

    #[test]
    fn garbage_reports_parse_error_with_excerpt() {
        let err = decode_reply::<PageAudit>("Sorry, I cannot help with that.").unwrap_err();
        match err {
            AuditError::Parse { excerpt, .. } => {
                assert!(excerpt.contains("Sorry"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn long_garbage_excerpt_is_bounded() {
        let garbage = "x".repeat(10_000);
        let err = decode_reply::<PageAudit>(&garbage).unwrap_err();
        match err {
            AuditError::Parse { excerpt, .. } => assert_eq!(excerpt.chars().count(), 500),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
