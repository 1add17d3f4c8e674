use thiserror::Error;

/// Failures surfaced by the pipeline's collaborators.
///
/// All variants are handled the same way at a stage boundary: logged with
/// enough context to diagnose, then converted into an early empty return.
/// Nothing here escapes the orchestrator.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Page or search fetch failed (network, timeout, non-success status).
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Text generation call failed.
    #[error("generation service failed: {0}")]
    Service(String),

    /// Model reply could not be decoded into the expected record.
    #[error("malformed model reply: {reason}")]
    Parse {
        reason: String,
        /// Bounded slice of the offending raw text, kept for diagnostics.
        excerpt: String,
    },

    /// Page audit carried no primary keyword, so no search is meaningful.
    #[error("page audit has no primary keyword")]
    MissingKeyword,
}
