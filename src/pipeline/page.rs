//! Page analysis: fetch the page, extract its audit record.

use tracing::{info, warn};

use crate::extract;
use crate::pipeline::{ContentFetcher, TextGenerator};
use crate::prompts;
use crate::records::PageAudit;
use crate::util::truncate_chars;

/// Longest slice of page content forwarded to the model.
const CONTENT_BUDGET: usize = 15_000;

/// Produce a `PageAudit` for `url`. Any failure aborts the stage; the
/// record comes back exactly as extracted, with no per-field validation.
pub async fn run<F, G>(fetcher: &F, llm: &G, url: &str) -> Option<PageAudit>
where
    F: ContentFetcher,
    G: TextGenerator,
{
    let content = match fetcher.fetch(url).await {
        Ok(c) if !c.trim().is_empty() => c,
        Ok(_) => {
            warn!("Fetched page is empty: {}", url);
            return None;
        }
        Err(e) => {
            warn!("Page fetch failed for {}: {}", url, e);
            return None;
        }
    };

    let prompt = prompts::page_audit_prompt(url, truncate_chars(&content, CONTENT_BUDGET));
    match extract::extract_record::<PageAudit, _>(llm, &prompt).await {
        Ok(audit) => {
            info!("Page audit complete for {}", url);
            Some(audit)
        }
        Err(e) => {
            extract::log_failure("page audit", &e);
            None
        }
    }
}
