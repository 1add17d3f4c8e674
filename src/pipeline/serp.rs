//! Competitive analysis: search the page's primary keyword, extract what
//! the ranking competitors are doing.

use tracing::{info, warn};

use crate::error::AuditError;
use crate::extract;
use crate::pipeline::{SearchProvider, TextGenerator};
use crate::prompts;
use crate::records::{PageAudit, SerpAnalysis};

/// How many organic results one run asks for.
pub const RESULT_LIMIT: usize = 10;

/// Produce a `SerpAnalysis` for the audit's primary keyword. The returned
/// record is enriched with the keyword and the result list that drove it.
pub async fn run<S, G>(search: &S, llm: &G, audit: &PageAudit) -> Option<SerpAnalysis>
where
    S: SearchProvider,
    G: TextGenerator,
{
    let keyword = audit.primary_keyword.trim();
    if keyword.is_empty() {
        warn!("{}", AuditError::MissingKeyword);
        return None;
    }

    let results = match search.search(keyword, RESULT_LIMIT).await {
        Ok(r) if !r.is_empty() => r,
        Ok(_) => {
            warn!("Search returned no results for '{}'", keyword);
            return None;
        }
        Err(e) => {
            warn!("Search failed for '{}': {}", keyword, e);
            return None;
        }
    };

    // Compact {rank, title, url, snippet} listing for the prompt.
    let listing = serde_json::to_string_pretty(&results).unwrap_or_default();
    let prompt = prompts::serp_analysis_prompt(keyword, &listing);

    match extract::extract_record::<SerpAnalysis, _>(llm, &prompt).await {
        Ok(mut analysis) => {
            analysis.keyword = keyword.to_string();
            analysis.top_results = results;
            info!("SERP analysis complete for '{}'", keyword);
            Some(analysis)
        }
        Err(e) => {
            extract::log_failure("SERP analysis", &e);
            None
        }
    }
}
