//! Report synthesis: merge both records into one long-form document.
//!
//! Unlike the first two stages the reply is prose, not JSON; it is returned
//! as-is after trimming.

use chrono::Local;
use tracing::{info, warn};

use crate::pipeline::TextGenerator;
use crate::prompts;
use crate::records::{PageAudit, SerpAnalysis};

pub async fn run<G>(
    llm: &G,
    url: &str,
    audit: &PageAudit,
    analysis: &SerpAnalysis,
) -> Option<String>
where
    G: TextGenerator,
{
    let date = Local::now().format("%B %d, %Y").to_string();
    let prompt = prompts::report_prompt(url, audit, analysis, &date);

    match llm.generate(&prompt).await {
        Ok(report) => {
            let report = report.trim().to_string();
            info!("Report generated ({} characters)", report.chars().count());
            Some(report)
        }
        Err(e) => {
            warn!("Report generation failed: {}", e);
            None
        }
    }
}
