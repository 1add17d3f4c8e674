//! Sequential three-stage audit pipeline.
//!
//! Stage order is fixed: page analysis, then competitive analysis driven by
//! the page's primary keyword, then report synthesis over both records. A
//! stage that produces nothing aborts the whole run; there is no retry and
//! no partial-result recovery.

pub mod page;
pub mod serp;
pub mod synthesis;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use indicatif::ProgressBar;
use tracing::error;

use crate::error::AuditError;
use crate::fetch::normalize_url;
use crate::records::{PageAudit, SearchResult, SerpAnalysis};

/// Fetches a page as prompt-ready text.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, AuditError>;
}

/// Fetches ranked organic results for a keyword.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, keyword: &str, limit: usize)
        -> Result<Vec<SearchResult>, AuditError>;
}

/// Turns an instruction into free-form text. Stateless per call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AuditError>;
}

/// Persists a finished report, returning where it landed.
pub trait ReportSink: Send + Sync {
    fn save(&self, report: &str, url: &str) -> anyhow::Result<PathBuf>;
}

/// Where a run currently stands. `Aborted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Ready,
    PageAudit,
    SerpAnalysis,
    Synthesis,
    Done,
    Aborted,
}

pub struct Pipeline<F, S, G, R> {
    fetcher: F,
    search: S,
    llm: G,
    sink: R,
    state: PipelineState,
}

impl<F, S, G, R> Pipeline<F, S, G, R>
where
    F: ContentFetcher,
    S: SearchProvider,
    G: TextGenerator,
    R: ReportSink,
{
    pub fn new(fetcher: F, search: S, llm: G, sink: R) -> Self {
        Self {
            fetcher,
            search,
            llm,
            sink,
            state: PipelineState::Ready,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run the full audit for one address. Returns true only when a report
    /// was persisted. Never panics; every failure lands in `Aborted`.
    pub async fn run(&mut self, address: &str) -> bool {
        let url = normalize_url(address.trim());
        println!("Starting SEO audit for {}", url);

        self.state = PipelineState::PageAudit;
        println!("\n[1/3] Page analysis");
        let spinner = stage_spinner("analyzing page structure and SEO elements");
        let audit = page::run(&self.fetcher, &self.llm, &url).await;
        spinner.finish_and_clear();
        let Some(audit) = audit else {
            return self.abort("page analysis produced nothing");
        };
        print_page_summary(&audit);

        self.state = PipelineState::SerpAnalysis;
        println!("\n[2/3] Competitive analysis");
        let spinner = stage_spinner("analyzing search results for the primary keyword");
        let analysis = serp::run(&self.search, &self.llm, &audit).await;
        spinner.finish_and_clear();
        let Some(analysis) = analysis else {
            return self.abort("competitive analysis produced nothing");
        };
        print_serp_summary(&analysis);

        self.state = PipelineState::Synthesis;
        println!("\n[3/3] Report synthesis");
        let spinner = stage_spinner("writing the optimization report");
        let report = synthesis::run(&self.llm, &url, &audit, &analysis).await;
        spinner.finish_and_clear();
        let Some(report) = report else {
            return self.abort("report synthesis produced nothing");
        };

        match self.sink.save(&report, &url) {
            Ok(path) => {
                self.state = PipelineState::Done;
                println!("\nReport saved to {}", path.display());
                true
            }
            Err(e) => {
                error!("Failed to persist report: {:#}", e);
                self.abort("report could not be saved")
            }
        }
    }

    fn abort(&mut self, what: &str) -> bool {
        self.state = PipelineState::Aborted;
        println!("\nAudit aborted: {}.", what);
        false
    }
}

fn stage_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn print_page_summary(audit: &PageAudit) {
    println!("  primary keyword: {}", audit.primary_keyword);
    println!("  word count:      {}", audit.word_count);
    println!(
        "  findings:        {} technical, {} content opportunities",
        audit.technical_findings.len(),
        audit.content_opportunities.len()
    );
}

fn print_serp_summary(analysis: &SerpAnalysis) {
    println!(
        "  content types:   {}",
        analysis.serp_overview.dominant_content_types.join(", ")
    );
    println!("  opportunities:   {}", analysis.opportunities.len());
    println!("  content gaps:    {}", analysis.content_gaps.len());
}

// ── Test fakes ──


#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;

    #[tokio::test]
    async fn full_pipeline_persists_report() {
        let fetcher = FakeFetcher::returning("# Example\nSome text");
        let search = FakeSearch::with_results(3);
        let llm = ScriptedLlm::new(&[
            PAGE_AUDIT_JSON,
            SERP_ANALYSIS_JSON,
            "# SEO Audit Report\n\nEverything is going to be fine.",
        ]);
        let sink = MemorySink::default();

        let mut pipeline = Pipeline::new(fetcher, search, llm, sink);
        assert_eq!(pipeline.state(), PipelineState::Ready);

        assert!(pipeline.run("example.com").await);
        assert_eq!(pipeline.state(), PipelineState::Done);

        let saved = pipeline.sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        let (report, url) = &saved[0];
        assert!(report.contains("# SEO Audit Report"));
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn failed_fetch_aborts_before_any_generation() {
        let fetcher = FakeFetcher::failing();
        let search = FakeSearch::with_results(3);
        let llm = ScriptedLlm::new(&[]);
        let sink = MemorySink::default();

        let mut pipeline = Pipeline::new(fetcher, search, llm, sink);
        assert!(!pipeline.run("example.com").await);
        assert_eq!(pipeline.state(), PipelineState::Aborted);
        assert_eq!(pipeline.llm.calls(), 0);
        assert_eq!(pipeline.search.calls(), 0);
        assert!(pipeline.sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_timeout_aborts_without_persisting() {
        let fetcher = FakeFetcher::returning("# Example\nSome text");
        let search = FakeSearch::failing();
        let llm = ScriptedLlm::new(&[PAGE_AUDIT_JSON]);
        let sink = MemorySink::default();

        let mut pipeline = Pipeline::new(fetcher, search, llm, sink);
        assert!(!pipeline.run("https://example.com").await);
        assert_eq!(pipeline.state(), PipelineState::Aborted);
        // Stage 1 ran its one extraction; stage 2 never reached the model.
        assert_eq!(pipeline.llm.calls(), 1);
        assert!(pipeline.sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_extraction_aborts_the_run() {
        let fetcher = FakeFetcher::returning("# Example\nSome text");
        let search = FakeSearch::with_results(3);
        let llm = ScriptedLlm::new(&["this is not json at all"]);
        let sink = MemorySink::default();

        let mut pipeline = Pipeline::new(fetcher, search, llm, sink);
        assert!(!pipeline.run("example.com").await);
        assert_eq!(pipeline.state(), PipelineState::Aborted);
        assert_eq!(pipeline.search.calls(), 0);
    }
}
