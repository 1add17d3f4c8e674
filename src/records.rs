//! Records handed between pipeline stages.
//!
//! Each record is produced once by its stage and never mutated afterwards.
//! Fields decoded from model replies all carry `#[serde(default)]`: a field
//! the model leaves out is absent/empty, not fatal.

use serde::{Deserialize, Serialize};

/// One organic search result. `rank` is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub rank: usize,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// Structured audit of a single page, decoded from the model's JSON reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageAudit {
    #[serde(default)]
    pub title_tag: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub primary_heading: String,
    #[serde(default)]
    pub secondary_headings: Vec<String>,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub content_summary: String,
    #[serde(default)]
    pub technical_findings: Vec<String>,
    #[serde(default)]
    pub content_opportunities: Vec<String>,
    /// Empty means the pipeline cannot continue past this record.
    #[serde(default)]
    pub primary_keyword: String,
    #[serde(default)]
    pub secondary_keywords: Vec<String>,
    /// Kept as free text; models mostly stay within
    /// informational/transactional/navigational/commercial but are not held to it.
    #[serde(default)]
    pub search_intent: String,
}

/// What is ranking and how: content-type distribution and title patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerpOverview {
    #[serde(default)]
    pub dominant_content_types: Vec<String>,
    #[serde(default)]
    pub average_title_length: f64,
    #[serde(default)]
    pub common_title_patterns: Vec<String>,
}

/// What the ranking competitors have in common.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitorPatterns {
    #[serde(default)]
    pub common_themes: Vec<String>,
    #[serde(default)]
    pub content_angles: Vec<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
}

/// Competitive picture for one keyword, decoded from the model's JSON reply
/// and then enriched with the originating keyword and result list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerpAnalysis {
    #[serde(default)]
    pub serp_overview: SerpOverview,
    #[serde(default)]
    pub competitor_patterns: CompetitorPatterns,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub content_gaps: Vec<String>,
    #[serde(default)]
    pub recommended_approach: String,
    /// Filled in after extraction, never decoded from the reply.
    #[serde(skip_deserializing, default)]
    pub keyword: String,
    /// Up to 10 entries that produced this analysis.
    #[serde(skip_deserializing, default)]
    pub top_results: Vec<SearchResult>,
}
