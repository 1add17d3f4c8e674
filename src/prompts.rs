//! Instruction templates sent to the generation service.
//!
//! Each template embeds the exact JSON shape the model is asked to emit.
//! Builders substitute run-specific values with plain `.replace`; large
//! blobs (page content, serialized records) are substituted last so their
//! own text can never be re-substituted.

use crate::records::{PageAudit, SerpAnalysis};

pub const PAGE_AUDIT_TEMPLATE: &str = r#"You are an expert SEO auditor analyzing a webpage.

URL: {url}

PAGE CONTENT (in markdown format):
{content}

Analyze this webpage and provide a comprehensive SEO audit in JSON format with these exact fields:

{
  "title_tag": "The page title (or 'Not found' if missing)",
  "meta_description": "The meta description (or 'Not found' if missing)",
  "primary_heading": "The main H1 heading",
  "secondary_headings": ["H2 heading 1", "H2 heading 2", "..."],
  "word_count": estimated_word_count,
  "content_summary": "Brief 2-3 sentence summary of page content and topic",
  "technical_findings": [
    "Finding 1: e.g., Missing meta description",
    "Finding 2: e.g., Title tag too short (under 30 chars)",
    "Finding 3: e.g., Multiple H1 tags found",
    "..."
  ],
  "content_opportunities": [
    "Opportunity 1: e.g., Add more internal links",
    "Opportunity 2: e.g., Expand thin content sections",
    "..."
  ],
  "primary_keyword": "The main keyword/topic this page targets",
  "secondary_keywords": ["keyword1", "keyword2", "keyword3"],
  "search_intent": "informational/transactional/navigational/commercial"
}

Be specific and actionable in your findings. Return ONLY valid JSON, no other text."#;

pub const SERP_ANALYSIS_TEMPLATE: &str = r#"You are an expert SERP analyst reviewing Google search results.

KEYWORD: "{keyword}"

TOP 10 GOOGLE RESULTS:
{results}

Analyze these search results and provide insights in JSON format:

{
  "serp_overview": {
    "dominant_content_types": ["blog posts", "product pages", "videos", "etc"],
    "average_title_length": estimated_average,
    "common_title_patterns": ["Pattern 1", "Pattern 2", "..."]
  },
  "competitor_patterns": {
    "common_themes": ["Theme 1", "Theme 2", "..."],
    "content_angles": ["Angle 1", "Angle 2", "..."],
    "key_features": ["Feature 1", "Feature 2", "..."]
  },
  "opportunities": [
    "Opportunity 1: e.g., No results directly address X",
    "Opportunity 2: e.g., Could create more comprehensive guide",
    "..."
  ],
  "content_gaps": [
    "Gap 1: Missing information about...",
    "Gap 2: No in-depth coverage of...",
    "..."
  ],
  "recommended_approach": "2-3 sentences on how to differentiate and rank for this keyword"
}

Return ONLY valid JSON, no other text."#;

pub const REPORT_TEMPLATE: &str = r#"You are a senior SEO strategist creating a professional audit report.

URL ANALYZED: {url}

PAGE AUDIT RESULTS:
{page_audit}

SERP ANALYSIS RESULTS:
{serp_analysis}

Create a comprehensive, professional SEO Audit Report in Markdown format with the following structure:

# SEO Audit Report

**Website:** {url}
**Date:** {date}
**Primary Keyword:** {primary_keyword}

---

## Executive Summary

[2-3 paragraph overview of overall SEO health, main opportunities, and expected impact]

---

## 1. Technical & On-Page Analysis

### Current Status
- **Title Tag:** [Analysis with character count]
- **Meta Description:** [Analysis with character count]
- **Primary Heading (H1):** [Analysis]
- **Content Length:** [Word count and assessment]
- **Search Intent Match:** [How well content matches intent]

### Technical Findings
[List all technical issues found with severity indicators]

### Content Opportunities
[List content improvement opportunities]

---

## 2. Keyword Analysis

### Target Keywords
- **Primary:** {primary_keyword}
- **Secondary:** {secondary_keywords}

### Search Intent
[Analysis of search intent and how well page matches it]

---

## 3. Competitive SERP Analysis

### SERP Landscape
[Overview of what's ranking and why]

### Competitor Patterns
[What successful competitors are doing]

### Content Gaps & Opportunities
[Specific gaps in the SERP that can be exploited]

---

## 4. Prioritized Recommendations

### P0 - Critical (Fix Immediately)
1. [Most urgent issue with specific action steps]
2. [Second critical issue]
[etc.]

### P1 - High Priority (Fix This Week)
1. [Important optimization with implementation details]
2. [Second high priority item]
[etc.]

### P2 - Medium Priority (Fix This Month)
1. [Valuable improvement with steps]
2. [Second medium priority item]
[etc.]

---

## 5. Implementation Roadmap

### Week 1: Critical Fixes
- [Specific action items]

### Week 2-3: Content Enhancements
- [Specific action items]

### Month 2: Strategic Improvements
- [Specific action items]

---

## 6. Expected Impact

### Quick Wins (1-4 weeks)
- [Expected improvements]

### Medium-term (1-3 months)
- [Expected improvements]

### Long-term (3-6 months)
- [Expected improvements]

---

## Next Steps

1. [First action to take]
2. [Second action to take]
3. [Third action to take]

---

*Report generated by automated SEO audit*

Make the report detailed, specific, and actionable. Use real data from the audit results. Include character counts, specific examples, and concrete next steps. Write in a professional but accessible tone."#;

pub fn page_audit_prompt(url: &str, content: &str) -> String {
    PAGE_AUDIT_TEMPLATE
        .replace("{url}", url)
        .replace("{content}", content)
}

pub fn serp_analysis_prompt(keyword: &str, results: &str) -> String {
    SERP_ANALYSIS_TEMPLATE
        .replace("{keyword}", keyword)
        .replace("{results}", results)
}

/// Both records are embedded serialized verbatim; the model reads them as
/// data, it does not re-extract anything.
pub fn report_prompt(url: &str, audit: &PageAudit, analysis: &SerpAnalysis, date: &str) -> String {
    let audit_json = serde_json::to_string_pretty(audit).unwrap_or_default();
    let analysis_json = serde_json::to_string_pretty(analysis).unwrap_or_default();

    REPORT_TEMPLATE
        .replace("{date}", date)
        .replace("{primary_keyword}", &audit.primary_keyword)
        .replace("{secondary_keywords}", &audit.secondary_keywords.join(", "))
        .replace("{url}", url)
        .replace("{page_audit}", &audit_json)
        .replace("{serp_analysis}", &analysis_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{CompetitorPatterns, SearchResult, SerpOverview};

    fn sample_audit() -> PageAudit {
        PageAudit {
            title_tag: "Acme Widgets | Home".into(),
            meta_description: "Widgets for every workshop".into(),
            primary_heading: "Industrial widgets".into(),
            secondary_headings: vec!["Catalog".into(), "Shipping".into()],
            word_count: 742,
            content_summary: "A product page selling industrial widgets.".into(),
            technical_findings: vec!["Title tag too short".into()],
            content_opportunities: vec!["Add internal links".into()],
            primary_keyword: "industrial widgets".into(),
            secondary_keywords: vec!["widget supplier".into(), "bulk widgets".into()],
            search_intent: "transactional".into(),
        }
    }

    fn sample_analysis() -> SerpAnalysis {
        SerpAnalysis {
            serp_overview: SerpOverview {
                dominant_content_types: vec!["product pages".into()],
                average_title_length: 54.0,
                common_title_patterns: vec!["Buy X online".into()],
            },
            competitor_patterns: CompetitorPatterns {
                common_themes: vec!["bulk pricing".into()],
                content_angles: vec!["industrial buyers".into()],
                key_features: vec!["spec sheets".into()],
            },
            opportunities: vec!["No result targets small workshops".into()],
            content_gaps: vec!["No maintenance guides".into()],
            recommended_approach: "Lead with specs and a transparent price table.".into(),
            keyword: "industrial widgets".into(),
            top_results: vec![SearchResult {
                rank: 1,
                title: "Widget Megastore".into(),
                url: "https://megastore.test".into(),
                snippet: "Every widget imaginable".into(),
            }],
        }
    }

    #[test]
    fn page_audit_prompt_substitutes_both_slots() {
        let prompt = page_audit_prompt("https://example.com", "# Example\nSome text");
        assert!(prompt.contains("URL: https://example.com"));
        assert!(prompt.contains("# Example\nSome text"));
        assert!(!prompt.contains("{url}"));
        assert!(!prompt.contains("{content}"));
    }

    #[test]
    fn serp_prompt_quotes_the_keyword() {
        let prompt = serp_analysis_prompt("industrial widgets", "[]");
        assert!(prompt.contains("KEYWORD: \"industrial widgets\""));
    }

    #[test]
    fn report_prompt_carries_every_field_value_verbatim() {
        let audit = sample_audit();
        let analysis = sample_analysis();
        let prompt = report_prompt("https://acme.test", &audit, &analysis, "March 03, 2026");

        assert!(prompt.contains("March 03, 2026"));
        assert!(prompt.contains("**Website:** https://acme.test"));

        for value in [
            &audit.title_tag,
            &audit.meta_description,
            &audit.primary_heading,
            &audit.content_summary,
            &audit.primary_keyword,
            &audit.search_intent,
        ] {
            assert!(prompt.contains(value.as_str()), "missing {:?}", value);
        }
        assert!(prompt.contains("742"));
        for list in [
            &audit.secondary_headings,
            &audit.technical_findings,
            &audit.content_opportunities,
            &audit.secondary_keywords,
        ] {
            for item in list {
                assert!(prompt.contains(item.as_str()), "missing {:?}", item);
            }
        }

        for value in [
            &analysis.recommended_approach,
            &analysis.keyword,
            &analysis.serp_overview.dominant_content_types[0],
            &analysis.competitor_patterns.common_themes[0],
            &analysis.opportunities[0],
            &analysis.content_gaps[0],
            &analysis.top_results[0].title,
            &analysis.top_results[0].url,
            &analysis.top_results[0].snippet,
        ] {
            assert!(prompt.contains(value.as_str()), "missing {:?}", value);
        }
    }

    #[test]
    fn report_prompt_leaves_no_placeholder_behind() {
        let prompt = report_prompt("https://acme.test", &sample_audit(), &sample_analysis(), "May 01, 2026");
        for slot in ["{url}", "{date}", "{page_audit}", "{serp_analysis}", "{primary_keyword}", "{secondary_keywords}"] {
            assert!(!prompt.contains(slot), "unsubstituted {}", slot);
        }
    }
}
