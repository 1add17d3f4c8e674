//! Report persistence: one markdown file per audit run.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use crate::pipeline::ReportSink;

pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for FileReportSink {
    fn save(&self, report: &str, url: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path = self.dir.join(report_filename(url, &stamp));
        fs::write(&path, report).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// Filesystem-safe name derived from the audited address and a timestamp.
fn report_filename(url: &str, stamp: &str) -> String {
    let bare = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let safe: String = bare
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("seo_report_{}_{}.md", safe.trim_matches('_'), stamp)
}
