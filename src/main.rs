mod config;
mod error;
mod extract;
mod fetch;
mod gemini;
mod pipeline;
mod prompts;
mod records;
mod report;
mod search;
mod util;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use config::Config;
use fetch::PageFetcher;
use gemini::GeminiClient;
use pipeline::Pipeline;
use report::FileReportSink;
use search::SerpApiClient;

#[derive(Parser)]
#[command(
    name = "seo_audit",
    about = "Three-stage SEO audit: page analysis, SERP comparison, optimization report"
)]
struct Cli {
    /// URL of the page to audit (asked for interactively when omitted)
    url: Option<String>,

    /// Directory where finished reports are written
    #[arg(long, default_value = "reports")]
    reports_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env(cli.reports_dir)?;

    let url = match cli.url {
        Some(url) => url,
        None => prompt_for_url()?,
    };
    if url.trim().is_empty() {
        anyhow::bail!("no URL provided");
    }

    let t0 = Instant::now();

    let mut pipeline = Pipeline::new(
        PageFetcher::new(&config)?,
        SerpApiClient::new(&config)?,
        GeminiClient::new(&config)?,
        FileReportSink::new(&config.reports_dir),
    );

    let ok = pipeline.run(&url).await;

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", util::format_duration(elapsed));
    }

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn prompt_for_url() -> Result<String> {
    print!("Enter the URL to audit: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
