//! One-shot scraping from the command line
//!
//! Loads an HTML file, picks the given example elements, matches the page
//! against them and writes the selections as CSV or JSON.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use visual_scraper::matching::parse_threshold;
use visual_scraper::selection::ExportRecord;
use visual_scraper::utils::normalize_url;
use visual_scraper::{ScrapeSession, ScraperError, ScraperOptions};

fn threshold_arg(value: &str) -> std::result::Result<f64, String> {
    parse_threshold(value).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "visual-scrape")]
#[command(version)]
#[command(about = "Collect every element that looks like the examples you pick", long_about = None)]
struct Cli {
    /// HTML file to scrape
    #[arg(long, value_name = "FILE")]
    html: PathBuf,

    /// Page URL, used to resolve relative links
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// List the pickable elements and exit
    #[arg(long)]
    list: bool,

    /// Structural path of an example element (repeatable)
    #[arg(long = "pick", value_name = "PATH")]
    picks: Vec<String>,

    /// Index of an example element from --list (repeatable)
    #[arg(long = "pick-index", value_name = "N")]
    pick_indices: Vec<usize>,

    /// Similarity threshold (0 to 1)
    #[arg(long, value_name = "DECIMAL", default_value = "0.67", value_parser = threshold_arg)]
    threshold: f64,

    /// Print the request for an external scan layer instead of matching
    #[arg(long)]
    scan_request: bool,

    /// JSON scan response to match instead of the HTML file's elements
    #[arg(long, value_name = "FILE")]
    candidates: Option<PathBuf>,

    /// Output file ending in .csv or .json (default: JSON on stdout)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let html = std::fs::read_to_string(&cli.html)
        .with_context(|| format!("Failed to read {}", cli.html.display()))?;
    let url = cli.url.as_deref().map(normalize_url);

    let mut session = ScrapeSession::new(ScraperOptions::new().threshold(cli.threshold));
    session
        .load_html(&html, url.as_deref())
        .context("Failed to load document")?;

    if cli.list {
        let document = session.document()?;
        for (index, selector) in document.selector_map.iter() {
            println!(
                "{:>4}  {}  {}",
                index,
                selector.css_selector,
                selector.text.as_deref().unwrap_or("")
            );
        }
        return Ok(());
    }

    if cli.picks.is_empty() && cli.pick_indices.is_empty() {
        bail!("Pick at least one example with --pick or --pick-index (see --list)");
    }

    let mut outcomes = Vec::new();
    for path in &cli.picks {
        outcomes.push(session.pick_path(path)?);
    }
    for index in &cli.pick_indices {
        outcomes.push(session.pick_index(*index)?);
    }
    for outcome in &outcomes {
        eprintln!("{}", outcome.message);
    }
    if session.selections().is_empty() {
        return Err(ScraperError::NoExamples.into());
    }

    if cli.scan_request {
        let request = session.scan_request(cli.threshold)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let report = match &cli.candidates {
        Some(path) => {
            let response: serde_json::Value = serde_json::from_str(
                &std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?,
            )
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
            session.run_match_with(cli.threshold, &response)?
        }
        None => session.run_match(cli.threshold)?,
    };
    for result in &report.results {
        eprintln!("  {}  [{}]", result.candidate.structural_path, result.summary());
    }
    eprintln!("{}", report.message);

    match cli.output {
        Some(path) => {
            let rows = session.export_to(&path)?;
            eprintln!("Exported {} rows to {}", rows, path.display());
        }
        None => {
            let records: Vec<ExportRecord> = session.export_records();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
