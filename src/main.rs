//! # Amtsblatt Watch
//!
//! Monitors two berlin.de surfaces for a configured set of watch keywords:
//!
//! - the press-release listing, scanning article categories and bodies
//! - the Amtsblatt gazette index, downloading the newest PDF and exporting
//!   the pages (plus immediate neighbors) where a keyword occurs
//!
//! ## Usage
//!
//! ```sh
//! amtsblatt_watch -o ./output
//! ```
//!
//! ## Architecture
//!
//! Each run is stateless and fully sequential:
//! 1. **Press scan**: index listing anchors, classify by category label or
//!    whole-word body match, extract matched article bodies
//! 2. **Gazette pipeline**: locate the newest PDF link and its label,
//!    download behind a content-type gate, scan the text layer, rasterize
//!    once and export the matched page window as PNGs
//! 3. **Report**: hand both results to the presentation layer as
//!    `report.json` next to the downloaded artifacts
//!
//! All network access goes through one retrying [`fetch::Fetcher`];
//! failures are contained per component, so a dead upstream produces an
//! empty result instead of aborting the sibling pipeline.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod keywords;
mod models;
mod outputs;
mod pdf;
mod scrapers;

use cli::Cli;
use config::WatchConfig;
use fetch::Fetcher;
use keywords::KeywordSet;
use models::{GazetteArtifacts, WatchReport};
use pdf::PdfiumRenderer;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("amtsblatt_watch starting up");

    let args = Cli::parse();
    let config = WatchConfig::load(args.config.as_deref()).await?;
    let keywords = config.keyword_set()?;
    info!(
        keywords = keywords.len(),
        max_retries = config.max_retries,
        backoff_secs = config.backoff_secs,
        "Watch configuration ready"
    );

    let fetcher = Fetcher::new(config.max_retries, config.backoff());

    // ---- Press scan ----
    let articles = scrapers::press::scan(
        &fetcher,
        &config.press_listing_url,
        &config.base_url,
        &keywords,
    )
    .await;
    info!(count = articles.len(), "Matched press releases");

    // ---- Gazette pipeline ----
    let gazette = run_gazette(&fetcher, &config, &keywords, &args.output_dir).await;

    // ---- Report hand-off ----
    let report = WatchReport {
        generated_at: Local::now().to_rfc3339(),
        articles,
        gazette,
    };
    outputs::json::write_report(&report, &args.output_dir).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Locate, download, and extract the newest gazette.
///
/// Every failure mode degrades instead of propagating: no PDF link yields
/// `None`, a refused download leaves `pdf_path` empty, and extraction
/// trouble leaves `page_images` empty — the report still carries whatever
/// was produced.
#[instrument(level = "info", skip_all)]
async fn run_gazette(
    fetcher: &Fetcher,
    config: &WatchConfig,
    keywords: &KeywordSet,
    output_dir: &str,
) -> Option<GazetteArtifacts> {
    let reference =
        scrapers::gazette::locate(fetcher, &config.gazette_index_url, &config.base_url).await?;

    let gazette_dir = Path::new(output_dir).join("downloads").join(&reference.label);
    if let Err(e) = tokio::fs::create_dir_all(&gazette_dir).await {
        error!(dir = %gazette_dir.display(), error = %e, "Failed to create gazette directory");
        return Some(GazetteArtifacts {
            label: reference.label,
            pdf_url: reference.pdf_url,
            pdf_path: None,
            page_images: Vec::new(),
        });
    }

    let pdf_path = gazette_dir.join(format!("{}.pdf", reference.label));
    let downloaded = match pdf::download_pdf(fetcher, &reference.pdf_url, &pdf_path).await {
        Ok(downloaded) => downloaded,
        Err(e) => {
            error!(error = %e, "Failed to persist gazette PDF");
            false
        }
    };
    if !downloaded {
        return Some(GazetteArtifacts {
            label: reference.label,
            pdf_url: reference.pdf_url,
            pdf_path: None,
            page_images: Vec::new(),
        });
    }

    let renderer = PdfiumRenderer::new();
    let page_images =
        match pdf::extract_matching_pages(&pdf_path, keywords, &gazette_dir, &renderer) {
            Ok(paths) => paths
                .into_iter()
                .map(|p| p.display().to_string())
                .collect(),
            Err(e) => {
                error!(error = %e, "Gazette page extraction failed");
                Vec::new()
            }
        };

    Some(GazetteArtifacts {
        label: reference.label,
        pdf_url: reference.pdf_url,
        pdf_path: Some(pdf_path.display().to_string()),
        page_images,
    })
}
