//! Data models for matched articles and gazette artifacts.
//!
//! - [`Article`]: a press release that matched the keyword set
//! - [`GazetteReference`]: the located gazette PDF link and its label
//! - [`GazetteArtifacts`]: what the gazette sub-pipeline persisted
//! - [`WatchReport`]: the per-run hand-off to the presentation layer

use serde::Serialize;

/// A press-release article that matched the watch keywords.
///
/// Articles are immutable once created and carry no identity beyond their
/// URL; the scan output preserves listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// The headline text from the listing anchor.
    pub title: String,
    /// The article body with line breaks preserved.
    pub body: String,
    /// The absolute article URL.
    pub url: String,
}

/// The newest gazette PDF as located on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GazetteReference {
    /// Absolute URL of the PDF.
    pub pdf_url: String,
    /// Filesystem-safe label derived from the listing text, used to
    /// namespace the downloaded artifacts.
    pub label: String,
}

/// Artifacts produced by the gazette sub-pipeline for one run.
///
/// `pdf_path` is `None` when the download was skipped (content-type
/// mismatch or exhausted fetch); `page_images` is empty when no page
/// matched a keyword.
#[derive(Debug, Clone, Serialize)]
pub struct GazetteArtifacts {
    /// The metadata label the artifact directory is keyed by.
    pub label: String,
    /// Where the PDF was downloaded from.
    pub pdf_url: String,
    /// Path of the persisted PDF, if the download went through.
    pub pdf_path: Option<String>,
    /// Paths of the exported page images, ascending by page number.
    pub page_images: Vec<String>,
}

/// One run's results, serialized as JSON for the presentation layer.
#[derive(Debug, Serialize)]
pub struct WatchReport {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    /// Matched articles in listing order.
    pub articles: Vec<Article>,
    /// Gazette results, absent when no PDF link was found.
    pub gazette: Option<GazetteArtifacts>,
}
