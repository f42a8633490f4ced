//! Typed errors for the component boundaries.
//!
//! The binary boundary (`main`) uses `Box<dyn Error>`; the fetch and PDF
//! components surface their own error enums so callers can decide what
//! "no data" means for them without string-matching.

use thiserror::Error;

/// A fetch that failed every attempt in its retry budget.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request kept failing (transport error or non-2xx status) until
    /// the retry budget ran out.
    #[error("GET {url} failed after {attempts} attempts: {source}")]
    Exhausted {
        /// The URL that was requested.
        url: String,
        /// Total attempts made, including the first.
        attempts: usize,
        /// The error from the final attempt.
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from gazette PDF handling (text scan, rasterization, image export).
#[derive(Debug, Error)]
pub enum PdfError {
    /// The downloaded file could not be parsed as a PDF.
    #[error("failed to parse PDF: {0}")]
    Parse(#[from] lopdf::Error),

    /// The rasterization pass failed.
    #[error("failed to rasterize PDF: {0}")]
    Render(String),

    /// A rendered page could not be encoded as PNG.
    #[error("failed to save page image: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem trouble while writing artifacts.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
