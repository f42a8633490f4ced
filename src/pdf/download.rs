//! Gazette PDF download with a content-type gate.

use crate::error::PdfError;
use crate::fetch::Fetcher;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Download the gazette PDF to `dest`, returning whether it was persisted.
///
/// The file is written only when the response's `Content-Type` declares
/// `application/pdf`; anything else (an error page served with status 200,
/// a redirect target, etc.) is logged and skipped without error, and no
/// file is created. An exhausted fetch is likewise `Ok(false)` — the
/// fetcher already logged it, and the caller treats it as "no gazette this
/// run".
///
/// # Errors
///
/// Only local filesystem failures while writing the confirmed PDF are
/// surfaced as errors.
#[instrument(level = "info", skip(fetcher), fields(dest = %dest.display()))]
pub async fn download_pdf(fetcher: &Fetcher, url: &str, dest: &Path) -> Result<bool, PdfError> {
    let Ok(response) = fetcher.get(url).await else {
        return Ok(false);
    };

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.contains("application/pdf") {
        warn!(%url, content_type, "Response is not a PDF; nothing persisted");
        return Ok(false);
    }

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(%url, error = %e, "Failed to read PDF response body");
            return Ok(false);
        }
    };

    tokio::fs::write(dest, &bytes).await?;
    info!(%url, bytes = bytes.len(), "Saved gazette PDF");
    Ok(true)
}
