//! Gazette (Amtsblatt) locator.
//!
//! Finds the newest gazette PDF on the index page and derives the metadata
//! label that names its artifact directory. The label comes from the text
//! of the list item enclosing the PDF anchor: everything from the literal
//! `PDF-Dokument` marker onward is dropped, the remainder is trimmed, and
//! whitespace runs are collapsed to single underscores. A PDF anchor
//! without an enclosing list item is a structural defect of the page; it
//! falls back to the default label instead of failing.

use crate::fetch::Fetcher;
use crate::models::GazetteReference;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{info, instrument, warn};
use url::Url;

/// Label used when the index page carries no usable listing text.
pub const DEFAULT_LABEL: &str = "Amtsblatt";

/// Marker after which listing text is boilerplate (file type and size).
const BOILERPLATE_MARKER: &str = "PDF-Dokument";

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static PDF_LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.pdf$").unwrap());

/// Locate the newest gazette PDF on the index page.
///
/// Returns `None` when the page cannot be fetched or carries no PDF link;
/// downstream steps no-op in that case.
#[instrument(level = "info", skip(fetcher))]
pub async fn locate(
    fetcher: &Fetcher,
    index_url: &str,
    base_url: &str,
) -> Option<GazetteReference> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(base_url, error = %e, "Invalid base URL; skipping gazette lookup");
            return None;
        }
    };

    let response = fetcher.get(index_url).await.ok()?;
    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            warn!(index_url, error = %e, "Failed to read gazette index body");
            return None;
        }
    };

    let reference = find_reference(&html, &base);
    match &reference {
        Some(reference) => {
            info!(label = %reference.label, pdf_url = %reference.pdf_url, "Located gazette PDF")
        }
        None => info!(index_url, "No PDF link on gazette index page"),
    }
    reference
}

/// First PDF anchor on the page, resolved against `base`, with its label.
fn find_reference(html: &str, base: &Url) -> Option<GazetteReference> {
    let document = Html::parse_document(html);

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        // Query and fragment do not decide whether a link is a PDF.
        let bare = href.split(['?', '#']).next().unwrap_or(href);
        if !PDF_LINK_RE.is_match(bare) {
            continue;
        }
        let Ok(pdf_url) = base.join(href) else {
            warn!(href, "Skipping unresolvable PDF link");
            continue;
        };

        let label = match super::enclosing_list_item(anchor) {
            Some(item) => clean_label(&item.text().collect::<String>()),
            None => {
                warn!(href, "PDF link has no enclosing list item; using default label");
                DEFAULT_LABEL.to_string()
            }
        };

        return Some(GazetteReference {
            pdf_url: pdf_url.to_string(),
            label,
        });
    }

    None
}

/// Normalize listing text into a filesystem-safe label.
///
/// Truncates at the `PDF-Dokument` marker, trims, and collapses whitespace
/// runs to single underscores. Text that normalizes to nothing yields the
/// default label.
fn clean_label(raw: &str) -> String {
    let cut = match raw.find(BOILERPLATE_MARKER) {
        Some(index) => &raw[..index],
        None => raw,
    };
    let label = cut.split_whitespace().collect::<Vec<_>>().join("_");
    if label.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        label
    }
}
