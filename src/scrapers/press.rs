//! Press-release scanner.
//!
//! Scans the berlin.de press listing for articles relevant to the watch
//! keywords. Candidate anchors are those whose `href` matches the
//! press-release URL pattern (`pressemitteilung...php`). Each candidate is
//! classified in two steps:
//!
//! 1. **Category path**: if the candidate's list item carries a
//!    `span.category` whose text contains any keyword (case-insensitive
//!    substring), the article body is fetched and the article is recorded
//!    without re-checking the body for keywords.
//! 2. **Body path**: otherwise the body is fetched and the article is
//!    recorded only when it contains a whole-word, case-insensitive
//!    keyword occurrence.
//!
//! Output preserves listing order. A candidate whose fetch fails after the
//! fetcher's retries, or whose page has no `div.textile` content
//! container, is skipped without aborting the scan.

use crate::fetch::Fetcher;
use crate::keywords::KeywordSet;
use crate::models::Article;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static PRESS_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pressemitteilung.*\.php").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static CATEGORY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.category").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.textile").unwrap());

/// A listing entry before classification.
#[derive(Debug)]
struct Candidate {
    title: String,
    url: String,
    category: Option<String>,
}

/// Scan the press listing and return the articles matching the keyword set.
///
/// Returns an empty vector when the listing itself cannot be fetched or
/// parsed; individual article failures are skipped.
#[instrument(level = "info", skip(fetcher, keywords))]
pub async fn scan(
    fetcher: &Fetcher,
    listing_url: &str,
    base_url: &str,
    keywords: &KeywordSet,
) -> Vec<Article> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(base_url, error = %e, "Invalid base URL; skipping press scan");
            return Vec::new();
        }
    };

    let Ok(response) = fetcher.get(listing_url).await else {
        // Exhaustion was already logged by the fetcher.
        return Vec::new();
    };
    let listing_html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            warn!(listing_url, error = %e, "Failed to read listing body");
            return Vec::new();
        }
    };

    let candidates = index_candidates(&listing_html, &base);
    info!(count = candidates.len(), "Indexed press-release candidates");

    let mut matches = Vec::new();
    for candidate in candidates {
        if let Some(category) = &candidate.category {
            if keywords.matches_category(category) {
                debug!(url = %candidate.url, %category, "Category matched; including without body scan");
                if let Some(body) = fetch_body(fetcher, &candidate.url).await {
                    matches.push(Article {
                        title: candidate.title,
                        body,
                        url: candidate.url,
                    });
                }
                continue;
            }
        }

        let Some(body) = fetch_body(fetcher, &candidate.url).await else {
            continue;
        };
        if let Some(keyword) = keywords.find_in_text(&body) {
            debug!(url = %candidate.url, keyword, "Body matched");
            matches.push(Article {
                title: candidate.title,
                body,
                url: candidate.url,
            });
        }
    }

    info!(count = matches.len(), "Press scan complete");
    matches
}

/// Collect press-release candidates from the listing page, in page order.
fn index_candidates(html: &str, base: &Url) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !PRESS_LINK_RE.is_match(href) {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            debug!(href, "Skipping unresolvable press link");
            continue;
        };

        let title = anchor.text().collect::<String>().trim().to_string();
        let category = super::enclosing_list_item(anchor)
            .and_then(|item| item.select(&CATEGORY_SELECTOR).next())
            .map(|span| span.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty());

        candidates.push(Candidate {
            title,
            url: resolved.to_string(),
            category,
        });
    }

    candidates
}

/// Fetch an article page and extract its body text, or `None` on any
/// failure (exhausted fetch, unreadable body, missing content container).
async fn fetch_body(fetcher: &Fetcher, url: &str) -> Option<String> {
    let response = fetcher.get(url).await.ok()?;
    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            warn!(%url, error = %e, "Failed to read article body");
            return None;
        }
    };
    let body = extract_body(&html);
    if body.is_none() {
        debug!(%url, "Article page has no content container; skipping");
    }
    body
}

/// Visible text of the `div.textile` content container, line breaks
/// preserved: one line per non-blank text node.
fn extract_body(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let container = document.select(&BODY_SELECTOR).next()?;
    let text = container
        .text()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() { None } else { Some(text) }
}
