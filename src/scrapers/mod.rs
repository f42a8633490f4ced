//! Scrapers for the two upstream berlin.de surfaces.
//!
//! | Source | Module | What it yields |
//! |--------|--------|----------------|
//! | Press-release listing | [`press`] | Articles matching the keyword set |
//! | Gazette (Amtsblatt) index | [`gazette`] | The newest PDF link plus a label |
//!
//! Both scrapers share a posture: the upstream pages have no stable
//! contract, so every structural lookup ("not found" anchors, missing
//! category spans, missing list items) is a normal outcome that degrades to
//! a skip or a default rather than an error. All network access goes
//! through the retrying [`Fetcher`](crate::fetch::Fetcher).

pub mod gazette;
pub mod press;

use scraper::ElementRef;

/// Nearest enclosing `<li>` of an element, if any.
///
/// Used by both scrapers: the press listing keeps an article's category
/// span in the same list item as its anchor, and the gazette index keeps
/// the descriptive text of a PDF link in its list item.
pub(crate) fn enclosing_list_item<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "li")
}
