//! Keyword matching over scraped text.
//!
//! A [`KeywordSet`] holds the configured watch terms together with one
//! compiled whole-word pattern per term. Two matching modes are used by the
//! pipeline:
//!
//! - **Whole-word** ([`KeywordSet::find_in_text`]): case-insensitive,
//!   bounded by Unicode word boundaries. Used for article bodies and
//!   gazette page text.
//! - **Substring** ([`KeywordSet::matches_category`]): case-insensitive
//!   containment. Used for the short category labels on the press listing,
//!   where whole-word semantics would be needlessly strict.
//!
//! # Word-boundary semantics
//!
//! Boundaries are the `regex` crate's Unicode `\b`. A keyword is therefore
//! NOT found inside an unseparated German compound ("Wegner" does not match
//! "Wegnerstraße") but IS found across hyphens and other punctuation
//! ("Wegner" matches "Wegner-Straße"). This is the documented, tested
//! behavior rather than an accident of the pattern.

use regex::Regex;

/// An ordered set of watch keywords with precompiled whole-word patterns.
///
/// Iteration order is the construction order, so matching is deterministic:
/// the first keyword in the set that occurs in a text is the one reported.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
    word_patterns: Vec<Regex>,
}

impl KeywordSet {
    /// Build a keyword set, compiling one whole-word pattern per term.
    ///
    /// # Errors
    ///
    /// Returns a `regex::Error` if a pattern fails to compile. Keywords are
    /// escaped before compilation, so this only happens for pathological
    /// inputs (e.g. terms long enough to blow the compiled-size limit).
    pub fn new<I, S>(keywords: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        let word_patterns = keywords
            .iter()
            .map(|kw| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw))))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            keywords,
            word_patterns,
        })
    }

    /// Number of keywords in the set.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// True when no keywords are configured.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Iterate the keywords in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Find the first keyword that occurs as a whole word in `text`.
    ///
    /// Matching is case-insensitive and bounded by Unicode word boundaries.
    /// Returns the matching keyword (in its configured spelling) or `None`.
    pub fn find_in_text(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .zip(&self.word_patterns)
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(kw, _)| kw.as_str())
    }

    /// True when any keyword occurs as a case-insensitive substring of a
    /// category label.
    pub fn matches_category(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.keywords
            .iter()
            .any(|kw| label.contains(&kw.to_lowercase()))
    }
}
