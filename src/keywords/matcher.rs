//! Keyword matching against extracted document text
//!
//! Each keyword is compiled into a [`KeywordPattern`]: a list of literal
//! segments separated by wildcards, plus a flag per edge telling whether that
//! edge is anchored to a word boundary. An edge is anchored unless the keyword
//! begins (or ends) with a wildcard. Matching is case-insensitive and
//! presence-only.

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

/// Wildcard marker inside a keyword; matches any run of characters
pub const WILDCARD: char = '*';

const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Compiled form of a single keyword
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    segments: Vec<String>,
    anchor_start: bool,
    anchor_end: bool,
    predicate: Regex,
}

impl KeywordPattern {
    /// Compile a keyword into a boundary-aware match predicate
    pub fn compile(keyword: &str) -> Result<Self> {
        let lowered = keyword.to_lowercase();

        let (segments, anchor_start, anchor_end) = if lowered.contains(WILDCARD) {
            let anchor_start = !lowered.starts_with(WILDCARD);
            let anchor_end = !lowered.ends_with(WILDCARD);
            // Empty pieces come from leading, trailing or doubled wildcards
            let segments: Vec<String> = lowered
                .split(WILDCARD)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            (segments, anchor_start, anchor_end)
        } else {
            (vec![lowered], true, true)
        };

        let source = Self::predicate_source(&segments, anchor_start, anchor_end);
        let predicate = RegexBuilder::new(&source)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: keyword.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            keyword: keyword.to_string(),
            segments,
            anchor_start,
            anchor_end,
            predicate,
        })
    }

    fn predicate_source(segments: &[String], anchor_start: bool, anchor_end: bool) -> String {
        // Pure wildcard: any word token
        if segments.is_empty() {
            return r"\w".to_string();
        }

        let body = segments
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join(".*");

        let mut source = String::with_capacity(body.len() + 4);
        if anchor_start {
            source.push_str(r"\b");
        }
        source.push_str(&body);
        if anchor_end {
            source.push_str(r"\b");
        }
        source
    }

    /// The keyword as originally written
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Lowercased literal pieces between wildcards
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_wildcard(&self) -> bool {
        self.keyword.contains(WILDCARD)
    }

    pub fn anchors(&self) -> (bool, bool) {
        (self.anchor_start, self.anchor_end)
    }

    /// Test the pattern against arbitrary text
    pub fn is_match(&self, text: &str) -> bool {
        self.is_match_lowercase(&text.to_lowercase())
    }

    /// Test the pattern against text that is already lowercased
    pub(crate) fn is_match_lowercase(&self, text: &str) -> bool {
        self.predicate.is_match(text)
    }
}

/// Presence of each keyword in one document, aligned with the keyword list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    keywords: Arc<[String]>,
    hits: Vec<bool>,
}

impl MatchResult {
    /// Build a result directly. `hits[i]` is the outcome for `keywords[i]`.
    pub fn new(keywords: Arc<[String]>, hits: Vec<bool>) -> Self {
        Self { keywords, hits }
    }

    /// Result with every keyword absent
    pub fn none(keywords: Arc<[String]>) -> Self {
        let hits = vec![false; keywords.len()];
        Self { keywords, hits }
    }

    /// Outcome for a keyword by its literal text
    pub fn get(&self, keyword: &str) -> Option<bool> {
        self.keywords
            .iter()
            .position(|k| k == keyword)
            .and_then(|i| self.hits.get(i).copied())
    }

    pub fn hits(&self) -> &[bool] {
        &self.hits
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn any(&self) -> bool {
        self.hits.iter().any(|&h| h)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.keywords
            .iter()
            .map(String::as_str)
            .zip(self.hits.iter().copied())
    }
}

/// Compiled keyword list, shared read-only across workers
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Arc<[String]>,
    patterns: Vec<KeywordPattern>,
}

impl KeywordMatcher {
    pub fn new(keywords: &[String]) -> Result<Self> {
        let patterns = keywords
            .iter()
            .map(|k| KeywordPattern::compile(k))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            keywords: keywords.into(),
            patterns,
        })
    }

    pub fn keywords(&self) -> &Arc<[String]> {
        &self.keywords
    }

    pub fn patterns(&self) -> &[KeywordPattern] {
        &self.patterns
    }

    /// Check every keyword against the text
    pub fn match_text(&self, text: &str) -> MatchResult {
        let lowered = text.to_lowercase();
        let hits = self
            .patterns
            .iter()
            .map(|p| p.is_match_lowercase(&lowered))
            .collect();

        MatchResult::new(Arc::clone(&self.keywords), hits)
    }
}

/// Compile the keywords and check them against the text in one call
pub fn search_keywords_in_text(text: &str, keywords: &[String]) -> Result<MatchResult> {
    Ok(KeywordMatcher::new(keywords)?.match_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn matches(keyword: &str, text: &str) -> bool {
        KeywordPattern::compile(keyword).unwrap().is_match(text)
    }

    #[rstest]
    #[case("Report", "Quarterly REPORT attached", true)]
    #[case("Report", "the report is late", true)]
    #[case("Report", "Report", true)]
    #[case("cat", "category listing", false)]
    #[case("cat", "a cat, sitting", true)]
    #[case("cat", "concatenate", false)]
    fn test_exact_keyword(#[case] keyword: &str, #[case] text: &str, #[case] expected: bool) {
        assert_eq!(matches(keyword, text), expected);
    }

    #[rstest]
    #[case("inter*", "accrued interest", true)]
    #[case("inter*", "international shipping", true)]
    #[case("inter*", "disinter the remains", false)]
    #[case("inter*", "inter", true)]
    #[case("*voice", "see the invoice", true)]
    #[case("*voice", "invoices", false)]
    #[case("in*ce", "invoice due", true)]
    #[case("in*ce", "invoices due", false)]
    #[case("*oic*", "invoices", true)]
    #[case("Total*", "Invoice Total: $500", true)]
    fn test_wildcard_keyword(#[case] keyword: &str, #[case] text: &str, #[case] expected: bool) {
        assert_eq!(matches(keyword, text), expected);
    }

    #[rstest]
    #[case("hello world", true)]
    #[case("!!! ???", false)]
    #[case("", false)]
    #[case("   ", false)]
    fn test_pure_wildcard(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(matches("*", text), expected);
        assert_eq!(matches("***", text), expected);
    }

    #[test]
    fn test_multi_word_keyword() {
        assert!(matches("purchase order", "Your Purchase Order number"));
        assert!(!matches("purchase order", "purchase  orders"));
        assert!(!matches("purchase order", "purchaseorder"));
        assert!(matches("net * days", "payment net 30 days"));
    }

    #[test]
    fn test_literal_characters_are_not_pattern_syntax() {
        assert!(matches("N/A", "value: n/a"));
        assert!(!matches("a.c", "abc"));
        assert!(matches("a.c*", "file a.config"));
        assert!(!matches("a.c*", "file abconfig"));
    }

    #[test]
    fn test_compile_structure() {
        let pattern = KeywordPattern::compile("*Inter**Nat*al").unwrap();
        assert_eq!(pattern.segments(), &["inter", "nat", "al"]);
        assert_eq!(pattern.anchors(), (false, true));
        assert!(pattern.is_wildcard());
        assert_eq!(pattern.keyword(), "*Inter**Nat*al");

        let exact = KeywordPattern::compile("Invoice").unwrap();
        assert_eq!(exact.segments(), &["invoice"]);
        assert_eq!(exact.anchors(), (true, true));
        assert!(!exact.is_wildcard());
    }

    #[test]
    fn test_match_text_is_complete_and_ordered() {
        let keywords: Vec<String> = ["Invoice", "Total*", "N/A", "Invoice"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let matcher = KeywordMatcher::new(&keywords).unwrap();

        let result = matcher.match_text("Invoice Total: $500");
        assert_eq!(result.len(), keywords.len());
        assert_eq!(result.hits(), &[true, true, false, true]);
        assert_eq!(result.get("Total*"), Some(true));
        assert_eq!(result.get("N/A"), Some(false));
        assert_eq!(result.get("missing"), None);
        assert!(result.any());

        let empty = matcher.match_text("");
        assert_eq!(empty, MatchResult::none(Arc::clone(matcher.keywords())));
    }

    #[test]
    fn test_search_keywords_in_text() {
        let keywords = vec!["Invoice".to_string(), "Total*".to_string()];
        let result = search_keywords_in_text("No relevant content", &keywords).unwrap();
        let collected: Vec<(&str, bool)> = result.iter().collect();
        assert_eq!(collected, vec![("Invoice", false), ("Total*", false)]);
    }
}
