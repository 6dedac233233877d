//! Keyword loading and matching

mod loader;
mod matcher;

pub use loader::{parse_keywords, read_keywords};
pub use matcher::{search_keywords_in_text, KeywordMatcher, KeywordPattern, MatchResult, WILDCARD};
