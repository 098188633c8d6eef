// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL glob patterns
//!
//! `*` matches any run of characters (including none), `?` matches exactly
//! one character. Everything else is literal. Matching is anchored at both
//! ends.

use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};

/// Translate a glob into anchored regex source
pub fn get_url_pattern_regex(glob: &str) -> String {
    let mut source = String::with_capacity(glob.len() + 8);
    source.push_str("^(?s:");

    let mut literal = String::new();
    for ch in glob.chars() {
        match ch {
            '*' | '?' => {
                if !literal.is_empty() {
                    source.push_str(&regex::escape(&literal));
                    literal.clear();
                }
                source.push_str(if ch == '*' { ".*" } else { "." });
            }
            _ => literal.push(ch),
        }
    }
    if !literal.is_empty() {
        source.push_str(&regex::escape(&literal));
    }

    source.push_str(")$");
    source
}

/// Compiled URL glob
#[derive(Clone)]
pub struct UrlPattern {
    glob: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compile a glob into a matcher
    pub fn compile(glob: &str) -> Result<Self> {
        let regex = Regex::new(&get_url_pattern_regex(glob))
            .map_err(|e| Error::invalid_pattern(glob, e.to_string()))?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// Test a URL against the pattern
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// Empty or all-star patterns match every URL
    pub fn is_universal(&self) -> bool {
        self.glob.chars().all(|c| c == '*')
    }

    /// Original glob
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Compiled regex
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl fmt::Debug for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlPattern")
            .field("glob", &self.glob)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(glob: &str, url: &str) -> bool {
        UrlPattern::compile(glob).unwrap().is_match(url)
    }

    #[test]
    fn test_literal_matches_only_itself() {
        let url = "https://example.com/index.html";
        assert!(matches(url, url));
        assert!(!matches(url, "https://example.com/index.htm"));
        assert!(!matches(url, "https://example.com/index.html?x=1"));
        assert!(!matches(url, "xhttps://example.com/index.html"));
    }

    #[test]
    fn test_star_matches_any_run() {
        assert!(matches("*://example.com/*", "https://example.com/x"));
        assert!(matches("*://example.com/*", "http://example.com/"));
        assert!(matches("*.js", ".js"));
        assert!(matches("*.js", "https://cdn.example.com/a/b/c.js"));
        assert!(!matches("*.js", "https://cdn.example.com/app.jsx"));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        assert!(matches("https://example.com/v?/api", "https://example.com/v1/api"));
        assert!(!matches("https://example.com/v?/api", "https://example.com/v/api"));
        assert!(!matches("https://example.com/v?/api", "https://example.com/v12/api"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert!(matches("https://a.b/(x)+[y]{2}|$^", "https://a.b/(x)+[y]{2}|$^"));
        assert!(!matches("https://a.b/c", "https://aXb/c"));
        assert!(!matches("a+b", "aab"));
        assert!(matches("*\\d*", "path\\d/file"));
        assert!(!matches("*\\d*", "path5/file"));
    }

    #[test]
    fn test_star_spans_newlines() {
        assert!(matches("data:*", "data:text/plain,a\nb"));
    }

    #[test]
    fn test_universal_patterns() {
        assert!(UrlPattern::compile("").unwrap().is_universal());
        assert!(UrlPattern::compile("*").unwrap().is_universal());
        assert!(UrlPattern::compile("**").unwrap().is_universal());
        assert!(!UrlPattern::compile("*.png").unwrap().is_universal());
        assert!(matches("*", ""));
        assert!(matches("", ""));
        assert!(!matches("", "https://example.com"));
    }

    #[test]
    fn test_regex_source() {
        assert_eq!(get_url_pattern_regex("*.js"), r"^(?s:.*\.js)$");
        assert_eq!(get_url_pattern_regex("a?c"), "^(?s:a.c)$");
    }
}
