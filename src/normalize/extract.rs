//! Token extraction strategies.
//!
//! A raw line may carry a bare URL, a "Title: link" pair, or arbitrary
//! text. Extraction walks an ordered list of strategies and returns the
//! first one that yields a non-empty token, so the fallback policy stays
//! auditable and each branch can be tested on its own.

use std::sync::OnceLock;

use regex::Regex;

/// Extraction strategy that produced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// First `http(s)://` substring in the line
    UrlPattern,
    /// Text after the last `:`
    ColonSplit,
    /// Last whitespace-delimited token
    WhitespaceSplit,
    /// The whole line
    WholeLine,
}

/// Token extracted from a raw line, with the strategy that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub token: &'a str,
    pub strategy: Strategy,
}

impl Extracted<'_> {
    /// Whether the token was matched as an HTTP(S) URL.
    pub fn is_url(&self) -> bool {
        self.strategy == Strategy::UrlPattern
    }
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://\S+").expect("valid URL pattern"))
}

/// Extract the comparison token from a line.
///
/// Strategies are tried in order; a strategy that yields an empty token
/// (e.g. a line ending in `:`) does not match and the next one is tried.
/// `WholeLine` always matches, so extraction is total.
pub fn extract(line: &str) -> Extracted<'_> {
    if let Some(m) = url_pattern().find(line) {
        return Extracted {
            token: m.as_str(),
            strategy: Strategy::UrlPattern,
        };
    }

    if let Some((_, rest)) = line.rsplit_once(':') {
        let token = rest.trim();
        if !token.is_empty() {
            return Extracted {
                token,
                strategy: Strategy::ColonSplit,
            };
        }
    }

    if line.trim().contains(char::is_whitespace) {
        if let Some(token) = line.split_whitespace().last() {
            return Extracted {
                token,
                strategy: Strategy::WhitespaceSplit,
            };
        }
    }

    Extracted {
        token: line.trim(),
        strategy: Strategy::WholeLine,
    }
}
