//! Turns raw OCR text into a species name.

use anyhow::{anyhow, Result};
use regex::Regex;

use super::similarity::best_match;

/// Outcome of resolving one OCR string.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Text after level stripping, filtering, truncation and capitalization
    pub cleaned: String,
    /// Matched species name, or `cleaned` when nothing was close enough
    pub name: String,
    /// Similarity of the match (None when unmatched)
    pub score: Option<f64>,
}

/// Cleans OCR text and fuzzy-matches it against the recognized name set.
#[derive(Clone, Debug)]
pub struct NameResolver {
    names: Vec<String>,
    cutoff: f64,
    level: Option<Regex>,
    whitespace: Regex,
    disallowed: Regex,
}

impl NameResolver {
    /// Creates a resolver over `names`.
    ///
    /// `level_prefixes` are the tokens that introduce a level indicator
    /// ("Lv", "Nv"); matching is case-insensitive.
    pub fn new(names: Vec<String>, level_prefixes: &[String], cutoff: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(anyhow!("Match cutoff must be within 0.0-1.0, got {}", cutoff));
        }

        let level = if level_prefixes.is_empty() {
            None
        } else {
            let alternation = level_prefixes
                .iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)({})[.\s]*\d+", alternation))?)
        };

        Ok(Self {
            names,
            cutoff,
            level,
            whitespace: Regex::new(r"\s+")?,
            disallowed: Regex::new(r"[^a-zA-Z\- ]")?,
        })
    }

    /// Normalizes raw OCR text down to a single capitalized word.
    ///
    /// Only the first space-separated token survives, so multi-word names
    /// are truncated.
    pub fn clean_text(&self, raw: &str) -> String {
        let text = match &self.level {
            Some(level) => level.replace_all(raw, ""),
            None => raw.into(),
        };
        let text = self.whitespace.replace_all(&text, " ");
        let text = self.disallowed.replace_all(&text, "");
        let first = text.trim().split(' ').next().unwrap_or("");
        capitalize(first)
    }

    /// Best-guess species name for raw OCR text.
    ///
    /// When nothing reaches the cutoff, `name` is the cleaned text itself.
    /// No match is never an error.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let cleaned = self.clean_text(raw);
        match best_match(&cleaned, &self.names, self.cutoff) {
            Some((name, score)) => Resolution {
                name: name.to_string(),
                cleaned,
                score: Some(score),
            },
            None => Resolution {
                name: cleaned.clone(),
                cleaned,
                score: None,
            },
        }
    }
}

/// First character upper-case, the rest lower-case.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
