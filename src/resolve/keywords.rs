// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Keyword resolution over a [`ReadingIndex`].
//!
//! A keyword set is tried in three progressively looser tiers. Each tier
//! scans the whole index before the next one starts, and the first hit
//! inside a tier wins:
//!
//! 1. [`MatchTier::Exact`]: label equals a keyword (keyword order, then index order).
//! 2. [`MatchTier::Substring`]: label contains a keyword (keyword order, then index order).
//! 3. [`MatchTier::Token`]: label contains one word of any keyword (index
//!    order, then token order).
//!
//! Tokens are literal whole words. Abbreviations are not derived, so
//! `"package power"` never matches a label that only says `"Pkg Pwr"`.

use serde::Serialize;

use crate::resolve::index::ReadingIndex;

/// Characters that split a keyword phrase into tokens.
pub const TOKEN_DELIMITERS: &[char] = &[' ', '[', ']', '_', '-'];

/// Tokens shorter than this are ignored.
pub const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Substring,
    Token,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "exact"),
            MatchTier::Substring => write!(f, "substring"),
            MatchTier::Token => write!(f, "token"),
        }
    }
}

/// A successful keyword match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub tier: MatchTier,
    /// Keyword, or keyword token for [`MatchTier::Token`], that matched.
    pub pattern: String,
    pub label: &'a str,
    pub value: &'a str,
}

/// Split keyword phrases into lower-cased tokens, in the order they appear.
pub fn keyword_tokens<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords
        .iter()
        .flat_map(|keyword| {
            keyword
                .as_ref()
                .split(TOKEN_DELIMITERS)
                .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Find the index entry that best matches `keywords`.
///
/// Blank keywords are ignored; an empty keyword set or an empty index
/// resolves to `None`.
pub fn resolve<'a, S: AsRef<str>>(
    index: &'a ReadingIndex,
    keywords: &[S],
) -> Option<Resolution<'a>> {
    let folded: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref())
        .filter(|k| !k.trim().is_empty())
        .map(str::to_lowercase)
        .collect();

    for keyword in &folded {
        if let Some(entry) = index.iter().find(|entry| entry.folded() == keyword) {
            return Some(Resolution {
                tier: MatchTier::Exact,
                pattern: keyword.clone(),
                label: entry.label(),
                value: entry.value(),
            });
        }
    }

    for keyword in &folded {
        if let Some(entry) = index
            .iter()
            .find(|entry| entry.folded().contains(keyword.as_str()))
        {
            return Some(Resolution {
                tier: MatchTier::Substring,
                pattern: keyword.clone(),
                label: entry.label(),
                value: entry.value(),
            });
        }
    }

    let tokens = keyword_tokens(keywords);
    for entry in index {
        if let Some(token) = tokens.iter().find(|t| entry.folded().contains(t.as_str())) {
            return Some(Resolution {
                tier: MatchTier::Token,
                pattern: token.clone(),
                label: entry.label(),
                value: entry.value(),
            });
        }
    }

    None
}

/// Like [`resolve`] but only returns the raw value.
pub fn resolve_value<'a, S: AsRef<str>>(index: &'a ReadingIndex, keywords: &[S]) -> Option<&'a str> {
    resolve(index, keywords).map(|resolution| resolution.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(pairs: &[(&str, &str)]) -> ReadingIndex {
        let mut index = ReadingIndex::new();
        for (label, value) in pairs {
            index.insert(*label, *value);
        }
        index
    }

    #[test]
    fn test_exact_is_case_insensitive() {
        let index = index_of(&[("POWER", "12")]);
        let resolution = resolve(&index, &["Power"]).unwrap();
        assert_eq!(resolution.tier, MatchTier::Exact);
        assert_eq!(resolution.value, "12");
    }

    #[test]
    fn test_exact_beats_earlier_substring() {
        // "package power" is a substring of the first entry, but a later
        // keyword names the second entry exactly.
        let index = index_of(&[("CPU Package Power [W]", "22.17"), ("Power", "99")]);
        let resolution = resolve(&index, &["package power", "power"]).unwrap();
        assert_eq!(resolution.tier, MatchTier::Exact);
        assert_eq!(resolution.value, "99");
    }

    #[test]
    fn test_substring_keyword_priority() {
        let index = index_of(&[("GPU Power", "150"), ("CPU Package Power [W]", "22.17")]);
        let resolution = resolve(&index, &["package power", "power"]).unwrap();
        assert_eq!(resolution.tier, MatchTier::Substring);
        assert_eq!(resolution.label, "CPU Package Power [W]");
        assert_eq!(resolution.value, "22.17");
    }

    #[test]
    fn test_substring_tie_break_is_insertion_order() {
        let index = index_of(&[("Core 0 Temp", "55"), ("Core 1 Temp", "57")]);
        assert_eq!(resolve_value(&index, &["temp"]), Some("55"));
    }

    #[test]
    fn test_token_tier_is_entry_major() {
        // No exact or substring hit for either phrase. The first entry
        // matches the later token "clock", and entry order wins.
        let index = index_of(&[("Ring Clock (avg)", "4100"), ("Effective CPU speed", "3900")]);
        let resolution = resolve(&index, &["cpu frequency", "package clock"]).unwrap();
        assert_eq!(resolution.tier, MatchTier::Token);
        assert_eq!(resolution.pattern, "clock");
        assert_eq!(resolution.value, "4100");
    }

    #[test]
    fn test_token_tier_splits_on_punctuation() {
        assert_eq!(
            keyword_tokens(&["power [w]", "cpu_package-temp"]),
            vec!["power", "cpu", "package", "temp"]
        );
    }

    #[test]
    fn test_token_tier_does_not_abbreviate() {
        let index = index_of(&[("Pkg Pwr Sensor 1", "30")]);
        assert_eq!(resolve(&index, &["package power"]), None);
    }

    #[test]
    fn test_short_tokens_are_dropped() {
        // "w" alone would match almost anything
        let index = index_of(&[("Fan Speed w/ PWM", "1200")]);
        assert_eq!(resolve(&index, &["[w]"]), None);
    }

    #[test]
    fn test_not_found_and_empty_inputs() {
        let index = index_of(&[("Vcore", "1.2")]);
        assert_eq!(resolve(&index, &["temperature"]), None);

        let empty: [&str; 0] = [];
        assert_eq!(resolve(&index, &empty), None);
        assert_eq!(resolve(&ReadingIndex::new(), &["power"]), None);
    }

    #[test]
    fn test_blank_keywords_are_ignored() {
        let index = index_of(&[("Vcore", "1.2")]);
        assert_eq!(resolve(&index, &["", "  "]), None);
    }
}
