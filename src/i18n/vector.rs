//! Character-frequency vectors for fuzzy name matching.
//!
//! A [`NameVector`] is a sparse multiset of the Unicode scalar values found in
//! a display string after preprocessing. Registry names and user queries must
//! go through the same [`preprocess`] step, otherwise their vectors are not
//! comparable.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Characters removed by [`remove_whitespace`].
///
/// This is wider than `char::is_whitespace`: it also covers zero-width
/// characters, fillers and the visible control-picture glyphs that show up in
/// copy-pasted text.
const WHITESPACES: &[char] = &[
    '\u{0009}', '\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0020}', '\u{0085}', '\u{00A0}',
    '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}',
    '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{2028}', '\u{2029}', '\u{202F}', '\u{205F}',
    '\u{3000}', '\u{180E}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}', '\u{00B7}',
    '\u{21A1}', '\u{2261}', '\u{237D}', '\u{23CE}', '\u{2409}', '\u{240A}', '\u{240B}', '\u{240C}',
    '\u{240D}', '\u{2420}', '\u{2422}', '\u{2423}', '\u{2424}', '\u{25B3}', '\u{2A5B}', '\u{2AAA}',
    '\u{2AAB}', '\u{3037}', '\u{2800}', '\u{3164}', '\u{115F}', '\u{1160}', '\u{FFA0}',
];

// Greedy: "a (b) c (d)" loses everything from the first "(" to the last ")".
static PARENTHETICAL_REGEX: OnceLock<Regex> = OnceLock::new();

fn parenthetical_regex() -> &'static Regex {
    PARENTHETICAL_REGEX.get_or_init(|| Regex::new(r"\(.+\)").expect("Invalid parenthetical regex"))
}

/// Whether `c` counts as whitespace for name matching.
pub fn is_broad_whitespace(c: char) -> bool {
    c.is_whitespace() || WHITESPACES.contains(&c)
}

/// Remove every broad whitespace character from `text`.
pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !is_broad_whitespace(*c)).collect()
}

/// Preprocess a string for fuzzy matching.
///
/// Lower-cases, strips any parenthetical annotation and removes all broad
/// whitespace: `"Chinese (Simplified)"` becomes `"chinese"`.
pub fn preprocess(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = parenthetical_regex().replace_all(&lowered, "");
    remove_whitespace(&stripped)
}

/// Immutable character-frequency representation of a display string.
#[derive(Debug, Clone, PartialEq)]
pub struct NameVector {
    source: String,
    owner: String,
    counts: HashMap<char, u32>,
    norm_squared: u64,
    magnitude: f64,
}

impl NameVector {
    /// Build a vector for `raw`, owned by the identity `owner`.
    pub fn new(owner: impl Into<String>, raw: &str) -> Self {
        let source = preprocess(raw);

        let mut counts: HashMap<char, u32> = HashMap::new();
        for c in source.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }

        let norm_squared: u64 = counts.values().map(|&n| u64::from(n) * u64::from(n)).sum();

        Self {
            source,
            owner: owner.into(),
            counts,
            norm_squared,
            magnitude: (norm_squared as f64).sqrt(),
        }
    }

    /// The preprocessed string this vector was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Id of the language or translator this name belongs to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Occurrences of `c` in the preprocessed string.
    pub fn count(&self, c: char) -> u32 {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    /// Distinct characters present.
    pub fn character_set(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().copied()
    }

    /// Number of distinct characters.
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    pub(crate) fn counts(&self) -> &HashMap<char, u32> {
        &self.counts
    }

    /// Sum of squared counts, kept exact so similarity stays symmetric.
    pub(crate) fn norm_squared(&self) -> u64 {
        self.norm_squared
    }

    /// Euclidean norm of the count vector.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// An empty vector matches nothing, itself included.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Vectorize a query string that has no owner.
pub fn vectorize(raw: &str) -> NameVector {
    NameVector::new("", raw)
}
