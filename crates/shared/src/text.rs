//! Text helpers shared by the aggregator, the ranker and the categorizer.
//!
//! Ingredients carry free-text names, so every cross-recipe comparison goes
//! through one of these functions instead of comparing raw strings.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Key used to merge ingredients: surrounding whitespace removed, lowercased.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Like [`normalize_key`] but also strips diacritics ("Lök" -> "lok").
pub fn fold(name: &str) -> String {
    normalize_key(name)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Swedish alphabetical order for display lists. Case and most accents are
/// ignored, while å, ä and ö are letters of their own sorted after z.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(value: &str) -> String {
    // '{', '|' and '}' are the code points right after 'z'.
    value
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'å' => '{',
            'ä' | 'æ' => '|',
            'ö' | 'ø' => '}',
            other => other,
        })
        .collect::<String>()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Half-up rounding to two decimals, applied to every scaled quantity.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
