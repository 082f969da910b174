//! Cloze ordinal scanning

use regex::Regex;
use std::sync::LazyLock;

static CLOZE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{c(\d+)::").expect("cloze regex is valid"));

/// Highest cloze ordinal `N` of any `{{cN::` marker, 0 when there is none
pub fn max_ordinal(text: &str) -> u32 {
    CLOZE_ORDINAL
        .captures_iter(text)
        .filter_map(|captures| captures.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}
