//! Headerless GFM tables
//!
//! GFM requires a header row, so a table written as a delimiter row
//! followed by body rows is not a table at all. The delimiter row is moved
//! below the first body row and the table's starting line is recorded so
//! the promoted row can be demoted again after descent.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static DELIMITER_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|?\s*:?-+:?\s*(\|\s*:?-+:?\s*)*\|?$").expect("delimiter row regex is valid")
});

/// Source with headerless tables repaired, plus their 1-based start lines
#[derive(Debug, Default)]
pub struct HeaderlessTables {
    pub source: String,
    pub lines: HashSet<usize>,
}

pub fn swap_headerless(source: &str) -> HeaderlessTables {
    let mut lines: Vec<&str> = source.split('\n').collect();
    let mut starts = HashSet::new();
    let mut fence: Option<char> = None;

    let mut index = 0;
    while index < lines.len() {
        let trimmed = lines[index].trim();
        if let Some(marker) = fence_marker(trimmed) {
            match fence {
                Some(open) if open == marker => fence = None,
                None => fence = Some(marker),
                Some(_) => {}
            }
            index += 1;
            continue;
        }
        if fence.is_none()
            && is_delimiter_row(trimmed)
            && (index == 0 || lines[index - 1].trim().is_empty())
            && lines
                .get(index + 1)
                .is_some_and(|next| next.contains('|') && !is_delimiter_row(next.trim()))
        {
            lines.swap(index, index + 1);
            starts.insert(index + 1);
            index += 2;
            continue;
        }
        index += 1;
    }

    if !starts.is_empty() {
        tracing::debug!(tables = starts.len(), "repaired headerless tables");
    }
    HeaderlessTables {
        source: lines.join("\n"),
        lines: starts,
    }
}

fn is_delimiter_row(line: &str) -> bool {
    line.contains('|') && DELIMITER_ROW.is_match(line)
}

fn fence_marker(line: &str) -> Option<char> {
    ['`', '~']
        .into_iter()
        .find(|marker| line.chars().take(3).filter(|c| c == marker).count() == 3)
}
