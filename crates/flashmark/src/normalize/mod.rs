//! In-place tree normalization between the two dialects

mod from_html;
mod from_markdown;

pub use from_html::normalize_html;
pub use from_markdown::normalize_markdown;

use crate::tree::Element;

/// Transient table attribute marking a table parsed without a header row
pub const HEADERLESS_ATTRIBUTE: &str = "headerless";

/// Renames `element` by the first matching `(from, to)` pair
fn rename_tag(element: &mut Element, pairs: &[(&str, &str)]) {
    if let Some((_, to)) = pairs.iter().find(|(from, _)| element.tag == *from) {
        element.tag = (*to).to_string();
    }
}
