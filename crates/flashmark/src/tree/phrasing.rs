//! Phrasing (inline) classification
//!
//! Closed set: every tag not listed here is flow content.

const PHRASING_TAGS: &[&str] = &[
    "a", "abbr", "audio", "b", "bdi", "bdo", "big", "br", "button", "cite", "code", "data",
    "datalist", "del", "dfn", "em", "embed", "font", "i", "iframe", "img", "input", "ins", "kbd",
    "label", "mark", "math", "meter", "noscript", "object", "output", "picture", "progress", "q",
    "ruby", "s", "samp", "script", "select", "small", "span", "strike", "strong", "sub", "sup",
    "svg", "template", "textarea", "time", "tt", "u", "var", "video", "wbr",
];

/// True when `tag` is phrasing content
pub fn is_phrasing_tag(tag: &str) -> bool {
    PHRASING_TAGS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tags_are_never_phrasing() {
        let block = [
            "p", "ul", "ol", "li", "table", "thead", "tbody", "tr", "th", "td", "dl", "dt", "dd",
            "h1", "h2", "h3", "h4", "h5", "h6", "div", "blockquote", "pre",
        ];
        for tag in block {
            assert!(!is_phrasing_tag(tag), "{tag} must be flow");
        }
    }

    #[test]
    fn test_inline_tags_are_phrasing() {
        for tag in ["br", "i", "b", "em", "strong", "u", "sup", "sub", "del", "a", "img", "video"] {
            assert!(is_phrasing_tag(tag), "{tag} must be phrasing");
        }
    }
}
