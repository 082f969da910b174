//! Backslash escapes for extension delimiters
//!
//! CommonMark drops the backslash of `\=` before any extension pass runs,
//! so an escaped delimiter would be indistinguishable from a live one.
//! Escaped delimiters are swapped for private-use placeholders before
//! parsing and restored once the extension passes are done. Media
//! directive labels get the same treatment for emphasis characters, since
//! the generic parser knows nothing about directives.

use markdown::mdast::Node;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Placeholder, its prose form and its source form
struct Placeholder {
    placeholder: char,
    prose: char,
    source: &'static str,
}

const PLACEHOLDERS: &[Placeholder] = &[
    Placeholder { placeholder: '\u{E000}', prose: '=', source: "\\=" },
    Placeholder { placeholder: '\u{E001}', prose: '^', source: "\\^" },
    Placeholder { placeholder: '\u{E002}', prose: '~', source: "\\~" },
    Placeholder { placeholder: '\u{E003}', prose: ':', source: "\\:" },
    Placeholder { placeholder: '\u{E004}', prose: '_', source: "_" },
    Placeholder { placeholder: '\u{E005}', prose: '_', source: "\\_" },
    Placeholder { placeholder: '\u{E006}', prose: '*', source: "*" },
    Placeholder { placeholder: '\u{E007}', prose: '*', source: "\\*" },
];

static MEDIA_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":(audio|video)\[([^\]\n]*)\]").expect("media label regex is valid")
});

fn placeholder_for(source: &str) -> Option<char> {
    PLACEHOLDERS
        .iter()
        .find(|entry| entry.source == source)
        .map(|entry| entry.placeholder)
}

fn lookup(placeholder: char) -> Option<&'static Placeholder> {
    PLACEHOLDERS.iter().find(|entry| entry.placeholder == placeholder)
}

/// Protects escaped delimiters and, when `directives` is set, the
/// emphasis characters of media directive labels
pub fn protect<'a>(source: &'a str, delimiters: &[char], directives: bool) -> Cow<'a, str> {
    let source = if directives {
        MEDIA_LABEL.replace_all(source, |captures: &Captures| {
            format!(":{}[{}]", &captures[1], protect_label(&captures[2]))
        })
    } else {
        Cow::Borrowed(source)
    };
    if delimiters.is_empty() || !source.contains('\\') {
        return source;
    }
    Cow::Owned(protect_delimiters(&source, delimiters))
}

/// Swaps `_` and `*` in a label, escaped or not, for placeholders
fn protect_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek().copied() {
                Some('\\') => {
                    out.push_str("\\\\");
                    chars.next();
                }
                Some(next @ ('_' | '*')) => {
                    let escaped = format!("\\{next}");
                    out.push(placeholder_for(&escaped).unwrap_or(next));
                    chars.next();
                }
                _ => out.push('\\'),
            },
            '_' | '*' => out.push(placeholder_for(&c.to_string()).unwrap_or(c)),
            c => out.push(c),
        }
    }
    out
}

/// Replaces `\d` with its placeholder for every active delimiter `d`
///
/// A `\\` pair is copied through so `\\=` keeps its live delimiter.
fn protect_delimiters(source: &str, delimiters: &[char]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('\\') => {
                out.push_str("\\\\");
                chars.next();
            }
            Some(next) if delimiters.contains(&next) => {
                match placeholder_for(&format!("\\{next}")) {
                    Some(placeholder) => out.push(placeholder),
                    None => {
                        out.push('\\');
                        out.push(next);
                    }
                }
                chars.next();
            }
            _ => out.push('\\'),
        }
    }
    out
}

/// Restores placeholders throughout the tree
///
/// Prose gets the bare character back; code gets the text it was written
/// with.
pub fn restore(node: &mut Node) {
    match node {
        Node::Text(text) => restore_value(&mut text.value, false),
        Node::InlineCode(code) => restore_value(&mut code.value, true),
        Node::Code(code) => restore_value(&mut code.value, true),
        Node::Html(html) => restore_value(&mut html.value, true),
        Node::Link(link) => {
            restore_value(&mut link.url, false);
            if let Some(title) = link.title.as_mut() {
                restore_value(title, false);
            }
        }
        Node::Image(image) => {
            restore_value(&mut image.url, false);
            restore_value(&mut image.alt, false);
        }
        _ => {}
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            restore(child);
        }
    }
}

fn restore_value(value: &mut String, keep_source: bool) {
    if !value.chars().any(|c| lookup(c).is_some()) {
        return;
    }
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match lookup(c) {
            Some(entry) if keep_source => out.push_str(entry.source),
            Some(entry) => out.push(entry.prose),
            None => out.push(c),
        }
    }
    *value = out;
}
