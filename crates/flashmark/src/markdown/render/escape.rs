//! Backslash escaping of literal text
//!
//! Only characters that would otherwise start a construct are escaped, so
//! ordinary prose stays readable.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
        .expect("entity regex is valid")
});

/// Which extension constructs are live in the output dialect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscapeRules {
    pub mark_delimiters: Vec<char>,
    pub strikethrough: bool,
    pub single_tilde: bool,
    pub definition_lists: bool,
    pub inline_media: bool,
}

/// Characters around the text being escaped
#[derive(Debug, Clone, Copy, Default)]
pub struct Surroundings {
    pub before: Option<char>,
    pub after: Option<char>,
    pub line_start: bool,
    pub in_table: bool,
}

pub fn escape_text(value: &str, rules: &EscapeRules, around: Surroundings) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len() + 4);
    let mut ordinal_delimiter: Option<usize> = None;

    for (index, &c) in chars.iter().enumerate() {
        let at_line_start = if index == 0 {
            around.line_start
        } else {
            chars[index - 1] == '\n'
        };
        let before = if index == 0 {
            if around.line_start { None } else { around.before }
        } else {
            Some(chars[index - 1])
        };
        let after = chars.get(index + 1).copied().or(around.after);

        if at_line_start {
            ordinal_delimiter = ordered_marker_delimiter(&chars[index..]).map(|at| index + at);
        }

        let escape = ordinal_delimiter == Some(index)
            || (at_line_start && starts_block(&chars[index..], rules))
            || escapes_inline(c, before, after, &chars[index..], rules, around.in_table);
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Offset of the `.`/`)` in a line starting like `12. `
fn ordered_marker_delimiter(line: &[char]) -> Option<usize> {
    let digits = line.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    match (line.get(digits), line.get(digits + 1)) {
        (Some('.' | ')'), None | Some(' ' | '\t' | '\n')) => Some(digits),
        _ => None,
    }
}

/// True when the line would open a block construct at its first character
fn starts_block(line: &[char], rules: &EscapeRules) -> bool {
    let end = line.iter().position(|c| *c == '\n').unwrap_or(line.len());
    let line = &line[..end];
    let first = line[0];
    let second = line.get(1).copied();
    let spaced = matches!(second, None | Some(' ' | '\t'));

    match first {
        '#' => {
            let run = line.iter().take_while(|c| **c == '#').count();
            run <= 6 && matches!(line.get(run), None | Some(' ' | '\t'))
        }
        '>' => true,
        '-' | '+' => spaced || line.iter().all(|c| *c == first || *c == ' '),
        '=' => line.iter().all(|c| *c == '=' || *c == ' '),
        '~' => line.iter().take(3).filter(|c| **c == '~').count() == 3,
        ':' => rules.definition_lists && spaced && second.is_some(),
        _ => false,
    }
}

fn escapes_inline(
    c: char,
    before: Option<char>,
    after: Option<char>,
    rest: &[char],
    rules: &EscapeRules,
    in_table: bool,
) -> bool {
    match c {
        '*' | '`' | '[' => true,
        '\\' => after.is_none_or(|next| next.is_ascii_punctuation() || next == '\n'),
        '_' => !(before.is_some_and(char::is_alphanumeric) && after.is_some_and(char::is_alphanumeric)),
        '<' => after.is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')),
        '&' => ENTITY.is_match(&rest.iter().collect::<String>()),
        '|' => in_table,
        ':' if rules.inline_media => {
            let following: String = rest.iter().skip(1).take(6).collect();
            following == "audio[" || following == "video["
        }
        '~' if rules.strikethrough && (rules.single_tilde || before == Some('~') || after == Some('~')) => true,
        _ if rules.mark_delimiters.contains(&c) => {
            let single = before != Some(c) && after != Some(c);
            let opens = after.is_some_and(|next| !next.is_whitespace())
                && !before.is_some_and(char::is_alphanumeric);
            let closes = before.is_some_and(|previous| !previous.is_whitespace())
                && !after.is_some_and(char::is_alphanumeric);
            single && (opens || closes)
        }
        _ => false,
    }
}
