//! Phrasing content

use super::block::longest_run;
use super::escape::{Surroundings, escape_text};
use super::{MarkdownRenderer, RenderError};
use crate::config::HardBreak;
use crate::markdown::ext::{Directive, MEDIA_DIRECTIVES, Mark};
use markdown::mdast::{Image, InlineCode, Link, MdxJsxTextElement, Node};

/// Stand-in for the first or last character of a non-text sibling
const OBJECT: char = '\u{FFFC}';

/// Where phrasing content is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub in_table: bool,
    /// Hard breaks collapse to spaces
    pub single_line: bool,
}

impl Scope {
    pub const BLOCK: Scope = Scope {
        in_table: false,
        single_line: false,
    };
    pub const HEADING: Scope = Scope {
        in_table: false,
        single_line: true,
    };
    pub const CELL: Scope = Scope {
        in_table: true,
        single_line: true,
    };
}

/// What precedes the content being rendered
#[derive(Debug, Clone, Copy)]
struct Lead {
    before: Option<char>,
    line_start: bool,
}

impl Lead {
    const LINE_START: Lead = Lead {
        before: None,
        line_start: true,
    };

    fn after(c: char) -> Lead {
        Lead {
            before: Some(c),
            line_start: false,
        }
    }

    /// Lead for the next sibling, given what the container holds so far
    fn following(self, rendered: &str) -> Lead {
        match rendered.chars().next_back() {
            None => self,
            Some('\n') => Lead::LINE_START,
            Some(c) => Lead::after(c),
        }
    }
}

pub fn is_phrasing(node: &Node) -> bool {
    matches!(
        node,
        Node::Text(_)
            | Node::Emphasis(_)
            | Node::Strong(_)
            | Node::Delete(_)
            | Node::Break(_)
            | Node::InlineCode(_)
            | Node::Link(_)
            | Node::Image(_)
            | Node::LinkReference(_)
            | Node::ImageReference(_)
            | Node::Html(_)
            | Node::MdxJsxTextElement(_)
    )
}

/// Node type name for error messages
pub fn kind(node: &Node) -> String {
    let debug = format!("{node:?}");
    debug.split('(').next().unwrap_or_default().to_string()
}

/// First character `node` renders with, as seen by the text before it
fn edge_char(node: &Node) -> char {
    match node {
        Node::Text(text) => text.value.chars().next().unwrap_or(' '),
        Node::Break(_) => '\n',
        Node::Emphasis(emphasis) => attention_edge(&emphasis.children, '*'),
        Node::Strong(strong) => attention_edge(&strong.children, '*'),
        Node::Delete(delete) => attention_edge(&delete.children, '~'),
        Node::InlineCode(_) => '`',
        Node::Link(_) | Node::LinkReference(_) => '[',
        Node::Image(_) | Node::ImageReference(_) => '!',
        Node::MdxJsxTextElement(element)
            if element.name.as_deref().is_some_and(|name| MEDIA_DIRECTIVES.contains(&name)) =>
        {
            ':'
        }
        _ => OBJECT,
    }
}

/// Attention markers move leading whitespace in front of themselves
fn attention_edge(children: &[Node], marker: char) -> char {
    match children.first() {
        Some(Node::Text(text)) if text.value.starts_with([' ', '\t', '\n']) => ' ',
        _ => marker,
    }
}

impl MarkdownRenderer {
    /// Renders phrasing content that starts a line
    pub(super) fn inline(&self, children: &[Node], scope: Scope) -> Result<String, RenderError> {
        self.inline_between(children, scope, Lead::LINE_START, None)
    }

    /// Renders phrasing content between `lead` and the character `trail`
    fn inline_between(
        &self,
        children: &[Node],
        scope: Scope,
        lead: Lead,
        trail: Option<char>,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        for (index, node) in children.iter().enumerate() {
            let after = children.get(index + 1).map(edge_char).or(trail);
            let lead = lead.following(&out);
            self.phrasing(node, scope, lead, after, &mut out)?;
        }
        Ok(out)
    }

    fn phrasing(
        &self,
        node: &Node,
        scope: Scope,
        lead: Lead,
        after: Option<char>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        match node {
            Node::Text(text) => {
                let value = if scope.single_line {
                    text.value.replace('\n', " ")
                } else {
                    text.value.clone()
                };
                let around = Surroundings {
                    before: lead.before,
                    after,
                    line_start: lead.line_start,
                    in_table: scope.in_table,
                };
                out.push_str(&escape_text(&value, &self.rules, around));
            }
            Node::Emphasis(emphasis) => self.attention("*", &emphasis.children, scope, out)?,
            Node::Strong(strong) => self.attention("**", &strong.children, scope, out)?,
            Node::Delete(delete) => self.attention("~~", &delete.children, scope, out)?,
            // A line holding only spaces would be blank, so a break that
            // starts a line takes the escape form
            Node::Break(_) => out.push_str(match (scope.single_line, self.options.hard_break) {
                (true, _) => " ",
                (false, HardBreak::Spaces) if !lead.line_start => "  \n",
                (false, _) => "\\\n",
            }),
            Node::InlineCode(code) => out.push_str(&inline_code(code, scope)),
            Node::Link(link) => self.link(link, scope, out)?,
            Node::Image(image) => out.push_str(&self.image(image)),
            Node::Html(html) => out.push_str(&html.value),
            Node::MdxJsxTextElement(element) => self.text_element(element, scope, out)?,
            other => match other.children() {
                Some(children) => out.push_str(&self.inline_between(children, scope, lead, after)?),
                None => return Err(RenderError::UnsupportedNode(kind(other))),
            },
        }
        Ok(())
    }

    /// Wraps content in `marker`, moving edge whitespace outside the markers
    fn attention(&self, marker: &str, children: &[Node], scope: Scope, out: &mut String) -> Result<(), RenderError> {
        let open = marker.chars().next_back().map(Lead::after).unwrap_or(Lead::LINE_START);
        let content = self.inline_between(children, scope, open, marker.chars().next())?;
        let is_space = |c: char| matches!(c, ' ' | '\t' | '\n');
        let core = content.trim_matches(is_space);
        if core.is_empty() {
            out.push_str(&content);
            return Ok(());
        }
        let leading = &content[..content.len() - content.trim_start_matches(is_space).len()];
        let trailing = &content[content.trim_end_matches(is_space).len()..];

        out.push_str(leading);
        out.push_str(marker);
        out.push_str(core);
        out.push_str(marker);
        out.push_str(trailing);
        Ok(())
    }

    fn text_element(&self, element: &MdxJsxTextElement, scope: Scope, out: &mut String) -> Result<(), RenderError> {
        let name = element.name.as_deref().unwrap_or_default();
        if let Some(mark) = Mark::from_tag(name) {
            let delimiter = mark.delimiter().to_string();
            return self.attention(&delimiter, &element.children, scope, out);
        }
        if MEDIA_DIRECTIVES.contains(&name) {
            if let Some(directive) = Directive::from_element(element) {
                out.push_str(&self.directive(&directive));
                return Ok(());
            }
        }
        out.push_str(&self.inline_between(&element.children, scope, Lead::after(OBJECT), None)?);
        Ok(())
    }

    fn directive(&self, directive: &Directive) -> String {
        let label = escape_text(
            &directive.label,
            &self.rules,
            Surroundings {
                before: Some('['),
                after: Some(']'),
                ..Surroundings::default()
            },
        )
        .replace(']', "\\]");

        let mut rendered = format!(":{}[{label}]", directive.name);
        if !directive.attributes.is_empty() {
            let attributes: Vec<String> = directive
                .attributes
                .iter()
                .map(|(name, value)| match value.as_str() {
                    "" => name.clone(),
                    value if value.contains('"') => format!("{name}='{value}'"),
                    value => format!("{name}=\"{value}\""),
                })
                .collect();
            rendered.push('{');
            rendered.push_str(&attributes.join(" "));
            rendered.push('}');
        }
        rendered
    }

    fn link(&self, link: &Link, scope: Scope, out: &mut String) -> Result<(), RenderError> {
        if is_autolink(link) {
            out.push('<');
            out.push_str(&link.url);
            out.push('>');
            return Ok(());
        }
        let text = self.inline_between(&link.children, scope, Lead::after('['), Some(']'))?;
        out.push('[');
        out.push_str(&text);
        out.push_str("](");
        out.push_str(&destination(&link.url));
        out.push_str(&title(link.title.as_deref()));
        out.push(')');
        Ok(())
    }

    fn image(&self, image: &Image) -> String {
        let alt = escape_text(
            &image.alt,
            &self.rules,
            Surroundings {
                before: Some('['),
                after: Some(']'),
                ..Surroundings::default()
            },
        );
        format!(
            "![{alt}]({}{})",
            destination(&image.url),
            title(image.title.as_deref())
        )
    }
}

fn is_autolink(link: &Link) -> bool {
    let [Node::Text(text)] = link.children.as_slice() else {
        return false;
    };
    link.title.is_none()
        && text.value == link.url
        && ["http://", "https://", "mailto:"]
            .iter()
            .any(|scheme| link.url.starts_with(scheme))
        && !link.url.chars().any(|c| c.is_whitespace() || c == '<' || c == '>')
}

fn destination(url: &str) -> String {
    let balanced = url.chars().fold(0i32, |depth, c| match c {
        '(' => depth + 1,
        ')' if depth > 0 => depth - 1,
        ')' => i32::MIN / 2,
        _ => depth,
    }) == 0;
    if url.is_empty() || !balanced || url.chars().any(|c| c.is_whitespace() || c.is_control() || c == '<' || c == '>') {
        format!("<{}>", url.replace('<', "\\<").replace('>', "\\>"))
    } else {
        url.to_string()
    }
}

fn title(title: Option<&str>) -> String {
    match title {
        Some(title) => format!(" \"{}\"", title.replace('"', "\\\"")),
        None => String::new(),
    }
}

fn inline_code(code: &InlineCode, scope: Scope) -> String {
    let value = if scope.in_table {
        code.value.replace('|', "\\|")
    } else {
        code.value.clone()
    };
    let fence = "`".repeat(longest_run(&value, '`') + 1);
    let pad = value.starts_with('`')
        || value.ends_with('`')
        || (value.starts_with(' ') && value.ends_with(' ') && !value.trim().is_empty());
    if pad {
        format!("{fence} {value} {fence}")
    } else {
        format!("{fence}{value}{fence}")
    }
}
