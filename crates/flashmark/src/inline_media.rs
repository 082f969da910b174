//! Inline media: `:audio[...]`/`:video[...]` directives and the host's
//! `<audio>`/`<video>` elements
//!
//! The label is the media filename, `_<id>.<ext>`. The host always emits
//! labels of that shape, so a label that does not match is a caller bug.

use crate::error::{FlashmarkError, Result};
use crate::markdown::ext::Directive;
use crate::tree::{Attributes, Element};
use regex::Regex;
use std::sync::LazyLock;

pub const INLINE_MEDIA_CLASS: &str = "inline-media";

/// Autoplay hook evaluated by the host's card renderer
const ONCANPLAY: &str = "if(this.getRootNode().querySelector('anki-editable') === null && this.offsetParent !== null && ((this.hasAttribute('auto_front') && !document.body.classList.contains('back')) || (this.hasAttribute('auto_back') && document.body.classList.contains('back')))) {this.play();}";
const ONCONTEXTMENU: &str = "pycmd(this.id); return true;";

const VIDEO_SIZE_ATTRIBUTES: &[&str] = &["height", "width"];

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_(.*)\.([^.]+)$").expect("media label regex is valid"));

/// Builds the host media element for a directive
///
/// # Errors
///
/// Returns `InlineMediaLabel` when the label is not `_<id>.<ext>`.
pub fn directive_to_element(directive: &Directive) -> Result<Element> {
    let id = LABEL
        .captures(&directive.label)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| FlashmarkError::InlineMediaLabel {
            label: directive.label.clone(),
        })?;

    let mut element = Element::new(&directive.name)
        .with_attr("id", id)
        .with_attr("src", directive.label.as_str())
        .with_attr("class", INLINE_MEDIA_CLASS)
        .with_attr("controls", "true");
    for (name, value) in &directive.attributes {
        element.attributes.set(name, value.as_str());
    }
    element.attributes.set("oncanplay", ONCANPLAY);
    element.attributes.set("oncontextmenu", ONCONTEXTMENU);

    tracing::trace!(media = %directive.name, label = %directive.label, "expanded media directive");
    Ok(element)
}

/// True for media elements the host created from a directive
pub fn is_inline_media(element: &Element) -> bool {
    matches!(element.tag.as_str(), "audio" | "video")
        && element.attributes.has_class(INLINE_MEDIA_CLASS)
}

/// Reads a directive back from a host media element
///
/// Returns `None` for media the host did not create as inline media.
pub fn element_to_directive(element: &Element) -> Option<Directive> {
    if !is_inline_media(element) {
        return None;
    }
    let attrs = &element.attributes;
    let mut attributes = Vec::new();

    push_flag(attrs, "auto_front", &mut attributes);
    push_flag(attrs, "auto_back", &mut attributes);
    if attrs.contains("loop") {
        attributes.push(("loop".to_string(), String::new()));
    }
    push_flag(attrs, "muted", &mut attributes);

    if element.is("video") {
        for name in VIDEO_SIZE_ATTRIBUTES {
            if let Some(value) = attrs.get(name) {
                if value.trim().parse::<i64>().is_ok_and(|size| size > -1) {
                    attributes.push((name.to_string(), value.trim().to_string()));
                }
            }
        }
    }

    Some(Directive {
        name: element.tag.clone(),
        label: attrs.get("src").unwrap_or_default().to_string(),
        attributes,
    })
}

/// Keeps a flag present with any value but `"false"`
fn push_flag(attrs: &Attributes, name: &str, out: &mut Vec<(String, String)>) {
    if attrs.get(name).is_some_and(|value| value != "false") {
        out.push((name.to_string(), String::new()));
    }
}
