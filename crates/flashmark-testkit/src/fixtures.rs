//! Reference conversions
//!
//! Every pair is written for the default options. Round-trip pairs hold in
//! both directions; the one-way pairs start from hand-written Markdown that
//! the renderer would lay out differently.

/// A Markdown text and the flat HTML it corresponds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferencePair {
    pub name: &'static str,
    pub markdown: &'static str,
    pub html: &'static str,
}

/// Autoplay hook the host attaches to inline media, as serialized
pub const ONCANPLAY_HTML: &str = "if(this.getRootNode().querySelector('anki-editable') === null &amp;&amp; this.offsetParent !== null &amp;&amp; ((this.hasAttribute('auto_front') &amp;&amp; !document.body.classList.contains('back')) || (this.hasAttribute('auto_back') &amp;&amp; document.body.classList.contains('back')))) {this.play();}";

pub const ROUND_TRIP: &[ReferencePair] = &[
    ReferencePair {
        name: "paragraphs",
        markdown: "A paragraph\n\nA second paragraph",
        html: "A paragraph<br><br>A second paragraph",
    },
    ReferencePair {
        name: "hard_break",
        markdown: "Paragraph with breaking newline ->  \n<-",
        html: "Paragraph with breaking newline -><br>&lt;-",
    },
    ReferencePair {
        name: "heading",
        markdown: "## Ok\n\nBody",
        html: "<h2>Ok</h2>Body",
    },
    ReferencePair {
        name: "unordered_list",
        markdown: "Unordered list:\n\n- One\n- Two",
        html: r#"Unordered list:<ul class="markdown-tight"><li>One</li><li>Two</li></ul>"#,
    },
    ReferencePair {
        name: "ordered_list",
        markdown: "Ordered list:\n\n1. One\n2. Two",
        html: r#"Ordered list:<ol class="markdown-tight"><li>One</li><li>Two</li></ol>"#,
    },
    ReferencePair {
        name: "nested_list",
        markdown: "Nested list:\n\n- One\n  - Alpha\n  - Bravo\n- Two\n- Three",
        html: r#"Nested list:<ul class="markdown-tight"><li>One<ul class="markdown-tight"><li>Alpha</li><li>Bravo</li></ul></li><li>Two</li><li>Three</li></ul>"#,
    },
    ReferencePair {
        name: "bold_and_italic",
        markdown: "Some **bold** and *italic* text",
        html: "Some <b>bold</b> and <i>italic</i> text",
    },
    ReferencePair {
        name: "marks",
        markdown: "Some =u= ^s^ ~b~ ~~d~~ text",
        html: "Some <u>u</u> <sup>s</sup> <sub>b</sub> <del>d</del> text",
    },
    ReferencePair {
        name: "gfm_table",
        markdown: "A GFM table:\n\n| GFM   | Style |\n| :---- | :---: |\n| table |  with |\n| cells |  rows |",
        html: r#"A GFM table:<table><thead><tr><th align="left">GFM</th><th align="center">Style</th></tr></thead><tbody><tr><td align="left">table</td><td align="center">with</td></tr><tr><td align="left">cells</td><td align="center">rows</td></tr></tbody></table>"#,
    },
    ReferencePair {
        name: "headerless_aligned_table",
        markdown: "A headerless aligned table:\n\n| :---- | :--: |\n| table | with |\n| cells | rows |",
        html: r#"A headerless aligned table:<table><tbody><tr><td align="left">table</td><td align="center">with</td></tr><tr><td align="left">cells</td><td align="center">rows</td></tr></tbody></table>"#,
    },
    ReferencePair {
        name: "headerless_table",
        markdown: "A headerless table:\n\n| ----- | ---- |\n| table | with |\n| cells | rows |",
        html: "A headerless table:<table><tbody><tr><td>table</td><td>with</td></tr><tr><td>cells</td><td>rows</td></tr></tbody></table>",
    },
    ReferencePair {
        name: "table_newline",
        markdown: "| ------ | --------- |\n| a      | table     |\n| with¨a | linebreak |",
        html: "<table><tbody><tr><td>a</td><td>table</td></tr><tr><td>with<br>a</td><td>linebreak</td></tr></tbody></table>",
    },
    ReferencePair {
        name: "clozes",
        markdown: "A {{c1::clozed}} word.\n\nClozed list: {{c2::\n\n- One\n- Two\n\n}}\n\nClozed list item:\n\n- {{c2::One}}\n- Two",
        html: r#"A {{c1::clozed}} word.<br><br>Clozed list: {{c2::<ul class="markdown-tight"><li>One</li><li>Two</li></ul>}}<br><br>Clozed list item:<ul class="markdown-tight"><li>{{c2::One}}</li><li>Two</li></ul>"#,
    },
    ReferencePair {
        name: "clozed_nested_list",
        markdown: "Clozed nested list:\n\n- One {{c3::\n\n  - Alpha\n  - Bravo\n\n  }}\n\n- Two\n\n- Three",
        html: r#"Clozed nested list:<ul class="markdown-loose"><li>One {{c3::<ul class="markdown-tight"><li>Alpha</li><li>Bravo</li></ul>}}</li><li>Two</li><li>Three</li></ul>"#,
    },
    ReferencePair {
        name: "definition_list",
        markdown: "Term\n:   Definition\n\nSecond\n:   Another",
        html: "<dl><dt>Term</dt><dd>Definition</dd><dt>Second</dt><dd>Another</dd></dl>",
    },
];

/// Hand-written Markdown to flat HTML
pub const MARKDOWN_TO_HTML: &[ReferencePair] = &[
    ReferencePair {
        name: "soft_and_hard_breaks",
        markdown: "Non-breaking newline ->\n<-, breaking newline ->  \n<-",
        html: "Non-breaking newline ->\n&lt;-, breaking newline -><br>&lt;-",
    },
    ReferencePair {
        name: "list_after_paragraph_line",
        markdown: "Unordered list:\n- One\n- Two",
        html: r#"Unordered list:<ul class="markdown-tight"><li>One</li><li>Two</li></ul>"#,
    },
    ReferencePair {
        name: "clozed_nested_list_with_blank_lines",
        markdown: "Clozed nested list:\n- One {{c3::\n  - Alpha\n  - Bravo\n\n  }}\n- Two\n- Three",
        html: r#"Clozed nested list:<ul class="markdown-loose"><li>One {{c3::<ul class="markdown-tight"><li>Alpha</li><li>Bravo</li></ul>}}</li><li>Two</li><li>Three</li></ul>"#,
    },
    ReferencePair {
        name: "superscript",
        markdown: "Some ^superscript^ text",
        html: "Some <sup>superscript</sup> text",
    },
];

/// Looks up a pair by name in both tables
///
/// # Panics
///
/// Panics when no pair has that name.
pub fn pair(name: &str) -> &'static ReferencePair {
    ROUND_TRIP
        .iter()
        .chain(MARKDOWN_TO_HTML)
        .find(|pair| pair.name == name)
        .unwrap_or_else(|| panic!("No reference pair named '{name}'"))
}

/// Inline media directive and the host element it expands to
pub fn inline_media_pair() -> (String, String) {
    let id = "im-media-87243454-a9c9-4bdf-a763-1347baad9cf3";
    let markdown = format!(
        "Inline media: :video[\\_{id}.webm]{{auto_front auto_back loop}} support"
    );
    let html = format!(
        r#"Inline media: <video id="{id}" src="_{id}.webm" class="inline-media" controls auto_front="" auto_back="" loop oncanplay="{ONCANPLAY_HTML}" oncontextmenu="pycmd(this.id); return true;"></video> support"#
    );
    (markdown, html)
}
