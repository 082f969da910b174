//! Reference conversions through the public facade

use flashmark::config::{HardBreak, SpreadMode, Strikethrough, TableStyle};
use flashmark::{Converter, FlashmarkError, Options};
use flashmark_testkit::fixtures::{ROUND_TRIP, inline_media_pair, pair};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn converter() -> Converter {
    Converter::new(Options::default()).unwrap()
}

fn converter_with(edit: impl FnOnce(&mut Options)) -> Converter {
    let mut options = Options::default();
    edit(&mut options);
    Converter::new(options).unwrap()
}

#[rstest]
#[case("paragraphs")]
#[case("hard_break")]
#[case("heading")]
#[case("unordered_list")]
#[case("ordered_list")]
#[case("nested_list")]
#[case("bold_and_italic")]
#[case("marks")]
#[case("gfm_table")]
#[case("headerless_aligned_table")]
#[case("headerless_table")]
#[case("table_newline")]
#[case("clozes")]
#[case("clozed_nested_list")]
#[case("definition_list")]
fn test_markdown_to_html(#[case] name: &str) {
    let reference = pair(name);
    assert_eq!(converter().to_flat(reference.markdown).unwrap(), reference.html);
}

#[rstest]
#[case("paragraphs")]
#[case("hard_break")]
#[case("heading")]
#[case("unordered_list")]
#[case("ordered_list")]
#[case("nested_list")]
#[case("bold_and_italic")]
#[case("marks")]
#[case("gfm_table")]
#[case("headerless_aligned_table")]
#[case("headerless_table")]
#[case("table_newline")]
#[case("clozes")]
#[case("clozed_nested_list")]
#[case("definition_list")]
fn test_html_to_markdown(#[case] name: &str) {
    let reference = pair(name);
    let (markdown, _) = converter().to_structured(reference.html).unwrap();
    assert_eq!(markdown, reference.markdown);
}

#[rstest]
#[case("soft_and_hard_breaks")]
#[case("list_after_paragraph_line")]
#[case("clozed_nested_list_with_blank_lines")]
#[case("superscript")]
fn test_hand_written_markdown_to_html(#[case] name: &str) {
    let reference = pair(name);
    assert_eq!(converter().to_flat(reference.markdown).unwrap(), reference.html);
}

#[test]
fn test_every_reference_pair_round_trips() {
    let converter = converter();
    for reference in ROUND_TRIP {
        let html = converter.to_flat(reference.markdown).unwrap();
        let (markdown, _) = converter.to_structured(&html).unwrap();
        assert_eq!(markdown, reference.markdown, "round trip of {}", reference.name);
    }
}

/// Soft line breaks collapse to spaces on the way back, so that pair is
/// left out
#[rstest]
#[case("list_after_paragraph_line")]
#[case("clozed_nested_list_with_blank_lines")]
#[case("superscript")]
fn test_hand_written_markdown_settles_after_one_trip(#[case] name: &str) {
    let converter = converter();
    let reference = pair(name);
    let (markdown, _) = converter.to_structured(reference.html).unwrap();
    assert_eq!(converter.to_flat(&markdown).unwrap(), reference.html);
}

#[test]
fn test_inline_media_both_ways() {
    let (markdown, html) = inline_media_pair();
    let converter = converter();
    assert_eq!(converter.to_flat(&markdown).unwrap(), html);
    assert_eq!(converter.to_structured(&html).unwrap().0, markdown);
}

#[test]
fn test_cloze_ordinal() {
    let (_, ordinal) = converter().to_structured(pair("clozes").html).unwrap();
    assert_eq!(ordinal, 2);
}

#[test]
fn test_anki_list_placement_is_repaired() {
    let html = "<ul><li>One</li><ul><li>Alpha</li><li>Bravo</li></ul><li>Two</li><li>Three</li></ul>";
    let (markdown, _) = converter().to_structured(html).unwrap();
    assert_eq!(markdown, "- One\n  - Alpha\n  - Bravo\n- Two\n- Three");
}

#[test]
fn test_inline_media_without_class_becomes_link() {
    let (markdown, _) = converter()
        .to_structured(r#"<audio src="clip.mp3"></audio>"#)
        .unwrap();
    assert_eq!(markdown, "[clip.mp3](clip.mp3)");
}

#[test]
fn test_invalid_media_label_is_an_error() {
    let error = converter().to_flat(":video[clip.webm]").unwrap_err();
    assert!(matches!(error, FlashmarkError::InlineMediaLabel { .. }));
}

#[test]
fn test_escape_hard_break_style() {
    let converter = converter_with(|options| options.markdown.hard_break = HardBreak::Escape);
    let (markdown, _) = converter.to_structured("a<br>b").unwrap();
    assert_eq!(markdown, "a\\\nb");
    assert_eq!(converter.to_flat(&markdown).unwrap(), "a<br>b");
}

#[test]
fn test_disabled_underline_is_plain_text() {
    let converter = converter_with(|options| options.extensions.underline = false);
    assert_eq!(converter.to_flat("Some =x= text").unwrap(), "Some =x= text");
    assert_eq!(converter.to_structured("<u>x</u>").unwrap().0, "x");
}

#[test]
fn test_single_tilde_strikethrough() {
    let converter = converter_with(|options| {
        options.extensions.strikethrough = Strikethrough::Single;
        options.extensions.subscript = false;
    });
    assert_eq!(converter.to_flat("~gone~").unwrap(), "<del>gone</del>");
}

#[test]
fn test_basic_tables_keep_empty_header() {
    let converter = converter_with(|options| options.extensions.tables = TableStyle::Basic);
    let (markdown, _) = converter
        .to_structured("<table><tr><td>a</td><td>b</td></tr></table>")
        .unwrap();
    assert_eq!(markdown, "|     |     |\n| --- | --- |\n| a   | b   |");
}

#[test]
fn test_forced_tight_lists() {
    let converter = converter_with(|options| options.extensions.list_spread = SpreadMode::Tight);
    assert_eq!(
        converter.to_flat("- a\n\n- b").unwrap(),
        r#"<ul class="markdown-tight"><li>a</li><li>b</li></ul>"#
    );
    // only the persisted marker counts on the way back
    let (markdown, _) = converter
        .to_structured("<ul><li><p>a</p></li><li>b</li></ul>")
        .unwrap();
    assert_eq!(markdown, "- a\n- b");
}

#[test]
fn test_forced_loose_lists() {
    let converter = converter_with(|options| options.extensions.list_spread = SpreadMode::Loose);
    let (markdown, _) = converter
        .to_structured(r#"<ul class="markdown-loose"><li>a</li><li>b</li></ul>"#)
        .unwrap();
    assert_eq!(markdown, "- a\n\n- b");
    assert_eq!(
        converter.to_flat("- a\n- b").unwrap(),
        r#"<ul class="markdown-loose"><li>a</li><li>b</li></ul>"#
    );
}

#[test]
fn test_disabled_table_newline_keeps_breaks_out_of_cells() {
    let converter = converter_with(|options| options.extensions.table_newline = String::new());
    assert_eq!(
        converter.to_flat("| --- | --- |\n| a¨b | c |").unwrap(),
        "<table><tbody><tr><td>a¨b</td><td>c</td></tr></tbody></table>"
    );
}

#[test]
fn test_literal_sentinel_in_cell_round_trips() {
    let converter = converter();
    let html = "<table><tbody><tr><td>with<br>a</td><td>lit¨x</td></tr></tbody></table>";
    let (markdown, _) = converter.to_structured(html).unwrap();
    assert!(markdown.contains(r"lit\¨x"));
    assert_eq!(converter.to_flat(&markdown).unwrap(), html);
    assert_eq!(converter.to_structured(&converter.to_flat(&markdown).unwrap()).unwrap().0, markdown);
}

#[test]
fn test_blank_line_in_heading_keeps_words_apart() {
    let (markdown, _) = converter().to_structured("<h2>x<br><br>y</h2>").unwrap();
    assert_eq!(markdown, "## x  y");
}

#[test]
fn test_blank_line_in_bold_survives_round_trip() {
    let converter = converter();
    let (markdown, _) = converter.to_structured("<b>x<br><br>y</b>").unwrap();
    assert_eq!(markdown, "**x  \n\\\ny**");
    assert_eq!(converter.to_flat(&markdown).unwrap(), "<b>x<br><br>y</b>");
}

#[rstest]
#[case(":audio[_a.mp3] x_", "</audio> x_")]
#[case(":audio[_a.mp3]{loop} and word_", "</audio> and word_")]
#[case("*b* :audio[_a*b.mp3]", "</audio>")]
fn test_media_label_does_not_pair_with_emphasis(#[case] markdown: &str, #[case] tail: &str) {
    let html = converter().to_flat(markdown).unwrap();
    assert!(html.contains(r#"<audio id="a"#), "no media element in {html}");
    assert!(html.ends_with(tail), "unexpected tail in {html}");
}

#[test]
fn test_media_label_characters_are_kept() {
    let html = converter().to_flat(":audio[_a*b.mp3]").unwrap();
    assert!(html.starts_with(r#"<audio id="a*b" src="_a*b.mp3""#), "{html}");
}

#[test]
fn test_backslash_before_emphasis_is_stable() {
    let converter = converter();
    let (markdown, _) = converter.to_structured(r"<ul><li>\<i>x</i></li></ul>").unwrap();
    assert_eq!(markdown, r"- \\*x*");
    let html = converter.to_flat(&markdown).unwrap();
    assert_eq!(converter.to_structured(&html).unwrap().0, markdown);
}

#[test]
fn test_converter_can_be_shared_across_threads() {
    let converter = std::sync::Arc::new(converter());
    let handles: Vec<_> = ROUND_TRIP
        .iter()
        .map(|reference| {
            let converter = std::sync::Arc::clone(&converter);
            std::thread::spawn(move || converter.to_flat(reference.markdown).unwrap())
        })
        .collect();
    for (handle, reference) in handles.into_iter().zip(ROUND_TRIP) {
        assert_eq!(handle.join().unwrap(), reference.html);
    }
}
