mod properties;

use super::*;
use crate::rules::RuleTable;

pub(super) fn tr(input: &str) -> String {
    transliterate(RuleTable::global(), input)
}

#[test]
fn test_split_words() {
    assert_eq!(
        split_words(" ab  c\n"),
        vec![
            Piece::Space(0..1),
            Piece::Word(1..3),
            Piece::Space(3..5),
            Piece::Word(5..6),
            Piece::Space(6..7),
        ]
    );
    assert!(split_words("").is_empty());
}

#[test]
fn test_split_words_unicode_whitespace() {
    // U+3000 ideographic space is three bytes.
    assert_eq!(
        split_words("a\u{3000}b"),
        vec![Piece::Word(0..1), Piece::Space(1..4), Piece::Word(4..5)]
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(tr(""), "");
    let detailed = transliterate_detailed(RuleTable::global(), "");
    assert!(detailed.spans.is_empty());
    assert!(detailed.diagnostics.is_empty());
}

#[test]
fn test_whitespace_only() {
    assert_eq!(tr(" \t\n "), " \t\n ");
}

#[test]
fn test_scan_word_offsets_are_absolute() {
    let table = RuleTable::global();
    let text = "ram nepal";
    let tokens = scan_word(table, text, 4..9);
    let starts: Vec<usize> = tokens.iter().map(|t| t.candidate.start).collect();
    assert_eq!(starts, vec![4, 5, 6, 7, 8]);
    assert_eq!(tokens.last().map(|t| t.candidate.end), Some(9));
}

#[test]
fn test_spans_tile_input_and_output() {
    let input = "Namaste, mero naam Ram ho!";
    let result = transliterate_detailed(RuleTable::global(), input);
    let mut input_pos = 0;
    let mut output_pos = 0;
    for span in &result.spans {
        assert_eq!(span.input.start, input_pos, "gap before {span:?}");
        assert_eq!(span.output.start, output_pos, "gap before {span:?}");
        input_pos = span.input.end;
        output_pos = span.output.end;
    }
    assert_eq!(input_pos, input.len());
    assert_eq!(output_pos, result.output.len());
}

#[test]
fn test_custom_table_is_independent() {
    let toml = r#"
[schwa]
final_virama = true

[[rules]]
pattern = "a"
kind = "vowel"
glyph = "अ"
sign = ""

[[rules]]
pattern = "k"
kind = "consonant"
glyph = "क"

[[rules]]
pattern = "m"
kind = "consonant"
glyph = "म"
"#;
    let table = RuleTable::from_toml(toml).unwrap();
    assert_eq!(transliterate(&table, "kam"), "कम्");
    assert_eq!(tr("kam"), "कम");
}
