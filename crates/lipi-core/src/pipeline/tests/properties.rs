//! Property-based tests for the transliteration pipeline.

use proptest::prelude::*;

use super::tr;
use crate::rules::RuleTable;
use crate::unicode::{is_consonant, is_devanagari, is_vowel_sign, VIRAMA};

/// Single-letter consonants that never combine into a digraph with each other.
const PLAIN_CONSONANTS: &[char] = &['k', 'g', 'j', 't', 'd', 'p', 'm', 'l', 'r', 's', 'v'];

fn arb_consonant() -> impl Strategy<Value = char> {
    prop::sample::select(PLAIN_CONSONANTS)
}

fn arb_devanagari() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            (0x0900u32..=0x097F).prop_map(|c| char::from_u32(c).unwrap_or('क')),
            Just(' '),
        ],
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn deterministic(input in "[a-zA-Z .,|~0-9]{0,40}") {
        prop_assert_eq!(tr(&input), tr(&input));
    }

    #[test]
    fn every_input_byte_is_covered(input in "\\PC{0,30}") {
        let result = super::transliterate_detailed(RuleTable::global(), &input);
        let mut pos = 0;
        for span in &result.spans {
            prop_assert_eq!(span.input.start, pos);
            prop_assert!(span.input.end > span.input.start);
            pos = span.input.end;
        }
        prop_assert_eq!(pos, input.len());
    }

    #[test]
    fn devanagari_is_left_unchanged(input in arb_devanagari()) {
        prop_assert_eq!(tr(&input), input);
    }

    #[test]
    fn letters_and_digits_map_into_devanagari(input in "[a-z0-9|~]{1,30}") {
        let out = tr(&input);
        prop_assert!(out.chars().all(is_devanagari), "{} -> {}", input, out);
    }

    #[test]
    fn case_does_not_matter(input in "[a-z ]{0,30}") {
        prop_assert_eq!(tr(&input.to_ascii_uppercase()), tr(&input));
    }

    #[test]
    fn consonant_run_collapses_into_one_conjunct(
        run in prop::collection::vec(arb_consonant(), 1..7)
    ) {
        let mut word: String = run.iter().collect();
        word.push('e');
        let out = tr(&word);
        let chars: Vec<char> = out.chars().collect();
        prop_assert_eq!(chars.len(), 2 * run.len());
        let (halves, last) = chars.split_at(chars.len() - 2);
        for half in halves.chunks(2) {
            prop_assert!(is_consonant(half[0]), "{} -> {}", word, out);
            prop_assert_eq!(half[1], VIRAMA);
        }
        prop_assert!(is_consonant(last[0]));
        prop_assert!(is_vowel_sign(last[1]));
        prop_assert_eq!(last[1], '\u{0947}');
    }

    #[test]
    fn final_consonant_has_no_dangling_virama(
        head in "[kgjtdpmlrs][aeiou]",
        last in arb_consonant(),
    ) {
        let word = format!("{head}{last}");
        let out = tr(&word);
        prop_assert!(!out.ends_with(VIRAMA), "{} -> {}", word, out);
    }
}
