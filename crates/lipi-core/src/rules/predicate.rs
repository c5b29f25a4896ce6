use serde::{Deserialize, Serialize};

use crate::context::ContextView;
use crate::rules::RuleKind;

/// A context condition attached to a rule.
///
/// Predicates are plain data so the rule table stays declarative: they are
/// read from TOML (`"word_final"`, `{ followed_by = ["y"] }`,
/// `{ not = "after_vowel" }`) and evaluated against a [`ContextView`] that
/// exposes the tokens already resolved to the left and the raw text to the
/// right of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// No letter has been resolved yet in the current word.
    WordInitial,
    /// Nothing but a word boundary follows the match.
    WordFinal,
    /// Neither word-initial nor word-final.
    Interior,
    /// The previous token carries a vowel (independent, sign or inherent).
    AfterVowel,
    /// The previous token is a consonant base.
    AfterConsonant,
    /// The grapheme after the match is a vowel.
    BeforeVowel,
    /// The grapheme after the match is a consonant.
    BeforeConsonant,
    /// Exactly one consonant grapheme remains before the end of the word.
    BeforeFinalConsonant,
    /// The word text before the match ends with one of these strings.
    PrecededBy(Vec<String>),
    /// The word text after the match starts with one of these strings.
    FollowedBy(Vec<String>),
    /// A single consonant followed by one of these vowel patterns comes next.
    BeforeSyllable(Vec<String>),
    /// Like `BeforeSyllable`, and that syllable ends the word.
    BeforeFinalSyllable(Vec<String>),
    /// The word has at least this many ASCII letters.
    MinWordLen(usize),
    /// The word has at least this many vowel graphemes.
    MinSyllables(usize),
    Not(Box<Predicate>),
    Any(Vec<Predicate>),
    All(Vec<Predicate>),
}

impl Predicate {
    /// Evaluate against the match `start..end` (byte offsets into the input).
    pub fn holds(&self, ctx: &ContextView<'_>, start: usize, end: usize) -> bool {
        match self {
            Predicate::WordInitial => ctx.is_word_start(),
            Predicate::WordFinal => ctx.is_word_end(end),
            Predicate::Interior => !ctx.is_word_start() && !ctx.is_word_end(end),
            Predicate::AfterVowel => ctx.prev().is_some_and(|p| p.is_vowel()),
            Predicate::AfterConsonant => ctx.prev().is_some_and(|p| p.is_consonant()),
            Predicate::BeforeVowel => ctx.kind_at(end) == Some(RuleKind::Vowel),
            Predicate::BeforeConsonant => ctx.kind_at(end) == Some(RuleKind::Consonant),
            Predicate::BeforeFinalConsonant => ctx
                .consonant_at(end)
                .is_some_and(|after| ctx.is_word_end(after)),
            Predicate::PrecededBy(tails) => {
                let before = ctx.before(start);
                tails.iter().any(|t| before.ends_with(t.as_str()))
            }
            Predicate::FollowedBy(heads) => {
                let after = ctx.after(end);
                heads.iter().any(|h| after.starts_with(h.as_str()))
            }
            Predicate::BeforeSyllable(vowels) => ctx.syllable_at(end, vowels).is_some(),
            Predicate::BeforeFinalSyllable(vowels) => ctx
                .syllable_at(end, vowels)
                .is_some_and(|after| ctx.is_word_end(after)),
            Predicate::MinWordLen(n) => ctx.letter_count() >= *n,
            Predicate::MinSyllables(n) => ctx.syllable_count() >= *n,
            Predicate::Not(inner) => !inner.holds(ctx, start, end),
            Predicate::Any(inner) => inner.iter().any(|p| p.holds(ctx, start, end)),
            Predicate::All(inner) => inner.iter().all(|p| p.holds(ctx, start, end)),
        }
    }

    /// Structural checks run when the table is built.
    pub(crate) fn validate(&self) -> Result<(), String> {
        fn strings(field: &str, values: &[String]) -> Result<(), String> {
            if values.is_empty() {
                return Err(format!("{field} needs at least one entry"));
            }
            for v in values {
                if v.is_empty() || !v.is_ascii() {
                    return Err(format!("{field} entries must be non-empty ASCII, got {v:?}"));
                }
            }
            Ok(())
        }

        match self {
            Predicate::PrecededBy(v) => strings("preceded_by", v),
            Predicate::FollowedBy(v) => strings("followed_by", v),
            Predicate::BeforeSyllable(v) => strings("before_syllable", v),
            Predicate::BeforeFinalSyllable(v) => strings("before_final_syllable", v),
            Predicate::MinWordLen(0) => Err("min_word_len must be positive".to_string()),
            Predicate::MinSyllables(0) => Err("min_syllables must be positive".to_string()),
            Predicate::Not(inner) => inner.validate(),
            Predicate::Any(inner) | Predicate::All(inner) => {
                if inner.is_empty() {
                    return Err("any/all need at least one predicate".to_string());
                }
                inner.iter().try_for_each(Predicate::validate)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        when: Vec<Predicate>,
    }

    fn parse(src: &str) -> Vec<Predicate> {
        toml::from_str::<Holder>(src).unwrap().when
    }

    #[test]
    fn parse_unit_and_newtype_forms() {
        let when = parse(r#"when = ["word_final", { followed_by = ["y", "w"] }]"#);
        assert_eq!(
            when,
            vec![
                Predicate::WordFinal,
                Predicate::FollowedBy(vec!["y".into(), "w".into()]),
            ]
        );
    }

    #[test]
    fn parse_nested_combinators() {
        let when = parse(
            r#"when = [{ not = { preceded_by = ["ch"] } }, { any = ["word_initial", { min_syllables = 2 }] }]"#,
        );
        assert_eq!(
            when,
            vec![
                Predicate::Not(Box::new(Predicate::PrecededBy(vec!["ch".into()]))),
                Predicate::Any(vec![Predicate::WordInitial, Predicate::MinSyllables(2)]),
            ]
        );
    }

    #[test]
    fn parse_rejects_unknown_name() {
        assert!(toml::from_str::<Holder>(r#"when = ["sometimes"]"#).is_err());
    }

    #[test]
    fn validate_empty_lists() {
        assert!(Predicate::FollowedBy(vec![]).validate().is_err());
        assert!(Predicate::Any(vec![]).validate().is_err());
        assert!(Predicate::PrecededBy(vec![String::new()]).validate().is_err());
    }

    #[test]
    fn validate_zero_counts() {
        assert!(Predicate::MinWordLen(0).validate().is_err());
        assert!(Predicate::MinSyllables(0).validate().is_err());
        assert!(Predicate::MinSyllables(1).validate().is_ok());
    }

    #[test]
    fn validate_recurses() {
        let p = Predicate::Not(Box::new(Predicate::All(vec![Predicate::BeforeSyllable(
            vec![],
        )])));
        assert!(p.validate().is_err());
    }

    const POSITION_TABLE: &str = r#"
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
pattern = "k"
kind = "consonant"
glyph = "ख"
when = ["interior"]

[[rules]]
pattern = "g"
kind = "consonant"
glyph = "ग"

[[rules]]
pattern = "g"
kind = "consonant"
glyph = "घ"
when = ["before_vowel"]

[[rules]]
pattern = "t"
kind = "consonant"
glyph = "त"

[[rules]]
pattern = "t"
kind = "consonant"
glyph = "ट"
when = ["before_consonant"]
"#;

    fn run(text: &str) -> String {
        let table = crate::rules::RuleTable::from_toml(POSITION_TABLE).unwrap();
        crate::pipeline::transliterate(&table, text)
    }

    #[test]
    fn interior_excludes_both_word_edges() {
        assert_eq!(run("kakak"), "कखक");
        assert_eq!(run("k"), "क");
        assert_eq!(run("ka k"), "क क");
    }

    #[test]
    fn before_vowel_looks_at_next_grapheme() {
        assert_eq!(run("gag"), "घग");
        assert_eq!(run("gg"), "ग्ग");
        assert_eq!(run("ga,"), "घ,");
    }

    #[test]
    fn before_consonant_looks_at_next_grapheme() {
        assert_eq!(run("tka"), "ट्क");
        assert_eq!(run("tat"), "तत");
    }
}
