use std::ops::Range;

use crate::rules::{Rule, RuleKind, RuleTable};
use crate::token::{Phoneme, ResolvedToken};

/// Per-word counts computed once before tokenizing the word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordProfile {
    /// ASCII letters in the word.
    pub letters: usize,
    /// Vowel graphemes, as split by unconditional rules.
    pub syllables: usize,
}

impl WordProfile {
    pub fn scan(table: &RuleTable, word: &str) -> Self {
        let letters = word.chars().filter(char::is_ascii_alphabetic).count();
        let mut syllables = 0;
        let mut rest = word;
        while let Some(c) = rest.chars().next() {
            let step = match table.peek(rest) {
                Some(rule) => {
                    if rule.kind == RuleKind::Vowel {
                        syllables += 1;
                    }
                    rule.pattern.len()
                }
                None => c.len_utf8(),
            };
            rest = &rest[step..];
        }
        Self { letters, syllables }
    }
}

/// Read-only view that rule predicates are evaluated against.
///
/// The left side is what has already been resolved in the current word; the
/// right side is still raw (case-folded) text and is classified with the
/// table's unconditional rules only.
pub struct ContextView<'v> {
    table: &'v RuleTable,
    text: &'v str,
    word: Range<usize>,
    left: &'v [ResolvedToken<'v>],
    profile: WordProfile,
}

impl<'v> ContextView<'v> {
    pub fn new(
        table: &'v RuleTable,
        text: &'v str,
        word: Range<usize>,
        left: &'v [ResolvedToken<'v>],
        profile: WordProfile,
    ) -> Self {
        debug_assert!(word.end <= text.len());
        Self {
            table,
            text,
            word,
            left,
            profile,
        }
    }

    pub fn word(&self) -> Range<usize> {
        self.word.clone()
    }

    pub fn left(&self) -> &[ResolvedToken<'v>] {
        self.left
    }

    /// No letter has been resolved yet in this word.
    pub fn is_word_start(&self) -> bool {
        !self.left.iter().any(|t| t.phoneme.is_letter())
    }

    /// Only the word boundary, a symbol or unmapped text follows `off`.
    pub fn is_word_end(&self, off: usize) -> bool {
        off >= self.word.end || self.peek(off).map_or(true, |r| !r.kind.is_letter())
    }

    pub fn prev(&self) -> Option<&Phoneme<'v>> {
        self.left.last().map(|t| &t.phoneme)
    }

    fn peek(&self, off: usize) -> Option<&'v Rule> {
        let rest = self.text.get(off..self.word.end)?;
        self.table.peek(rest)
    }

    pub fn kind_at(&self, off: usize) -> Option<RuleKind> {
        self.peek(off).map(|r| r.kind)
    }

    /// End offset of the consonant grapheme starting at `off`, if any.
    pub fn consonant_at(&self, off: usize) -> Option<usize> {
        self.peek(off)
            .filter(|r| r.kind == RuleKind::Consonant)
            .map(|r| off + r.pattern.len())
    }

    /// End offset of a consonant plus one of `vowels` starting at `off`.
    pub fn syllable_at(&self, off: usize, vowels: &[String]) -> Option<usize> {
        let consonant_end = self.consonant_at(off)?;
        let vowel = self
            .peek(consonant_end)
            .filter(|r| r.kind == RuleKind::Vowel && vowels.contains(&r.pattern))?;
        Some(consonant_end + vowel.pattern.len())
    }

    /// Word text before `start`.
    pub fn before(&self, start: usize) -> &'v str {
        self.text.get(self.word.start..start).unwrap_or("")
    }

    /// Word text after `end`.
    pub fn after(&self, end: usize) -> &'v str {
        self.text.get(end..self.word.end).unwrap_or("")
    }

    pub fn letter_count(&self) -> usize {
        self.profile.letters
    }

    pub fn syllable_count(&self) -> usize {
        self.profile.syllables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'v>(table: &'v RuleTable, text: &'v str, word: Range<usize>) -> ContextView<'v> {
        let profile = WordProfile::scan(table, &text[word.clone()]);
        ContextView::new(table, text, word, &[], profile)
    }

    #[test]
    fn profile_counts_vowel_graphemes() {
        let t = RuleTable::global();
        assert_eq!(
            WordProfile::scan(t, "nepal"),
            WordProfile {
                letters: 5,
                syllables: 2
            }
        );
        assert_eq!(WordProfile::scan(t, "kanoon").syllables, 2);
        assert_eq!(WordProfile::scan(t, "namaste").syllables, 3);
        assert_eq!(WordProfile::scan(t, "123").letters, 0);
        assert_eq!(WordProfile::scan(t, "नमस्ते"), WordProfile::default());
    }

    #[test]
    fn word_boundaries() {
        let t = RuleTable::global();
        let text = "ram, nepal";
        let ctx = view(t, text, 5..10);
        assert!(ctx.is_word_start());
        assert!(!ctx.is_word_end(8));
        assert!(ctx.is_word_end(10));

        let ctx = view(t, text, 0..4);
        assert!(ctx.is_word_end(3), "punctuation ends the word");
    }

    #[test]
    fn symbols_end_words() {
        let t = RuleTable::global();
        let ctx = view(t, "ram|", 0..4);
        assert!(ctx.is_word_end(3));
    }

    #[test]
    fn right_context_classification() {
        let t = RuleTable::global();
        let ctx = view(t, "kanoon", 0..6);
        assert_eq!(ctx.kind_at(1), Some(RuleKind::Vowel));
        assert_eq!(ctx.kind_at(2), Some(RuleKind::Consonant));
        assert_eq!(ctx.consonant_at(2), Some(3));
        assert_eq!(ctx.consonant_at(1), None);
        assert_eq!(ctx.syllable_at(2, &["oo".to_string()]), Some(5));
        assert_eq!(ctx.syllable_at(2, &["o".to_string()]), None);
    }

    #[test]
    fn before_and_after_stay_in_word() {
        let t = RuleTable::global();
        let text = "ab cd";
        let ctx = view(t, text, 3..5);
        assert_eq!(ctx.before(4), "c");
        assert_eq!(ctx.after(4), "d");
        assert_eq!(ctx.after(5), "");
    }
}
