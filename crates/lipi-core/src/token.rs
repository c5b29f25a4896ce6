use serde::Serialize;

use crate::rules::{Rule, RuleKind};

/// A rule (or unmapped character) matched at `start..end` of the input.
///
/// Offsets are byte offsets into the whole input; `text` is the case-folded
/// slice that matched.
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub start: usize,
    pub end: usize,
    pub rule: Option<&'a Rule>,
    pub text: &'a str,
}

impl<'a> MatchCandidate<'a> {
    pub fn unmapped(start: usize, text: &'a str) -> Self {
        Self {
            start,
            end: start + text.len(),
            rule: None,
            text,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        self.rule.is_none()
    }
}

/// Non-empty set of candidates tied on match length at one offset.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    first: MatchCandidate<'a>,
    rest: Vec<MatchCandidate<'a>>,
}

impl<'a> Candidates<'a> {
    pub fn single(candidate: MatchCandidate<'a>) -> Self {
        Self {
            first: candidate,
            rest: Vec::new(),
        }
    }

    /// `None` when `all` is empty.
    pub fn from_vec(all: Vec<MatchCandidate<'a>>) -> Option<Self> {
        let mut iter = all.into_iter();
        let first = iter.next()?;
        Some(Self {
            first,
            rest: iter.collect(),
        })
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &MatchCandidate<'a> {
        &self.first
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchCandidate<'a>> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}

/// Phoneme a token resolves to. Closed set matched exhaustively by every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phoneme<'a> {
    IndependentVowel(&'a str),
    ConsonantBase(&'a str),
    VowelSign(&'a str),
    /// The default vowel spelled out after a consonant; no visible mark.
    InherentVowel,
    Virama,
    Modifier(&'a str),
    Symbol(&'a str),
    Unmapped,
}

impl Phoneme<'_> {
    pub fn is_vowel(&self) -> bool {
        matches!(
            self,
            Phoneme::IndependentVowel(_) | Phoneme::VowelSign(_) | Phoneme::InherentVowel
        )
    }

    pub fn is_consonant(&self) -> bool {
        matches!(self, Phoneme::ConsonantBase(_))
    }

    /// Part of a word's letters, as opposed to symbols and pass-through text.
    pub fn is_letter(&self) -> bool {
        !matches!(self, Phoneme::Symbol(_) | Phoneme::Unmapped)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phoneme::IndependentVowel(_) => "independent_vowel",
            Phoneme::ConsonantBase(_) => "consonant_base",
            Phoneme::VowelSign(_) => "vowel_sign",
            Phoneme::InherentVowel => "inherent_vowel",
            Phoneme::Virama => "virama",
            Phoneme::Modifier(_) => "modifier",
            Phoneme::Symbol(_) => "symbol",
            Phoneme::Unmapped => "unmapped",
        }
    }
}

/// How the disambiguator arrived at its choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// No rule matched; the character passes through.
    Unmapped,
    /// A single unconditional rule.
    Only,
    /// A conditional rule whose predicates held.
    Predicate,
    /// Tied on predicates, won on priority.
    Priority,
    /// Tied on predicates and priority, won on declaration order.
    DeclarationOrder,
}

#[derive(Debug, Clone, Copy)]
pub struct ResolvedToken<'a> {
    pub candidate: MatchCandidate<'a>,
    pub phoneme: Phoneme<'a>,
    pub decision: Decision,
}

impl<'a> ResolvedToken<'a> {
    pub fn pattern(&self) -> Option<&'a str> {
        self.candidate.rule.map(|r| r.pattern.as_str())
    }

    pub fn kind(&self) -> Option<RuleKind> {
        self.candidate.rule.map(|r| r.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_from_vec() {
        assert!(Candidates::from_vec(vec![]).is_none());
        let c = Candidates::from_vec(vec![
            MatchCandidate::unmapped(0, "x"),
            MatchCandidate::unmapped(0, "y"),
        ])
        .unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.first().text, "x");
        let texts: Vec<&str> = c.iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["x", "y"]);
    }

    #[test]
    fn unmapped_candidate_spans_char() {
        let m = MatchCandidate::unmapped(3, "न");
        assert_eq!(m.end, 6);
        assert!(m.is_unmapped());
    }

    #[test]
    fn phoneme_classes() {
        assert!(Phoneme::InherentVowel.is_vowel());
        assert!(Phoneme::VowelSign("ा").is_vowel());
        assert!(!Phoneme::Modifier("ँ").is_vowel());
        assert!(Phoneme::ConsonantBase("क").is_consonant());
        assert!(!Phoneme::Symbol("१").is_letter());
        assert!(Phoneme::Virama.is_letter());
    }
}
