use tracing::debug_span;

use crate::rules::SchwaSettings;
use crate::token::{Decision, Phoneme, ResolvedToken};

/// What closes a consonant unit.
#[derive(Debug, Clone, Copy)]
pub enum Terminator<'a> {
    /// A vowel sign or the explicit inherent vowel.
    Vowel(ResolvedToken<'a>),
    /// An explicit virama marker in the input.
    Marker(ResolvedToken<'a>),
    /// Nothing: end of word, or a non-vowel token follows.
    Bare,
}

/// Consonant bases with no vowel between them, rendered as one conjunct.
#[derive(Debug, Clone)]
pub struct ConjunctUnit<'a> {
    pub consonants: Vec<ResolvedToken<'a>>,
    pub terminator: Terminator<'a>,
}

impl ConjunctUnit<'_> {
    /// Input byte range covered by the unit, terminator included.
    pub fn input_range(&self) -> std::ops::Range<usize> {
        let start = self.consonants.first().map_or(0, |t| t.candidate.start);
        let end = match &self.terminator {
            Terminator::Vowel(t) | Terminator::Marker(t) => t.candidate.end,
            Terminator::Bare => self.consonants.last().map_or(start, |t| t.candidate.end),
        };
        start..end
    }
}

#[derive(Debug, Clone)]
pub enum Segment<'a> {
    Unit(ConjunctUnit<'a>),
    /// A vowel standing on its own.
    Vowel(ResolvedToken<'a>),
    /// Modifiers, symbols, stray viramas and unmapped text.
    Other(ResolvedToken<'a>),
}

struct Composer<'a, 's> {
    schwa: &'s SchwaSettings,
    open: Vec<ResolvedToken<'a>>,
    out: Vec<Segment<'a>>,
}

impl<'a> Composer<'a, '_> {
    fn close(&mut self, terminator: Terminator<'a>) -> bool {
        if self.open.is_empty() {
            return false;
        }
        let consonants = std::mem::take(&mut self.open);
        self.out.push(Segment::Unit(ConjunctUnit {
            consonants,
            terminator,
        }));
        true
    }

    fn splits_before(&self, token: &ResolvedToken<'_>) -> bool {
        token.pattern().is_some_and(|p| {
            self.schwa
                .keep_inherent_before
                .iter()
                .any(|k| k.as_str() == p)
        })
    }

    /// A marker right after another one has nothing left to halant.
    fn follows_marker(&self) -> bool {
        match self.out.last() {
            Some(Segment::Unit(unit)) => matches!(unit.terminator, Terminator::Marker(_)),
            Some(Segment::Other(t)) => t.phoneme == Phoneme::Virama,
            _ => false,
        }
    }

    fn push(&mut self, token: ResolvedToken<'a>) {
        match token.phoneme {
            Phoneme::ConsonantBase(_) => {
                if !self.open.is_empty() && self.splits_before(&token) {
                    self.close(Terminator::Bare);
                }
                self.open.push(token);
            }
            Phoneme::VowelSign(_) | Phoneme::InherentVowel => {
                if !self.close(Terminator::Vowel(token)) {
                    self.out.push(Segment::Other(token));
                }
            }
            Phoneme::Virama => {
                if self.close(Terminator::Marker(token)) {
                    return;
                }
                let token = if self.follows_marker() {
                    ResolvedToken {
                        phoneme: Phoneme::Unmapped,
                        decision: Decision::Unmapped,
                        ..token
                    }
                } else {
                    token
                };
                self.out.push(Segment::Other(token));
            }
            Phoneme::IndependentVowel(_) => {
                self.close(Terminator::Bare);
                self.out.push(Segment::Vowel(token));
            }
            Phoneme::Modifier(_) | Phoneme::Symbol(_) | Phoneme::Unmapped => {
                self.close(Terminator::Bare);
                self.out.push(Segment::Other(token));
            }
        }
    }
}

/// Group one word's tokens into conjunct units.
///
/// A unit opens at a consonant base and grows while consonant bases follow.
/// A vowel sign or marker closes it and is attached; any other token closes
/// it bare. A marker repeated after a marker is passed through as unmapped
/// text. A consonant listed in `schwa.keep_inherent_before` always starts
/// a new unit.
pub fn compose<'a>(tokens: Vec<ResolvedToken<'a>>, schwa: &SchwaSettings) -> Vec<Segment<'a>> {
    let _span = debug_span!("compose", tokens = tokens.len()).entered();
    let mut composer = Composer {
        schwa,
        open: Vec::new(),
        out: Vec::with_capacity(tokens.len()),
    };
    for token in tokens {
        composer.push(token);
    }
    composer.close(Terminator::Bare);
    composer.out
}
