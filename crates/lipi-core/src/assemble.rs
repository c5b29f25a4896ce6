use std::ops::Range;

use serde::Serialize;

use crate::conjunct::ConjunctUnit;
use crate::matra::{Resolved, VowelSlot};
use crate::token::{Phoneme, ResolvedToken};
use crate::unicode::VIRAMA;

/// Output of one transliteration call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transliteration {
    pub output: String,
    /// Output segments mapped back to input byte ranges, in input order.
    pub spans: Vec<OutputSpan>,
    /// Non-fatal findings; the output is complete regardless.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpan {
    pub input: Range<usize>,
    pub output: Range<usize>,
    pub kind: SpanKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// A consonant unit with its vowel slot.
    Syllable,
    Vowel,
    Modifier,
    Symbol,
    Virama,
    Unmapped,
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No rule matched; the character was copied through.
    Unmapped { offset: usize, ch: char },
}

impl Transliteration {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: String::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Output text for the span covering input byte `offset`, if any.
    pub fn output_for(&self, offset: usize) -> Option<&str> {
        self.spans
            .iter()
            .find(|s| s.input.contains(&offset))
            .map(|s| &self.output[s.output.clone()])
    }

    pub(crate) fn push_verbatim(&mut self, input: Range<usize>, text: &str) {
        let start = self.output.len();
        self.output.push_str(text);
        self.spans.push(OutputSpan {
            input,
            output: start..self.output.len(),
            kind: SpanKind::Whitespace,
        });
    }
}

fn write_unit(out: &mut String, unit: &ConjunctUnit<'_>, slot: VowelSlot<'_>) {
    let last = unit.consonants.len().saturating_sub(1);
    for (i, token) in unit.consonants.iter().enumerate() {
        if let Phoneme::ConsonantBase(glyph) = token.phoneme {
            out.push_str(glyph);
        }
        if i < last {
            out.push(VIRAMA);
        }
    }
    match slot {
        VowelSlot::SignAttached { sign } => out.push_str(sign),
        VowelSlot::SchwaDeleted { virama: true } => out.push(VIRAMA),
        VowelSlot::SchwaDeleted { virama: false } | VowelSlot::InherentKept => {}
    }
}

fn write_token(
    out: &mut Transliteration,
    input: &str,
    token: &ResolvedToken<'_>,
) -> SpanKind {
    match token.phoneme {
        Phoneme::IndependentVowel(glyph) => {
            out.output.push_str(glyph);
            SpanKind::Vowel
        }
        Phoneme::ConsonantBase(glyph) | Phoneme::VowelSign(glyph) => {
            out.output.push_str(glyph);
            SpanKind::Syllable
        }
        Phoneme::InherentVowel => SpanKind::Syllable,
        Phoneme::Virama => {
            out.output.push(VIRAMA);
            SpanKind::Virama
        }
        Phoneme::Modifier(glyph) => {
            out.output.push_str(glyph);
            SpanKind::Modifier
        }
        Phoneme::Symbol(glyph) => {
            out.output.push_str(glyph);
            SpanKind::Symbol
        }
        Phoneme::Unmapped => {
            let c = &token.candidate;
            let original = input.get(c.start..c.end).unwrap_or(c.text);
            out.output.push_str(original);
            for ch in original.chars().filter(|ch| !ch.is_whitespace()) {
                out.diagnostics.push(Diagnostic::Unmapped {
                    offset: c.start,
                    ch,
                });
            }
            SpanKind::Unmapped
        }
    }
}

/// Append one word's resolved segments to `out`.
///
/// Unit members are joined with a virama; unmapped text is copied from the
/// original (not case-folded) `input`.
pub fn assemble(out: &mut Transliteration, input: &str, resolved: &[Resolved<'_>]) {
    for item in resolved {
        let start = out.output.len();
        let (range, kind) = match item {
            Resolved::Unit { unit, slot } => {
                write_unit(&mut out.output, unit, *slot);
                (unit.input_range(), SpanKind::Syllable)
            }
            Resolved::IndependentVowel(token) | Resolved::Other(token) => {
                let kind = write_token(out, input, token);
                (token.candidate.start..token.candidate.end, kind)
            }
        };
        out.spans.push(OutputSpan {
            input: range,
            output: start..out.output.len(),
            kind,
        });
    }
}
