use serde::Serialize;

use crate::assemble::{assemble, Diagnostic, SpanKind, Transliteration};
use crate::conjunct::compose;
use crate::matra::{resolve, Resolved, VowelSlot};
use crate::rules::{RuleKind, RuleTable};
use crate::token::{Decision, Phoneme, ResolvedToken};
use crate::unicode::VIRAMA;

use super::{scan_word, split_words, Piece};

/// Full diagnostic result for one input string.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub input: String,
    pub output: String,
    pub words: Vec<ExplainWord>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Serialize)]
pub struct ExplainWord {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub tokens: Vec<ExplainToken>,
    pub segments: Vec<ExplainSegment>,
}

/// One tokenizer step and the disambiguator's verdict.
#[derive(Debug, Serialize)]
pub struct ExplainToken {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub pattern: Option<String>,
    pub kind: Option<RuleKind>,
    pub priority: Option<i32>,
    pub phoneme: &'static str,
    pub glyph: String,
    pub decision: Decision,
}

impl From<&ResolvedToken<'_>> for ExplainToken {
    fn from(t: &ResolvedToken<'_>) -> Self {
        let glyph = match t.phoneme {
            Phoneme::IndependentVowel(g)
            | Phoneme::ConsonantBase(g)
            | Phoneme::VowelSign(g)
            | Phoneme::Modifier(g)
            | Phoneme::Symbol(g) => g.to_string(),
            Phoneme::InherentVowel => String::new(),
            Phoneme::Virama => VIRAMA.to_string(),
            Phoneme::Unmapped => t.candidate.text.to_string(),
        };
        Self {
            start: t.candidate.start,
            end: t.candidate.end,
            text: t.candidate.text.to_string(),
            pattern: t.pattern().map(str::to_string),
            kind: t.kind(),
            priority: t.candidate.rule.map(|r| r.priority),
            phoneme: t.phoneme.name(),
            glyph,
            decision: t.decision,
        }
    }
}

/// An assembled segment with its vowel slot, when it is a consonant unit.
#[derive(Debug, Serialize)]
pub struct ExplainSegment {
    pub input: String,
    pub output: String,
    pub kind: SpanKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

fn describe_slot(slot: VowelSlot<'_>) -> String {
    match slot {
        VowelSlot::InherentKept => "inherent_kept".to_string(),
        VowelSlot::SignAttached { sign } => format!("sign_attached({sign})"),
        VowelSlot::SchwaDeleted { virama: true } => "schwa_deleted+virama".to_string(),
        VowelSlot::SchwaDeleted { virama: false } => "schwa_deleted".to_string(),
    }
}

/// Run the pipeline and capture every stage's decisions.
pub fn explain(table: &RuleTable, input: &str) -> ExplainResult {
    let folded = input.to_ascii_lowercase();
    let mut out = Transliteration::with_capacity(input.len() * 3);
    let mut words = Vec::new();

    for piece in split_words(&folded) {
        let range = match piece {
            Piece::Space(range) => {
                out.push_verbatim(range.clone(), &input[range]);
                continue;
            }
            Piece::Word(range) => range,
        };
        let tokens = scan_word(table, &folded, range.clone());
        let explained: Vec<ExplainToken> = tokens.iter().map(ExplainToken::from).collect();
        let resolved = resolve(compose(tokens, table.schwa()), table.schwa());

        let first_span = out.spans.len();
        assemble(&mut out, input, &resolved);
        let segments = resolved
            .iter()
            .zip(&out.spans[first_span..])
            .map(|(r, span)| ExplainSegment {
                input: input[span.input.clone()].to_string(),
                output: out.output[span.output.clone()].to_string(),
                kind: span.kind,
                slot: match r {
                    Resolved::Unit { slot, .. } => Some(describe_slot(*slot)),
                    _ => None,
                },
            })
            .collect();

        words.push(ExplainWord {
            start: range.start,
            end: range.end,
            text: input[range].to_string(),
            tokens: explained,
            segments,
        });
    }

    ExplainResult {
        input: input.to_string(),
        output: out.output,
        words,
        diagnostics: out.diagnostics,
    }
}

/// Pad `s` with spaces to `width` display columns.
fn pad(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let w = UnicodeWidthStr::width(s);
    if w < width {
        format!("{}{}", s, " ".repeat(width - w))
    } else {
        s.to_string()
    }
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== \"{}\" -> \"{}\" ({} words) ===\n",
        result.input,
        result.output,
        result.words.len(),
    ));

    for word in &result.words {
        out.push_str(&format!(
            "\n--- {} [{}..{}] ---\n",
            word.text, word.start, word.end
        ));
        out.push_str("  Tokens:\n");
        for t in &word.tokens {
            let pattern = t.pattern.as_deref().unwrap_or("-");
            let priority = t
                .priority
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "    [{},{}] {} {} {} {} prio={:<3} {:?}\n",
                t.start,
                t.end,
                pad(&t.text, 4),
                pad(pattern, 4),
                pad(t.phoneme, 17),
                pad(&t.glyph, 4),
                priority,
                t.decision,
            ));
        }
        out.push_str("  Segments:\n");
        for seg in &word.segments {
            out.push_str(&format!(
                "    {} {} {:?}{}\n",
                pad(&seg.input, 8),
                pad(&seg.output, 6),
                seg.kind,
                seg.slot
                    .as_deref()
                    .map(|s| format!("  {s}"))
                    .unwrap_or_default(),
            ));
        }
    }

    if !result.diagnostics.is_empty() {
        out.push_str(&format!("\n=== Diagnostics ({}) ===\n", result.diagnostics.len()));
        for d in &result.diagnostics {
            match d {
                Diagnostic::Unmapped { offset, ch } => {
                    out.push_str(&format!("  unmapped {ch:?} at byte {offset}\n"));
                }
            }
        }
    }

    out
}
