//! End-to-end transliteration: case folding, word segmentation and the
//! tokenize → disambiguate → compose → resolve → assemble stages.

pub mod explain;

#[cfg(test)]
mod tests;

use std::ops::Range;

use tracing::debug_span;

use crate::assemble::{assemble, Transliteration};
use crate::conjunct::compose;
use crate::context::{ContextView, WordProfile};
use crate::disambiguate::select;
use crate::matra::resolve;
use crate::rules::RuleTable;
use crate::token::ResolvedToken;
use crate::tokenizer::candidates_at;

/// A whitespace run or a word between whitespace runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Word(Range<usize>),
    Space(Range<usize>),
}

pub(crate) fn split_words(text: &str) -> Vec<Piece> {
    let piece = |space: bool, range: Range<usize>| {
        if space {
            Piece::Space(range)
        } else {
            Piece::Word(range)
        }
    };
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if let Some(prev) = current.filter(|&prev| prev != space) {
            pieces.push(piece(prev, start..i));
            start = i;
        }
        current = Some(space);
    }
    if let Some(prev) = current {
        pieces.push(piece(prev, start..text.len()));
    }
    pieces
}

/// Tokenize and disambiguate one word of the case-folded `text`.
///
/// Offsets in the returned tokens are absolute within `text`.
pub(crate) fn scan_word<'a>(
    table: &'a RuleTable,
    text: &'a str,
    word: Range<usize>,
) -> Vec<ResolvedToken<'a>> {
    let _span = debug_span!("tokenize_word", word = &text[word.clone()]).entered();
    let profile = WordProfile::scan(table, &text[word.clone()]);
    let mut tokens: Vec<ResolvedToken<'a>> = Vec::new();
    let mut offset = word.start;
    while offset < word.end {
        let ctx = ContextView::new(table, text, word.clone(), &tokens, profile);
        let token = select(candidates_at(table, text, offset, &ctx), &ctx);
        offset = token.candidate.end;
        tokens.push(token);
    }
    tokens
}

/// Transliterate `input`, keeping the span mapping and diagnostics.
pub fn transliterate_detailed(table: &RuleTable, input: &str) -> Transliteration {
    let _span = debug_span!("transliterate", len = input.len()).entered();
    let folded = input.to_ascii_lowercase();
    let mut out = Transliteration::with_capacity(input.len() * 3);
    for piece in split_words(&folded) {
        match piece {
            Piece::Space(range) => out.push_verbatim(range.clone(), &input[range]),
            Piece::Word(range) => {
                let tokens = scan_word(table, &folded, range);
                let segments = compose(tokens, table.schwa());
                let resolved = resolve(segments, table.schwa());
                assemble(&mut out, input, &resolved);
            }
        }
    }
    out
}

/// Transliterate Romanized Nepali `input` into Devanagari.
///
/// Case-insensitive. Whitespace is copied verbatim; characters no rule
/// matches pass through unchanged.
pub fn transliterate(table: &RuleTable, input: &str) -> String {
    transliterate_detailed(table, input).output
}
