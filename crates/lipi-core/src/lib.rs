//! Romanized Nepali to Devanagari transliteration.
//!
//! The engine is a pure function of the input and a [`rules::RuleTable`]:
//! a longest-match tokenizer, a context-sensitive disambiguator, a conjunct
//! composer and a matra/schwa resolver feed an assembler that produces the
//! Devanagari string together with a span map back to the input.

pub mod assemble;
pub mod conjunct;
pub mod context;
pub mod disambiguate;
pub mod matra;
pub mod pipeline;
pub mod rules;
pub mod token;
pub mod tokenizer;
pub mod unicode;

pub use assemble::{Diagnostic, OutputSpan, SpanKind, Transliteration};
pub use pipeline::{transliterate, transliterate_detailed};
pub use rules::{RuleTable, RuleTableError};
