//! Lipi engine: Romanized Nepali to Devanagari transliteration.
//!
//! The conversion pipeline lives in `lipi-core`; this crate adds batch
//! conversion, tracing setup and the UniFFI export layer.

pub mod api;
pub mod batch;
pub mod trace_init;

uniffi::setup_scaffolding!();

pub use batch::transliterate_batch;
pub use lipi_core::{
    transliterate, transliterate_detailed, Diagnostic, OutputSpan, RuleTable, RuleTableError,
    SpanKind, Transliteration,
};
