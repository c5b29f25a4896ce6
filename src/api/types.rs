use lipi_core::{Diagnostic, SpanKind, Transliteration};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum LipiError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
}

// ---------------------------------------------------------------------------
// Records (value types, copied across FFI boundary)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, uniffi::Record)]
pub struct LipiSpan {
    pub input_start: u64,
    pub input_end: u64,
    pub output: String,
    pub kind: LipiSpanKind,
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct LipiUnmapped {
    pub offset: u64,
    pub text: String,
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct LipiTransliteration {
    pub output: String,
    pub spans: Vec<LipiSpan>,
    pub unmapped: Vec<LipiUnmapped>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum LipiSpanKind {
    Syllable,
    Vowel,
    Modifier,
    Symbol,
    Virama,
    Unmapped,
    Whitespace,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<SpanKind> for LipiSpanKind {
    fn from(kind: SpanKind) -> Self {
        match kind {
            SpanKind::Syllable => Self::Syllable,
            SpanKind::Vowel => Self::Vowel,
            SpanKind::Modifier => Self::Modifier,
            SpanKind::Symbol => Self::Symbol,
            SpanKind::Virama => Self::Virama,
            SpanKind::Unmapped => Self::Unmapped,
            SpanKind::Whitespace => Self::Whitespace,
        }
    }
}

impl From<Transliteration> for LipiTransliteration {
    fn from(t: Transliteration) -> Self {
        let spans = t
            .spans
            .iter()
            .map(|s| LipiSpan {
                input_start: s.input.start as u64,
                input_end: s.input.end as u64,
                output: t.output[s.output.clone()].to_string(),
                kind: s.kind.into(),
            })
            .collect();
        let unmapped = t
            .diagnostics
            .iter()
            .map(|d| match d {
                Diagnostic::Unmapped { offset, ch } => LipiUnmapped {
                    offset: *offset as u64,
                    text: ch.to_string(),
                },
            })
            .collect();
        Self {
            output: t.output,
            spans,
            unmapped,
        }
    }
}
