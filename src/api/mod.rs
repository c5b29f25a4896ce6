//! UniFFI export layer: Swift/Kotlin bindings for the Lipi engine.
//!
//! Each public type here maps to a generated class, record, or enum.

mod engine;
mod types;

pub use engine::LipiEngine;
pub use types::{LipiError, LipiSpan, LipiSpanKind, LipiTransliteration, LipiUnmapped};

use std::path::Path;

use lipi_core::RuleTable;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[uniffi::export]
fn transliterate(text: String) -> String {
    lipi_core::transliterate(RuleTable::global(), &text)
}

#[uniffi::export]
fn transliterate_batch(texts: Vec<String>) -> Vec<String> {
    crate::batch::transliterate_batch(RuleTable::global(), &texts)
}

#[uniffi::export]
fn rules_load_config(path: String) -> Result<(), LipiError> {
    let content = std::fs::read_to_string(&path).map_err(|e| LipiError::Io {
        msg: format!("{path}: {e}"),
    })?;
    RuleTable::init_custom(content).map_err(|e| LipiError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn rules_default_config() -> String {
    RuleTable::default_toml().to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}
