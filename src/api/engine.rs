use std::sync::Arc;

use lipi_core::{transliterate, transliterate_detailed, RuleTable};

use super::{LipiError, LipiTransliteration};

/// A transliterator bound to one rule table.
///
/// Without a custom table the engine uses the process-wide default.
#[derive(uniffi::Object)]
pub struct LipiEngine {
    custom: Option<RuleTable>,
}

impl LipiEngine {
    fn table(&self) -> &RuleTable {
        self.custom.as_ref().unwrap_or_else(|| RuleTable::global())
    }
}

#[uniffi::export]
impl LipiEngine {
    #[uniffi::constructor]
    fn new() -> Arc<Self> {
        Arc::new(Self { custom: None })
    }

    #[uniffi::constructor]
    fn from_toml(toml: String) -> Result<Arc<Self>, LipiError> {
        let table =
            RuleTable::from_toml(&toml).map_err(|e| LipiError::InvalidData { msg: e.to_string() })?;
        Ok(Arc::new(Self {
            custom: Some(table),
        }))
    }

    #[uniffi::constructor]
    fn open(path: String) -> Result<Arc<Self>, LipiError> {
        let content = std::fs::read_to_string(&path).map_err(|e| LipiError::Io {
            msg: format!("{path}: {e}"),
        })?;
        Self::from_toml(content)
    }

    fn transliterate(&self, input: String) -> String {
        transliterate(self.table(), &input)
    }

    fn transliterate_batch(&self, inputs: Vec<String>) -> Vec<String> {
        crate::batch::transliterate_batch(self.table(), &inputs)
    }

    fn transliterate_detailed(&self, input: String) -> LipiTransliteration {
        transliterate_detailed(self.table(), &input).into()
    }

    fn rule_count(&self) -> u32 {
        self.table().rules().len() as u32
    }
}
