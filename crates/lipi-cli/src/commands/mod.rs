pub mod accuracy;
pub mod convert_ops;
pub mod rules_ops;

use std::fs;

use lipi_core::{RuleTable, RuleTableError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("rule table: {0}")]
    Rules(#[from] RuleTableError),
    #[error("{path}: {msg}")]
    Corpus { path: String, msg: String },
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

/// A rule table owned by the command or the built-in default.
pub enum TableSource {
    Default,
    Custom(RuleTable),
}

impl TableSource {
    pub fn table(&self) -> &RuleTable {
        match self {
            TableSource::Default => RuleTable::global(),
            TableSource::Custom(table) => table,
        }
    }
}

/// Load the rule table at `path`, or the built-in table when `None`.
pub fn load_table(path: Option<&str>) -> Result<TableSource, CliError> {
    match path {
        None => Ok(TableSource::Default),
        Some(path) => {
            let content = read_file(path)?;
            Ok(TableSource::Custom(RuleTable::from_toml(&content)?))
        }
    }
}
