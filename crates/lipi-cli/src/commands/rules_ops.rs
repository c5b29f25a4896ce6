use std::collections::BTreeMap;
use std::fmt;

use lipi_core::rules::{parse_rules_toml, RuleKind, RuleTable};

use super::{read_file, CliError};

pub fn rules_export() {
    print!("{}", RuleTable::default_toml());
}

/// Rule counts of a validated table.
#[derive(Debug)]
pub struct RulesSummary {
    pub total: usize,
    pub conditional: usize,
    pub by_kind: BTreeMap<&'static str, usize>,
    pub final_virama: bool,
}

impl fmt::Display for RulesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OK: {} rules ({} conditional), schwa.final_virama={}",
            self.total, self.conditional, self.final_virama
        )?;
        for (kind, count) in &self.by_kind {
            write!(f, "\n  {kind:<16}{count:>4}")?;
        }
        Ok(())
    }
}

fn kind_name(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Vowel => "vowel",
        RuleKind::Consonant => "consonant",
        RuleKind::ConjunctMarker => "conjunct_marker",
        RuleKind::Modifier => "modifier",
        RuleKind::Symbol => "symbol",
    }
}

pub fn summarize(toml_str: &str) -> Result<RulesSummary, CliError> {
    let spec = parse_rules_toml(toml_str)?;
    let mut by_kind = BTreeMap::new();
    for rule in &spec.rules {
        *by_kind.entry(kind_name(rule.kind)).or_insert(0) += 1;
    }
    Ok(RulesSummary {
        total: spec.rules.len(),
        conditional: spec.rules.iter().filter(|r| !r.when.is_empty()).count(),
        by_kind,
        final_virama: spec.schwa.final_virama,
    })
}

pub fn rules_validate(file: &str) -> Result<RulesSummary, CliError> {
    summarize(&read_file(file)?)
}
