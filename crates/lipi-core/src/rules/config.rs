use std::collections::HashMap;

use serde::Deserialize;

use super::predicate::Predicate;
use super::RuleKind;

/// Top-level shape of a rule table TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSpec {
    #[serde(default)]
    pub schwa: SchwaSettings,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// One `[[rules]]` entry as written in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub pattern: String,
    pub kind: RuleKind,
    pub glyph: String,
    #[serde(default)]
    pub sign: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub when: Vec<Predicate>,
}

/// Schwa deletion knobs (`[schwa]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchwaSettings {
    /// Write a virama on word-final bare consonants.
    #[serde(default)]
    pub final_virama: bool,
    /// Consonant patterns that start a new unit instead of joining the
    /// preceding bare consonant, which then keeps its inherent vowel.
    #[serde(default)]
    pub keep_inherent_before: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RuleTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[[rules]] table is empty")]
    Empty,
    #[error("rule #{index}: empty pattern")]
    EmptyPattern { index: usize },
    #[error("non-ASCII pattern: {0}")]
    NonAsciiPattern(String),
    #[error("upper-case pattern (input is case-folded): {0}")]
    UpperCasePattern(String),
    #[error("pattern contains whitespace: {0:?}")]
    WhitespacePattern(String),
    #[error("empty glyph for pattern: {0}")]
    EmptyGlyph(String),
    #[error("vowel rule without sign: {0}")]
    MissingSign(String),
    #[error("sign given for non-vowel rule: {0}")]
    UnexpectedSign(String),
    #[error("invalid predicate on {pattern}: {reason}")]
    InvalidPredicate { pattern: String, reason: String },
    #[error("conflicting rules for {pattern}: {reason}")]
    Conflict { pattern: String, reason: String },
    #[error("schwa.keep_inherent_before: {0} is not a consonant pattern")]
    UnknownSchwaPattern(String),
    #[error("rule table already initialized")]
    AlreadyInitialized,
}

/// Parse and validate rule table TOML.
pub fn parse_rules_toml(toml_str: &str) -> Result<TableSpec, RuleTableError> {
    let spec: TableSpec =
        toml::from_str(toml_str).map_err(|e| RuleTableError::Parse(e.to_string()))?;
    validate(&spec)?;
    Ok(spec)
}

pub(crate) fn validate(spec: &TableSpec) -> Result<(), RuleTableError> {
    if spec.rules.is_empty() {
        return Err(RuleTableError::Empty);
    }

    for (index, rule) in spec.rules.iter().enumerate() {
        validate_rule(index, rule)?;
    }

    let mut by_pattern: HashMap<&str, Vec<&RuleSpec>> = HashMap::new();
    for rule in &spec.rules {
        by_pattern.entry(rule.pattern.as_str()).or_default().push(rule);
    }
    for (pattern, rules) in &by_pattern {
        check_conflicts(pattern, rules)?;
    }

    for pattern in &spec.schwa.keep_inherent_before {
        let is_consonant = by_pattern
            .get(pattern.as_str())
            .is_some_and(|rules| rules.iter().any(|r| r.kind == RuleKind::Consonant));
        if !is_consonant {
            return Err(RuleTableError::UnknownSchwaPattern(pattern.clone()));
        }
    }

    Ok(())
}

fn validate_rule(index: usize, rule: &RuleSpec) -> Result<(), RuleTableError> {
    if rule.pattern.is_empty() {
        return Err(RuleTableError::EmptyPattern { index });
    }
    if !rule.pattern.is_ascii() {
        return Err(RuleTableError::NonAsciiPattern(rule.pattern.clone()));
    }
    if rule.pattern.chars().any(|c| c.is_ascii_whitespace()) {
        return Err(RuleTableError::WhitespacePattern(rule.pattern.clone()));
    }
    if rule.pattern.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(RuleTableError::UpperCasePattern(rule.pattern.clone()));
    }
    if rule.glyph.is_empty() {
        return Err(RuleTableError::EmptyGlyph(rule.pattern.clone()));
    }
    match (rule.kind, &rule.sign) {
        (RuleKind::Vowel, None) => return Err(RuleTableError::MissingSign(rule.pattern.clone())),
        (RuleKind::Vowel, Some(_)) => {}
        (_, Some(_)) => return Err(RuleTableError::UnexpectedSign(rule.pattern.clone())),
        (_, None) => {}
    }
    for predicate in &rule.when {
        predicate
            .validate()
            .map_err(|reason| RuleTableError::InvalidPredicate {
                pattern: rule.pattern.clone(),
                reason,
            })?;
    }
    Ok(())
}

fn check_conflicts(pattern: &str, rules: &[&RuleSpec]) -> Result<(), RuleTableError> {
    let unconditional = rules.iter().filter(|r| r.when.is_empty()).count();
    if unconditional > 1 {
        return Err(RuleTableError::Conflict {
            pattern: pattern.to_string(),
            reason: format!("{unconditional} unconditional rules"),
        });
    }
    for (i, a) in rules.iter().enumerate() {
        for b in &rules[i + 1..] {
            if a.when == b.when && a.priority == b.priority {
                return Err(RuleTableError::Conflict {
                    pattern: pattern.to_string(),
                    reason: "identical predicates at equal priority".to_string(),
                });
            }
        }
    }
    Ok(())
}
