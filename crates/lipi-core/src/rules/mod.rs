//! Declarative rule table: Roman grapheme patterns mapped to Devanagari forms.
//!
//! The table is parsed from TOML, validated once, and then only read. Rules
//! are indexed by pattern and the distinct pattern lengths are kept in
//! descending order so the tokenizer can try the longest patterns first
//! without depending on declaration order.
//!
//! - `RuleTable::init_custom(toml_content)` sets a custom table before first `global()` call
//! - `RuleTable::global()` returns `&'static RuleTable` (lazy-init singleton)
//! - The default table is embedded via `include_str!("default_rules.toml")`

mod config;
mod predicate;

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::context::ContextView;

pub use config::{parse_rules_toml, RuleSpec, RuleTableError, SchwaSettings, TableSpec};
pub use predicate::Predicate;

pub const DEFAULT_RULES_TOML: &str = include_str!("default_rules.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<RuleTable> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Vowel,
    Consonant,
    ConjunctMarker,
    Modifier,
    /// Digits and danda marks; they stand alone like punctuation.
    Symbol,
}

impl RuleKind {
    /// Whether the kind takes part in syllable structure.
    pub fn is_letter(self) -> bool {
        !matches!(self, RuleKind::Symbol)
    }
}

/// A validated rule. `order` is its position in the source table.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub kind: RuleKind,
    pub priority: i32,
    pub when: Vec<Predicate>,
    /// Independent vowel, consonant base, modifier sign, virama or symbol.
    pub glyph: String,
    /// Dependent vowel sign; `Some("")` is the inherent vowel.
    pub sign: Option<String>,
    pub order: usize,
}

impl Rule {
    pub fn is_conditional(&self) -> bool {
        !self.when.is_empty()
    }

    /// All predicates hold for the match `start..end`.
    pub fn applies(&self, ctx: &ContextView<'_>, start: usize, end: usize) -> bool {
        self.when.iter().all(|p| p.holds(ctx, start, end))
    }
}

#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
    by_pattern: HashMap<String, Vec<usize>>,
    /// Distinct pattern lengths in bytes, longest first.
    lengths: Vec<usize>,
    schwa: SchwaSettings,
}

impl RuleTable {
    /// Parse and validate a table from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self, RuleTableError> {
        parse_rules_toml(toml_str).map(Self::from_spec)
    }

    fn from_spec(spec: TableSpec) -> Self {
        let rules: Vec<Rule> = spec
            .rules
            .into_iter()
            .enumerate()
            .map(|(order, r)| Rule {
                pattern: r.pattern,
                kind: r.kind,
                priority: r.priority,
                when: r.when,
                glyph: r.glyph,
                sign: r.sign,
                order,
            })
            .collect();

        let mut by_pattern: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, rule) in rules.iter().enumerate() {
            by_pattern.entry(rule.pattern.clone()).or_default().push(i);
        }

        let mut lengths: Vec<usize> = by_pattern.keys().map(String::len).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths.dedup();

        Self {
            rules,
            by_pattern,
            lengths,
            schwa: spec.schwa,
        }
    }

    /// Set custom TOML before first `global()` call.
    ///
    /// Fails with `AlreadyInitialized` once the global table has been built.
    pub fn init_custom(toml_content: String) -> Result<(), RuleTableError> {
        // Validate eagerly
        parse_rules_toml(&toml_content)?;
        if INSTANCE.get().is_some() {
            return Err(RuleTableError::AlreadyInitialized);
        }
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RuleTableError::AlreadyInitialized)
    }

    /// Get or initialize the process-wide table.
    pub fn global() -> &'static RuleTable {
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_RULES_TOML);
            RuleTable::from_toml(toml_str).expect("rule table TOML must be valid")
        })
    }

    /// Returns the embedded default rule table TOML content.
    pub fn default_toml() -> &'static str {
        DEFAULT_RULES_TOML
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn schwa(&self) -> &SchwaSettings {
        &self.schwa
    }

    /// Rules declared for exactly this pattern, in declaration order.
    pub fn rules_for(&self, pattern: &str) -> impl Iterator<Item = &Rule> + '_ {
        self.by_pattern
            .get(pattern)
            .into_iter()
            .flatten()
            .map(move |&i| &self.rules[i])
    }

    /// Longest unconditional rule that is a prefix of `text`.
    ///
    /// Used to classify raw text to the right of a match, where no resolved
    /// context exists yet.
    pub fn peek(&self, text: &str) -> Option<&Rule> {
        self.lengths.iter().find_map(|&len| {
            let head = text.get(..len)?;
            self.rules_for(head).find(|r| !r.is_conditional())
        })
    }
}
