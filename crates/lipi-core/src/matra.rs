use serde::Serialize;
use tracing::{debug, debug_span};

use crate::conjunct::{ConjunctUnit, Segment, Terminator};
use crate::rules::SchwaSettings;
use crate::token::{Phoneme, ResolvedToken};

/// Rendering of the vowel slot after a unit's last consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum VowelSlot<'a> {
    /// The consonant glyph already carries the vowel.
    InherentKept,
    SignAttached { sign: &'a str },
    /// Inherent vowel dropped; `virama` says whether the mark is written.
    SchwaDeleted { virama: bool },
}

#[derive(Debug, Clone)]
pub enum Resolved<'a> {
    Unit {
        unit: ConjunctUnit<'a>,
        slot: VowelSlot<'a>,
    },
    IndependentVowel(ResolvedToken<'a>),
    Other(ResolvedToken<'a>),
}

/// A bare unit ends its word when nothing follows, or only a symbol or
/// pass-through text.
fn ends_word(next: Option<&Segment<'_>>) -> bool {
    match next {
        None => true,
        Some(Segment::Other(t)) => matches!(t.phoneme, Phoneme::Symbol(_) | Phoneme::Unmapped),
        Some(Segment::Unit(_) | Segment::Vowel(_)) => false,
    }
}

fn slot_for<'a>(
    unit: &ConjunctUnit<'a>,
    next: Option<&Segment<'a>>,
    schwa: &SchwaSettings,
) -> VowelSlot<'a> {
    match &unit.terminator {
        Terminator::Vowel(t) => match t.phoneme {
            Phoneme::VowelSign(sign) => VowelSlot::SignAttached { sign },
            _ => VowelSlot::InherentKept,
        },
        Terminator::Marker(_) => VowelSlot::SchwaDeleted { virama: true },
        Terminator::Bare if ends_word(next) => VowelSlot::SchwaDeleted {
            virama: schwa.final_virama,
        },
        Terminator::Bare => VowelSlot::InherentKept,
    }
}

/// Decide the vowel slot of every unit in one word.
pub fn resolve<'a>(segments: Vec<Segment<'a>>, schwa: &SchwaSettings) -> Vec<Resolved<'a>> {
    let _span = debug_span!("resolve", segments = segments.len()).entered();
    let mut out = Vec::with_capacity(segments.len());
    let mut iter = segments.into_iter().peekable();
    while let Some(segment) = iter.next() {
        let resolved = match segment {
            Segment::Unit(unit) => {
                let slot = slot_for(&unit, iter.peek(), schwa);
                if let VowelSlot::SchwaDeleted { virama } = slot {
                    debug!(consonants = unit.consonants.len(), virama, "schwa deleted");
                }
                Resolved::Unit { unit, slot }
            }
            Segment::Vowel(t) => Resolved::IndependentVowel(t),
            Segment::Other(t) => Resolved::Other(t),
        };
        out.push(resolved);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conjunct::compose;
    use crate::pipeline::scan_word;
    use crate::rules::RuleTable;

    fn slots(text: &'static str, schwa: &SchwaSettings) -> Vec<VowelSlot<'static>> {
        let table = RuleTable::global();
        let tokens = scan_word(table, text, 0..text.len());
        resolve(compose(tokens, schwa), schwa)
            .into_iter()
            .filter_map(|r| match r {
                Resolved::Unit { slot, .. } => Some(slot),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn final_bare_consonant_loses_schwa() {
        let schwa = SchwaSettings::default();
        assert_eq!(
            slots("nepal", &schwa),
            vec![
                VowelSlot::SignAttached { sign: "े" },
                VowelSlot::SignAttached { sign: "ा" },
                VowelSlot::SchwaDeleted { virama: false },
            ]
        );
    }

    #[test]
    fn final_virama_setting() {
        let schwa = SchwaSettings {
            final_virama: true,
            keep_inherent_before: Vec::new(),
        };
        assert_eq!(
            slots("ram", &schwa).last(),
            Some(&VowelSlot::SchwaDeleted { virama: true })
        );
    }

    #[test]
    fn explicit_inherent_vowel_kept() {
        let schwa = SchwaSettings::default();
        assert_eq!(
            slots("kamal", &schwa)[0],
            VowelSlot::InherentKept,
            "first a is spelled out"
        );
    }

    #[test]
    fn marker_always_writes_virama() {
        let schwa = SchwaSettings::default();
        assert_eq!(
            slots("chhan.h", &schwa),
            vec![
                VowelSlot::InherentKept,
                VowelSlot::SchwaDeleted { virama: true }
            ]
        );
    }

    #[test]
    fn bare_before_modifier_keeps_inherent() {
        let schwa = SchwaSettings::default();
        assert_eq!(slots("k~", &schwa), vec![VowelSlot::InherentKept]);
    }

    #[test]
    fn bare_before_punctuation_is_word_final() {
        let schwa = SchwaSettings::default();
        assert_eq!(
            slots("ram,", &schwa).last(),
            Some(&VowelSlot::SchwaDeleted { virama: false })
        );
    }

    #[test]
    fn split_unit_keeps_inherent() {
        let schwa = SchwaSettings {
            final_virama: false,
            keep_inherent_before: vec!["t".to_string()],
        };
        assert_eq!(
            slots("namaste", &schwa),
            vec![
                VowelSlot::InherentKept,
                VowelSlot::InherentKept,
                VowelSlot::InherentKept,
                VowelSlot::SignAttached { sign: "े" },
            ]
        );
    }
}
