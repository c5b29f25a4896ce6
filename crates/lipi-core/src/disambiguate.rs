use std::cmp::Reverse;

use tracing::debug;

use crate::context::ContextView;
use crate::rules::{Rule, RuleKind};
use crate::token::{Candidates, Decision, MatchCandidate, Phoneme, ResolvedToken};

/// Ordering key: a rule whose predicates held beats an unconditional one,
/// then higher priority, then earlier declaration.
fn rank(rule: &Rule) -> (bool, i32, Reverse<usize>) {
    (rule.is_conditional(), rule.priority, Reverse(rule.order))
}

/// Pick exactly one candidate and decide which phoneme it stands for.
pub fn select<'a>(candidates: Candidates<'a>, ctx: &ContextView<'_>) -> ResolvedToken<'a> {
    let mut ranked: Vec<(&'a Rule, MatchCandidate<'a>)> = candidates
        .iter()
        .filter_map(|c| c.rule.map(|r| (r, *c)))
        .collect();
    ranked.sort_by_key(|(rule, _)| Reverse(rank(rule)));

    let Some(&(winner, candidate)) = ranked.first() else {
        let candidate = *candidates.first();
        return ResolvedToken {
            candidate,
            phoneme: Phoneme::Unmapped,
            decision: Decision::Unmapped,
        };
    };

    let decision = match ranked.get(1) {
        None if winner.is_conditional() => Decision::Predicate,
        None => Decision::Only,
        Some((runner_up, _)) if winner.is_conditional() != runner_up.is_conditional() => {
            Decision::Predicate
        }
        Some((runner_up, _)) if winner.priority != runner_up.priority => Decision::Priority,
        Some(_) => Decision::DeclarationOrder,
    };
    if ranked.len() > 1 {
        debug!(
            pattern = winner.pattern.as_str(),
            glyph = winner.glyph.as_str(),
            rivals = ranked.len() - 1,
            ?decision,
            "disambiguated"
        );
    }

    ResolvedToken {
        candidate,
        phoneme: classify(winner, ctx),
        decision,
    }
}

/// A vowel directly after a consonant base is written as its sign (or left
/// as the inherent vowel); anywhere else it is an independent letter.
fn classify<'a>(rule: &'a Rule, ctx: &ContextView<'_>) -> Phoneme<'a> {
    match rule.kind {
        RuleKind::Vowel => {
            let after_consonant = ctx.prev().is_some_and(|p| p.is_consonant());
            match rule.sign.as_deref() {
                Some("") if after_consonant => Phoneme::InherentVowel,
                Some(sign) if after_consonant => Phoneme::VowelSign(sign),
                _ => Phoneme::IndependentVowel(&rule.glyph),
            }
        }
        RuleKind::Consonant => Phoneme::ConsonantBase(&rule.glyph),
        RuleKind::ConjunctMarker => Phoneme::Virama,
        RuleKind::Modifier => Phoneme::Modifier(&rule.glyph),
        RuleKind::Symbol => Phoneme::Symbol(&rule.glyph),
    }
}
