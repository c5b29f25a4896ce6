use tracing::debug;

use crate::context::ContextView;
use crate::rules::RuleTable;
use crate::token::{Candidates, MatchCandidate};

/// Longest-match candidates at `offset` of the case-folded `text`.
///
/// Pattern lengths are tried longest first; the first length at which some
/// rule both matches literally and has its predicates hold yields all such
/// rules. When nothing applies, one character is passed through unmapped, so
/// the scan always advances.
pub fn candidates_at<'a>(
    table: &'a RuleTable,
    text: &'a str,
    offset: usize,
    ctx: &ContextView<'_>,
) -> Candidates<'a> {
    let word_end = ctx.word().end;
    debug_assert!(offset < word_end, "offset {offset} out of word bounds");
    let rest = text.get(offset..word_end).unwrap_or("");

    for &len in table.lengths() {
        let Some(head) = rest.get(..len) else {
            continue;
        };
        let end = offset + len;
        let applicable: Vec<MatchCandidate<'a>> = table
            .rules_for(head)
            .filter(|rule| rule.applies(ctx, offset, end))
            .map(|rule| MatchCandidate {
                start: offset,
                end,
                rule: Some(rule),
                text: &text[offset..end],
            })
            .collect();
        if let Some(candidates) = Candidates::from_vec(applicable) {
            return candidates;
        }
    }

    let width = rest.chars().next().map_or(1, char::len_utf8);
    let slice = text.get(offset..offset + width).unwrap_or("");
    debug!(offset, ch = slice, "unmapped");
    Candidates::single(MatchCandidate::unmapped(offset, slice))
}
