use rayon::prelude::*;
use tracing::debug_span;

use lipi_core::{transliterate, RuleTable};

/// Transliterate every input independently.
///
/// Inputs are spread over the rayon pool; the result keeps input order.
pub fn transliterate_batch<S>(table: &RuleTable, inputs: &[S]) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    let _span = debug_span!("transliterate_batch", inputs = inputs.len()).entered();
    inputs
        .par_iter()
        .map(|input| transliterate(table, input.as_ref()))
        .collect()
}
