use crate::context::{ContextualizedControl, ContextualizedEvaluation};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Pairs the non-overlaid controls of several runs by control id, so a
/// consumer can walk cross-file deltas.
///
/// Control identity stays file-scoped: each run contributes at most one
/// instance per id, and the pairing key is the id itself. Two runs of
/// the same profile therefore line up into one row per logical control
/// instead of double-counting.
#[derive(Debug, Default)]
pub struct ComparisonContext {
    /// control id -> one slot per input evaluation, in input order
    pub pairings: BTreeMap<String, Vec<Option<Arc<ContextualizedControl>>>>,
    num_evaluations: usize,
}

impl ComparisonContext {
    #[must_use]
    pub fn new(evaluations: &[Arc<ContextualizedEvaluation>]) -> Self {
        let mut pairings: BTreeMap<String, Vec<Option<Arc<ContextualizedControl>>>> =
            BTreeMap::new();

        for (slot, evaluation) in evaluations.iter().enumerate() {
            for profile in &evaluation.profiles {
                for control in &profile.controls {
                    if control.is_overlaid() {
                        continue;
                    }
                    let row = pairings
                        .entry(control.data.id.clone())
                        .or_insert_with(|| vec![None; evaluations.len()]);
                    // First instance per run wins
                    if row[slot].is_none() {
                        row[slot] = Some(Arc::clone(control));
                    }
                }
            }
        }

        Self {
            pairings,
            num_evaluations: evaluations.len(),
        }
    }

    /// Number of distinct logical controls across all inputs
    #[must_use]
    pub fn unique_controls(&self) -> usize {
        self.pairings.len()
    }

    #[must_use]
    pub const fn num_evaluations(&self) -> usize {
        self.num_evaluations
    }

    /// Ids present in at least two runs whose statuses do not all agree
    #[must_use]
    pub fn changed(&self) -> Vec<&str> {
        self.pairings
            .iter()
            .filter(|(_, row)| {
                let statuses: Vec<_> = row
                    .iter()
                    .flatten()
                    .map(|control| control.status)
                    .collect();
                statuses.len() >= 2 && statuses.windows(2).any(|pair| pair[0] != pair[1])
            })
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
