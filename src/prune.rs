//! Dominance-based frontier pruning.
//!
//! A state is dominated when some already-expanded state strictly
//! subsumes its purchasing progress: drop one unit of any purchasable
//! item from an expanded state and the result is presumed reachable at
//! least as early via a path that simply skips that purchase. Closing
//! this set under repeated decrementing yields every state whose
//! pending expansion is redundant. Removing those entries bounds the
//! frontier on long-horizon runs; the pass is heuristic and explicitly
//! safe to skip.

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::SearchError;
use crate::models::{Catalog, State};
use crate::search::Frontier;

/// Computes the dominated set: the closure, under single-item
/// decrements of purchasable items, of the given expanded states. The
/// seeds themselves are not members unless reachable by decrementing
/// another seed.
///
/// # Errors
///
/// [`SearchError::NegativeQuantity`] if a zero quantity is ever
/// decremented; the closure only decrements positive quantities, so
/// this indicates a logic defect.
pub fn dominated_closure(
    catalog: &Catalog,
    expanded: &[Rc<State>],
) -> Result<HashSet<Vec<u32>>, SearchError> {
    let mut dominated: HashSet<Vec<u32>> = HashSet::new();
    let mut worklist: Vec<State> = Vec::new();

    let purchasable: Vec<usize> = (0..catalog.len())
        .filter(|&index| catalog.item(index).is_purchasable())
        .collect();

    for seed in expanded {
        for &index in &purchasable {
            if seed.count(index) == 0 {
                continue;
            }
            let neighbor = seed.decrement(index)?;
            if dominated.insert(neighbor.counts().to_vec()) {
                worklist.push(neighbor);
            }
        }
    }

    while let Some(state) = worklist.pop() {
        for &index in &purchasable {
            if state.count(index) == 0 {
                continue;
            }
            let neighbor = state.decrement(index)?;
            if dominated.insert(neighbor.counts().to_vec()) {
                worklist.push(neighbor);
            }
        }
    }

    Ok(dominated)
}

/// Drops every within-horizon frontier entry whose quantity vector is
/// in the dominated set and returns how many were removed.
/// Best-known-arrival-time entries are left in place; only the
/// redundant pending expansions go. Entries beyond the horizon are
/// always kept: they are the sentinels the search terminates on, and a
/// dominated sentinel costs nothing because it is never expanded.
pub(crate) fn retain_undominated(
    frontier: &mut Frontier,
    dominated: &HashSet<Vec<u32>>,
    horizon: f64,
) -> usize {
    let before = frontier.len();
    frontier.retain_entries(|time, counts| time > horizon || !dominated.contains(counts));
    before - frontier.len()
}
