//! Data models for Idlemax.
//!
//! This module contains the core data structures used throughout the
//! crate: purchasable items and their cost/rate curves, the immutable
//! ownership [`State`] explored by the search, and the plan/outcome
//! types handed to the presentation layer.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, SearchError};

/// Geometric price inflation per unit already owned.
pub const COST_GROWTH: f64 = 1.15;

/// Name of the producer injected under manual-start mode.
pub const HUMAN_NAME: &str = "Human";

/// A purchasable producer with a cost curve and a per-unit production rate.
///
/// # Example
///
/// ```
/// use idlemax::models::Item;
///
/// let cursor = Item {
///     name: "Cursor".to_string(),
///     base_cost: 15.0,
///     rate: 0.1,
/// };
///
/// assert_eq!(cursor.cost(0), 15.0);
/// assert_eq!(cursor.cost(1), 18.0); // ceil(15 * 1.15)
/// assert!(cursor.is_purchasable());
/// ```
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique name of the item (e.g., "Cursor", "Grandma").
    pub name: String,
    /// Price of the first unit. `f64::INFINITY` marks a non-purchasable
    /// bootstrap producer.
    pub base_cost: f64,
    /// Production rate contributed by each owned unit.
    pub rate: f64,
}

impl Item {
    /// Whether the item can ever be bought.
    pub fn is_purchasable(&self) -> bool {
        self.base_cost.is_finite()
    }

    /// Price of the next unit when `count` units are already owned:
    /// `ceil(base_cost * 1.15^count)`.
    pub fn cost(&self, count: u32) -> f64 {
        (self.base_cost * COST_GROWTH.powi(count as i32)).ceil()
    }

    /// Total rate contributed by `count` owned units.
    pub fn rate_at(&self, count: u32) -> f64 {
        self.rate * f64::from(count)
    }
}

/// How the initial producer is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartMode {
    /// Start with one unit of the first catalog item.
    Automated,
    /// Start with one non-purchasable "Human" producer at the given rate.
    Manual {
        /// Production rate of the Human producer.
        human_rate: f64,
    },
}

/// The ordered, immutable list of item definitions for a run.
///
/// Catalog order is stable and is the only order used for iteration and
/// tie-breaking. The bootstrap producer always sits at index 0.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog from item definitions and a start mode.
    ///
    /// Under [`StartMode::Manual`] a `Human` item with infinite cost is
    /// prepended; under [`StartMode::Automated`] the first item doubles
    /// as the bootstrap producer.
    ///
    /// # Errors
    ///
    /// Rejects catalogs with no purchasable items, duplicate names,
    /// negative or NaN costs, non-finite or negative rates, zero costs
    /// on purchasable items (a free item would be bought forever and the
    /// search would never terminate), and a bootstrap producer with zero
    /// rate (every purchase time divides by the current rate).
    pub fn new(mut items: Vec<Item>, start: StartMode) -> Result<Self, CatalogError> {
        if let StartMode::Manual { human_rate } = start {
            items.insert(
                0,
                Item {
                    name: HUMAN_NAME.to_string(),
                    base_cost: f64::INFINITY,
                    rate: human_rate,
                },
            );
        }

        if !items.iter().any(Item::is_purchasable) {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.name.clone()) {
                return Err(CatalogError::DuplicateName(item.name.clone()));
            }
            if item.base_cost.is_nan() || item.base_cost < 0.0 {
                return Err(CatalogError::InvalidItem {
                    name: item.name.clone(),
                    reason: "base cost must be non-negative".to_string(),
                });
            }
            if item.is_purchasable() && item.base_cost == 0.0 {
                return Err(CatalogError::InvalidItem {
                    name: item.name.clone(),
                    reason: "base cost of a purchasable item must be positive".to_string(),
                });
            }
            if !item.rate.is_finite() || item.rate < 0.0 {
                return Err(CatalogError::InvalidItem {
                    name: item.name.clone(),
                    reason: "rate must be a non-negative finite number".to_string(),
                });
            }
        }

        if items[0].rate <= 0.0 {
            return Err(CatalogError::InvalidItem {
                name: items[0].name.clone(),
                reason: "bootstrap producer must have a positive rate".to_string(),
            });
        }

        Ok(Self { items })
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The item at the given catalog index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; indices originate from the
    /// catalog itself, so an out-of-range index is a caller bug.
    pub fn item(&self, index: usize) -> &Item {
        &self.items[index]
    }

    /// Number of items, bootstrap included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Catalog index of the bootstrap producer.
    pub fn bootstrap(&self) -> usize {
        0
    }
}

/// An immutable snapshot of owned quantities for every catalog item.
///
/// Identity is the exact quantity vector: two states are equal iff
/// their counts are equal over the full catalog. A state also carries a
/// back-pointer to the state it was constructed from and the purchase
/// that produced it, so the plan can be reconstructed by walking the
/// chain. The vector never changes after construction; "adding" an item
/// produces a new state.
#[derive(Debug)]
pub struct State {
    counts: Vec<u32>,
    parent: Option<Rc<State>>,
    step: Option<usize>,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.counts.hash(hasher);
    }
}

impl State {
    /// The initial state: one unit of the bootstrap producer, no parent.
    pub fn initial(catalog: &Catalog) -> Rc<Self> {
        let mut counts = vec![0; catalog.len()];
        counts[catalog.bootstrap()] = 1;
        Rc::new(Self {
            counts,
            parent: None,
            step: None,
        })
    }

    /// Owned quantities in catalog order.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Quantity owned of the item at the given catalog index.
    pub fn count(&self, item: usize) -> u32 {
        self.counts[item]
    }

    /// The purchase that produced this state, if any.
    pub fn step(&self) -> Option<usize> {
        self.step
    }

    /// The state this one was constructed from, if any.
    pub fn parent(&self) -> Option<&Rc<State>> {
        self.parent.as_ref()
    }

    /// Returns a new state with one more unit of the given item, with
    /// this state as its parent. The only production operation used
    /// during forward search.
    pub fn add(self: &Rc<Self>, item: usize) -> Rc<State> {
        let mut counts = self.counts.clone();
        counts[item] += 1;
        Rc::new(State {
            counts,
            parent: Some(Rc::clone(self)),
            step: Some(item),
        })
    }

    /// Returns a new state with one fewer unit of the given item and no
    /// parent/step. Used only by the dominance analysis; the result is a
    /// hypothetical comparison state, never a search node.
    ///
    /// # Errors
    ///
    /// [`SearchError::NegativeQuantity`] if the quantity is already zero.
    pub fn decrement(&self, item: usize) -> Result<State, SearchError> {
        if self.counts[item] == 0 {
            return Err(SearchError::NegativeQuantity { item });
        }
        let mut counts = self.counts.clone();
        counts[item] -= 1;
        Ok(State {
            counts,
            parent: None,
            step: None,
        })
    }

    /// Total current production rate: the sum of every item's per-unit
    /// rate times its owned quantity.
    pub fn rate(&self, catalog: &Catalog) -> f64 {
        catalog
            .items()
            .iter()
            .zip(&self.counts)
            .map(|(item, &count)| item.rate_at(count))
            .sum()
    }

    /// Marginal price of the next unit of the given item in this state.
    pub fn cost(&self, catalog: &Catalog, item: usize) -> f64 {
        catalog.item(item).cost(self.counts[item])
    }

    /// The path by which this state was first constructed, from the
    /// initial state to `self`.
    pub fn lineage(self: &Rc<Self>) -> Vec<Rc<State>> {
        let mut chain = Vec::new();
        let mut current = Rc::clone(self);
        loop {
            chain.push(Rc::clone(&current));
            match current.parent().cloned() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        chain.reverse();
        chain
    }
}

/// One step of a reconstructed plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanStep {
    /// Earliest time at which the step's state is reached.
    pub time: f64,
    /// Item bought to reach this state; `None` for the initial state.
    pub item: Option<String>,
    /// Resulting quantity vector in catalog order.
    pub counts: Vec<u32>,
    /// Resulting total production rate.
    pub rate: f64,
}

/// Diagnostic counters accumulated over a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// States expanded authoritatively.
    pub expanded: u64,
    /// Popped entries discarded because a better arrival was known.
    pub stale_skipped: u64,
    /// Entries pushed onto the frontier.
    pub enqueued: u64,
    /// Offers rejected because an arrival at or before the offered time
    /// was already recorded.
    pub offers_rejected: u64,
    /// Frontier entries removed by the dominance pruner.
    pub pruned: u64,
}

/// Everything the search hands to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Highest production rate discovered among expanded states.
    pub best_rate: f64,
    /// Quantity vector of the best state, in catalog order.
    pub best_counts: Vec<u32>,
    /// Ordered purchase schedule ending at the best state.
    pub plan: Vec<PlanStep>,
    /// Diagnostic counters.
    pub stats: SearchStats,
}

/// CSV row structure for the catalog file.
///
/// Expected columns: `name, base_cost, rate`.
#[derive(Debug, Deserialize)]
pub struct CatalogRow {
    /// Item name.
    pub name: String,
    /// Price of the first unit.
    pub base_cost: u64,
    /// Production rate per owned unit.
    pub rate: f64,
}
