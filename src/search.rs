//! Best-first reachability search over ownership states.
//!
//! The engine runs a Dijkstra-style loop over "time to reach state X":
//! the edge weight from a state via an item is the item's marginal cost
//! divided by the state's current production rate, the time needed to
//! save up for the purchase. The rate is held constant over the
//! purchase interval; compounding from other pending purchases is
//! deliberately ignored. The graph is generated lazily because the
//! reachable state space is unbounded, while the horizon and the
//! geometric cost growth bound the portion actually explored.
//!
//! The frontier may hold stale entries: offering a state never removes
//! the older, slower entry for the same quantity vector. Staleness is
//! detected at pop time by comparing against the best-known-arrival-time
//! map, counted, and skipped.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::SearchError;
use crate::models::{Catalog, PlanStep, SearchOutcome, SearchStats, State};
use crate::prune;

/// A pending (time, state) candidate.
#[derive(Debug, Clone)]
struct FrontierEntry {
    time: f64,
    state: Rc<State>,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Earliest time first; ties broken lexicographically over the
        // catalog-ordered quantity vector so the order is total and
        // deterministic.
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.state.counts().cmp(other.state.counts()))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Priority queue of (time, state) candidates ordered by earliest
/// reachable time.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
}

impl Frontier {
    /// Pushes a candidate. Push is append-only; duplicates for the same
    /// state are allowed and resolved at pop time.
    pub fn push(&mut self, time: f64, state: Rc<State>) {
        self.heap.push(Reverse(FrontierEntry { time, state }));
    }

    /// Removes and returns the earliest candidate.
    pub fn pop(&mut self) -> Option<(f64, Rc<State>)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.time, entry.state))
    }

    /// Number of pending candidates, stale entries included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no candidates are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every candidate failing the predicate over its arrival
    /// time and quantity vector.
    pub(crate) fn retain_entries<F>(&mut self, mut keep: F)
    where
        F: FnMut(f64, &[u32]) -> bool,
    {
        self.heap
            .retain(|Reverse(entry)| keep(entry.time, entry.state.counts()));
    }
}

/// Engine inputs for a single run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search horizon T: the loop terminates once the earliest frontier
    /// time exceeds it.
    pub horizon: f64,
    /// Emit a `tracing` debug event per expansion and successor.
    pub debug: bool,
    /// Seconds of wall clock between progress reports; 0 disables.
    pub report_interval: f64,
    /// Run the dominance pruning pass every this many expansions.
    /// `None` (the default) never prunes. Pruning trades frontier memory
    /// for the dominance assumption described in [`crate::prune`];
    /// beyond-horizon entries are never removed, so a pruned run still
    /// terminates normally.
    pub prune_every: Option<u64>,
}

impl SearchConfig {
    /// Configuration with the given horizon and every extra disabled.
    pub fn new(horizon: f64) -> Self {
        Self {
            horizon,
            debug: false,
            report_interval: 0.0,
            prune_every: None,
        }
    }
}

/// The best-first search session: frontier, best-known-arrival-time
/// map, best-state tracker, and diagnostic counters. All working state
/// lives here; nothing is process-global.
pub struct SearchEngine<'a> {
    catalog: &'a Catalog,
    config: SearchConfig,
    frontier: Frontier,
    min_times: HashMap<Vec<u32>, f64>,
    expanded: Vec<Rc<State>>,
    best: Option<(f64, Rc<State>)>,
    min_overshoot: Option<f64>,
    stats: SearchStats,
}

impl<'a> SearchEngine<'a> {
    /// Creates an engine seeded with one unit of the catalog's
    /// bootstrap producer at time 0.
    pub fn new(catalog: &'a Catalog, config: SearchConfig) -> Self {
        let mut engine = Self {
            catalog,
            config,
            frontier: Frontier::default(),
            min_times: HashMap::new(),
            expanded: Vec::new(),
            best: None,
            min_overshoot: None,
            stats: SearchStats::default(),
        };
        engine.offer(State::initial(catalog), 0.0);
        engine
    }

    /// Diagnostic counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Number of pending frontier entries, stale ones included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Earliest time at which the given quantity vector was ever
    /// offered to the frontier.
    pub fn min_time(&self, counts: &[u32]) -> Option<f64> {
        self.min_times.get(counts).copied()
    }

    /// Offers a (time, state) pair to the frontier.
    ///
    /// If an arrival at or before the offered time is already recorded
    /// for the state, the offer is not an improvement and nothing
    /// happens. Rejecting exact ties here keeps at most one pending
    /// entry per recorded arrival, so a state reached by two paths at
    /// the same instant is still expanded only once. A strict
    /// improvement is pushed and the map updated; any older, slower
    /// entry for the same state stays in the heap and is discarded as
    /// stale when popped.
    fn offer(&mut self, state: Rc<State>, time: f64) {
        if let Some(&known) = self.min_times.get(state.counts()) {
            if known <= time {
                self.stats.offers_rejected += 1;
                return;
            }
        }
        self.min_times.insert(state.counts().to_vec(), time);
        self.frontier.push(time, state);
        self.stats.enqueued += 1;
    }

    /// Runs the search to the horizon and returns the best state found,
    /// its reconstructed plan, and the diagnostic counters.
    ///
    /// # Errors
    ///
    /// [`SearchError::FrontierExhausted`] if the frontier empties before
    /// the horizon (a logic defect: the overshoot handling always keeps
    /// a beyond-horizon sentinel enqueued), [`SearchError::ZeroRate`] if
    /// a zero-rate state reaches expansion.
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        let mut last_report = Instant::now();

        loop {
            let Some((now, state)) = self.frontier.pop() else {
                return Err(SearchError::FrontierExhausted);
            };
            if now > self.config.horizon {
                break;
            }

            if let Some(&known) = self.min_times.get(state.counts()) {
                if known < now {
                    // A better arrival was already found and expanded.
                    self.stats.stale_skipped += 1;
                    continue;
                }
            }

            let rate = state.rate(self.catalog);
            if rate <= 0.0 {
                return Err(SearchError::ZeroRate);
            }
            self.stats.expanded += 1;
            self.expanded.push(Rc::clone(&state));

            if self.best.as_ref().map_or(true, |(best, _)| rate > *best) {
                if self.config.debug {
                    debug!(time = now, rate, "new best state");
                }
                self.best = Some((rate, Rc::clone(&state)));
            }

            self.expand(&state, now, rate);

            if let Some(every) = self.config.prune_every {
                if every > 0 && self.stats.expanded % every == 0 {
                    self.prune_dominated()?;
                }
            }

            if self.config.report_interval > 0.0
                && last_report.elapsed().as_secs_f64() >= self.config.report_interval
            {
                last_report = Instant::now();
                info!(
                    best_rate = self.best.as_ref().map_or(0.0, |(rate, _)| *rate),
                    expanded = self.stats.expanded,
                    stale_skipped = self.stats.stale_skipped,
                    frontier = self.frontier.len(),
                    now,
                    "search progress"
                );
            }
        }

        self.outcome()
    }

    /// Offers every affordable successor of an expanded state.
    fn expand(&mut self, state: &Rc<State>, now: f64, rate: f64) {
        for index in 0..self.catalog.len() {
            if !self.catalog.item(index).is_purchasable() {
                continue;
            }
            let reached = now + state.cost(self.catalog, index) / rate;
            if reached > self.config.horizon {
                // Keep the earliest beyond-horizon successor as a
                // termination sentinel; anything later than the minimum
                // overshoot seen so far can never matter.
                if self.min_overshoot.is_some_and(|min| reached > min) {
                    continue;
                }
                self.min_overshoot = Some(match self.min_overshoot {
                    Some(min) => min.min(reached),
                    None => reached,
                });
            }
            if self.config.debug {
                debug!(
                    item = %self.catalog.item(index).name,
                    reached,
                    "offer successor"
                );
            }
            self.offer(state.add(index), reached);
        }
    }

    /// Removes every pending within-horizon frontier entry whose state
    /// is dominated by an already-expanded state (see [`crate::prune`]).
    /// Explicit opt-in pass. Beyond-horizon entries are exempt: they are
    /// the sentinels that terminate the run, and removing them could
    /// empty the frontier before the horizon is reached.
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// [`SearchError::NegativeQuantity`] if the closure ever decrements
    /// a zero quantity, which would be a logic defect.
    pub fn prune_dominated(&mut self) -> Result<usize, SearchError> {
        let dominated = prune::dominated_closure(self.catalog, &self.expanded)?;
        let removed =
            prune::retain_undominated(&mut self.frontier, &dominated, self.config.horizon);
        self.stats.pruned += removed as u64;
        if self.config.debug {
            debug!(
                removed,
                dominated = dominated.len(),
                frontier = self.frontier.len(),
                "dominance pruning pass"
            );
        }
        Ok(removed)
    }

    /// Builds the outcome from the best-state tracker.
    fn outcome(&self) -> Result<SearchOutcome, SearchError> {
        let (best_rate, best_state) = self.best.as_ref().ok_or(SearchError::NoExpansion)?;
        let plan = best_state
            .lineage()
            .iter()
            .map(|state| PlanStep {
                time: self.min_time(state.counts()).unwrap_or(0.0),
                item: state.step().map(|index| self.catalog.item(index).name.clone()),
                counts: state.counts().to_vec(),
                rate: state.rate(self.catalog),
            })
            .collect();
        Ok(SearchOutcome {
            best_rate: *best_rate,
            best_counts: best_state.counts().to_vec(),
            plan,
            stats: self.stats.clone(),
        })
    }
}
