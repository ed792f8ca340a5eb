//! # Idlemax
//!
//! A command-line tool and library for computing optimal purchase
//! schedules in idle/incremental game economies.
//!
//! Starting from a single bootstrap producer, the tool searches for the
//! sequence of purchases that maximizes the cumulative production rate
//! by a fixed time horizon, given:
//!
//! - A catalog of producers with geometrically inflating prices
//!   (`cost = ceil(base_cost * 1.15^owned)`)
//! - A per-unit production rate for each producer
//! - The constant-rate approximation: the time to afford a purchase is
//!   its marginal cost divided by the current production rate
//!
//! ## Modules
//!
//! - [`models`] - Core data structures: items, the catalog, ownership states, plans
//! - [`data`] - CSV catalog loading
//! - [`search`] - The best-first search engine and its frontier
//! - [`prune`] - Dominance-based frontier pruning
//! - [`display`] - Output formatting and display utilities
//! - [`error`] - Error taxonomy
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use idlemax::{
//!     data::load_catalog,
//!     display::display_plan,
//!     models::StartMode,
//!     search::{SearchConfig, SearchEngine},
//! };
//!
//! // Load the catalog, starting from the first item (e.g. one Cursor).
//! let catalog = load_catalog(Path::new("data"), StartMode::Automated).unwrap();
//!
//! // Search for the best schedule reachable within 1000 seconds.
//! let mut engine = SearchEngine::new(&catalog, SearchConfig::new(1000.0));
//! let outcome = engine.run().unwrap();
//!
//! display_plan(&catalog, &outcome);
//! ```
//!
//! ## Pruning
//!
//! On long horizons the frontier can grow large. The dominance pruner
//! ([`search::SearchEngine::prune_dominated`]) discards pending states
//! dominated by an already-expanded state, on the assumption that a
//! dominated state never leads anywhere its dominator cannot. It is
//! opt-in: enable it per run with [`search::SearchConfig::prune_every`]
//! or invoke it on demand.

pub mod data;
pub mod display;
pub mod error;
pub mod models;
pub mod prune;
pub mod search;
