//! Error types for Idlemax.
//!
//! Two failure families exist: [`CatalogError`] for bad configuration
//! detected before the search starts, and [`SearchError`] for invariant
//! violations inside the search itself. A stale frontier entry is *not*
//! an error; it is expected, counted, and skipped by the engine.

use thiserror::Error;

/// A malformed or unusable catalog. Fatal before the search starts.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// A row in the catalog file could not be parsed.
    #[error("malformed catalog row: {0}")]
    Csv(#[from] csv::Error),

    /// The catalog holds no purchasable items.
    #[error("catalog contains no purchasable items")]
    Empty,

    /// Two items share a name.
    #[error("duplicate item name `{0}`")]
    DuplicateName(String),

    /// An item carries a value outside its allowed range.
    #[error("item `{name}`: {reason}")]
    InvalidItem {
        /// Name of the offending item.
        name: String,
        /// Why the item was rejected.
        reason: String,
    },
}

/// A violated search invariant. Fatal: these indicate a logic defect,
/// not a recoverable game condition.
#[derive(Debug, Error)]
pub enum SearchError {
    /// `decrement` was asked to take an item's quantity below zero.
    #[error("quantity of item index {item} would become negative")]
    NegativeQuantity {
        /// Catalog index of the item whose quantity underflowed.
        item: usize,
    },

    /// A state with zero production rate reached expansion; the next
    /// purchase time would divide by zero.
    #[error("state has zero production rate; cannot price the next purchase")]
    ZeroRate,

    /// The frontier emptied before the horizon was reached.
    #[error("frontier exhausted before reaching the horizon")]
    FrontierExhausted,

    /// The run ended before a single state was expanded.
    #[error("search ended before any state was expanded")]
    NoExpansion,
}
