//! Catalog loading for Idlemax.
//!
//! This module reads item definitions from a CSV file (columns
//! `name, base_cost, rate`) and assembles them into a validated
//! [`Catalog`] together with the bootstrap producer chosen by the
//! start mode.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::CatalogError;
use crate::models::{Catalog, CatalogRow, Item, StartMode};

/// Name of the catalog file inside the data directory.
pub const CATALOG_FILE: &str = "things.csv";

/// Loads item definitions from a CSV file.
///
/// Every item loaded from CSV is purchasable; a non-purchasable
/// bootstrap producer, if any, is injected by [`Catalog::new`] under
/// [`StartMode::Manual`].
///
/// # Errors
///
/// [`CatalogError::Io`] if the file cannot be opened,
/// [`CatalogError::Csv`] if a row cannot be parsed.
pub fn load_items(path: &Path) -> Result<Vec<Item>, CatalogError> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut items = Vec::new();
    for result in rdr.deserialize() {
        let row: CatalogRow = result?;
        items.push(Item {
            name: row.name,
            base_cost: row.base_cost as f64,
            rate: row.rate,
        });
    }
    Ok(items)
}

/// Loads the catalog from a data directory and assembles it for a run.
///
/// # Errors
///
/// Any [`CatalogError`] raised by [`load_items`] or by catalog
/// validation (duplicate names, invalid values, no purchasable items).
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use idlemax::data::load_catalog;
/// use idlemax::models::StartMode;
///
/// let catalog = load_catalog(Path::new("data"), StartMode::Automated).unwrap();
/// println!("Loaded {} items", catalog.len());
/// ```
pub fn load_catalog(data_dir: &Path, start: StartMode) -> Result<Catalog, CatalogError> {
    let items = load_items(&data_dir.join(CATALOG_FILE))?;
    Catalog::new(items, start)
}
