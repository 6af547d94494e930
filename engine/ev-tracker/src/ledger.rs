//! EV history ledger
//!
//! The ledger is a flat CSV of `set_name,expected_value,date` rows. Each run reads it
//! whole, drops every row stamped with the run date, appends the fresh summary, and
//! writes it back whole. Re-running on the same day therefore replaces that day's rows
//! instead of duplicating them.

use crate::calculator::EvCalculator;
use crate::error::Result;
use crate::models::{EvRow, PricedRow};
use std::path::Path;
use tracing::info;

/// Persisted history of daily per-set expected values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    rows: Vec<EvRow>,
}

impl Ledger {
    pub fn new(rows: Vec<EvRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[EvRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows recorded for one date
    pub fn rows_for_date<'a>(&'a self, date: &'a str) -> impl Iterator<Item = &'a EvRow> + 'a {
        self.rows.iter().filter(move |row| row.date == date)
    }

    /// Replace every row dated `run_date` with `summary`.
    ///
    /// The purge is by date alone: a set present in the old rows for that date but
    /// missing from `summary` disappears. Rows for other dates keep their order and
    /// come first.
    pub fn merge(&mut self, summary: Vec<EvRow>, run_date: &str) {
        let before = self.rows.len();
        self.rows.retain(|row| row.date != run_date);
        let replaced = before - self.rows.len();

        if replaced > 0 {
            info!("Replacing {} existing ledger rows for {}", replaced, run_date);
        }

        self.rows.extend(summary);
    }

    /// Load the ledger, or `None` if the file does not exist yet
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No EV history at {:?}, starting a new ledger", path);
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        let rows = reader.deserialize().collect::<std::result::Result<Vec<EvRow>, _>>()?;

        info!("Loaded {} EV history rows from {:?}", rows.len(), path);
        Ok(Some(Self { rows }))
    }

    /// Overwrite the ledger file with the full ledger
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;

        if self.rows.is_empty() {
            writer.write_record(["set_name", "expected_value", "date"])?;
        }
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!("Wrote {} EV history rows to {:?}", self.rows.len(), path);
        Ok(())
    }
}

/// Summarize `rows` for `run_date` and fold the result into `existing`.
///
/// Without an existing ledger the summary becomes the ledger.
pub fn compute_and_merge(rows: &[PricedRow], existing: Option<Ledger>, run_date: &str) -> Ledger {
    let summary = EvCalculator::summarize(rows, run_date);

    match existing {
        Some(mut ledger) => {
            ledger.merge(summary, run_date);
            ledger
        }
        None => Ledger::new(summary),
    }
}
