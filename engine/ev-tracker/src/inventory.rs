//! Inventory CSV loading

use crate::error::{Result, TrackerError};
use crate::models::InventoryRow;
use std::path::Path;
use tracing::info;

/// Columns every inventory file must carry; anything else is ignored
pub const REQUIRED_COLUMNS: [&str; 3] = ["card_id", "set_name", "pull_rate"];

/// Read the whole inventory file, in file order
pub fn load_inventory<P: AsRef<Path>>(path: P) -> Result<Vec<InventoryRow>> {
    let path = path.as_ref();
    info!("Loading inventory from: {:?}", path);

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(TrackerError::missing_column(column, path.display().to_string()));
        }
    }

    let rows = reader.deserialize().collect::<std::result::Result<Vec<InventoryRow>, _>>()?;

    info!("Loaded {} inventory rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_inventory_ignores_extra_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("master_inventory.csv");
        fs::write(
            &path,
            "card_id,name,set_name,pull_rate\n\
             me01-001,Bulbasaur,Mega Evolution,0.05\n\
             me01-120, Mega Charizard ,Mega Evolution , 0.001\n",
        )
        .unwrap();

        let rows = load_inventory(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].card_id, "me01-001");
        assert_eq!(rows[0].pull_rate, 0.05);
        assert_eq!(rows[1].set_name, "Mega Evolution");
        assert_eq!(rows[1].pull_rate, 0.001);
    }

    #[test]
    fn test_missing_required_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("master_inventory.csv");
        fs::write(&path, "card_id,set_name\nme01-001,Mega Evolution\n").unwrap();

        match load_inventory(&path) {
            Err(TrackerError::MissingColumn { column, .. }) => assert_eq!(column, "pull_rate"),
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_csv_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_inventory(temp_dir.path().join("nope.csv"));
        assert!(matches!(result, Err(TrackerError::Csv(_))));
    }

    #[test]
    fn test_blank_pull_rate_counts_as_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("master_inventory.csv");
        fs::write(&path, "card_id,set_name,pull_rate\nme01-001,Base,0.5\nme01-002,Base,\n").unwrap();

        let rows = load_inventory(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pull_rate, 0.5);
        assert_eq!(rows[1].card_id, "me01-002");
        assert_eq!(rows[1].pull_rate, 0.0);
    }

    #[test]
    fn test_header_only_inventory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("master_inventory.csv");
        fs::write(&path, "card_id,set_name,pull_rate\n").unwrap();

        assert!(load_inventory(&path).unwrap().is_empty());
    }
}
