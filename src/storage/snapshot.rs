use std::{fs, path::Path};

use crate::errors::Result;
use crate::store::StoreSnapshot;

use super::write_atomic;

/// Writes the snapshot as pretty JSON, staging to a temporary file first.
pub fn save_snapshot_to_path(snapshot: &StoreSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    write_atomic(path, &json)?;
    tracing::info!(path = %path.display(), deals = snapshot.deals.len(), "snapshot saved");
    Ok(())
}

pub fn load_snapshot_from_path(path: &Path) -> Result<StoreSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: StoreSnapshot = serde_json::from_str(&data)?;
    tracing::info!(path = %path.display(), deals = snapshot.deals.len(), "snapshot loaded");
    Ok(snapshot)
}
