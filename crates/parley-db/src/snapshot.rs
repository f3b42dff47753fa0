use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::models::DataStore;

/// Load a snapshot, or an empty store if the file does not exist yet.
pub fn read(path: &Path) -> Result<DataStore> {
    if !path.exists() {
        info!("No snapshot at {}, starting with an empty store", path.display());
        return Ok(DataStore::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let data = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;

    Ok(data)
}

/// Write the snapshot through a sibling temp file so a crash mid-write
/// leaves the previous snapshot intact.
pub fn write(path: &Path, data: &DataStore) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let raw = serde_json::to_vec_pretty(data)?;

    fs::write(&tmp, raw).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("replacing snapshot {}", path.display()))?;

    debug!("Snapshot written to {}", path.display());
    Ok(())
}
