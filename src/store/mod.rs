//! Flat-file persistence: persona store, event log, static catalog.

mod catalog;
mod events;
mod personas;

pub use catalog::{AwarenessContent, Catalog};
pub use events::{AnalyticsSummary, DailyCount, EventLog};
pub use personas::{PersonaFilter, PersonaStore};

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Create the data directory if it does not exist.
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::IoWrite {
        path: dir.to_path_buf(),
        source: e,
    })
}
