//! Default tables compiled into the binary.
//!
//! ```rust
//! use gridiron_core::data::embedded::embedded_tables;
//!
//! let tables = embedded_tables().unwrap();
//! assert!(tables.matchup.is_total());
//! ```

use std::sync::{Arc, OnceLock};

use super::catalog::PlayCatalog;
use super::kicking::KickingTable;
use super::matchup::MatchupTable;
use super::penalty::PenaltyTable;
use super::schema::Table;
use super::store::TableStore;
use crate::error::Result;

// =============================================================================
// Embedded YAML Data
// =============================================================================

pub const MATCHUP_YAML: &str = include_str!("../../../../data/tables/matchup.yaml");

pub const PENALTY_YAML: &str = include_str!("../../../../data/tables/penalty.yaml");

pub const KICKING_YAML: &str = include_str!("../../../../data/tables/kicking.yaml");

pub const PLAYS_YAML: &str = include_str!("../../../../data/tables/plays.yaml");

// =============================================================================
// Static Caching
// =============================================================================

static EMBEDDED: OnceLock<Result<Arc<TableStore>>> = OnceLock::new();

/// Parsed and validated default tables. Parsed on first call, shared after.
pub fn embedded_tables() -> Result<Arc<TableStore>> {
    EMBEDDED.get_or_init(load_embedded).clone()
}

fn load_embedded() -> Result<Arc<TableStore>> {
    let store = TableStore::new(
        MatchupTable::from_yaml_str(MATCHUP_YAML)?,
        PenaltyTable::from_yaml_str(PENALTY_YAML)?,
        KickingTable::from_yaml_str(KICKING_YAML)?,
        PlayCatalog::from_yaml_str(PLAYS_YAML)?,
    );
    tracing::debug!(
        matchup = store.matchup.name(),
        penalties = store.penalty.len(),
        plays = store.catalog.plays().len(),
        "loaded embedded tables"
    );
    Ok(Arc::new(store))
}
