use std::sync::Arc;

use super::catalog::PlayCatalog;
use super::kicking::KickingTable;
use super::matchup::MatchupTable;
use super::penalty::PenaltyTable;
use crate::error::Result;

/// All lookup tables a game needs.
///
/// Read-only after construction; wrap in `Arc` to share between concurrent
/// games without locking.
#[derive(Debug, Clone)]
pub struct TableStore {
    pub matchup: MatchupTable,
    pub penalty: PenaltyTable,
    pub kicking: KickingTable,
    pub catalog: PlayCatalog,
}

impl TableStore {
    pub fn new(
        matchup: MatchupTable,
        penalty: PenaltyTable,
        kicking: KickingTable,
        catalog: PlayCatalog,
    ) -> Self {
        if !matchup.is_total() {
            tracing::warn!(
                missing = matchup.missing_pairings().len(),
                "matchup table does not cover every pairing; affected plays will fail with TableGap"
            );
        }
        Self { matchup, penalty, kicking, catalog }
    }

    /// Shared handle to the default tables compiled into the crate.
    pub fn embedded() -> Result<Arc<TableStore>> {
        super::embedded::embedded_tables()
    }
}
