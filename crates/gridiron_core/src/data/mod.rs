//! Table Store: schema-validated, immutable lookup tables.

pub mod catalog;
pub mod embedded;
pub mod kicking;
pub mod matchup;
pub mod penalty;
pub mod schema;
pub mod store;

pub use catalog::{PlayCatalog, PlayCatalogDoc};
pub use embedded::embedded_tables;
pub use kicking::{FieldGoalBand, KickingTable, KickingTableDoc};
pub use matchup::{MatchupEntryDoc, MatchupTable, MatchupTableDoc};
pub use penalty::{PenaltyRow, PenaltyTable, PenaltyTableDoc};
pub use schema::{schema_json, Table, SCHEMA_VERSION};
pub use store::TableStore;
