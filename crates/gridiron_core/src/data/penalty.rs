//! Penalty table: index 1..=N -> side, signed yardage, down/distance rule.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::schema::{check_version, Table};
use crate::error::{EngineError, Result};
use crate::models::{PenaltyEffect, PenaltySide};

const MAX_PENALTY_YARDS: i32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PenaltyTableDoc {
    pub version: u32,
    pub entries: Vec<PenaltyRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PenaltyRow {
    pub index: u32,
    pub label: String,
    pub side: PenaltySide,
    /// Negative for offense penalties, positive for defense penalties.
    pub yards: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_of_down: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay_down: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_first_down: Option<bool>,
}

impl PenaltyRow {
    pub fn effect(&self) -> PenaltyEffect {
        if self.loss_of_down == Some(true) {
            PenaltyEffect::LossOfDown
        } else if self.replay_down == Some(true) {
            PenaltyEffect::ReplayDown
        } else if self.auto_first_down == Some(true) {
            PenaltyEffect::AutoFirstDown
        } else {
            PenaltyEffect::None
        }
    }

    fn flag_count(&self) -> usize {
        [self.loss_of_down, self.replay_down, self.auto_first_down]
            .iter()
            .filter(|f| **f == Some(true))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct PenaltyTable {
    doc: PenaltyTableDoc,
    by_index: HashMap<u32, usize>,
}

impl PenaltyTable {
    pub fn version(&self) -> u32 {
        self.doc.version
    }

    pub fn len(&self) -> usize {
        self.doc.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.entries.is_empty()
    }

    pub fn entry(&self, index: u32) -> Result<&PenaltyRow> {
        self.by_index
            .get(&index)
            .map(|&i| &self.doc.entries[i])
            .ok_or_else(|| EngineError::gap(Self::KIND, format!("index {index}")))
    }

    /// Rows charged to `side`, in ascending index order.
    pub fn rows_for(&self, side: PenaltySide) -> Vec<&PenaltyRow> {
        let mut rows: Vec<&PenaltyRow> =
            self.doc.entries.iter().filter(|r| r.side == side).collect();
        rows.sort_by_key(|r| r.index);
        rows
    }
}

impl Table for PenaltyTable {
    const KIND: &'static str = "penalty";
    type Doc = PenaltyTableDoc;

    fn from_doc(doc: PenaltyTableDoc) -> Result<Self> {
        check_version(Self::KIND, doc.version)?;
        if doc.entries.is_empty() {
            return Err(EngineError::schema(Self::KIND, "entries", "table has no entries"));
        }

        let n = doc.entries.len() as u32;
        let mut by_index = HashMap::with_capacity(doc.entries.len());
        for (i, row) in doc.entries.iter().enumerate() {
            let prefix = format!("entries[{i}]");
            if !(1..=n).contains(&row.index) {
                return Err(EngineError::schema(
                    Self::KIND,
                    format!("{prefix}.index"),
                    format!("index {} outside 1..={n}", row.index),
                ));
            }
            if by_index.insert(row.index, i).is_some() {
                return Err(EngineError::schema(
                    Self::KIND,
                    format!("{prefix}.index"),
                    format!("duplicate index {}", row.index),
                ));
            }
            if row.label.trim().is_empty() {
                return Err(EngineError::schema(Self::KIND, format!("{prefix}.label"), "empty label"));
            }
            if row.yards.abs() > MAX_PENALTY_YARDS {
                return Err(EngineError::schema(
                    Self::KIND,
                    format!("{prefix}.yards"),
                    format!("{} outside -{MAX_PENALTY_YARDS}..={MAX_PENALTY_YARDS}", row.yards),
                ));
            }
            let sign_ok = match row.side {
                PenaltySide::Offense => row.yards < 0,
                PenaltySide::Defense => row.yards > 0,
            };
            if !sign_ok {
                return Err(EngineError::schema(
                    Self::KIND,
                    format!("{prefix}.yards"),
                    format!(
                        "{:?} penalty has inconsistent sign ({}); offense loses yards, defense gives them",
                        row.side, row.yards
                    ),
                ));
            }
            if row.flag_count() > 1 {
                return Err(EngineError::schema(
                    Self::KIND,
                    prefix,
                    "loss_of_down, replay_down and auto_first_down are mutually exclusive",
                ));
            }
            // Loss of down only punishes the offense; an automatic first
            // down only rewards it.
            let misplaced = match (row.side, row.effect()) {
                (PenaltySide::Defense, PenaltyEffect::LossOfDown) => Some("loss_of_down"),
                (PenaltySide::Offense, PenaltyEffect::AutoFirstDown) => Some("auto_first_down"),
                _ => None,
            };
            if let Some(flag) = misplaced {
                return Err(EngineError::schema(
                    Self::KIND,
                    format!("{prefix}.{flag}"),
                    format!("{flag} cannot apply to a {:?} penalty", row.side),
                ));
            }
        }

        Ok(Self { doc, by_index })
    }

    fn to_doc(&self) -> PenaltyTableDoc {
        self.doc.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &str) -> Result<PenaltyTable> {
        PenaltyTable::from_yaml_str(&format!("version: 1\nentries:\n{rows}"))
    }

    #[test]
    fn test_effects_decoded() {
        let t = table(
            "  - { index: 1, label: False start, side: offense, yards: -5, replay_down: true }\n\
             \x20 - { index: 2, label: Holding, side: defense, yards: 5, auto_first_down: true }\n\
             \x20 - { index: 3, label: Grounding, side: offense, yards: -10, loss_of_down: true }\n\
             \x20 - { index: 4, label: Roughness, side: defense, yards: 15, loss_of_down: false }\n",
        )
        .unwrap();
        assert_eq!(t.entry(1).unwrap().effect(), PenaltyEffect::ReplayDown);
        assert_eq!(t.entry(2).unwrap().effect(), PenaltyEffect::AutoFirstDown);
        assert_eq!(t.entry(3).unwrap().effect(), PenaltyEffect::LossOfDown);
        assert_eq!(t.entry(4).unwrap().effect(), PenaltyEffect::None);
        assert_eq!(t.rows_for(PenaltySide::Defense).len(), 2);
    }

    #[test]
    fn test_combined_flags_rejected() {
        let err = table(
            "  - { index: 1, label: Mixed, side: offense, yards: -5, replay_down: true, loss_of_down: true }\n",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "entries[0]"));
    }

    #[test]
    fn test_inconsistent_sign_rejected() {
        let err = table("  - { index: 1, label: Offside, side: defense, yards: -5 }\n").unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "entries[0].yards"));

        let err = table("  - { index: 1, label: Holding, side: offense, yards: 10 }\n").unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "entries[0].yards"));
    }

    #[test]
    fn test_offense_auto_first_down_rejected() {
        let err = table("  - { index: 1, label: Holding, side: offense, yards: -5, auto_first_down: true }\n")
            .unwrap_err();
        assert!(
            matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "entries[0].auto_first_down")
        );
    }

    #[test]
    fn test_defense_loss_of_down_rejected() {
        let err = table(
            "  - { index: 1, label: Offside, side: offense, yards: -5 }\n\
             \x20 - { index: 2, label: Encroachment, side: defense, yards: 1, loss_of_down: true }\n",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "entries[1].loss_of_down"));
    }

    #[test]
    fn test_explicit_false_flags_allowed_on_either_side() {
        let t = table(
            "  - { index: 1, label: Holding, side: offense, yards: -10, auto_first_down: false }\n\
             \x20 - { index: 2, label: Offside, side: defense, yards: 5, loss_of_down: false }\n",
        )
        .unwrap();
        assert_eq!(t.entry(1).unwrap().effect(), PenaltyEffect::None);
        assert_eq!(t.entry(2).unwrap().effect(), PenaltyEffect::None);
    }

    #[test]
    fn test_index_gap_rejected() {
        let err = table(
            "  - { index: 1, label: A, side: offense, yards: -5 }\n\
             \x20 - { index: 3, label: B, side: defense, yards: 5 }\n",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "entries[1].index"));
    }

    #[test]
    fn test_missing_side_names_field() {
        let err = table("  - { index: 1, label: A, yards: -5 }\n").unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "side"));
    }

    #[test]
    fn test_unknown_index_is_gap() {
        let t = table("  - { index: 1, label: A, side: offense, yards: -5 }\n").unwrap();
        assert_eq!(t.entry(9).unwrap_err(), EngineError::gap("penalty", "index 9"));
    }
}
