//! Kicking table: PAT and banded field-goal sub-tables keyed by 2d6 sum.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::schema::{check_roll_keys, check_version, Table};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KickingTableDoc {
    pub version: u32,
    pub pat: BTreeMap<u8, bool>,
    pub field_goal: Vec<FieldGoalBand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldGoalBand {
    /// Display label, e.g. "13-22".
    pub band: String,
    pub min: u8,
    pub max: u8,
    pub rolls: BTreeMap<u8, bool>,
}

impl FieldGoalBand {
    pub fn contains(&self, distance: u8) -> bool {
        (self.min..=self.max).contains(&distance)
    }
}

#[derive(Debug, Clone)]
pub struct KickingTable {
    doc: KickingTableDoc,
}

impl KickingTable {
    pub fn version(&self) -> u32 {
        self.doc.version
    }

    pub fn pat(&self, roll: u8) -> Result<bool> {
        self.doc
            .pat
            .get(&roll)
            .copied()
            .ok_or_else(|| EngineError::gap(Self::KIND, format!("pat/{roll}")))
    }

    /// Smallest roll sum from which every PAT succeeds.
    pub fn pat_threshold(&self) -> Option<u8> {
        let mut threshold = None;
        for (&roll, &good) in self.doc.pat.iter().rev() {
            if !good {
                break;
            }
            threshold = Some(roll);
        }
        threshold
    }

    /// Longest distance any band covers; beyond it a kick cannot be attempted.
    pub fn max_distance(&self) -> u8 {
        self.doc.field_goal.last().map(|b| b.max).unwrap_or(0)
    }

    pub fn in_range(&self, distance: u8) -> bool {
        distance <= self.max_distance()
    }

    /// Band used for `distance`. Short kicks below the first band use the first
    /// band; kicks beyond the last band have none.
    pub fn band_for(&self, distance: u8) -> Option<&FieldGoalBand> {
        if !self.in_range(distance) {
            return None;
        }
        let first = self.doc.field_goal.first()?;
        if distance < first.min {
            return Some(first);
        }
        self.doc.field_goal.iter().find(|b| b.contains(distance))
    }

    pub fn field_goal(&self, distance: u8, roll: u8) -> Result<bool> {
        let band = self
            .band_for(distance)
            .ok_or_else(|| EngineError::gap(Self::KIND, format!("field_goal/{distance}yd")))?;
        band.rolls
            .get(&roll)
            .copied()
            .ok_or_else(|| EngineError::gap(Self::KIND, format!("field_goal/{}/{roll}", band.band)))
    }
}

impl Table for KickingTable {
    const KIND: &'static str = "kicking";
    type Doc = KickingTableDoc;

    fn from_doc(doc: KickingTableDoc) -> Result<Self> {
        check_version(Self::KIND, doc.version)?;
        check_roll_keys(Self::KIND, "pat", &doc.pat)?;

        if doc.field_goal.is_empty() {
            return Err(EngineError::schema(Self::KIND, "field_goal", "no distance bands"));
        }
        let mut previous_max: Option<u8> = None;
        for (i, band) in doc.field_goal.iter().enumerate() {
            let prefix = format!("field_goal[{i}]");
            if band.band.trim().is_empty() {
                return Err(EngineError::schema(Self::KIND, format!("{prefix}.band"), "empty label"));
            }
            if band.min > band.max {
                return Err(EngineError::schema(
                    Self::KIND,
                    format!("{prefix}.min"),
                    format!("min {} exceeds max {}", band.min, band.max),
                ));
            }
            if band.max > 100 + 17 {
                return Err(EngineError::schema(
                    Self::KIND,
                    format!("{prefix}.max"),
                    format!("{} is longer than the field", band.max),
                ));
            }
            if let Some(prev) = previous_max {
                if u16::from(band.min) != u16::from(prev) + 1 {
                    return Err(EngineError::schema(
                        Self::KIND,
                        format!("{prefix}.min"),
                        format!("band must start at {} (bands ascending, no gaps or overlaps)", u16::from(prev) + 1),
                    ));
                }
            }
            previous_max = Some(band.max);
            check_roll_keys(Self::KIND, &format!("{prefix}.rolls"), &band.rolls)?;
        }

        Ok(Self { doc })
    }

    fn to_doc(&self) -> KickingTableDoc {
        self.doc.clone()
    }
}
