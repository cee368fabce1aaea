//! Matchup table: (offense play type, defense call, 2d6 sum) -> result.

use std::collections::{BTreeMap, HashMap};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::schema::{check_roll_keys, check_version, Table};
use crate::error::{EngineError, Result};
use crate::models::{DefenseCall, MatchupResult, PlayType};

/// Yardage bound for any single table cell.
const MAX_CELL_YARDS: i32 = 99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchupTableDoc {
    pub version: u32,
    #[serde(default)]
    pub name: String,
    pub entries: Vec<MatchupEntryDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchupEntryDoc {
    pub offense: PlayType,
    pub defense: DefenseCall,
    pub rolls: BTreeMap<u8, MatchupResult>,
}

#[derive(Debug, Clone)]
pub struct MatchupTable {
    doc: MatchupTableDoc,
    index: HashMap<(PlayType, DefenseCall), usize>,
}

impl MatchupTable {
    pub fn version(&self) -> u32 {
        self.doc.version
    }

    pub fn name(&self) -> &str {
        &self.doc.name
    }

    pub fn lookup(&self, offense: PlayType, defense: DefenseCall, roll: u8) -> Result<MatchupResult> {
        self.index
            .get(&(offense, defense))
            .and_then(|&i| self.doc.entries[i].rolls.get(&roll))
            .copied()
            .ok_or_else(|| {
                EngineError::gap(
                    Self::KIND,
                    format!("{}/{}/{roll}", offense.name(), defense.name()),
                )
            })
    }

    /// Pairings the engine can produce that this table does not cover.
    pub fn missing_pairings(&self) -> Vec<(PlayType, DefenseCall)> {
        PlayType::ALL
            .iter()
            .flat_map(|&o| DefenseCall::ALL.iter().map(move |&d| (o, d)))
            .filter(|key| !self.index.contains_key(key))
            .collect()
    }

    pub fn is_total(&self) -> bool {
        self.missing_pairings().is_empty()
    }
}

impl Table for MatchupTable {
    const KIND: &'static str = "matchup";
    type Doc = MatchupTableDoc;

    fn from_doc(doc: MatchupTableDoc) -> Result<Self> {
        check_version(Self::KIND, doc.version)?;
        if doc.entries.is_empty() {
            return Err(EngineError::schema(Self::KIND, "entries", "table has no entries"));
        }

        let mut index = HashMap::with_capacity(doc.entries.len());
        for (i, entry) in doc.entries.iter().enumerate() {
            let prefix = format!("entries[{i}]");
            if index.insert((entry.offense, entry.defense), i).is_some() {
                return Err(EngineError::schema(
                    Self::KIND,
                    prefix,
                    format!(
                        "duplicate pairing {}/{}",
                        entry.offense.name(),
                        entry.defense.name()
                    ),
                ));
            }
            check_roll_keys(Self::KIND, &format!("{prefix}.rolls"), &entry.rolls)?;
            for (roll, result) in &entry.rolls {
                validate_cell(&format!("{prefix}.rolls.{roll}"), result)?;
            }
        }

        Ok(Self { doc, index })
    }

    fn to_doc(&self) -> MatchupTableDoc {
        self.doc.clone()
    }
}

fn validate_cell(field: &str, result: &MatchupResult) -> Result<()> {
    let yards = result.yards();
    if yards.abs() > MAX_CELL_YARDS {
        return Err(EngineError::schema(
            MatchupTable::KIND,
            format!("{field}.yards"),
            format!("{yards} outside -{MAX_CELL_YARDS}..={MAX_CELL_YARDS}"),
        ));
    }
    if let MatchupResult::Sack { yards } = result {
        if *yards > 0 {
            return Err(EngineError::schema(
                MatchupTable::KIND,
                format!("{field}.yards"),
                "sack cannot gain yards",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_rolls(result: MatchupResult) -> String {
        (2..=12)
            .map(|r| format!("      {r}: {}\n", serde_json::to_string(&result).unwrap()))
            .collect()
    }

    fn single_pairing_yaml(rolls: &str) -> String {
        format!("version: 1\nname: tiny\nentries:\n  - offense: run\n    defense: blitz\n    rolls:\n{rolls}")
    }

    #[test]
    fn test_lookup_exact_entry() {
        let yaml = single_pairing_yaml(&full_rolls(MatchupResult::Gain {
            yards: 4,
            out_of_bounds: false,
        }));
        let table = MatchupTable::from_yaml_str(&yaml).unwrap();
        assert_eq!(
            table.lookup(PlayType::Run, DefenseCall::Blitz, 7).unwrap(),
            MatchupResult::Gain { yards: 4, out_of_bounds: false }
        );
    }

    #[test]
    fn test_missing_pairing_is_table_gap() {
        let yaml = single_pairing_yaml(&full_rolls(MatchupResult::Incomplete));
        let table = MatchupTable::from_yaml_str(&yaml).unwrap();
        let err = table.lookup(PlayType::Pass, DefenseCall::Prevent, 7).unwrap_err();
        assert_eq!(err, EngineError::gap("matchup", "pass/prevent/7"));
        assert!(!table.is_total());
        assert_eq!(table.missing_pairings().len(), 15);
    }

    #[test]
    fn test_missing_roll_is_schema_violation() {
        let rolls: String = full_rolls(MatchupResult::Incomplete)
            .lines()
            .filter(|l| !l.trim_start().starts_with("9:"))
            .map(|l| format!("{l}\n"))
            .collect();
        let err = MatchupTable::from_yaml_str(&single_pairing_yaml(&rolls)).unwrap_err();
        assert!(
            matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "entries[0].rolls.9")
        );
    }

    #[test]
    fn test_positive_sack_rejected() {
        let yaml = single_pairing_yaml(&full_rolls(MatchupResult::Sack { yards: 3 }));
        let err = MatchupTable::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field.ends_with(".yards")));
    }

    #[test]
    fn test_wrong_type_is_schema_violation() {
        let yaml = "version: 1\nentries:\n  - offense: run\n    defense: blitz\n    rolls:\n      2: { result: gain, yards: lots }\n";
        let err = MatchupTable::from_yaml_str(yaml).unwrap_err();
        assert_eq!(err.code(), "SCHEMA_VIOLATION");
    }

    #[test]
    fn test_unknown_defense_call_rejected() {
        let yaml = "version: 1\nentries:\n  - offense: run\n    defense: zone_dog\n    rolls: {}\n";
        let err = MatchupTable::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "zone_dog"));
    }

    #[test]
    fn test_duplicate_pairing_rejected() {
        let rolls = full_rolls(MatchupResult::Incomplete);
        let yaml = format!(
            "{}  - offense: run\n    defense: blitz\n    rolls:\n{rolls}",
            single_pairing_yaml(&rolls)
        );
        let err = MatchupTable::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "entries[1]"));
    }

    #[test]
    fn test_json_keys_accepted() {
        let rolls: serde_json::Map<String, serde_json::Value> = (2..=12)
            .map(|r| (r.to_string(), serde_json::json!({ "result": "sack", "yards": -6 })))
            .collect();
        let value = serde_json::json!({
            "version": 1,
            "entries": [{ "offense": "pass", "defense": "blitz", "rolls": rolls }]
        });
        let table = MatchupTable::from_value(value).unwrap();
        assert_eq!(
            table.lookup(PlayType::Pass, DefenseCall::Blitz, 2).unwrap(),
            MatchupResult::Sack { yards: -6 }
        );
    }
}
