//! Offensive play catalog, loaded once and never mutated.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::schema::{check_version, Table};
use crate::error::{EngineError, Result};
use crate::models::{PlayDefinition, PlayFamily};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayCatalogDoc {
    pub version: u32,
    pub plays: Vec<PlayDefinition>,
}

#[derive(Debug, Clone)]
pub struct PlayCatalog {
    doc: PlayCatalogDoc,
    by_id: HashMap<String, usize>,
}

impl PlayCatalog {
    pub fn get(&self, id: &str) -> Result<&PlayDefinition> {
        self.by_id
            .get(id)
            .map(|&i| &self.doc.plays[i])
            .ok_or_else(|| EngineError::gap(Self::KIND, id.to_string()))
    }

    pub fn plays(&self) -> &[PlayDefinition] {
        &self.doc.plays
    }

    pub fn plays_in(&self, family: PlayFamily) -> Vec<&PlayDefinition> {
        self.doc.plays.iter().filter(|p| p.play_type.family() == family).collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.doc.plays.iter().map(|p| p.id.clone()).collect()
    }
}

impl Table for PlayCatalog {
    const KIND: &'static str = "plays";
    type Doc = PlayCatalogDoc;

    fn from_doc(doc: PlayCatalogDoc) -> Result<Self> {
        check_version(Self::KIND, doc.version)?;

        let mut by_id = HashMap::with_capacity(doc.plays.len());
        for (i, play) in doc.plays.iter().enumerate() {
            if play.id.trim().is_empty() {
                return Err(EngineError::schema(Self::KIND, format!("plays[{i}].id"), "empty id"));
            }
            if play.name.trim().is_empty() {
                return Err(EngineError::schema(Self::KIND, format!("plays[{i}].name"), "empty name"));
            }
            if by_id.insert(play.id.clone(), i).is_some() {
                return Err(EngineError::schema(
                    Self::KIND,
                    format!("plays[{i}].id"),
                    format!("duplicate play id `{}`", play.id),
                ));
            }
        }

        for (family, label) in [(PlayFamily::Ground, "run/trick"), (PlayFamily::Air, "pass/play_action")] {
            if !doc.plays.iter().any(|p| p.play_type.family() == family) {
                return Err(EngineError::schema(
                    Self::KIND,
                    "plays",
                    format!("catalog needs at least one {label} play"),
                ));
            }
        }

        Ok(Self { doc, by_id })
    }

    fn to_doc(&self) -> PlayCatalogDoc {
        self.doc.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayType, RiskProfile};

    const TWO_PLAYS: &str = "version: 1\nplays:\n  - { id: dive, name: Dive, type: run, depth: short, risk: low }\n  - { id: bomb, name: Bomb, type: pass, depth: deep, risk: high, perimeter: true }\n";

    #[test]
    fn test_catalog_lookup() {
        let catalog = PlayCatalog::from_yaml_str(TWO_PLAYS).unwrap();
        let bomb = catalog.get("bomb").unwrap();
        assert_eq!(bomb.play_type, PlayType::Pass);
        assert_eq!(bomb.risk, RiskProfile::High);
        assert!(bomb.perimeter);
        assert!(!catalog.get("dive").unwrap().perimeter);
        assert_eq!(catalog.plays_in(PlayFamily::Ground).len(), 1);
        assert!(matches!(catalog.get("hook"), Err(EngineError::TableGap { .. })));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let yaml = TWO_PLAYS.replace("id: bomb", "id: dive");
        let err = PlayCatalog::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, EngineError::SchemaViolation { ref field, .. } if field == "plays[1].id"));
    }

    #[test]
    fn test_catalog_needs_both_families() {
        let yaml = "version: 1\nplays:\n  - { id: dive, name: Dive, type: run, depth: short, risk: low }\n";
        assert!(PlayCatalog::from_yaml_str(yaml).is_err());
    }
}
