//! Load boundary shared by every lookup table.
//!
//! Raw documents (YAML or JSON) are decoded into `*Doc` structs, then
//! validated into the immutable table type. Anything malformed surfaces as
//! [`EngineError::SchemaViolation`] naming the offending field; nothing is
//! defaulted or repaired.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{EngineError, Result};

/// Table schema version this engine understands.
pub const SCHEMA_VERSION: u32 = 1;

/// Lowest and highest 2d6 roll sums.
pub const MIN_ROLL: u8 = 2;
pub const MAX_ROLL: u8 = 12;

pub trait Table: Sized {
    /// Table name used in error messages (`matchup`, `penalty`, ...).
    const KIND: &'static str;

    type Doc: Serialize + DeserializeOwned + JsonSchema;

    fn from_doc(doc: Self::Doc) -> Result<Self>;

    /// Document form of a validated table; every field survives unchanged.
    fn to_doc(&self) -> Self::Doc;

    fn from_yaml_str(raw: &str) -> Result<Self> {
        let doc: Self::Doc =
            serde_yaml::from_str(raw).map_err(|e| decode_error(Self::KIND, &e.to_string()))?;
        Self::from_doc(doc)
    }

    fn from_json_str(raw: &str) -> Result<Self> {
        let doc: Self::Doc =
            serde_json::from_str(raw).map_err(|e| decode_error(Self::KIND, &e.to_string()))?;
        Self::from_doc(doc)
    }

    fn from_value(value: serde_json::Value) -> Result<Self> {
        let doc: Self::Doc =
            serde_json::from_value(value).map_err(|e| decode_error(Self::KIND, &e.to_string()))?;
        Self::from_doc(doc)
    }

    fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(&self.to_doc())
            .map_err(|e| EngineError::invalid_state(format!("{} table encode: {e}", Self::KIND)))
    }

    fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.to_doc())
            .map_err(|e| EngineError::invalid_state(format!("{} table encode: {e}", Self::KIND)))
    }
}

/// JSON Schema of a table document, for external authoring tools.
pub fn schema_json<T: JsonSchema>() -> Result<serde_json::Value> {
    serde_json::to_value(schemars::schema_for!(T))
        .map_err(|e| EngineError::invalid_state(format!("schema encode: {e}")))
}

pub(crate) fn check_version(table: &'static str, version: u32) -> Result<()> {
    if version != SCHEMA_VERSION {
        return Err(EngineError::schema(
            table,
            "version",
            format!("expected schema version {SCHEMA_VERSION}, found {version}"),
        ));
    }
    Ok(())
}

/// Every roll sum 2..=12 present, nothing else.
pub(crate) fn check_roll_keys<V>(
    table: &'static str,
    prefix: &str,
    rolls: &BTreeMap<u8, V>,
) -> Result<()> {
    if let Some(bad) = rolls.keys().find(|k| !(MIN_ROLL..=MAX_ROLL).contains(*k)) {
        return Err(EngineError::schema(
            table,
            format!("{prefix}.{bad}"),
            format!("roll sum out of range {MIN_ROLL}..={MAX_ROLL}"),
        ));
    }
    if let Some(missing) = (MIN_ROLL..=MAX_ROLL).find(|r| !rolls.contains_key(r)) {
        return Err(EngineError::schema(table, format!("{prefix}.{missing}"), "missing roll sum"));
    }
    Ok(())
}

/// serde reports the offending key between backticks; use it as the field.
fn decode_error(table: &'static str, message: &str) -> EngineError {
    let field = message
        .split_once('`')
        .and_then(|(_, rest)| rest.split_once('`'))
        .map(|(field, _)| field.to_string())
        .unwrap_or_else(|| "<document>".to_string());
    EngineError::schema(table, field, message)
}
