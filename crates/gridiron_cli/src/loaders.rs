//! File loading for tables, coaches and engine config.
//!
//! The core never touches the filesystem; everything it needs is read here
//! and handed over as strings.

use std::path::Path;

use anyhow::{Context, Result};
use gridiron_core::{CoachProfile, EngineConfig, Table};

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Loads a table from YAML, or JSON when the extension says so.
pub fn load_table<T: Table>(path: &Path) -> Result<T> {
    let text = read(path)?;
    let table = if is_json(path) { T::from_json_str(&text) } else { T::from_yaml_str(&text) };
    table.with_context(|| format!("{} table {}", T::KIND, path.display()))
}

/// `aggressive` / `conservative` name a built-in profile; anything else is
/// a path to a YAML or JSON profile.
pub fn load_coach(name_or_path: &str) -> Result<CoachProfile> {
    if let Ok(profile) = CoachProfile::builtin(name_or_path) {
        return Ok(profile);
    }
    let path = Path::new(name_or_path);
    let text = read(path)?;
    let profile = if is_json(path) { CoachProfile::from_json_str(&text) } else { CoachProfile::from_yaml_str(&text) };
    profile.with_context(|| format!("coach profile {}", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = read(path)?;
    let config = if is_json(path) { EngineConfig::from_json_str(&text) } else { EngineConfig::from_yaml_str(&text) };
    config.with_context(|| format!("engine config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_core::data::PenaltyTable;
    use gridiron_core::EngineError;
    use std::io::Write;

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_table_by_extension() {
        let yaml = temp_file(".yaml", "version: 1\nentries:\n  - { index: 1, label: Hold, side: offense, yards: -10 }\n");
        let table: PenaltyTable = load_table(yaml.path()).unwrap();
        assert_eq!(table.len(), 1);

        let json = temp_file(
            ".json",
            r#"{"version": 1, "entries": [{"index": 1, "label": "Offside", "side": "defense", "yards": 5}]}"#,
        );
        let table: PenaltyTable = load_table(json.path()).unwrap();
        assert_eq!(table.entry(1).unwrap().yards, 5);
    }

    #[test]
    fn test_schema_violation_surfaces_through_context() {
        let bad = temp_file(".yaml", "version: 1\nentries:\n  - { index: 1, label: Hold, side: offense, yards: 10 }\n");
        let err = load_table::<PenaltyTable>(bad.path()).unwrap_err();
        let engine_err = err.downcast_ref::<EngineError>().unwrap();
        assert_eq!(engine_err.code(), "SCHEMA_VIOLATION");
    }

    #[test]
    fn test_load_coach_builtin_and_file() {
        assert_eq!(load_coach("aggressive").unwrap().name, "Riverboat");
        let file = temp_file(".yaml", "name: Local\npass_tendency: 0.55\nheadset: wireless\n");
        let coach = load_coach(file.path().to_str().unwrap()).unwrap();
        assert_eq!(coach.name, "Local");
        assert!(load_coach("/definitely/not/here.yaml").is_err());
    }

    #[test]
    fn test_load_config_defaults_and_file() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
        let file = temp_file(".yaml", "penalty:\n  occurrence: 0.0\nrules:\n  overtime: false\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.penalty.occurrence, 0.0);
        assert!(!config.rules.overtime);
    }
}
