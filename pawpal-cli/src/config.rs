use anyhow::{Context, Result};
use pawpal_core::OwnerPreferences;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// `config.toml`: planning inputs and owner preferences. Authoritative for
/// every planning run; flags override it for a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub planning: PlanningSection,
    pub preferences: OwnerPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningSection {
    pub available_minutes: i32,
    /// "HH:MM"
    pub start_time: String,
    /// IANA zone used to decide what "today" is.
    pub timezone: String,
}

impl Default for PlanningSection {
    fn default() -> Self {
        Self {
            available_minutes: 120,
            start_time: "08:00".to_string(),
            timezone: "America/Chicago".to_string(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write `cfg` unless a config already exists. Returns whether it wrote.
pub fn init_config(path: &Path, cfg: &Config) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(path, cfg)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawpal_core::{Priority, TaskCategory};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.planning.available_minutes, 120);
        assert_eq!(cfg.planning.start_time, "08:00");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[planning]
available_minutes = 45

[preferences]
priority_threshold = "medium"
group_similar_tasks = true
preferred_task_order = ["medication", "feeding"]
"#,
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.planning.available_minutes, 45);
        assert_eq!(cfg.planning.timezone, "America/Chicago");
        assert_eq!(cfg.preferences.priority_threshold, Priority::Medium);
        assert_eq!(
            cfg.preferences.preferred_task_order,
            vec![TaskCategory::Medication, TaskCategory::Feeding]
        );
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.planning.available_minutes = 90;
        assert!(init_config(&path, &cfg).unwrap());

        cfg.planning.available_minutes = 10;
        assert!(!init_config(&path, &cfg).unwrap());
        assert_eq!(load_config(&path).unwrap().planning.available_minutes, 90);
    }
}
