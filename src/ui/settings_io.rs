use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ui::settings::{AgentSettings, ConfigError};

pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("stepwise_agent");
    path.push("settings.json");
    path
}

/// Missing file means defaults; a broken file is an error.
pub fn load_settings_from(path: &Path) -> Result<AgentSettings, ConfigError> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(serde_json::from_str(&s)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(AgentSettings::default()),
        Err(e) => Err(e.into()),
    }
}

pub fn save_settings_to(path: &Path, settings: &AgentSettings) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_settings() -> Result<AgentSettings, ConfigError> {
    load_settings_from(&settings_path())
}

pub fn save_settings(settings: &AgentSettings) -> Result<(), ConfigError> {
    save_settings_to(&settings_path(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::settings::Backend;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, AgentSettings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = AgentSettings {
            backend: Backend::LmStudio,
            model: "qwen2.5-7b".into(),
            color: false,
            ..Default::default()
        };
        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_settings_from(&path), Err(ConfigError::Json(_))));
    }
}
