//! Plugin configuration schema and loader
//!
//! Configuration is stored as YAML.
//! Default location: <config dir>/audio-output/config.yaml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::channel::DEFAULT_CHANNEL_NAME;

/// Root plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Channel name shared with the host
    pub channel_name: String,

    /// Label of the synthetic earpiece entry (platforms without an earpiece device code)
    pub receiver_label: String,

    /// Session setup applied when attaching (audio-session platforms)
    pub session: SessionSetup,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            receiver_label: "Receiver".to_string(),
            session: SessionSetup::default(),
        }
    }
}

/// Audio session category requested at attach time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
    Ambient,
    SoloAmbient,
    Playback,
    Record,
    /// Needed for earpiece and hands-free routes
    #[default]
    PlayAndRecord,
    MultiRoute,
}

/// Audio session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    Default,
    VoiceChat,
    VideoChat,
    SpokenAudio,
}

/// Session configuration applied when an audio-session adapter attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSetup {
    pub category: SessionCategory,
    pub mode: SessionMode,
    /// Allow hands-free Bluetooth routes
    pub allow_bluetooth: bool,
    /// Allow high-quality Bluetooth (A2DP) routes
    pub allow_bluetooth_a2dp: bool,
    /// Activate the session right after configuring it
    pub activate_on_attach: bool,
}

impl Default for SessionSetup {
    fn default() -> Self {
        Self {
            category: SessionCategory::PlayAndRecord,
            mode: SessionMode::Default,
            allow_bluetooth: true,
            allow_bluetooth_a2dp: true,
            activate_on_attach: true,
        }
    }
}

/// Get the default config file path
///
/// Returns: <config dir>/audio-output/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("audio-output")
        .join("config.yaml")
}

/// Load plugin configuration from a YAML file
///
/// If the file doesn't exist, returns the default config.
/// If the file exists but is invalid, logs a warning and returns the default config.
pub fn load_config(path: &Path) -> PluginConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return PluginConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<PluginConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_config: channel '{}', session {:?}/{:?}",
                    config.channel_name,
                    config.session.category,
                    config.session.mode
                );
                config
            }
            Err(e) => {
                log::warn!("load_config: Failed to parse config: {}", e);
                PluginConfig::default()
            }
        },
        Err(e) => {
            log::warn!("load_config: Failed to read config file: {}", e);
            PluginConfig::default()
        }
    }
}

/// Save plugin configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &PluginConfig, path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PluginConfig::default();
        assert_eq!(config.channel_name, "flutter_audio_output");
        assert_eq!(config.receiver_label, "Receiver");
        assert_eq!(config.session.category, SessionCategory::PlayAndRecord);
        assert!(config.session.allow_bluetooth && config.session.allow_bluetooth_a2dp);
    }

    #[test]
    fn test_yaml_parsing_partial() {
        let yaml = r#"
receiver_label: "Earpiece"
session:
  mode: voice_chat
  allow_bluetooth_a2dp: false
"#;
        let config: PluginConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.receiver_label, "Earpiece");
        assert_eq!(config.channel_name, "flutter_audio_output");
        assert_eq!(config.session.mode, SessionMode::VoiceChat);
        assert_eq!(config.session.category, SessionCategory::PlayAndRecord);
        assert!(!config.session.allow_bluetooth_a2dp);
        assert!(config.session.allow_bluetooth);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("missing.yaml"));
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "session: [not, a, map]").unwrap();
        assert_eq!(load_config(&path), PluginConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = PluginConfig {
            receiver_label: "Earpiece".to_string(),
            ..Default::default()
        };
        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path), config);
    }
}
