//! Application settings persistence for Knowledge Hub.
//!
//! Stores user preferences (shortcut bindings, summarizer endpoint, data
//! directory) in a JSON file at an OS-appropriate location.

use knowhub_core::{SummarizerConfig, PUSH_CLIPBOARD_ACCELERATOR, TOGGLE_STICKY_NOTE_ACCELERATOR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the summarizer API key from the file.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Global shortcut bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShortcutSettings {
    pub toggle_sticky_note: String,
    pub push_clipboard: String,
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        Self {
            toggle_sticky_note: TOGGLE_STICKY_NOTE_ACCELERATOR.to_string(),
            push_clipboard: PUSH_CLIPBOARD_ACCELERATOR.to_string(),
        }
    }
}

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub shortcuts: ShortcutSettings,
    pub summarizer: SummarizerConfig,
    /// Directory holding the sticky-note file.
    pub data_directory: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            shortcuts: ShortcutSettings::default(),
            summarizer: SummarizerConfig::default(),
            data_directory: default_data_directory().to_string_lossy().to_string(),
        }
    }
}

impl AppSettings {
    /// Summarizer configuration with the environment key applied over the file's.
    pub fn summarizer_config(&self) -> SummarizerConfig {
        let mut config = self.summarizer.clone();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }
        config
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/knowhub/settings.json`
/// - Windows: `%APPDATA%/KnowledgeHub/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("KnowledgeHub").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("knowhub").join("settings.json")
    }
}

/// Returns the default data directory, the OS per-user data dir plus `KnowledgeHub`.
pub fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("KnowledgeHub")
}

/// Loads settings from disk; returns defaults if the file is missing or corrupt.
pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_file_path())
}

fn load_settings_from(path: &Path) -> AppSettings {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable settings at {}: {e}", path.display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to disk, creating parent directories as needed.
pub fn save_settings(settings: &AppSettings) -> Result<(), String> {
    save_settings_to(&settings_file_path(), settings)
}

fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {e}"))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write settings: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings_from(&dir.path().join("settings.json"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.shortcuts.toggle_sticky_note, "Alt+CommandOrControl+C");
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"shortcuts": {"pushClipboard": "Alt+Shift+V"}}"#).unwrap();
        let settings = load_settings_from(&path);
        assert_eq!(settings.shortcuts.push_clipboard, "Alt+Shift+V");
        assert_eq!(settings.shortcuts.toggle_sticky_note, TOGGLE_STICKY_NOTE_ACCELERATOR);
        assert_eq!(settings.summarizer, SummarizerConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = AppSettings::default();
        settings.data_directory = "/tmp/hub".to_string();
        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path), settings);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"dataDirectory\""));
    }
}
