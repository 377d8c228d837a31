use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::field::FormField;
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_paste")]
    pub paste: String,
    #[serde(default = "default_clear")]
    pub clear: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_chip_fg")]
    pub chip_fg: String,
    #[serde(default = "default_chip_bg")]
    pub chip_bg: String,
    #[serde(default = "default_placeholder_fg")]
    pub placeholder_fg: String,
    #[serde(default = "default_focus_border")]
    pub focus_border: String,
}

/// The form field the editor takes over when none is given on the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_field_name")]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_field_attributes")]
    pub attributes: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::default(),
            theme: Theme::default(),
            field: FieldConfig::default(),
            log_level: default_log_level(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            paste: default_paste(),
            clear: default_clear(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            chip_fg: default_chip_fg(),
            chip_bg: default_chip_bg(),
            placeholder_fg: default_placeholder_fg(),
            focus_border: default_focus_border(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            name: default_field_name(),
            value: String::new(),
            attributes: default_field_attributes(),
        }
    }
}

impl FieldConfig {
    /// Build the form field described by this section
    pub fn to_form_field(&self) -> FormField {
        FormField::new(self.name.clone())
            .with_value(self.value.clone())
            .with_attributes(self.attributes.clone())
    }
}

// Default value functions
fn default_quit() -> String {
    "Ctrl+q".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_paste() -> String {
    "Ctrl+v".to_string()
}

fn default_clear() -> String {
    "Ctrl+u".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_chip_fg() -> String {
    // Empty means "pick a contrasting color for chip_bg"
    String::new()
}

fn default_chip_bg() -> String {
    "blue".to_string()
}

fn default_placeholder_fg() -> String {
    "darkgray".to_string()
}

fn default_focus_border() -> String {
    "cyan".to_string()
}

fn default_field_name() -> String {
    "tags".to_string()
}

fn default_field_attributes() -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    attributes.insert("placeholder".to_string(), "Add a tag…".to_string());
    attributes.insert("autofocus".to_string(), String::new());
    attributes.insert("accesskey".to_string(), "t".to_string());
    attributes
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Invalid key binding '{binding}': {reason}")]
    KeyBindingError { binding: String, reason: String },
}

impl Config {
    /// Load configuration for a profile, writing the default file if none exists
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from an explicit path, writing the default file if it is missing
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let mut config = Config::default();
            config.save_to_path(path)?;
            Ok(config)
        }
    }

    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Reject key bindings that cannot be parsed, so the event loop never has to
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bindings = [
            &self.key_bindings.quit,
            &self.key_bindings.help,
            &self.key_bindings.paste,
            &self.key_bindings.clear,
        ];
        for binding in bindings {
            utils::parse_key_binding(binding).map_err(|reason| ConfigError::KeyBindingError {
                binding: binding.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}
