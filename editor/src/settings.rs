//! Editor settings management
//!
//! This module provides persistent settings storage for the editor,
//! including the project layout and the last opened scene.

use engine::config::ProjectConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main editor settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Where resources and scenes live
    #[serde(default)]
    pub project: ProjectConfig,

    /// Scene reopened on startup, relative to the resources root
    #[serde(default)]
    pub last_scene: Option<String>,

    /// Node type used for the root of new scenes
    #[serde(default = "default_root_type")]
    pub new_scene_root: String,

    /// Whether the inspector panel is shown
    #[serde(default = "default_true")]
    pub show_inspector: bool,

    /// Settings version for future migration support
    #[serde(default)]
    pub version: u32,
}

fn default_root_type() -> String {
    "Spatial".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            last_scene: None,
            new_scene_root: default_root_type(),
            show_inspector: true,
            version: 1,
        }
    }
}

impl EditorSettings {
    /// Get the default path for the settings file
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("editor_settings.json")
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(Self::default_path())
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::default_path();
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(settings) => {
                info!("Loaded editor settings from {:?}", path);
                Ok(settings)
            }
            Err(e) => {
                warn!("Failed to parse settings file: {}. Using defaults.", e);
                Ok(Self::default())
            }
        }
    }

    /// Save settings to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        info!("Saved editor settings to {:?}", path.as_ref());
        Ok(())
    }

    /// Load settings from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(&path)?;
        let settings = serde_json::from_str(&content)?;
        info!("Loaded editor settings from {:?}", path.as_ref());
        Ok(settings)
    }
}
