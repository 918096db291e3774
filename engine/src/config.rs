//! Configuration types for the engine

use crate::io::FileResourceStore;
use crate::utils::paths::{is_plain_name, resource_path};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Configuration for project resource paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Root directory for all resources
    pub resource_root: PathBuf,
    /// Directory name for scenes (relative to resource_root)
    pub scenes_dir: String,
    /// File extension of resource files
    pub extension: String,
}

impl ProjectConfig {
    /// Create a new ProjectConfig with custom paths
    pub fn new(resource_root: PathBuf, scenes_dir: String) -> Self {
        debug!(
            resource_root = ?resource_root,
            scenes_dir = scenes_dir,
            "Creating new ProjectConfig"
        );
        Self {
            resource_root,
            scenes_dir,
            ..Self::default()
        }
    }

    /// Root folder resource paths are relative to
    pub fn resources_root(&self) -> &PathBuf {
        &self.resource_root
    }

    /// Resource path of a scene, relative to the resources root
    ///
    /// Returns `None` for names that would escape the scenes folder.
    pub fn scene_path(&self, name: &str) -> Option<String> {
        if !is_plain_name(name) {
            debug!(name = name, "Rejected scene name");
            return None;
        }
        let path = resource_path(&self.scenes_dir, &format!("{name}.{}", self.extension));
        debug!(name = name, path = %path, "Generated scene path");
        Some(path)
    }

    /// Resource store reading from the configured root
    pub fn resource_store(&self) -> FileResourceStore {
        FileResourceStore::with_extension(&self.resource_root, &self.extension)
    }

    /// Check if the resource directories exist
    pub fn validate(&self) -> Result<(), std::io::Error> {
        let scenes_path = self.resource_root.join(&self.scenes_dir);

        if !self.resource_root.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Resource root directory not found: {:?}", self.resource_root),
            ));
        }

        if !scenes_path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Scenes directory not found: {scenes_path:?}"),
            ));
        }

        Ok(())
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            resource_root: PathBuf::from("assets"),
            scenes_dir: "scenes".to_string(),
            extension: "json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_config_scene_path() {
        let config = ProjectConfig::new(PathBuf::from("game/assets"), "levels".to_string());
        assert_eq!(
            config.scene_path("test_scene").as_deref(),
            Some("levels/test_scene.json")
        );
    }

    #[test]
    fn test_project_config_rejects_path_traversal() {
        let config = ProjectConfig::default();
        assert!(config.scene_path("../evil").is_none());
        assert!(config.scene_path("some/path/evil").is_none());
        assert!(config.scene_path("some\\path\\evil").is_none());
    }

    #[test]
    fn test_project_config_validate() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::new(dir.path().to_path_buf(), "scenes".to_string());
        assert!(config.validate().is_err());

        std::fs::create_dir(dir.path().join("scenes")).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_project_config_partial_json_uses_defaults() {
        let config: ProjectConfig = serde_json::from_str(r#"{ "scenes_dir": "levels" }"#).unwrap();
        assert_eq!(config.scenes_dir, "levels");
        assert_eq!(config.extension, "json");
        assert_eq!(config.resource_root, PathBuf::from("assets"));
    }
}
