//! Access to resource files stored under the project's resources folder

use super::resource::ResourceNode;
use super::scene::SceneError;
use crate::utils::paths::normalize_path;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Storage of resource descriptions addressed by relative path
///
/// Paths always use `/` separators and are relative to the store's root.
pub trait ResourceStore {
    /// Load the resource stored at `path`
    ///
    /// Missing and malformed resources are reported as [`SceneError::ResourceLoad`].
    fn load(&self, path: &str) -> Result<ResourceNode, SceneError>;

    /// Write a resource to `path`, replacing what was there
    fn save(&mut self, path: &str, resource: &ResourceNode) -> Result<(), SceneError>;

    /// All stored resources as sorted relative paths
    fn list_resources(&self) -> Vec<String>;

    /// Path of `absolute` relative to the store, if it lies inside it
    fn relative_path_of(&self, absolute: &Path) -> Option<String>;
}

/// Resource store backed by JSON files in a folder
#[derive(Debug, Clone)]
pub struct FileResourceStore {
    root: PathBuf,
    extension: String,
}

impl FileResourceStore {
    /// Create a store for the folder at `root`, reading `.json` files
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extension(root, "json")
    }

    pub fn with_extension(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let root = root.into();
        debug!(root = ?root, "Creating file resource store");
        Self {
            root,
            extension: extension.into(),
        }
    }

    /// Folder all relative resource paths start from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a relative resource path
    pub fn absolute_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn load_error(path: &str, reason: impl ToString) -> SceneError {
        SceneError::ResourceLoad {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl ResourceStore for FileResourceStore {
    fn load(&self, path: &str) -> Result<ResourceNode, SceneError> {
        let absolute = self.absolute_path(path);
        debug!(path = %path, absolute = ?absolute, "Loading resource");

        let json = fs::read_to_string(&absolute).map_err(|e| Self::load_error(path, e))?;
        serde_json::from_str(&json).map_err(|e| Self::load_error(path, e))
    }

    fn save(&mut self, path: &str, resource: &ResourceNode) -> Result<(), SceneError> {
        let absolute = self.absolute_path(path);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(resource)?;
        fs::write(&absolute, json)?;
        info!(path = %path, "Saved resource");
        Ok(())
    }

    fn list_resources(&self) -> Vec<String> {
        let mut found: Vec<String> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(root = ?self.root, error = %e, "Failed to read resource folder");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
            })
            .filter_map(|entry| self.relative_path_of(entry.path()))
            .collect();

        found.sort();
        found
    }

    fn relative_path_of(&self, absolute: &Path) -> Option<String> {
        let root = normalize_path(&self.root);
        let absolute = normalize_path(absolute);
        absolute
            .strip_prefix(&root)
            .ok()
            .map(|relative| relative.to_string_lossy().into_owned())
            .filter(|relative| !relative.is_empty())
    }
}

/// In-memory resource store
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceStore {
    resources: BTreeMap<String, ResourceNode>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, resource: ResourceNode) {
        self.resources.insert(path.into(), resource);
    }
}

impl ResourceStore for MemoryResourceStore {
    fn load(&self, path: &str) -> Result<ResourceNode, SceneError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| SceneError::ResourceLoad {
                path: path.to_string(),
                reason: "no such resource".to_string(),
            })
    }

    fn save(&mut self, path: &str, resource: &ResourceNode) -> Result<(), SceneError> {
        self.insert(path, resource.clone());
        Ok(())
    }

    fn list_resources(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    fn relative_path_of(&self, absolute: &Path) -> Option<String> {
        let path = normalize_path(absolute).to_string_lossy().into_owned();
        self.resources.contains_key(&path).then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileResourceStore::new(dir.path());

        let resource = ResourceNode::new("Spatial").with_child("cam", ResourceNode::new("Camera"));
        store.save("scenes/player.json", &resource).unwrap();

        assert_eq!(store.load("scenes/player.json").unwrap(), resource);
    }

    #[test]
    fn test_missing_and_malformed_resources() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let store = FileResourceStore::new(dir.path());

        assert!(matches!(
            store.load("missing.json"),
            Err(SceneError::ResourceLoad { path, .. }) if path == "missing.json"
        ));
        assert!(matches!(
            store.load("broken.json"),
            Err(SceneError::ResourceLoad { path, .. }) if path == "broken.json"
        ));
    }

    #[test]
    fn test_list_resources_walks_subfolders() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileResourceStore::new(dir.path());
        store.save("b.json", &ResourceNode::new("Node")).unwrap();
        store.save("scenes/a.json", &ResourceNode::new("Node")).unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        assert_eq!(store.list_resources(), vec!["b.json", "scenes/a.json"]);
    }

    #[test]
    fn test_list_resources_skips_folders_and_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileResourceStore::new(dir.path());
        store
            .save("levels/forest/deep/tree.json", &ResourceNode::new("Sprite"))
            .unwrap();
        fs::create_dir_all(dir.path().join("archive.json")).unwrap();
        fs::write(dir.path().join("UPPER.JSON"), "{}").unwrap();

        assert_eq!(
            store.list_resources(),
            vec!["UPPER.JSON", "levels/forest/deep/tree.json"]
        );

        let missing = FileResourceStore::new(dir.path().join("does-not-exist"));
        assert!(missing.list_resources().is_empty());
    }

    #[test]
    fn test_relative_path_of() {
        let store = FileResourceStore::new("/project/assets");
        assert_eq!(
            store.relative_path_of(Path::new("/project/assets/scenes/level.json")),
            Some("scenes/level.json".to_string())
        );
        assert_eq!(store.relative_path_of(Path::new("/elsewhere/level.json")), None);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryResourceStore::new();
        store.save("b.json", &ResourceNode::new("Node")).unwrap();
        store.insert("a.json", ResourceNode::new("Sprite"));

        assert_eq!(store.list_resources(), vec!["a.json", "b.json"]);
        assert_eq!(store.load("a.json").unwrap().node_type, "Sprite");
        assert_eq!(store.relative_path_of(Path::new("a.json")).as_deref(), Some("a.json"));
        assert!(store.load("c.json").is_err());
    }
}
