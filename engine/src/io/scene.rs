//! Scene loading, saving and instantiation

use super::node_registry::NodeRegistry;
use super::resource::ResourceNode;
use super::resource_store::ResourceStore;
use crate::core::node::{Entity, LiveTree, TreeError};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Errors that can occur during scene operations
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// IO error when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A resource names a node type nobody registered
    #[error("Unknown node type: {0}")]
    UnknownType(String),
    /// A referenced resource could not be read or parsed
    #[error("Resource '{path}' could not be loaded: {reason}")]
    ResourceLoad { path: String, reason: String },
    /// A resource extends itself, directly or through other resources
    #[error("Resource '{0}' extends itself")]
    CyclicResource(String),
    /// The live tree rejected a structural change
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

/// A scene: a named root resource
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Key shown for the root node
    pub name: String,
    /// Description of the whole tree
    pub root: ResourceNode,
}

impl Scene {
    /// Create a scene around an existing resource tree
    pub fn new(name: impl Into<String>, root: ResourceNode) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Instantiate this scene into a tree, returning the live root
    pub fn instantiate(
        &self,
        tree: &mut LiveTree,
        registry: &NodeRegistry,
        store: &dyn ResourceStore,
    ) -> Result<Entity, SceneError> {
        info!(
            scene = %self.name,
            node_count = self.root.subtree_len(),
            "Instantiating scene"
        );
        instantiate(&self.root, tree, registry, store)
    }

    /// Save this scene to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let path = path.as_ref();
        info!(path = ?path, "Saving scene to file");

        let json = serde_json::to_string_pretty(&self.root)?;
        fs::write(path, json)?;

        info!(path = ?path, "Scene saved successfully");
        Ok(())
    }

    /// Load a scene from a JSON file; the file stem becomes the root key
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        info!(path = ?path, "Loading scene from file");

        let json = fs::read_to_string(path)?;
        let root = serde_json::from_str(&json)?;

        info!(path = ?path, "Scene loaded successfully");
        Ok(Self {
            name: scene_name(path),
            root,
        })
    }
}

/// Root key for a scene stored at `path`
pub fn scene_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "root".to_string())
}

/// Build a detached live subtree from a resource
///
/// Nothing is left behind in the tree when instantiation fails.
pub fn instantiate(
    resource: &ResourceNode,
    tree: &mut LiveTree,
    registry: &NodeRegistry,
    store: &dyn ResourceStore,
) -> Result<Entity, SceneError> {
    let mut instantiation = Instantiation {
        tree,
        registry,
        store,
        base_chain: Vec::new(),
        spawned: Vec::new(),
    };

    match instantiation.node(resource) {
        Ok(entity) => {
            debug!(
                entity = ?entity,
                spawned = instantiation.spawned.len(),
                "Instantiated resource"
            );
            Ok(entity)
        }
        Err(error) => {
            warn!(error = %error, "Instantiation failed, rolling back");
            for entity in instantiation.spawned.drain(..).rev() {
                let _ = instantiation.tree.inner_mut().despawn(entity);
            }
            Err(error)
        }
    }
}

struct Instantiation<'a> {
    tree: &'a mut LiveTree,
    registry: &'a NodeRegistry,
    store: &'a dyn ResourceStore,
    /// Base resources currently being expanded, outermost first
    base_chain: Vec<String>,
    spawned: Vec<Entity>,
}

impl Instantiation<'_> {
    fn node(&mut self, resource: &ResourceNode) -> Result<Entity, SceneError> {
        let entity = match &resource.base {
            Some(path) => self.extended(path, resource)?,
            None => {
                let info = self.registry.resolve(&resource.node_type)?;
                let mut properties = info.defaults.clone();
                properties.extend(
                    resource
                        .properties
                        .iter()
                        .map(|(name, value)| (name.clone(), value.clone())),
                );
                let entity = self.tree.spawn_node(&info.name, properties);
                self.spawned.push(entity);
                entity
            }
        };

        for (key, child_resource) in &resource.children {
            let child = self.node(child_resource)?;
            // Own children replace same-named children of the base
            if let Some(existing) = self.tree.child(entity, key) {
                debug!(key = %key, "Replacing child inherited from base resource");
                self.tree.despawn_subtree(existing);
            }
            self.tree.attach(entity, key, child)?;
        }

        Ok(entity)
    }

    fn extended(&mut self, path: &str, resource: &ResourceNode) -> Result<Entity, SceneError> {
        if self.base_chain.iter().any(|seen| seen == path) {
            return Err(SceneError::CyclicResource(path.to_string()));
        }

        let base = self.store.load(path)?;
        self.base_chain.push(path.to_string());
        let entity = self.node(&base);
        self.base_chain.pop();
        let entity = entity?;

        for (name, value) in &resource.properties {
            self.tree.set_property(entity, name, value.clone())?;
        }
        Ok(entity)
    }
}
