//! Validated editing of the scene hierarchy
//!
//! The controller owns the live tree and the resource tree of the open scene
//! and is the only code that mutates them. Every command checks everything it
//! needs before touching either tree, so a rejected command leaves both
//! exactly as they were.

use crate::error::HierarchyError;
use crate::hierarchy_node::HierarchyNode;
use crate::naming::{is_blank, key_for_resource, unique_key};
use engine::core::node::hierarchy::{ancestors, is_descendant_of, root_of};
use engine::core::node::{update_hierarchy_system, Entity, LiveTree};
use engine::io::{
    self, scene_name, NodeRegistry, PropertyField, PropertyValue, ResourceNode, ResourceStore,
    Scene,
};
use engine::utils::paths::normalize_path;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a new child node is created from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSource {
    /// A registered node type, created with its default properties
    Type(String),
    /// A resource path relative to the resource store
    Resource(String),
    /// A resource file picked by absolute path
    File(PathBuf),
}

impl From<&str> for NodeSource {
    /// Paths (anything with a separator or a `.json` extension) become
    /// resources, everything else a type name.
    fn from(source: &str) -> Self {
        if source.ends_with(".json") || source.contains('/') || source.contains('\\') {
            NodeSource::Resource(source.to_string())
        } else {
            NodeSource::Type(source.to_string())
        }
    }
}

struct LoadedScene {
    name: String,
    /// Resource path the scene was opened from or last saved to
    path: Option<String>,
    root: Entity,
    resource: ResourceNode,
}

/// Root of a subtree that is not part of the scene, e.g. a clipboard duplicate
struct DetachedNode {
    key: String,
    resource: ResourceNode,
}

/// Where a node's resource lives: the root it hangs below and the keys leading to it
struct Location {
    root: Entity,
    path: Vec<String>,
}

pub struct HierarchyController {
    tree: LiveTree,
    registry: NodeRegistry,
    store: Box<dyn ResourceStore>,
    scene: Option<LoadedScene>,
    detached: HashMap<Entity, DetachedNode>,
}

fn same_resource(a: &str, b: &str) -> bool {
    normalize_path(a) == normalize_path(b)
}

impl HierarchyController {
    pub fn new(registry: NodeRegistry, store: impl ResourceStore + 'static) -> Self {
        Self {
            tree: LiveTree::new(),
            registry,
            store: Box::new(store),
            scene: None,
            detached: HashMap::new(),
        }
    }

    pub fn tree(&self) -> &LiveTree {
        &self.tree
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn store(&self) -> &dyn ResourceStore {
        self.store.as_ref()
    }

    /// Replace the open scene with a single fresh node of `root_type`
    pub fn new_scene(&mut self, root_type: &str, name: &str) -> Result<HierarchyNode, HierarchyError> {
        let info = self.registry.resolve(root_type)?;
        let name = if is_blank(name) {
            info.short_name().to_string()
        } else {
            name.to_string()
        };
        let resource = ResourceNode::new(info.name.clone());
        self.replace_scene(Scene::new(name, resource), None)
    }

    /// Replace the open scene with the resource stored at `path`
    pub fn open_scene(&mut self, path: &str) -> Result<HierarchyNode, HierarchyError> {
        let resource = self.store.load(path)?;
        let scene = Scene::new(scene_name(Path::new(path)), resource);
        self.replace_scene(scene, Some(path.to_string()))
    }

    fn replace_scene(
        &mut self,
        scene: Scene,
        path: Option<String>,
    ) -> Result<HierarchyNode, HierarchyError> {
        // Build into a fresh tree so a failure keeps the current scene
        let mut tree = LiveTree::new();
        let root = scene.instantiate(&mut tree, &self.registry, self.store.as_ref())?;
        update_hierarchy_system(&mut tree);

        let discarded = self.detached.len();
        self.tree = tree;
        self.detached.clear();
        info!(
            scene = %scene.name,
            node_count = self.tree.len(),
            discarded_detached = discarded,
            "Opened scene"
        );

        let node = HierarchyNode::new(root, scene.name.clone(), None);
        self.scene = Some(LoadedScene {
            name: scene.name,
            path,
            root,
            resource: scene.root,
        });
        Ok(node)
    }

    /// Write the open scene's resource tree to `path` in the resource store
    ///
    /// Fails with [`HierarchyError::ResourceSaveError`] when a child scene
    /// refers back to `path`, since the file could not be opened again.
    pub fn save_scene(&mut self, path: &str) -> Result<(), HierarchyError> {
        let scene = self
            .scene
            .as_ref()
            .ok_or_else(|| HierarchyError::invalid("no scene is open"))?;
        if self.refers_to(&scene.resource, path, &mut HashSet::new()) {
            warn!(path = %path, "Rejected save of a scene that would contain itself");
            return Err(HierarchyError::ResourceSaveError {
                path: path.to_string(),
                reason: "a child scene refers back to this file".to_string(),
            });
        }
        self.store
            .save(path, &scene.resource)
            .map_err(|e| HierarchyError::saving(path, e))?;
        info!(path = %path, scene = %scene.name, "Saved scene");

        if let Some(scene) = &mut self.scene {
            scene.path = Some(path.to_string());
        }
        Ok(())
    }

    /// Resource path of the open scene, once it has been opened or saved
    pub fn scene_path(&self) -> Option<&str> {
        self.scene.as_ref().and_then(|scene| scene.path.as_deref())
    }

    /// Whether `resource` extends `path`, directly or through its bases
    ///
    /// Bases that fail to load are skipped; instantiation reports them.
    fn refers_to(
        &self,
        resource: &ResourceNode,
        path: &str,
        visited: &mut HashSet<PathBuf>,
    ) -> bool {
        if let Some(base) = &resource.base {
            if same_resource(base, path) {
                return true;
            }
            if visited.insert(normalize_path(base)) {
                if let Ok(loaded) = self.store.load(base) {
                    if self.refers_to(&loaded, path, visited) {
                        return true;
                    }
                }
            }
        }
        resource
            .children
            .values()
            .any(|child| self.refers_to(child, path, visited))
    }

    /// Resource tree of the open scene
    pub fn scene_resource(&self) -> Option<&ResourceNode> {
        self.scene.as_ref().map(|scene| &scene.resource)
    }

    pub fn scene_name(&self) -> Option<&str> {
        self.scene.as_ref().map(|scene| scene.name.as_str())
    }

    /// Root of the open scene
    pub fn root(&self) -> Option<HierarchyNode> {
        self.scene
            .as_ref()
            .map(|scene| HierarchyNode::new(scene.root, scene.name.clone(), None))
    }

    pub fn is_root(&self, node: &HierarchyNode) -> bool {
        self.scene
            .as_ref()
            .is_some_and(|scene| scene.root == node.live)
    }

    /// Fresh view of a live node, `None` once it no longer exists
    pub fn node(&self, entity: Entity) -> Option<HierarchyNode> {
        if !self.tree.contains(entity) {
            return None;
        }
        match self.tree.parent(entity) {
            Some(parent) => {
                let key = self.tree.key_of(entity)?;
                Some(HierarchyNode::new(entity, key, Some(parent)))
            }
            None => match &self.scene {
                Some(scene) if scene.root == entity => {
                    Some(HierarchyNode::new(entity, scene.name.clone(), None))
                }
                _ => self
                    .detached
                    .get(&entity)
                    .map(|detached| HierarchyNode::new(entity, detached.key.clone(), None)),
            },
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.tree.contains(entity)
    }

    /// Children shown for `node`, sorted by key
    ///
    /// A key present in the resource without a live counterpart is skipped.
    pub fn children(&self, node: &HierarchyNode) -> Vec<HierarchyNode> {
        let Some(resource) = self.resource(node) else {
            return Vec::new();
        };
        resource
            .children
            .keys()
            .filter_map(|key| match self.tree.child(node.live, key) {
                Some(child) => Some(HierarchyNode::new(child, key.clone(), Some(node.live))),
                None => {
                    warn!(
                        parent = ?node.live,
                        key = %key,
                        "Resource child has no live node, hiding it"
                    );
                    None
                }
            })
            .collect()
    }

    /// Resource a node was instantiated from
    ///
    /// `None` for nodes that only exist because a base resource declares them.
    pub fn resource(&self, node: &HierarchyNode) -> Option<&ResourceNode> {
        self.locate(node.live)
            .and_then(|location| self.resource_at(&location))
    }

    fn require(&self, node: &HierarchyNode) -> Result<HierarchyNode, HierarchyError> {
        self.node(node.live)
            .ok_or_else(|| HierarchyError::invalid(format!("'{}' no longer exists", node.key)))
    }

    fn locate(&self, entity: Entity) -> Option<Location> {
        if !self.tree.contains(entity) {
            return None;
        }
        let mut chain = ancestors(&self.tree, entity);
        chain.reverse();
        chain.push(entity);

        let (&root, below) = chain.split_first()?;
        let path = below
            .iter()
            .map(|node| self.tree.key_of(*node))
            .collect::<Option<Vec<_>>>()?;
        Some(Location { root, path })
    }

    /// Locate a node whose resource is known to exist
    fn locate_resource(&self, node: &HierarchyNode) -> Result<Location, HierarchyError> {
        self.locate(node.live)
            .filter(|location| self.resource_at(location).is_some())
            .ok_or_else(|| {
                HierarchyError::invalid(format!("'{}' is not backed by a resource", node.key))
            })
    }

    fn resource_at(&self, location: &Location) -> Option<&ResourceNode> {
        let root = match &self.scene {
            Some(scene) if scene.root == location.root => &scene.resource,
            _ => &self.detached.get(&location.root)?.resource,
        };
        root.descendant(&location.path)
    }

    fn resource_at_mut(&mut self, location: &Location) -> Option<&mut ResourceNode> {
        let root = match &mut self.scene {
            Some(scene) if scene.root == location.root => &mut scene.resource,
            _ => &mut self.detached.get_mut(&location.root)?.resource,
        };
        root.descendant_mut(&location.path)
    }

    /// Re-key a node within its parent, returning the key it ends up with
    ///
    /// A blank proposal keeps the current key; a taken one gets a numeric suffix.
    pub fn rename(&mut self, node: &HierarchyNode, proposed: &str) -> Result<String, HierarchyError> {
        let node = self.require(node)?;
        let Some(parent) = node.parent else {
            warn!(node = ?node.live, "Rejected rename of a root node");
            return Err(HierarchyError::invalid("the root node cannot be renamed"));
        };
        if is_blank(proposed) {
            debug!(node = ?node.live, key = %node.key, "Blank name, keeping key");
            return Ok(node.key);
        }

        let parent_view = HierarchyNode::new(parent, String::new(), None);
        let location = self.locate_resource(&parent_view)?;
        let parent_resource = self
            .resource_at(&location)
            .filter(|resource| resource.has_child(&node.key))
            .ok_or_else(|| {
                HierarchyError::invalid(format!("'{}' is not backed by a resource", node.key))
            })?;

        let new_key = unique_key(proposed, |key| {
            key != node.key && (self.tree.has_child(parent, key) || parent_resource.has_child(key))
        });
        if new_key == node.key {
            return Ok(new_key);
        }

        if let Some(parent_resource) = self.resource_at_mut(&location) {
            parent_resource.rename_child(&node.key, &new_key);
        }
        self.tree.rename_child(parent, &node.key, &new_key)?;

        info!(node = ?node.live, from = %node.key, to = %new_key, "Renamed node");
        Ok(new_key)
    }

    /// Move a node and its subtree below `new_parent`
    ///
    /// Moving a node onto itself or one of its descendants fails with
    /// [`HierarchyError::CycleViolation`]. The node keeps its key unless the
    /// new parent already uses it.
    pub fn reparent(
        &mut self,
        node: &HierarchyNode,
        new_parent: &HierarchyNode,
    ) -> Result<HierarchyNode, HierarchyError> {
        let node = self.require(node)?;
        let target = self.require(new_parent)?;

        if node.live == target.live || is_descendant_of(&self.tree, target.live, node.live) {
            warn!(
                node = ?node.live,
                target = ?target.live,
                "Rejected move that would create a cycle"
            );
            return Err(HierarchyError::CycleViolation {
                node: node.live,
                target: target.live,
            });
        }
        if self.is_root(&node) {
            warn!(node = ?node.live, "Rejected move of the scene root");
            return Err(HierarchyError::invalid("the scene root cannot be moved"));
        }

        self.locate_resource(&node)?;
        let source = match node.parent {
            Some(parent) => Some(self.locate_resource(&HierarchyNode::new(parent, "", None))?),
            None => None,
        };
        let destination = self.locate_resource(&target)?;
        let target_resource = self
            .resource_at(&destination)
            .ok_or_else(|| HierarchyError::invalid("target is not backed by a resource"))?;

        let same_parent = node.parent == Some(target.live);
        let new_key = unique_key(&node.key, |key| {
            !(same_parent && key == node.key)
                && (self.tree.has_child(target.live, key) || target_resource.has_child(key))
        });

        let resource = match &source {
            Some(location) => self
                .resource_at_mut(location)
                .and_then(|parent| parent.remove_child(&node.key)),
            None => self
                .detached
                .remove(&node.live)
                .map(|detached| detached.resource),
        }
        .ok_or_else(|| HierarchyError::invalid(format!("'{}' has no resource", node.key)))?;

        if let Some(target_resource) = self.resource_at_mut(&destination) {
            target_resource.insert_child(new_key.clone(), resource);
        }
        self.tree.detach(node.live);
        self.tree.attach(target.live, &new_key, node.live)?;
        update_hierarchy_system(&mut self.tree);

        info!(
            node = ?node.live,
            target = ?target.live,
            key = %new_key,
            "Moved node"
        );
        Ok(HierarchyNode::new(node.live, new_key, Some(target.live)))
    }

    /// Create a node from a type or a resource and attach it below `parent`
    ///
    /// The new key is the type's short name (or the resource's file stem),
    /// suffixed when a sibling already uses it.
    pub fn add_child(
        &mut self,
        parent: &HierarchyNode,
        source: impl Into<NodeSource>,
    ) -> Result<HierarchyNode, HierarchyError> {
        let parent = self.require(parent)?;
        let location = self.locate_resource(&parent)?;

        let (base_key, resource) = match source.into() {
            NodeSource::Type(name) => {
                let info = self.registry.resolve(&name)?;
                (info.short_name().to_string(), ResourceNode::new(info.name.clone()))
            }
            NodeSource::Resource(path) => self.child_scene(path)?,
            NodeSource::File(absolute) => {
                let path = self.store.relative_path_of(&absolute).ok_or_else(|| {
                    HierarchyError::ResourceLoadError {
                        path: absolute.display().to_string(),
                        reason: "file is outside the resources folder".to_string(),
                    }
                })?;
                self.child_scene(path)?
            }
        };

        let parent_resource = self
            .resource_at(&location)
            .ok_or_else(|| HierarchyError::invalid("parent is not backed by a resource"))?;
        let key = unique_key(&base_key, |key| {
            self.tree.has_child(parent.live, key) || parent_resource.has_child(key)
        });

        let child = io::instantiate(&resource, &mut self.tree, &self.registry, self.store.as_ref())?;
        if let Some(parent_resource) = self.resource_at_mut(&location) {
            parent_resource.insert_child(key.clone(), resource);
        }
        self.tree.attach(parent.live, &key, child)?;
        update_hierarchy_system(&mut self.tree);

        info!(parent = ?parent.live, child = ?child, key = %key, "Added node");
        Ok(HierarchyNode::new(child, key, Some(parent.live)))
    }

    fn child_scene(&self, path: String) -> Result<(String, ResourceNode), HierarchyError> {
        let base = self.store.load(&path)?;
        if let Some(scene_path) = self.scene_path() {
            if same_resource(&path, scene_path)
                || self.refers_to(&base, scene_path, &mut HashSet::new())
            {
                warn!(
                    path = %path,
                    scene = %scene_path,
                    "Rejected child scene that contains the open scene"
                );
                return Err(HierarchyError::ResourceLoadError {
                    path,
                    reason: "the open scene would contain itself".to_string(),
                });
            }
        }
        Ok((key_for_resource(&path), ResourceNode::extending(base.node_type, path)))
    }

    /// Remove a node and its subtree, returning the number of live nodes removed
    ///
    /// Selections and clipboard entries pointing into the subtree are the
    /// caller's to clear.
    pub fn delete(&mut self, node: &HierarchyNode) -> Result<usize, HierarchyError> {
        let node = self.require(node)?;
        let Some(parent) = node.parent else {
            warn!(node = ?node.live, "Rejected delete of a root node");
            return Err(HierarchyError::invalid("root nodes cannot be deleted"));
        };

        let location = self
            .locate(parent)
            .filter(|location| {
                self.resource_at(location)
                    .is_some_and(|resource| resource.has_child(&node.key))
            })
            .ok_or_else(|| {
                HierarchyError::invalid(format!("'{}' is not backed by a resource", node.key))
            })?;

        if let Some(parent_resource) = self.resource_at_mut(&location) {
            parent_resource.remove_child(&node.key);
        }
        let removed = self.tree.despawn_subtree(node.live);

        info!(node = ?node.live, key = %node.key, removed, "Deleted node");
        Ok(removed)
    }

    /// Build an independent, detached subtree from a resource
    ///
    /// The subtree shares nothing with any other node. It stays owned by the
    /// controller until it is moved into the scene or discarded.
    pub fn instantiate(&mut self, key: &str, resource: ResourceNode) -> Result<HierarchyNode, HierarchyError> {
        let live = io::instantiate(&resource, &mut self.tree, &self.registry, self.store.as_ref())?;
        update_hierarchy_system(&mut self.tree);
        self.detached.insert(
            live,
            DetachedNode {
                key: key.to_string(),
                resource,
            },
        );
        debug!(live = ?live, key = key, "Instantiated detached subtree");
        Ok(HierarchyNode::new(live, key, None))
    }

    /// Detached deep copy of a node, resource and live subtree alike
    pub fn duplicate(&mut self, node: &HierarchyNode) -> Result<HierarchyNode, HierarchyError> {
        let node = self.require(node)?;
        let resource = self.resource(&node).cloned().ok_or_else(|| {
            HierarchyError::invalid(format!("'{}' is not backed by a resource", node.key))
        })?;
        self.instantiate(&node.key, resource)
    }

    /// Whether `entity` is the root of a detached subtree
    pub fn is_detached_root(&self, entity: Entity) -> bool {
        self.detached.contains_key(&entity)
    }

    /// Whether `entity` lies in a detached subtree
    pub fn is_detached(&self, entity: Entity) -> bool {
        self.tree.contains(entity) && self.detached.contains_key(&root_of(&self.tree, entity))
    }

    /// Drop a detached subtree, returning whether there was one
    pub fn discard_detached(&mut self, entity: Entity) -> bool {
        if self.detached.remove(&entity).is_none() {
            return false;
        }
        let removed = self.tree.despawn_subtree(entity);
        debug!(entity = ?entity, removed, "Discarded detached subtree");
        true
    }

    pub fn detached_count(&self) -> usize {
        self.detached.len()
    }

    pub fn kind(&self, node: &HierarchyNode) -> Option<String> {
        self.tree.kind(node.live)
    }

    /// Fields declared by the node's type
    pub fn fields(&self, node: &HierarchyNode) -> Vec<PropertyField> {
        self.kind(node)
            .and_then(|kind| self.registry.resolve(&kind).ok())
            .map(|info| info.fields.clone())
            .unwrap_or_default()
    }

    pub fn property(&self, node: &HierarchyNode, name: &str) -> Option<PropertyValue> {
        self.tree.property(node.live, name)
    }

    /// Path of the resource a node extends, for child scenes
    pub fn base_of(&self, node: &HierarchyNode) -> Option<String> {
        self.resource(node).and_then(|resource| resource.base.clone())
    }

    /// Set a property on both the live node and its resource
    pub fn set_property(
        &mut self,
        node: &HierarchyNode,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), HierarchyError> {
        let node = self.require(node)?;
        let kind = self
            .tree
            .kind(node.live)
            .ok_or_else(|| HierarchyError::invalid("node has no type"))?;
        let info = self.registry.resolve(&kind)?;
        let field = info.field(name).ok_or_else(|| {
            HierarchyError::invalid(format!("{kind} has no property '{name}'"))
        })?;
        if !field.accepts(&value) {
            warn!(
                node = ?node.live,
                property = name,
                expected = ?field.property_type,
                got = ?value.property_type(),
                "Rejected property value of the wrong type"
            );
            return Err(HierarchyError::invalid(format!(
                "property '{name}' expects {:?}, got {:?}",
                field.property_type,
                value.property_type()
            )));
        }

        let location = self.locate_resource(&node)?;
        if let Some(resource) = self.resource_at_mut(&location) {
            resource.properties.insert(name.to_string(), value.clone());
        }
        self.tree.set_property(node.live, name, value)?;
        update_hierarchy_system(&mut self.tree);

        debug!(node = ?node.live, property = name, "Set property");
        Ok(())
    }

    /// Types offered in the "Add node" menu
    pub fn node_types(&self) -> Vec<&str> {
        self.registry.registered_types()
    }

    /// Resources offered in the "Add child scene" menu
    pub fn resource_paths(&self) -> Vec<String> {
        self.store.list_resources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::io::MemoryResourceStore;

    fn controller() -> HierarchyController {
        HierarchyController::new(NodeRegistry::with_default_nodes(), MemoryResourceStore::new())
    }

    fn keys(controller: &HierarchyController, node: &HierarchyNode) -> Vec<String> {
        controller
            .children(node)
            .into_iter()
            .map(|child| child.key)
            .collect()
    }

    #[test]
    fn test_new_scene_has_root_only() {
        let mut controller = controller();
        assert!(controller.root().is_none());

        let root = controller.new_scene("Spatial", "level").unwrap();
        assert_eq!(root.key, "level");
        assert!(controller.is_root(&root));
        assert!(controller.children(&root).is_empty());
        assert_eq!(controller.scene_resource().unwrap().node_type, "Spatial");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut controller = controller();
        let root = controller.new_scene("Node", "").unwrap();
        assert_eq!(root.key, "Node");

        let result = controller.add_child(&root, "Teapot");
        assert_eq!(result, Err(HierarchyError::UnknownType("Teapot".to_string())));
        assert!(controller.children(&root).is_empty());
    }

    #[test]
    fn test_rename_resolves_collisions() {
        let mut controller = controller();
        let root = controller.new_scene("Node", "root").unwrap();
        let a = controller.add_child(&root, "Spatial").unwrap();
        let b = controller.add_child(&root, "Spatial").unwrap();
        assert_eq!((a.key.as_str(), b.key.as_str()), ("Spatial", "Spatial1"));

        assert_eq!(controller.rename(&b, "Spatial").unwrap(), "Spatial1");
        assert_eq!(controller.rename(&a, "Spatial").unwrap(), "Spatial");
        assert_eq!(controller.rename(&a, "   ").unwrap(), "Spatial");
        assert_eq!(controller.rename(&a, "player").unwrap(), "player");
        assert_eq!(keys(&controller, &root), vec!["Spatial1", "player"]);
        assert!(controller.scene_resource().unwrap().has_child("player"));
    }

    #[test]
    fn test_root_cannot_be_renamed_or_deleted() {
        let mut controller = controller();
        let root = controller.new_scene("Node", "root").unwrap();

        assert!(matches!(
            controller.rename(&root, "other"),
            Err(HierarchyError::InvalidOperation(_))
        ));
        assert!(matches!(
            controller.delete(&root),
            Err(HierarchyError::InvalidOperation(_))
        ));
        assert_eq!(controller.root().unwrap().key, "root");
    }

    #[test]
    fn test_set_property_updates_both_trees() {
        let mut controller = controller();
        let root = controller.new_scene("Node", "root").unwrap();
        let camera = controller.add_child(&root, "Camera").unwrap();

        controller
            .set_property(&camera, "fov", PropertyValue::Float(75.0))
            .unwrap();
        assert_eq!(controller.property(&camera, "fov"), Some(PropertyValue::Float(75.0)));
        assert_eq!(
            controller.resource(&camera).unwrap().properties.get("fov"),
            Some(&PropertyValue::Float(75.0))
        );

        let wrong = controller.set_property(&camera, "fov", PropertyValue::Boolean(true));
        assert!(matches!(wrong, Err(HierarchyError::InvalidOperation(_))));
        assert_eq!(controller.property(&camera, "fov"), Some(PropertyValue::Float(75.0)));
    }

    #[test]
    fn test_duplicate_is_detached_and_discardable() {
        let mut controller = controller();
        let root = controller.new_scene("Node", "root").unwrap();
        let light = controller.add_child(&root, "Light").unwrap();

        let copy = controller.duplicate(&light).unwrap();
        assert_ne!(copy.live, light.live);
        assert!(controller.is_detached_root(copy.live));
        assert_eq!(controller.node(copy.live).unwrap().key, "Light");

        assert!(controller.discard_detached(copy.live));
        assert!(!controller.contains(copy.live));
        assert!(!controller.discard_detached(light.live));
        assert!(controller.contains(light.live));
    }
}
