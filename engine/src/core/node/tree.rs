//! Live node tree built on top of hecs

use super::components::{Children, GlobalTransform, NodeKind, NodeProperties, Parent, Transform};
use super::hierarchy;
use crate::io::property::PropertyValue;
use hecs::Entity;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Errors reported by structural changes to the live tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Node {0:?} does not exist")]
    NoSuchNode(Entity),
    #[error("Node {0:?} already has a parent")]
    AlreadyAttached(Entity),
    #[error("Key '{0}' is already used by a sibling")]
    KeyTaken(String),
    #[error("No child named '{0}'")]
    NoSuchChild(String),
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: Entity, child: Entity },
}

/// The instantiated node graph
///
/// Every node is a hecs entity carrying [`NodeKind`], [`NodeProperties`] and
/// [`Children`]. Attached nodes also carry a [`Parent`] back-reference, and for
/// every attached node `children(parent)[key] == node` holds.
pub struct LiveTree {
    inner: hecs::World,
}

impl Default for LiveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn a detached node of the given kind
    ///
    /// Nodes whose properties describe a transform also receive [`Transform`]
    /// and [`GlobalTransform`] components.
    pub fn spawn_node(
        &mut self,
        kind: &str,
        properties: BTreeMap<String, PropertyValue>,
    ) -> Entity {
        let properties = NodeProperties(properties);
        let transform = Transform::from_properties(&properties);
        let entity = self.inner.spawn((
            NodeKind(kind.to_string()),
            properties,
            Children::default(),
        ));

        if let Some(transform) = transform {
            let global = GlobalTransform::from_matrix(transform.to_matrix());
            let _ = self.inner.insert(entity, (transform, global));
        }

        trace!(entity = ?entity, kind = kind, "Spawned live node");
        entity
    }

    /// Check if a node exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Number of live nodes, attached or not
    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Registered type name of a node
    pub fn kind(&self, entity: Entity) -> Option<String> {
        self.inner
            .get::<&NodeKind>(entity)
            .ok()
            .map(|kind| kind.0.clone())
    }

    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.inner.get::<&Parent>(entity).ok().map(|parent| parent.0)
    }

    pub fn child(&self, entity: Entity, key: &str) -> Option<Entity> {
        self.inner
            .get::<&Children>(entity)
            .ok()
            .and_then(|children| children.0.get(key).copied())
    }

    pub fn has_child(&self, entity: Entity, key: &str) -> bool {
        self.child(entity, key).is_some()
    }

    /// Children of a node as `(key, entity)` pairs, sorted by key
    pub fn children(&self, entity: Entity) -> Vec<(String, Entity)> {
        self.inner
            .get::<&Children>(entity)
            .map(|children| {
                children
                    .0
                    .iter()
                    .map(|(key, child)| (key.clone(), *child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Key under which a node is stored in its parent
    pub fn key_of(&self, entity: Entity) -> Option<String> {
        let parent = self.parent(entity)?;
        let children = self.inner.get::<&Children>(parent).ok()?;
        children
            .0
            .iter()
            .find(|(_, child)| **child == entity)
            .map(|(key, _)| key.clone())
    }

    /// Attach a detached node under `parent` with the given key
    pub fn attach(&mut self, parent: Entity, key: &str, child: Entity) -> Result<(), TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::NoSuchNode(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::NoSuchNode(child));
        }
        if self.parent(child).is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if parent == child || hierarchy::is_descendant_of(self, parent, child) {
            return Err(TreeError::WouldCycle { parent, child });
        }

        let children = self
            .inner
            .query_one_mut::<&mut Children>(parent)
            .map_err(|_| TreeError::NoSuchNode(parent))?;
        if children.0.contains_key(key) {
            return Err(TreeError::KeyTaken(key.to_string()));
        }
        children.0.insert(key.to_string(), child);
        self.inner
            .insert_one(child, Parent(parent))
            .map_err(|_| TreeError::NoSuchNode(child))?;

        debug!(parent = ?parent, child = ?child, key = key, "Attached live node");
        Ok(())
    }

    /// Detach a node from its parent, returning the former parent and key
    pub fn detach(&mut self, child: Entity) -> Option<(Entity, String)> {
        let parent = self.parent(child)?;
        let key = self.key_of(child)?;

        if let Ok(children) = self.inner.query_one_mut::<&mut Children>(parent) {
            children.0.remove(&key);
        }
        let _ = self.inner.remove_one::<Parent>(child);

        debug!(parent = ?parent, child = ?child, key = %key, "Detached live node");
        Some((parent, key))
    }

    /// Re-key a child of `parent`, keeping the same child node
    pub fn rename_child(&mut self, parent: Entity, from: &str, to: &str) -> Result<(), TreeError> {
        let children = self
            .inner
            .query_one_mut::<&mut Children>(parent)
            .map_err(|_| TreeError::NoSuchNode(parent))?;
        if from == to {
            return if children.0.contains_key(from) {
                Ok(())
            } else {
                Err(TreeError::NoSuchChild(from.to_string()))
            };
        }
        if children.0.contains_key(to) {
            return Err(TreeError::KeyTaken(to.to_string()));
        }
        let child = children
            .0
            .remove(from)
            .ok_or_else(|| TreeError::NoSuchChild(from.to_string()))?;
        children.0.insert(to.to_string(), child);
        Ok(())
    }

    /// Current properties of a node
    pub fn properties(&self, entity: Entity) -> Option<BTreeMap<String, PropertyValue>> {
        self.inner
            .get::<&NodeProperties>(entity)
            .ok()
            .map(|properties| properties.0.clone())
    }

    pub fn property(&self, entity: Entity, name: &str) -> Option<PropertyValue> {
        self.inner
            .get::<&NodeProperties>(entity)
            .ok()
            .and_then(|properties| properties.get(name).cloned())
    }

    /// Set a property on a live node and refresh the state derived from it
    pub fn set_property(
        &mut self,
        entity: Entity,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), TreeError> {
        let properties = self
            .inner
            .query_one_mut::<&mut NodeProperties>(entity)
            .map_err(|_| TreeError::NoSuchNode(entity))?;
        properties.0.insert(name.to_string(), value);
        let transform = Transform::from_properties(properties);

        if let Some(transform) = transform {
            match self.inner.query_one_mut::<&mut Transform>(entity) {
                Ok(current) => *current = transform,
                Err(_) => {
                    let _ = self
                        .inner
                        .insert(entity, (transform, GlobalTransform::default()));
                }
            }
        }
        Ok(())
    }

    /// Local transform of a node, if it has one
    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.inner.get::<&Transform>(entity).ok().map(|t| *t)
    }

    /// World transform of a node as of the last hierarchy update
    pub fn global_transform(&self, entity: Entity) -> Option<GlobalTransform> {
        self.inner.get::<&GlobalTransform>(entity).ok().map(|t| *t)
    }

    /// Detach a node and despawn it together with all of its descendants
    ///
    /// Returns the number of despawned nodes.
    pub fn despawn_subtree(&mut self, root: Entity) -> usize {
        let nodes = hierarchy::descendants(self, root);
        self.detach(root);
        for node in &nodes {
            let _ = self.inner.despawn(*node);
        }
        debug!(root = ?root, count = nodes.len(), "Despawned live subtree");
        nodes.len()
    }

    /// Remove every node
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Get access to the inner hecs::World for advanced operations
    pub fn inner(&self) -> &hecs::World {
        &self.inner
    }

    /// Get mutable access to the inner hecs::World for advanced operations
    pub fn inner_mut(&mut self) -> &mut hecs::World {
        &mut self.inner
    }
}
