//! Serializable description of a node tree

use super::property::PropertyValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable description of one node and its children
///
/// Children are keyed by name; keys are unique within one parent and iterate in
/// sorted order. A node with a `base` extends the resource stored at that path:
/// its own properties and children are applied on top of the base when the node
/// is instantiated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Name of the registered node type to instantiate
    #[serde(rename = "type")]
    pub node_type: String,

    /// Resource this node extends, relative to the resources folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Property values overriding the node type's defaults
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,

    /// Named child nodes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, ResourceNode>,
}

impl ResourceNode {
    /// Create an empty resource of the given type
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            base: None,
            properties: BTreeMap::new(),
            children: BTreeMap::new(),
        }
    }

    /// Create a resource that extends the resource stored at `path`
    pub fn extending(node_type: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base: Some(path.into()),
            ..Self::new(node_type)
        }
    }

    /// Builder-style helper used when assembling trees in code
    pub fn with_child(mut self, key: impl Into<String>, child: ResourceNode) -> Self {
        self.children.insert(key.into(), child);
        self
    }

    /// Builder-style helper used when assembling trees in code
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn has_child(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    pub fn child(&self, key: &str) -> Option<&ResourceNode> {
        self.children.get(key)
    }

    pub fn child_mut(&mut self, key: &str) -> Option<&mut ResourceNode> {
        self.children.get_mut(key)
    }

    /// Follow a path of child keys from this node
    pub fn descendant(&self, path: &[String]) -> Option<&ResourceNode> {
        path.iter()
            .try_fold(self, |node, key| node.children.get(key))
    }

    /// Follow a path of child keys from this node, mutably
    pub fn descendant_mut(&mut self, path: &[String]) -> Option<&mut ResourceNode> {
        path.iter()
            .try_fold(self, |node, key| node.children.get_mut(key))
    }

    /// Insert a child, returning the child previously stored under the key
    pub fn insert_child(&mut self, key: impl Into<String>, child: ResourceNode) -> Option<ResourceNode> {
        self.children.insert(key.into(), child)
    }

    pub fn remove_child(&mut self, key: &str) -> Option<ResourceNode> {
        self.children.remove(key)
    }

    /// Move the child stored under `from` to `to`
    ///
    /// Returns false, leaving the map untouched, when `from` is missing or `to`
    /// is already used by another child.
    pub fn rename_child(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.children.contains_key(from);
        }
        if self.children.contains_key(to) {
            return false;
        }
        match self.children.remove(from) {
            Some(child) => {
                self.children.insert(to.to_string(), child);
                true
            }
            None => false,
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .values()
            .map(ResourceNode::subtree_len)
            .sum::<usize>()
    }
}
