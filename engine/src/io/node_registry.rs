//! Node type registry used to instantiate resources

use super::property::{PropertyField, PropertyValue};
use super::scene::SceneError;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Description of an instantiable node type
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTypeInfo {
    /// Registered type name (e.g. "Spatial")
    pub name: String,
    /// Fields shown in the inspector, in declaration order
    pub fields: Vec<PropertyField>,
    /// Value every property starts with on a fresh node
    pub defaults: BTreeMap<String, PropertyValue>,
}

impl NodeTypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            defaults: BTreeMap::new(),
        }
    }

    /// Declare a field together with its default value
    pub fn with_field(mut self, field: PropertyField, default: PropertyValue) -> Self {
        self.defaults.insert(field.name.clone(), default);
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&PropertyField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Name used as the default key of new nodes of this type
    pub fn short_name(&self) -> &str {
        short_type_name(&self.name)
    }
}

/// Strip any module or package prefix from a type name
///
/// `"nodes::Camera"` and `"nodes.Camera"` both become `"Camera"`.
pub fn short_type_name(name: &str) -> &str {
    let after_path = name.rsplit("::").next().unwrap_or(name);
    after_path.rsplit('.').next().unwrap_or(after_path)
}

/// Trait for node types known at compile time
pub trait NodeType: 'static {
    /// Get the name of this node type
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Describe the fields and defaults of this node type
    fn describe() -> NodeTypeInfo
    where
        Self: Sized;

    /// Register this node type with the registry
    fn register(registry: &mut NodeRegistry)
    where
        Self: Sized,
    {
        registry.register_type(Self::describe());
    }
}

/// Registry mapping node type names to their descriptions
#[derive(Default)]
pub struct NodeRegistry {
    types: HashMap<String, NodeTypeInfo>,
}

impl NodeRegistry {
    /// Create a new empty node registry
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Register a node type, replacing any previous type with the same name
    pub fn register_type(&mut self, info: NodeTypeInfo) {
        debug!(
            type_name = %info.name,
            field_count = info.fields.len(),
            "Registered node type"
        );
        self.types.insert(info.name.clone(), info);
    }

    /// Resolve a type name to its description
    pub fn resolve(&self, type_name: &str) -> Result<&NodeTypeInfo, SceneError> {
        self.types
            .get(type_name)
            .ok_or_else(|| SceneError::UnknownType(type_name.to_string()))
    }

    /// Check if a node type is registered
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Get all registered type names, sorted
    pub fn registered_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of registered node types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Create a registry with all built-in node types registered
    pub fn with_default_nodes() -> Self {
        use crate::core::node::types::{Camera, Light, Node, Spatial, Sprite};

        let mut registry = Self::new();
        Node::register(&mut registry);
        Spatial::register(&mut registry);
        Camera::register(&mut registry);
        Light::register(&mut registry);
        Sprite::register(&mut registry);

        debug!(
            type_count = registry.len(),
            "Created registry with default node types"
        );

        registry
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("registered_types", &self.registered_types())
            .finish()
    }
}
