//! Input/Output module for resource loading and scene serialization

pub mod node_registry;
pub mod property;
pub mod resource;
pub mod resource_store;
mod scene;

pub use node_registry::{short_type_name, NodeRegistry, NodeType, NodeTypeInfo};
pub use property::{NumericHint, PropertyField, PropertyType, PropertyValue};
pub use resource::ResourceNode;
pub use resource_store::{FileResourceStore, MemoryResourceStore, ResourceStore};
pub use scene::{instantiate, scene_name, Scene, SceneError};
