//! Live node tree
//!
//! Instantiated nodes live in a hecs world. Parents own their children through
//! a keyed [`Children`] map; children point back with a non-owning [`Parent`].

pub mod components;
pub mod hierarchy;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use components::{Children, GlobalTransform, NodeKind, NodeProperties, Parent, Transform};
pub use hierarchy::update_hierarchy_system;
pub use tree::{LiveTree, TreeError};

// Re-export hecs types that users will need
pub use hecs::Entity;
