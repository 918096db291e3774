//! Scene data model for the editor
//!
//! This crate provides the serializable resource tree, the live node tree
//! instantiated from it, the node type registry and resource storage.

pub mod config;
pub mod core;
pub mod io;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    // Live tree types
    pub use crate::core::node::{
        update_hierarchy_system, Entity, GlobalTransform, LiveTree, Parent, Transform, TreeError,
    };

    // Math types
    pub use glam::{Quat, Vec2, Vec3, Vec4};

    // IO types
    pub use crate::io::{
        FileResourceStore, NodeRegistry, PropertyType, PropertyValue, ResourceStore,
        ResourceNode, Scene, SceneError,
    };

    // Config types
    pub use crate::config::ProjectConfig;
}

/// Initialize logging for the engine
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
