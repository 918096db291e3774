//! Errors reported by hierarchy editing commands

use engine::core::node::{Entity, TreeError};
use engine::io::SceneError;

/// Why a hierarchy command was rejected
///
/// A rejected command leaves both the live tree and the resource tree as they
/// were before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HierarchyError {
    /// The command does not apply to this node (e.g. renaming the root)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    /// Moving a node onto itself or below one of its descendants
    #[error("Moving {node:?} under {target:?} would create a cycle")]
    CycleViolation { node: Entity, target: Entity },
    #[error("Unknown node type: {0}")]
    UnknownType(String),
    #[error("Resource '{path}' could not be loaded: {reason}")]
    ResourceLoadError { path: String, reason: String },
    #[error("Resource '{path}' could not be saved: {reason}")]
    ResourceSaveError { path: String, reason: String },
}

impl HierarchyError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        HierarchyError::InvalidOperation(reason.into())
    }

    /// Attach the path being saved to a scene error
    pub(crate) fn saving(path: &str, error: SceneError) -> Self {
        HierarchyError::ResourceSaveError {
            path: path.to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<SceneError> for HierarchyError {
    fn from(error: SceneError) -> Self {
        match error {
            SceneError::UnknownType(name) => HierarchyError::UnknownType(name),
            SceneError::ResourceLoad { path, reason } => {
                HierarchyError::ResourceLoadError { path, reason }
            }
            SceneError::CyclicResource(path) => HierarchyError::ResourceLoadError {
                path,
                reason: "resource extends itself".to_string(),
            },
            SceneError::Io(e) => HierarchyError::ResourceLoadError {
                path: String::new(),
                reason: e.to_string(),
            },
            SceneError::Json(e) => HierarchyError::ResourceLoadError {
                path: String::new(),
                reason: e.to_string(),
            },
            SceneError::Tree(e) => e.into(),
        }
    }
}

impl From<TreeError> for HierarchyError {
    fn from(error: TreeError) -> Self {
        HierarchyError::InvalidOperation(error.to_string())
    }
}
