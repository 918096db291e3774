//! Editor view of one node in the hierarchy

use engine::core::node::Entity;
use std::hash::{Hash, Hasher};

/// A node as seen by the editor: its live entity and the key it is stored under
///
/// Views are built on demand by the [`HierarchyController`](crate::HierarchyController)
/// and go stale after any mutating call; fetch a fresh one with
/// `HierarchyController::node` instead of keeping them around. The resource a
/// view belongs to is resolved through the controller as well.
///
/// Two views are equal when they refer to the same live node, whatever their
/// cached key says.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    /// Live node this view refers to
    pub live: Entity,
    /// Key under which the node is stored in its parent
    pub key: String,
    /// Live parent, `None` for the scene root and detached nodes
    pub parent: Option<Entity>,
}

impl HierarchyNode {
    pub fn new(live: Entity, key: impl Into<String>, parent: Option<Entity>) -> Self {
        Self {
            live,
            key: key.into(),
            parent,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }
}

impl PartialEq for HierarchyNode {
    fn eq(&self, other: &Self) -> bool {
        self.live == other.live
    }
}

impl Eq for HierarchyNode {}

impl Hash for HierarchyNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.live.hash(state);
    }
}
