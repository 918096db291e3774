//! Hierarchy traversal and global transform propagation for the live tree

use super::components::{GlobalTransform, Parent, Transform};
use super::tree::LiveTree;
use glam::Mat4;
use hecs::Entity;
use std::collections::HashSet;
use tracing::{error, trace};

/// Ancestors of a node, nearest first, excluding the node itself
pub fn ancestors(tree: &LiveTree, entity: Entity) -> Vec<Entity> {
    let mut result = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(entity);

    let mut current = tree.parent(entity);
    while let Some(parent) = current {
        if !visited.insert(parent) {
            error!(entity = ?entity, parent = ?parent, "Cyclic parent chain detected");
            break;
        }
        result.push(parent);
        current = tree.parent(parent);
    }
    result
}

/// Check whether `entity` lies strictly below `ancestor`
pub fn is_descendant_of(tree: &LiveTree, entity: Entity, ancestor: Entity) -> bool {
    ancestors(tree, entity).contains(&ancestor)
}

/// Topmost ancestor of a node (the node itself when detached)
pub fn root_of(tree: &LiveTree, entity: Entity) -> Entity {
    ancestors(tree, entity).last().copied().unwrap_or(entity)
}

/// A node followed by all of its descendants in breadth-first order
pub fn descendants(tree: &LiveTree, root: Entity) -> Vec<Entity> {
    if !tree.contains(root) {
        return Vec::new();
    }

    let mut result = vec![root];
    let mut visited = HashSet::from([root]);
    let mut index = 0;

    while index < result.len() {
        let current = result[index];
        index += 1;
        for (_, child) in tree.children(current) {
            if !visited.insert(child) {
                error!(parent = ?current, child = ?child, "Child reached twice while walking subtree");
                continue;
            }
            result.push(child);
        }
    }
    result
}

/// Recompute every [`GlobalTransform`] from local transforms and parent links
///
/// Nodes without a [`Transform`] pass their parent's world matrix through to
/// their children unchanged.
pub fn update_hierarchy_system(tree: &mut LiveTree) {
    let mut queue: Vec<(Entity, Mat4)> = Vec::new();
    let mut next_level = Vec::new();
    let mut visited = HashSet::new();

    let inner = tree.inner_mut();

    // Roots are nodes without a parent, including detached subtrees
    let roots: Vec<Entity> = inner
        .query::<()>()
        .without::<&Parent>()
        .iter()
        .map(|(entity, ())| entity)
        .collect();

    for root in roots {
        let world_matrix = inner
            .get::<&Transform>(root)
            .map(|transform| transform.to_matrix())
            .unwrap_or(Mat4::IDENTITY);
        if let Ok(global) = inner.query_one_mut::<&mut GlobalTransform>(root) {
            global.matrix = world_matrix;
        }
        visited.insert(root);
        queue.push((root, world_matrix));
    }

    trace!(root_count = queue.len(), "Starting hierarchy update");

    while !queue.is_empty() {
        let mut child_updates = Vec::new();

        for (parent_entity, parent_world_matrix) in queue.drain(..) {
            let children: Vec<Entity> = inner
                .get::<&super::components::Children>(parent_entity)
                .map(|children| children.0.values().copied().collect())
                .unwrap_or_default();

            for child_entity in children {
                if !visited.insert(child_entity) {
                    error!(
                        parent = ?parent_entity,
                        child = ?child_entity,
                        "Cyclic parent-child relationship detected in hierarchy"
                    );
                    continue;
                }

                let child_world_matrix = match inner.get::<&Transform>(child_entity) {
                    Ok(child_transform) => parent_world_matrix * child_transform.to_matrix(),
                    Err(_) => parent_world_matrix,
                };

                child_updates.push((child_entity, child_world_matrix));
                next_level.push((child_entity, child_world_matrix));
            }
        }

        for (child_entity, child_world_matrix) in child_updates {
            if let Ok(global) = inner.query_one_mut::<&mut GlobalTransform>(child_entity) {
                global.matrix = child_world_matrix;
            }
        }

        std::mem::swap(&mut queue, &mut next_level);
    }

    trace!(processed_count = visited.len(), "Hierarchy update completed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::property::PropertyValue;
    use glam::Vec3;
    use std::collections::BTreeMap;

    fn spatial(tree: &mut LiveTree, position: [f32; 3]) -> Entity {
        tree.spawn_node(
            "Spatial",
            BTreeMap::from([("position".to_string(), PropertyValue::Vector3(position))]),
        )
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let mut tree = LiveTree::new();
        let root = spatial(&mut tree, [0.0; 3]);
        let a = spatial(&mut tree, [0.0; 3]);
        let b = spatial(&mut tree, [0.0; 3]);
        tree.attach(root, "a", a).unwrap();
        tree.attach(a, "b", b).unwrap();

        assert_eq!(ancestors(&tree, b), vec![a, root]);
        assert!(is_descendant_of(&tree, b, root));
        assert!(!is_descendant_of(&tree, root, b));
        assert!(!is_descendant_of(&tree, a, a));
        assert_eq!(root_of(&tree, b), root);
        assert_eq!(descendants(&tree, a), vec![a, b]);
    }

    #[test]
    fn test_global_transforms_follow_parents() {
        let mut tree = LiveTree::new();
        let parent = spatial(&mut tree, [10.0, 0.0, 0.0]);
        let child = spatial(&mut tree, [0.0, 1.0, 0.0]);
        tree.attach(parent, "child", child).unwrap();

        update_hierarchy_system(&mut tree);
        let position = tree.global_transform(child).unwrap().position();
        assert!((position - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-5);

        // Moving the child elsewhere is reflected on the next update
        let other = spatial(&mut tree, [0.0, 0.0, -5.0]);
        tree.detach(child);
        tree.attach(other, "child", child).unwrap();
        update_hierarchy_system(&mut tree);
        let position = tree.global_transform(child).unwrap().position();
        assert!((position - Vec3::new(0.0, 1.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn test_plain_nodes_pass_parent_matrix_through() {
        let mut tree = LiveTree::new();
        let root = spatial(&mut tree, [3.0, 0.0, 0.0]);
        let group = tree.spawn_node("Node", BTreeMap::new());
        let leaf = spatial(&mut tree, [0.0, 0.0, 1.0]);
        tree.attach(root, "group", group).unwrap();
        tree.attach(group, "leaf", leaf).unwrap();

        update_hierarchy_system(&mut tree);
        let position = tree.global_transform(leaf).unwrap().position();
        assert!((position - Vec3::new(3.0, 0.0, 1.0)).length() < 1e-5);
    }
}
