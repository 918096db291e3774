//! Scene operation handlers
//!
//! Cut, copy and paste are built from controller commands and the clipboard's
//! self re-arming paste action:
//!
//! - copy puts a detached duplicate on the clipboard. Pasting moves that
//!   duplicate under the target and arms the clipboard with a new duplicate of
//!   the original, so every paste adds another independent copy.
//! - cut puts the node itself on the clipboard. Pasting moves it under the
//!   target and then behaves as if the moved node had been copied.

use crate::clipboard::{Clipboard, PasteAction};
use crate::error::HierarchyError;
use crate::hierarchy_controller::HierarchyController;
use crate::hierarchy_node::HierarchyNode;
use tracing::{info, warn};

/// Put a duplicate of `node` on the clipboard
pub fn copy_node(
    controller: &mut HierarchyController,
    clipboard: &mut Clipboard,
    node: &HierarchyNode,
) -> Result<(), HierarchyError> {
    let original = controller
        .node(node.live)
        .ok_or_else(|| HierarchyError::invalid(format!("'{}' no longer exists", node.key)))?;
    if controller.is_root(&original) {
        warn!(node = ?original.live, "Rejected copy of the scene root");
        return Err(HierarchyError::invalid("the scene root cannot be copied"));
    }

    let duplicate = controller.duplicate(&original)?;
    let pending = duplicate.clone();
    arm(
        controller,
        clipboard,
        duplicate,
        Box::new(move |controller, clipboard, target| {
            controller.reparent(&pending, target)?;
            rearm(controller, clipboard, &original);
            Ok(())
        }),
    );

    info!(node = ?node.live, key = %node.key, "Copied node");
    Ok(())
}

/// Put `node` itself on the clipboard, to be moved on paste
pub fn cut_node(
    controller: &mut HierarchyController,
    clipboard: &mut Clipboard,
    node: &HierarchyNode,
) -> Result<(), HierarchyError> {
    let node = controller
        .node(node.live)
        .ok_or_else(|| HierarchyError::invalid(format!("'{}' no longer exists", node.key)))?;
    if controller.is_root(&node) {
        warn!(node = ?node.live, "Rejected cut of the scene root");
        return Err(HierarchyError::invalid("the scene root cannot be cut"));
    }

    let moved = node.clone();
    arm(
        controller,
        clipboard,
        node.clone(),
        Box::new(move |controller, clipboard, target| {
            let relocated = controller.reparent(&moved, target)?;
            rearm(controller, clipboard, &relocated);
            Ok(())
        }),
    );

    info!(node = ?node.live, key = %node.key, "Cut node");
    Ok(())
}

/// Paste the clipboard content onto `target`
///
/// Returns whether there was anything to paste.
pub fn paste_node(
    controller: &mut HierarchyController,
    clipboard: &mut Clipboard,
    target: &HierarchyNode,
) -> Result<bool, HierarchyError> {
    let target = controller
        .node(target.live)
        .ok_or_else(|| HierarchyError::invalid(format!("'{}' no longer exists", target.key)))?;
    let pasted = clipboard.paste(controller, &target)?;
    if pasted {
        info!(target = ?target.live, key = %target.key, "Pasted node");
    }
    Ok(pasted)
}

/// Set clipboard content, discarding a replaced duplicate nobody pasted
fn arm(
    controller: &mut HierarchyController,
    clipboard: &mut Clipboard,
    node: HierarchyNode,
    on_paste: PasteAction,
) {
    let live = node.live;
    if let Some(previous) = clipboard.set_content(node, on_paste) {
        if previous.live != live && controller.is_detached_root(previous.live) {
            controller.discard_detached(previous.live);
        }
    }
}

/// Arm the clipboard with a fresh copy of `node` after a paste
///
/// The paste itself already went through, so a failure here only empties the
/// clipboard.
fn rearm(controller: &mut HierarchyController, clipboard: &mut Clipboard, node: &HierarchyNode) {
    if let Err(error) = copy_node(controller, clipboard, node) {
        warn!(node = ?node.live, error = %error, "Could not re-arm clipboard, clearing it");
        clipboard.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::io::{MemoryResourceStore, NodeRegistry};

    fn setup() -> (HierarchyController, HierarchyNode, HierarchyNode) {
        let mut controller =
            HierarchyController::new(NodeRegistry::with_default_nodes(), MemoryResourceStore::new());
        let root = controller.new_scene("Node", "root").unwrap();
        let a = controller.add_child(&root, "Spatial").unwrap();
        (controller, root, a)
    }

    #[test]
    fn test_copy_replaces_previous_duplicate() {
        let (mut controller, root, a) = setup();
        let b = controller.add_child(&root, "Light").unwrap();
        let mut clipboard = Clipboard::new();

        copy_node(&mut controller, &mut clipboard, &a).unwrap();
        let first = clipboard.content().unwrap().clone();
        copy_node(&mut controller, &mut clipboard, &b).unwrap();

        assert!(!controller.contains(first.live));
        assert_eq!(controller.detached_count(), 1);
    }

    #[test]
    fn test_root_cannot_be_cut_or_copied() {
        let (mut controller, root, _) = setup();
        let mut clipboard = Clipboard::new();

        assert!(cut_node(&mut controller, &mut clipboard, &root).is_err());
        assert!(copy_node(&mut controller, &mut clipboard, &root).is_err());
        assert!(clipboard.is_empty());
    }

    #[test]
    fn test_cut_paste_into_own_subtree_keeps_clipboard() {
        let (mut controller, _, a) = setup();
        let inner = controller.add_child(&a, "Node").unwrap();
        let mut clipboard = Clipboard::new();

        cut_node(&mut controller, &mut clipboard, &a).unwrap();
        let result = paste_node(&mut controller, &mut clipboard, &inner);

        assert!(matches!(result, Err(HierarchyError::CycleViolation { .. })));
        assert!(clipboard.holds(a.live));
        assert_eq!(controller.node(inner.live).unwrap().parent, Some(a.live));
    }
}
