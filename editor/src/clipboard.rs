//! Clipboard holding one node and the action to run when it is pasted

use crate::error::HierarchyError;
use crate::hierarchy_controller::HierarchyController;
use crate::hierarchy_node::HierarchyNode;
use engine::core::node::Entity;
use std::fmt;
use tracing::debug;

/// Action bound to the clipboard content, called with the paste target
///
/// The action receives the clipboard itself so it can re-arm it with new
/// content once the paste went through.
pub type PasteAction = Box<
    dyn FnMut(&mut HierarchyController, &mut Clipboard, &HierarchyNode) -> Result<(), HierarchyError>,
>;

/// At most one pending node plus its paste action
///
/// Owned by the editor session and passed to the commands that use it.
#[derive(Default)]
pub struct Clipboard {
    content: Option<HierarchyNode>,
    on_paste: Option<PasteAction>,
    /// Bumped whenever the content changes, so a paste can tell whether its
    /// action re-armed the clipboard
    generation: u64,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace content and action, returning the previous content
    pub fn set_content(&mut self, node: HierarchyNode, on_paste: PasteAction) -> Option<HierarchyNode> {
        debug!(node = ?node.live, key = %node.key, "Clipboard content set");
        self.generation += 1;
        self.on_paste = Some(on_paste);
        self.content.replace(node)
    }

    pub fn content(&self) -> Option<&HierarchyNode> {
        self.content.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// Whether the clipboard currently holds `entity`
    pub fn holds(&self, entity: Entity) -> bool {
        self.content.as_ref().is_some_and(|node| node.live == entity)
    }

    /// Drop content and action
    pub fn clear(&mut self) -> Option<HierarchyNode> {
        self.generation += 1;
        self.on_paste = None;
        let previous = self.content.take();
        if let Some(node) = &previous {
            debug!(node = ?node.live, "Clipboard cleared");
        }
        previous
    }

    /// Swap in a fresh view of the held node, keeping the action
    pub fn refresh(&mut self, node: HierarchyNode) {
        if let Some(content) = &mut self.content {
            if content.live == node.live {
                *content = node;
            }
        }
    }

    /// Run the paste action on `target`
    ///
    /// Returns `Ok(false)` when there is nothing to paste. When the action
    /// fails without replacing the content, the clipboard keeps it.
    pub fn paste(
        &mut self,
        controller: &mut HierarchyController,
        target: &HierarchyNode,
    ) -> Result<bool, HierarchyError> {
        if self.content.is_none() {
            return Ok(false);
        }
        let Some(mut action) = self.on_paste.take() else {
            return Ok(false);
        };

        let generation = self.generation;
        let result = action(controller, self, target);
        if self.generation == generation {
            self.on_paste = Some(action);
        }
        result.map(|()| true)
    }
}

impl fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clipboard")
            .field("content", &self.content)
            .field("armed", &self.on_paste.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}
