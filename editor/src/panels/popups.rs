//! Modal prompts for renaming and deleting nodes

use crate::editor_state::SceneOperation;
use crate::hierarchy_node::HierarchyNode;
use engine::core::node::Entity;
use imgui::*;

const RENAME_POPUP: &str = "Rename Node";
const DELETE_POPUP: &str = "Delete Node";

/// Pending rename of one node
#[derive(Debug, Clone, PartialEq)]
pub struct RenamePrompt {
    pub node: Entity,
    /// Edited name, prefilled with the current key
    pub buffer: String,
    opened: bool,
}

impl RenamePrompt {
    pub fn new(node: Entity, current: String) -> Self {
        Self {
            node,
            buffer: current,
            opened: false,
        }
    }

    /// Operation applying the edited name
    pub fn submit(&self) -> SceneOperation {
        SceneOperation::Rename {
            node: self.node,
            name: self.buffer.clone(),
        }
    }
}

/// Prompts currently shown by the editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Popups {
    pub rename: Option<RenamePrompt>,
    /// Node waiting for delete confirmation
    pub delete: Option<HierarchyNode>,
}

impl Popups {
    /// Close the delete prompt, returning the confirmed deletion
    pub fn confirm_delete(&mut self) -> Option<SceneOperation> {
        self.delete
            .take()
            .map(|node| SceneOperation::Delete(node.live))
    }
}

pub fn render_popups(ui: &imgui::Ui, popups: &mut Popups, operations: &mut Vec<SceneOperation>) {
    render_rename_popup(ui, popups, operations);
    render_delete_popup(ui, popups, operations);
}

fn render_rename_popup(ui: &imgui::Ui, popups: &mut Popups, operations: &mut Vec<SceneOperation>) {
    let Some(prompt) = &mut popups.rename else {
        return;
    };
    if !prompt.opened {
        ui.open_popup(RENAME_POPUP);
        prompt.opened = true;
    }

    let mut close = false;
    if let Some(_token) = ui
        .modal_popup_config(RENAME_POPUP)
        .resizable(false)
        .movable(false)
        .begin_popup()
    {
        if ui.is_window_appearing() {
            ui.set_keyboard_focus_here();
        }
        let submitted = ui
            .input_text("##name", &mut prompt.buffer)
            .enter_returns_true(true)
            .auto_select_all(true)
            .build();

        if submitted || ui.button("Rename") {
            operations.push(prompt.submit());
            close = true;
        }
        ui.same_line();
        if ui.button("Cancel") || ui.is_key_pressed(Key::Escape) {
            close = true;
        }
        if close {
            ui.close_current_popup();
        }
    } else {
        // Closed by imgui itself
        close = true;
    }

    if close {
        popups.rename = None;
    }
}

fn render_delete_popup(ui: &imgui::Ui, popups: &mut Popups, operations: &mut Vec<SceneOperation>) {
    let Some(node) = &popups.delete else {
        return;
    };
    ui.open_popup(DELETE_POPUP);

    let mut confirmed = false;
    let mut cancelled = false;
    if let Some(_token) = ui
        .modal_popup_config(DELETE_POPUP)
        .resizable(false)
        .movable(false)
        .begin_popup()
    {
        ui.text(format!("Delete '{}' and all of its children?", node.key));
        confirmed = ui.button("Delete");
        ui.same_line();
        cancelled = ui.button("Cancel") || ui.is_key_pressed(Key::Escape);
        if confirmed || cancelled {
            ui.close_current_popup();
        }
    }

    if confirmed {
        operations.extend(popups.confirm_delete());
    } else if cancelled {
        popups.delete = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_prompt_submits_edited_name() {
        let mut world = hecs::World::new();
        let node = world.spawn(());
        let mut prompt = RenamePrompt::new(node, "Camera".to_string());
        assert_eq!(prompt.buffer, "Camera");

        prompt.buffer = "MainCamera".to_string();
        assert!(matches!(
            prompt.submit(),
            SceneOperation::Rename { node: n, name } if n == node && name == "MainCamera"
        ));
    }

    #[test]
    fn test_confirm_delete_closes_prompt_once() {
        let mut world = hecs::World::new();
        let node = world.spawn(());
        let mut popups = Popups {
            delete: Some(HierarchyNode::new(node, "Light", None)),
            ..Default::default()
        };

        assert!(matches!(popups.confirm_delete(), Some(SceneOperation::Delete(n)) if n == node));
        assert_eq!(popups, Popups::default());
        assert!(popups.confirm_delete().is_none());
    }
}
