//! Scene tree panel
//!
//! Displays the open scene as a tree of named nodes. Nodes can be selected,
//! dragged onto a new parent, and edited through a context menu or hotkeys.
//! Every edit is queued as a [`SceneOperation`].

use crate::editor_state::{EditorState, SceneOperation};
use crate::hierarchy_controller::NodeSource;
use crate::hierarchy_node::HierarchyNode;
use engine::core::node::Entity;
use imgui::*;
use tracing::debug;

const NODE_PAYLOAD: &str = "EditorNode";
const CLIPBOARD_TINT: [f32; 4] = [0.55, 0.75, 1.0, 1.0];

/// Render the scene tree panel
pub fn render_scene_tree_panel(
    ui: &imgui::Ui,
    state: &EditorState,
    operations: &mut Vec<SceneOperation>,
) {
    ui.window("Scene")
        .size([280.0, 500.0], Condition::FirstUseEver)
        .position([10.0, 30.0], Condition::FirstUseEver)
        .resizable(true)
        .build(|| {
            let Some(root) = state.controller.root() else {
                ui.text_disabled("No scene open");
                return;
            };

            render_node(ui, state, &root, true, operations);

            if ui.is_window_focused() {
                handle_hotkeys(ui, state, &root, operations);
            }
        });
}

fn render_node(
    ui: &imgui::Ui,
    state: &EditorState,
    node: &HierarchyNode,
    is_root: bool,
    operations: &mut Vec<SceneOperation>,
) {
    let children = state.controller.children(node);

    let mut flags = TreeNodeFlags::OPEN_ON_ARROW | TreeNodeFlags::SPAN_AVAIL_WIDTH;
    if children.is_empty() {
        flags |= TreeNodeFlags::LEAF;
    }
    if is_root {
        flags |= TreeNodeFlags::DEFAULT_OPEN;
    }
    if state.selected.as_ref() == Some(node) {
        flags |= TreeNodeFlags::SELECTED;
    }

    let label = match state.controller.base_of(node) {
        Some(base) => format!("{} [{}]##{:?}", node.key, base, node.live),
        None => format!("{}##{:?}", node.key, node.live),
    };

    let tint = state
        .clipboard
        .holds(node.live)
        .then(|| ui.push_style_color(StyleColor::Text, CLIPBOARD_TINT));
    let open = ui.tree_node_config(&label).flags(flags).push();
    drop(tint);

    if ui.is_item_clicked() {
        debug!(node = ?node.live, "Selected node");
        operations.push(SceneOperation::Select(Some(node.live)));
    }
    if ui.is_item_hovered() && ui.is_mouse_double_clicked(MouseButton::Left) && !is_root {
        operations.push(SceneOperation::BeginRename(node.live));
    }

    if !is_root {
        if let Some(_tooltip) = ui
            .drag_drop_source_config(NODE_PAYLOAD)
            .begin_payload(node.live)
        {
            ui.text(&node.key);
        }
    }
    if let Some(target) = ui.drag_drop_target() {
        if let Some(Ok(payload)) =
            target.accept_payload::<Entity, _>(NODE_PAYLOAD, DragDropFlags::empty())
        {
            operations.extend(drop_operation(payload.data, node.live));
        }
        target.pop();
    }

    render_context_menu(ui, state, node, is_root, operations);

    if let Some(_token) = open {
        for child in &children {
            render_node(ui, state, child, false, operations);
        }
    }
}

fn render_context_menu(
    ui: &imgui::Ui,
    state: &EditorState,
    node: &HierarchyNode,
    is_root: bool,
    operations: &mut Vec<SceneOperation>,
) {
    let popup_id = format!("##node_menu_{:?}", node.live);
    if ui.is_item_clicked_with_button(MouseButton::Right) {
        operations.push(SceneOperation::Select(Some(node.live)));
        ui.open_popup(&popup_id);
    }

    ui.popup(&popup_id, || {
        ui.menu("Add Node", || {
            for type_name in state.controller.node_types() {
                if ui.menu_item(type_name) {
                    operations.push(SceneOperation::AddChild {
                        parent: node.live,
                        source: NodeSource::Type(type_name.to_string()),
                    });
                }
            }
        });
        ui.menu("Add Child Scene", || {
            let scenes = state.controller.resource_paths();
            if scenes.is_empty() {
                ui.text_disabled("No scenes found");
            }
            for path in scenes {
                if ui.menu_item(&path) {
                    operations.push(SceneOperation::AddChild {
                        parent: node.live,
                        source: NodeSource::Resource(path),
                    });
                }
            }
        });
        ui.separator();

        if ui
            .menu_item_config("Cut")
            .shortcut("Ctrl+X")
            .enabled(!is_root)
            .build()
        {
            operations.push(SceneOperation::Cut(node.live));
        }
        if ui
            .menu_item_config("Copy")
            .shortcut("Ctrl+C")
            .enabled(!is_root)
            .build()
        {
            operations.push(SceneOperation::Copy(node.live));
        }
        if ui
            .menu_item_config("Paste")
            .shortcut("Ctrl+V")
            .enabled(!state.clipboard.is_empty())
            .build()
        {
            operations.push(SceneOperation::Paste(node.live));
        }
        ui.separator();

        if ui
            .menu_item_config("Rename")
            .shortcut("F2")
            .enabled(!is_root)
            .build()
        {
            operations.push(SceneOperation::BeginRename(node.live));
        }
        if ui
            .menu_item_config("Delete")
            .shortcut("Del")
            .enabled(!is_root)
            .build()
        {
            operations.push(SceneOperation::BeginDelete(node.live));
        }
    });
}

/// Keys the scene tree reacts to while focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hotkey {
    Cut,
    Copy,
    Paste,
    Rename,
    Delete,
    Deselect,
}

fn pressed_hotkey(ui: &imgui::Ui) -> Option<Hotkey> {
    let ctrl = ui.io().key_ctrl;
    if ctrl && ui.is_key_pressed(Key::V) {
        Some(Hotkey::Paste)
    } else if ctrl && ui.is_key_pressed(Key::X) {
        Some(Hotkey::Cut)
    } else if ctrl && ui.is_key_pressed(Key::C) {
        Some(Hotkey::Copy)
    } else if ui.is_key_pressed(Key::F2) {
        Some(Hotkey::Rename)
    } else if ui.is_key_pressed(Key::Delete) {
        Some(Hotkey::Delete)
    } else if ui.is_key_pressed(Key::Escape) {
        Some(Hotkey::Deselect)
    } else {
        None
    }
}

/// Operation for a hotkey, acting on the selection or on the root when nothing is selected
///
/// Only paste applies to the root.
fn hotkey_operation(
    hotkey: Hotkey,
    selected: Option<&HierarchyNode>,
    root: &HierarchyNode,
) -> Option<SceneOperation> {
    let target = selected.unwrap_or(root).live;
    if hotkey == Hotkey::Paste {
        return Some(SceneOperation::Paste(target));
    }
    if target == root.live {
        return None;
    }
    Some(match hotkey {
        Hotkey::Cut => SceneOperation::Cut(target),
        Hotkey::Copy => SceneOperation::Copy(target),
        Hotkey::Rename => SceneOperation::BeginRename(target),
        Hotkey::Delete => SceneOperation::BeginDelete(target),
        Hotkey::Deselect => SceneOperation::Select(None),
        Hotkey::Paste => SceneOperation::Paste(target),
    })
}

/// Reparent for a node dropped onto `target`; dropping a node on itself does nothing
fn drop_operation(dragged: Entity, target: Entity) -> Option<SceneOperation> {
    (dragged != target).then_some(SceneOperation::Reparent {
        node: dragged,
        new_parent: target,
    })
}

fn handle_hotkeys(
    ui: &imgui::Ui,
    state: &EditorState,
    root: &HierarchyNode,
    operations: &mut Vec<SceneOperation>,
) {
    if ui.is_any_item_active() {
        return;
    }
    if let Some(operation) = pressed_hotkey(ui)
        .and_then(|hotkey| hotkey_operation(hotkey, state.selected.as_ref(), root))
    {
        debug!(?operation, "Scene tree hotkey");
        operations.push(operation);
    }
}
