//! Node inspector panel
//!
//! Displays and allows editing of the declared properties of the selected node.

use crate::editor_state::{EditorState, SceneOperation};
use imgui::*;

/// Render the node inspector panel
pub fn render_inspector_panel(
    ui: &imgui::Ui,
    state: &EditorState,
    operations: &mut Vec<SceneOperation>,
) {
    ui.window("Inspector")
        .size([300.0, 400.0], Condition::FirstUseEver)
        .position([1000.0, 30.0], Condition::FirstUseEver)
        .resizable(true)
        .build(|| {
            let Some(node) = &state.selected else {
                ui.text_disabled("No node selected");
                return;
            };

            ui.text(format!("Name: {}", node.key));
            if let Some(kind) = state.controller.kind(node) {
                ui.text(format!("Type: {kind}"));
            }
            if let Some(base) = state.controller.base_of(node) {
                ui.text(format!("Instance of: {base}"));
            }
            if state.controller.is_detached(node.live) {
                ui.text_colored([1.0, 0.8, 0.3, 1.0], "Not in the scene");
            }
            if let Some(global) = state.controller.tree().global_transform(node.live) {
                let p = global.position();
                ui.text_disabled(format!("World position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
            }
            ui.separator();

            let fields = state.controller.fields(node);
            if fields.is_empty() {
                ui.text_disabled("No editable properties");
                return;
            }

            for field in &fields {
                let Some(value) = state.controller.property(node, &field.name) else {
                    continue;
                };
                if let Some(value) = state.widgets.draw(ui, field, &value) {
                    operations.push(SceneOperation::SetProperty {
                        node: node.live,
                        name: field.name.clone(),
                        value,
                    });
                }
            }
        });
}
