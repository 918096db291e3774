//! Main editor state management
//!
//! This module contains the EditorState struct which owns the hierarchy
//! controller, the clipboard and all editor UI state. Panels never mutate the
//! scene directly: they queue [`SceneOperation`]s which are applied after the
//! panels have been drawn.

use crate::clipboard::Clipboard;
use crate::error::HierarchyError;
use crate::hierarchy_controller::{HierarchyController, NodeSource};
use crate::hierarchy_node::HierarchyNode;
use crate::panels::{self, Popups, RenamePrompt};
use crate::property_widgets::WidgetRegistry;
use crate::scene_operations::{copy_node, cut_node, paste_node};
use crate::settings::EditorSettings;
use engine::core::node::hierarchy::is_descendant_of;
use engine::core::node::Entity;
use engine::io::{NodeRegistry, PropertyValue};
use imgui::{Condition, Key, Ui};
use tracing::{debug, info, warn};

/// A command issued by the UI, applied after the frame
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOperation {
    Select(Option<Entity>),
    /// Open the rename prompt for a node
    BeginRename(Entity),
    Rename { node: Entity, name: String },
    Reparent { node: Entity, new_parent: Entity },
    AddChild { parent: Entity, source: NodeSource },
    /// Open the delete confirmation for a node
    BeginDelete(Entity),
    Delete(Entity),
    Cut(Entity),
    Copy(Entity),
    Paste(Entity),
    SetProperty {
        node: Entity,
        name: String,
        value: PropertyValue,
    },
    NewScene { root_type: String, name: String },
    /// Open the scene stored at a resource path
    OpenScene(String),
    /// Save to the given resource path, or to where the scene came from
    SaveScene(Option<String>),
}

/// Main editor state that manages all editor functionality
pub struct EditorState {
    pub controller: HierarchyController,
    pub clipboard: Clipboard,
    pub settings: EditorSettings,
    pub widgets: WidgetRegistry,
    /// Node shown in the inspector
    pub selected: Option<HierarchyNode>,
    /// Resource path the open scene is saved to
    pub scene_path: Option<String>,
    /// Unsaved changes since the scene was opened or saved
    pub modified: bool,
    /// Last error or notice for the status bar
    pub status: Option<String>,
    pub popups: Popups,
    pending: Vec<SceneOperation>,
}

impl EditorState {
    /// Create a new editor state reading resources from the configured project
    pub fn new(settings: EditorSettings) -> Self {
        info!(
            resource_root = ?settings.project.resource_root,
            "Initializing editor state"
        );
        if let Err(e) = settings.project.validate() {
            warn!(error = %e, "Project folders are incomplete");
        }
        let controller = HierarchyController::new(
            NodeRegistry::with_default_nodes(),
            settings.project.resource_store(),
        );
        Self::with_controller(controller, settings)
    }

    pub fn with_controller(controller: HierarchyController, settings: EditorSettings) -> Self {
        Self {
            controller,
            clipboard: Clipboard::new(),
            settings,
            widgets: WidgetRegistry::new(),
            selected: None,
            scene_path: None,
            modified: false,
            status: None,
            popups: Popups::default(),
            pending: Vec::new(),
        }
    }

    /// Reopen the scene from the previous session, or start a new one
    pub fn open_initial_scene(&mut self) {
        let operation = match self.settings.last_scene.clone() {
            Some(path) => SceneOperation::OpenScene(path),
            None => SceneOperation::NewScene {
                root_type: self.settings.new_scene_root.clone(),
                name: String::new(),
            },
        };
        self.queue(operation);
        self.process_pending();

        if self.controller.root().is_none() {
            let failure = self.status.take();
            self.queue(SceneOperation::NewScene {
                root_type: self.settings.new_scene_root.clone(),
                name: String::new(),
            });
            self.process_pending();
            self.status = failure.or(self.status.take());
        }
    }

    pub fn queue(&mut self, operation: SceneOperation) {
        self.pending.push(operation);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Apply queued operations in order
    ///
    /// A failing operation is reported in the status bar and does not stop
    /// the ones queued after it.
    pub fn process_pending(&mut self) {
        for operation in std::mem::take(&mut self.pending) {
            if let Err(error) = self.apply(operation) {
                warn!(error = %error, "Scene operation failed");
                self.status = Some(error.to_string());
            }
        }
    }

    /// Apply one operation, then re-validate the selection and clipboard
    pub fn apply(&mut self, operation: SceneOperation) -> Result<(), HierarchyError> {
        debug!(operation = ?operation, "Applying scene operation");
        let result = self.apply_inner(operation);
        self.revalidate();
        result
    }

    fn apply_inner(&mut self, operation: SceneOperation) -> Result<(), HierarchyError> {
        match operation {
            SceneOperation::Select(entity) => {
                self.selected = entity.and_then(|entity| self.controller.node(entity));
            }
            SceneOperation::BeginRename(entity) => {
                let node = self.resolve(entity)?;
                if self.controller.is_root(&node) {
                    return Err(HierarchyError::invalid("the root node cannot be renamed"));
                }
                self.popups.rename = Some(RenamePrompt::new(node.live, node.key));
            }
            SceneOperation::Rename { node, name } => {
                let node = self.resolve(node)?;
                let key = self.controller.rename(&node, &name)?;
                if key != node.key {
                    self.mark_modified();
                }
            }
            SceneOperation::Reparent { node, new_parent } => {
                let node = self.resolve(node)?;
                let new_parent = self.resolve(new_parent)?;
                self.controller.reparent(&node, &new_parent)?;
                self.mark_modified();
            }
            SceneOperation::AddChild { parent, source } => {
                let parent = self.resolve(parent)?;
                let child = self.controller.add_child(&parent, source)?;
                self.selected = Some(child);
                self.mark_modified();
            }
            SceneOperation::BeginDelete(entity) => {
                let node = self.resolve(entity)?;
                if self.controller.is_root(&node) {
                    return Err(HierarchyError::invalid("the root node cannot be deleted"));
                }
                self.deselect_subtree(node.live);
                self.popups.delete = Some(node);
            }
            SceneOperation::Delete(entity) => {
                let node = self.resolve(entity)?;
                self.deselect_subtree(node.live);
                self.controller.delete(&node)?;
                self.mark_modified();
            }
            SceneOperation::Cut(entity) => {
                let node = self.resolve(entity)?;
                cut_node(&mut self.controller, &mut self.clipboard, &node)?;
            }
            SceneOperation::Copy(entity) => {
                let node = self.resolve(entity)?;
                copy_node(&mut self.controller, &mut self.clipboard, &node)?;
            }
            SceneOperation::Paste(target) => {
                let target = self.resolve(target)?;
                if paste_node(&mut self.controller, &mut self.clipboard, &target)? {
                    self.mark_modified();
                }
            }
            SceneOperation::SetProperty { node, name, value } => {
                let node = self.resolve(node)?;
                self.controller.set_property(&node, &name, value)?;
                self.mark_modified();
            }
            SceneOperation::NewScene { root_type, name } => {
                self.controller.new_scene(&root_type, &name)?;
                self.reset_scene_state(None);
            }
            SceneOperation::OpenScene(path) => {
                self.controller.open_scene(&path)?;
                self.settings.last_scene = Some(path.clone());
                self.reset_scene_state(Some(path));
            }
            SceneOperation::SaveScene(path) => {
                let path = path
                    .or_else(|| self.scene_path.clone())
                    .or_else(|| {
                        self.controller
                            .scene_name()
                            .and_then(|name| self.settings.project.scene_path(name))
                    })
                    .ok_or_else(|| HierarchyError::invalid("no path to save the scene to"))?;
                self.controller.save_scene(&path)?;
                self.settings.last_scene = Some(path.clone());
                self.scene_path = Some(path.clone());
                self.modified = false;
                self.status = Some(format!("Saved {path}"));
            }
        }
        Ok(())
    }

    fn resolve(&self, entity: Entity) -> Result<HierarchyNode, HierarchyError> {
        self.controller
            .node(entity)
            .ok_or_else(|| HierarchyError::invalid("the node no longer exists"))
    }

    fn mark_modified(&mut self) {
        self.modified = true;
        self.status = None;
    }

    fn reset_scene_state(&mut self, path: Option<String>) {
        self.clipboard.clear();
        self.selected = None;
        self.popups = Popups::default();
        self.scene_path = path;
        self.modified = false;
        self.status = None;
    }

    /// Clear the selection when it lies in the subtree rooted at `root`
    fn deselect_subtree(&mut self, root: Entity) {
        let inside = self.selected.as_ref().is_some_and(|selected| {
            selected.live == root || is_descendant_of(self.controller.tree(), selected.live, root)
        });
        if inside {
            debug!(root = ?root, "Clearing selection inside removed subtree");
            self.selected = None;
        }
    }

    /// Drop references to nodes that are gone and refresh the rest
    fn revalidate(&mut self) {
        if let Some(selected) = self.selected.take() {
            self.selected = self.controller.node(selected.live);
            if self.selected.is_none() {
                debug!(node = ?selected.live, "Selected node is gone");
            }
        }

        let content = self.clipboard.content().map(|node| node.live);
        if let Some(live) = content {
            match self.controller.node(live) {
                Some(node) => self.clipboard.refresh(node),
                None => {
                    debug!(node = ?live, "Clipboard content is gone");
                    self.clipboard.clear();
                }
            }
        }
    }

    /// Draw the editor UI and apply what it requested
    pub fn draw(&mut self, ui: &Ui) {
        let mut operations = Vec::new();
        let mut toggle_inspector = false;

        ui.main_menu_bar(|| {
            ui.menu("File", || {
                if ui.menu_item("New Scene") {
                    operations.push(SceneOperation::NewScene {
                        root_type: self.settings.new_scene_root.clone(),
                        name: String::new(),
                    });
                }
                ui.menu("Open Scene", || {
                    let scenes = self.controller.resource_paths();
                    if scenes.is_empty() {
                        ui.text_disabled("No scenes found");
                    }
                    for path in scenes {
                        if ui.menu_item(&path) {
                            operations.push(SceneOperation::OpenScene(path));
                        }
                    }
                });
                if ui
                    .menu_item_config("Save Scene")
                    .shortcut("Ctrl+S")
                    .enabled(self.controller.root().is_some())
                    .build()
                {
                    operations.push(SceneOperation::SaveScene(None));
                }
            });
            ui.menu("View", || {
                if ui
                    .menu_item_config("Inspector")
                    .selected(self.settings.show_inspector)
                    .build()
                {
                    toggle_inspector = true;
                }
            });
        });

        if ui.io().key_ctrl && ui.is_key_pressed(Key::S) && self.controller.root().is_some() {
            operations.push(SceneOperation::SaveScene(None));
        }

        panels::render_scene_tree_panel(ui, self, &mut operations);
        if self.settings.show_inspector {
            panels::render_inspector_panel(ui, self, &mut operations);
        }
        panels::render_popups(ui, &mut self.popups, &mut operations);
        self.render_status_bar(ui);

        if toggle_inspector {
            self.settings.show_inspector = !self.settings.show_inspector;
        }
        self.pending.extend(operations);
        self.process_pending();
    }

    fn render_status_bar(&self, ui: &Ui) {
        let viewport_h = ui.io().display_size[1];
        ui.window("Status Bar")
            .position([0.0, viewport_h - 25.0], Condition::Always)
            .size([ui.io().display_size[0], 25.0], Condition::Always)
            .no_decoration()
            .movable(false)
            .scroll_bar(false)
            .build(|| {
                let scene = self.controller.scene_name().unwrap_or("<no scene>");
                let marker = if self.modified { "*" } else { "" };
                ui.text(format!("Scene: {scene}{marker}"));
                ui.same_line();
                ui.separator();
                ui.same_line();
                ui.text(format!("Nodes: {}", self.controller.tree().len()));
                ui.same_line();
                ui.separator();
                ui.same_line();
                match &self.selected {
                    Some(node) => ui.text(format!("Selected: {}", node.key)),
                    None => ui.text("No selection"),
                }
                if let Some(status) = &self.status {
                    ui.same_line();
                    ui.separator();
                    ui.same_line();
                    ui.text_colored([1.0, 0.6, 0.4, 1.0], status);
                }
            });
    }
}
