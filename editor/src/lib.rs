//! ImGui-based scene hierarchy editor
//!
//! This crate provides the editing core for scene trees: a controller that
//! keeps the resource tree and the live tree in step, a clipboard whose paste
//! action re-arms itself, and the panels that drive them.

pub mod clipboard;
pub mod editor_state;
pub mod error;
pub mod hierarchy_controller;
pub mod hierarchy_node;
pub mod host;
pub mod naming;
pub mod panels;
pub mod property_widgets;
pub mod scene_operations;
pub mod settings;

pub use clipboard::{Clipboard, PasteAction};
pub use editor_state::{EditorState, SceneOperation};
pub use error::HierarchyError;
pub use hierarchy_controller::{HierarchyController, NodeSource};
pub use hierarchy_node::HierarchyNode;
pub use settings::EditorSettings;
