//! Editor UI panels
//!
//! This module contains the individual UI panels that make up the editor:
//! the scene tree, the inspector and the modal prompts.

pub mod inspector;
pub mod popups;
pub mod scene_tree;

pub use inspector::render_inspector_panel;
pub use popups::{render_popups, Popups, RenamePrompt};
pub use scene_tree::render_scene_tree_panel;
