//! Quick scene validation utility
//!
//! Opens a scene through the hierarchy controller and prints its tree.
//! The path is relative to the project's resources folder and defaults to
//! the last scene opened in the editor.

use editor::{EditorSettings, HierarchyController, HierarchyNode};
use engine::io::NodeRegistry;
use std::{env, process::ExitCode};
use tracing::warn;

fn print_tree(controller: &HierarchyController, node: &HierarchyNode, depth: usize) {
    let kind = controller.kind(node).unwrap_or_default();
    match controller.base_of(node) {
        Some(base) => println!("{}{} ({kind}, from {base})", "  ".repeat(depth), node.key),
        None => println!("{}{} ({kind})", "  ".repeat(depth), node.key),
    }
    for child in controller.children(node) {
        print_tree(controller, &child, depth + 1);
    }
}

fn main() -> ExitCode {
    engine::init_logging();

    let settings = EditorSettings::load().unwrap_or_else(|e| {
        warn!(error = %e, "Could not read editor settings, using defaults");
        EditorSettings::default()
    });
    let Some(scene_path) = env::args().nth(1).or_else(|| settings.last_scene.clone()) else {
        eprintln!("usage: validate_scene <scene path>");
        return ExitCode::FAILURE;
    };

    println!(
        "Validating scene: {} in {}",
        scene_path,
        settings.project.resources_root().display()
    );
    let mut controller = HierarchyController::new(
        NodeRegistry::with_default_nodes(),
        settings.project.resource_store(),
    );
    match controller.open_scene(&scene_path) {
        Ok(root) => {
            println!("✓ Scene loaded successfully!");
            println!("  Live nodes: {}", controller.tree().len());
            print_tree(&controller, &root, 1);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Failed to load scene: {e}");
            ExitCode::FAILURE
        }
    }
}
