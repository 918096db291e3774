//! Editing a scene through the controller, the clipboard and the editor state

use editor::scene_operations::{copy_node, cut_node, paste_node};
use editor::{
    Clipboard, EditorSettings, EditorState, HierarchyController, HierarchyError, HierarchyNode,
    NodeSource, SceneOperation,
};
use engine::config::ProjectConfig;
use engine::io::{MemoryResourceStore, NodeRegistry, NodeTypeInfo, ResourceNode, ResourceStore};
use engine::prelude::PropertyValue;

fn controller() -> HierarchyController {
    let mut registry = NodeRegistry::with_default_nodes();
    registry.register_type(NodeTypeInfo::new("a"));
    HierarchyController::new(registry, MemoryResourceStore::new())
}

fn keys(controller: &HierarchyController, node: &HierarchyNode) -> Vec<String> {
    controller
        .children(node)
        .into_iter()
        .map(|child| child.key)
        .collect()
}

#[test]
fn test_rename_to_own_key_and_suffixed_add() {
    let mut controller = controller();
    let root = controller.new_scene("Node", "root").unwrap();
    let a = controller.add_child(&root, "a").unwrap();
    assert_eq!(a.key, "a");

    assert_eq!(controller.rename(&a, "a").unwrap(), "a");
    let second = controller.add_child(&root, "a").unwrap();

    assert_eq!(second.key, "a1");
    assert_eq!(keys(&controller, &root), vec!["a", "a1"]);
}

#[test]
fn test_moving_node_below_its_descendant_is_rejected() {
    let mut controller = controller();
    let root = controller.new_scene("Node", "root").unwrap();
    let a = controller.add_child(&root, "Spatial").unwrap();
    let b = controller.add_child(&a, "Light").unwrap();
    let resource_before = controller.scene_resource().unwrap().clone();

    let result = controller.reparent(&a, &b);
    assert_eq!(
        result,
        Err(HierarchyError::CycleViolation {
            node: a.live,
            target: b.live
        })
    );
    assert!(matches!(
        controller.reparent(&a, &a),
        Err(HierarchyError::CycleViolation { .. })
    ));

    assert_eq!(controller.scene_resource().unwrap(), &resource_before);
    assert_eq!(controller.node(a.live).unwrap().parent, Some(root.live));
    assert_eq!(controller.node(b.live).unwrap().parent, Some(a.live));

    // The other direction is a plain move
    let moved = controller.reparent(&b, &root).unwrap();
    assert_eq!(moved.parent, Some(root.live));
    assert_eq!(keys(&controller, &root), vec!["Light", "Spatial"]);
}

#[test]
fn test_repeated_paste_of_copy_creates_independent_duplicates() {
    let mut controller = controller();
    let mut clipboard = Clipboard::new();
    let root = controller.new_scene("Node", "root").unwrap();
    let a = controller.add_child(&root, "Spatial").unwrap();
    let light = controller.add_child(&a, "Light").unwrap();
    controller
        .set_property(&light, "energy", PropertyValue::Float(4.0))
        .unwrap();
    let original = controller.resource(&a).unwrap().clone();

    copy_node(&mut controller, &mut clipboard, &a).unwrap();
    assert!(paste_node(&mut controller, &mut clipboard, &root).unwrap());
    assert!(paste_node(&mut controller, &mut clipboard, &root).unwrap());
    assert_eq!(keys(&controller, &root), vec!["Spatial", "Spatial1", "Spatial2"]);

    let children = controller.children(&root);
    for duplicate in &children[1..] {
        assert_ne!(duplicate.live, a.live);
        assert_eq!(controller.resource(duplicate).unwrap(), &original);
    }

    // Editing one duplicate leaves the original and the other duplicate alone
    let first_light = controller.children(&children[1]).remove(0);
    controller
        .set_property(&first_light, "energy", PropertyValue::Float(9.0))
        .unwrap();
    assert_eq!(
        controller.property(&light, "energy"),
        Some(PropertyValue::Float(4.0))
    );
    let second_light = controller.children(&children[2]).remove(0);
    assert_eq!(
        controller.property(&second_light, "energy"),
        Some(PropertyValue::Float(4.0))
    );
    assert_eq!(controller.resource(&a).unwrap(), &original);

    // One unused duplicate stays armed on the clipboard
    assert_eq!(controller.detached_count(), 1);
    assert!(!clipboard.is_empty());
}

#[test]
fn test_cut_paste_moves_subtree_and_rearms_as_copy() {
    let mut controller = controller();
    let mut clipboard = Clipboard::new();
    let root = controller.new_scene("Node", "root").unwrap();
    let left = controller.add_child(&root, "Node").unwrap();
    let right = controller.add_child(&root, "Node").unwrap();
    let a = controller.add_child(&left, "Spatial").unwrap();
    let camera = controller.add_child(&a, "Camera").unwrap();
    let subtree = controller.resource(&a).unwrap().clone();

    cut_node(&mut controller, &mut clipboard, &a).unwrap();
    assert!(clipboard.holds(a.live));
    // Cutting alone changes nothing
    assert_eq!(keys(&controller, &left), vec!["Spatial"]);

    assert!(paste_node(&mut controller, &mut clipboard, &right).unwrap());
    assert!(keys(&controller, &left).is_empty());
    let moved = controller.node(a.live).unwrap();
    assert_eq!(moved.parent, Some(right.live));
    assert_eq!(controller.resource(&moved).unwrap(), &subtree);
    assert_eq!(controller.node(camera.live).unwrap().parent, Some(a.live));

    // The next paste copies the moved node
    assert!(!clipboard.holds(a.live));
    assert!(paste_node(&mut controller, &mut clipboard, &left).unwrap());
    let pasted = controller.children(&left);
    assert_eq!(pasted.len(), 1);
    assert_ne!(pasted[0].live, a.live);
    assert_eq!(controller.resource(&pasted[0]).unwrap(), &subtree);
}

#[test]
fn test_children_are_stable_between_calls() {
    let mut controller = controller();
    let root = controller.new_scene("Node", "root").unwrap();
    for type_name in ["Sprite", "Camera", "Light"] {
        controller.add_child(&root, type_name).unwrap();
    }

    let first = controller.children(&root);
    let second = controller.children(&root);
    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|node| node.key.as_str()).collect::<Vec<_>>(),
        second.iter().map(|node| node.key.as_str()).collect::<Vec<_>>()
    );
    assert!(first.iter().all(|node| node.parent == Some(root.live)));
}

#[test]
fn test_unknown_type_leaves_scene_untouched() {
    let mut controller = controller();
    let root = controller.new_scene("Node", "root").unwrap();
    let before = controller.tree().len();

    let result = controller.add_child(&root, NodeSource::Type("Teapot".into()));
    assert_eq!(result, Err(HierarchyError::UnknownType("Teapot".into())));
    assert_eq!(controller.tree().len(), before);
    assert!(keys(&controller, &root).is_empty());
}

#[test]
fn test_child_scene_from_resource_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProjectConfig::new(dir.path().to_path_buf(), "scenes".to_string());
    let mut store = config.resource_store();
    let enemy = ResourceNode::new("Spatial").with_child("sprite", ResourceNode::new("Sprite"));
    let path = config.scene_path("enemy").unwrap();
    store.save(&path, &enemy).unwrap();

    let mut controller = HierarchyController::new(NodeRegistry::with_default_nodes(), store);
    let root = controller.new_scene("Node", "level").unwrap();
    let first = controller.add_child(&root, path.as_str()).unwrap();
    let second = controller
        .add_child(&root, NodeSource::File(dir.path().join(&path)))
        .unwrap();

    assert_eq!(first.key, "enemy");
    assert_eq!(second.key, "enemy1");
    assert_eq!(controller.base_of(&first), Some(path.clone()));
    assert_eq!(keys(&controller, &first), Vec::<String>::new());
    assert!(controller.tree().child(first.live, "sprite").is_some());

    let outside = tempfile::NamedTempFile::new().unwrap();
    let result = controller.add_child(&root, NodeSource::File(outside.path().to_path_buf()));
    assert!(matches!(result, Err(HierarchyError::ResourceLoadError { .. })));

    let missing = controller.add_child(&root, "scenes/missing.json");
    assert!(matches!(missing, Err(HierarchyError::ResourceLoadError { .. })));
    assert_eq!(keys(&controller, &root), vec!["enemy", "enemy1"]);
}

#[test]
fn test_delete_through_editor_state_clears_references() {
    let controller = controller();
    let mut state = EditorState::with_controller(controller, EditorSettings::default());
    state.open_initial_scene();
    let root = state.controller.root().unwrap();

    state.queue(SceneOperation::AddChild {
        parent: root.live,
        source: NodeSource::Type("Spatial".into()),
    });
    state.process_pending();
    let group = state.selected.clone().unwrap();
    state.queue(SceneOperation::AddChild {
        parent: group.live,
        source: NodeSource::Type("Camera".into()),
    });
    state.process_pending();
    let camera = state.selected.clone().unwrap();

    state.queue(SceneOperation::Copy(camera.live));
    state.queue(SceneOperation::Select(Some(camera.live)));
    state.queue(SceneOperation::Delete(group.live));
    state.process_pending();

    assert!(state.selected.is_none());
    assert!(!state.controller.contains(camera.live));
    assert!(keys(&state.controller, &root).is_empty());

    // The copy was detached from the scene, so it can still be pasted
    assert!(!state.clipboard.is_empty());
    state.queue(SceneOperation::Paste(root.live));
    state.process_pending();
    assert_eq!(keys(&state.controller, &root), vec!["Camera"]);
    assert!(state.status.is_none());
}

#[test]
fn test_cut_node_deleted_before_paste_empties_clipboard() {
    let mut state = EditorState::with_controller(controller(), EditorSettings::default());
    state.open_initial_scene();
    let root = state.controller.root().unwrap();
    let node = state
        .controller
        .add_child(&root, NodeSource::Type("Light".into()))
        .unwrap();

    state.apply(SceneOperation::Cut(node.live)).unwrap();
    state.apply(SceneOperation::Delete(node.live)).unwrap();
    assert!(state.clipboard.is_empty());

    // Pasting an empty clipboard is a no-op
    state.apply(SceneOperation::Paste(root.live)).unwrap();
    assert!(keys(&state.controller, &root).is_empty());
}

fn resource_keys(controller: &HierarchyController) -> Vec<String> {
    controller
        .scene_resource()
        .unwrap()
        .children
        .keys()
        .cloned()
        .collect()
}

#[test]
fn test_rename_onto_sibling_key_takes_next_suffix() {
    let mut controller = controller();
    let root = controller.new_scene("Node", "root").unwrap();
    let first = controller.add_child(&root, "Spatial").unwrap();
    assert_eq!(controller.rename(&first, "x").unwrap(), "x");

    let second = controller.add_child(&root, "Camera").unwrap();
    assert_eq!(controller.rename(&second, "x").unwrap(), "x1");

    let third = controller.add_child(&root, "Light").unwrap();
    assert_eq!(controller.rename(&third, "x").unwrap(), "x2");

    assert_eq!(keys(&controller, &root), vec!["x", "x1", "x2"]);
    assert_eq!(resource_keys(&controller), vec!["x", "x1", "x2"]);
    assert_eq!(controller.node(third.live).unwrap().key, "x2");
}

#[test]
fn test_delete_one_of_several_children() {
    let mut controller = controller();
    let root = controller.new_scene("Node", "root").unwrap();
    let sprite = controller.add_child(&root, "Sprite").unwrap();
    let group = controller.add_child(&root, "Spatial").unwrap();
    let camera = controller.add_child(&group, "Camera").unwrap();
    let group_light = controller.add_child(&group, "Light").unwrap();
    let light = controller.add_child(&root, "Light").unwrap();
    let before = controller.tree().len();

    assert_eq!(controller.delete(&group).unwrap(), 3);

    assert_eq!(controller.tree().len(), before - 3);
    assert_eq!(keys(&controller, &root), vec!["Light", "Sprite"]);
    assert_eq!(resource_keys(&controller), vec!["Light", "Sprite"]);
    for removed in [&group, &camera, &group_light] {
        assert!(!controller.contains(removed.live));
    }
    assert_eq!(controller.node(sprite.live).unwrap().parent, Some(root.live));
    assert_eq!(controller.node(light.live).unwrap().parent, Some(root.live));
}

#[test]
fn test_open_scene_cannot_contain_itself() {
    let mut store = MemoryResourceStore::new();
    store.insert(
        "scenes/level.json",
        ResourceNode::new("Node").with_child("ground", ResourceNode::new("Sprite")),
    );
    store.insert(
        "scenes/wrapper.json",
        ResourceNode::new("Node")
            .with_child("level", ResourceNode::extending("Node", "scenes/level.json")),
    );
    store.insert("scenes/enemy.json", ResourceNode::new("Spatial"));
    let mut controller = HierarchyController::new(NodeRegistry::with_default_nodes(), store);

    let root = controller.open_scene("scenes/level.json").unwrap();
    assert_eq!(controller.scene_path(), Some("scenes/level.json"));
    let resource_before = controller.scene_resource().unwrap().clone();
    let nodes_before = controller.tree().len();

    // Directly, and through a scene that extends it
    for path in ["scenes/level.json", "scenes/wrapper.json"] {
        let result = controller.add_child(&root, path);
        assert!(matches!(
            result,
            Err(HierarchyError::ResourceLoadError { path: rejected, .. }) if rejected == path
        ));
    }
    assert_eq!(controller.scene_resource().unwrap(), &resource_before);
    assert_eq!(controller.tree().len(), nodes_before);

    controller.add_child(&root, "scenes/enemy.json").unwrap();
    assert_eq!(keys(&controller, &root), vec!["enemy", "ground"]);
}

#[test]
fn test_saving_over_a_child_scene_is_rejected() {
    let mut store = MemoryResourceStore::new();
    store.insert("scenes/prop.json", ResourceNode::new("Sprite"));
    let mut controller = HierarchyController::new(NodeRegistry::with_default_nodes(), store);
    let root = controller.new_scene("Node", "level").unwrap();
    assert_eq!(controller.scene_path(), None);
    controller.add_child(&root, "scenes/prop.json").unwrap();

    let result = controller.save_scene("scenes/prop.json");
    assert!(matches!(result, Err(HierarchyError::ResourceSaveError { .. })));
    assert_eq!(
        controller.store().load("scenes/prop.json").unwrap(),
        ResourceNode::new("Sprite")
    );
    assert_eq!(controller.scene_path(), None);

    controller.save_scene("scenes/level.json").unwrap();
    assert_eq!(controller.scene_path(), Some("scenes/level.json"));

    // Once saved, the scene's own file is off limits as a child
    assert!(matches!(
        controller.add_child(&root, "scenes/level.json"),
        Err(HierarchyError::ResourceLoadError { .. })
    ));
    assert_eq!(keys(&controller, &root), vec!["prop"]);
}
