//! Instantiating saved scenes into the live tree

use engine::core::node::hierarchy::descendants;
use engine::prelude::*;

#[test]
fn test_saved_scene_instantiates_with_transforms() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProjectConfig::new(dir.path().to_path_buf(), "scenes".to_string());
    let mut store = config.resource_store();

    let root = ResourceNode::new("Spatial")
        .with_property("position", PropertyValue::Vector3([0.0, 2.0, 0.0]))
        .with_child(
            "camera",
            ResourceNode::new("Camera")
                .with_property("position", PropertyValue::Vector3([1.0, 0.0, 0.0])),
        );
    let path = config.scene_path("main").unwrap();
    store.save(&path, &root).unwrap();
    assert_eq!(store.list_resources(), vec![path.clone()]);

    let scene = Scene::load_from_file(store.absolute_path(&path)).unwrap();
    assert_eq!(scene.name, "main");

    let mut tree = LiveTree::new();
    let live_root = scene
        .instantiate(&mut tree, &NodeRegistry::with_default_nodes(), &store)
        .unwrap();
    update_hierarchy_system(&mut tree);

    let camera = tree.child(live_root, "camera").unwrap();
    let position = tree.global_transform(camera).unwrap().position();
    assert!((position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    assert_eq!(descendants(&tree, live_root), vec![live_root, camera]);
}

#[test]
fn test_unknown_type_in_saved_scene() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileResourceStore::new(dir.path());
    store
        .save("bad.json", &ResourceNode::new("Node").with_child("x", ResourceNode::new("Ghost")))
        .unwrap();

    let scene = Scene::load_from_file(store.absolute_path("bad.json")).unwrap();
    let mut tree = LiveTree::new();
    let result = scene.instantiate(&mut tree, &NodeRegistry::with_default_nodes(), &store);

    assert!(matches!(result, Err(SceneError::UnknownType(name)) if name == "Ghost"));
    assert!(tree.is_empty());
}
