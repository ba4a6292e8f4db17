use std::thread;

use carportkit_core::{thread_safe, ChangeKind, LayoutError};
use carportkit_layout::model::{
    CustomPanelKind, FeatureKind, PanelConfig, PanelRef, PanelType, PostId, StoragePosition,
    StorageRoomConfig, WallSide,
};
use carportkit_layout::store::{is_storage_panel_id, Cascade};
use carportkit_layout::{ConfigStore, Configuration, SharedStore};

fn post(id: &str) -> PostId {
    PostId::new(id)
}

#[test]
fn test_panel_between_same_posts_is_replaced() {
    let mut store = ConfigStore::new();
    let first = store
        .add_custom_panel(&post("static-fl"), &post("static-fr"), CustomPanelKind::Slats)
        .unwrap();
    let second = store
        .add_custom_panel(&post("static-fr"), &post("static-fl"), CustomPanelKind::Solid)
        .unwrap();

    let config = store.config();
    assert_eq!(config.custom_panels.len(), 1);
    assert_ne!(first, second);
    assert_eq!(config.custom_panels[0].id, second);
    assert_eq!(config.custom_panels[0].kind, CustomPanelKind::Solid);
}

#[test]
fn test_degenerate_and_dangling_panels_are_rejected() {
    let mut store = ConfigStore::new();
    assert!(matches!(
        store.add_custom_panel(&post("static-fl"), &post("static-fl"), CustomPanelKind::Slats),
        Err(LayoutError::DegeneratePanel { .. })
    ));
    assert!(matches!(
        store.add_custom_panel(&post("static-fl"), &post("post-5"), CustomPanelKind::Slats),
        Err(LayoutError::UnknownPost { .. })
    ));
    assert!(store.config().custom_panels.is_empty());
    assert_eq!(store.revision(), 0);
}

#[test]
fn test_removing_post_cascades_to_panels() {
    let mut store = ConfigStore::new();
    let a = store.add_custom_post(-1.0, 3.0);
    let b = store.add_custom_post(1.0, 3.0);
    let ab = store.add_custom_panel(&a, &b, CustomPanelKind::Slats).unwrap();
    let to_corner = store
        .add_custom_panel(&post("static-bl"), &a, CustomPanelKind::Solid)
        .unwrap();
    let untouched = store
        .add_custom_panel(&b, &post("static-br"), CustomPanelKind::Solid)
        .unwrap();

    let removed = store.remove_custom_post(&a).unwrap();
    assert_eq!(removed, vec![ab, to_corner]);

    let config = store.config();
    assert!(config.custom_posts.iter().all(|p| p.id != a));
    assert!(config.custom_panels.iter().all(|p| !p.references(&a)));
    assert_eq!(config.custom_panels.len(), 1);
    assert_eq!(config.custom_panels[0].id, untouched);
}

#[test]
fn test_cascade_plan_ignores_structural_posts() {
    let mut store = ConfigStore::new();
    store
        .add_custom_panel(&post("static-fl"), &post("static-fr"), CustomPanelKind::Slats)
        .unwrap();
    let cascade = Cascade::plan(&store.config(), [&post("static-fl")]);
    assert!(cascade.is_empty());
    assert!(store.remove_custom_post(&post("static-fl")).is_none());
    assert_eq!(store.config().custom_panels.len(), 1);
}

#[test]
fn test_cascade_is_one_commit() {
    let mut store = ConfigStore::new();
    let a = store.add_custom_post(-1.0, 3.0);
    store
        .add_custom_panel(&a, &post("static-fl"), CustomPanelKind::Slats)
        .unwrap();
    let mut rx = store.subscribe();

    store.remove_custom_post(&a);
    let event = rx.try_recv().unwrap();
    assert_eq!(event.kind, ChangeKind::CustomPosts);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_clear_custom_posts_and_panels() {
    let mut store = ConfigStore::new();
    let a = store.add_custom_post(-1.0, 3.0);
    store
        .add_custom_panel(&a, &post("static-fl"), CustomPanelKind::Slats)
        .unwrap();
    store
        .add_custom_panel(&post("static-bl"), &post("static-br"), CustomPanelKind::Slats)
        .unwrap();

    store.clear_custom_posts();
    let config = store.config();
    assert!(config.custom_posts.is_empty());
    assert_eq!(config.custom_panels.len(), 1);

    store.set_storage_room(StorageRoomConfig {
        enabled: true,
        ..StorageRoomConfig::default()
    });
    store.clear_custom_panels();
    assert!(store.config().custom_panels.is_empty());
    assert!(store.config().storage_room.enabled);
}

#[test]
fn test_storage_toggle_leaves_no_reserved_walls() {
    let mut store = ConfigStore::new();
    for position in [StoragePosition::Back, StoragePosition::Left, StoragePosition::Right] {
        store.set_storage_room(StorageRoomConfig {
            enabled: true,
            position,
            depth: 2.0,
        });
        let reserved = store
            .config()
            .custom_panels
            .iter()
            .filter(|p| is_storage_panel_id(p.id.as_str()))
            .count();
        assert_eq!(reserved, 4);
    }

    store.set_storage_room(StorageRoomConfig {
        enabled: false,
        position: StoragePosition::Right,
        depth: 2.0,
    });
    assert!(store
        .config()
        .custom_panels
        .iter()
        .all(|p| !is_storage_panel_id(p.id.as_str())));
}

#[test]
fn test_storage_walls_resolve_to_posts() {
    let mut store = ConfigStore::new();
    store.set_storage_room(StorageRoomConfig {
        enabled: true,
        position: StoragePosition::Left,
        depth: 1.5,
    });
    let config = store.config();
    for panel in &config.custom_panels {
        assert!(store.get_post_by_id(&panel.start_post_id).is_some());
        assert!(store.get_post_by_id(&panel.end_post_id).is_some());
    }
}

#[test]
fn test_set_config_clamps_and_advances_ids() {
    let mut config = Configuration::default();
    config.width = 12.0;
    config.height = 1.0;
    config.custom_posts.push(carportkit_layout::CustomPost {
        id: post("post-7"),
        x: 0.0,
        z: 3.0,
    });

    let mut store = ConfigStore::new();
    store.set_config(config);
    let snapshot = store.config();
    assert_eq!(snapshot.width, 8.0);
    assert_eq!(snapshot.height, 2.2);
    assert!(snapshot.validate().is_ok());

    let id = store.add_custom_post(1.0, 3.0);
    assert_eq!(id, "post-8");
}

#[test]
fn test_reset_restores_defaults() {
    let mut store = ConfigStore::new();
    store.set_width(7.0);
    store.add_custom_post(1.0, 3.0);
    store.reset_config();
    assert_eq!(*store.config(), Configuration::default());
}

#[test]
fn test_invalid_colour_is_ignored() {
    let mut store = ConfigStore::new();
    store.set_color("#5A3D31");
    assert_eq!(store.config().color, "#5A3D31");
    store.set_color("red");
    assert_eq!(store.config().color, "#5A3D31");
    assert_eq!(store.revision(), 1);
}

#[test]
fn test_standard_panel_features_follow_slot() {
    let mut store = ConfigStore::new();
    store.set_panel(WallSide::Left, PanelConfig::new(PanelType::Solid));
    let left = PanelRef::Standard(WallSide::Left);
    let door = store.add_panel_feature(&left, FeatureKind::Door, 2.4).unwrap();
    assert_eq!(store.config().panels.left.features[0].x, 2.4);

    store.set_depth(4.0);
    assert_eq!(store.config().panels.left.features[0].x, 1.5);

    store.remove_panel_feature(&left, &door).unwrap();
    assert!(store.config().panels.left.features.is_empty());
}

#[test]
fn test_shared_store_serialises_writers() {
    let store: SharedStore = thread_safe(ConfigStore::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                for j in 0..5 {
                    store.lock().add_custom_post(i as f64 * 0.5, j as f64 * 0.5);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = store.lock();
    assert_eq!(store.config().custom_posts.len(), 20);
    assert_eq!(store.revision(), 20);
}
