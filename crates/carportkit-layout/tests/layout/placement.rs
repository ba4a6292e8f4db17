use std::time::{Duration, Instant};

use carportkit_layout::geometry::snap_to_grid;
use carportkit_layout::model::{
    CustomPanelKind, FeatureKind, PanelConfig, PanelRef, PanelType, WallSide,
};
use carportkit_layout::{
    ClickOutcome, ClickTarget, ConfigStore, Configuration, DragController, DragPosition,
    DragTarget, Placed, PlacementController, PlacementTool, Preview, Ray,
};
use glam::{DVec2, DVec3};

#[test]
fn test_snap_to_grid() {
    assert_eq!(snap_to_grid(1.27, 0.5), 1.5);
    assert_eq!(snap_to_grid(1.24, 0.5), 1.0);
    assert_eq!(snap_to_grid(-1.24, 0.5), -1.0);
    assert_eq!(snap_to_grid(0.75, 0.5), 1.0);

    let controller = PlacementController::default();
    assert_eq!(controller.snap_to_grid(1.27), 1.5);
}

#[test]
fn test_centre_of_footprint_pins_to_left_edge() {
    let controller = PlacementController::default();
    let config = Configuration::default();
    let p = controller.constrain_to_perimeter(&config, 0.0, 0.0);
    assert_eq!(p, DVec2::new(-2.0, 0.0));
}

#[test]
fn test_perimeter_picks_nearest_edge() {
    let controller = PlacementController::default();
    let config = Configuration::default();
    assert_eq!(
        controller.constrain_to_perimeter(&config, 1.5, 0.4),
        DVec2::new(2.0, 0.4)
    );
    assert_eq!(
        controller.constrain_to_perimeter(&config, 0.3, 2.6),
        DVec2::new(0.3, 3.0)
    );
    assert_eq!(
        controller.constrain_to_perimeter(&config, 0.3, -2.9),
        DVec2::new(0.3, -3.0)
    );
    assert_eq!(
        controller.constrain_to_perimeter(&config, 9.0, 9.0),
        DVec2::new(2.0, 3.0)
    );
}

#[test]
fn test_nearest_pair_at_front_midpoint() {
    let controller = PlacementController::default();
    let (a, b) = controller
        .find_nearest_post_pair(&Configuration::default(), 0.0, 3.0)
        .unwrap();
    assert_eq!(a.id, "static-lm1");
    assert_eq!(b.id, "static-lm2");
    assert!(a.position().distance(b.position()) >= 0.2);
}

#[test]
fn test_panel_preview_spans_pair() {
    let store = ConfigStore::new();
    let mut controller = PlacementController::default();
    controller.select_tool(Some(PlacementTool::Panel(CustomPanelKind::Solid)));
    let preview = controller
        .pointer_move(&store.config(), DVec2::new(0.0, 3.0))
        .cloned()
        .unwrap();
    let Preview::Panel {
        center,
        width,
        rotation,
        ..
    } = preview
    else {
        panic!("expected a panel preview");
    };
    assert!((center.x).abs() < 1e-9);
    assert!((center.y - 2.95).abs() < 1e-9);
    assert!((width - 2.0 * (2.0 - 4.0 / 3.0 - 0.05)).abs() < 1e-9);
    assert!(rotation.abs() < 1e-9);

    controller.pointer_leave();
    assert!(controller.preview().is_none());
}

#[test]
fn test_place_post_then_panel_to_it() {
    let mut store = ConfigStore::new();
    let mut controller = PlacementController::default();
    controller.select_tool(Some(PlacementTool::Post));
    controller.pointer_move(&store.config(), DVec2::new(1.8, 0.1));
    let Some(Placed::Post(post)) = controller.click(&mut store).unwrap() else {
        panic!("expected a post");
    };
    let placed = store.get_post_by_id(&post).unwrap();
    assert_eq!(placed.position(), DVec2::new(2.0, 0.0));

    controller.select_tool(Some(PlacementTool::Panel(CustomPanelKind::Slats)));
    controller.pointer_move(&store.config(), DVec2::new(2.0, 0.2));
    let placed = controller.click(&mut store).unwrap();
    assert!(matches!(placed, Some(Placed::Panel(_))));
    assert!(store.config().custom_panels[0].references(&post));
}

#[test]
fn test_feature_tool_ignores_slatted_panels() {
    let mut store = ConfigStore::new();
    store.set_panel(WallSide::Left, PanelConfig::new(PanelType::Slats));
    let mut controller = PlacementController::default();
    controller.select_tool(Some(PlacementTool::Feature(FeatureKind::Door)));
    let left = PanelRef::Standard(WallSide::Left);
    assert_eq!(
        controller
            .place_feature(&mut store, &left, DVec2::new(-2.0, 1.0))
            .unwrap(),
        None
    );
    assert_eq!(controller.tool(), Some(PlacementTool::Feature(FeatureKind::Door)));
}

fn down_ray(x: f64, z: f64) -> Ray {
    Ray::new(DVec3::new(x, 10.0, z), DVec3::new(0.0, -1.0, 0.0))
}

#[test]
fn test_drag_post_commits_snapped_position_on_release() {
    let mut store = ConfigStore::new();
    let id = store.add_custom_post(-2.0, 1.0);
    let mut drag = DragController::default();
    let start = Instant::now();

    drag.pointer_down(DragTarget::Post(id.clone()), start);
    let live = drag.pointer_move(&store.config(), &down_ray(-1.7, -1.3));
    assert_eq!(live, Some(DragPosition::Post(DVec2::new(-2.0, -1.3))));
    assert_eq!(store.get_post_by_id(&id).unwrap().z, 1.0);

    let committed = drag
        .pointer_up(&mut store, start + Duration::from_millis(300))
        .unwrap();
    assert_eq!(committed, Some(DragPosition::Post(DVec2::new(-2.0, -1.5))));
    assert_eq!(store.get_post_by_id(&id).unwrap().z, -1.5);
}

#[test]
fn test_click_after_drag_is_suppressed() {
    let mut store = ConfigStore::new();
    let id = store.add_custom_post(-2.0, 1.0);
    let mut drag = DragController::default();
    let start = Instant::now();

    drag.pointer_down(DragTarget::Post(id.clone()), start);
    drag.pointer_move(&store.config(), &down_ray(-2.0, 0.5));
    let released = start + Duration::from_millis(50);
    drag.pointer_up(&mut store, released).unwrap();

    let outcome = drag
        .click(
            &mut store,
            ClickTarget::Post(id.clone()),
            2,
            released + Duration::from_millis(20),
        )
        .unwrap();
    assert_eq!(outcome, ClickOutcome::Suppressed);
    assert!(store.get_post_by_id(&id).is_some());
}

#[test]
fn test_double_click_removes_post_and_its_panels() {
    let mut store = ConfigStore::new();
    let id = store.add_custom_post(-2.0, 1.0);
    store
        .add_custom_panel(&id, &"static-fl".into(), CustomPanelKind::Slats)
        .unwrap();
    let mut drag = DragController::default();
    let start = Instant::now();

    let target = ClickTarget::Post(id.clone());
    let mut press = |store: &mut ConfigStore, count: u32, at: u64| {
        let down = start + Duration::from_millis(at);
        drag.pointer_down(DragTarget::Post(id.clone()), down);
        let committed = drag
            .pointer_up(store, down + Duration::from_millis(40))
            .unwrap();
        assert_eq!(committed, None);
        drag.click(store, target.clone(), count, down + Duration::from_millis(41))
            .unwrap()
    };

    assert_eq!(press(&mut store, 1, 0), ClickOutcome::Ignored);
    assert_eq!(
        press(&mut store, 2, 150),
        ClickOutcome::Removed(ClickTarget::Post(id.clone()))
    );
    assert!(store.get_post_by_id(&id).is_none());
    assert!(store.config().custom_panels.is_empty());
}
