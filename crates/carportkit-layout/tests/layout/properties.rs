//! Property-based invariants of the layout engine.
//!
//! 1. Post derivation is deterministic and its count follows the depth band.
//! 2. Two panels never join the same pair of posts.
//! 3. Removing a post leaves no panel pointing at it.
//! 4. Disabling the storage room leaves no reserved storage walls.
//! 5. Share encoding round-trips any valid configuration.
//! 6. Perimeter constraint always lands on the footprint boundary.

use std::collections::HashSet;

use carportkit_layout::model::{
    CustomPanelKind, CustomPost, PostId, RoofType, StoragePosition, StorageRoomConfig,
};
use carportkit_layout::palette::PALETTE;
use carportkit_layout::store::is_storage_panel_id;
use carportkit_layout::{
    decode_config, derive_posts, encode_config, ConfigStore, Configuration, PlacementController,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn tenths(lo: u32, hi: u32) -> impl Strategy<Value = f64> {
    (lo..=hi).prop_map(|n| n as f64 / 10.0)
}

fn position_strategy() -> impl Strategy<Value = StoragePosition> {
    prop_oneof![
        Just(StoragePosition::Back),
        Just(StoragePosition::Left),
        Just(StoragePosition::Right),
    ]
}

fn storage_strategy() -> impl Strategy<Value = StorageRoomConfig> {
    (any::<bool>(), position_strategy(), tenths(10, 50)).prop_map(|(enabled, position, depth)| {
        StorageRoomConfig {
            enabled,
            position,
            depth,
        }
    })
}

fn roof_strategy() -> impl Strategy<Value = RoofType> {
    prop_oneof![
        Just(RoofType::Metal),
        Just(RoofType::Glass),
        Just(RoofType::Polycarbonate),
    ]
}

fn config_strategy() -> impl Strategy<Value = Configuration> {
    (
        tenths(30, 80),
        tenths(40, 80),
        tenths(22, 35),
        0..PALETTE.len(),
        roof_strategy(),
        storage_strategy(),
        prop::collection::vec((-40i32..=40, -40i32..=40), 0..4),
    )
        .prop_map(|(width, depth, height, color, roof_type, storage, posts)| {
            let mut config = Configuration {
                width,
                depth,
                height,
                color: PALETTE[color].hex.to_string(),
                roof_type,
                storage_room: storage,
                ..Configuration::default()
            };
            config.custom_posts = posts
                .into_iter()
                .enumerate()
                .map(|(i, (x, z))| CustomPost {
                    id: PostId::new(format!("post-{}", i + 1)),
                    x: x as f64 / 10.0,
                    z: z as f64 / 10.0,
                })
                .collect();
            config
        })
}

fn unordered(a: &PostId, b: &PostId) -> (PostId, PostId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Post derivation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derive_posts_is_deterministic(
        width in tenths(30, 80),
        depth in tenths(40, 80),
        storage in storage_strategy(),
    ) {
        let first = derive_posts(width, depth, &storage);
        let second = derive_posts(width, depth, &storage);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn post_count_follows_depth_band(
        width in tenths(30, 80),
        depth in tenths(40, 80),
        storage in storage_strategy(),
    ) {
        let base = if depth < 5.0 {
            4
        } else if depth < 6.0 {
            6
        } else if storage.enabled {
            8
        } else {
            9
        };
        let expected = base + if storage.enabled { 2 } else { 0 };
        prop_assert_eq!(derive_posts(width, depth, &storage).len(), expected);
    }

    #[test]
    fn structural_ids_are_unique(
        width in tenths(30, 80),
        depth in tenths(40, 80),
        storage in storage_strategy(),
    ) {
        let posts = derive_posts(width, depth, &storage);
        let ids: HashSet<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        prop_assert_eq!(ids.len(), posts.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Store invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn panels_never_share_a_post_pair(
        pairs in prop::collection::vec((0usize..9, 0usize..9), 1..20),
    ) {
        let mut store = ConfigStore::new();
        let posts = store.structural_posts();
        let mut expected = HashSet::new();
        for (i, j) in pairs {
            let (a, b) = (&posts[i].id, &posts[j].id);
            let result = store.add_custom_panel(a, b, CustomPanelKind::Slats);
            if i == j {
                prop_assert!(result.is_err());
            } else {
                prop_assert!(result.is_ok());
                expected.insert(unordered(a, b));
            }
        }

        let config = store.config();
        let actual: HashSet<_> = config
            .custom_panels
            .iter()
            .map(|p| unordered(&p.start_post_id, &p.end_post_id))
            .collect();
        prop_assert_eq!(actual.len(), config.custom_panels.len());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn removing_a_post_leaves_no_dangling_panel(
        points in prop::collection::vec((-20i32..=20, -30i32..=30), 1..5),
        pairs in prop::collection::vec((0usize..12, 0usize..12), 0..15),
        victim in 0usize..5,
    ) {
        let mut store = ConfigStore::new();
        for (x, z) in &points {
            store.add_custom_post(*x as f64 / 10.0, *z as f64 / 10.0);
        }
        let ids: Vec<PostId> = store.all_posts().into_iter().map(|p| p.id).collect();
        for (i, j) in pairs {
            let (a, b) = (&ids[i % ids.len()], &ids[j % ids.len()]);
            let _ = store.add_custom_panel(a, b, CustomPanelKind::Solid);
        }

        let victim = ids[victim % points.len()].clone();
        prop_assert!(store.remove_custom_post(&victim).is_some());
        let config = store.config();
        prop_assert!(config.custom_panels.iter().all(|p| !p.references(&victim)));
        prop_assert!(config.custom_posts.iter().all(|p| p.id != victim));
    }

    #[test]
    fn disabling_storage_clears_reserved_walls(
        history in prop::collection::vec(storage_strategy(), 1..6),
        position in position_strategy(),
    ) {
        let mut store = ConfigStore::new();
        for storage in history {
            store.set_storage_room(storage);
            let reserved = store
                .config()
                .custom_panels
                .iter()
                .filter(|p| is_storage_panel_id(p.id.as_str()))
                .count();
            prop_assert_eq!(reserved, if storage.enabled { 4 } else { 0 });
        }
        store.set_storage_room(StorageRoomConfig {
            enabled: false,
            position,
            depth: 1.5,
        });
        prop_assert!(store
            .config()
            .custom_panels
            .iter()
            .all(|p| !is_storage_panel_id(p.id.as_str())));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Share round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn share_encoding_round_trips(config in config_strategy()) {
        let encoded = encode_config(&config).unwrap();
        prop_assert_eq!(decode_config(&encoded), Some(config));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Perimeter constraint
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn constrained_points_lie_on_boundary(
        width in tenths(30, 80),
        depth in tenths(40, 80),
        x in -100.0f64..100.0,
        z in -100.0f64..100.0,
    ) {
        let config = Configuration { width, depth, ..Configuration::default() };
        let p = PlacementController::default().constrain_to_perimeter(&config, x, z);
        let (hw, hd) = (width / 2.0, depth / 2.0);
        prop_assert!(p.x.abs() <= hw + 1e-9 && p.y.abs() <= hd + 1e-9);
        let on_x_edge = (p.x.abs() - hw).abs() < 1e-9;
        let on_z_edge = (p.y.abs() - hd).abs() < 1e-9;
        prop_assert!(on_x_edge || on_z_edge);
    }

    #[test]
    fn snapped_values_sit_on_grid(value in -50.0f64..50.0) {
        let snapped = PlacementController::default().snap_to_grid(value);
        prop_assert!((snapped * 2.0 - (snapped * 2.0).round()).abs() < 1e-9);
        prop_assert!((snapped - value).abs() <= 0.25 + 1e-9);
    }
}
