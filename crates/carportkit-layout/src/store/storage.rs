//! Storage room settings and the walls derived from them.

use carportkit_core::ChangeKind;
use tracing::debug;

use super::{clamp_logged, reclamp_features, ConfigStore};
use crate::model::{
    CustomPanel, CustomPanelKind, Limit, PanelId, PostId, StoragePosition, StorageRoomConfig,
};
use crate::axes;
use crate::posts::storage_anchors;

pub const STORE_OUTER: &str = "panel-store-outer";
pub const STORE_INNER: &str = "panel-store-inner";
pub const STORE_FRONT: &str = "panel-store-front";
pub const STORE_BACK: &str = "panel-store-back";
pub const STORE_LEFT: &str = "panel-store-left";
pub const STORE_RIGHT: &str = "panel-store-right";

/// Ids reserved for storage room walls. At most one set exists at a time.
pub const STORAGE_PANEL_IDS: [&str; 6] = [
    STORE_BACK,
    STORE_LEFT,
    STORE_RIGHT,
    STORE_FRONT,
    STORE_OUTER,
    STORE_INNER,
];

pub fn is_storage_panel_id(id: &str) -> bool {
    STORAGE_PANEL_IDS.contains(&id)
}

fn solid(id: &str, start: &str, end: &str) -> CustomPanel {
    CustomPanel {
        id: PanelId::new(id),
        start_post_id: PostId::new(start),
        end_post_id: PostId::new(end),
        kind: CustomPanelKind::Solid,
        features: Vec::new(),
    }
}

/// The four solid walls enclosing a storage room: outer wall, partition
/// and the two end caps, in that order.
pub fn storage_panels(position: StoragePosition) -> [CustomPanel; 4] {
    let anchors = storage_anchors(position);
    let [outer_a, outer_b] = anchors.outer;
    let [inner_a, inner_b] = anchors.inner;
    // End caps are named after the end of the storage edge they close.
    let (cap_a, cap_b) = if axes::runs_along_depth(axes::storage_edge(position)) {
        (STORE_FRONT, STORE_BACK)
    } else {
        (STORE_LEFT, STORE_RIGHT)
    };
    [
        solid(STORE_OUTER, outer_a, outer_b),
        solid(STORE_INNER, inner_a, inner_b),
        solid(cap_a, outer_a, inner_a),
        solid(cap_b, outer_b, inner_b),
    ]
}

impl ConfigStore {
    /// Applies new storage room settings.
    ///
    /// Every existing storage wall is dropped and, when the room is enabled,
    /// a fresh set for the new position is appended, all in one commit.
    pub fn set_storage_room(&mut self, storage: StorageRoomConfig) {
        let storage = StorageRoomConfig {
            depth: clamp_logged(Limit::STORAGE_DEPTH, storage.depth),
            ..storage
        };
        let margin = self.feature_margin;
        self.update(ChangeKind::StorageRoom, |c| {
            c.custom_panels
                .retain(|p| !is_storage_panel_id(p.id.as_str()));
            if storage.enabled {
                c.custom_panels.extend(storage_panels(storage.position));
            }
            debug!(
                "Storage room {} at {:?} ({} m)",
                if storage.enabled { "enabled" } else { "disabled" },
                storage.position,
                storage.depth
            );
            c.storage_room = storage;
            reclamp_features(c, margin);
        });
    }
}
