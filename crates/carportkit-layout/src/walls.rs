//! Derived wall geometry.
//!
//! Turns the configuration into concrete wall spans: the three standard side
//! slots, shortened or hidden around a storage room, and the custom panels
//! resolved through their post ids. Each span carries its centre, width and
//! the rotation of its width axis so features can be placed along it.

use std::collections::HashMap;

use glam::DVec2;
use tracing::warn;

use crate::axes::{self, INTERNAL_BACK, INTERNAL_FRONT, INTERNAL_LEFT};
use crate::geometry::{self, angle_between, distance, midpoint};
use crate::model::{Configuration, PanelFeature, PanelRef, PanelType, PostId, WallSide};
use crate::posts::{all_posts, find_post, Post};

/// A wall segment in ground-plane coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSpan {
    pub panel: PanelRef,
    pub center: DVec2,
    pub width: f64,
    /// Angle of the width axis, measured from +X toward +Z.
    pub rotation: f64,
    pub panel_type: PanelType,
    pub features: Vec<PanelFeature>,
}

impl WallSpan {
    /// Unit vector along the width axis.
    pub fn axis(&self) -> DVec2 {
        DVec2::from_angle(self.rotation)
    }

    /// The two ends of the span.
    pub fn endpoints(&self) -> (DVec2, DVec2) {
        let half = self.axis() * (self.width / 2.0);
        (self.center - half, self.center + half)
    }

    /// World position of an offset along the width axis.
    pub fn point_at(&self, offset: f64) -> DVec2 {
        self.center + self.axis() * offset
    }

    /// Signed offset of `point` projected onto the width axis.
    pub fn offset_of(&self, point: DVec2) -> f64 {
        let (start, end) = self.endpoints();
        geometry::offset_along(start, end, point)
    }

    pub fn is_solid(&self) -> bool {
        self.panel_type == PanelType::Solid
    }
}

/// Centre, width and rotation of a standard slot, or `None` when a storage
/// room takes its place.
pub fn standard_slot(config: &Configuration, side: WallSide) -> Option<(DVec2, f64, f64)> {
    let hw = config.width / 2.0;
    let hd = config.depth / 2.0;
    let storage = config
        .storage_room
        .enabled
        .then(|| axes::storage_edge(config.storage_room.position));
    let s = config.storage_room.depth;

    match side {
        WallSide::Left | WallSide::Right => {
            if side == WallSide::Left && storage == Some(INTERNAL_LEFT) {
                return None;
            }
            let mut z = 0.0;
            let mut width = config.depth;
            if storage == Some(INTERNAL_FRONT) {
                width -= s;
                z -= s / 2.0;
            }
            if storage == Some(INTERNAL_BACK) {
                width -= s;
                z += s / 2.0;
            }
            let x = if side == WallSide::Left { -hw } else { hw };
            Some((DVec2::new(x, z), width, std::f64::consts::FRAC_PI_2))
        }
        WallSide::Back => {
            if storage == Some(INTERNAL_BACK) {
                return None;
            }
            let mut x = 0.0;
            let mut width = config.width;
            if storage == Some(INTERNAL_LEFT) {
                width -= s;
                x += s / 2.0;
            }
            Some((DVec2::new(x, -hd), width, 0.0))
        }
    }
}

/// Standard side walls that are visible and not of type `none`.
pub fn standard_walls(config: &Configuration) -> Vec<WallSpan> {
    WallSide::ALL
        .into_iter()
        .filter_map(|side| {
            let panel = config.panels.get(side);
            if panel.panel_type == PanelType::None {
                return None;
            }
            let (center, width, rotation) = standard_slot(config, side)?;
            Some(WallSpan {
                panel: PanelRef::Standard(side),
                center,
                width,
                rotation,
                panel_type: panel.panel_type,
                features: panel.features.clone(),
            })
        })
        .collect()
}

fn span_between(start: &Post, end: &Post) -> (DVec2, f64, f64) {
    let a = start.position();
    let b = end.position();
    (midpoint(a, b), distance(a, b), angle_between(a, b))
}

/// Custom panels resolved to concrete spans. Panels whose posts cannot be
/// resolved are skipped.
pub fn resolve_custom_panels(config: &Configuration) -> Vec<WallSpan> {
    let posts: HashMap<PostId, Post> = all_posts(config)
        .into_iter()
        .rev()
        .map(|p| (p.id.clone(), p))
        .collect();

    config
        .custom_panels
        .iter()
        .filter_map(|panel| {
            let (Some(start), Some(end)) = (
                posts.get(&panel.start_post_id),
                posts.get(&panel.end_post_id),
            ) else {
                warn!(
                    "Skipping panel {} with dangling post reference ({} -> {})",
                    panel.id, panel.start_post_id, panel.end_post_id
                );
                return None;
            };
            let (center, width, rotation) = span_between(start, end);
            Some(WallSpan {
                panel: PanelRef::Custom(panel.id.clone()),
                center,
                width,
                rotation,
                panel_type: panel.kind.into(),
                features: panel.features.clone(),
            })
        })
        .collect()
}

/// Every renderable wall: standard slots first, then custom panels.
pub fn all_walls(config: &Configuration) -> Vec<WallSpan> {
    let mut walls = standard_walls(config);
    walls.extend(resolve_custom_panels(config));
    walls
}

/// Span of a single panel regardless of its type, or `None` when the panel
/// does not exist, is hidden, or has a dangling post.
pub fn panel_span(config: &Configuration, panel: &PanelRef) -> Option<WallSpan> {
    match panel {
        PanelRef::Standard(side) => {
            let slot = config.panels.get(*side);
            let (center, width, rotation) = standard_slot(config, *side)?;
            Some(WallSpan {
                panel: panel.clone(),
                center,
                width,
                rotation,
                panel_type: slot.panel_type,
                features: slot.features.clone(),
            })
        }
        PanelRef::Custom(id) => {
            let custom = config.custom_panel(id)?;
            let start = find_post(config, &custom.start_post_id)?;
            let end = find_post(config, &custom.end_post_id)?;
            let (center, width, rotation) = span_between(&start, &end);
            Some(WallSpan {
                panel: panel.clone(),
                center,
                width,
                rotation,
                panel_type: custom.kind.into(),
                features: custom.features.clone(),
            })
        }
    }
}
