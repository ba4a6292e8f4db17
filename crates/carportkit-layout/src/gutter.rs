//! Gutter and roof drainage layout.

use glam::DVec2;

use crate::axes::{self, GUTTER_OVERHANG};
use crate::geometry::Edge;
use crate::model::Configuration;

/// Distance of the downpipe from the end of the gutter.
pub const DRAIN_INSET: f64 = 0.15;

/// Roof pitch toward the gutter, as a rise-over-run ratio.
pub const ROOF_SLOPE: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct GutterLayout {
    /// Roof edge the gutter hangs on. The roof slopes down toward it.
    pub edge: Edge,
    /// Centre of the gutter run on the ground plane.
    pub center: DVec2,
    /// The gutter runs along Z for the full depth.
    pub length: f64,
    /// Internal end of the run holding the downpipe.
    pub drain_end: Edge,
    pub drain_position: DVec2,
    /// Signed roof tilt around Z; negative lowers the +X side.
    pub roof_tilt: f64,
}

/// Gutter placement, or `None` when the gutter is disabled.
pub fn gutter_layout(config: &Configuration) -> Option<GutterLayout> {
    let gutter = &config.gutter;
    if !gutter.enabled {
        return None;
    }

    let edge = axes::gutter_edge(gutter.side);
    let outward = axes::outward_normal(edge);
    let x = outward.x * (config.width / 2.0 + GUTTER_OVERHANG);

    let drain_end = axes::drain_end(gutter.side, gutter.drain);
    let drain_z = axes::outward_normal(drain_end).y * (config.depth / 2.0 - DRAIN_INSET);

    Some(GutterLayout {
        edge,
        center: DVec2::new(x, 0.0),
        length: config.depth,
        drain_end,
        drain_position: DVec2::new(x, drain_z),
        roof_tilt: -outward.x * ROOF_SLOPE,
    })
}
