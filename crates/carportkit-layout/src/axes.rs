//! Translation between user-facing labels and internal axes.
//!
//! The footprint is laid out in internal axes: X runs across the width, Z
//! along the depth, the entry is the +X side. The UI labels sides from the
//! viewpoint of someone standing at the entry, so "back" is the far −X side
//! while "left" and "right" are the two long Z sides. Every conversion from
//! a label to a footprint edge goes through the tables in this module.

use glam::DVec2;

use crate::geometry::Edge;
use crate::model::{DrainSide, GutterSide, StoragePosition};

/// Internal edge at x = −half_width.
pub const INTERNAL_LEFT: Edge = Edge::Left;
/// Internal edge at x = +half_width (entry side).
pub const INTERNAL_RIGHT: Edge = Edge::Right;
/// Internal edge at z = +half_depth.
pub const INTERNAL_FRONT: Edge = Edge::Front;
/// Internal edge at z = −half_depth.
pub const INTERNAL_BACK: Edge = Edge::Back;

/// Offset of the gutter centreline outside the roof edge.
pub const GUTTER_OVERHANG: f64 = 0.1;

/// Internal edge occupied by a storage room at the given user position.
pub fn storage_edge(position: StoragePosition) -> Edge {
    match position {
        StoragePosition::Back => INTERNAL_LEFT,
        StoragePosition::Left => INTERNAL_FRONT,
        StoragePosition::Right => INTERNAL_BACK,
    }
}

/// Internal edge carrying the gutter.
pub fn gutter_edge(side: GutterSide) -> Edge {
    match side {
        GutterSide::Front => INTERNAL_RIGHT,
        GutterSide::Back => INTERNAL_LEFT,
    }
}

/// Internal end (front or back) of the gutter where the downpipe sits.
///
/// Seen from outside, left and right swap between the two gutter sides.
pub fn drain_end(side: GutterSide, drain: DrainSide) -> Edge {
    match (side, drain) {
        (GutterSide::Front, DrainSide::Left) => INTERNAL_FRONT,
        (GutterSide::Front, DrainSide::Right) => INTERNAL_BACK,
        (GutterSide::Back, DrainSide::Left) => INTERNAL_BACK,
        (GutterSide::Back, DrainSide::Right) => INTERNAL_FRONT,
    }
}

/// Unit vector pointing out of the footprint through `edge`.
pub fn outward_normal(edge: Edge) -> DVec2 {
    match edge {
        Edge::Left => DVec2::NEG_X,
        Edge::Right => DVec2::X,
        Edge::Front => DVec2::Y,
        Edge::Back => DVec2::NEG_Y,
    }
}

/// True for the two edges running along Z.
pub fn runs_along_depth(edge: Edge) -> bool {
    matches!(edge, Edge::Left | Edge::Right)
}
