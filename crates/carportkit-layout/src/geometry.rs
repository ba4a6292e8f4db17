//! Ground-plane geometry helpers.
//!
//! All layout math happens on the ground plane. Points are `glam::DVec2`
//! where `.x` is the world X axis and `.y` carries the world Z axis; the
//! vertical axis only shows up when intersecting pointer rays.

use glam::{DVec2, DVec3};

/// Default snapping grid in meters.
pub const DEFAULT_GRID_SIZE: f64 = 0.5;

/// Builds a ground-plane point from world X/Z coordinates.
#[inline]
pub fn ground(x: f64, z: f64) -> DVec2 {
    DVec2::new(x, z)
}

/// Euclidean distance between two ground points.
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Midpoint of the segment `a`-`b`.
#[inline]
pub fn midpoint(a: DVec2, b: DVec2) -> DVec2 {
    a.lerp(b, 0.5)
}

/// Angle of the direction from `a` to `b`, measured from +X toward +Z.
#[inline]
pub fn angle_between(a: DVec2, b: DVec2) -> f64 {
    let d = b - a;
    d.y.atan2(d.x)
}

/// Rounds `value` to the nearest multiple of `grid_size`.
///
/// Halfway values round toward positive infinity.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return value;
    }
    (value / grid_size + 0.5).floor() * grid_size
}

/// Snaps both coordinates of a ground point.
pub fn snap_point(point: DVec2, grid_size: f64) -> DVec2 {
    DVec2::new(
        snap_to_grid(point.x, grid_size),
        snap_to_grid(point.y, grid_size),
    )
}

/// Clamps a 1-D offset measured from the centre of a span of `width` so it
/// stays at least `margin` away from both ends.
///
/// A span narrower than `2 * margin` has no valid offset; the centre is used.
pub fn clamp_to_span(offset: f64, width: f64, margin: f64) -> f64 {
    let limit = width / 2.0 - margin;
    if limit <= 0.0 {
        return 0.0;
    }
    offset.clamp(-limit, limit)
}

/// Projects `point` onto the axis of the segment `start`-`end` and returns
/// the signed distance from the segment midpoint along that axis.
pub fn offset_along(start: DVec2, end: DVec2, point: DVec2) -> f64 {
    let axis = (end - start).normalize_or_zero();
    (point - midpoint(start, end)).dot(axis)
}

/// One of the four boundary edges of the footprint (internal axes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// x = -half_width
    Left,
    /// x = +half_width
    Right,
    /// z = +half_depth
    Front,
    /// z = -half_depth
    Back,
}

/// Axis-aligned rectangular footprint centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub half_width: f64,
    pub half_depth: f64,
}

impl Footprint {
    /// Creates a footprint from full width (X) and depth (Z).
    pub fn new(width: f64, depth: f64) -> Self {
        Self {
            half_width: width / 2.0,
            half_depth: depth / 2.0,
        }
    }

    /// Returns true when the point lies inside or on the boundary.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x.abs() <= self.half_width && point.y.abs() <= self.half_depth
    }

    /// Classifies the point by its nearest boundary edge.
    ///
    /// Ties resolve in the order left, right, front, back.
    pub fn nearest_edge(&self, point: DVec2) -> Edge {
        let candidates = [
            (Edge::Left, (point.x + self.half_width).abs()),
            (Edge::Right, (point.x - self.half_width).abs()),
            (Edge::Front, (point.y - self.half_depth).abs()),
            (Edge::Back, (point.y + self.half_depth).abs()),
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(edge, _)| edge)
            .unwrap_or(Edge::Left)
    }

    /// Pins the point onto its nearest edge.
    ///
    /// The coordinate perpendicular to the edge takes the edge's value; the
    /// coordinate along the edge is clamped to the edge's span.
    pub fn constrain_to_perimeter(&self, point: DVec2) -> DVec2 {
        let along_x = point.x.clamp(-self.half_width, self.half_width);
        let along_z = point.y.clamp(-self.half_depth, self.half_depth);
        match self.nearest_edge(point) {
            Edge::Left => DVec2::new(-self.half_width, along_z),
            Edge::Right => DVec2::new(self.half_width, along_z),
            Edge::Front => DVec2::new(along_x, self.half_depth),
            Edge::Back => DVec2::new(along_x, -self.half_depth),
        }
    }
}

/// A pointer ray in world space as produced by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Intersects the ray with the plane through `point` with `normal`.
    ///
    /// Returns `None` when the ray is parallel to the plane or the plane lies
    /// behind the ray origin.
    pub fn intersect_plane(&self, point: DVec3, normal: DVec3) -> Option<DVec3> {
        let denom = normal.dot(self.direction);
        if denom.abs() < f64::EPSILON {
            return None;
        }
        let t = normal.dot(point - self.origin) / denom;
        if t < 0.0 {
            return None;
        }
        Some(self.origin + self.direction * t)
    }

    /// Intersects the ray with the ground plane (y = 0).
    pub fn intersect_ground(&self) -> Option<DVec2> {
        self.intersect_plane(DVec3::ZERO, DVec3::Y)
            .map(|hit| DVec2::new(hit.x, hit.z))
    }
}
