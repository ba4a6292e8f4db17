//! Drag and click handling for placed posts, panels and features.
//!
//! A drag starts on pointer-down, follows the pointer ray without touching
//! the store and commits once on pointer-up. Clicks that arrive right after
//! a drag that moved the element are swallowed so releasing it never deletes
//! the element. A press that never moved is an ordinary click.

use std::time::{Duration, Instant};

use carportkit_core::LayoutError;
use glam::{DVec2, DVec3};
use tracing::{debug, warn};

use crate::geometry::{self, Ray};
use crate::model::{Configuration, FeatureId, PanelRef, PostId};
use crate::placement::PlacementSettings;
use crate::store::ConfigStore;
use crate::walls::{panel_span, WallSpan};

/// How long after a drag ends a click is ignored.
pub const CLICK_SUPPRESSION: Duration = Duration::from_millis(100);

/// Longest pointer-down to click interval that still counts as a click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSettings {
    pub placement: PlacementSettings,
    pub click_suppression: Duration,
    pub double_click_window: Duration,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            placement: PlacementSettings::default(),
            click_suppression: CLICK_SUPPRESSION,
            double_click_window: DOUBLE_CLICK_WINDOW,
        }
    }
}

/// The element under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Post(PostId),
    Feature { panel: PanelRef, feature: FeatureId },
}

/// Live position of the element being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPosition {
    /// Ground-plane position on the perimeter, not yet snapped.
    Post(DVec2),
    /// Offset along the panel's width axis.
    Feature(f64),
}

/// Element that received a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    Post(PostId),
    Panel(PanelRef),
    Feature { panel: PanelRef, feature: FeatureId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click followed a drag and was ignored.
    Suppressed,
    /// Not a qualifying double click.
    Ignored,
    Removed(ClickTarget),
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    target: DragTarget,
    position: Option<DragPosition>,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    settings: DragSettings,
    active: Option<ActiveDrag>,
    last_pointer_down: Option<Instant>,
    last_drag_end: Option<Instant>,
}

impl DragController {
    pub fn new(settings: DragSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> Option<&DragTarget> {
        self.active.as_ref().map(|drag| &drag.target)
    }

    /// Live, uncommitted position of the dragged element.
    pub fn position(&self) -> Option<DragPosition> {
        self.active.as_ref().and_then(|drag| drag.position)
    }

    /// Captures the pointer for `target`.
    pub fn pointer_down(&mut self, target: DragTarget, now: Instant) {
        debug!("Drag started on {:?}", target);
        self.last_pointer_down = Some(now);
        self.active = Some(ActiveDrag {
            target,
            position: None,
        });
    }

    /// Tracks the pointer ray. Nothing is written to the store.
    pub fn pointer_move(&mut self, config: &Configuration, ray: &Ray) -> Option<DragPosition> {
        let margin = self.settings.placement.feature_margin;
        let drag = self.active.as_mut()?;
        let position = match &drag.target {
            DragTarget::Post(_) => {
                let hit = ray.intersect_ground()?;
                DragPosition::Post(config.footprint().constrain_to_perimeter(hit))
            }
            DragTarget::Feature { panel, .. } => {
                let span = panel_span(config, panel)?;
                let offset = wall_offset(&span, ray)?;
                DragPosition::Feature(geometry::clamp_to_span(offset, span.width, margin))
            }
        };
        drag.position = Some(position);
        Some(position)
    }

    /// Releases the pointer and commits the final position.
    ///
    /// Posts are snapped to the grid before committing. A drag that never
    /// moved commits nothing.
    pub fn pointer_up(
        &mut self,
        store: &mut ConfigStore,
        now: Instant,
    ) -> Result<Option<DragPosition>, LayoutError> {
        let Some(drag) = self.active.take() else {
            return Ok(None);
        };
        let Some(position) = drag.position else {
            return Ok(None);
        };
        self.last_drag_end = Some(now);

        let committed = match (&drag.target, position) {
            (DragTarget::Post(id), DragPosition::Post(point)) => {
                let snapped = geometry::snap_point(point, self.settings.placement.grid_size);
                if !store.update_post_position(id, snapped.x, snapped.y) {
                    warn!("Dragged post {} no longer exists", id);
                    return Ok(None);
                }
                DragPosition::Post(snapped)
            }
            (DragTarget::Feature { panel, feature }, DragPosition::Feature(offset)) => {
                store.update_panel_feature_position(panel, feature, offset)?;
                DragPosition::Feature(offset)
            }
            _ => return Ok(None),
        };
        debug!("Drag committed {:?}", committed);
        Ok(Some(committed))
    }

    /// Ends a drag without committing, e.g. when the pointer leaves the
    /// element.
    pub fn cancel(&mut self, now: Instant) {
        if self.active.take().is_some_and(|drag| drag.position.is_some()) {
            self.last_drag_end = Some(now);
        }
    }

    /// True while a drag is in progress or clicks are being swallowed after a
    /// drag that moved.
    pub fn is_click_suppressed(&self, now: Instant) -> bool {
        self.active.is_some()
            || self
                .last_drag_end
                .is_some_and(|end| now.saturating_duration_since(end) < self.settings.click_suppression)
    }

    /// Handles a click with the platform click count. A double click that
    /// arrives soon enough after pointer-down removes the element.
    pub fn click(
        &mut self,
        store: &mut ConfigStore,
        target: ClickTarget,
        click_count: u32,
        now: Instant,
    ) -> Result<ClickOutcome, LayoutError> {
        if self.is_click_suppressed(now) {
            return Ok(ClickOutcome::Suppressed);
        }
        if click_count != 2 {
            return Ok(ClickOutcome::Ignored);
        }
        let quick = self.last_pointer_down.map_or(true, |down| {
            now.saturating_duration_since(down) < self.settings.double_click_window
        });
        if !quick {
            return Ok(ClickOutcome::Ignored);
        }

        let removed = match &target {
            ClickTarget::Post(id) => store.remove_custom_post(id).is_some(),
            ClickTarget::Panel(PanelRef::Custom(id)) => store.remove_custom_panel(id),
            ClickTarget::Panel(PanelRef::Standard(_)) => false,
            ClickTarget::Feature { panel, feature } => {
                store.remove_panel_feature(panel, feature)?;
                true
            }
        };
        if !removed {
            return Ok(ClickOutcome::Ignored);
        }
        debug!("Removed {:?} on double click", target);
        Ok(ClickOutcome::Removed(target))
    }
}

/// Offset along a wall where the ray meets the wall's vertical plane,
/// falling back to the ground plane for rays parallel to the wall.
fn wall_offset(span: &WallSpan, ray: &Ray) -> Option<f64> {
    let axis = span.axis();
    let normal = DVec3::new(-axis.y, 0.0, axis.x);
    let center = DVec3::new(span.center.x, 0.0, span.center.y);
    let hit = ray
        .intersect_plane(center, normal)
        .map(|p| DVec2::new(p.x, p.z))
        .or_else(|| ray.intersect_ground())?;
    Some((hit - span.center).dot(axis))
}
