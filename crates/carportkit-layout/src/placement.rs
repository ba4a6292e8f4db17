//! Placement of new posts, panels and features from pointer input.
//!
//! The rendering layer supplies ground-plane points; the controller turns
//! them into a preview while the pointer moves and into a store mutation on
//! click.

use std::str::FromStr;

use carportkit_core::LayoutError;
use glam::DVec2;
use tracing::debug;

use crate::geometry::{self, angle_between, distance, midpoint, DEFAULT_GRID_SIZE};
use crate::model::{Configuration, CustomPanelKind, FeatureId, FeatureKind, PanelId, PanelRef, PostId};
use crate::posts::{all_posts, Post};
use crate::store::{ConfigStore, FEATURE_MARGIN};
use crate::walls::panel_span;

/// Minimum distance between the two posts of a new panel.
pub const MIN_POST_SPACING: f64 = 0.2;

/// Tunables for placement and dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSettings {
    pub grid_size: f64,
    pub min_post_spacing: f64,
    pub feature_margin: f64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            min_post_spacing: MIN_POST_SPACING,
            feature_margin: FEATURE_MARGIN,
        }
    }
}

/// The element the user is about to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementTool {
    Post,
    Panel(CustomPanelKind),
    Feature(FeatureKind),
}

impl FromStr for PlacementTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(PlacementTool::Post),
            "panel-slats" => Ok(PlacementTool::Panel(CustomPanelKind::Slats)),
            "panel-solid" => Ok(PlacementTool::Panel(CustomPanelKind::Solid)),
            "feature-window" => Ok(PlacementTool::Feature(FeatureKind::Window)),
            "feature-door" => Ok(PlacementTool::Feature(FeatureKind::Door)),
            other => Err(format!("Unknown placement tool: {}", other)),
        }
    }
}

/// Ghost shown under the pointer before a click commits it.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Post {
        position: DVec2,
    },
    Panel {
        start: Post,
        end: Post,
        center: DVec2,
        width: f64,
        rotation: f64,
    },
}

/// What a click created.
#[derive(Debug, Clone, PartialEq)]
pub enum Placed {
    Post(PostId),
    Panel(PanelId),
}

#[derive(Debug, Clone, Default)]
pub struct PlacementController {
    settings: PlacementSettings,
    tool: Option<PlacementTool>,
    preview: Option<Preview>,
}

impl PlacementController {
    pub fn new(settings: PlacementSettings) -> Self {
        Self {
            settings,
            tool: None,
            preview: None,
        }
    }

    pub fn settings(&self) -> &PlacementSettings {
        &self.settings
    }

    pub fn tool(&self) -> Option<PlacementTool> {
        self.tool
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Selects a tool, or clears the selection with `None`.
    pub fn select_tool(&mut self, tool: Option<PlacementTool>) {
        self.tool = tool;
        self.preview = None;
    }

    pub fn snap_to_grid(&self, value: f64) -> f64 {
        geometry::snap_to_grid(value, self.settings.grid_size)
    }

    /// Pins a point onto the nearest edge of the carport footprint.
    pub fn constrain_to_perimeter(&self, config: &Configuration, x: f64, z: f64) -> DVec2 {
        config
            .footprint()
            .constrain_to_perimeter(DVec2::new(x, z))
    }

    /// Position a new post would take: on the perimeter, then on the grid.
    pub fn post_position(&self, config: &Configuration, point: DVec2) -> DVec2 {
        let on_edge = self.constrain_to_perimeter(config, point.x, point.y);
        geometry::snap_point(on_edge, self.settings.grid_size)
    }

    /// The two posts closest to `(x, z)`, custom posts before structural
    /// ones on equal distance.
    ///
    /// Returns `None` when fewer than two posts exist or the two nearest
    /// are closer together than the minimum spacing.
    pub fn find_nearest_post_pair(
        &self,
        config: &Configuration,
        x: f64,
        z: f64,
    ) -> Option<(Post, Post)> {
        let query = DVec2::new(x, z);
        let mut posts = all_posts(config);
        posts.sort_by(|a, b| {
            distance(a.position(), query).total_cmp(&distance(b.position(), query))
        });
        let mut nearest = posts.into_iter();
        let first = nearest.next()?;
        let second = nearest.next()?;
        if distance(first.position(), second.position()) < self.settings.min_post_spacing {
            return None;
        }
        Some((first, second))
    }

    /// Updates the preview for the pointer at `point`.
    pub fn pointer_move(&mut self, config: &Configuration, point: DVec2) -> Option<&Preview> {
        self.preview = match self.tool {
            Some(PlacementTool::Post) => Some(Preview::Post {
                position: self.post_position(config, point),
            }),
            Some(PlacementTool::Panel(_)) => self
                .find_nearest_post_pair(config, point.x, point.y)
                .map(|(start, end)| {
                    let (a, b) = (start.position(), end.position());
                    Preview::Panel {
                        center: midpoint(a, b),
                        width: distance(a, b),
                        rotation: angle_between(a, b),
                        start,
                        end,
                    }
                }),
            Some(PlacementTool::Feature(_)) | None => None,
        };
        self.preview.as_ref()
    }

    pub fn pointer_leave(&mut self) {
        self.preview = None;
    }

    /// Commits the current preview. The tool stays selected so several
    /// posts or panels can be placed in a row.
    pub fn click(&mut self, store: &mut ConfigStore) -> Result<Option<Placed>, LayoutError> {
        let Some(preview) = self.preview.take() else {
            return Ok(None);
        };
        let placed = match (self.tool, preview) {
            (Some(PlacementTool::Post), Preview::Post { position }) => {
                Placed::Post(store.add_custom_post(position.x, position.y))
            }
            (Some(PlacementTool::Panel(kind)), Preview::Panel { start, end, .. }) => {
                Placed::Panel(store.add_custom_panel(&start.id, &end.id, kind)?)
            }
            _ => return Ok(None),
        };
        debug!("Placed {:?}", placed);
        Ok(Some(placed))
    }

    /// Adds the selected window or door where `point` projects onto a
    /// solid panel. The tool is cleared afterwards.
    ///
    /// Clicks with another tool, or on a panel that is not solid, place
    /// nothing.
    pub fn place_feature(
        &mut self,
        store: &mut ConfigStore,
        panel: &PanelRef,
        point: DVec2,
    ) -> Result<Option<FeatureId>, LayoutError> {
        let Some(PlacementTool::Feature(kind)) = self.tool else {
            return Ok(None);
        };
        let config = store.config();
        let span = panel_span(&config, panel).ok_or_else(|| LayoutError::UnknownPanel {
            id: panel.to_string(),
        })?;
        if !span.is_solid() {
            debug!("Ignoring {:?} on non-solid panel {}", kind, panel);
            return Ok(None);
        }
        let offset =
            geometry::clamp_to_span(span.offset_of(point), span.width, self.settings.feature_margin);
        let id = store.add_panel_feature(panel, kind, offset)?;
        self.select_tool(None);
        Ok(Some(id))
    }
}
