//! Configuration data model.
//!
//! [`Configuration`] is the single root aggregate of the configurator. It
//! serializes with the camelCase field names used by share links and local
//! persistence (`roofType`, `storageRoom`, `customPanels`, `startPostId`...).

use carportkit_core::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Footprint;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Identifier of a post, structural (`static-*`) or custom (`post-N`).
    PostId
);
define_id!(
    /// Identifier of a custom or storage panel.
    PanelId
);
define_id!(
    /// Identifier of a window or door.
    FeatureId
);

/// Roof covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofType {
    #[default]
    Metal,
    Glass,
    Polycarbonate,
}

/// Infill of a standard side slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
    #[default]
    None,
    Slats,
    Solid,
}

/// Infill of a panel spanning two posts. Custom panels always have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomPanelKind {
    #[default]
    Slats,
    Solid,
}

impl From<CustomPanelKind> for PanelType {
    fn from(kind: CustomPanelKind) -> Self {
        match kind {
            CustomPanelKind::Slats => PanelType::Slats,
            CustomPanelKind::Solid => PanelType::Solid,
        }
    }
}

/// Kind of opening embedded in a solid panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Window,
    Door,
}

/// One of the three fixed side slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    Left,
    Right,
    Back,
}

impl WallSide {
    pub const ALL: [WallSide; 3] = [WallSide::Left, WallSide::Right, WallSide::Back];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallSide::Left => "left",
            WallSide::Right => "right",
            WallSide::Back => "back",
        }
    }
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing side a storage room is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoragePosition {
    #[default]
    Back,
    Left,
    Right,
}

/// Side of the roof that carries the gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GutterSide {
    Front,
    #[default]
    Back,
}

/// End of the gutter the downpipe drains from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrainSide {
    Left,
    #[default]
    Right,
}

/// A window or door positioned along its panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelFeature {
    pub id: FeatureId,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    /// Offset from the panel centre along the panel width.
    pub x: f64,
}

/// Contents of a standard side slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(rename = "type")]
    pub panel_type: PanelType,
    #[serde(default)]
    pub features: Vec<PanelFeature>,
}

impl PanelConfig {
    pub fn new(panel_type: PanelType) -> Self {
        Self {
            panel_type,
            features: Vec::new(),
        }
    }
}

/// The three standard side slots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandardPanels {
    pub left: PanelConfig,
    pub right: PanelConfig,
    pub back: PanelConfig,
}

impl StandardPanels {
    pub fn get(&self, side: WallSide) -> &PanelConfig {
        match side {
            WallSide::Left => &self.left,
            WallSide::Right => &self.right,
            WallSide::Back => &self.back,
        }
    }

    pub fn get_mut(&mut self, side: WallSide) -> &mut PanelConfig {
        match side {
            WallSide::Left => &mut self.left,
            WallSide::Right => &mut self.right,
            WallSide::Back => &mut self.back,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageRoomConfig {
    pub enabled: bool,
    pub position: StoragePosition,
    /// Distance from the outer wall to the partition wall.
    pub depth: f64,
}

impl Default for StorageRoomConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            position: StoragePosition::Back,
            depth: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GutterConfig {
    pub enabled: bool,
    pub side: GutterSide,
    pub drain: DrainSide,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            side: GutterSide::Back,
            drain: DrainSide::Right,
        }
    }
}

/// A user-placed post on the ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPost {
    pub id: PostId,
    pub x: f64,
    pub z: f64,
}

/// A wall span between two posts, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPanel {
    pub id: PanelId,
    pub start_post_id: PostId,
    pub end_post_id: PostId,
    #[serde(rename = "type")]
    pub kind: CustomPanelKind,
    #[serde(default)]
    pub features: Vec<PanelFeature>,
}

impl CustomPanel {
    /// True when the panel connects `a` and `b` in either direction.
    pub fn connects(&self, a: &PostId, b: &PostId) -> bool {
        (&self.start_post_id == a && &self.end_post_id == b)
            || (&self.start_post_id == b && &self.end_post_id == a)
    }

    /// True when `post` is either endpoint.
    pub fn references(&self, post: &PostId) -> bool {
        &self.start_post_id == post || &self.end_post_id == post
    }
}

/// Reference to any panel that can own features.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PanelRef {
    Standard(WallSide),
    Custom(PanelId),
}

impl PanelRef {
    /// Parses a wire id: the standard slot names map to
    /// [`PanelRef::Standard`], anything else is a custom panel id.
    pub fn parse(id: &str) -> Self {
        match id {
            "left" => PanelRef::Standard(WallSide::Left),
            "right" => PanelRef::Standard(WallSide::Right),
            "back" => PanelRef::Standard(WallSide::Back),
            other => PanelRef::Custom(PanelId::new(other)),
        }
    }
}

impl From<WallSide> for PanelRef {
    fn from(side: WallSide) -> Self {
        PanelRef::Standard(side)
    }
}

impl From<PanelId> for PanelRef {
    fn from(id: PanelId) -> Self {
        PanelRef::Custom(id)
    }
}

impl fmt::Display for PanelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelRef::Standard(side) => write!(f, "{}", side),
            PanelRef::Custom(id) => write!(f, "{}", id),
        }
    }
}

/// Inclusive range a dimension slider allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limit {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl Limit {
    pub const WIDTH: Limit = Limit::new("width", 3.0, 8.0);
    pub const DEPTH: Limit = Limit::new("depth", 4.0, 8.0);
    pub const HEIGHT: Limit = Limit::new("height", 2.2, 3.5);
    pub const STORAGE_DEPTH: Limit = Limit::new("storage depth", 1.0, 5.0);

    pub const fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps into range; non-finite input falls back to the minimum.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    pub fn check(&self, value: f64) -> Result<(), LayoutError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(LayoutError::InvalidDimension {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// The complete carport configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Extent along the internal X axis, meters.
    pub width: f64,
    /// Extent along the internal Z axis, meters.
    pub depth: f64,
    pub height: f64,
    /// Display colour as `#RRGGBB`.
    pub color: String,
    pub roof_type: RoofType,
    #[serde(default)]
    pub panels: StandardPanels,
    #[serde(default)]
    pub storage_room: StorageRoomConfig,
    #[serde(default)]
    pub gutter: GutterConfig,
    #[serde(default)]
    pub custom_posts: Vec<CustomPost>,
    #[serde(default)]
    pub custom_panels: Vec<CustomPanel>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            width: 4.0,
            depth: 6.0,
            height: 2.5,
            color: crate::palette::DEFAULT_COLOR.to_string(),
            roof_type: RoofType::Metal,
            panels: StandardPanels::default(),
            storage_room: StorageRoomConfig::default(),
            gutter: GutterConfig::default(),
            custom_posts: Vec::new(),
            custom_panels: Vec::new(),
        }
    }
}

impl Configuration {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.width, self.depth)
    }

    /// Checks every dimension against its slider range.
    pub fn validate(&self) -> Result<(), LayoutError> {
        Limit::WIDTH.check(self.width)?;
        Limit::DEPTH.check(self.depth)?;
        Limit::HEIGHT.check(self.height)?;
        Limit::STORAGE_DEPTH.check(self.storage_room.depth)?;
        Ok(())
    }

    pub fn custom_post(&self, id: &PostId) -> Option<&CustomPost> {
        self.custom_posts.iter().find(|p| &p.id == id)
    }

    pub fn custom_panel(&self, id: &PanelId) -> Option<&CustomPanel> {
        self.custom_panels.iter().find(|p| &p.id == id)
    }

    /// Features owned by the referenced panel, if it exists.
    pub fn features(&self, panel: &PanelRef) -> Option<&[PanelFeature]> {
        match panel {
            PanelRef::Standard(side) => Some(&self.panels.get(*side).features),
            PanelRef::Custom(id) => self.custom_panel(id).map(|p| p.features.as_slice()),
        }
    }
}
