//! # Carportkit Layout
//!
//! The structural layout engine of the carport configurator. It derives the
//! support posts and wall spans of a carport from a handful of user
//! parameters and keeps them consistent while the user edits the layout.
//!
//! ## Core Components
//!
//! ### Model
//! - **Configuration**: the single root aggregate (dimensions, colour, roof,
//!   standard panels, storage room, gutter, custom posts and panels)
//! - **Palette**: the RAL colours offered for the frame
//!
//! ### Derivation
//! - **Posts**: structural posts recomputed from width, depth and storage
//! - **Axes**: mapping of user-facing side labels onto internal edges
//! - **Walls**: standard slots and custom panels resolved to spans
//! - **Gutter**: gutter run, downpipe and roof pitch
//!
//! ### Editing
//! - **Store**: the single write path, with cascading post removal and
//!   reserved storage room walls
//! - **Placement**: previews and commits for new posts, panels and features
//! - **Drag**: drag lifecycle and double-click removal
//! - **Sharing**: share link encoding and decoding
//!
//! ## Architecture
//!
//! ```text
//! Configuration (snapshot)
//!   ├── Posts   (derived, never stored)
//!   ├── Walls   (derived spans)
//!   └── Gutter  (derived run)
//!
//! ConfigStore (setters, revision, events)
//!   ├── PlacementController (new elements)
//!   └── DragController      (moves, removals)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carportkit_layout::{ConfigStore, PanelRef, WallSide};
//!
//! let mut store = ConfigStore::new();
//! store.set_depth(6.5);
//! let post = store.add_custom_post(1.0, 3.25);
//! store.add_custom_panel(&post, &"static-fr".into(), CustomPanelKind::Solid)?;
//! ```

pub mod axes;
pub mod drag;
pub mod geometry;
pub mod gutter;
pub mod model;
pub mod palette;
pub mod placement;
pub mod posts;
pub mod sharing;
pub mod store;
pub mod walls;

pub use drag::{ClickOutcome, ClickTarget, DragController, DragPosition, DragSettings, DragTarget};
pub use geometry::{Edge, Footprint, Ray};
pub use gutter::{gutter_layout, GutterLayout};
pub use model::{
    Configuration, CustomPanel, CustomPanelKind, CustomPost, DrainSide, FeatureId, FeatureKind,
    GutterConfig, GutterSide, Limit, PanelConfig, PanelFeature, PanelId, PanelRef, PanelType,
    PostId, RoofType, StandardPanels, StoragePosition, StorageRoomConfig, WallSide,
};
pub use palette::{PaletteColor, PALETTE};
pub use placement::{Placed, PlacementController, PlacementSettings, PlacementTool, Preview};
pub use posts::{derive_posts, Post};
pub use sharing::{
    clear_config_from_url, decode_config, encode_config, generate_share_url,
    parse_config_from_url, try_decode_config, try_parse_config_from_url,
};
pub use store::{ConfigStore, SharedStore};
pub use walls::{resolve_custom_panels, standard_walls, WallSpan};
