//! Configuration store.
//!
//! Holds the current [`Configuration`] as an immutable snapshot and exposes
//! the named setters that are the only write path to it. Every setter
//! clones the snapshot, edits the copy and swaps it in as a whole, then
//! publishes one [`ConfigEvent`], so a reader holding an older `Arc` keeps a
//! consistent view.
//!
//! The impl is split by concern:
//! - `posts`: custom post creation, moves and cascading removal
//! - `panels`: custom panels between posts
//! - `features`: windows and doors on standard and custom panels
//! - `storage`: the storage room and its reserved walls
//! - `ids`: per-store id counters

mod features;
mod ids;
mod panels;
mod posts;
mod storage;

use std::sync::Arc;

use carportkit_core::{
    ChangeKind, ConfigEvent, EventDispatcher, EventReceiver, ThreadSafe,
};
use tracing::{debug, warn};

use crate::model::{
    Configuration, GutterConfig, Limit, PanelConfig, PostId, RoofType, WallSide,
};
use crate::palette;
use crate::posts::{self as derive, Post};

pub use features::reclamp_features;
pub use ids::IdAllocator;
pub use posts::Cascade;
pub use storage::{is_storage_panel_id, storage_panels, STORAGE_PANEL_IDS};

/// Margin kept between a feature and the ends of its panel.
pub const FEATURE_MARGIN: f64 = 0.5;

/// A store handle that serialises every mutation behind one lock.
pub type SharedStore = ThreadSafe<ConfigStore>;

/// Single-writer owner of the current configuration.
#[derive(Debug)]
pub struct ConfigStore {
    config: Arc<Configuration>,
    revision: u64,
    ids: IdAllocator,
    events: EventDispatcher,
    feature_margin: f64,
}

impl ConfigStore {
    /// Creates a store holding the default configuration.
    pub fn new() -> Self {
        Self::with_config(Configuration::default())
    }

    /// Creates a store holding `config`. Id counters start past any id
    /// already present.
    pub fn with_config(config: Configuration) -> Self {
        let mut ids = IdAllocator::new();
        ids.sync_with(&config);
        Self {
            config: Arc::new(config),
            revision: 0,
            ids,
            events: EventDispatcher::default(),
            feature_margin: FEATURE_MARGIN,
        }
    }

    /// Overrides the feature margin used when re-clamping features.
    pub fn with_feature_margin(mut self, margin: f64) -> Self {
        self.feature_margin = margin;
        self
    }

    /// Current snapshot.
    pub fn config(&self) -> Arc<Configuration> {
        Arc::clone(&self.config)
    }

    /// Number of committed mutations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn feature_margin(&self) -> f64 {
        self.feature_margin
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Swaps in `next` and notifies subscribers.
    fn commit(&mut self, next: Configuration, kind: ChangeKind) {
        self.config = Arc::new(next);
        self.revision += 1;
        debug!("Committed {} change at revision {}", kind, self.revision);
        self.events.publish(ConfigEvent {
            revision: self.revision,
            kind,
        });
    }

    /// Applies `edit` to a copy of the current snapshot and commits it.
    fn update<R>(&mut self, kind: ChangeKind, edit: impl FnOnce(&mut Configuration) -> R) -> R {
        let mut next = (*self.config).clone();
        let result = edit(&mut next);
        self.commit(next, kind);
        result
    }

    /// Replaces the whole configuration, e.g. after loading a shared link.
    ///
    /// Out-of-range dimensions are clamped and feature offsets re-clamped.
    pub fn set_config(&mut self, config: Configuration) {
        let mut next = config;
        clamp_dimensions(&mut next);
        reclamp_features(&mut next, self.feature_margin);
        self.ids.sync_with(&next);
        self.commit(next, ChangeKind::Replaced);
    }

    /// Restores the default configuration. Id counters are kept.
    pub fn reset_config(&mut self) {
        self.commit(Configuration::default(), ChangeKind::Replaced);
    }

    pub fn set_width(&mut self, width: f64) {
        let width = clamp_logged(Limit::WIDTH, width);
        let margin = self.feature_margin;
        self.update(ChangeKind::Dimensions, |c| {
            c.width = width;
            reclamp_features(c, margin);
        });
    }

    pub fn set_depth(&mut self, depth: f64) {
        let depth = clamp_logged(Limit::DEPTH, depth);
        let margin = self.feature_margin;
        self.update(ChangeKind::Dimensions, |c| {
            c.depth = depth;
            reclamp_features(c, margin);
        });
    }

    pub fn set_height(&mut self, height: f64) {
        let height = clamp_logged(Limit::HEIGHT, height);
        self.update(ChangeKind::Dimensions, |c| c.height = height);
    }

    /// Sets the display colour. Anything other than `#RRGGBB` is ignored.
    pub fn set_color(&mut self, color: &str) {
        if !palette::is_hex_color(color) {
            warn!("Ignoring invalid colour {:?}", color);
            return;
        }
        let color = color.to_string();
        self.update(ChangeKind::Color, |c| c.color = color);
    }

    pub fn set_roof_type(&mut self, roof_type: RoofType) {
        self.update(ChangeKind::Roof, |c| c.roof_type = roof_type);
    }

    /// Replaces one standard side slot, features included.
    pub fn set_panel(&mut self, side: WallSide, panel: PanelConfig) {
        let margin = self.feature_margin;
        self.update(ChangeKind::StandardPanel, |c| {
            *c.panels.get_mut(side) = panel;
            reclamp_features(c, margin);
        });
    }

    pub fn set_gutter(&mut self, gutter: GutterConfig) {
        self.update(ChangeKind::Gutter, |c| c.gutter = gutter);
    }

    /// Resolves a post id, custom posts first, then a fresh derivation of
    /// the structural posts.
    pub fn get_post_by_id(&self, id: &PostId) -> Option<Post> {
        derive::find_post(&self.config, id)
    }

    pub fn structural_posts(&self) -> Vec<Post> {
        derive::structural_posts(&self.config)
    }

    /// Custom posts followed by structural posts.
    pub fn all_posts(&self) -> Vec<Post> {
        derive::all_posts(&self.config)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_logged(limit: Limit, value: f64) -> f64 {
    let clamped = limit.clamp(value);
    if clamped != value {
        warn!(
            "Clamped {} {} into {}..={}: {}",
            limit.name, value, limit.min, limit.max, clamped
        );
    }
    clamped
}

fn clamp_dimensions(config: &mut Configuration) {
    config.width = clamp_logged(Limit::WIDTH, config.width);
    config.depth = clamp_logged(Limit::DEPTH, config.depth);
    config.height = clamp_logged(Limit::HEIGHT, config.height);
    config.storage_room.depth = clamp_logged(Limit::STORAGE_DEPTH, config.storage_room.depth);
}
