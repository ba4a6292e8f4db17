//! Per-store id allocation.

use crate::model::{Configuration, FeatureId, PanelId, PostId};

const POST_PREFIX: &str = "post-";
const PANEL_PREFIX: &str = "panel-";
const FEATURE_PREFIX: &str = "feat-";

/// Monotonic counters for custom post, panel and feature ids.
///
/// Counters never move backwards, so a deleted id is never handed out
/// again by the same store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    posts: u64,
    panels: u64,
    features: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_post(&mut self) -> PostId {
        self.posts += 1;
        PostId::new(format!("{}{}", POST_PREFIX, self.posts))
    }

    pub fn next_panel(&mut self) -> PanelId {
        self.panels += 1;
        PanelId::new(format!("{}{}", PANEL_PREFIX, self.panels))
    }

    pub fn next_feature(&mut self) -> FeatureId {
        self.features += 1;
        FeatureId::new(format!("{}{}", FEATURE_PREFIX, self.features))
    }

    /// Advances every counter past the numeric suffixes already used in
    /// `config`.
    pub fn sync_with(&mut self, config: &Configuration) {
        for post in &config.custom_posts {
            bump(&mut self.posts, post.id.as_str(), POST_PREFIX);
        }
        for panel in &config.custom_panels {
            bump(&mut self.panels, panel.id.as_str(), PANEL_PREFIX);
        }
        let standard = [
            &config.panels.left,
            &config.panels.right,
            &config.panels.back,
        ];
        let features = standard
            .into_iter()
            .flat_map(|p| p.features.iter())
            .chain(config.custom_panels.iter().flat_map(|p| p.features.iter()));
        for feature in features {
            bump(&mut self.features, feature.id.as_str(), FEATURE_PREFIX);
        }
    }
}

fn bump(counter: &mut u64, id: &str, prefix: &str) {
    if let Some(n) = id.strip_prefix(prefix).and_then(|s| s.parse::<u64>().ok()) {
        *counter = (*counter).max(n);
    }
}
