//! Custom post operations for the configuration store.

use std::collections::HashSet;

use carportkit_core::ChangeKind;
use tracing::debug;

use super::{reclamp_features, ConfigStore};
use crate::model::{Configuration, CustomPost, PanelId, PostId};

/// Posts to delete together with every panel that references one of them.
///
/// Built in one pass over the configuration, then applied as a single batch
/// so no snapshot ever holds a panel whose post is gone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cascade {
    pub posts: Vec<PostId>,
    pub panels: Vec<PanelId>,
}

impl Cascade {
    /// Collects the custom posts among `ids` and their dependent panels.
    pub fn plan<'a>(config: &Configuration, ids: impl IntoIterator<Item = &'a PostId>) -> Self {
        let wanted: HashSet<&PostId> = ids.into_iter().collect();
        let posts: Vec<PostId> = config
            .custom_posts
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .map(|p| p.id.clone())
            .collect();
        let panels = config
            .custom_panels
            .iter()
            .filter(|panel| posts.iter().any(|post| panel.references(post)))
            .map(|panel| panel.id.clone())
            .collect();
        Self { posts, panels }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.panels.is_empty()
    }

    pub fn apply(&self, config: &mut Configuration) {
        config.custom_posts.retain(|p| !self.posts.contains(&p.id));
        config.custom_panels.retain(|p| !self.panels.contains(&p.id));
    }
}

impl ConfigStore {
    /// Appends a custom post at `(x, z)` and returns its new id.
    ///
    /// The position is stored as given; snapping is the caller's job.
    pub fn add_custom_post(&mut self, x: f64, z: f64) -> PostId {
        let id = self.ids.next_post();
        let post = CustomPost { id: id.clone(), x, z };
        self.update(ChangeKind::CustomPosts, |c| c.custom_posts.push(post));
        debug!("Added post {} at ({}, {})", id, x, z);
        id
    }

    /// Moves a custom post. Unknown ids are a no-op and return `false`.
    ///
    /// Features on panels attached to the post are re-clamped to the new
    /// span.
    pub fn update_post_position(&mut self, id: &PostId, x: f64, z: f64) -> bool {
        if self.config.custom_post(id).is_none() {
            debug!("Ignoring move of unknown post {}", id);
            return false;
        }
        let margin = self.feature_margin;
        self.update(ChangeKind::CustomPosts, |c| {
            if let Some(post) = c.custom_posts.iter_mut().find(|p| &p.id == id) {
                post.x = x;
                post.z = z;
            }
            reclamp_features(c, margin);
        });
        true
    }

    /// Removes a custom post and every panel that references it.
    ///
    /// Returns the removed panel ids, or `None` when no such post exists.
    pub fn remove_custom_post(&mut self, id: &PostId) -> Option<Vec<PanelId>> {
        let cascade = Cascade::plan(&self.config, [id]);
        if cascade.posts.is_empty() {
            debug!("Ignoring removal of unknown post {}", id);
            return None;
        }
        self.update(ChangeKind::CustomPosts, |c| cascade.apply(c));
        debug!(
            "Removed post {} and {} attached panel(s)",
            id,
            cascade.panels.len()
        );
        Some(cascade.panels)
    }

    /// Removes every custom post and the panels attached to them.
    pub fn clear_custom_posts(&mut self) {
        let ids: Vec<PostId> = self.config.custom_posts.iter().map(|p| p.id.clone()).collect();
        let cascade = Cascade::plan(&self.config, &ids);
        if cascade.is_empty() {
            return;
        }
        self.update(ChangeKind::CustomPosts, |c| cascade.apply(c));
    }
}
