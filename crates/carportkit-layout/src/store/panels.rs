//! Custom panel operations for the configuration store.

use carportkit_core::{ChangeKind, LayoutError};
use tracing::debug;

use super::{is_storage_panel_id, ConfigStore};
use crate::model::{CustomPanel, CustomPanelKind, PanelId, PostId};
use crate::posts::find_post;

/// Posts closer than this are treated as the same point.
pub const COINCIDENT_DISTANCE: f64 = 1e-6;

impl ConfigStore {
    /// Adds a panel between two posts and returns its id.
    ///
    /// A panel already joining the same pair of posts, in either direction,
    /// is replaced in place by the new one. Both posts must resolve, differ
    /// and stand apart.
    pub fn add_custom_panel(
        &mut self,
        start: &PostId,
        end: &PostId,
        kind: CustomPanelKind,
    ) -> Result<PanelId, LayoutError> {
        let degenerate = || LayoutError::DegeneratePanel {
            start: start.to_string(),
            end: end.to_string(),
        };
        if start == end {
            return Err(degenerate());
        }
        let mut ends = Vec::with_capacity(2);
        for id in [start, end] {
            match find_post(&self.config, id) {
                Some(post) => ends.push(post.position()),
                None => return Err(LayoutError::UnknownPost { id: id.to_string() }),
            }
        }
        if ends[0].distance(ends[1]) < COINCIDENT_DISTANCE {
            return Err(degenerate());
        }

        let id = self.ids.next_panel();
        let panel = CustomPanel {
            id: id.clone(),
            start_post_id: start.clone(),
            end_post_id: end.clone(),
            kind,
            features: Vec::new(),
        };
        self.update(ChangeKind::CustomPanels, |c| {
            match c.custom_panels.iter_mut().find(|p| p.connects(start, end)) {
                Some(existing) => {
                    debug!("Replacing panel {} between {} and {}", existing.id, start, end);
                    *existing = panel;
                }
                None => c.custom_panels.push(panel),
            }
        });
        Ok(id)
    }

    /// Removes a custom panel. Returns `false` when no such panel exists.
    pub fn remove_custom_panel(&mut self, id: &PanelId) -> bool {
        if self.config.custom_panel(id).is_none() {
            debug!("Ignoring removal of unknown panel {}", id);
            return false;
        }
        self.update(ChangeKind::CustomPanels, |c| {
            c.custom_panels.retain(|p| &p.id != id)
        });
        true
    }

    /// Removes every custom panel, storage walls included.
    ///
    /// The storage room setting itself is left untouched; the walls return
    /// on the next storage room change.
    pub fn clear_custom_panels(&mut self) {
        if self.config.custom_panels.is_empty() {
            return;
        }
        let storage = self
            .config
            .custom_panels
            .iter()
            .filter(|p| is_storage_panel_id(p.id.as_str()))
            .count();
        self.update(ChangeKind::CustomPanels, |c| c.custom_panels.clear());
        debug!("Cleared custom panels ({} storage walls)", storage);
    }
}
