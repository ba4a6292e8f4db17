//! Window and door operations for the configuration store.

use carportkit_core::{ChangeKind, LayoutError};
use tracing::debug;

use super::ConfigStore;
use crate::geometry::{clamp_to_span, distance};
use crate::model::{Configuration, FeatureId, FeatureKind, PanelFeature, PanelRef, WallSide};
use crate::posts::find_post;
use crate::walls::standard_slot;

fn change_kind(panel: &PanelRef) -> ChangeKind {
    match panel {
        PanelRef::Standard(_) => ChangeKind::StandardPanel,
        PanelRef::Custom(_) => ChangeKind::CustomPanels,
    }
}

/// Current width of a panel, or `None` when it is hidden or dangling.
fn panel_width(config: &Configuration, panel: &PanelRef) -> Option<f64> {
    match panel {
        PanelRef::Standard(side) => standard_slot(config, *side).map(|(_, width, _)| width),
        PanelRef::Custom(id) => {
            let custom = config.custom_panel(id)?;
            let start = find_post(config, &custom.start_post_id)?;
            let end = find_post(config, &custom.end_post_id)?;
            Some(distance(start.position(), end.position()))
        }
    }
}

fn features_mut<'a>(
    config: &'a mut Configuration,
    panel: &PanelRef,
) -> Option<&'a mut Vec<PanelFeature>> {
    match panel {
        PanelRef::Standard(side) => Some(&mut config.panels.get_mut(*side).features),
        PanelRef::Custom(id) => config
            .custom_panels
            .iter_mut()
            .find(|p| &p.id == id)
            .map(|p| &mut p.features),
    }
}

/// Pulls every feature back inside its panel's current span.
///
/// Runs after any edit that can shrink a panel. Features on hidden or
/// dangling panels are left alone.
pub fn reclamp_features(config: &mut Configuration, margin: f64) {
    let mut panels: Vec<PanelRef> = WallSide::ALL.into_iter().map(PanelRef::Standard).collect();
    panels.extend(
        config
            .custom_panels
            .iter()
            .filter(|p| !p.features.is_empty())
            .map(|p| PanelRef::Custom(p.id.clone())),
    );

    for panel in panels {
        let Some(width) = panel_width(config, &panel) else {
            continue;
        };
        let Some(features) = features_mut(config, &panel) else {
            continue;
        };
        for feature in features.iter_mut() {
            let clamped = clamp_to_span(feature.x, width, margin);
            if clamped != feature.x {
                debug!("Re-clamped feature {} on {} to {}", feature.id, panel, clamped);
                feature.x = clamped;
            }
        }
    }
}

impl ConfigStore {
    fn clamp_offset(&self, panel: &PanelRef, x: f64) -> f64 {
        match panel_width(&self.config, panel) {
            Some(width) => clamp_to_span(x, width, self.feature_margin),
            None => x,
        }
    }

    /// Adds a window or door to a panel and returns its id.
    ///
    /// The offset is clamped to the panel's current span.
    pub fn add_panel_feature(
        &mut self,
        panel: &PanelRef,
        kind: FeatureKind,
        x: f64,
    ) -> Result<FeatureId, LayoutError> {
        if self.config.features(panel).is_none() {
            return Err(LayoutError::UnknownPanel {
                id: panel.to_string(),
            });
        }
        let x = self.clamp_offset(panel, x);
        let id = self.ids.next_feature();
        let feature = PanelFeature {
            id: id.clone(),
            kind,
            x,
        };
        self.update(change_kind(panel), |c| {
            if let Some(features) = features_mut(c, panel) {
                features.push(feature);
            }
        });
        debug!("Added {:?} {} to {} at {}", kind, id, panel, x);
        Ok(id)
    }

    /// Moves a feature along its panel.
    pub fn update_panel_feature_position(
        &mut self,
        panel: &PanelRef,
        feature: &FeatureId,
        x: f64,
    ) -> Result<(), LayoutError> {
        self.require_feature(panel, feature)?;
        let x = self.clamp_offset(panel, x);
        self.update(change_kind(panel), |c| {
            if let Some(f) = features_mut(c, panel)
                .and_then(|features| features.iter_mut().find(|f| &f.id == feature))
            {
                f.x = x;
            }
        });
        Ok(())
    }

    pub fn remove_panel_feature(
        &mut self,
        panel: &PanelRef,
        feature: &FeatureId,
    ) -> Result<(), LayoutError> {
        self.require_feature(panel, feature)?;
        self.update(change_kind(panel), |c| {
            if let Some(features) = features_mut(c, panel) {
                features.retain(|f| &f.id != feature);
            }
        });
        debug!("Removed feature {} from {}", feature, panel);
        Ok(())
    }

    fn require_feature(&self, panel: &PanelRef, feature: &FeatureId) -> Result<(), LayoutError> {
        let features = self
            .config
            .features(panel)
            .ok_or_else(|| LayoutError::UnknownPanel {
                id: panel.to_string(),
            })?;
        if features.iter().any(|f| &f.id == feature) {
            Ok(())
        } else {
            Err(LayoutError::UnknownFeature {
                panel_id: panel.to_string(),
                feature_id: feature.to_string(),
            })
        }
    }
}
