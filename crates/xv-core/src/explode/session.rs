//! Exploded-view session
//!
//! [`ExplodedView`] is the owned state between the two triggers that drive the
//! engine: scene loads and factor changes. A load swaps in a new
//! `Arc<PartTable>` wholesale; callers that grabbed [`ExplodedView::table`]
//! before the swap keep a consistent view of the old scene.

use std::sync::Arc;

use crate::config::ExplodeConfig;
use crate::scene::SceneGraph;

use super::extract::PartExtractor;
use super::pose::apply_explosion;
use super::table::PartTable;

/// Current model, part table and explosion factor of a viewer
#[derive(Debug)]
pub struct ExplodedView {
    config: ExplodeConfig,
    extractor: PartExtractor,
    table: Arc<PartTable>,
    model_id: Option<String>,
    factor: f32,
    /// Factor last written to the scene; `None` forces the next update
    applied: Option<f32>,
}

impl Default for ExplodedView {
    fn default() -> Self {
        Self::new(ExplodeConfig::default())
    }
}

impl ExplodedView {
    /// Create a session with no model loaded
    pub fn new(config: ExplodeConfig) -> Self {
        let extractor = PartExtractor::new(&config);
        Self {
            config,
            extractor,
            table: Arc::new(PartTable::empty()),
            model_id: None,
            factor: 0.0,
            applied: None,
        }
    }

    /// Configuration the session was built with
    pub fn config(&self) -> &ExplodeConfig {
        &self.config
    }

    /// Extract the parts of a freshly loaded scene and make it current.
    ///
    /// The previous table is replaced, never edited. The current factor is
    /// kept and written on the next [`update`](Self::update).
    pub fn load(&mut self, model_id: impl Into<String>, scene: &mut SceneGraph) -> Arc<PartTable> {
        let model_id = model_id.into();
        let table = Arc::new(self.extractor.extract(scene));
        tracing::debug!(
            "Loaded model '{}': {} parts replace {}",
            model_id,
            table.len(),
            self.table.len()
        );

        self.table = Arc::clone(&table);
        self.model_id = Some(model_id);
        self.applied = None;
        table
    }

    /// Snapshot of the current part table
    pub fn table(&self) -> Arc<PartTable> {
        Arc::clone(&self.table)
    }

    /// Identifier of the loaded model, if any
    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    /// Current explosion factor
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Set the explosion factor. Takes effect on the next [`update`](Self::update).
    pub fn set_factor(&mut self, factor: f32) {
        self.factor = factor;
    }

    /// Slider label for the current factor, e.g. `"Explosion: 50%"`
    pub fn percent_label(&self) -> String {
        format!("Explosion: {}%", (self.factor * 100.0).round())
    }

    /// Per-frame tick: re-pose the current table for the current factor.
    ///
    /// With `skip_unchanged` set, nothing is written when the factor equals
    /// the one last applied. A scene the current table was not extracted from
    /// is left alone and does not count as applied. Returns true if positions
    /// were written.
    pub fn update(&mut self, scene: &mut SceneGraph) -> bool {
        if self.config.explosion.skip_unchanged && self.applied == Some(self.factor) {
            return false;
        }
        if !self.table.is_empty() && self.table.scene_id() != Some(scene.id()) {
            return false;
        }
        apply_explosion(&self.table, scene, self.factor, self.config.explosion.scale);
        self.applied = Some(self.factor);
        true
    }

    /// Return every part to its rest pose
    pub fn reset(&mut self, scene: &mut SceneGraph) {
        self.factor = 0.0;
        self.applied = None;
        self.update(scene);
    }
}
