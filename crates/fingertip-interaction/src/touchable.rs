//! Registered touchable surfaces.

use fingertip_surface::SurfacePatch;
use fingertip_types::TouchableId;

use crate::config::TouchableConfig;

/// A surface patch plus its interaction thresholds.
///
/// Created through [`TouchableSet::register`](crate::registry::TouchableSet::register),
/// which normalizes the configuration; read-only during a frame.
#[derive(Debug)]
pub struct Touchable {
    id: TouchableId,
    surface: SurfacePatch,
    config: TouchableConfig,
}

impl Touchable {
    pub(crate) fn new(id: TouchableId, surface: SurfacePatch, config: TouchableConfig) -> Self {
        Self { id, surface, config }
    }

    /// Stable handle.
    #[inline]
    pub fn id(&self) -> TouchableId {
        self.id
    }

    /// Patch and backing surfaces.
    #[inline]
    pub fn surface(&self) -> &SurfacePatch {
        &self.surface
    }

    /// Normalized configuration.
    #[inline]
    pub fn config(&self) -> &TouchableConfig {
        &self.config
    }

    #[inline]
    pub fn tiebreaker_score(&self) -> i32 {
        self.config.tiebreaker_score
    }

    #[inline]
    pub fn close_distance_threshold(&self) -> f32 {
        self.config.close_distance_threshold
    }

    pub(crate) fn surface_mut(&mut self) -> &mut SurfacePatch {
        &mut self.surface
    }

    pub(crate) fn set_config(&mut self, config: TouchableConfig) {
        self.config = config;
    }
}
