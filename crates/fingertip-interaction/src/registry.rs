//! Touchable registries.
//!
//! The engine never owns the set of touchables a probe may touch; it asks
//! a [`TouchableRegistry`] passed in at call time. [`TouchableSet`] is the
//! stock implementation: a dense arena indexed by [`TouchableId`] plus a
//! registration-ordered list.

use fingertip_math::SurfaceFrame;
use fingertip_surface::SurfacePatch;
use fingertip_types::{FingertipError, FingertipResult, ProbeId, TouchableId};

use crate::config::TouchableConfig;
use crate::touchable::Touchable;

/// Source of candidate touchables for a probe.
///
/// Iteration order of [`list`](TouchableRegistry::list) is the tie order of
/// last resort: fully tied candidates resolve to the earlier entry.
pub trait TouchableRegistry {
    /// Touchables the given probe should consider this frame.
    fn list(&self, probe: ProbeId) -> &[TouchableId];

    /// Looks up a touchable by handle.
    fn get(&self, id: TouchableId) -> Option<&Touchable>;
}

/// Arena of touchables visible to every probe.
#[derive(Debug, Default)]
pub struct TouchableSet {
    slots: Vec<Option<Touchable>>,
    order: Vec<TouchableId>,
}

impl TouchableSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `config` and registers a new touchable.
    ///
    /// Handles are never reused.
    pub fn register(
        &mut self,
        surface: SurfacePatch,
        config: TouchableConfig,
    ) -> FingertipResult<TouchableId> {
        let config = config.normalized()?;
        let id = TouchableId(self.slots.len() as u32);
        self.slots.push(Some(Touchable::new(id, surface, config)));
        self.order.push(id);
        tracing::debug!(touchable = id.0, "registered touchable");
        Ok(id)
    }

    /// Removes a touchable. Probes selecting it end the selection next frame.
    pub fn unregister(&mut self, id: TouchableId) -> Option<Touchable> {
        let touchable = self.slots.get_mut(id.index())?.take()?;
        self.order.retain(|&other| other != id);
        tracing::debug!(touchable = id.0, "unregistered touchable");
        Some(touchable)
    }

    /// Moves a touchable's surfaces.
    pub fn set_transform(&mut self, id: TouchableId, frame: SurfaceFrame) -> FingertipResult<()> {
        self.get_mut(id)?.surface_mut().set_transform(frame);
        Ok(())
    }

    /// Replaces a touchable's configuration (normalized first).
    pub fn set_config(&mut self, id: TouchableId, config: TouchableConfig) -> FingertipResult<()> {
        let config = config.normalized()?;
        self.get_mut(id)?.set_config(config);
        Ok(())
    }

    /// Registered handles in registration order.
    pub fn ids(&self) -> &[TouchableId] {
        &self.order
    }

    /// Number of registered touchables.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn get_mut(&mut self, id: TouchableId) -> FingertipResult<&mut Touchable> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(FingertipError::UnknownTouchable(id))
    }
}

impl TouchableRegistry for TouchableSet {
    fn list(&self, _probe: ProbeId) -> &[TouchableId] {
        &self.order
    }

    fn get(&self, id: TouchableId) -> Option<&Touchable> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }
}
