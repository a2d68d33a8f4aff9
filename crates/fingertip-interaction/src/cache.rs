//! Per-frame surface query cache.
//!
//! Several resolution passes ask the same closest-point questions about
//! the same touchable within one frame. The cache answers each question
//! once per frame, keyed by touchable handle. Slots live in a dense arena
//! indexed by [`TouchableId`]; a new frame bumps a generation counter
//! instead of clearing anything, so steady-state frames do not allocate.

use fingertip_math::Vec3;
use fingertip_surface::SurfaceHit;
use fingertip_types::TouchableId;

use crate::touchable::Touchable;

#[derive(Debug, Clone, Copy, Default)]
struct CachedQuery {
    generation: u64,
    hit: Option<SurfaceHit>,
}

#[derive(Debug, Clone, Copy, Default)]
struct CacheSlot {
    patch: CachedQuery,
    backing: CachedQuery,
}

/// Closest-point results for the probe origin of the current frame.
#[derive(Debug)]
pub struct FrameHitCache {
    /// Never 0, so default slots always read as stale.
    generation: u64,
    origin: Vec3,
    slots: Vec<CacheSlot>,
}

impl FrameHitCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            generation: 1,
            origin: Vec3::ZERO,
            slots: Vec::new(),
        }
    }

    /// Invalidates every entry and keys the cache to `origin`.
    pub fn begin_frame(&mut self, origin: Vec3) {
        self.generation = self.generation.wrapping_add(1).max(1);
        self.origin = origin;
    }

    /// Probe origin the cached answers refer to.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Current generation counter.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Closest point on the touchable's patch surface to the cached origin.
    pub fn patch_hit(&mut self, touchable: &Touchable) -> Option<SurfaceHit> {
        let (generation, origin) = (self.generation, self.origin);
        let entry = &mut self.slot(touchable.id()).patch;
        if entry.generation != generation {
            entry.hit = touchable.surface().patch().closest_point(origin);
            entry.generation = generation;
        }
        entry.hit
    }

    /// Closest point on the touchable's backing surface to the cached origin.
    pub fn backing_hit(&mut self, touchable: &Touchable) -> Option<SurfaceHit> {
        let (generation, origin) = (self.generation, self.origin);
        let entry = &mut self.slot(touchable.id()).backing;
        if entry.generation != generation {
            entry.hit = touchable.surface().backing().closest_point(origin);
            entry.generation = generation;
        }
        entry.hit
    }

    fn slot(&mut self, id: TouchableId) -> &mut CacheSlot {
        let index = id.index();
        if index >= self.slots.len() {
            self.slots.resize(index + 1, CacheSlot::default());
        }
        &mut self.slots[index]
    }
}

impl Default for FrameHitCache {
    fn default() -> Self {
        Self::new()
    }
}
