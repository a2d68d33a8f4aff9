//! Candidate resolution.
//!
//! Each frame the resolver decides which touchable (if any) a probe
//! interacts with. Priority order:
//! 1. A touchable in recoil keeps the probe (hover, no select)
//! 2. A pressed touchable keeps the probe
//! 3. The best touchable the probe's sphere swept into this frame
//! 4. The best touchable within hover range
//!
//! Motion is measured per touchable from the previous probe origin
//! re-expressed through the touchable's current transform. Motion is
//! relative: a surface pushed into a still probe presses just like a probe
//! pushed into a still surface, while a probe riding along with its surface
//! does not move at all.

use fingertip_math::vector::project_on_plane;
use fingertip_math::{Ray, SurfaceTransform, Vec3};
use fingertip_surface::SurfaceHit;
use fingertip_types::constants::EPSILON;
use fingertip_types::{ProbeId, TouchableId};

use crate::cache::FrameHitCache;
use crate::config::ProbeConfig;
use crate::ranking::{CandidateRanking, TiebreakerPolicy};
use crate::registry::TouchableRegistry;
use crate::touchable::Touchable;

/// Where a swept probe first met a touchable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectHit {
    pub touchable: TouchableId,
    /// Contact point on the backing surface (world).
    pub point: Vec3,
    /// Backing normal (world).
    pub normal: Vec3,
    /// Distance from the sphere's leading point to the contact, along the normal.
    pub normal_distance: f32,
}

/// Per-probe resolution state.
#[derive(Debug)]
pub struct CandidateResolver {
    probe: ProbeId,
    config: ProbeConfig,
    cache: FrameHitCache,

    current_origin: Vec3,
    previous_origin: Vec3,
    has_previous: bool,
    /// Previous origin in each touchable's local space, by touchable index.
    previous_local: Vec<Option<Vec3>>,

    previous_candidate: Option<TouchableId>,
    pressed: Option<TouchableId>,
    pressed_hit: Option<SelectHit>,
    recoil: Option<TouchableId>,
    /// Cancelled touchable that may not be selected until the probe lifts off.
    locked_out: Option<TouchableId>,

    /// Scratch list of touchables that qualified in the select pass.
    qualified: Vec<TouchableId>,
}

impl CandidateResolver {
    pub fn new(probe: ProbeId, config: ProbeConfig) -> Self {
        Self {
            probe,
            config,
            cache: FrameHitCache::new(),
            current_origin: Vec3::ZERO,
            previous_origin: Vec3::ZERO,
            has_previous: false,
            previous_local: Vec::new(),
            previous_candidate: None,
            pressed: None,
            pressed_hit: None,
            recoil: None,
            locked_out: None,
            qualified: Vec::new(),
        }
    }

    /// Forgets motion history and all candidates.
    pub fn reset(&mut self) {
        self.has_previous = false;
        self.previous_local.iter_mut().for_each(|slot| *slot = None);
        self.previous_candidate = None;
        self.pressed = None;
        self.pressed_hit = None;
        self.recoil = None;
        self.locked_out = None;
    }

    /// Starts a frame at `origin`.
    pub fn begin_frame(&mut self, origin: Vec3) {
        self.previous_origin = if self.has_previous { self.current_origin } else { origin };
        self.has_previous = true;
        self.current_origin = origin;
        self.cache.begin_frame(origin);
    }

    /// Records the current origin in every touchable's local space.
    pub fn end_frame<R: TouchableRegistry + ?Sized>(&mut self, registry: &R) {
        for &id in registry.list(self.probe) {
            let Some(touchable) = registry.get(id) else { continue };
            let index = id.index();
            if index >= self.previous_local.len() {
                self.previous_local.resize(index + 1, None);
            }
            self.previous_local[index] =
                Some(touchable.surface().transform().local_point(self.current_origin));
        }
    }

    pub fn probe(&self) -> ProbeId {
        self.probe
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn current_origin(&self) -> Vec3 {
        self.current_origin
    }

    pub fn previous_origin(&self) -> Vec3 {
        self.previous_origin
    }

    /// Probe motion since the previous frame (world).
    pub fn frame_delta(&self) -> Vec3 {
        self.current_origin - self.previous_origin
    }

    pub fn pressed(&self) -> Option<TouchableId> {
        self.pressed
    }

    pub fn set_pressed(&mut self, pressed: Option<TouchableId>) {
        self.pressed = pressed;
        if pressed.is_none() {
            self.pressed_hit = None;
        }
    }

    /// Takes the contact recorded when the current press was detected.
    pub fn take_pressed_hit(&mut self) -> Option<SelectHit> {
        self.pressed_hit.take()
    }

    pub fn recoil(&self) -> Option<TouchableId> {
        self.recoil
    }

    pub fn set_recoil(&mut self, recoil: Option<TouchableId>) {
        self.recoil = recoil;
    }

    /// Blocks `id` from selection until the probe clears its release threshold.
    pub fn lock_out(&mut self, id: TouchableId) {
        self.locked_out = Some(id);
    }

    pub fn locked_out(&self) -> Option<TouchableId> {
        self.locked_out
    }

    /// Cached closest backing point to the current origin.
    pub fn backing_hit(&mut self, touchable: &Touchable) -> Option<SurfaceHit> {
        self.cache.backing_hit(touchable)
    }

    /// Cached closest patch point to the current origin.
    pub fn patch_hit(&mut self, touchable: &Touchable) -> Option<SurfaceHit> {
        self.cache.patch_hit(touchable)
    }

    /// Signed distance from the backing surface to the sphere's surface.
    pub fn clearance(&mut self, touchable: &Touchable) -> Option<f32> {
        let backing = self.cache.backing_hit(touchable)?;
        Some((self.current_origin - backing.point).dot(backing.normal) - self.config.radius)
    }

    /// Lateral distance of the current origin from the patch, in the plane of `normal`.
    pub fn tangent_distance(&mut self, touchable: &Touchable, normal: Vec3) -> Option<f32> {
        let patch = self.cache.patch_hit(touchable)?;
        Some(project_on_plane(self.current_origin - patch.point, normal).length())
    }

    /// Previous origin carried along with the touchable's motion.
    pub fn adjusted_previous_origin(&self, touchable: &Touchable) -> Vec3 {
        match self.previous_local.get(touchable.id().index()).copied().flatten() {
            Some(local) => touchable.surface().transform().world_point(local),
            None => self.previous_origin,
        }
    }

    fn was_candidate(&self, id: TouchableId) -> bool {
        self.previous_candidate == Some(id)
    }

    /// Minimum-clearance gate for entering hover.
    fn passes_enter_hover_check(&self, touchable: &Touchable, distance_above: f32) -> bool {
        if self.was_candidate(touchable.id()) {
            return true;
        }
        let min_thresholds = &touchable.config().min_thresholds;
        let min_normal = if min_thresholds.enabled { min_thresholds.min_normal } else { 0.0 };
        distance_above > min_normal
    }

    /// Cheap reach test against the patch before any detailed query.
    fn in_range(&self, touchable: &Touchable) -> bool {
        let previous = self.adjusted_previous_origin(touchable);
        let Some(hit) = touchable.surface().patch().closest_point(previous) else {
            return false;
        };
        let travel = (self.current_origin - previous).length();
        let (hover_normal, hover_tangent) = touchable
            .config()
            .hover_thresholds(self.was_candidate(touchable.id()));
        let reach = travel
            + self.config.radius
            + hover_normal.max(hover_tangent)
            + touchable.close_distance_threshold()
            + self.config.equal_distance_threshold;
        hit.distance <= reach
    }

    fn refresh_lockout<R: TouchableRegistry + ?Sized>(&mut self, registry: &R) {
        let Some(id) = self.locked_out else { return };
        let released = match registry.get(id) {
            Some(touchable) => self
                .clearance(touchable)
                .map_or(true, |clearance| clearance > self.config.touch_release_threshold),
            None => true,
        };
        if released {
            tracing::trace!(touchable = id.0, "cancel lockout cleared");
            self.locked_out = None;
        }
    }

    /// Resolves this frame's candidate and updates the pressed state.
    pub fn compute_candidate<R: TouchableRegistry + ?Sized>(
        &mut self,
        registry: &R,
        policy: Option<&dyn TiebreakerPolicy>,
    ) -> Option<TouchableId> {
        let candidate = if let Some(id) = self.recoil {
            Some(id)
        } else if let Some(id) = self.pressed {
            Some(id)
        } else {
            self.refresh_lockout(registry);
            match self.select_candidate(registry, policy) {
                Some(hit) => {
                    self.pressed = Some(hit.touchable);
                    self.pressed_hit = Some(hit);
                    Some(hit.touchable)
                }
                None => self.hover_candidate(registry, policy),
            }
        };
        self.previous_candidate = candidate;
        candidate
    }

    /// Finds the touchable whose backing surface the sphere met first this frame.
    ///
    /// Returns `None` when a non-qualifying touchable lies at or just past the
    /// winner's contact depth; the press is deferred to a later frame.
    fn select_candidate<R: TouchableRegistry + ?Sized>(
        &mut self,
        registry: &R,
        policy: Option<&dyn TiebreakerPolicy>,
    ) -> Option<SelectHit> {
        let mut ranking = CandidateRanking::new(policy);
        let mut winner: Option<SelectHit> = None;
        let radius = self.config.radius;
        self.qualified.clear();

        for &id in registry.list(self.probe) {
            if self.locked_out == Some(id) {
                continue;
            }
            let Some(touchable) = registry.get(id) else { continue };
            if !self.in_range(touchable) {
                continue;
            }

            let previous = self.adjusted_previous_origin(touchable);
            let backing_surface = touchable.surface().backing();
            let Some(previous_hit) = backing_surface.closest_point(previous) else { continue };
            let previous_above = (previous - previous_hit.point).dot(previous_hit.normal);
            if !self.passes_enter_hover_check(touchable, previous_above) {
                continue;
            }

            let Some(backing) = self.cache.backing_hit(touchable) else { continue };
            let normal = backing.normal;
            let Some((motion, travel)) = Ray::between(previous, self.current_origin) else {
                continue;
            };
            if motion.direction.dot(normal) >= 0.0 {
                continue;
            }

            let leading = previous - normal * radius;
            let contact = match backing_surface.raycast(&Ray::new(leading, motion.direction), travel) {
                Some(hit) => hit.point,
                None => {
                    let clearance = (self.current_origin - backing.point).dot(normal) - radius;
                    if clearance > 0.0 {
                        continue;
                    }
                    backing.point
                }
            };

            let Some(tangent) = self.tangent_distance(touchable, normal) else { continue };
            let (_, hover_tangent) = touchable.config().hover_thresholds(self.was_candidate(id));
            if tangent > hover_tangent + EPSILON {
                continue;
            }

            let normal_distance = (leading - contact).dot(normal);
            self.qualified.push(id);
            if ranking.consider(touchable, normal_distance, tangent) {
                winner = Some(SelectHit {
                    touchable: id,
                    point: contact,
                    normal,
                    normal_distance,
                });
            }
        }

        let winner = winner?;

        for &id in registry.list(self.probe) {
            if id == winner.touchable || self.locked_out == Some(id) || self.qualified.contains(&id) {
                continue;
            }
            let Some(touchable) = registry.get(id) else { continue };
            if !self.in_range(touchable) {
                continue;
            }
            let Some(backing) = self.cache.backing_hit(touchable) else { continue };
            let Some(tangent) = self.tangent_distance(touchable, backing.normal) else { continue };
            let (_, hover_tangent) = touchable.config().hover_thresholds(self.was_candidate(id));
            if tangent > hover_tangent + EPSILON {
                continue;
            }
            let leading = self.adjusted_previous_origin(touchable) - backing.normal * radius;
            let ahead = (leading - backing.point).dot(backing.normal);
            if ahead >= 0.0 && ahead <= winner.normal_distance + touchable.close_distance_threshold() {
                tracing::trace!(
                    winner = winner.touchable.0,
                    blocker = id.0,
                    "press deferred, nearer surface not yet reached"
                );
                return None;
            }
        }

        Some(winner)
    }

    /// Finds the best touchable within hover range of the current origin.
    fn hover_candidate<R: TouchableRegistry + ?Sized>(
        &mut self,
        registry: &R,
        policy: Option<&dyn TiebreakerPolicy>,
    ) -> Option<TouchableId> {
        let mut ranking = CandidateRanking::new(policy);
        for &id in registry.list(self.probe) {
            let Some(touchable) = registry.get(id) else { continue };
            if !self.in_range(touchable) {
                continue;
            }
            let Some(backing) = self.cache.backing_hit(touchable) else { continue };
            let above = (self.current_origin - backing.point).dot(backing.normal);
            if !self.passes_enter_hover_check(touchable, above) {
                continue;
            }
            let Some(tangent) = self.tangent_distance(touchable, backing.normal) else { continue };
            let clearance = above - self.config.radius;
            let (hover_normal, hover_tangent) =
                touchable.config().hover_thresholds(self.was_candidate(id));
            if clearance > hover_normal || tangent > hover_tangent + EPSILON {
                continue;
            }
            ranking.consider(touchable, clearance, tangent);
        }
        ranking.best().map(|best| best.id)
    }
}
