//! The per-probe interaction state machine.
//!
//! `Normal → Hover → Select` and back, driven once per host frame by
//! [`PokeInteractor::process`]. Every transition emits a [`PokeEvent`]
//! into the caller's [`EventSink`].

use serde::{Deserialize, Serialize};

use fingertip_math::{SurfaceTransform, Vec3};
use fingertip_surface::SurfaceHit;
use fingertip_telemetry::{EventKind, EventSink, PokeEvent, UnselectReason};
use fingertip_types::{FingertipResult, ProbeId, TouchableId};

use crate::clock::Clock;
use crate::config::ProbeConfig;
use crate::ranking::TiebreakerPolicy;
use crate::registry::TouchableRegistry;
use crate::resolver::CandidateResolver;
use crate::touchable::Touchable;
use crate::tracker::{TouchSample, TouchTracker};

/// Interaction state of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractorState {
    Disabled,
    Normal,
    Hover,
    Select,
}

/// A reported point on a touchable with its surface normal (world).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub point: Vec3,
    pub normal: Vec3,
}

impl TouchPoint {
    fn arrays(&self) -> ([f32; 3], [f32; 3]) {
        (self.point.to_array(), self.normal.to_array())
    }
}

/// Snapshot returned by every [`PokeInteractor::process`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub state: InteractorState,
    pub hovered: Option<TouchableId>,
    pub selected: Option<TouchableId>,
    /// Tracked touch point while selected, or the point resyncing towards
    /// the probe while recoiled.
    pub touch: Option<TouchPoint>,
    pub dragging: bool,
    pub recoiled: bool,
}

/// One poking probe.
pub struct PokeInteractor {
    id: ProbeId,
    config: ProbeConfig,
    resolver: CandidateResolver,
    tracker: TouchTracker,
    tiebreaker: Option<Box<dyn TiebreakerPolicy>>,

    state: InteractorState,
    hovered: Option<TouchableId>,
    hover_point: Option<TouchPoint>,
    selected: Option<TouchableId>,
    touch: Option<TouchPoint>,

    frame: u64,
    last_time: Option<f64>,
}

impl PokeInteractor {
    /// Creates an enabled probe after validating `config`.
    pub fn new(id: ProbeId, config: ProbeConfig) -> FingertipResult<Self> {
        let config = config.normalized()?;
        Ok(Self {
            id,
            resolver: CandidateResolver::new(id, config.clone()),
            config,
            tracker: TouchTracker::new(),
            tiebreaker: None,
            state: InteractorState::Normal,
            hovered: None,
            hover_point: None,
            selected: None,
            touch: None,
            frame: 0,
            last_time: None,
        })
    }

    /// Installs a host tie-break consulted before tiebreaker scores.
    pub fn with_tiebreaker(mut self, policy: Box<dyn TiebreakerPolicy>) -> Self {
        self.tiebreaker = Some(policy);
        self
    }

    pub fn id(&self) -> ProbeId {
        self.id
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn state(&self) -> InteractorState {
        self.state
    }

    pub fn hovered(&self) -> Option<TouchableId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<TouchableId> {
        self.selected
    }

    pub fn tracker(&self) -> &TouchTracker {
        &self.tracker
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances the probe by one frame with its origin at `origin`.
    pub fn process<R: TouchableRegistry + ?Sized>(
        &mut self,
        origin: Vec3,
        registry: &R,
        clock: &dyn Clock,
        sink: &mut dyn EventSink,
    ) -> FrameReport {
        self.frame += 1;
        if self.state == InteractorState::Disabled {
            return self.report();
        }

        let now = clock.now();
        let dt = match self.last_time {
            Some(last) if now > last => (now - last) as f32,
            _ => 0.0,
        };
        self.last_time = Some(now);
        self.resolver.begin_frame(origin);

        match self.state {
            InteractorState::Select => self.select_update(registry, now, dt, sink),
            InteractorState::Hover if self.resolver.recoil().is_some() => {
                self.recoil_update(registry, now, dt)
            }
            _ => {}
        }

        let candidate = self
            .resolver
            .compute_candidate(registry, self.tiebreaker.as_deref());

        if self.state != InteractorState::Select {
            self.update_hover(candidate, registry, sink);
            if self.state == InteractorState::Hover
                && self.resolver.pressed().is_some()
                && self.resolver.pressed() == self.hovered
            {
                self.select(registry, sink);
            }
        }

        self.resolver.end_frame(registry);
        self.report()
    }

    /// Ends any hover or selection and stops processing.
    pub fn disable(&mut self, sink: &mut dyn EventSink) {
        if self.state == InteractorState::Disabled {
            return;
        }
        if let Some(id) = self.selected {
            self.end_selection(id, UnselectReason::Removed, sink);
        }
        if let Some(id) = self.hovered.take() {
            self.emit_hover_exit(id, sink);
        }
        self.resolver.reset();
        self.tracker.end_recoil();
        self.touch = None;
        self.state = InteractorState::Disabled;
        tracing::debug!(probe = self.id.0, "interactor disabled");
    }

    /// Resumes processing; motion history starts fresh.
    pub fn enable(&mut self) {
        if self.state == InteractorState::Disabled {
            self.state = InteractorState::Normal;
            self.last_time = None;
            tracing::debug!(probe = self.id.0, "interactor enabled");
        }
    }

    fn report(&self) -> FrameReport {
        let selected = self.selected.is_some();
        let recoiled = self.resolver.recoil().is_some();
        FrameReport {
            frame: self.frame,
            state: self.state,
            hovered: self.hovered,
            selected: self.selected,
            touch: if selected || recoiled { self.touch } else { None },
            dragging: selected && self.tracker.is_dragging(),
            recoiled,
        }
    }

    fn emit(&self, kind: EventKind, sink: &mut dyn EventSink) {
        sink.handle(&PokeEvent::new(self.frame, self.id, kind));
    }

    fn sample(&self, touchable: &Touchable, backing: &SurfaceHit, depth: f32, now: f64, dt: f32) -> TouchSample {
        TouchSample {
            local_point: touchable.surface().transform().local_point(backing.point),
            depth,
            frame_delta: self.resolver.frame_delta(),
            normal: backing.normal,
            dt,
            now,
        }
    }

    fn tracked_point(&self, touchable: &Touchable, normal: Vec3) -> TouchPoint {
        TouchPoint {
            point: touchable.surface().transform().world_point(self.tracker.touch_point()),
            normal,
        }
    }

    fn select_update<R: TouchableRegistry + ?Sized>(
        &mut self,
        registry: &R,
        now: f64,
        dt: f32,
        sink: &mut dyn EventSink,
    ) {
        let Some(id) = self.selected else {
            self.state = InteractorState::Hover;
            return;
        };
        let Some(touchable) = registry.get(id) else {
            self.resolver.set_pressed(None);
            self.resolver.set_recoil(None);
            self.end_selection(id, UnselectReason::Removed, sink);
            return;
        };
        let Some(backing) = self.resolver.backing_hit(touchable) else {
            self.resolver.set_pressed(None);
            self.end_selection(id, UnselectReason::Released, sink);
            return;
        };

        let above = (self.resolver.current_origin() - backing.point).dot(backing.normal);
        let clearance = above - self.config.radius;
        if clearance > self.config.touch_release_threshold {
            self.resolver.set_pressed(None);
            self.end_selection(id, UnselectReason::Released, sink);
            return;
        }

        let depth = (-clearance).max(0.0);
        let sample = self.sample(touchable, &backing, depth, now, dt);
        let config = touchable.config();
        self.tracker.track(&sample, config, touchable.surface().transform());
        self.touch = Some(self.tracked_point(touchable, backing.normal));

        if self.should_cancel(touchable, depth, backing.normal) {
            self.resolver.set_pressed(None);
            self.resolver.lock_out(id);
            let (point, normal) = self.touch.map(|t| t.arrays()).unwrap_or_default();
            self.emit(EventKind::Cancel { touchable: id, point, normal }, sink);
            self.selected = None;
            self.touch = None;
            self.state = InteractorState::Hover;
            tracing::debug!(probe = self.id.0, touchable = id.0, depth, "select cancelled");
            return;
        }

        if self.tracker.should_recoil(&sample, config) {
            self.resolver.set_pressed(None);
            self.resolver.set_recoil(Some(id));
            self.tracker.begin_recoil(depth, config, now);
            let touch = self.touch;
            self.end_selection(id, UnselectReason::Recoiled, sink);
            self.touch = touch;
        }
    }

    fn should_cancel(&mut self, touchable: &Touchable, depth: f32, normal: Vec3) -> bool {
        let config = touchable.config();
        if config.cancel_select_normal > 0.0 && depth > config.cancel_select_normal {
            return true;
        }
        config.cancel_select_tangent > 0.0
            && self
                .resolver
                .tangent_distance(touchable, normal)
                .is_some_and(|tangent| tangent > config.cancel_select_tangent)
    }

    fn recoil_update<R: TouchableRegistry + ?Sized>(&mut self, registry: &R, now: f64, dt: f32) {
        let Some(id) = self.resolver.recoil() else { return };
        let hit = registry
            .get(id)
            .and_then(|touchable| Some((touchable, self.resolver.backing_hit(touchable)?)));
        let Some((touchable, backing)) = hit else {
            self.resolver.set_recoil(None);
            self.tracker.end_recoil();
            self.touch = None;
            return;
        };

        let clearance = (self.resolver.current_origin() - backing.point).dot(backing.normal)
            - self.config.radius;
        if clearance > self.config.touch_release_threshold {
            self.resolver.set_recoil(None);
            self.tracker.end_recoil();
            self.touch = None;
            tracing::debug!(probe = self.id.0, touchable = id.0, "recoil ended by release");
            return;
        }

        let depth = (-clearance).max(0.0);
        let sample = self.sample(touchable, &backing, depth, now, dt);
        self.tracker.track(&sample, touchable.config(), touchable.surface().transform());
        self.touch = Some(self.tracked_point(touchable, backing.normal));

        if self.tracker.should_reenter(depth) {
            self.tracker.end_recoil();
            self.touch = None;
            self.resolver.set_recoil(None);
            self.resolver.set_pressed(Some(id));
            tracing::debug!(probe = self.id.0, touchable = id.0, depth, "recoil re-entered");
        }
    }

    fn select<R: TouchableRegistry + ?Sized>(&mut self, registry: &R, sink: &mut dyn EventSink) {
        let Some(id) = self.resolver.pressed() else { return };
        let Some(touchable) = registry.get(id) else {
            self.resolver.set_pressed(None);
            return;
        };

        let contact = match self.resolver.take_pressed_hit() {
            Some(hit) if hit.touchable == id => Some((hit.point, hit.normal)),
            _ => self.resolver.backing_hit(touchable).map(|hit| (hit.point, hit.normal)),
        };
        let Some((point, normal)) = contact else {
            self.resolver.set_pressed(None);
            return;
        };

        let depth = self.resolver.clearance(touchable).map_or(0.0, |c| (-c).max(0.0));
        let local = touchable.surface().transform().local_point(point);
        self.tracker.begin(local, depth, touchable.config());

        self.selected = Some(id);
        self.state = InteractorState::Select;
        let touch = TouchPoint { point, normal };
        self.touch = Some(touch);
        let (point, normal) = touch.arrays();
        self.emit(EventKind::Select { touchable: id, point, normal }, sink);
        tracing::debug!(probe = self.id.0, touchable = id.0, "select");
    }

    fn end_selection(&mut self, id: TouchableId, reason: UnselectReason, sink: &mut dyn EventSink) {
        let (point, normal) = self.touch.map(|t| t.arrays()).unwrap_or_default();
        self.emit(EventKind::Unselect { touchable: id, point, normal, reason }, sink);
        self.selected = None;
        self.touch = None;
        self.state = InteractorState::Hover;
        tracing::debug!(probe = self.id.0, touchable = id.0, ?reason, "unselect");
    }

    fn update_hover<R: TouchableRegistry + ?Sized>(
        &mut self,
        candidate: Option<TouchableId>,
        registry: &R,
        sink: &mut dyn EventSink,
    ) {
        if candidate != self.hovered {
            if let Some(old) = self.hovered.take() {
                self.emit_hover_exit(old, sink);
            }
            self.hovered = candidate;
            if let Some(id) = candidate {
                self.hover_point = self.hover_geometry(id, registry);
                let (point, normal) = self.hover_point.map(|t| t.arrays()).unwrap_or_default();
                self.emit(EventKind::HoverEnter { touchable: id, point, normal }, sink);
                tracing::trace!(probe = self.id.0, touchable = id.0, "hover enter");
            }
        } else if let Some(id) = candidate {
            self.hover_point = self.hover_geometry(id, registry).or(self.hover_point);
        }

        self.state = if self.hovered.is_some() {
            InteractorState::Hover
        } else {
            InteractorState::Normal
        };
    }

    fn emit_hover_exit(&mut self, id: TouchableId, sink: &mut dyn EventSink) {
        let (point, normal) = self.hover_point.take().map(|t| t.arrays()).unwrap_or_default();
        self.emit(EventKind::HoverExit { touchable: id, point, normal }, sink);
        tracing::trace!(probe = self.id.0, touchable = id.0, "hover exit");
    }

    fn hover_geometry<R: TouchableRegistry + ?Sized>(&mut self, id: TouchableId, registry: &R) -> Option<TouchPoint> {
        let touchable = registry.get(id)?;
        let patch = self.resolver.patch_hit(touchable)?;
        let backing = self.resolver.backing_hit(touchable)?;
        Some(TouchPoint {
            point: patch.point,
            normal: backing.normal,
        })
    }
}
