//! Scrub-bar interaction state.
//!
//! The bar keeps the *unclamped* normalized position for events and clamps
//! only when producing the painted fill offset.

use crate::progress::TrackGeometry;

/// Scale the bar eases toward while the pointer is outside it.
pub const REST_SCALE: f32 = 1.0;

/// Scale the bar eases toward while hovered.
pub const HOVER_SCALE: f32 = 1.5;

/// Ease rate per second.
const EASE_RATE: f32 = 12.0;

/// Distance from the target at which the animation snaps and stops.
const SNAP_THRESHOLD: f32 = 0.01;

/// Direction of an in-flight hover animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverPhase {
    #[default]
    Idle,
    Growing,
    Shrinking,
}

/// Exponential ease toward a target scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverAnimation {
    pub scale: f32,
    pub phase: HoverPhase,
    pub rest: f32,
    pub hover: f32,
    pub rate: f32,
    pub threshold: f32,
}

impl Default for HoverAnimation {
    fn default() -> Self {
        Self {
            scale: REST_SCALE,
            phase: HoverPhase::Idle,
            rest: REST_SCALE,
            hover: HOVER_SCALE,
            rate: EASE_RATE,
            threshold: SNAP_THRESHOLD,
        }
    }
}

impl HoverAnimation {
    pub fn grow(&mut self) {
        self.phase = HoverPhase::Growing;
    }

    pub fn shrink(&mut self) {
        self.phase = HoverPhase::Shrinking;
    }

    pub fn is_animating(&self) -> bool {
        self.phase != HoverPhase::Idle
    }

    fn target(&self) -> Option<f32> {
        match self.phase {
            HoverPhase::Idle => None,
            HoverPhase::Growing => Some(self.hover),
            HoverPhase::Shrinking => Some(self.rest),
        }
    }

    /// Advance by `dt` seconds. Returns the current scale.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let Some(target) = self.target() else {
            return self.scale;
        };

        let t = 1.0 - (-self.rate * dt.max(0.0)).exp();
        self.scale += (target - self.scale) * t;

        if (target - self.scale).abs() <= self.threshold {
            self.scale = target;
            self.phase = HoverPhase::Idle;
        }

        self.scale
    }
}

/// Emitted by pointer interaction; carries the unclamped position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrubEvent {
    /// Drag started at this position
    Begin(f32),
    /// Pointer moved while dragging
    Move(f32),
    /// Drag released; the host should seek here
    Commit(f32),
}

impl ScrubEvent {
    pub fn position(&self) -> f32 {
        match *self {
            ScrubEvent::Begin(p) | ScrubEvent::Move(p) | ScrubEvent::Commit(p) => p,
        }
    }
}

/// Progress bar with pointer scrubbing and hover animation.
#[derive(Clone, Debug)]
pub struct ScrubBar {
    pub track: TrackGeometry,
    position: f32,
    dragging: bool,
    pub hover: HoverAnimation,
}

impl ScrubBar {
    pub fn new(track: TrackGeometry) -> Self {
        Self {
            track,
            position: 0.0,
            dragging: false,
            hover: HoverAnimation::default(),
        }
    }

    /// Current normalized position (unclamped).
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self, pointer_x: Option<f32>) -> ScrubEvent {
        self.dragging = true;
        self.position = self.track.normalize(pointer_x);
        ScrubEvent::Begin(self.position)
    }

    /// Ignored unless a drag is in progress.
    pub fn pointer_drag(&mut self, pointer_x: Option<f32>) -> Option<ScrubEvent> {
        if !self.dragging {
            return None;
        }
        self.position = self.track.normalize(pointer_x);
        Some(ScrubEvent::Move(self.position))
    }

    /// Ignored unless a drag is in progress.
    pub fn pointer_up(&mut self, pointer_x: Option<f32>) -> Option<ScrubEvent> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        self.position = self.track.normalize(pointer_x);
        tracing::debug!(position = self.position, "scrub committed");
        Some(ScrubEvent::Commit(self.position))
    }

    pub fn pointer_enter(&mut self) {
        self.hover.grow();
    }

    pub fn pointer_leave(&mut self) {
        self.hover.shrink();
    }

    /// Follow playback. Skipped while the user is dragging.
    pub fn sync(&mut self, fraction: f32) {
        if !self.dragging {
            self.position = fraction;
        }
    }

    /// Per-frame visual update; returns the hover scale.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.hover.tick(dt)
    }

    /// Unclamped fill inset.
    pub fn fill_offset(&self) -> f32 {
        self.track.fill_offset(self.position)
    }

    /// Fill inset to paint, clamped to the bar.
    pub fn painted_offset(&self) -> f32 {
        self.track.painted_offset(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> ScrubBar {
        ScrubBar::new(TrackGeometry::new(0.0, 200.0))
    }

    #[test]
    fn drag_emits_unclamped_positions() {
        let mut bar = bar();

        assert_eq!(bar.pointer_down(Some(50.0)), ScrubEvent::Begin(0.25));
        assert_eq!(bar.pointer_drag(Some(300.0)), Some(ScrubEvent::Move(1.5)));
        assert_eq!(bar.fill_offset(), 100.0);
        assert_eq!(bar.painted_offset(), 0.0);
        assert_eq!(bar.pointer_up(Some(100.0)), Some(ScrubEvent::Commit(0.5)));
        assert!(!bar.is_dragging());
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut bar = bar();

        assert_eq!(bar.pointer_drag(Some(100.0)), None);
        assert_eq!(bar.pointer_up(Some(100.0)), None);
        assert_eq!(bar.position(), 0.0);
    }

    #[test]
    fn unresolved_pointer_scrubs_to_start() {
        let mut bar = bar();
        bar.sync(0.8);

        assert_eq!(bar.pointer_down(None), ScrubEvent::Begin(0.0));
    }

    #[test]
    fn playback_sync_paused_while_dragging() {
        let mut bar = bar();
        bar.sync(0.4);
        assert_eq!(bar.position(), 0.4);

        bar.pointer_down(Some(20.0));
        bar.sync(0.9);
        assert_eq!(bar.position(), 0.1);
    }

    #[test]
    fn hover_grows_then_snaps_to_target() {
        let mut anim = HoverAnimation::default();
        anim.grow();

        let first = anim.tick(1.0 / 60.0);
        assert!(first > REST_SCALE && first < HOVER_SCALE);

        for _ in 0..120 {
            anim.tick(1.0 / 60.0);
        }

        assert_eq!(anim.scale, HOVER_SCALE);
        assert!(!anim.is_animating());
    }

    #[test]
    fn hover_shrink_returns_to_rest() {
        let mut bar = bar();
        bar.pointer_enter();
        for _ in 0..120 {
            bar.tick(1.0 / 60.0);
        }

        bar.pointer_leave();
        for _ in 0..120 {
            bar.tick(1.0 / 60.0);
        }

        assert_eq!(bar.hover.scale, REST_SCALE);
        assert_eq!(bar.hover.phase, HoverPhase::Idle);
    }

    #[test]
    fn idle_animation_does_not_move() {
        let mut anim = HoverAnimation::default();
        assert_eq!(anim.tick(1.0), REST_SCALE);
    }
}
