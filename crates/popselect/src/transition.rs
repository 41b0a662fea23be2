//! Open/close transitions for the choice panel.
//!
//! The chooser does not animate anything itself. When the panel opens or
//! closes it records a [`Transition`] and announces a [`TransitionRequest`]
//! through the chooser's `transition_started` signal; the UI layer drives
//! the actual fade or slide. Nothing waits for a transition to finish, and a
//! new transition simply replaces the one in flight.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use crate::config::Effect;

/// Whether a transition reveals or hides the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// The panel is being revealed.
    Show,
    /// The panel is being hidden.
    Hide,
}

/// What the UI layer is asked to animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    /// The visual effect, or `None` for an immediate switch.
    pub effect: Option<Effect>,
    /// Reveal or hide.
    pub direction: TransitionDirection,
    /// How long the effect runs.
    pub duration: Duration,
}

impl TransitionRequest {
    /// Whether the request switches visibility without animating.
    pub fn is_immediate(&self) -> bool {
        self.effect.is_none() || self.duration.is_zero()
    }
}

/// Current state of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionState {
    /// No transition in progress.
    #[default]
    Idle,
    /// Transition is running.
    Running {
        /// Eased progress from 0.0 to 1.0.
        progress: f32,
    },
}

impl TransitionState {
    /// Check if a transition is currently in progress.
    pub fn is_running(&self) -> bool {
        matches!(self, TransitionState::Running { .. })
    }
}

/// The "swing" easing curve: slow at both ends, fastest in the middle.
#[inline]
pub fn swing(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    0.5 - (t * PI).cos() / 2.0
}

/// A panel visibility transition.
#[derive(Debug, Clone)]
pub struct Transition {
    request: TransitionRequest,
    /// When the transition started.
    start_time: Instant,
}

impl Transition {
    /// Start an animated transition now.
    pub fn animated(effect: Effect, direction: TransitionDirection, duration: Duration) -> Self {
        Self::started_at(
            TransitionRequest {
                effect: Some(effect),
                direction,
                duration,
            },
            Instant::now(),
        )
    }

    /// An immediate, unanimated visibility switch.
    pub fn immediate(direction: TransitionDirection) -> Self {
        Self::started_at(
            TransitionRequest {
                effect: None,
                direction,
                duration: Duration::ZERO,
            },
            Instant::now(),
        )
    }

    /// Start a transition from a request at an explicit instant.
    pub fn started_at(request: TransitionRequest, start_time: Instant) -> Self {
        Self {
            request,
            start_time,
        }
    }

    /// The request this transition fulfils.
    #[inline]
    pub fn request(&self) -> TransitionRequest {
        self.request
    }

    /// Reveal or hide.
    #[inline]
    pub fn direction(&self) -> TransitionDirection {
        self.request.direction
    }

    /// The visual effect, or `None` for an immediate switch.
    #[inline]
    pub fn effect(&self) -> Option<Effect> {
        self.request.effect
    }

    /// Linear progress at `now`, from 0.0 to 1.0.
    pub fn raw_progress_at(&self, now: Instant) -> f32 {
        if self.request.is_immediate() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.request.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress at `now`.
    pub fn progress_at(&self, now: Instant) -> f32 {
        swing(self.raw_progress_at(now))
    }

    /// The transition state at `now`.
    pub fn state_at(&self, now: Instant) -> TransitionState {
        let raw = self.raw_progress_at(now);
        if raw >= 1.0 {
            TransitionState::Idle
        } else {
            TransitionState::Running {
                progress: swing(raw),
            }
        }
    }

    /// The transition state right now.
    pub fn state(&self) -> TransitionState {
        self.state_at(Instant::now())
    }

    /// Check if the transition is still in flight.
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Panel opacity at `now`. Only fades change opacity.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let progress = self.progress_at(now);
        match (self.request.effect, self.request.direction) {
            (Some(Effect::Fade), TransitionDirection::Show) => progress,
            (Some(Effect::Fade), TransitionDirection::Hide) => 1.0 - progress,
            (_, TransitionDirection::Show) => 1.0,
            (_, TransitionDirection::Hide) => {
                if self.raw_progress_at(now) >= 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    /// Visible panel height at `now`. Only slides change height.
    pub fn visible_height_at(&self, now: Instant, full_height: f32) -> f32 {
        let progress = self.progress_at(now);
        match (self.request.effect, self.request.direction) {
            (Some(Effect::Slide), TransitionDirection::Show) => full_height * progress,
            (Some(Effect::Slide), TransitionDirection::Hide) => full_height * (1.0 - progress),
            (_, TransitionDirection::Show) => full_height,
            (_, TransitionDirection::Hide) => {
                if self.raw_progress_at(now) >= 1.0 {
                    0.0
                } else {
                    full_height
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(effect: Option<Effect>, direction: TransitionDirection) -> TransitionRequest {
        TransitionRequest {
            effect,
            direction,
            duration: Duration::from_millis(400),
        }
    }

    #[test]
    fn test_swing_endpoints() {
        assert_eq!(swing(0.0), 0.0);
        assert!((swing(0.5) - 0.5).abs() < 1e-6);
        assert!((swing(1.0) - 1.0).abs() < 1e-6);
        assert!(swing(0.25) < 0.25);
    }

    #[test]
    fn test_immediate_transition_is_done() {
        let t = Transition::immediate(TransitionDirection::Hide);
        assert!(t.request().is_immediate());
        assert!(!t.is_running());
        assert_eq!(t.raw_progress_at(Instant::now()), 1.0);
    }

    #[test]
    fn test_progress_over_time() {
        let start = Instant::now();
        let t = Transition::started_at(
            request(Some(Effect::Slide), TransitionDirection::Show),
            start,
        );

        assert_eq!(t.raw_progress_at(start), 0.0);
        let half = t.raw_progress_at(start + Duration::from_millis(200));
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(t.raw_progress_at(start + Duration::from_secs(1)), 1.0);

        assert!(t.state_at(start + Duration::from_millis(100)).is_running());
        assert_eq!(
            t.state_at(start + Duration::from_millis(400)),
            TransitionState::Idle
        );
    }

    #[test]
    fn test_fade_opacity() {
        let start = Instant::now();
        let show = Transition::started_at(
            request(Some(Effect::Fade), TransitionDirection::Show),
            start,
        );
        assert_eq!(show.opacity_at(start), 0.0);
        assert!((show.opacity_at(start + Duration::from_millis(400)) - 1.0).abs() < 1e-6);

        let hide = Transition::started_at(
            request(Some(Effect::Fade), TransitionDirection::Hide),
            start,
        );
        assert_eq!(hide.opacity_at(start), 1.0);
        assert!(hide.opacity_at(start + Duration::from_millis(400)).abs() < 1e-6);
    }

    #[test]
    fn test_slide_height() {
        let start = Instant::now();
        let show = Transition::started_at(
            request(Some(Effect::Slide), TransitionDirection::Show),
            start,
        );
        assert_eq!(show.visible_height_at(start, 120.0), 0.0);
        assert!((show.visible_height_at(start + Duration::from_millis(200), 120.0) - 60.0).abs() < 1e-3);
        // Slides never touch opacity
        assert_eq!(show.opacity_at(start), 1.0);
    }

    #[test]
    fn test_immediate_hide_geometry() {
        let t = Transition::immediate(TransitionDirection::Hide);
        let now = Instant::now();
        assert_eq!(t.opacity_at(now), 0.0);
        assert_eq!(t.visible_height_at(now, 100.0), 0.0);
    }
}
