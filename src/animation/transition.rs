use crate::animation::easing::EasingType;
use crate::core::camera::CameraState;
use crate::traits::Lerp;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifies one camera transition on a surface.
///
/// Move-end events carry the id of the transition that finished so that a
/// listener waiting on a specific transition can ignore stale events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(pub u64);

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What started a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Ease,
    Pan,
}

/// An eased interpolation between two cameras, advanced by explicit time steps
#[derive(Debug, Clone)]
pub struct CameraTransition {
    pub id: TransitionId,
    pub kind: TransitionKind,
    from: CameraState,
    to: CameraState,
    duration: Duration,
    elapsed: Duration,
    easing: EasingType,
}

impl CameraTransition {
    pub fn new(
        id: TransitionId,
        kind: TransitionKind,
        from: CameraState,
        to: CameraState,
        duration: Duration,
        easing: EasingType,
    ) -> Self {
        Self {
            id,
            kind,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    pub fn target(&self) -> CameraState {
        self.to
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Moves the transition forward and returns the camera at the new time
    pub fn advance(&mut self, dt: Duration) -> CameraState {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.current()
    }

    pub fn current(&self) -> CameraState {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }
}
