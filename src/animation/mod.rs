pub mod easing;
pub mod transition;

// Re-export commonly used types for convenience
pub use easing::EasingType;
pub use transition::{CameraTransition, TransitionKind};
