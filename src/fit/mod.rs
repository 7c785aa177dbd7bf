//! Camera fitting: computing a camera for a box and sequencing its animation.

pub mod calculator;
pub mod orchestrator;

pub use calculator::{fit_camera, optimal_zoom, padding_offset, CameraFit};
pub use orchestrator::{FitOrchestrator, FitRequest, FitState};
