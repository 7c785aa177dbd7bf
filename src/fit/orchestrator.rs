use crate::animation::transition::TransitionId;
use crate::core::camera::Padding;
use crate::core::config::FitOptions;
use crate::core::geo::{LatLngBounds, Point};
use crate::events::MapEvent;
use crate::fit::calculator::{fit_camera, CameraFit};
use crate::surface::RenderSurface;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Progress of the current fit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum FitState {
    #[default]
    Idle,
    /// Cancelling whatever the surface is animating
    Stopping,
    /// Computing the camera
    Fitting,
    /// Primary ease running; `offset` is panned once it ends
    Animating {
        transition: TransitionId,
        offset: Option<Point>,
    },
    /// Primary ease finished
    Settled { offset: Option<Point> },
    /// Padding pan running
    Panning { transition: TransitionId },
}

impl FitState {
    pub fn name(&self) -> &'static str {
        match self {
            FitState::Idle => "idle",
            FitState::Stopping => "stopping",
            FitState::Fitting => "fitting",
            FitState::Animating { .. } => "animating",
            FitState::Settled { .. } => "settled",
            FitState::Panning { .. } => "panning",
        }
    }

    /// Whether moving to `next` is allowed. Any state may be interrupted by a
    /// new request, which always starts with `Stopping`.
    pub fn can_transition_to(&self, next: &FitState) -> bool {
        use FitState::*;
        matches!(
            (self, next),
            (_, Stopping)
                | (Stopping, Fitting)
                | (Fitting, Animating { .. })
                | (Animating { .. }, Settled { .. })
                | (Settled { offset: Some(_) }, Panning { .. })
                | (Settled { offset: None }, Idle)
                | (Panning { .. }, Idle)
        )
    }
}

/// Everything one fit needs besides the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitRequest {
    pub bounds: LatLngBounds,
    pub padding: Padding,
    pub pitch: f64,
    pub bearing: f64,
}

/// Sequences a fit on a surface: stop, compute, ease, then pan off the
/// padding offset once the ease has ended.
///
/// Completion is observed through [`FitOrchestrator::handle_event`]; the
/// orchestrator never polls the surface. A new request supersedes any fit in
/// flight.
#[derive(Debug, Default)]
pub struct FitOrchestrator {
    options: FitOptions,
    state: FitState,
    last_fit: Option<CameraFit>,
}

impl FitOrchestrator {
    pub fn new(options: FitOptions) -> Self {
        Self {
            options,
            state: FitState::Idle,
            last_fit: None,
        }
    }

    pub fn state(&self) -> FitState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == FitState::Idle
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// The camera fit computed by the latest request
    pub fn last_fit(&self) -> Option<&CameraFit> {
        self.last_fit.as_ref()
    }

    fn transition(&mut self, next: FitState) -> Result<()> {
        if !self.state.can_transition_to(&next) {
            return Err(MapError::InvalidTransition {
                from: self.state.name(),
                to: next.name(),
            });
        }
        log::debug!("fit {} -> {}", self.state.name(), next.name());
        self.state = next;
        Ok(())
    }

    /// Starts a fit, superseding any fit still in flight
    pub fn request_fit<S>(&mut self, surface: &mut S, request: &FitRequest) -> Result<CameraFit>
    where
        S: RenderSurface + ?Sized,
    {
        if !self.is_idle() {
            log::debug!("fit superseded while {}", self.state.name());
        }

        self.transition(FitState::Stopping)?;
        surface.stop();

        self.transition(FitState::Fitting)?;
        let fit = fit_camera(
            &*surface,
            &request.bounds,
            &request.padding,
            request.pitch,
            request.bearing,
        );

        let transition = surface.ease_to(fit.camera, self.options.duration);
        log::info!(
            "easing to {:?} at zoom {:.2} ({})",
            fit.camera.center,
            fit.camera.zoom,
            transition
        );
        self.transition(FitState::Animating {
            transition,
            offset: fit.offset,
        })?;
        self.last_fit = Some(fit);
        Ok(fit)
    }

    /// Feeds a surface event into the fit sequence.
    ///
    /// Only move-end events for the transition currently awaited have an
    /// effect; everything else is ignored.
    pub fn handle_event<S>(&mut self, surface: &mut S, event: &MapEvent) -> Result<()>
    where
        S: RenderSurface + ?Sized,
    {
        let ended = match event {
            MapEvent::MoveEnd { transition, .. } => *transition,
            _ => return Ok(()),
        };

        match self.state {
            FitState::Animating { transition, offset } if transition == ended => {
                self.transition(FitState::Settled { offset })?;
                match offset {
                    Some(offset) => {
                        let pan = surface.pan_by(offset, self.options.duration);
                        log::debug!("panning by ({}, {}) for padding ({})", offset.x, offset.y, pan);
                        self.transition(FitState::Panning { transition: pan })
                    }
                    None => self.transition(FitState::Idle),
                }
            }
            FitState::Panning { transition } if transition == ended => {
                self.transition(FitState::Idle)
            }
            _ => {
                log::debug!("ignoring move end {} while {}", ended, self.state.name());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{LatLng, Size};
    use crate::surface::HeadlessSurface;
    use std::time::Duration;

    fn request(padding: Padding) -> FitRequest {
        FitRequest {
            bounds: LatLngBounds::from_coords(42.0, 11.0, 42.5, 12.0),
            padding,
            pitch: 0.0,
            bearing: 0.0,
        }
    }

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(LatLng::new(42.25, 11.5), 6.0, Size::new(1000.0, 600.0))
    }

    fn pump(orchestrator: &mut FitOrchestrator, surface: &mut HeadlessSurface) {
        for event in surface.process_events() {
            orchestrator.handle_event(surface, &event).unwrap();
        }
    }

    #[test]
    fn test_transition_guards() {
        use FitState::*;
        let id = TransitionId(1);
        assert!(Idle.can_transition_to(&Stopping));
        assert!(Stopping.can_transition_to(&Fitting));
        assert!(!Idle.can_transition_to(&Fitting));
        assert!(!Idle.can_transition_to(&Panning { transition: id }));
        assert!(!Settled { offset: None }.can_transition_to(&Panning { transition: id }));
        assert!(!Settled {
            offset: Some(Point::new(1.0, 0.0))
        }
        .can_transition_to(&Idle));
        assert!(Panning { transition: id }.can_transition_to(&Stopping));
    }

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(FitState::default(), FitState::Idle);
        let orchestrator = FitOrchestrator::default();
        assert!(orchestrator.is_idle());
        assert!(orchestrator.last_fit().is_none());
    }

    #[test]
    fn test_symmetric_fit_ends_idle_without_pan() {
        let mut surface = surface();
        let mut orchestrator = FitOrchestrator::new(FitOptions::instant());
        let fit = orchestrator
            .request_fit(&mut surface, &request(Padding::uniform(10.0)))
            .unwrap();
        assert!(fit.offset.is_none());
        assert!(matches!(orchestrator.state(), FitState::Animating { .. }));

        pump(&mut orchestrator, &mut surface);
        assert!(orchestrator.is_idle());
        assert_eq!(surface.camera().zoom, fit.camera.zoom);
    }

    #[test]
    fn test_pan_waits_for_primary_move_end() {
        let mut surface = surface();
        let mut orchestrator = FitOrchestrator::new(FitOptions::default());
        orchestrator
            .request_fit(&mut surface, &request(Padding::new(0.0, 0.0, 0.0, 20.0)))
            .unwrap();

        surface.advance(Duration::from_millis(400));
        pump(&mut orchestrator, &mut surface);
        assert!(matches!(orchestrator.state(), FitState::Animating { .. }));

        surface.advance(Duration::from_millis(600));
        pump(&mut orchestrator, &mut surface);
        assert!(matches!(orchestrator.state(), FitState::Panning { .. }));
        assert!(surface.is_moving());

        surface.advance(Duration::from_millis(1000));
        pump(&mut orchestrator, &mut surface);
        assert!(orchestrator.is_idle());
    }

    #[test]
    fn test_new_request_supersedes_pending_pan() {
        let mut surface = surface();
        let mut orchestrator = FitOrchestrator::new(FitOptions::default());
        let padded = request(Padding::new(0.0, 0.0, 0.0, 20.0));
        orchestrator.request_fit(&mut surface, &padded).unwrap();
        surface.advance(Duration::from_millis(1000));
        pump(&mut orchestrator, &mut surface);
        assert!(matches!(orchestrator.state(), FitState::Panning { .. }));

        orchestrator
            .request_fit(&mut surface, &request(Padding::default()))
            .unwrap();
        // the stopped pan's move end is stale and must not settle the new fit
        pump(&mut orchestrator, &mut surface);
        assert!(matches!(orchestrator.state(), FitState::Animating { .. }));

        surface.advance(Duration::from_millis(1000));
        pump(&mut orchestrator, &mut surface);
        assert!(orchestrator.is_idle());
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let mut surface = surface();
        let mut orchestrator = FitOrchestrator::new(FitOptions::default());
        orchestrator
            .handle_event(
                &mut surface,
                &MapEvent::MoveEnd {
                    transition: TransitionId(99),
                    center: LatLng::default(),
                },
            )
            .unwrap();
        orchestrator
            .handle_event(&mut surface, &MapEvent::Resize { size: Size::new(1.0, 1.0) })
            .unwrap();
        assert!(orchestrator.is_idle());
    }
}
