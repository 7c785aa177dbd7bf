use crate::animation::{
    easing::EasingType,
    transition::{CameraTransition, TransitionId, TransitionKind},
};
use crate::core::camera::{CameraOptions, CameraState};
use crate::core::geo::{LatLng, LatLngBounds, Point, Size};
use crate::core::viewport::Viewport;
use crate::events::{EventManager, MapEvent};
use crate::surface::RenderSurface;
use instant::Instant;
use std::time::Duration;

/// In-memory rendering surface.
///
/// Holds a [`Viewport`] as its live camera and runs eased transitions that
/// are advanced explicitly with [`HeadlessSurface::advance`] or against the
/// wall clock with [`HeadlessSurface::tick`]. Events queue up until
/// [`HeadlessSurface::process_events`] is called.
#[derive(Debug)]
pub struct HeadlessSurface {
    viewport: Viewport,
    style: Option<String>,
    active: Option<CameraTransition>,
    next_transition: u64,
    easing: EasingType,
    events: EventManager,
    last_tick: Option<Instant>,
}

impl HeadlessSurface {
    pub fn new(center: LatLng, zoom: f64, size: Size) -> Self {
        Self::with_viewport(Viewport::new(center, zoom, size))
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            style: None,
            active: None,
            next_transition: 1,
            easing: EasingType::default(),
            events: EventManager::new(),
            last_tick: None,
        }
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Swaps the style and reports it loaded
    pub fn set_style(&mut self, style: impl Into<String>) {
        let style = style.into();
        log::debug!("style loaded: {}", style);
        self.style = Some(style.clone());
        self.events.emit(MapEvent::StyleLoad { style });
    }

    pub fn resize(&mut self, size: Size) {
        self.viewport.set_size(size);
        self.events.emit(MapEvent::Resize { size });
    }

    /// Moves the camera without a transition or events
    pub fn jump_to(&mut self, camera: CameraState) {
        self.viewport.set_camera(camera);
    }

    pub fn is_moving(&self) -> bool {
        self.active.is_some()
    }

    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Delivers queued events to listeners and returns them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.events.process_events()
    }

    /// Advances the running transition by `dt`.
    ///
    /// Emits move-end when the transition reaches its target.
    pub fn advance(&mut self, dt: Duration) -> Option<CameraState> {
        let transition = self.active.as_mut()?;
        let camera = transition.advance(dt);
        self.viewport.set_camera(camera);

        if transition.is_finished() {
            let id = transition.id;
            self.active = None;
            self.events.emit(MapEvent::MoveEnd {
                transition: id,
                center: self.viewport.center,
            });
        }
        Some(camera)
    }

    /// Advances by the wall-clock time since the previous tick
    pub fn tick(&mut self) -> Option<CameraState> {
        let now = Instant::now();
        let dt = self
            .last_tick
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);
        self.advance(dt)
    }

    fn start(&mut self, kind: TransitionKind, target: CameraState, duration: Duration) -> TransitionId {
        self.stop();

        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        self.events.emit(MapEvent::MoveStart {
            transition: id,
            center: self.viewport.center,
        });

        let transition = CameraTransition::new(
            id,
            kind,
            self.viewport.camera(),
            target,
            duration,
            self.easing,
        );
        log::debug!("{:?} transition {} started over {:?}", kind, id, duration);
        self.active = Some(transition);
        self.last_tick = Some(Instant::now());

        if duration.is_zero() {
            self.advance(Duration::ZERO);
        }
        id
    }
}

impl RenderSurface for HeadlessSurface {
    fn project(&self, lat_lng: &LatLng) -> Point {
        self.viewport.lat_lng_to_pixel(lat_lng)
    }

    fn camera_for_bounds(&self, bounds: &LatLngBounds, options: &CameraOptions) -> Option<CameraState> {
        self.viewport.camera_for_bounds(bounds, options)
    }

    fn ease_to(&mut self, camera: CameraState, duration: Duration) -> TransitionId {
        self.start(TransitionKind::Ease, camera, duration)
    }

    fn pan_by(&mut self, offset: Point, duration: Duration) -> TransitionId {
        let target = CameraState {
            center: self.viewport.pan_target(offset),
            ..self.viewport.camera()
        };
        self.start(TransitionKind::Pan, target, duration)
    }

    fn stop(&mut self) {
        if let Some(transition) = self.active.take() {
            log::debug!("transition {} stopped", transition.id);
            self.events.emit(MapEvent::MoveEnd {
                transition: transition.id,
                center: self.viewport.center,
            });
        }
    }

    fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    fn container_size(&self) -> Size {
        self.viewport.size
    }

    fn camera(&self) -> CameraState {
        self.viewport.camera()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(LatLng::new(42.16, 11.95), 8.0, Size::new(800.0, 600.0))
            .with_easing(EasingType::Linear)
    }

    fn move_ends(events: &[MapEvent]) -> Vec<TransitionId> {
        events
            .iter()
            .filter_map(|event| match event {
                MapEvent::MoveEnd { transition, .. } => Some(*transition),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_ease_runs_to_target_and_emits_move_end() {
        let mut surface = surface();
        let target = CameraState::new(LatLng::new(42.2, 12.0), 10.0, 30.0, 20.0);
        let id = surface.ease_to(target, Duration::from_millis(1000));
        assert!(surface.is_moving());

        surface.advance(Duration::from_millis(500));
        assert!((surface.zoom() - 9.0).abs() < 1e-9);
        assert!(move_ends(&surface.process_events()).is_empty());

        surface.advance(Duration::from_millis(500));
        assert!(!surface.is_moving());
        assert_eq!(surface.camera(), target);
        assert_eq!(move_ends(&surface.process_events()), vec![id]);
    }

    #[test]
    fn test_tick_follows_wall_clock() {
        let mut surface = surface();
        let target = CameraState::new(LatLng::new(42.16, 11.95), 10.0, 0.0, 0.0);
        surface.ease_to(target, Duration::from_secs(10));

        std::thread::sleep(Duration::from_millis(20));
        surface.tick();
        assert!(surface.zoom() > 8.0);
        assert!(surface.is_moving());
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut surface = surface();
        let target = CameraState::new(LatLng::new(42.2, 12.0), 10.0, 0.0, 0.0);
        let id = surface.ease_to(target, Duration::ZERO);
        assert!(!surface.is_moving());
        assert_eq!(surface.camera(), target);
        assert_eq!(move_ends(&surface.process_events()), vec![id]);
    }

    #[test]
    fn test_stop_is_idempotent_and_reports_interrupted_transition() {
        let mut surface = surface();
        surface.stop();
        assert!(surface.process_events().is_empty());

        let target = CameraState::new(LatLng::new(42.2, 12.0), 10.0, 0.0, 0.0);
        let id = surface.ease_to(target, Duration::from_millis(1000));
        surface.advance(Duration::from_millis(100));
        surface.stop();
        surface.stop();
        assert!(!surface.is_moving());
        assert_eq!(move_ends(&surface.process_events()), vec![id]);
    }

    #[test]
    fn test_new_transition_supersedes_running_one() {
        let mut surface = surface();
        let target = CameraState::new(LatLng::new(42.2, 12.0), 10.0, 0.0, 0.0);
        let first = surface.ease_to(target, Duration::from_millis(1000));
        let second = surface.ease_to(target.with_zoom(11.0), Duration::from_millis(1000));
        assert_ne!(first, second);
        assert_eq!(move_ends(&surface.process_events()), vec![first]);
    }

    #[test]
    fn test_pan_by_moves_content() {
        let mut surface = surface();
        let before = surface.project(&LatLng::new(42.16, 11.95));
        surface.pan_by(Point::new(-200.0, 50.0), Duration::ZERO);
        let after = surface.project(&LatLng::new(42.16, 11.95));
        assert!((after.x - (before.x + 200.0)).abs() < 1e-6);
        assert!((after.y - (before.y - 50.0)).abs() < 1e-6);
    }

    #[test]
    fn test_style_and_resize_events() {
        let mut surface = surface();
        surface.set_style("mapbox://styles/mapbox/outdoors-v12");
        surface.resize(Size::new(1000.0, 500.0));
        let events = surface.process_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "style.load");
        assert_eq!(surface.container_size(), Size::new(1000.0, 500.0));
        assert_eq!(surface.style(), Some("mapbox://styles/mapbox/outdoors-v12"));
    }
}
