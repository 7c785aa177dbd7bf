use crate::{
    core::{
        bounds::compute_bounds,
        camera::{AbsolutePadding, CameraOptions, CameraState},
        config::{FitOptions, MapSettings},
        geo::{LatLng, LatLngBounds, Size},
        viewport::Viewport,
        waypoint::MarkerSpec,
    },
    events::MapEvent,
    fit::{CameraFit, FitOrchestrator, FitRequest},
    routing::{Route, RouteOverlays, RouteProvider, RouteRequest},
    surface::RenderSurface,
    Result,
};
use serde_json::Value;

/// Controller for one waypoint map.
///
/// Owns the settings, the cached route and its overlays, and the fit
/// orchestrator. The surface stays owned by the caller and is passed into
/// every operation, so the live camera is always read fresh.
#[derive(Debug)]
pub struct WaypointMap {
    settings: MapSettings,
    orchestrator: FitOrchestrator,
    route: Option<Route>,
    overlays: Option<RouteOverlays>,
    /// Set once the first style load has run
    loaded: bool,
    /// Box of the latest fit, reused by refits
    fit_bounds: Option<LatLngBounds>,
}

impl WaypointMap {
    pub fn new(settings: MapSettings) -> Result<Self> {
        Self::with_options(settings, FitOptions::default())
    }

    pub fn with_options(settings: MapSettings, options: FitOptions) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            orchestrator: FitOrchestrator::new(options),
            route: None,
            overlays: None,
            loaded: false,
            fit_bounds: None,
        })
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn orchestrator(&self) -> &FitOrchestrator {
        &self.orchestrator
    }

    /// Padding in pixels for a container of the given size
    pub fn absolute_padding(&self, container: Size) -> AbsolutePadding {
        self.settings.padding.to_absolute(container)
    }

    /// Box around the waypoints in the map's rotated frame
    pub fn initial_bounds(&self) -> Result<LatLngBounds> {
        compute_bounds(&self.settings.points(), self.settings.bearing)
    }

    /// Camera to create the surface with, framing the waypoints inside the
    /// padded container
    pub fn initial_camera(&self, container: Size) -> Result<CameraState> {
        let bounds = self.initial_bounds()?;
        let viewport = Viewport::new(bounds.center(), 0.0, container);
        let options = CameraOptions {
            bearing: self.settings.bearing,
            pitch: self.settings.pitch,
            padding: self.absolute_padding(container),
        };
        Ok(viewport.camera_for_bounds(&bounds, &options).unwrap_or_else(|| {
            CameraState::new(bounds.center(), 0.0, self.settings.bearing, self.settings.pitch)
        }))
    }

    /// Runs once the surface reports a loaded style.
    ///
    /// The first load fetches the route (if one is configured), builds its
    /// overlays and fits the camera to the route, or to the waypoints when
    /// there is no route. Later loads only hand back the cached overlays,
    /// which a style change drops. Returns the layers to add.
    pub async fn on_style_load<S, P>(&mut self, surface: &mut S, provider: &P) -> Result<Vec<Value>>
    where
        S: RenderSurface + ?Sized,
        P: RouteProvider + ?Sized,
    {
        if self.loaded {
            log::debug!("style reloaded for map {}, re-adding overlays", self.settings.uid);
            return Ok(self.overlay_layers());
        }
        self.loaded = true;

        let points = match self.settings.route_type {
            Some(profile) => {
                let request = RouteRequest::new(profile, self.settings.points());
                match provider.fetch_route(&request).await {
                    Ok(route) if !route.geometry.is_empty() => {
                        log::info!(
                            "route for map {}: {} points, {} km",
                            self.settings.uid,
                            route.geometry.len(),
                            route.distance_km_label()
                        );
                        self.overlays = Some(RouteOverlays::build(
                            &self.settings.uid,
                            &route,
                            &self.settings.points(),
                        ));
                        let geometry = route.geometry.clone();
                        self.route = Some(route);
                        geometry
                    }
                    Ok(_) => {
                        log::warn!("empty route for map {}, fitting waypoints", self.settings.uid);
                        self.settings.points()
                    }
                    Err(e) => {
                        log::warn!(
                            "could not determine route for map {}: {}, fitting waypoints",
                            self.settings.uid,
                            e
                        );
                        self.settings.points()
                    }
                }
            }
            None => self.settings.points(),
        };

        let bounds = compute_bounds(&points, self.settings.bearing)?;
        self.fit_to(surface, bounds)?;
        Ok(self.overlay_layers())
    }

    /// [`WaypointMap::on_style_load`] for synchronous render loops
    pub fn on_style_load_blocking<S, P>(&mut self, surface: &mut S, provider: &P) -> Result<Vec<Value>>
    where
        S: RenderSurface + ?Sized,
        P: RouteProvider + ?Sized,
    {
        crate::runtime::block_on(self.on_style_load(surface, provider))
    }

    /// Fits the latest box again, e.g. after the container changed size
    pub fn refit<S>(&mut self, surface: &mut S) -> Result<Option<CameraFit>>
    where
        S: RenderSurface + ?Sized,
    {
        match self.fit_bounds {
            Some(bounds) => self.fit_to(surface, bounds).map(Some),
            None => Ok(None),
        }
    }

    fn fit_to<S>(&mut self, surface: &mut S, bounds: LatLngBounds) -> Result<CameraFit>
    where
        S: RenderSurface + ?Sized,
    {
        self.fit_bounds = Some(bounds);
        let request = FitRequest {
            bounds,
            padding: self.settings.padding,
            pitch: self.settings.pitch,
            bearing: self.settings.bearing,
        };
        self.orchestrator.request_fit(surface, &request)
    }

    /// Feeds a surface event to the map. A resize refits the latest box with
    /// padding recomputed for the new container.
    pub fn handle_event<S>(&mut self, surface: &mut S, event: &MapEvent) -> Result<()>
    where
        S: RenderSurface + ?Sized,
    {
        match event {
            MapEvent::Resize { size } => {
                log::debug!("container resized to {}x{}", size.width, size.height);
                self.refit(surface).map(|_| ())
            }
            _ => self.orchestrator.handle_event(surface, event),
        }
    }

    pub fn markers(&self) -> Vec<MarkerSpec> {
        self.settings.markers()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn overlays(&self) -> Option<&RouteOverlays> {
        self.overlays.as_ref()
    }

    /// Route length in kilometres, when route info is enabled and a route
    /// was fetched
    pub fn route_summary(&self) -> Option<String> {
        if !self.settings.show_route_info {
            return None;
        }
        self.route.as_ref().map(Route::distance_km_label)
    }

    /// Waypoint positions in input order
    pub fn points(&self) -> Vec<LatLng> {
        self.settings.points()
    }

    fn overlay_layers(&self) -> Vec<Value> {
        self.overlays
            .as_ref()
            .map(|overlays| overlays.layers().to_vec())
            .unwrap_or_default()
    }
}
