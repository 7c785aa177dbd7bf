use clap::Parser;
use mapframe::{
    routing::StraightLineProvider, DirectionsClient, HeadlessSurface, MapEvent, MapSettings, RenderSurface,
    RouteProvider, Size, Waypoint, WaypointMap,
};
use std::path::PathBuf;
use std::time::Duration;

/// Frame step used to drive camera animations
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames, well past two fit durations
const MAX_FRAMES: usize = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "mapframe-app",
    about = "Fit a waypoint map camera headlessly and print the result"
)]
struct Cli {
    /// Path to a map settings JSON file
    settings: PathBuf,

    /// Container width in pixels
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Container height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Overrides the access token from the settings file
    #[arg(long, env = "MAPBOX_TOKEN")]
    token: Option<String>,

    /// Join waypoints with straight lines instead of calling the directions service
    #[arg(long)]
    offline: bool,

    /// Extra pinned waypoint as "latitude, longitude", appended after the file's waypoints
    #[arg(long = "waypoint", value_name = "GPS")]
    waypoints: Vec<String>,

    /// Animate against the wall clock instead of stepping frames instantly
    #[arg(long)]
    realtime: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let json = std::fs::read_to_string(&cli.settings)?;
    let mut settings = MapSettings::from_json(&json)?;
    if let Some(token) = cli.token {
        settings.token = token;
    }
    for gps in &cli.waypoints {
        settings.waypoints.push(Waypoint::from_gps(gps, None, true)?);
    }

    let provider: Box<dyn RouteProvider> = if cli.offline {
        Box::new(StraightLineProvider)
    } else {
        Box::new(DirectionsClient::new(settings.token.clone()))
    };

    let style = settings.style.style_url();
    let mut map = WaypointMap::new(settings)?;
    let container = Size::new(cli.width, cli.height);

    let initial = map.initial_camera(container)?;
    let mut surface = HeadlessSurface::new(initial.center, initial.zoom, container);
    surface.jump_to(initial);
    log::info!(
        "initial camera {:.6},{:.6} zoom {:.2}",
        initial.center.lat,
        initial.center.lng,
        initial.zoom
    );

    surface.events_mut().once("style.load", |event| {
        if let MapEvent::StyleLoad { style } = event {
            log::info!("style {} loaded", style);
        }
    });
    surface.events_mut().on("moveend", |event| {
        if let MapEvent::MoveEnd { transition, center } = event {
            log::debug!("{} ended at {:.6},{:.6}", transition, center.lat, center.lng);
        }
    });
    surface.set_style(style);

    let mut frames = 0;
    loop {
        for event in surface.process_events() {
            match event {
                MapEvent::StyleLoad { .. } => {
                    let layers = map.on_style_load(&mut surface, provider.as_ref()).await?;
                    log::info!("{} overlay layers to add", layers.len());
                }
                other => map.handle_event(&mut surface, &other)?,
            }
        }

        let pending = surface.events_mut().pending_events() > 0;
        if !surface.is_moving() && !pending && map.orchestrator().is_idle() {
            break;
        }
        if frames >= MAX_FRAMES {
            log::warn!("animation did not settle after {} frames", frames);
            break;
        }
        if cli.realtime {
            tokio::time::sleep(FRAME).await;
            surface.tick();
        } else {
            surface.advance(FRAME);
        }
        frames += 1;
    }

    let report = serde_json::json!({
        "camera": surface.camera(),
        "route_km": map.route_summary(),
        "markers": map.markers().len(),
        "overlays": map.overlays().map(|o| o.layer_ids()).unwrap_or_default(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
