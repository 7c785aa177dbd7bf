pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod geo;
pub mod geometry;
pub mod map;
pub mod viewport;
pub mod waypoint;
