pub mod biome;
pub mod boundaries;
pub mod config;
pub mod constants;
pub mod elevation;
pub mod generator;
pub mod grid;
pub mod moisture;
pub mod plate;
pub mod rivers;
pub mod surface;
pub mod temperature;
pub mod tools;
pub mod wind;

pub use config::{GenerationProfile, PlanetParams, get_config, reload_config};
pub use generator::{generate_heightmap, generate_surface_data, generate_surface_data_cancellable};
pub use surface::SurfaceData;
