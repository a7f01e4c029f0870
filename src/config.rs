use glam::Vec3;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};

static CONFIG: OnceLock<Mutex<TerragenConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading from file if not already loaded.
/// A missing or invalid file falls back to defaults; generation never refuses to run.
pub fn get_config() -> TerragenConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = TerragenConfig::load_from_file("terragen_config.toml").unwrap_or_else(|e| {
            log::warn!("terragen_config.toml not usable ({e}), using defaults");
            TerragenConfig::default()
        });
        Mutex::new(config)
    });
    config_mutex.lock().unwrap().clone()
}

pub fn reload_config() {
    if let Err(e) = reload_config_from_file("terragen_config.toml") {
        log::warn!("failed to reload terragen_config.toml: {e}");
    }
}

/// Perlin wrapper bundling the frequency/amplitude a sampler was tuned with.
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    perlin: Perlin,
    frequency: f32,
    amplitude: f32,
}

impl NoiseConfig {
    pub fn new(seed: u32, frequency: f32, amplitude: f32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            frequency,
            amplitude,
        }
    }

    pub fn sample(&self, p: Vec3) -> f32 {
        let x = p.x * self.frequency;
        let y = p.y * self.frequency;
        let z = p.z * self.frequency;
        self.perlin.get([x as f64, y as f64, z as f64]) as f32 * self.amplitude
    }
}

/// Immutable generation knobs, consumed read-only by every stage.
///
/// Every field has a documented safe range and is clamped (never rejected)
/// by [`GenerationProfile::clamped`] before the pipeline touches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProfile {
    /// Tectonic plate count, 2..=128.
    pub plate_count: usize,
    /// Number of rotational wind cells, 1..=64.
    pub wind_cell_count: usize,
    /// Land smoothing passes, 0..=16.
    pub erosion_iterations: usize,
    /// Blend factor per smoothing pass, 0..=1.
    pub erosion_strength: f32,
    /// 1..=1000; higher values narrow the equatorial warm band (cube-root scaled).
    pub heat_factor: f32,
    /// Base frequency of the continental fractal noise.
    pub continental_frequency: f32,
    /// Weight of the fractal noise in the raw height field.
    pub relief_strength: f32,
    /// Scales how far moisture packets carry inland, 0..=4.
    pub moisture_transport: f32,
    /// Scales boundary pressure, 0..=4; higher means sharper mountain ridges.
    pub boundary_sharpness: f32,
    /// Probability a plate is oceanic, 0..=1.
    pub ocean_plate_ratio: f64,
}

impl Default for GenerationProfile {
    fn default() -> Self {
        Self {
            plate_count: 12,
            wind_cell_count: 8,
            erosion_iterations: 3,
            erosion_strength: 0.5,
            heat_factor: 10.0,
            continental_frequency: 1.6,
            relief_strength: 0.6,
            moisture_transport: 1.0,
            boundary_sharpness: 1.0,
            ocean_plate_ratio: 0.5,
        }
    }
}

impl GenerationProfile {
    /// Clamp every tunable to its documented safe range.
    pub fn clamped(&self) -> Self {
        Self {
            plate_count: self.plate_count.clamp(2, 128),
            wind_cell_count: self.wind_cell_count.clamp(1, 64),
            erosion_iterations: self.erosion_iterations.min(16),
            erosion_strength: self.erosion_strength.clamp(0.0, 1.0),
            heat_factor: self.heat_factor.clamp(1.0, 1000.0),
            continental_frequency: self.continental_frequency.clamp(0.1, 16.0),
            relief_strength: self.relief_strength.clamp(0.0, 2.0),
            moisture_transport: self.moisture_transport.clamp(0.0, 4.0),
            boundary_sharpness: self.boundary_sharpness.clamp(0.0, 4.0),
            ocean_plate_ratio: self.ocean_plate_ratio.clamp(0.0, 1.0),
        }
    }
}

/// Planet-level description consumed alongside the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetParams {
    /// Fraction of the surface covered by ocean, 0..=1. Defines sea level directly.
    pub ocean_coverage: f32,
}

impl Default for PlanetParams {
    fn default() -> Self {
        Self {
            ocean_coverage: 0.5,
        }
    }
}

impl PlanetParams {
    /// Sea level is a pure function of ocean coverage.
    pub fn sea_level(&self) -> f32 {
        self.ocean_coverage.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerragenConfig {
    pub planet: PlanetParams,
    pub profile: GenerationProfile,
}

impl TerragenConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: TerragenConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn reload_config_from_file(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let new_config = TerragenConfig::load_from_file(path)?;

    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    *config_mutex.lock().unwrap() = new_config;
    Ok(())
}
