//! Calibrated tuning constants for the generation pipeline.
//!
//! Most of these were tuned by eye against rendered previews rather than
//! derived from physics. Treat them as calibration data: renaming is fine,
//! changing values shifts the look of every generated planet.

/// Dimension floors; smaller requested grids are raised to these.
pub const MIN_WIDTH: usize = 64;
pub const MIN_HEIGHT: usize = 32;

/// Fractal noise octave amplitudes (5 octaves, halving).
pub const OCTAVE_AMPLITUDES: [f32; 5] = [1.0, 0.5, 0.25, 0.125, 0.0625];

/// Base elevation sampling ranges per crust type.
pub const OCEANIC_BASE_MIN: f32 = 0.15;
pub const OCEANIC_BASE_MAX: f32 = 0.35;
pub const CONTINENTAL_BASE_MIN: f32 = 0.55;
pub const CONTINENTAL_BASE_MAX: f32 = 0.75;

/// Distance decay of boundary pressure: `gain / (falloff * d^2 + 1)`.
/// Transform boundaries use a flatter curve with half the gain.
pub const BOUNDARY_DECAY_GAIN: f32 = 0.4;
pub const BOUNDARY_DECAY_FALLOFF: f32 = 0.02;
pub const TRANSFORM_DECAY_GAIN: f32 = 0.2;
pub const TRANSFORM_DECAY_FALLOFF: f32 = 0.002;

/// Plate base elevation is biased upward near boundaries by this much at d=0.
pub const BOUNDARY_BASE_BIAS: f32 = 0.15;

/// Land-branch blend of the tectonic modification step.
pub const LAND_BASE_BLEND: f32 = 0.7;
pub const LAND_UPLIFT_GAIN: f32 = 0.15;
pub const LAND_FLATTEN: f32 = 0.12;

/// Below-sea-level cells blend gently toward the plate base instead.
pub const OCEAN_BASE_BLEND: f32 = 0.35;

/// Transform-boundary cells on oceanic plates sink slightly.
pub const SUBDUCTION_DISCOUNT: f32 = 0.985;

/// Detail noise mixed into the tectonic modification step.
pub const DETAIL_FREQUENCY_MULTIPLIER: f32 = 4.0;
pub const DETAIL_AMPLITUDE: f32 = 0.08;

/// Polar taper parameter ranges (exponent and depth are rolled per seed).
pub const TAPER_EXPONENT_MIN: f32 = 2.0;
pub const TAPER_EXPONENT_MAX: f32 = 4.0;
pub const TAPER_DEPTH_MIN: f32 = 0.55;
pub const TAPER_DEPTH_MAX: f32 = 0.85;

/// Land-only erosion blur radius.
pub const EROSION_BLUR_RADIUS: i32 = 3;

/// Fields flatter than this after synthesis are zeroed instead of rescaled.
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// Altitude cooling: first threshold cleared (top first) decides the penalty.
pub const LAPSE_STEPS: [(f32, f32); 6] = [
    (0.9, 0.30),
    (0.8, 0.24),
    (0.7, 0.18),
    (0.6, 0.12),
    (0.5, 0.08),
    (0.4, 0.04),
];

/// Weight of fractal noise vs. the latitude band in the temperature field.
pub const TEMPERATURE_NOISE_WEIGHT: f32 = 0.15;

/// Wind cell parameter ranges.
pub const WIND_INTENSITY_MIN: f32 = 0.4;
pub const WIND_INTENSITY_MAX: f32 = 1.0;
/// Fallback magnitude for cells no rotational cell reaches.
pub const WIND_FALLBACK_MAGNITUDE: f32 = 0.05;

/// Moisture transport.
pub const MOISTURE_PACKET_GAIN: f32 = 25.0;
pub const MOISTURE_LOSS_RATE: f32 = 0.12;
pub const MOISTURE_BLUR_RADIUS: i32 = 12;
/// Below-sea-level cells carry this marker so coastal blur picks it up.
pub const OCEAN_DEPOSIT_FLOOR: f32 = 0.1;

/// Biome thresholds that are not band boundaries.
pub const DEEP_OCEAN_FACTOR: f32 = 0.5714;
pub const COAST_BAND: f32 = 0.027;
pub const MOUNTAIN_LEVEL: f32 = 0.68;

/// River seeding.
pub const RIVER_SEED_PROBABILITY: f64 = 0.0035;
pub const RIVER_MIN_ELEVATION: f32 = 0.55;
pub const RIVER_MIN_MOISTURE: f32 = 0.15;
pub const RIVER_DEPOSIT_MIN: f32 = 0.5;
pub const RIVER_DEPOSIT_MAX: f32 = 1.5;
