/// Elevation synthesis: fractal base noise, tectonic modification by
/// distance-weighted boundary pressure, land-only erosion smoothing, and
/// min/max normalization into [0, 1].
use crate::boundaries::{BoundaryType, StressField};
use crate::config::{GenerationProfile, NoiseConfig};
use crate::constants::*;
use crate::grid::{clamp_y, idx, wrap_x, wrapped_dist_sq};
use crate::plate::PlateField;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Sum of the octave amplitudes, for normalizing fractal samples.
const OCTAVE_TOTAL: f32 = 1.9375;

/// 5-octave fractal Perlin field on toroidal coordinates, normalized to [0, 1].
///
/// X maps onto a cos/sin ring so the noise itself is periodic in the wrap
/// direction; there is no seam to patch afterwards. Y maps linearly.
pub(crate) fn fractal_field(width: usize, height: usize, seed: u32, base_frequency: f32) -> Vec<f32> {
    let octaves: Vec<NoiseConfig> = OCTAVE_AMPLITUDES
        .iter()
        .enumerate()
        .map(|(o, &amp)| {
            NoiseConfig::new(
                seed.wrapping_add(o as u32),
                base_frequency * (1u32 << o) as f32,
                amp,
            )
        })
        .collect();

    let mut out = vec![0.0; width * height];
    for y in 0..height {
        let lat = y as f32 / (height - 1).max(1) as f32;
        for x in 0..width {
            let theta = x as f32 / width as f32 * TAU;
            let p = Vec3::new(theta.cos(), theta.sin(), lat * 2.0);
            let sum: f32 = octaves.iter().map(|n| n.sample(p)).sum();
            out[idx(x, y, width)] = (sum / OCTAVE_TOTAL + 1.0) * 0.5;
        }
    }
    out
}

/// Run the full elevation stage. The result is normalized to [0, 1].
pub fn synthesize<R: Rng>(
    width: usize,
    height: usize,
    noise_seed: u32,
    rng: &mut R,
    profile: &GenerationProfile,
    sea_level: f32,
    plates: &PlateField,
    stress: &StressField,
) -> Vec<f32> {
    let mut elevation = fractal_field(width, height, noise_seed, profile.continental_frequency);
    // Squaring sharpens the continental contrast of the raw noise.
    for v in &mut elevation {
        *v *= *v;
    }

    let detail = NoiseConfig::new(
        noise_seed.wrapping_add(OCTAVE_AMPLITUDES.len() as u32),
        profile.continental_frequency * DETAIL_FREQUENCY_MULTIPLIER,
        DETAIL_AMPLITUDE,
    );
    let taper = PolarTaper::roll(rng);

    modify_by_tectonics(
        &mut elevation,
        width,
        height,
        profile,
        sea_level,
        plates,
        stress,
        &detail,
        &taper,
    );

    erode(
        &mut elevation,
        width,
        height,
        sea_level,
        profile.erosion_iterations,
        profile.erosion_strength,
    );

    normalize(&mut elevation);
    elevation
}

/// Smooth roll-off toward the poles. The two parameters are rolled per seed so
/// different planets pinch their polar caps differently; without the taper the
/// noise produces hard artifacts on the top and bottom rows.
struct PolarTaper {
    exponent: f32,
    depth: f32,
}

impl PolarTaper {
    fn roll<R: Rng>(rng: &mut R) -> Self {
        Self {
            exponent: rng.random_range(TAPER_EXPONENT_MIN..TAPER_EXPONENT_MAX),
            depth: rng.random_range(TAPER_DEPTH_MIN..TAPER_DEPTH_MAX),
        }
    }

    fn factor(&self, y: usize, height: usize) -> f32 {
        let lat = (y as f32 / (height - 1).max(1) as f32) * 2.0 - 1.0;
        1.0 - lat.abs().powf(self.exponent) * self.depth
    }
}

/// Distance-decayed boundary pressure blended with detail noise, the
/// boundary-biased plate base elevation and the polar taper.
#[allow(clippy::too_many_arguments)]
fn modify_by_tectonics(
    elevation: &mut [f32],
    width: usize,
    height: usize,
    profile: &GenerationProfile,
    sea_level: f32,
    plates: &PlateField,
    stress: &StressField,
    detail: &NoiseConfig,
    taper: &PolarTaper,
) {
    for y in 0..height {
        let taper_factor = taper.factor(y, height);
        let lat = y as f32 / (height - 1).max(1) as f32;
        for x in 0..width {
            let i = idx(x, y, width);
            let plate_id = plates.owner[i];
            let plate = &plates.plates[plate_id as usize];

            // Accumulate pressure from every boundary force touching this
            // plate, each decayed by distance to the nearest point of that
            // pair's boundary edge.
            let mut pressure = 0.0;
            let mut proximity: f32 = 0.0;
            for force in stress.forces_for(plate_id) {
                let Some(edge) = stress.edge(force.plate, force.neighbor) else {
                    continue;
                };
                let d2 = nearest_edge_d2(x, y, edge, width);
                let (decay, contribution) = match force.boundary {
                    BoundaryType::Transform => (
                        TRANSFORM_DECAY_GAIN / (TRANSFORM_DECAY_FALLOFF * d2 + 1.0),
                        force.shear,
                    ),
                    _ => (
                        BOUNDARY_DECAY_GAIN / (BOUNDARY_DECAY_FALLOFF * d2 + 1.0),
                        force.direct,
                    ),
                };
                pressure += decay * contribution * profile.boundary_sharpness;
                proximity = proximity.max(decay / BOUNDARY_DECAY_GAIN);
            }

            let modified_base = plate.base_elevation + BOUNDARY_BASE_BIAS * proximity;

            let theta = x as f32 / width as f32 * TAU;
            let detail_value = detail.sample(Vec3::new(theta.cos(), theta.sin(), lat * 2.0));

            let noise_part = elevation[i] * profile.relief_strength;
            let tentative = (modified_base + noise_part) * taper_factor + pressure + detail_value;

            let mut h = if tentative > sea_level {
                // Uplift-and-baseline blend, then a small flattening
                // correction that stops the highest ridges from spiking.
                let blended = tentative * LAND_BASE_BLEND
                    + (modified_base + pressure.max(0.0)) * LAND_UPLIFT_GAIN;
                let above = blended - sea_level;
                blended - LAND_FLATTEN * above * above
            } else {
                // Ocean floor relaxes gently toward the plate base.
                tentative * (1.0 - OCEAN_BASE_BLEND) + modified_base * OCEAN_BASE_BLEND
            };

            if stress.cells[i].boundary == Some(BoundaryType::Transform) && plate.oceanic {
                h *= SUBDUCTION_DISCOUNT;
            }

            elevation[i] = h;
        }
    }
}

/// Brute-force nearest boundary point on one pair's edge list.
///
/// A spatial index would be a pure performance optimization here; edge lists
/// at preview resolutions are short enough that the scan stays cheap.
fn nearest_edge_d2(x: usize, y: usize, edge: &[(u16, u16)], width: usize) -> f32 {
    let mut best = f32::INFINITY;
    for &(ex, ey) in edge {
        let d2 = wrapped_dist_sq(x, y, ex as usize, ey as usize, width);
        if d2 < best {
            best = d2;
        }
    }
    best
}

/// `iterations` passes of a radius-3 box blur that only averages land cells
/// (elevation above sea level). Underwater cells are untouched, so coastlines
/// stay crisp while peaks diffuse.
fn erode(
    elevation: &mut [f32],
    width: usize,
    height: usize,
    sea_level: f32,
    iterations: usize,
    strength: f32,
) {
    if iterations == 0 || strength <= 0.0 {
        return;
    }

    for _ in 0..iterations {
        let source = elevation.to_vec();
        for y in 0..height {
            for x in 0..width {
                let i = idx(x, y, width);
                if source[i] <= sea_level {
                    continue;
                }
                let mut sum = 0.0;
                let mut count = 0.0;
                for dy in -EROSION_BLUR_RADIUS..=EROSION_BLUR_RADIUS {
                    let ny = y as i32 + dy;
                    if ny < 0 || ny >= height as i32 {
                        continue;
                    }
                    for dx in -EROSION_BLUR_RADIUS..=EROSION_BLUR_RADIUS {
                        let nx = wrap_x(x as i32 + dx, width);
                        let n = idx(nx, clamp_y(ny, height), width);
                        if source[n] > sea_level {
                            sum += source[n];
                            count += 1.0;
                        }
                    }
                }
                if count > 0.0 {
                    let average = sum / count;
                    elevation[i] = source[i] + (average - source[i]) * strength;
                }
            }
        }
    }
}

/// Rescale to [0, 1] by min/max. A flat field is zeroed instead of divided by
/// a near-zero range.
fn normalize(elevation: &mut [f32]) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in elevation.iter() {
        min = min.min(v);
        max = max.max(v);
    }
    let range = max - min;
    if range < NORMALIZE_EPSILON {
        elevation.fill(0.0);
        return;
    }
    for v in elevation.iter_mut() {
        *v = (*v - min) / range;
    }
}
