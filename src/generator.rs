/// Pipeline orchestration: plates, stress, elevation, climate, biomes and
/// rivers, in that order, all deterministic in `(seed, profile, width, height)`.
///
/// Each stage draws from its own sub-seeded RNG stream, so editing one stage's
/// knobs never reshuffles the randomness of another.
use crate::boundaries::StressField;
use crate::config::{GenerationProfile, PlanetParams};
use crate::constants::{MIN_HEIGHT, MIN_WIDTH};
use crate::grid::ensure_cells;
use crate::plate::PlateField;
use crate::surface::SurfaceData;
use crate::tools::{noise_seed, stage_seed};
use crate::{elevation, moisture, surface, temperature, wind};
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};

const SALT_PLATES: u64 = 1;
const SALT_ELEVATION: u64 = 2;
const SALT_TEMPERATURE: u64 = 3;
const SALT_WIND: u64 = 4;
const SALT_RIVERS: u64 = 5;

/// Generate only the normalized elevation field. Identical seeds and profiles
/// produce exactly the elevation array of [`generate_surface_data`].
pub fn generate_heightmap(
    params: &PlanetParams,
    profile: &GenerationProfile,
    width: usize,
    height: usize,
    seed: u64,
) -> Vec<f32> {
    let (width, height) = floor_dims(width, height);
    let profile = profile.clamped();
    let sea_level = params.sea_level();
    build_elevation(width, height, seed, &profile, sea_level)
}

/// Generate the full surface data set.
pub fn generate_surface_data(
    params: &PlanetParams,
    profile: &GenerationProfile,
    width: usize,
    height: usize,
    seed: u64,
) -> SurfaceData {
    let never = AtomicBool::new(false);
    generate_surface_data_cancellable(params, profile, width, height, seed, &never)
        .expect("generation without cancellation always completes")
}

/// Like [`generate_surface_data`], but checks `cancel` between stages and
/// returns `None` as soon as the flag is raised. Meant for interactive editors
/// where a stale regeneration should abort instead of finishing.
pub fn generate_surface_data_cancellable(
    params: &PlanetParams,
    profile: &GenerationProfile,
    width: usize,
    height: usize,
    seed: u64,
    cancel: &AtomicBool,
) -> Option<SurfaceData> {
    let (width, height) = floor_dims(width, height);
    let cells = width * height;
    let profile = profile.clamped();
    let sea_level = params.sea_level();
    let cancelled = || cancel.load(Ordering::Relaxed);

    debug!("generating {width}x{height} surface, seed {seed}");

    let elevation = build_elevation(width, height, seed, &profile, sea_level);
    if cancelled() {
        return None;
    }

    let temperature = ensure_cells(
        temperature::simulate(
            width,
            height,
            noise_seed(seed, SALT_TEMPERATURE),
            &profile,
            &elevation,
        ),
        cells,
    );
    if cancelled() {
        return None;
    }

    let mut wind_rng = ChaCha8Rng::seed_from_u64(stage_seed(seed, SALT_WIND));
    let wind = wind::simulate(width, height, &profile, &mut wind_rng);
    if cancelled() {
        return None;
    }

    let moisture = ensure_cells(
        moisture::simulate(
            width,
            height,
            &profile,
            &elevation,
            &temperature,
            &wind,
            sea_level,
        ),
        cells,
    );
    if cancelled() {
        return None;
    }

    let mut river_rng = ChaCha8Rng::seed_from_u64(stage_seed(seed, SALT_RIVERS));
    let (biomes, rivers) = surface::classify_and_trace(
        width,
        height,
        &elevation,
        &temperature,
        &moisture,
        sea_level,
        &mut river_rng,
    );

    debug!("surface generation complete");

    Some(SurfaceData {
        width,
        height,
        elevation,
        temperature,
        moisture,
        wind,
        biomes,
        rivers,
        sea_level,
    })
}

/// Plates, stress and elevation synthesis. Shared by both entry points so the
/// heightmap-only path stays bit-identical to the full run.
fn build_elevation(
    width: usize,
    height: usize,
    seed: u64,
    profile: &GenerationProfile,
    sea_level: f32,
) -> Vec<f32> {
    let mut plate_rng = ChaCha8Rng::seed_from_u64(stage_seed(seed, SALT_PLATES));
    let plates = PlateField::build(
        width,
        height,
        profile.plate_count,
        profile.ocean_plate_ratio,
        &mut plate_rng,
    );
    debug!("assigned {} plates", plates.plates.len());

    let stress = StressField::build(&plates);
    debug!("stress field: {} boundary pair forces", stress.forces.len());

    let mut elevation_rng = ChaCha8Rng::seed_from_u64(stage_seed(seed, SALT_ELEVATION));
    let elevation = elevation::synthesize(
        width,
        height,
        noise_seed(seed, SALT_ELEVATION),
        &mut elevation_rng,
        profile,
        sea_level,
        &plates,
        &stress,
    );
    // The plate and stress fields are transient: they drop here and never
    // appear in the returned surface set.
    ensure_cells(elevation, width * height)
}

fn floor_dims(width: usize, height: usize) -> (usize, usize) {
    (width.max(MIN_WIDTH), height.max(MIN_HEIGHT))
}
