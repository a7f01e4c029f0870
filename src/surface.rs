/// Final surface arrays handed to the caller, plus the biome/river sweep that
/// fills the last two of them.
use crate::biome::{Biome, classify};
use crate::constants::*;
use crate::grid::idx;
use crate::rivers;
use glam::Vec2;
use rand::Rng;

/// Caller-owned result of a full generation run. All arrays are row-major
/// `y * width + x`; X wraps, so column `width - 1` stitches to column 0.
pub struct SurfaceData {
    pub width: usize,
    pub height: usize,
    /// Normalized into [0, 1].
    pub elevation: Vec<f32>,
    /// Unbounded; negative at altitude and near the poles.
    pub temperature: Vec<f32>,
    /// Non-negative, zero over open water.
    pub moisture: Vec<f32>,
    pub wind: Vec<Vec2>,
    pub biomes: Vec<Biome>,
    /// River deposit per cell; 0 means no river.
    pub rivers: Vec<f32>,
    /// Pure function of the planet's ocean coverage.
    pub sea_level: f32,
}

/// Classify every cell and, in the same sweep, stochastically seed and trace
/// rivers on elevated, moist land.
pub fn classify_and_trace<R: Rng>(
    width: usize,
    height: usize,
    elevation: &[f32],
    temperature: &[f32],
    moisture: &[f32],
    sea_level: f32,
    rng: &mut R,
) -> (Vec<Biome>, Vec<f32>) {
    let cells = width * height;
    let mut biomes = Vec::with_capacity(cells);
    let mut river_layer = vec![0.0f32; cells];

    for y in 0..height {
        for x in 0..width {
            let i = idx(x, y, width);
            biomes.push(classify(elevation[i], temperature[i], moisture[i], sea_level));

            if elevation[i] > RIVER_MIN_ELEVATION
                && moisture[i] > RIVER_MIN_MOISTURE
                && river_layer[i] == 0.0
                && rng.random_bool(RIVER_SEED_PROBABILITY)
            {
                let deposit = rng.random_range(RIVER_DEPOSIT_MIN..RIVER_DEPOSIT_MAX);
                rivers::trace_from(
                    &mut river_layer,
                    elevation,
                    width,
                    height,
                    x,
                    y,
                    deposit,
                    sea_level,
                );
            }
        }
    }

    (biomes, river_layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sweep_fills_both_layers() {
        let width = 64;
        let height = 32;
        let cells = width * height;
        // Moist highlands everywhere: rivers will seed somewhere at 0.35%.
        let elevation = vec![0.7; cells];
        let temperature = vec![0.4; cells];
        let moisture = vec![0.4; cells];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (biomes, rivers) =
            classify_and_trace(width, height, &elevation, &temperature, &moisture, 0.3, &mut rng);

        assert_eq!(biomes.len(), cells);
        assert_eq!(rivers.len(), cells);
        assert!(rivers.iter().all(|&r| r >= 0.0));
        assert!(biomes.iter().all(|&b| b == crate::biome::Biome::RockyMountain));
    }

    #[test]
    fn no_rivers_without_moist_highlands() {
        let width = 64;
        let height = 32;
        let cells = width * height;
        let elevation = vec![0.4; cells];
        let temperature = vec![0.4; cells];
        let moisture = vec![0.4; cells];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (_, rivers) =
            classify_and_trace(width, height, &elevation, &temperature, &moisture, 0.3, &mut rng);
        assert!(rivers.iter().all(|&r| r == 0.0));
    }
}
