/// Wind field: superposition of randomly placed rotational cells.
///
/// Each wind cell spins clockwise or counterclockwise with a random intensity
/// and reach; its tangential field is projected outward ring-by-ring. Cells
/// reached by several origins average their contributions; cells reached by
/// none get a small random fallback vector so the field is total.
use crate::config::GenerationProfile;
use crate::constants::*;
use crate::grid::{idx, wrap_x};
use glam::Vec2;
use rand::Rng;

struct WindCell {
    x: usize,
    y: usize,
    /// +1 counterclockwise, -1 clockwise.
    spin: f32,
    intensity: f32,
    reach: i32,
}

/// Build the per-cell wind vector field.
pub fn simulate<R: Rng>(
    width: usize,
    height: usize,
    profile: &GenerationProfile,
    rng: &mut R,
) -> Vec<Vec2> {
    let max_reach = (width.min(height) as i32).max(4);
    let cells: Vec<WindCell> = (0..profile.wind_cell_count)
        .map(|_| WindCell {
            x: rng.random_range(0..width),
            y: rng.random_range(0..height),
            spin: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            intensity: rng.random_range(WIND_INTENSITY_MIN..WIND_INTENSITY_MAX),
            reach: rng.random_range(max_reach / 4..=max_reach),
        })
        .collect();

    let mut sums = vec![Vec2::ZERO; width * height];
    let mut counts = vec![0u16; width * height];

    for cell in &cells {
        for dy in -cell.reach..=cell.reach {
            let ny = cell.y as i32 + dy;
            if ny < 0 || ny >= height as i32 {
                continue;
            }
            for dx in -cell.reach..=cell.reach {
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                if dist < 0.5 || dist > cell.reach as f32 {
                    continue;
                }
                let nx = wrap_x(cell.x as i32 + dx, width);
                let i = idx(nx, ny as usize, width);

                // Tangent of the ring through this cell, scaled by a linear
                // falloff toward the rim.
                let tangent = Vec2::new(-dy as f32, dx as f32) / dist * cell.spin;
                let falloff = 1.0 - dist / cell.reach as f32;
                sums[i] += tangent * cell.intensity * falloff;
                counts[i] += 1;
            }
        }
    }

    let mut wind = vec![Vec2::ZERO; width * height];
    for i in 0..wind.len() {
        wind[i] = if counts[i] > 0 {
            sums[i] / counts[i] as f32
        } else {
            Vec2::new(
                rng.random_range(-WIND_FALLBACK_MAGNITUDE..WIND_FALLBACK_MAGNITUDE),
                rng.random_range(-WIND_FALLBACK_MAGNITUDE..WIND_FALLBACK_MAGNITUDE),
            )
        };
    }
    wind
}
