/// Moisture: ocean-sourced packets advected downwind, deposited by slope and
/// temperature, then smoothed over land.
///
/// Ocean cells seed moisture from their own temperature; each seeded cell with
/// usable wind launches one packet that steps along the rounded wind direction
/// for a bounded number of steps, depositing a slope-dependent share at every
/// visited cell. The trace direction is re-derived from the summed current and
/// next wind vectors, so paths curve with the field.
use crate::config::GenerationProfile;
use crate::constants::*;
use crate::grid::{clamp_y, idx, wrap_x};
use glam::Vec2;

pub fn simulate(
    width: usize,
    height: usize,
    profile: &GenerationProfile,
    elevation: &[f32],
    temperature: &[f32],
    wind: &[Vec2],
    sea_level: f32,
) -> Vec<f32> {
    let cells = width * height;

    // Base moisture: ocean cells carry their own temperature (clamped at
    // zero; frozen seas evaporate nothing), land starts dry.
    let mut base = vec![0.0f32; cells];
    for i in 0..cells {
        if elevation[i] <= sea_level {
            base[i] = temperature[i].max(0.0);
        }
    }

    let mut deposit = vec![0.0f32; cells];
    let max_steps = (width + height).max(32);

    for y in 0..height {
        for x in 0..width {
            let i = idx(x, y, width);
            if base[i] <= 0.0 || wind[i].length_squared() < 1e-6 {
                continue;
            }
            trace_packet(
                &mut deposit,
                width,
                height,
                elevation,
                temperature,
                wind,
                x,
                y,
                base[i] * MOISTURE_PACKET_GAIN * profile.moisture_transport,
                max_steps,
            );
        }
    }

    // Ocean cells carry a nominal marker so the coastal blur window below
    // sees moisture arriving from the sea even where no packet landed.
    for i in 0..cells {
        if elevation[i] <= sea_level {
            deposit[i] = deposit[i].max(OCEAN_DEPOSIT_FLOOR);
        }
    }

    let mut moisture = blur_over_land(&deposit, width, height, elevation, sea_level);

    for i in 0..cells {
        if elevation[i] <= sea_level {
            moisture[i] = 0.0;
        }
    }
    moisture
}

/// Advect one moisture packet downwind, depositing as it goes.
///
/// Stops when the packet is spent, the direction degenerates, the trace
/// leaves the valid Y range, or the step cap is hit.
#[allow(clippy::too_many_arguments)]
fn trace_packet(
    deposit: &mut [f32],
    width: usize,
    height: usize,
    elevation: &[f32],
    temperature: &[f32],
    wind: &[Vec2],
    start_x: usize,
    start_y: usize,
    packet: f32,
    max_steps: usize,
) {
    let mut remaining = packet;
    let mut cx = start_x;
    let mut cy = start_y as i32;
    let mut dir = wind[idx(start_x, start_y, width)];

    for _ in 0..max_steps {
        if remaining <= 0.0 || dir.length_squared() < 1e-6 {
            break;
        }
        let unit = dir.normalize();
        let sx = unit.x.round() as i32;
        let sy = unit.y.round() as i32;
        if sx == 0 && sy == 0 {
            break;
        }
        let ny = cy + sy;
        if ny < 0 || ny >= height as i32 {
            break;
        }
        let nx = wrap_x(cx as i32 + sx, width);
        let n = idx(nx, ny as usize, width);

        let share = slope_factor(elevation[n], temperature[n], wind[n].length());
        let dropped = remaining * share;
        deposit[n] += dropped;
        remaining -= dropped * (1.0 + MOISTURE_LOSS_RATE);

        // Summing current and next wind lets the path bend with the field
        // instead of committing to the launch direction.
        dir = wind[idx(cx, cy as usize, width)] + wind[n];
        cx = nx;
        cy = ny;
    }
}

/// Share of the remaining packet dropped at a cell: steep, warm, calm cells
/// wring out more.
fn slope_factor(elevation: f32, temperature: f32, wind_speed: f32) -> f32 {
    let uplift = elevation * elevation * 0.6;
    let warmth = (temperature.max(0.0) * 0.2).min(0.2);
    let calm = 0.1 / (wind_speed + 1.0);
    (uplift + warmth + calm).clamp(0.0, 0.9)
}

/// Radius-12 box blur written to land cells only; the window itself reads
/// every cell so coastal land picks up the ocean marker.
fn blur_over_land(
    deposit: &[f32],
    width: usize,
    height: usize,
    elevation: &[f32],
    sea_level: f32,
) -> Vec<f32> {
    let mut out = deposit.to_vec();
    for y in 0..height {
        for x in 0..width {
            let i = idx(x, y, width);
            if elevation[i] <= sea_level {
                continue;
            }
            let mut sum = 0.0;
            let mut count = 0.0;
            for dy in -MOISTURE_BLUR_RADIUS..=MOISTURE_BLUR_RADIUS {
                let ny = y as i32 + dy;
                if ny < 0 || ny >= height as i32 {
                    continue;
                }
                for dx in -MOISTURE_BLUR_RADIUS..=MOISTURE_BLUR_RADIUS {
                    let nx = wrap_x(x as i32 + dx, width);
                    sum += deposit[idx(nx, clamp_y(ny, height), width)];
                    count += 1.0;
                }
            }
            out[i] = sum / count;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// West half ocean (0.2), east half land (0.6), mild uniform temperature,
    /// no wind. Sea level for these fixtures is 0.5.
    fn flat_world(width: usize, height: usize) -> (Vec<f32>, Vec<f32>, Vec<Vec2>) {
        let mut elevation = vec![0.2; width * height];
        for y in 0..height {
            for x in width / 2..width {
                elevation[idx(x, y, width)] = 0.6;
            }
        }
        let temperature = vec![0.5; width * height];
        let wind = vec![Vec2::ZERO; width * height];
        (elevation, temperature, wind)
    }

    #[test]
    fn moisture_is_non_negative_and_zero_over_ocean() {
        let (elevation, temperature, wind) = flat_world(64, 32);
        let moisture = simulate(
            64,
            32,
            &GenerationProfile::default(),
            &elevation,
            &temperature,
            &wind,
            0.5,
        );
        assert_eq!(moisture.len(), 64 * 32);
        for (i, &m) in moisture.iter().enumerate() {
            assert!(m >= 0.0, "negative moisture at {i}");
            if elevation[i] <= 0.5 {
                assert_eq!(m, 0.0, "ocean cell {i} kept moisture");
            }
        }
    }

    #[test]
    fn downwind_land_is_wetter_than_a_windless_world() {
        let (elevation, temperature, mut wind) = flat_world(64, 32);
        // Blow everything eastward so ocean packets cross onto land.
        for v in &mut wind {
            *v = Vec2::new(1.0, 0.0);
        }
        let wet = simulate(
            64,
            32,
            &GenerationProfile::default(),
            &elevation,
            &temperature,
            &wind,
            0.5,
        );
        let calm_wind = vec![Vec2::ZERO; 64 * 32];
        let dry = simulate(
            64,
            32,
            &GenerationProfile::default(),
            &elevation,
            &temperature,
            &calm_wind,
            0.5,
        );
        let wet_total: f32 = wet.iter().sum();
        let dry_total: f32 = dry.iter().sum();
        assert!(wet_total > dry_total);
    }

    #[test]
    fn trace_respects_the_step_cap() {
        // Uniform eastward wind over land: the packet would loop around the
        // wrapped axis forever without the cap.
        let width = 64;
        let height = 32;
        let elevation = vec![0.6; width * height];
        let temperature = vec![0.5; width * height];
        let wind = vec![Vec2::new(1.0, 0.0); width * height];
        let mut deposit = vec![0.0; width * height];
        trace_packet(
            &mut deposit,
            width,
            height,
            &elevation,
            &temperature,
            &wind,
            0,
            16,
            1000.0,
            (width + height).max(32),
        );
        let touched = deposit.iter().filter(|&&d| d > 0.0).count();
        assert!(touched <= (width + height).max(32));
    }

    #[test]
    fn trace_stops_at_the_poles() {
        let width = 64;
        let height = 32;
        let elevation = vec![0.6; width * height];
        let temperature = vec![0.5; width * height];
        let wind = vec![Vec2::new(0.0, -1.0); width * height];
        let mut deposit = vec![0.0; width * height];
        trace_packet(
            &mut deposit,
            width,
            height,
            &elevation,
            &temperature,
            &wind,
            5,
            2,
            1000.0,
            96,
        );
        // Two steps north at most, then the trace leaves the valid Y range.
        let touched = deposit.iter().filter(|&&d| d > 0.0).count();
        assert!(touched <= 2);
    }
}
