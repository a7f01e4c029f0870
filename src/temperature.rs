/// Temperature field: a latitude band whose width the heat factor controls,
/// perturbed by fractal noise and cooled by altitude.
use crate::config::GenerationProfile;
use crate::constants::*;
use crate::elevation::fractal_field;
use crate::grid::idx;

/// Build the per-cell temperature field. Values are unbounded and can go
/// negative at altitude or near the poles.
pub fn simulate(
    width: usize,
    height: usize,
    noise_seed: u32,
    profile: &GenerationProfile,
    elevation: &[f32],
) -> Vec<f32> {
    let noise = fractal_field(width, height, noise_seed, profile.continental_frequency);

    // Cube-root scaling keeps the knob usable across its 1..=1000 range: the
    // exponent grows from 1 (broad, almost linear band) to 10 (narrow
    // equatorial band with wide cold caps).
    let band_exponent = profile.heat_factor.cbrt();

    let mut out = vec![0.0; width * height];
    for y in 0..height {
        let band = latitude_band(y, height, band_exponent);
        for x in 0..width {
            let i = idx(x, y, width);
            let mut t = band * (1.0 - TEMPERATURE_NOISE_WEIGHT) + noise[i] * TEMPERATURE_NOISE_WEIGHT;
            t -= lapse_penalty(elevation[i]);
            out[i] = t;
        }
    }
    out
}

/// Per-row warmth in [0, 1]: 1 at the equator, 0 at the poles, band width
/// shaped by the (already cube-root-scaled) exponent.
fn latitude_band(y: usize, height: usize, exponent: f32) -> f32 {
    let lat = (y as f32 / (height - 1).max(1) as f32) * 2.0 - 1.0;
    (1.0 - lat.abs()).powf(exponent)
}

/// Altitude cooling: the highest cleared threshold decides the penalty.
fn lapse_penalty(elevation: f32) -> f32 {
    for &(threshold, penalty) in &LAPSE_STEPS {
        if elevation > threshold {
            return penalty;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn warm_band_rows(heat_factor: f32) -> usize {
        let profile = GenerationProfile {
            heat_factor,
            ..GenerationProfile::default()
        };
        let elevation = vec![0.0; 64 * 32];
        let temperature = simulate(64, 32, 42, &profile, &elevation);
        (0..32)
            .filter(|&y| (0..64).any(|x| temperature[idx(x, y, 64)] > 0.5))
            .count()
    }

    #[test]
    fn max_heat_factor_narrows_the_equatorial_band() {
        let broad = warm_band_rows(1.0);
        let narrow = warm_band_rows(1000.0);
        assert!(
            narrow < broad,
            "expected narrower warm band at heat factor 1000 ({narrow} vs {broad})"
        );
    }

    #[rstest]
    #[case(0.95, 0.30)]
    #[case(0.85, 0.24)]
    #[case(0.75, 0.18)]
    #[case(0.65, 0.12)]
    #[case(0.55, 0.08)]
    #[case(0.45, 0.04)]
    #[case(0.30, 0.0)]
    fn lapse_penalty_steps_with_altitude(#[case] elevation: f32, #[case] expected: f32) {
        assert_eq!(lapse_penalty(elevation), expected);
    }

    #[test]
    fn equator_is_warmer_than_the_poles() {
        let profile = GenerationProfile::default();
        let elevation = vec![0.0; 64 * 32];
        let temperature = simulate(64, 32, 7, &profile, &elevation);
        let equator: f32 = (0..64).map(|x| temperature[idx(x, 16, 64)]).sum::<f32>() / 64.0;
        let pole: f32 = (0..64).map(|x| temperature[idx(x, 0, 64)]).sum::<f32>() / 64.0;
        assert!(equator > pole);
    }

    #[test]
    fn altitude_cools_identical_latitudes() {
        let profile = GenerationProfile::default();
        let mut elevation = vec![0.0; 64 * 32];
        elevation[idx(10, 16, 64)] = 0.95;
        let temperature = simulate(64, 32, 7, &profile, &elevation);
        let flat = simulate(64, 32, 7, &profile, &vec![0.0; 64 * 32]);
        assert!(temperature[idx(10, 16, 64)] < flat[idx(10, 16, 64)]);
    }
}
