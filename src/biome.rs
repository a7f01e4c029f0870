/// Discrete biome classification from (elevation, temperature, moisture).
///
/// The classifier is a pure decision tree; the same inputs always produce the
/// same biome. Transition softness between biome pairs lives in a read-only
/// blend-strength table consumers can use to feather borders when painting.
use crate::constants::*;
use std::collections::HashMap;
use std::sync::OnceLock;

/// The 20 surface-cover categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Biome {
    Ice,
    Ocean,
    ShallowOcean,
    Coastland,
    RockyMountain,
    SnowyMountain,
    HotDesert,
    Savannah,
    TropicalSeasonalForest,
    TropicalRainforest,
    TemperateDesert,
    Shrubland,
    Grassland,
    TemperateForest,
    TemperateRainforest,
    ColdDesert,
    BorealShrubland,
    Taiga,
    Tundra,
    BarrenTundra,
}

/// Classify one cell. Pure in its inputs.
pub fn classify(elevation: f32, temperature: f32, moisture: f32, sea_level: f32) -> Biome {
    let h = elevation;
    let t = temperature;
    let m = moisture;

    if t < 0.03 && h < 0.65 {
        return Biome::Ice;
    }
    if h < DEEP_OCEAN_FACTOR * sea_level {
        return Biome::Ocean;
    }
    if h < sea_level {
        return Biome::ShallowOcean;
    }
    if h < sea_level + COAST_BAND {
        return Biome::Coastland;
    }
    if h >= MOUNTAIN_LEVEL {
        return if t > 0.2 {
            Biome::RockyMountain
        } else {
            Biome::SnowyMountain
        };
    }

    if t > 0.6 {
        // Tropical band.
        if m < 0.1 {
            Biome::HotDesert
        } else if m < 0.3 {
            Biome::Savannah
        } else if m < 0.5 {
            Biome::TropicalSeasonalForest
        } else {
            Biome::TropicalRainforest
        }
    } else if t > 0.25 {
        // Temperate band.
        if m < 0.08 {
            Biome::TemperateDesert
        } else if m < 0.2 {
            Biome::Shrubland
        } else if m < 0.35 {
            Biome::Grassland
        } else if m < 0.55 {
            Biome::TemperateForest
        } else {
            Biome::TemperateRainforest
        }
    } else if t > 0.05 {
        // Boreal band.
        if m < 0.1 {
            Biome::ColdDesert
        } else if m < 0.25 {
            Biome::BorealShrubland
        } else {
            Biome::Taiga
        }
    } else if m > 0.12 {
        Biome::Tundra
    } else {
        Biome::BarrenTundra
    }
}

/// Default feathering for pairs without a dedicated table entry.
const DEFAULT_BLEND: f32 = 0.25;

static BLEND_TABLE: OnceLock<HashMap<(Biome, Biome), f32>> = OnceLock::new();

/// How softly two biomes blend into each other at their shared border, in
/// [0, 1]. Keyed by unordered pair; built once, read many times.
pub fn blend_strength(a: Biome, b: Biome) -> f32 {
    if a == b {
        return 1.0;
    }
    let table = BLEND_TABLE.get_or_init(build_blend_table);
    *table.get(&unordered(a, b)).unwrap_or(&DEFAULT_BLEND)
}

fn unordered(a: Biome, b: Biome) -> (Biome, Biome) {
    if (a as u8) <= (b as u8) { (a, b) } else { (b, a) }
}

fn build_blend_table() -> HashMap<(Biome, Biome), f32> {
    use Biome::*;
    let entries: &[(Biome, Biome, f32)] = &[
        // Moisture neighbors inside a band blend wide.
        (HotDesert, Savannah, 0.6),
        (Savannah, TropicalSeasonalForest, 0.6),
        (TropicalSeasonalForest, TropicalRainforest, 0.7),
        (TemperateDesert, Shrubland, 0.6),
        (Shrubland, Grassland, 0.6),
        (Grassland, TemperateForest, 0.6),
        (TemperateForest, TemperateRainforest, 0.7),
        (ColdDesert, BorealShrubland, 0.6),
        (BorealShrubland, Taiga, 0.6),
        // Band-to-band transitions blend a little tighter.
        (Savannah, Grassland, 0.4),
        (TropicalSeasonalForest, TemperateForest, 0.4),
        (TemperateForest, Taiga, 0.4),
        (Taiga, Tundra, 0.5),
        (Tundra, BarrenTundra, 0.5),
        (Tundra, Ice, 0.5),
        (BarrenTundra, Ice, 0.6),
        // Water and shoreline edges stay crisp.
        (Ocean, ShallowOcean, 0.3),
        (ShallowOcean, Coastland, 0.15),
        (Coastland, Grassland, 0.2),
        (RockyMountain, SnowyMountain, 0.5),
    ];
    entries
        .iter()
        .map(|&(a, b, s)| (unordered(a, b), s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SEA: f32 = 0.5;

    #[rstest]
    #[case(0.3, 0.01, 0.0, Biome::Ice)]
    #[case(0.2, 0.5, 0.0, Biome::Ocean)]
    #[case(0.4, 0.5, 0.0, Biome::ShallowOcean)]
    #[case(0.51, 0.5, 0.0, Biome::Coastland)]
    #[case(0.7, 0.5, 0.0, Biome::RockyMountain)]
    #[case(0.7, 0.1, 0.0, Biome::SnowyMountain)]
    #[case(0.6, 0.7, 0.05, Biome::HotDesert)]
    #[case(0.6, 0.7, 0.2, Biome::Savannah)]
    #[case(0.6, 0.7, 0.4, Biome::TropicalSeasonalForest)]
    #[case(0.6, 0.7, 0.8, Biome::TropicalRainforest)]
    #[case(0.6, 0.4, 0.05, Biome::TemperateDesert)]
    #[case(0.6, 0.4, 0.15, Biome::Shrubland)]
    #[case(0.6, 0.4, 0.3, Biome::Grassland)]
    #[case(0.6, 0.4, 0.5, Biome::TemperateForest)]
    #[case(0.6, 0.4, 0.8, Biome::TemperateRainforest)]
    #[case(0.6, 0.1, 0.05, Biome::ColdDesert)]
    #[case(0.6, 0.1, 0.2, Biome::BorealShrubland)]
    #[case(0.6, 0.1, 0.5, Biome::Taiga)]
    #[case(0.6, 0.04, 0.5, Biome::Tundra)]
    #[case(0.6, 0.04, 0.05, Biome::BarrenTundra)]
    fn decision_tree_covers_all_twenty_biomes(
        #[case] h: f32,
        #[case] t: f32,
        #[case] m: f32,
        #[case] expected: Biome,
    ) {
        assert_eq!(classify(h, t, m, SEA), expected);
    }

    #[test]
    fn classification_is_pure() {
        for _ in 0..3 {
            assert_eq!(classify(0.6, 0.7, 0.4, SEA), classify(0.6, 0.7, 0.4, SEA));
        }
    }

    #[test]
    fn cold_lowland_ice_beats_ocean_tiers() {
        // Frozen sea: temperature gate runs before the ocean depth tiers.
        assert_eq!(classify(0.1, 0.0, 0.0, SEA), Biome::Ice);
    }

    #[test]
    fn deep_ocean_threshold_scales_with_sea_level() {
        let sea = 0.7;
        assert_eq!(classify(0.39, 0.5, 0.0, sea), Biome::Ocean);
        assert_eq!(classify(0.41, 0.5, 0.0, sea), Biome::ShallowOcean);
    }

    #[test]
    fn blend_table_is_symmetric() {
        assert_eq!(
            blend_strength(Biome::HotDesert, Biome::Savannah),
            blend_strength(Biome::Savannah, Biome::HotDesert)
        );
        assert_eq!(blend_strength(Biome::Taiga, Biome::Taiga), 1.0);
        // Unlisted pairs fall back to the default.
        assert_eq!(blend_strength(Biome::Ocean, Biome::HotDesert), 0.25);
    }
}
