use crate::constants::*;
use crate::grid::{idx, wrapped_dist_sq};
use glam::Vec2;
use rand::Rng;

/// A region of the grid sharing one rigid velocity, crust type and base elevation.
pub struct Plate {
    pub id: usize,
    /// Rigid plate velocity, components in [-1, 1].
    pub velocity: Vec2,
    pub oceanic: bool,
    /// Resting elevation away from boundaries. Oceanic plates sample a lower
    /// range than continental ones.
    pub base_elevation: f32,
    /// Seed cell the plate grew from; doubles as its representative coordinate
    /// when projecting relative velocities at boundaries.
    pub seed_x: usize,
    pub seed_y: usize,
}

/// Per-cell nearest-plate assignment, built once and read-only thereafter.
pub struct PlateField {
    pub plates: Vec<Plate>,
    /// Winning plate id per cell, row-major.
    pub owner: Vec<u16>,
    pub width: usize,
    pub height: usize,
}

impl PlateField {
    /// Scatter plate seeds and assign every cell to its nearest seed using
    /// wrapped-X squared distance. Ties go to the lowest plate id.
    pub fn build<R: Rng>(
        width: usize,
        height: usize,
        plate_count: usize,
        ocean_ratio: f64,
        rng: &mut R,
    ) -> Self {
        let plate_count = plate_count.clamp(2, 128);

        let seeds: Vec<(usize, usize)> = (0..plate_count)
            .map(|_| (rng.random_range(0..width), rng.random_range(0..height)))
            .collect();

        let plates: Vec<Plate> = seeds
            .iter()
            .enumerate()
            .map(|(id, &(seed_x, seed_y))| {
                let velocity = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
                let oceanic = rng.random_bool(ocean_ratio);
                let base_elevation = if oceanic {
                    rng.random_range(OCEANIC_BASE_MIN..OCEANIC_BASE_MAX)
                } else {
                    rng.random_range(CONTINENTAL_BASE_MIN..CONTINENTAL_BASE_MAX)
                };
                Plate {
                    id,
                    velocity,
                    oceanic,
                    base_elevation,
                    seed_x,
                    seed_y,
                }
            })
            .collect();

        let mut owner = vec![0u16; width * height];
        for y in 0..height {
            for x in 0..width {
                owner[idx(x, y, width)] = nearest_seed(x, y, &seeds, width) as u16;
            }
        }

        Self {
            plates,
            owner,
            width,
            height,
        }
    }

    pub fn owner_at(&self, x: usize, y: usize) -> usize {
        self.owner[idx(x, y, self.width)] as usize
    }

    pub fn plate_of(&self, x: usize, y: usize) -> &Plate {
        &self.plates[self.owner_at(x, y)]
    }
}

/// Brute-force nearest-seed search. Strict `<` keeps the first (lowest-id)
/// seed on exact distance ties.
fn nearest_seed(x: usize, y: usize, seeds: &[(usize, usize)], width: usize) -> usize {
    let mut best_id = 0;
    let mut best_d2 = f32::INFINITY;
    for (id, &(sx, sy)) in seeds.iter().enumerate() {
        let d2 = wrapped_dist_sq(x, y, sx, sy, width);
        if d2 < best_d2 {
            best_d2 = d2;
            best_id = id;
        }
    }
    best_id
}
