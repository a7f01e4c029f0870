/// Plate boundary detection and stress classification.
///
/// Walks every cell's 8-neighborhood (X wraps, Y clamps) looking for a
/// neighboring cell owned by a different plate, decomposes the relative plate
/// velocity at that boundary into a parallel (closing/opening) and a
/// perpendicular (shear) component, and aggregates one deduplicated force
/// record per ordered plate pair.
use crate::grid::{NEIGHBORS_8, clamp_y, idx, wrap_x, wrapped_dx_signed};
use crate::plate::PlateField;
use glam::Vec2;
use std::collections::BTreeMap;

/// Type of plate boundary interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryType {
    /// Plates closing on each other.
    Convergent,
    /// Plates separating.
    Divergent,
    /// Plates sliding past each other.
    Transform,
}

/// Per-cell stress record. Interior cells keep `border == false` and no
/// neighbor.
#[derive(Debug, Clone, Copy)]
pub struct StressCell {
    pub border: bool,
    /// Parallel force component; positive means the plates are closing.
    pub direct: f32,
    /// Perpendicular (shear) force magnitude.
    pub shear: f32,
    pub boundary: Option<BoundaryType>,
    /// Owning plate id.
    pub plate: u16,
    /// First differing neighbor found, `None` for interior cells.
    pub neighbor: Option<u16>,
}

impl StressCell {
    fn interior(plate: u16) -> Self {
        Self {
            border: false,
            direct: 0.0,
            shear: 0.0,
            boundary: None,
            plate,
            neighbor: None,
        }
    }
}

/// Aggregated boundary force for one ordered plate pair. Built once per pair
/// so the elevation stage can apply distance-weighted influence without
/// rescanning the full stress map.
#[derive(Debug, Clone, Copy)]
pub struct NeighborForce {
    pub plate: u16,
    pub neighbor: u16,
    pub boundary: BoundaryType,
    pub direct: f32,
    pub shear: f32,
}

/// The full transient stress stage output. Dropped before the surface arrays
/// are returned.
pub struct StressField {
    pub cells: Vec<StressCell>,
    /// Sorted by (plate, neighbor) for reproducible iteration.
    pub forces: Vec<NeighborForce>,
    /// Boundary cell coordinates per ordered plate pair, for
    /// nearest-boundary-point queries.
    edges: BTreeMap<(u16, u16), Vec<(u16, u16)>>,
    pub width: usize,
    pub height: usize,
}

impl StressField {
    pub fn build(field: &PlateField) -> Self {
        let (width, height) = (field.width, field.height);
        let mut cells = Vec::with_capacity(width * height);
        let mut force_map: BTreeMap<(u16, u16), NeighborForce> = BTreeMap::new();
        let mut edges: BTreeMap<(u16, u16), Vec<(u16, u16)>> = BTreeMap::new();

        for y in 0..height {
            for x in 0..width {
                let plate = field.owner[idx(x, y, width)];
                let mut cell = StressCell::interior(plate);

                // First differing neighbor wins; the rest are ignored.
                for (dx, dy) in NEIGHBORS_8 {
                    let nx = wrap_x(x as i32 + dx, width);
                    let ny = clamp_y(y as i32 + dy, height);
                    let neighbor = field.owner[idx(nx, ny, width)];
                    if neighbor != plate {
                        let (direct, shear, boundary) =
                            decompose_stress(field, plate as usize, neighbor as usize);
                        cell = StressCell {
                            border: true,
                            direct,
                            shear,
                            boundary: Some(boundary),
                            plate,
                            neighbor: Some(neighbor),
                        };

                        let key = (plate, neighbor);
                        force_map.entry(key).or_insert(NeighborForce {
                            plate,
                            neighbor,
                            boundary,
                            direct,
                            shear,
                        });
                        edges.entry(key).or_default().push((x as u16, y as u16));
                        break;
                    }
                }

                cells.push(cell);
            }
        }

        // BTreeMap iteration is already ordered by (plate, neighbor).
        let forces = force_map.into_values().collect();

        Self {
            cells,
            forces,
            edges,
            width,
            height,
        }
    }

    /// Forces whose owning side is `plate`.
    pub fn forces_for(&self, plate: u16) -> impl Iterator<Item = &NeighborForce> {
        self.forces.iter().filter(move |f| f.plate == plate)
    }

    /// Boundary cell coordinates for an ordered plate pair.
    pub fn edge(&self, plate: u16, neighbor: u16) -> Option<&[(u16, u16)]> {
        self.edges.get(&(plate, neighbor)).map(Vec::as_slice)
    }

    pub fn cell(&self, x: usize, y: usize) -> &StressCell {
        &self.cells[idx(x, y, self.width)]
    }
}

/// Project the relative velocity of two plates onto the wrapped line between
/// their seed cells. The parallel component is positive when the plates close;
/// the residual is shear. Shear dominating the parallel component makes the
/// boundary a transform fault.
fn decompose_stress(field: &PlateField, a: usize, b: usize) -> (f32, f32, BoundaryType) {
    let pa = &field.plates[a];
    let pb = &field.plates[b];

    let axis = Vec2::new(
        wrapped_dx_signed(pa.seed_x, pb.seed_x, field.width),
        pb.seed_y as f32 - pa.seed_y as f32,
    );
    let len = axis.length();
    if len < 1e-6 {
        // Coincident seeds; no meaningful normal direction.
        return (0.0, 0.0, BoundaryType::Transform);
    }
    let axis = axis / len;

    let relative = pa.velocity - pb.velocity;
    let direct = relative.dot(axis);
    let shear = (relative - axis * direct).length();

    let boundary = if shear > direct.abs() {
        BoundaryType::Transform
    } else if direct > 0.0 {
        BoundaryType::Convergent
    } else {
        BoundaryType::Divergent
    };

    (direct, shear, boundary)
}
