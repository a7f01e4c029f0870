/// Cylindrical grid addressing shared by every pipeline stage.
///
/// The map is an equirectangular projection: X wraps modulo width so column
/// `width - 1` stitches seamlessly to column `0`, while Y clamps at the poles.
/// All per-cell arrays are flat, row-major `y * width + x`.

/// The 8-neighborhood offsets used by boundary scans and river tracing.
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Wrap a (possibly negative) column index onto `[0, width)`.
pub fn wrap_x(x: i32, width: usize) -> usize {
    x.rem_euclid(width as i32) as usize
}

/// Clamp a (possibly out-of-range) row index onto `[0, height)`.
pub fn clamp_y(y: i32, height: usize) -> usize {
    y.clamp(0, height as i32 - 1) as usize
}

/// Flat row-major index of a cell.
pub fn idx(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Shortest horizontal offset magnitude between two columns on the wrapping axis.
pub fn wrapped_dx(x0: usize, x1: usize, width: usize) -> f32 {
    let d = (x0 as i32 - x1 as i32).unsigned_abs() as usize;
    d.min(width - d) as f32
}

/// Signed shortest horizontal offset from `x0` to `x1`, in `(-width/2, width/2]`.
pub fn wrapped_dx_signed(x0: usize, x1: usize, width: usize) -> f32 {
    let w = width as i32;
    let mut d = x1 as i32 - x0 as i32;
    if d > w / 2 {
        d -= w;
    } else if d < -(w / 2) {
        d += w;
    }
    d as f32
}

/// Squared distance between two cells with the X axis wrapped.
pub fn wrapped_dist_sq(x0: usize, y0: usize, x1: usize, y1: usize, width: usize) -> f32 {
    let dx = wrapped_dx(x0, x1, width);
    let dy = y0 as f32 - y1 as f32;
    dx * dx + dy * dy
}

/// Shape guard: a stage buffer whose length does not match the cell count is
/// replaced by a zero-filled buffer of the correct size instead of being
/// trusted downstream.
pub fn ensure_cells(buf: Vec<f32>, cells: usize) -> Vec<f32> {
    if buf.len() == cells {
        buf
    } else {
        log::warn!(
            "stage buffer length {} does not match cell count {}, replacing with zeros",
            buf.len(),
            cells
        );
        vec![0.0; cells]
    }
}
