/// Linear dimension, used for individual coordinates and grid width/height.
pub type Axis = u8;

/// Area dimension, used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Discrete grid position `(x, y)`.
pub type GridPos = (Axis, Axis);

/// Row-major linear index into the tile grid, `x + width * y`.
pub type CellIndex = usize;

pub const fn cell_area((w, h): GridPos) -> CellCount {
    (w as CellCount).saturating_mul(h as CellCount)
}

/// Linear index of `pos` on a grid `width` tiles wide.
pub const fn cell_index((x, y): GridPos, width: Axis) -> CellIndex {
    x as CellIndex + width as CellIndex * y as CellIndex
}

/// Grid position of `index` on a grid `width` tiles wide.
pub const fn cell_pos(index: CellIndex, width: Axis) -> GridPos {
    ((index % width as CellIndex) as Axis, (index / width as CellIndex) as Axis)
}

/// ndarray index for `pos`; grids are stored as `Array2` with dim `(width, height)`.
pub(crate) const fn nd((x, y): GridPos) -> [usize; 2] {
    [x as usize, y as usize]
}

/// The up-to-8 in-bounds neighbors of `pos` on a grid of `size` tiles,
/// orthogonal and diagonal. Bounds are enforced on both axes before a
/// neighbor is produced, so row wraparound is unrepresentable.
pub fn neighbors(pos: GridPos, size: GridPos) -> impl Iterator<Item = GridPos> {
    let (x, y) = (pos.0 as i16, pos.1 as i16);
    let (w, h) = (size.0 as i16, size.1 as i16);
    (-1..=1)
        .flat_map(move |dy| (-1..=1).map(move |dx| (dx, dy)))
        .filter(|&delta| delta != (0, 0))
        .filter_map(move |(dx, dy)| {
            let (nx, ny) = (x + dx, y + dy);
            let in_bounds = nx >= 0 && nx < w && ny >= 0 && ny < h;
            in_bounds.then(|| (nx as Axis, ny as Axis))
        })
}
