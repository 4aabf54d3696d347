//! Occupancy oracle that decides whether the snake may enter a cell.

use snake_autopilot_core::{CellCoord, GridBounds};

/// Reports whether `cell` is safe to enter given the body segments in `obstacles`.
///
/// Cells outside `bounds` are never safe. A cell matching any obstacle is
/// unsafe, except the final (tail) obstacle when `ignore_tail` is set and the
/// body has more than one segment: under single-step movement the tail has
/// vacated its cell by the time the head could arrive.
#[must_use]
pub fn is_safe(
    bounds: GridBounds,
    cell: CellCoord,
    obstacles: &[CellCoord],
    ignore_tail: bool,
) -> bool {
    if !bounds.contains(cell) {
        return false;
    }

    blocking_segments(obstacles, ignore_tail)
        .iter()
        .all(|segment| *segment != cell)
}

/// Dense precomputation of [`is_safe`] for every cell of the grid.
///
/// The search loop queries occupancy for each expanded neighbor, so the
/// obstacle list is rasterized once per call instead of scanned per query.
#[derive(Clone, Debug)]
pub struct OccupancyMask {
    bounds: GridBounds,
    blocked: Vec<bool>,
}

impl OccupancyMask {
    /// Rasterizes the obstacle list into a mask covering `bounds`.
    #[must_use]
    pub fn new(bounds: GridBounds, obstacles: &[CellCoord], ignore_tail: bool) -> Self {
        let mut blocked = vec![false; bounds.cell_count()];
        for segment in blocking_segments(obstacles, ignore_tail) {
            if let Some(index) = bounds.index(*segment) {
                blocked[index] = true;
            }
        }
        Self { bounds, blocked }
    }

    /// Reports whether the cell is in bounds and unoccupied.
    #[must_use]
    pub fn is_safe(&self, cell: CellCoord) -> bool {
        self.bounds
            .index(cell)
            .and_then(|index| self.blocked.get(index).copied())
            .map_or(false, |blocked| !blocked)
    }
}

fn blocking_segments(obstacles: &[CellCoord], ignore_tail: bool) -> &[CellCoord] {
    match obstacles.split_last() {
        Some((_, body)) if ignore_tail && !body.is_empty() => body,
        _ => obstacles,
    }
}
