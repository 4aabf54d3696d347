#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic A* search over the snake grid.
//!
//! [`PathSearch`] only stores grid configuration. Every call to
//! [`PathSearch::find_path`] allocates its own frontier, closed set and node
//! table, so no search state survives between ticks.

pub mod occupancy;

use std::{cmp::Ordering, collections::BinaryHeap};

use serde::Deserialize;
use snake_autopilot_core::{CellCoord, Direction, GridBounds, Path};
use tracing::{debug, trace};

pub use occupancy::{is_safe, OccupancyMask};

/// Order in which neighbors are generated while expanding a node.
const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

/// Tunables applied to every search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on expanded nodes before a search reports no path.
    ///
    /// `None` leaves the search bounded only by the grid size.
    pub max_expansions: Option<usize>,
}

/// A* planner bound to a single grid configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathSearch {
    bounds: GridBounds,
    config: SearchConfig,
}

impl PathSearch {
    /// Creates a planner for the provided grid.
    #[must_use]
    pub const fn new(bounds: GridBounds, config: SearchConfig) -> Self {
        Self { bounds, config }
    }

    /// Creates a planner without an expansion budget.
    #[must_use]
    pub fn with_bounds(bounds: GridBounds) -> Self {
        Self::new(bounds, SearchConfig::default())
    }

    /// Grid the planner searches.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Finds a cost-optimal 4-connected path from `start` to `goal`.
    ///
    /// The start cell is exempt from occupancy because it is the snake's own
    /// head; every other cell must pass [`is_safe`] with the given
    /// `ignore_tail` flag. Returns `None` when the frontier empties, when
    /// either endpoint lies outside the grid, or when the expansion budget is
    /// exhausted.
    #[must_use]
    pub fn find_path(
        &self,
        start: CellCoord,
        goal: CellCoord,
        obstacles: &[CellCoord],
        ignore_tail: bool,
    ) -> Option<Path> {
        trace!(
            ?start,
            ?goal,
            segments = obstacles.len(),
            ignore_tail,
            "searching for path"
        );

        if !self.bounds.contains(start) || !self.bounds.contains(goal) {
            debug!(?start, ?goal, "endpoint outside grid, no path");
            return None;
        }

        let occupancy = OccupancyMask::new(self.bounds, obstacles, ignore_tail);
        let mut workspace = SearchWorkspace::new(self.bounds);
        let budget = self
            .config
            .max_expansions
            .unwrap_or_else(|| self.bounds.cell_count());

        workspace.record(start, 0, None);
        workspace.push(start, 0, start.manhattan_distance(goal));

        while let Some(entry) = workspace.frontier.pop() {
            let current = entry.cell;
            if current == goal {
                let path = workspace.reconstruct(goal);
                trace!(
                    expanded = workspace.expanded,
                    length = path.as_ref().map_or(0, Path::len),
                    "path found"
                );
                return path;
            }

            if !workspace.close(current) {
                continue;
            }

            if workspace.expanded > budget {
                debug!(budget, "expansion budget exhausted, no path");
                return None;
            }

            let Some(current_g) = workspace.g(current) else {
                continue;
            };
            let tentative_g = current_g + 1;

            for direction in NEIGHBOR_ORDER {
                let neighbor = current.step(direction);
                if workspace.is_closed(neighbor) || !occupancy.is_safe(neighbor) {
                    continue;
                }

                let improves = workspace
                    .g(neighbor)
                    .map_or(true, |known| tentative_g < known);
                if !improves {
                    continue;
                }

                workspace.record(neighbor, tentative_g, Some(current));
                workspace.push(neighbor, tentative_g, neighbor.manhattan_distance(goal));
            }
        }

        trace!(expanded = workspace.expanded, "frontier exhausted, no path");
        None
    }
}

/// Best-known cost and predecessor for a discovered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeRecord {
    g: u32,
    predecessor: Option<CellCoord>,
}

/// Frontier entry ordered by `f`, then `h`, then insertion sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    h: u32,
    sequence: u64,
    cell: CellCoord,
}

impl FrontierEntry {
    fn rank(&self) -> (u32, u32, u64) {
        (self.f, self.h, self.sequence)
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest rank first.
        other.rank().cmp(&self.rank())
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-call search state, dropped when the search returns.
#[derive(Debug)]
struct SearchWorkspace {
    bounds: GridBounds,
    frontier: BinaryHeap<FrontierEntry>,
    nodes: Vec<Option<NodeRecord>>,
    closed: Vec<bool>,
    sequence: u64,
    expanded: usize,
}

impl SearchWorkspace {
    fn new(bounds: GridBounds) -> Self {
        let cells = bounds.cell_count();
        Self {
            bounds,
            frontier: BinaryHeap::new(),
            nodes: vec![None; cells],
            closed: vec![false; cells],
            sequence: 0,
            expanded: 0,
        }
    }

    fn push(&mut self, cell: CellCoord, g: u32, h: u32) {
        self.frontier.push(FrontierEntry {
            f: g + h,
            h,
            sequence: self.sequence,
            cell,
        });
        self.sequence += 1;
    }

    fn record(&mut self, cell: CellCoord, g: u32, predecessor: Option<CellCoord>) {
        if let Some(slot) = self
            .bounds
            .index(cell)
            .and_then(|index| self.nodes.get_mut(index))
        {
            *slot = Some(NodeRecord { g, predecessor });
        }
    }

    fn g(&self, cell: CellCoord) -> Option<u32> {
        self.node(cell).map(|record| record.g)
    }

    fn node(&self, cell: CellCoord) -> Option<NodeRecord> {
        self.bounds
            .index(cell)
            .and_then(|index| self.nodes.get(index).copied().flatten())
    }

    fn is_closed(&self, cell: CellCoord) -> bool {
        self.bounds
            .index(cell)
            .and_then(|index| self.closed.get(index).copied())
            .unwrap_or(false)
    }

    /// Marks the cell as expanded, returning `false` for stale frontier entries.
    fn close(&mut self, cell: CellCoord) -> bool {
        let Some(slot) = self
            .bounds
            .index(cell)
            .and_then(|index| self.closed.get_mut(index))
        else {
            return false;
        };

        if *slot {
            return false;
        }

        *slot = true;
        self.expanded += 1;
        true
    }

    fn reconstruct(&self, goal: CellCoord) -> Option<Path> {
        let mut cells = vec![goal];
        let mut cursor = goal;

        while let Some(predecessor) = self.node(cursor).and_then(|record| record.predecessor) {
            if cells.len() > self.nodes.len() {
                return None;
            }
            cells.push(predecessor);
            cursor = predecessor;
        }

        cells.reverse();
        Path::from_cells(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(f: u32, h: u32, sequence: u64) -> FrontierEntry {
        FrontierEntry {
            f,
            h,
            sequence,
            cell: CellCoord::new(0, 0),
        }
    }

    #[test]
    fn frontier_pops_lowest_f_then_lowest_h_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(5, 1, 0));
        heap.push(entry(4, 3, 1));
        heap.push(entry(4, 1, 3));
        heap.push(entry(4, 1, 2));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|entry| entry.rank())
            .collect();

        assert_eq!(order, vec![(4, 1, 2), (4, 1, 3), (4, 3, 1), (5, 1, 0)]);
    }

    #[test]
    fn closing_a_cell_twice_reports_stale_entry() {
        let mut workspace = SearchWorkspace::new(GridBounds::new(2, 2));
        let cell = CellCoord::new(1, 1);

        assert!(workspace.close(cell));
        assert!(!workspace.close(cell));
        assert!(!workspace.close(CellCoord::new(2, 0)));
        assert_eq!(workspace.expanded, 1);
    }

    #[test]
    fn reconstruct_walks_predecessors_back_to_start() {
        let mut workspace = SearchWorkspace::new(GridBounds::new(3, 3));
        workspace.record(CellCoord::new(0, 0), 0, None);
        workspace.record(CellCoord::new(1, 0), 1, Some(CellCoord::new(0, 0)));
        workspace.record(CellCoord::new(1, 1), 2, Some(CellCoord::new(1, 0)));

        let path = workspace
            .reconstruct(CellCoord::new(1, 1))
            .expect("path reconstructs");

        assert_eq!(
            path.cells(),
            &[
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1)
            ]
        );
    }

    #[test]
    fn expansion_budget_cuts_search_short() {
        let bounds = GridBounds::new(10, 10);
        let limited = PathSearch::new(
            bounds,
            SearchConfig {
                max_expansions: Some(2),
            },
        );
        let unlimited = PathSearch::with_bounds(bounds);

        let start = CellCoord::new(0, 0);
        let goal = CellCoord::new(9, 9);
        assert!(limited.find_path(start, goal, &[], true).is_none());
        assert!(unlimited.find_path(start, goal, &[], true).is_some());
    }
}
