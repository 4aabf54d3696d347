use snake_autopilot_core::{CellCoord, GridBounds, Path};
use snake_autopilot_system_pathfinding::{is_safe, PathSearch};

fn assert_path_is_valid(
    path: &Path,
    bounds: GridBounds,
    obstacles: &[CellCoord],
    ignore_tail: bool,
) {
    for pair in path.cells().windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(pair[1]),
            1,
            "consecutive cells {:?} and {:?} are not 4-adjacent",
            pair[0],
            pair[1]
        );
    }

    for cell in path.cells().iter().skip(1) {
        assert!(
            is_safe(bounds, *cell, obstacles, ignore_tail),
            "path enters unsafe cell {cell:?}"
        );
    }
}

#[test]
fn open_grid_paths_are_manhattan_optimal() {
    let bounds = GridBounds::new(5, 4);
    let search = PathSearch::with_bounds(bounds);

    for start in bounds.cells() {
        for goal in bounds.cells() {
            let path = search
                .find_path(start, goal, &[], true)
                .expect("open grid is fully connected");

            assert_eq!(
                path.len(),
                usize::try_from(start.manhattan_distance(goal)).expect("fits usize") + 1,
                "path from {start:?} to {goal:?} is not optimal"
            );
            assert_eq!(path.start(), start);
            assert_eq!(path.goal(), goal);
            assert_path_is_valid(&path, bounds, &[], true);
        }
    }
}

#[test]
fn ten_by_ten_scenario_reaches_goal_in_six_cells() {
    let search = PathSearch::with_bounds(GridBounds::new(10, 10));

    let path = search
        .find_path(CellCoord::new(0, 0), CellCoord::new(3, 2), &[], true)
        .expect("path exists");

    assert_eq!(path.len(), 6);
    assert_eq!(path.start(), CellCoord::new(0, 0));
    assert_eq!(path.goal(), CellCoord::new(3, 2));
}

#[test]
fn start_equal_to_goal_yields_single_cell_path() {
    let search = PathSearch::with_bounds(GridBounds::new(10, 10));
    let origin = CellCoord::new(0, 0);

    let path = search
        .find_path(origin, origin, &[origin], false)
        .expect("trivial path");

    assert_eq!(path.cells(), &[origin]);
}

#[test]
fn endpoints_outside_grid_have_no_path() {
    let search = PathSearch::with_bounds(GridBounds::new(4, 4));

    assert!(search
        .find_path(CellCoord::new(-1, 0), CellCoord::new(2, 2), &[], true)
        .is_none());
    assert!(search
        .find_path(CellCoord::new(0, 0), CellCoord::new(4, 2), &[], true)
        .is_none());
}

#[test]
fn paths_route_around_walls_of_body() {
    let bounds = GridBounds::new(6, 6);
    let search = PathSearch::with_bounds(bounds);
    // Vertical wall in column 2 with a single gap at row 5.
    let body: Vec<_> = (0..5).map(|row| CellCoord::new(2, row)).collect();

    let start = CellCoord::new(0, 0);
    let goal = CellCoord::new(4, 0);
    let path = search
        .find_path(start, goal, &body, false)
        .expect("gap keeps goal reachable");

    assert!(path.cells().contains(&CellCoord::new(2, 5)));
    assert_eq!(path.len(), 15);
    assert_path_is_valid(&path, bounds, &body, false);
}

/// Body coils around the goal at (2, 2); the tail sits directly above it.
fn coiled_body() -> Vec<CellCoord> {
    vec![
        CellCoord::new(0, 2),
        CellCoord::new(1, 2),
        CellCoord::new(1, 3),
        CellCoord::new(2, 3),
        CellCoord::new(3, 3),
        CellCoord::new(3, 2),
        CellCoord::new(3, 1),
        CellCoord::new(2, 1),
    ]
}

#[test]
fn enclosed_goal_has_no_path_while_tail_blocks() {
    let bounds = GridBounds::new(5, 5);
    let search = PathSearch::with_bounds(bounds);
    let body = coiled_body();

    assert!(search
        .find_path(CellCoord::new(0, 0), CellCoord::new(2, 2), &body, false)
        .is_none());
}

#[test]
fn vacating_tail_reopens_enclosed_goal() {
    let bounds = GridBounds::new(5, 5);
    let search = PathSearch::with_bounds(bounds);
    let body = coiled_body();

    let path = search
        .find_path(CellCoord::new(0, 0), CellCoord::new(2, 2), &body, true)
        .expect("tail cell opens the enclosure");

    assert!(path.cells().contains(&CellCoord::new(2, 1)));
    assert_eq!(path.goal(), CellCoord::new(2, 2));
    assert_path_is_valid(&path, bounds, &body, true);
}

#[test]
fn identical_inputs_produce_identical_paths() {
    let bounds = GridBounds::new(12, 9);
    let search = PathSearch::with_bounds(bounds);
    let body = vec![
        CellCoord::new(5, 4),
        CellCoord::new(5, 5),
        CellCoord::new(5, 6),
        CellCoord::new(4, 6),
    ];

    let first = search.find_path(CellCoord::new(1, 1), CellCoord::new(10, 7), &body, true);
    let second = search.find_path(CellCoord::new(1, 1), CellCoord::new(10, 7), &body, true);

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn search_does_not_mutate_obstacles() {
    let search = PathSearch::with_bounds(GridBounds::new(5, 5));
    let body = coiled_body();
    let snapshot = body.clone();

    let _ = search.find_path(CellCoord::new(0, 0), CellCoord::new(2, 2), &body, true);

    assert_eq!(body, snapshot);
}
