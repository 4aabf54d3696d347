#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Autopilot engine.
//!
//! This crate defines the value types and the message surface that connect the
//! host simulation, the pathfinding system and the steering policy. Adapters
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points awarded each time the snake eats a piece of food.
pub const FOOD_SCORE: u32 = 10;

/// Playfield used when no explicit configuration is supplied.
pub const DEFAULT_PLAYFIELD: Playfield = Playfield::new(720, 480);

/// Cell size used when no explicit configuration is supplied.
pub const DEFAULT_CELL_SIZE: u32 = 10;

/// Selects who is steering the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlMode {
    /// Steering commands originate from the player.
    Manual,
    /// Steering commands originate from the autopilot policy.
    Autopilot,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Reconfigures the playfield and restarts the game on the new grid.
    Configure {
        /// Grid mapping derived from the playfield and cell size.
        grid: GridMapper,
    },
    /// Requests that the world hand steering to the provided controller.
    SetControlMode {
        /// Controller that should steer from now on.
        mode: ControlMode,
    },
    /// Requests that the snake turn toward the provided direction on the next tick.
    Steer {
        /// Desired heading.
        direction: Direction,
    },
    /// Advances the simulation by a single step.
    Tick,
    /// Restores the initial snake, score and food.
    Reset,
}

/// Reason a snake died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionCause {
    /// The head left the grid bounds.
    Wall,
    /// The head entered a cell occupied by the body.
    SelfCollision,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation advanced by one step.
    TimeAdvanced {
        /// Number of ticks processed since the last reset.
        tick: u64,
    },
    /// Announces that steering was handed to a different controller.
    ControlModeChanged {
        /// Controller that became active.
        mode: ControlMode,
    },
    /// Confirms that the snake head moved between two cells.
    SnakeAdvanced {
        /// Cell the head occupied before moving.
        from: CellCoord,
        /// Cell the head occupies after moving.
        to: CellCoord,
        /// Heading used for the move.
        direction: Direction,
    },
    /// Confirms that the snake ate the food and grew by one segment.
    FoodEaten {
        /// Cell the food occupied.
        cell: CellCoord,
        /// Score after the food was eaten.
        score: u32,
    },
    /// Announces a new food location.
    FoodSpawned {
        /// Cell the food occupies.
        cell: CellCoord,
    },
    /// Reports that the snake collided and the game ended.
    SnakeDied {
        /// What the head ran into.
        cause: CollisionCause,
        /// Final score of the game.
        score: u32,
    },
    /// Reports that no free cell remains for food; the game is won.
    BoardFilled {
        /// Final score of the game.
        score: u32,
    },
    /// Confirms that the world returned to its initial state.
    WorldReset,
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed, documented order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Column and row delta applied by a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Direction of the single step leading from `from` to `to`.
    ///
    /// Returns `None` unless the cells are 4-adjacent.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Self> {
        let column_delta = i64::from(to.column()) - i64::from(from.column());
        let row_delta = i64::from(to.row()) - i64::from(from.row());
        match (column_delta.signum(), row_delta.signum()) {
            _ if column_delta.abs() + row_delta.abs() != 1 => None,
            (1, 0) => Some(Self::Right),
            (-1, 0) => Some(Self::Left),
            (0, 1) => Some(Self::Down),
            (0, -1) => Some(Self::Up),
            _ => None,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that cells beyond the grid edge remain
/// representable; [`GridBounds::contains`] decides whether a cell is playable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Cell reached by a single step in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (column_delta, row_delta) = direction.offset();
        Self::new(
            self.column.saturating_add(column_delta),
            self.row.saturating_add(row_delta),
        )
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

/// Continuous position in rendering space, measured in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downward.
    pub y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Dimensions of the playable area in the discrete grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    columns: u32,
    rows: u32,
}

impl GridBounds {
    /// Creates bounds spanning `columns × rows` cells.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let cells = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(cells).unwrap_or(usize::MAX)
    }

    /// Reports whether the cell lies within `[0, columns) × [0, rows)`.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        u32::try_from(cell.column()).map_or(false, |column| column < self.columns)
            && u32::try_from(cell.row()).map_or(false, |row| row < self.rows)
    }

    /// Row-major dense index of the cell, if it lies within the bounds.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Cell stored at the provided row-major index.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cell_count() {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let column = i32::try_from(index % width).ok()?;
        let row = i32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Iterator over every in-bounds cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = CellCoord> {
        (0..self.cell_count()).filter_map(move |index| self.cell_at(index))
    }
}

/// Size of the continuous playfield measured in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Playfield {
    /// Horizontal extent of the playfield.
    pub width: u32,
    /// Vertical extent of the playfield.
    pub height: u32,
}

impl Playfield {
    /// Creates a playfield description.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Largest playable extent, in world units, along either axis.
///
/// Positions are `f32`, which represents every integer up to 2^24 exactly; past
/// that the cell and position mappings stop being inverse.
pub const MAX_GRID_EXTENT: u32 = 1 << 24;

/// Two-way mapping between continuous positions and discrete cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridMapperFields")]
pub struct GridMapper {
    cell_size: u32,
    bounds: GridBounds,
}

#[derive(Deserialize)]
struct GridMapperFields {
    cell_size: u32,
    bounds: GridBounds,
}

impl TryFrom<GridMapperFields> for GridMapper {
    type Error = AutopilotError;

    fn try_from(fields: GridMapperFields) -> Result<Self, Self::Error> {
        Self::validated(fields.cell_size, fields.bounds)
    }
}

impl GridMapper {
    /// Derives the grid bounds from the playfield size and the fixed cell size.
    ///
    /// Columns and rows use floor division, so a partial trailing cell is not
    /// playable. Fails when the cell size is zero, the playfield cannot hold
    /// a single cell, or the playable extent exceeds [`MAX_GRID_EXTENT`].
    pub fn new(playfield: Playfield, cell_size: u32) -> Result<Self, AutopilotError> {
        if cell_size == 0 {
            return Err(AutopilotError::InvalidGrid {
                playfield,
                cell_size,
            });
        }

        let bounds = GridBounds::new(playfield.width / cell_size, playfield.height / cell_size);
        Self::validated(cell_size, bounds).map_err(|_| AutopilotError::InvalidGrid {
            playfield,
            cell_size,
        })
    }

    fn validated(cell_size: u32, bounds: GridBounds) -> Result<Self, AutopilotError> {
        let extent = |cells: u32| u64::from(cells) * u64::from(cell_size);
        let width = extent(bounds.columns());
        let height = extent(bounds.rows());
        let limit = u64::from(MAX_GRID_EXTENT);

        if cell_size == 0 || bounds.cell_count() == 0 || width > limit || height > limit {
            return Err(AutopilotError::InvalidGrid {
                playfield: Playfield::new(
                    u32::try_from(width).unwrap_or(u32::MAX),
                    u32::try_from(height).unwrap_or(u32::MAX),
                ),
                cell_size,
            });
        }

        Ok(Self { cell_size, bounds })
    }

    /// Side length of a single square cell expressed in world units.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Discrete bounds of the grid.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Cell containing the provided position.
    #[must_use]
    pub fn to_cell(&self, position: Position) -> CellCoord {
        let size = self.cell_size as f32;
        CellCoord::new(
            (position.x / size).floor() as i32,
            (position.y / size).floor() as i32,
        )
    }

    /// Upper-left corner of the provided cell in world units.
    #[must_use]
    pub fn to_position(&self, cell: CellCoord) -> Position {
        let size = self.cell_size as f32;
        Position::new(cell.column() as f32 * size, cell.row() as f32 * size)
    }
}

impl Default for GridMapper {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            bounds: GridBounds::new(
                DEFAULT_PLAYFIELD.width / DEFAULT_CELL_SIZE,
                DEFAULT_PLAYFIELD.height / DEFAULT_CELL_SIZE,
            ),
        }
    }
}

/// Ordered sequence of 4-adjacent cells from a start cell to a goal cell.
///
/// A path always contains at least one cell; a single-cell path means the
/// start already equals the goal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<CellCoord>", into = "Vec<CellCoord>")]
pub struct Path {
    start: CellCoord,
    cells: Vec<CellCoord>,
}

impl Path {
    /// Wraps the provided cells, returning `None` for an empty sequence.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Option<Self> {
        let start = *cells.first()?;
        Some(Self { start, cells })
    }

    /// Cells composing the path, start first.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Number of cells in the path, including both endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; paths contain at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First cell of the path.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Last cell of the path.
    #[must_use]
    pub fn goal(&self) -> CellCoord {
        self.cells.last().copied().unwrap_or(self.start)
    }

    /// Cell following the start, if the path has one.
    #[must_use]
    pub fn next_step(&self) -> Option<CellCoord> {
        self.cells.get(1).copied()
    }

    /// Direction of the first move along the path.
    #[must_use]
    pub fn first_direction(&self) -> Option<Direction> {
        self.next_step()
            .and_then(|next| Direction::between(self.start(), next))
    }

    /// Converts every cell into its upper-left world position.
    #[must_use]
    pub fn to_positions(&self, mapper: &GridMapper) -> Vec<Position> {
        self.cells
            .iter()
            .map(|cell| mapper.to_position(*cell))
            .collect()
    }
}

impl TryFrom<Vec<CellCoord>> for Path {
    type Error = AutopilotError;

    fn try_from(cells: Vec<CellCoord>) -> Result<Self, Self::Error> {
        Self::from_cells(cells).ok_or(AutopilotError::EmptyPath)
    }
}

impl From<Path> for Vec<CellCoord> {
    fn from(path: Path) -> Self {
        path.cells
    }
}

/// Lifecycle state of the current game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The snake is alive and ticks advance it.
    Running,
    /// The snake collided; ticks are ignored until a reset.
    Crashed {
        /// What the head ran into.
        cause: CollisionCause,
    },
    /// The body covers every cell that could hold food.
    Won,
}

/// Read-only snapshot of the snake and the food it is chasing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeView {
    body: Vec<CellCoord>,
    heading: Direction,
    food: Option<CellCoord>,
    status: GameStatus,
    score: u32,
}

impl SnakeView {
    /// Captures a snapshot; `body` is ordered head first.
    #[must_use]
    pub fn new(
        body: Vec<CellCoord>,
        heading: Direction,
        food: Option<CellCoord>,
        status: GameStatus,
        score: u32,
    ) -> Self {
        Self {
            body,
            heading,
            food,
            status,
            score,
        }
    }

    /// Cell occupied by the head, if the snake has any segments.
    #[must_use]
    pub fn head(&self) -> Option<CellCoord> {
        self.body.first().copied()
    }

    /// Cell occupied by the tail, if the snake has any segments.
    #[must_use]
    pub fn tail(&self) -> Option<CellCoord> {
        self.body.last().copied()
    }

    /// Body segments ordered from head to tail.
    #[must_use]
    pub fn body(&self) -> &[CellCoord] {
        &self.body
    }

    /// Direction of the most recent move.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Cell holding the food, if any remains.
    #[must_use]
    pub const fn food(&self) -> Option<CellCoord> {
        self.food
    }

    /// Lifecycle state of the game.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Points collected so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Reports whether ticks still advance the snake.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}

/// Failures reported by the autopilot when its inputs or configuration are unusable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AutopilotError {
    /// The playfield cannot be divided into at least one cell.
    #[error("playfield {}x{} cannot hold a grid with cell size {cell_size}", .playfield.width, .playfield.height)]
    InvalidGrid {
        /// Playfield that was supplied.
        playfield: Playfield,
        /// Cell size that was supplied.
        cell_size: u32,
    },
    /// The agent head lies outside the grid, indicating a host conversion bug.
    #[error("agent head ({}, {}) lies outside the {}x{} grid", .head.column(), .head.row(), .bounds.columns(), .bounds.rows())]
    HeadOutOfBounds {
        /// Offending head cell.
        head: CellCoord,
        /// Bounds of the grid.
        bounds: GridBounds,
    },
    /// The goal lies outside the grid, indicating a host conversion bug.
    #[error("goal ({}, {}) lies outside the {}x{} grid", .goal.column(), .goal.row(), .bounds.columns(), .bounds.rows())]
    GoalOutOfBounds {
        /// Offending goal cell.
        goal: CellCoord,
        /// Bounds of the grid.
        bounds: GridBounds,
    },
    /// The emergency scan order repeats a direction.
    #[error("emergency order lists {0:?} more than once")]
    InvalidEmergencyOrder(Direction),
    /// The emergency scan order leaves a neighbor unchecked.
    #[error("emergency order never checks {0:?}")]
    IncompleteEmergencyOrder(Direction),
    /// A path was decoded without any cells.
    #[error("a path must contain at least one cell")]
    EmptyPath,
}

#[cfg(test)]
mod tests {
    use super::{
        AutopilotError, CellCoord, Direction, GridBounds, GridMapper, Path, Playfield, Position,
        MAX_GRID_EXTENT,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn mapper() -> GridMapper {
        GridMapper::new(Playfield::new(720, 480), 10).expect("valid grid")
    }

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
        assert_eq!(CellCoord::new(-2, 0).manhattan_distance(origin), 4);
    }

    #[test]
    fn grid_dimensions_use_floor_division() {
        let mapper = GridMapper::new(Playfield::new(725, 489), 10).expect("valid grid");
        assert_eq!(mapper.bounds(), GridBounds::new(72, 48));
    }

    #[test]
    fn default_grid_matches_classic_playfield() {
        let mapper = GridMapper::default();
        assert_eq!(mapper.cell_size(), 10);
        assert_eq!(mapper.bounds(), GridBounds::new(72, 48));
    }

    #[test]
    fn grid_rejects_zero_cell_size_and_tiny_playfields() {
        assert!(GridMapper::new(Playfield::new(720, 480), 0).is_err());
        assert!(GridMapper::new(Playfield::new(9, 480), 10).is_err());
    }

    #[test]
    fn grid_extent_is_capped_where_positions_stay_exact() {
        let widest =
            GridMapper::new(Playfield::new(MAX_GRID_EXTENT, 10), 1).expect("extent at the limit");
        let far_edge = CellCoord::new(16_777_215, 0);
        assert!(widest.bounds().contains(far_edge));
        assert_eq!(widest.to_cell(widest.to_position(far_edge)), far_edge);

        assert!(GridMapper::new(Playfield::new(MAX_GRID_EXTENT + 1, 10), 1).is_err());
        assert!(GridMapper::new(Playfield::new(20_000_000, 10), 1).is_err());
        assert!(GridMapper::new(Playfield::new(10, u32::MAX), 1).is_err());
        assert!(GridMapper::new(Playfield::new(MAX_GRID_EXTENT + 7, 10), 8).is_ok());
    }

    #[test]
    fn to_cell_floors_continuous_coordinates() {
        let mapper = mapper();
        assert_eq!(
            mapper.to_cell(Position::new(100.0, 50.0)),
            CellCoord::new(10, 5)
        );
        assert_eq!(
            mapper.to_cell(Position::new(109.9, 59.9)),
            CellCoord::new(10, 5)
        );
        assert_eq!(
            mapper.to_cell(Position::new(-0.5, 3.0)),
            CellCoord::new(-1, 0)
        );
    }

    #[test]
    fn mapping_round_trips_every_in_bounds_cell() {
        let mapper = mapper();
        for cell in mapper.bounds().cells() {
            assert_eq!(mapper.to_cell(mapper.to_position(cell)), cell);
        }
    }

    #[test]
    fn bounds_fail_closed_outside_grid() {
        let bounds = GridBounds::new(3, 2);
        assert!(bounds.contains(CellCoord::new(2, 1)));
        assert!(!bounds.contains(CellCoord::new(3, 1)));
        assert!(!bounds.contains(CellCoord::new(0, 2)));
        assert!(!bounds.contains(CellCoord::new(-1, 0)));
        assert_eq!(bounds.index(CellCoord::new(2, 1)), Some(5));
        assert_eq!(bounds.index(CellCoord::new(-1, 0)), None);
        assert_eq!(bounds.cell_at(5), Some(CellCoord::new(2, 1)));
        assert_eq!(bounds.cell_at(6), None);
    }

    #[test]
    fn direction_between_neighbors() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 2)),
            Some(Direction::Up)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(4, 3)),
            Some(Direction::Right)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 4)),
            Some(Direction::Down)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(2, 3)),
            Some(Direction::Left)
        );
        assert_eq!(Direction::between(origin, origin), None);
        assert_eq!(Direction::between(origin, CellCoord::new(4, 4)), None);
        assert_eq!(Direction::between(origin, CellCoord::new(5, 3)), None);
    }

    #[test]
    fn step_and_opposite_cancel_out() {
        let origin = CellCoord::new(3, 3);
        for direction in Direction::ALL {
            let next = origin.step(direction);
            assert_eq!(Direction::between(origin, next), Some(direction));
            assert_eq!(next.step(direction.opposite()), origin);
        }
    }

    #[test]
    fn path_exposes_endpoints_and_first_move() {
        assert!(Path::from_cells(Vec::new()).is_none());

        let path = Path::from_cells(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
        ])
        .expect("non-empty path");
        assert_eq!(path.start(), CellCoord::new(0, 0));
        assert_eq!(path.goal(), CellCoord::new(1, 1));
        assert_eq!(path.first_direction(), Some(Direction::Right));
        assert_eq!(
            path.to_positions(&mapper())[2],
            Position::new(10.0, 10.0)
        );

        let single = Path::from_cells(vec![CellCoord::new(4, 4)]).expect("non-empty path");
        assert_eq!(single.next_step(), None);
        assert_eq!(single.first_direction(), None);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn visualized_path_round_trips_through_bincode() {
        let path = Path::from_cells(vec![CellCoord::new(-1, 2), CellCoord::new(0, 2)])
            .expect("non-empty path");
        assert_round_trip(&path);
        assert_round_trip(&mapper());
    }

    #[test]
    fn decoding_an_empty_path_is_rejected() {
        let bytes = bincode::serialize(&Vec::<CellCoord>::new()).expect("serialize");
        let error = bincode::deserialize::<Path>(&bytes).expect_err("empty path");
        assert!(error.to_string().contains("at least one cell"));
        assert_eq!(
            Path::try_from(Vec::<CellCoord>::new()),
            Err(AutopilotError::EmptyPath)
        );
    }

    #[test]
    fn decoding_an_invalid_grid_is_rejected() {
        let zero_cell = bincode::serialize(&(0_u32, GridBounds::new(4, 4))).expect("serialize");
        assert!(bincode::deserialize::<GridMapper>(&zero_cell).is_err());

        let empty = bincode::serialize(&(10_u32, GridBounds::new(0, 4))).expect("serialize");
        assert!(bincode::deserialize::<GridMapper>(&empty).is_err());

        let oversized =
            bincode::serialize(&(2_u32, GridBounds::new(MAX_GRID_EXTENT, 1))).expect("serialize");
        assert!(bincode::deserialize::<GridMapper>(&oversized).is_err());
    }
}
