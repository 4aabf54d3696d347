#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Snake Autopilot host simulation.
//!
//! The world owns the snake body, the food and the score. It mutates only in
//! response to [`Command`] values passed to [`apply`] and reports every change
//! through [`Event`] values.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_autopilot_core::{
    CellCoord, CollisionCause, Command, ControlMode, Direction, Event, GameStatus, GridMapper,
    FOOD_SCORE,
};
use tracing::{debug, info};

const FOOD_GENERATION_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Head cell of a freshly spawned snake on the default grid.
const INITIAL_HEAD: CellCoord = CellCoord::new(10, 5);
const INITIAL_LENGTH: usize = 4;
const INITIAL_HEADING: Direction = Direction::Right;

/// Represents the authoritative Snake Autopilot world state.
#[derive(Debug)]
pub struct World {
    grid: GridMapper,
    snake: Snake,
    food: Option<CellCoord>,
    score: u32,
    status: GameStatus,
    control_mode: ControlMode,
    tick_index: u64,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world on the default grid with the default food seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(GridMapper::default(), FOOD_GENERATION_SEED)
    }

    /// Creates a world on the provided grid, seeding food placement with `seed`.
    #[must_use]
    pub fn with_seed(grid: GridMapper, seed: u64) -> Self {
        let mut world = Self {
            snake: Snake::spawn(&grid),
            grid,
            food: None,
            score: 0,
            status: GameStatus::Running,
            control_mode: ControlMode::Manual,
            tick_index: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        world.food = world.spawn_food();
        world
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.snake = Snake::spawn(&self.grid);
        self.score = 0;
        self.status = GameStatus::Running;
        self.tick_index = 0;
        info!(head = ?self.snake.head(), "world reset");
        out_events.push(Event::WorldReset);
        self.respawn_food(out_events);
    }

    fn respawn_food(&mut self, out_events: &mut Vec<Event>) {
        self.food = self.spawn_food();
        match self.food {
            Some(cell) => out_events.push(Event::FoodSpawned { cell }),
            None => {
                self.status = GameStatus::Won;
                info!(score = self.score, "board filled");
                out_events.push(Event::BoardFilled { score: self.score });
            }
        }
    }

    /// Picks a random free cell, preferring cells off the top row and left column.
    fn spawn_food(&mut self) -> Option<CellCoord> {
        let bounds = self.grid.bounds();
        let free: Vec<CellCoord> = bounds
            .cells()
            .filter(|cell| !self.snake.occupies(*cell))
            .collect();
        let interior: Vec<CellCoord> = free
            .iter()
            .copied()
            .filter(|cell| cell.column() >= 1 && cell.row() >= 1)
            .collect();

        let candidates = if interior.is_empty() { free } else { interior };
        if candidates.is_empty() {
            return None;
        }

        let index = self.rng.gen_range(0..candidates.len());
        candidates.get(index).copied()
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        let direction = self.snake.commit_heading();
        let from = self.snake.head();
        let to = from.step(direction);

        if !self.grid.bounds().contains(to) {
            self.crash(CollisionCause::Wall, out_events);
            return;
        }

        let grows = self.food == Some(to);
        if self.snake.collides(to, grows) {
            self.crash(CollisionCause::SelfCollision, out_events);
            return;
        }

        self.snake.advance(to, grows);
        out_events.push(Event::SnakeAdvanced {
            from,
            to,
            direction,
        });

        if grows {
            self.score = self.score.saturating_add(FOOD_SCORE);
            info!(?to, score = self.score, "food eaten");
            out_events.push(Event::FoodEaten {
                cell: to,
                score: self.score,
            });
            self.respawn_food(out_events);
        }
    }

    fn crash(&mut self, cause: CollisionCause, out_events: &mut Vec<Event>) {
        self.status = GameStatus::Crashed { cause };
        info!(?cause, score = self.score, tick = self.tick_index, "snake died");
        out_events.push(Event::SnakeDied {
            cause,
            score: self.score,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Body segments plus the heading they travel in.
#[derive(Debug)]
struct Snake {
    body: VecDeque<CellCoord>,
    heading: Direction,
    requested: Option<Direction>,
}

impl Snake {
    /// Lays out the initial body trailing left of the head, clamped to the grid.
    fn spawn(grid: &GridMapper) -> Self {
        let bounds = grid.bounds();
        let max_column = i32::try_from(bounds.columns()).unwrap_or(i32::MAX) - 1;
        let max_row = i32::try_from(bounds.rows()).unwrap_or(i32::MAX) - 1;
        let head = CellCoord::new(
            INITIAL_HEAD.column().min(max_column),
            INITIAL_HEAD.row().min(max_row),
        );

        let body = (0..INITIAL_LENGTH)
            .filter_map(|offset| {
                let offset = i32::try_from(offset).ok()?;
                let cell = CellCoord::new(head.column() - offset, head.row());
                bounds.contains(cell).then_some(cell)
            })
            .collect();

        Self {
            body,
            heading: INITIAL_HEADING,
            requested: None,
        }
    }

    fn head(&self) -> CellCoord {
        self.body.front().copied().unwrap_or(INITIAL_HEAD)
    }

    fn occupies(&self, cell: CellCoord) -> bool {
        self.body.contains(&cell)
    }

    /// Records a turn for the next tick, ignoring reversals onto the neck.
    fn request(&mut self, direction: Direction) -> bool {
        if direction == self.heading.opposite() {
            return false;
        }
        self.requested = Some(direction);
        true
    }

    fn commit_heading(&mut self) -> Direction {
        if let Some(direction) = self.requested.take() {
            self.heading = direction;
        }
        self.heading
    }

    /// Reports whether moving the head into `cell` hits the body.
    ///
    /// When the snake does not grow the tail leaves its cell on the same tick,
    /// so the tail cell is enterable.
    fn collides(&self, cell: CellCoord, grows: bool) -> bool {
        let solid = if grows {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(solid).any(|segment| *segment == cell)
    }

    fn advance(&mut self, cell: CellCoord, grows: bool) {
        if !grows {
            let _ = self.body.pop_back();
        }
        self.body.push_front(cell);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Configure { grid } => {
            world.grid = grid;
            world.restart(out_events);
        }
        Command::SetControlMode { mode } => {
            if world.control_mode != mode {
                world.control_mode = mode;
                out_events.push(Event::ControlModeChanged { mode });
            }
        }
        Command::Steer { direction } => {
            if !world.snake.request(direction) {
                debug!(?direction, heading = ?world.snake.heading, "reversal ignored");
            }
        }
        Command::Tick => {
            if world.status == GameStatus::Running {
                world.advance(out_events);
            }
        }
        Command::Reset => world.restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use snake_autopilot_core::{ControlMode, GridMapper, SnakeView};

    use super::World;

    /// Captures the snake, food and score for systems and adapters.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView {
        SnakeView::new(
            world.snake.body.iter().copied().collect(),
            world.snake.heading,
            world.food,
            world.status,
            world.score,
        )
    }

    /// Grid mapping the world simulates on.
    #[must_use]
    pub fn grid(world: &World) -> GridMapper {
        world.grid
    }

    /// Controller currently allowed to steer.
    #[must_use]
    pub fn control_mode(world: &World) -> ControlMode {
        world.control_mode
    }

    /// Points collected in the current game.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Number of ticks processed since the last reset.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
