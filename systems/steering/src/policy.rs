//! Tiered decision policy that turns search results into a single move.

use serde::Deserialize;
use snake_autopilot_core::{
    AutopilotError, CellCoord, Direction, GridBounds, GridMapper, Path, Position,
};
use snake_autopilot_system_pathfinding::{is_safe, PathSearch};
use tracing::{debug, warn};

/// Tunables for the decision policy.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Try the current heading before any other direction in the emergency tier.
    pub prefer_straight: bool,
    /// Order in which the emergency tier scans the remaining directions.
    pub emergency_order: Vec<Direction>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            prefer_straight: true,
            emergency_order: Direction::ALL.to_vec(),
        }
    }
}

/// Strategies attempted in priority order until one yields a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Shortest path to the food, treating the tail as vacating.
    Goal,
    /// Shortest path to the current tail cell, preserving reachable space.
    TailChase,
    /// Any single safe step away from the head.
    Emergency,
}

impl Tier {
    /// Evaluation order of the tiers.
    pub const ORDER: [Tier; 3] = [Tier::Goal, Tier::TailChase, Tier::Emergency];
}

/// Per-tick inputs supplied by the host.
#[derive(Clone, Copy, Debug)]
pub struct MoveRequest<'a> {
    /// Cell occupied by the head.
    pub head: CellCoord,
    /// Cell holding the food.
    pub goal: CellCoord,
    /// Body segments ordered head first; the last element is the tail.
    pub body: &'a [CellCoord],
    /// Direction the snake last moved in.
    pub heading: Direction,
}

/// Move chosen for the current tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// A tier produced a move.
    Step {
        /// Direction to move in.
        direction: Direction,
        /// Tier that produced the move.
        tier: Tier,
        /// Path adopted by the tier, exposed for visualization.
        path: Path,
    },
    /// Every neighbor of the head is blocked; the held heading is returned.
    Trapped {
        /// Heading the snake keeps, leading into an unavoidable collision.
        held: Direction,
    },
}

impl Decision {
    /// Direction the host should apply this tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        match self {
            Self::Step { direction, .. } => *direction,
            Self::Trapped { held } => *held,
        }
    }

    /// Tier that produced the move, `None` when trapped.
    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::Step { tier, .. } => Some(*tier),
            Self::Trapped { .. } => None,
        }
    }

    /// Adopted path, `None` when trapped.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Step { path, .. } => Some(path),
            Self::Trapped { .. } => None,
        }
    }

    /// Reports whether no safe move existed.
    #[must_use]
    pub fn is_trapped(&self) -> bool {
        matches!(self, Self::Trapped { .. })
    }
}

/// Chooses the snake's next move from goal, tail-chase and emergency tiers.
#[derive(Clone, Debug)]
pub struct DecisionPolicy {
    search: PathSearch,
    prefer_straight: bool,
    emergency_order: Vec<Direction>,
}

impl DecisionPolicy {
    /// Creates a policy.
    ///
    /// The emergency order must list each of the four directions exactly once,
    /// so a safe neighbor is never skipped.
    pub fn new(search: PathSearch, config: PolicyConfig) -> Result<Self, AutopilotError> {
        for (index, direction) in config.emergency_order.iter().enumerate() {
            if config.emergency_order[..index].contains(direction) {
                return Err(AutopilotError::InvalidEmergencyOrder(*direction));
            }
        }
        if let Some(missing) = Direction::ALL
            .into_iter()
            .find(|direction| !config.emergency_order.contains(direction))
        {
            return Err(AutopilotError::IncompleteEmergencyOrder(missing));
        }

        Ok(Self {
            search,
            prefer_straight: config.prefer_straight,
            emergency_order: config.emergency_order,
        })
    }

    /// Creates a policy with the default configuration for the provided grid.
    #[must_use]
    pub fn with_bounds(bounds: GridBounds) -> Self {
        let config = PolicyConfig::default();
        Self {
            search: PathSearch::with_bounds(bounds),
            prefer_straight: config.prefer_straight,
            emergency_order: config.emergency_order,
        }
    }

    /// Grid the policy plans on.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.search.bounds()
    }

    /// Chooses the move for this tick.
    ///
    /// Fails fast when the head or the goal lies outside the grid, since that
    /// indicates a broken coordinate conversion in the host.
    pub fn next_move(&self, request: &MoveRequest<'_>) -> Result<Decision, AutopilotError> {
        let bounds = self.bounds();
        if !bounds.contains(request.head) {
            return Err(AutopilotError::HeadOutOfBounds {
                head: request.head,
                bounds,
            });
        }
        if !bounds.contains(request.goal) {
            return Err(AutopilotError::GoalOutOfBounds {
                goal: request.goal,
                bounds,
            });
        }

        for tier in Tier::ORDER {
            let Some(path) = self.plan_tier(tier, request) else {
                debug!(?tier, "tier produced no path");
                continue;
            };

            if tier == Tier::Goal && path.len() == 1 {
                return Ok(Decision::Step {
                    direction: request.heading,
                    tier,
                    path,
                });
            }

            if let Some(direction) = path.first_direction() {
                debug!(?tier, ?direction, length = path.len(), "move chosen");
                return Ok(Decision::Step {
                    direction,
                    tier,
                    path,
                });
            }
        }

        warn!(head = ?request.head, held = ?request.heading, "no safe move, snake is trapped");
        Ok(Decision::Trapped {
            held: request.heading,
        })
    }

    /// Same as [`DecisionPolicy::next_move`] for hosts that track continuous positions.
    pub fn next_move_from_positions(
        &self,
        mapper: &GridMapper,
        head: Position,
        goal: Position,
        body: &[Position],
        heading: Direction,
    ) -> Result<Decision, AutopilotError> {
        let body: Vec<CellCoord> = body.iter().map(|segment| mapper.to_cell(*segment)).collect();
        self.next_move(&MoveRequest {
            head: mapper.to_cell(head),
            goal: mapper.to_cell(goal),
            body: &body,
            heading,
        })
    }

    /// Runs a single tier in isolation.
    #[must_use]
    pub fn plan_tier(&self, tier: Tier, request: &MoveRequest<'_>) -> Option<Path> {
        match tier {
            Tier::Goal => self
                .search
                .find_path(request.head, request.goal, request.body, true),
            Tier::TailChase => {
                let (tail, body) = request.body.split_last()?;
                if body.is_empty() {
                    return None;
                }
                self.search.find_path(request.head, *tail, body, false)
            }
            Tier::Emergency => self
                .emergency_candidates(request.heading)
                .map(|direction| request.head.step(direction))
                .find(|cell| is_safe(self.bounds(), *cell, request.body, true))
                .and_then(|cell| Path::from_cells(vec![request.head, cell])),
        }
    }

    fn emergency_candidates(&self, heading: Direction) -> impl Iterator<Item = Direction> + '_ {
        let straight = self.prefer_straight.then_some(heading);
        straight.into_iter().chain(
            self.emergency_order
                .iter()
                .copied()
                .filter(move |direction| straight != Some(*direction)),
        )
    }
}
