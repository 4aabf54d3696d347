#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic steering system that drives the snake with the autopilot policy.

mod policy;

pub use policy::{Decision, DecisionPolicy, MoveRequest, PolicyConfig, Tier};

use snake_autopilot_core::{AutopilotError, Command, ControlMode, Event, Path, SnakeView};

/// Pure system that reacts to world events and emits steering commands.
#[derive(Debug)]
pub struct Steering {
    policy: DecisionPolicy,
    control_mode: ControlMode,
    last_decision: Option<Decision>,
}

impl Steering {
    /// Creates a steering system that waits for autopilot mode before acting.
    #[must_use]
    pub fn new(policy: DecisionPolicy) -> Self {
        Self {
            policy,
            control_mode: ControlMode::Manual,
            last_decision: None,
        }
    }

    /// Consumes world events and the snake snapshot to emit a steering command.
    ///
    /// Returns the decision taken this tick, or `None` when the autopilot is
    /// not in control, the game is over, or no food remains. Invalid snapshots
    /// surface as errors and no command is emitted.
    pub fn handle(
        &mut self,
        events: &[Event],
        snake: &SnakeView,
        out: &mut Vec<Command>,
    ) -> Result<Option<Decision>, AutopilotError> {
        for event in events {
            match event {
                Event::ControlModeChanged { mode } => self.control_mode = *mode,
                Event::WorldReset => self.last_decision = None,
                _ => {}
            }
        }

        if self.control_mode != ControlMode::Autopilot || !snake.is_running() {
            return Ok(None);
        }

        let (Some(head), Some(goal)) = (snake.head(), snake.food()) else {
            return Ok(None);
        };

        let decision = self.policy.next_move(&MoveRequest {
            head,
            goal,
            body: snake.body(),
            heading: snake.heading(),
        })?;

        out.push(Command::Steer {
            direction: decision.direction(),
        });
        self.last_decision = Some(decision.clone());
        Ok(Some(decision))
    }

    /// Path adopted on the most recent tick, for visualization only.
    ///
    /// The path outlives the end of a game and is dropped on reset.
    #[must_use]
    pub fn planned_path(&self) -> Option<&Path> {
        self.last_decision.as_ref().and_then(Decision::path)
    }

    /// Controller the system believes is active.
    #[must_use]
    pub const fn control_mode(&self) -> ControlMode {
        self.control_mode
    }
}
