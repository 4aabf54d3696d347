#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Snake Autopilot headless simulation.

mod config;
mod frame;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use snake_autopilot_core::{Command, ControlMode, Event, GameStatus};
use snake_autopilot_system_pathfinding::PathSearch;
use snake_autopilot_system_steering::{DecisionPolicy, Steering};
use snake_autopilot_world::{self as world, query, World};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::SimulationConfig;

const DEFAULT_LOG_FILTER: &str = "snake_autopilot=info";

/// Runs the autopilot against the headless snake simulation.
#[derive(Debug, Parser)]
#[command(name = "snake-autopilot", version, about)]
struct CliArgs {
    /// TOML file with `[grid]`, `[policy]`, `[search]` and `[simulation]` tables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed used for food placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of ticks simulated per game.
    #[arg(long)]
    ticks: Option<u64>,
    /// Number of games to play back to back.
    #[arg(long)]
    games: Option<u32>,
    /// Print the final board of each game with the last planned path.
    #[arg(long)]
    render: bool,
}

/// Outcome of a single simulated game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GameReport {
    score: u32,
    ticks: u64,
    status: GameStatus,
    trapped_ticks: u64,
}

/// Entry point for the Snake Autopilot command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let mut settings = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        settings.simulation.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        settings.simulation.ticks_per_game = ticks;
    }
    if let Some(games) = args.games {
        settings.simulation.games = games;
    }

    let grid = settings.grid.mapper()?;
    let search = PathSearch::new(grid.bounds(), settings.search);
    let policy = DecisionPolicy::new(search, settings.policy.clone())?;
    let mut world = World::with_seed(grid, settings.simulation.seed);
    let mut steering = Steering::new(policy);

    info!(
        columns = grid.bounds().columns(),
        rows = grid.bounds().rows(),
        seed = settings.simulation.seed,
        games = settings.simulation.games,
        "starting simulation"
    );

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SetControlMode {
            mode: ControlMode::Autopilot,
        },
        &mut events,
    );

    let mut reports = Vec::new();
    for game in 1..=settings.simulation.games {
        if game > 1 {
            world::apply(&mut world, Command::Reset, &mut events);
        }

        let report = play_game(
            &mut world,
            &mut steering,
            &mut events,
            settings.simulation.ticks_per_game,
        )?;
        println!(
            "game {game}: score {} after {} ticks ({})",
            report.score,
            report.ticks,
            describe(report.status)
        );
        if report.trapped_ticks > 0 {
            warn!(game, trapped = report.trapped_ticks, "autopilot was trapped");
        }
        if args.render {
            let snake = query::snake_view(&world);
            println!(
                "{}",
                frame::render(grid.bounds(), &snake, steering.planned_path())
            );
        }
        reports.push(report);
    }

    print_summary(&reports);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Alternates steering and ticking until the game ends or the tick budget runs out.
fn play_game(
    world: &mut World,
    steering: &mut Steering,
    events: &mut Vec<Event>,
    tick_budget: u64,
) -> Result<GameReport> {
    let mut commands = Vec::new();
    let mut trapped_ticks = 0;

    while query::tick_index(world) < tick_budget {
        let snake = query::snake_view(world);
        let decision = steering.handle(events, &snake, &mut commands)?;
        events.clear();

        let Some(decision) = decision else {
            break;
        };
        if decision.is_trapped() {
            trapped_ticks += 1;
        }

        for command in commands.drain(..) {
            world::apply(world, command, events);
        }
        world::apply(world, Command::Tick, events);
    }

    let snake = query::snake_view(world);
    Ok(GameReport {
        score: snake.score(),
        ticks: query::tick_index(world),
        status: snake.status(),
        trapped_ticks,
    })
}

fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Running => "tick budget reached".to_owned(),
        GameStatus::Crashed { cause } => format!("crashed: {cause:?}"),
        GameStatus::Won => "board filled".to_owned(),
    }
}

fn print_summary(reports: &[GameReport]) {
    if reports.is_empty() {
        return;
    }

    let total: u64 = reports.iter().map(|report| u64::from(report.score)).sum();
    let best = reports.iter().map(|report| report.score).max().unwrap_or(0);
    let games = u64::try_from(reports.len()).unwrap_or(u64::MAX);
    println!(
        "{} game(s): best score {best}, mean score {:.1}",
        reports.len(),
        total as f64 / games as f64
    );
}
