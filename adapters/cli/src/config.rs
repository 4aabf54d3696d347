use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use snake_autopilot_core::{GridMapper, Playfield, DEFAULT_CELL_SIZE, DEFAULT_PLAYFIELD};
use snake_autopilot_system_pathfinding::SearchConfig;
use snake_autopilot_system_steering::PolicyConfig;

const DEFAULT_SEED: u64 = 0x5eed_cafe;
const DEFAULT_TICKS_PER_GAME: u64 = 20_000;
const DEFAULT_GAMES: u32 = 1;

/// Complete simulation settings, loadable from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationConfig {
    /// Playfield dimensions and cell size.
    pub(crate) grid: GridSection,
    /// Decision policy tunables.
    pub(crate) policy: PolicyConfig,
    /// Path search tunables.
    pub(crate) search: SearchConfig,
    /// Run length and food seed.
    pub(crate) simulation: RunSection,
}

impl SimulationConfig {
    /// Reads and parses the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read simulation config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid simulation config at {}", path.display()))
    }

    /// Parses configuration from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse simulation config toml contents")
    }
}

/// `[grid]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GridSection {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) cell_size: u32,
}

impl GridSection {
    /// Validates the section into a grid mapping.
    pub(crate) fn mapper(&self) -> Result<GridMapper> {
        GridMapper::new(Playfield::new(self.width, self.height), self.cell_size)
            .context("grid section does not describe a playable grid")
    }
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAYFIELD.width,
            height: DEFAULT_PLAYFIELD.height,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// `[simulation]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunSection {
    pub(crate) seed: u64,
    pub(crate) ticks_per_game: u64,
    pub(crate) games: u32,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            ticks_per_game: DEFAULT_TICKS_PER_GAME,
            games: DEFAULT_GAMES,
        }
    }
}
