#![no_std]

extern crate alloc;

use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use chaos::*;
pub use command::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use hint::*;
pub use reveal::*;
pub use tile::*;
pub use types::*;

mod board;
mod chaos;
mod command;
mod engine;
mod error;
mod generator;
mod hint;
mod reveal;
mod tile;
mod types;

/// Smallest maze side that still fits the cleared 3×3 entrance and a separate goal.
pub const MIN_MAZE_SIZE: Coord = 4;
pub const DEFAULT_MAZE_SIZE: Coord = 16;

/// Side length of a maze. Only [`MazeConfig::new`] builds one, deserializing included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMazeConfig")]
pub struct MazeConfig {
    size: Coord,
}

#[derive(Clone, Deserialize)]
struct RawMazeConfig {
    size: Coord,
}

impl TryFrom<RawMazeConfig> for MazeConfig {
    type Error = GameError;

    fn try_from(raw: RawMazeConfig) -> Result<Self> {
        Self::new(raw.size)
    }
}

impl MazeConfig {
    pub fn new(size: Coord) -> Result<Self> {
        if size < MIN_MAZE_SIZE {
            return Err(GameError::BoardTooSmall);
        }
        Ok(Self { size })
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn start(&self) -> Coord2 {
        (0, 0)
    }

    pub const fn goal(&self) -> Coord2 {
        (self.size - 1, self.size - 1)
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_MAZE_SIZE,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMinefieldConfig")]
pub struct MinefieldConfig {
    size: Coord,
    mines: CellCount,
}

#[derive(Clone, Deserialize)]
struct RawMinefieldConfig {
    size: Coord,
    mines: CellCount,
}

impl TryFrom<RawMinefieldConfig> for MinefieldConfig {
    type Error = GameError;

    fn try_from(raw: RawMinefieldConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

impl MinefieldConfig {
    pub(crate) const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Mines only go to interior cells, so the count has to stay below `(size - 2)²`.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size < 3 {
            return Err(GameError::BoardTooSmall);
        }
        let config = Self::new_unchecked(size, mines);
        if mines >= config.interior_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(config)
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn interior_cells(&self) -> CellCount {
        let inner = self.size.saturating_sub(2);
        mult(inner, inner)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn config(self) -> MinefieldConfig {
        match self {
            Self::Easy => MinefieldConfig::new_unchecked(10, 10),
            Self::Medium => MinefieldConfig::new_unchecked(16, 40),
            Self::Hard => MinefieldConfig::new_unchecked(20, 80),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        // menu numbers are accepted too
        const NAMES: [(Difficulty, &str, &str); 3] = [
            (Difficulty::Easy, "easy", "1"),
            (Difficulty::Medium, "medium", "2"),
            (Difficulty::Hard, "hard", "3"),
        ];

        let s = s.trim();
        NAMES
            .iter()
            .find(|(_, name, key)| s.eq_ignore_ascii_case(name) || s == *key)
            .map(|&(difficulty, _, _)| difficulty)
            .ok_or(GameError::UnknownDifficulty)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChaosConfig")]
pub struct ChaosConfig {
    cells: CellCount,
    mines: CellCount,
}

#[derive(Clone, Deserialize)]
struct RawChaosConfig {
    cells: CellCount,
    mines: CellCount,
}

impl TryFrom<RawChaosConfig> for ChaosConfig {
    type Error = GameError;

    fn try_from(raw: RawChaosConfig) -> Result<Self> {
        Self::new(raw.cells, raw.mines)
    }
}

impl ChaosConfig {
    pub fn new(cells: CellCount, mines: CellCount) -> Result<Self> {
        if cells == 0 {
            return Err(GameError::EmptyChaosBoard);
        }
        if mines >= cells {
            return Err(GameError::TooManyMines);
        }
        Ok(Self { cells, mines })
    }

    pub const fn cells(&self) -> CellCount {
        self.cells
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self { cells: 30, mines: 5 }
    }
}

/// Everything needed to generate one game; each variant carries its own settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionConfig {
    Maze(MazeConfig),
    Classic(MinefieldConfig),
    Chaos(ChaosConfig),
}

impl SessionConfig {
    pub fn maze(size: Coord) -> Result<Self> {
        MazeConfig::new(size).map(Self::Maze)
    }

    pub const fn classic(difficulty: Difficulty) -> Self {
        Self::Classic(difficulty.config())
    }

    pub fn chaos(cells: CellCount, mines: CellCount) -> Result<Self> {
        ChaosConfig::new(cells, mines).map(Self::Chaos)
    }

    pub const fn mode(&self) -> Mode {
        match self {
            Self::Maze(_) => Mode::Maze,
            Self::Classic(_) => Mode::Classic,
            Self::Chaos(_) => Mode::Chaos,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
