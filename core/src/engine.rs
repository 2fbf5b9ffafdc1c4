use alloc::string::{String, ToString};
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

pub const START_HP: u8 = 3;
pub const SCAN_CHARGES: u8 = 3;
pub const SCAN_RADIUS: Coord = 2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Active
    }
}

/// What happened as a result of a command, rendered as the player-facing message.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    Quiet,
    WallHit { hp: u8 },
    OutOfHp,
    Scanned,
    GoalReached,
    MineHit,
    FieldCleared,
    ChaosHit,
    ChaosCleared,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Notice::*;
        match self {
            Quiet => Ok(()),
            WallHit { hp } => write!(f, "WALL! HP: {}", hp),
            OutOfHp => f.write_str("GAME OVER - No HP left"),
            Scanned => f.write_str("Radar Scanned!"),
            GoalReached => f.write_str("VICTORY"),
            MineHit => f.write_str("KABOOM! Game Over."),
            FieldCleared => f.write_str("VICTORY! You cleared the field!"),
            ChaosHit => f.write_str("BOOM! Chaos consumed you."),
            ChaosCleared => f.write_str("VICTORY! The chaos is tamed!"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Outcome {
    pub state: GameState,
    pub notice: Notice,
}

impl Outcome {
    pub const fn is_terminal(&self) -> bool {
        self.state.is_finished()
    }
}

/// `(terminal, message)` pair handed back to an input loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub terminal: bool,
    pub message: String,
}

/// Maze board plus the walker and its resources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeRun {
    board: Board,
    player: Coord2,
    goal: Coord2,
    hp: u8,
    scans: u8,
}

impl MazeRun {
    /// Starts at the top-left corner heading for the bottom-right one.
    pub fn new(layout: GridLayout) -> Self {
        let last = layout.size() - 1;
        Self {
            board: Board::new(layout),
            player: (0, 0),
            goal: (last, last),
            hp: START_HP,
            scans: SCAN_CHARGES,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn goal(&self) -> Coord2 {
        self.goal
    }

    pub fn hp(&self) -> u8 {
        self.hp
    }

    pub fn scans(&self) -> u8 {
        self.scans
    }

    /// `3000 + 1000·hp + 500·scans (+5000 on a win) - 10·seconds`, never below zero.
    pub fn score(&self, won: bool, elapsed_secs: u32) -> u32 {
        let bonus = 3000 + 1000 * u32::from(self.hp) + 500 * u32::from(self.scans);
        let bonus = if won { bonus + 5000 } else { bonus };
        bonus.saturating_sub(elapsed_secs.saturating_mul(10))
    }

    fn step(&mut self, direction: Direction) -> Result<Outcome> {
        use GameState::*;

        let target = direction
            .step(self.player, self.board.size())
            .ok_or(GameError::InvalidCoords)?;

        if self.board.cover_at(target).is_flagged() {
            return Err(GameError::MoveBlocked);
        }

        if self.board.kind_at(target).is_wall() {
            self.hp = self.hp.saturating_sub(1);
            self.board.force_reveal(target)?;
            log::debug!("Bumped into wall at {:?}, hp left: {}", target, self.hp);

            return Ok(if self.hp == 0 {
                self.board.reveal_all();
                Outcome {
                    state: Lost,
                    notice: Notice::OutOfHp,
                }
            } else {
                Outcome {
                    state: Active,
                    notice: Notice::WallHit { hp: self.hp },
                }
            });
        }

        self.player = target;
        self.board.reveal(target)?;

        Ok(if target == self.goal {
            Outcome {
                state: Won,
                notice: Notice::GoalReached,
            }
        } else {
            Outcome {
                state: Active,
                notice: Notice::Quiet,
            }
        })
    }

    fn scan(&mut self) -> Result<Outcome> {
        if self.scans == 0 {
            return Err(GameError::ScansExhausted);
        }
        self.scans -= 1;
        self.board.reveal_square(self.player, SCAN_RADIUS)?;
        log::debug!("Scanned around {:?}, {} scans left", self.player, self.scans);

        Ok(Outcome {
            state: GameState::Active,
            notice: Notice::Scanned,
        })
    }
}

/// The board of the mode being played; each variant owns its own state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Playfield {
    Maze(MazeRun),
    Classic(Board),
    Chaos(ChaosGraph),
}

impl Playfield {
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Maze(_) => Mode::Maze,
            Self::Classic(_) => Mode::Classic,
            Self::Chaos(_) => Mode::Chaos,
        }
    }

    /// Uncovers what every new game starts with: the maze entrance, the
    /// minefield border, or the sparsely connected chaos nodes.
    fn reveal_safe_start(&mut self) -> CellCount {
        match self {
            Self::Maze(run) => flood_reveal(&mut run.board, run.player),
            Self::Classic(board) => {
                let size = board.size();
                let mut opened: CellCount = 0;
                for coords in board.layout().iter_coords() {
                    if on_border(coords, size) && !board.kind_at(coords).is_wall() {
                        opened = opened.saturating_add(flood_reveal(board, coords));
                    }
                }
                opened
            }
            Self::Chaos(graph) => graph.reveal_sparse(SPARSE_DEGREE),
        }
    }

    fn is_cleared(&self) -> bool {
        match self {
            Self::Maze(_) => false,
            Self::Classic(board) => board.all_floor_revealed(),
            Self::Chaos(graph) => graph.all_safe_revealed(),
        }
    }
}

/// One game from generation to a win or a loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    playfield: Playfield,
    state: GameState,
}

impl GameSession {
    /// Generates a fresh playfield for `config` from `seed`.
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        let playfield = match config {
            SessionConfig::Maze(maze) => Playfield::Maze(MazeRun::new(MazeCarver::new(seed).generate(maze))),
            SessionConfig::Classic(minefield) => {
                Playfield::Classic(Board::new(MinefieldPlacer::new(seed).generate(minefield)))
            }
            SessionConfig::Chaos(chaos) => Playfield::Chaos(ChaosGrower::new(seed).generate(chaos)),
        };
        Self::from_playfield(playfield)
    }

    /// Starts a game on an existing playfield, applying the initial safe reveal.
    pub fn from_playfield(mut playfield: Playfield) -> Self {
        let opened = playfield.reveal_safe_start();
        let state = if playfield.is_cleared() {
            GameState::Won
        } else {
            GameState::Active
        };
        log::debug!(
            "New {:?} game, {} cells opened at start, state: {:?}",
            playfield.mode(),
            opened,
            state
        );
        Self { playfield, state }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mode(&self) -> Mode {
        self.playfield.mode()
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Maze score for the current resources, `None` outside maze mode.
    pub fn maze_score(&self, elapsed_secs: u32) -> Option<u32> {
        match &self.playfield {
            Playfield::Maze(run) => Some(run.score(self.state == GameState::Won, elapsed_secs)),
            _ => None,
        }
    }

    /// Parses and executes one line of input, folding errors into the message.
    pub fn respond(&mut self, input: &str) -> Reply {
        let message = match Command::parse(self.mode(), input).and_then(|command| self.execute(command)) {
            Ok(outcome) => outcome.notice.to_string(),
            Err(err) => err.to_string(),
        };
        Reply {
            terminal: self.is_finished(),
            message,
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        let outcome = match (&mut self.playfield, command) {
            (Playfield::Maze(run), Command::Move(direction)) => run.step(direction)?,
            (Playfield::Maze(run), Command::FlagToward(direction)) => {
                let target = direction
                    .step(run.player, run.board.size())
                    .ok_or(GameError::InvalidCoords)?;
                if run.board.toggle_flag(target)?.has_update() {
                    log::debug!("Flag toggled at {:?}", target);
                }
                quiet()
            }
            (Playfield::Maze(run), Command::Scan) => run.scan()?,
            (Playfield::Classic(board), Command::Reveal(coords)) => reveal_cell(board, coords)?,
            (Playfield::Classic(board), Command::Flag(coords)) => {
                if board.toggle_flag(coords)?.has_update() {
                    log::debug!("Flag toggled at {:?}", coords);
                }
                quiet()
            }
            (Playfield::Chaos(graph), Command::RevealNode(id)) => {
                let id = graph.validate_id(id).map_err(|_| GameError::InvalidFormat(CHAOS_USAGE))?;
                reveal_node(graph, id)?
            }
            (Playfield::Chaos(graph), Command::FlagNode(id)) => {
                let id = graph.validate_id(id).map_err(|_| GameError::InvalidFormat(CHAOS_USAGE))?;
                if graph.toggle_flag(id)?.has_update() {
                    log::debug!("Flag toggled on node {}", id);
                }
                quiet()
            }
            _ => return Err(GameError::WrongMode),
        };

        if outcome.state != self.state {
            log::debug!("Game state {:?} -> {:?}", self.state, outcome.state);
            self.state = outcome.state;
        }
        Ok(outcome)
    }
}

const fn quiet() -> Outcome {
    Outcome {
        state: GameState::Active,
        notice: Notice::Quiet,
    }
}

fn reveal_cell(board: &mut Board, coords: Coord2) -> Result<Outcome> {
    let coords = board.layout().validate_coords(coords)?;

    Ok(match board.cover_at(coords) {
        Cover::Flagged => return Err(GameError::CellFlagged),
        _ if board.kind_at(coords).is_wall() => {
            board.reveal_all();
            Outcome {
                state: GameState::Lost,
                notice: Notice::MineHit,
            }
        }
        _ => {
            board.reveal(coords)?;
            if board.all_floor_revealed() {
                Outcome {
                    state: GameState::Won,
                    notice: Notice::FieldCleared,
                }
            } else {
                quiet()
            }
        }
    })
}

fn reveal_node(graph: &mut ChaosGraph, id: NodeId) -> Result<Outcome> {
    let is_mine = graph.node(id).is_some_and(ChaosNode::is_mine);

    Ok(match graph.cover(id) {
        Cover::Flagged => return Err(GameError::NodeFlagged),
        _ if is_mine => {
            graph.reveal_all();
            Outcome {
                state: GameState::Lost,
                notice: Notice::ChaosHit,
            }
        }
        _ => {
            graph.reveal(id)?;
            if graph.all_safe_revealed() {
                Outcome {
                    state: GameState::Won,
                    notice: Notice::ChaosCleared,
                }
            } else {
                quiet()
            }
        }
    })
}
