use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Out of bounds!")]
    InvalidCoords,
    #[error("{0}")]
    InvalidFormat(&'static str),
    #[error("Flagged! Cannot move there.")]
    MoveBlocked,
    #[error("Cell is flagged!")]
    CellFlagged,
    #[error("Node is flagged!")]
    NodeFlagged,
    #[error("No scans left!")]
    ScansExhausted,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board is too small")]
    BoardTooSmall,
    #[error("Chaos board needs at least one cell")]
    EmptyChaosBoard,
    #[error("Unknown difficulty, expected easy, medium or hard")]
    UnknownDifficulty,
    #[error("Command does not apply to this mode")]
    WrongMode,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
