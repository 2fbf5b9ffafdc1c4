use serde::{Deserialize, Serialize};

use crate::*;

pub const CLASSIC_USAGE: &str = "Input format: 'x,y' or 'fx,y'";
pub const MAZE_USAGE: &str = "WASD: Move, F+WASD: Flag, R: Radar";
pub const MAZE_FLAG_USAGE: &str = "Usage: f[wasd]";
pub const CHAOS_USAGE: &str = "Chaos mode: enter Node ID (e.g. '5' or 'f5')";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Maze,
    Classic,
    Chaos,
}

impl Mode {
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Maze => MAZE_USAGE,
            Self::Classic => CLASSIC_USAGE,
            Self::Chaos => CHAOS_USAGE,
        }
    }
}

/// A player action, already parsed for a specific mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Classic: open a cell.
    Reveal(Coord2),
    /// Classic: toggle the flag on a cell.
    Flag(Coord2),
    /// Maze: step the player.
    Move(Direction),
    /// Maze: toggle the flag next to the player.
    FlagToward(Direction),
    /// Maze: radar around the player.
    Scan,
    /// Chaos: open a node.
    RevealNode(NodeId),
    /// Chaos: toggle the flag on a node.
    FlagNode(NodeId),
}

impl Command {
    /// Parses one line of player input. Case and surrounding whitespace are ignored.
    pub fn parse(mode: Mode, input: &str) -> Result<Self> {
        let input = input.trim();
        let (is_flag, rest) = match input.strip_prefix(['f', 'F']) {
            Some(rest) => (true, rest.trim()),
            None => (false, input),
        };

        match mode {
            Mode::Classic => {
                let coords = parse_coords(rest)?;
                Ok(if is_flag {
                    Self::Flag(coords)
                } else {
                    Self::Reveal(coords)
                })
            }
            Mode::Maze if is_flag => single_key(rest)
                .and_then(Direction::from_key)
                .map(Self::FlagToward)
                .ok_or(GameError::InvalidFormat(MAZE_FLAG_USAGE)),
            Mode::Maze => match single_key(rest) {
                Some('r') => Ok(Self::Scan),
                key => key
                    .and_then(Direction::from_key)
                    .map(Self::Move)
                    .ok_or(GameError::InvalidFormat(MAZE_USAGE)),
            },
            Mode::Chaos => {
                let id = rest
                    .parse::<NodeId>()
                    .map_err(|_| GameError::InvalidFormat(CHAOS_USAGE))?;
                Ok(if is_flag {
                    Self::FlagNode(id)
                } else {
                    Self::RevealNode(id)
                })
            }
        }
    }
}

fn single_key(input: &str) -> Option<char> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Some(key.to_ascii_lowercase()),
        _ => None,
    }
}

/// `x,y` with integers; well-formed numbers outside the coordinate type are a
/// bounds error rather than a format error.
fn parse_coords(input: &str) -> Result<Coord2> {
    let (x, y) = input
        .split_once(',')
        .ok_or(GameError::InvalidFormat(CLASSIC_USAGE))?;
    let x = parse_axis(x)?;
    let y = parse_axis(y)?;
    Ok((x, y))
}

fn parse_axis(input: &str) -> Result<Coord> {
    let value = input
        .trim()
        .parse::<i64>()
        .map_err(|_| GameError::InvalidFormat(CLASSIC_USAGE))?;
    Coord::try_from(value).map_err(|_| GameError::InvalidCoords)
}
