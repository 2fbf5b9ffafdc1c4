use serde::{Deserialize, Serialize};

/// Hidden content of a grid cell. Classic mode reads `Wall` as a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Floor,
    Wall,
}

impl CellKind {
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Player-visible state of a cell or node. A flagged cell is never revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

impl Cover {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}
