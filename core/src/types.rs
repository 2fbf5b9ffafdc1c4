use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board side length and positions.
pub type Coord = u8;

/// Count type used for mine counts, node counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional grid coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Position of a chaos node on the unbounded growth lattice.
pub type LatticePoint = (i32, i32);

/// Stable index of a chaos node, assigned in growth order.
pub type NodeId = u16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Offsets of the 8-connected neighborhood, column-major so chaos neighbor lists
/// come out ordered by `dx` first.
pub(crate) const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains inside a
/// square board of side `size`.
pub(crate) fn apply_delta(coords: Coord2, delta: (isize, isize), size: Coord) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= size {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= size {
        return None;
    }

    Some((next_x, next_y))
}

/// Cardinal step, used for player movement and maze carving.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Down, Self::Up, Self::Right, Self::Left];

    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Maps the `wasd` keys to a direction.
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(Self::Up),
            's' => Some(Self::Down),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            _ => None,
        }
    }

    /// One step in this direction, `None` when it leaves the board.
    pub fn step(self, from: Coord2, size: Coord) -> Option<Coord2> {
        apply_delta(from, self.delta(), size)
    }

    /// `distance` steps in this direction, `None` when it leaves the board.
    pub fn stride(self, from: Coord2, distance: isize, size: Coord) -> Option<Coord2> {
        let (dx, dy) = self.delta();
        apply_delta(from, (dx * distance, dy * distance), size)
    }

    pub const fn lattice_step(self, (x, y): LatticePoint) -> LatticePoint {
        let (dx, dy) = self.delta();
        (x + dx as i32, y + dy as i32)
    }
}

/// In-bounds 8-neighbors of a cell on a square board.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.size);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// In-bounds cells within Chebyshev distance `radius` of `center`, center included.
pub fn iter_square(center: Coord2, radius: Coord, size: Coord) -> impl Iterator<Item = Coord2> {
    let (cx, cy) = center;
    let x_range = cx.saturating_sub(radius)..=cx.saturating_add(radius).min(size.saturating_sub(1));
    let y_range = cy.saturating_sub(radius)..=cy.saturating_add(radius).min(size.saturating_sub(1));
    y_range.flat_map(move |y| x_range.clone().map(move |x| (x, y)))
}

/// Whether `coords` sits on the outermost ring of a square board.
pub const fn on_border((x, y): Coord2, size: Coord) -> bool {
    x == 0 || y == 0 || x + 1 == size || y + 1 == size
}
