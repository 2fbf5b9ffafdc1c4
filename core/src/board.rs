use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Immutable result of grid generation: the cell kinds and their precomputed hints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    kinds: Array2<CellKind>,
    hints: Array2<u8>,
    wall_count: CellCount,
}

impl GridLayout {
    /// Builds a layout from a square kind matrix and computes its hints.
    pub fn from_kinds(kinds: Array2<CellKind>) -> Result<Self> {
        let (size_x, size_y) = kinds.dim();
        if size_x != size_y || size_x == 0 {
            return Err(GameError::BoardTooSmall);
        }
        let size: Coord = size_x.try_into().map_err(|_| GameError::InvalidCoords)?;
        Ok(Self::from_square(kinds, size))
    }

    /// `kinds` has to be `size` × `size`.
    pub(crate) fn from_square(kinds: Array2<CellKind>, size: Coord) -> Self {
        let hints = grid_hints(&kinds, size);
        let wall_count = kinds.iter().filter(|kind| kind.is_wall()).count() as CellCount;
        Self {
            kinds,
            hints,
            wall_count,
        }
    }

    pub fn from_wall_coords(size: Coord, wall_coords: &[Coord2]) -> Result<Self> {
        let mut kinds: Array2<CellKind> = Array2::default((size, size).to_nd_index());

        for &coords in wall_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            kinds[coords.to_nd_index()] = CellKind::Wall;
        }

        Self::from_kinds(kinds)
    }

    pub fn size(&self) -> Coord {
        self.kinds.dim().0 as Coord
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn kind_at(&self, coords: Coord2) -> CellKind {
        self.kinds[coords.to_nd_index()]
    }

    pub fn hint_at(&self, coords: Coord2) -> u8 {
        self.hints[coords.to_nd_index()]
    }

    pub fn wall_count(&self) -> CellCount {
        self.wall_count
    }

    pub fn floor_count(&self) -> CellCount {
        self.total_cells() - self.wall_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size();
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }
}

/// A grid layout together with what the player has uncovered or flagged so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: GridLayout,
    cover: Array2<Cover>,
    revealed_floor: CellCount,
    flag_count: CellCount,
}

impl Board {
    pub fn new(layout: GridLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            cover: Array2::default((size, size).to_nd_index()),
            revealed_floor: 0,
            flag_count: 0,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn size(&self) -> Coord {
        self.layout.size()
    }

    pub fn cover_at(&self, coords: Coord2) -> Cover {
        self.cover[coords.to_nd_index()]
    }

    pub fn kind_at(&self, coords: Coord2) -> CellKind {
        self.layout.kind_at(coords)
    }

    pub fn hint_at(&self, coords: Coord2) -> u8 {
        self.layout.hint_at(coords)
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Walls minus flags, what a minesweeper counter would show.
    pub fn mines_left(&self) -> isize {
        (self.layout.wall_count() as isize) - (self.flag_count as isize)
    }

    pub fn all_floor_revealed(&self) -> bool {
        self.revealed_floor == self.layout.floor_count()
    }

    /// Flood-reveals from `coords`. Walls are uncovered too when targeted directly;
    /// callers decide what that means.
    pub fn reveal(&mut self, coords: Coord2) -> Result<CellCount> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(flood_reveal(self, coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use Cover::*;
        use MarkOutcome::*;

        let coords = self.layout.validate_coords(coords)?;

        Ok(match self.cover[coords.to_nd_index()] {
            Hidden => {
                self.cover[coords.to_nd_index()] = Flagged;
                self.flag_count += 1;
                Changed
            }
            Flagged => {
                self.cover[coords.to_nd_index()] = Hidden;
                self.flag_count -= 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    /// Uncovers a single cell regardless of flags or hint, without spreading.
    pub fn force_reveal(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.layout.validate_coords(coords)?;
        self.uncover(coords);
        Ok(())
    }

    /// Force-reveals every cell within Chebyshev distance `radius` of `center`.
    pub fn reveal_square(&mut self, center: Coord2, radius: Coord) -> Result<()> {
        let center = self.layout.validate_coords(center)?;
        for coords in iter_square(center, radius, self.size()) {
            self.uncover(coords);
        }
        Ok(())
    }

    pub fn reveal_all(&mut self) {
        for coords in self.layout.iter_coords() {
            self.uncover(coords);
        }
    }
}

impl Disclose for Board {
    type Site = Coord2;

    const SWEEPS_FLAGS: bool = true;

    fn cover(&self, site: Coord2) -> Cover {
        self.cover[site.to_nd_index()]
    }

    fn uncover(&mut self, site: Coord2) {
        match self.cover[site.to_nd_index()] {
            Cover::Revealed => return,
            Cover::Flagged => self.flag_count -= 1,
            Cover::Hidden => {}
        }
        self.cover[site.to_nd_index()] = Cover::Revealed;
        if !self.layout.kind_at(site).is_wall() {
            self.revealed_floor += 1;
        }
    }

    fn is_opening(&self, site: Coord2) -> bool {
        !self.layout.kind_at(site).is_wall() && self.layout.hint_at(site) == 0
    }

    fn neighbors(&self, site: Coord2) -> SmallVec<[Coord2; 8]> {
        self.layout.iter_neighbors(site).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(size: Coord, walls: &[Coord2]) -> Board {
        Board::new(GridLayout::from_wall_coords(size, walls).unwrap())
    }

    fn revealed(board: &Board) -> Vec<Coord2> {
        board
            .layout()
            .iter_coords()
            .filter(|&coords| board.cover_at(coords).is_revealed())
            .collect()
    }

    #[test]
    fn flood_fill_opens_zero_region_up_to_hints() {
        let mut board = board(4, &[(3, 3)]);

        let opened = board.reveal((0, 0)).unwrap();

        assert_eq!(opened, 15);
        assert_eq!(board.cover_at((2, 2)), Cover::Revealed);
        assert_eq!(board.hint_at((2, 2)), 1);
        assert_eq!(board.cover_at((3, 3)), Cover::Hidden);
        assert!(board.all_floor_revealed());
    }

    #[test]
    fn numbered_cell_does_not_spread() {
        let mut board = board(3, &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)).unwrap(), 1);
        assert_eq!(board.cover_at((2, 2)), Cover::Hidden);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut once = board(5, &[(2, 2), (4, 0)]);
        once.reveal((0, 4)).unwrap();
        let mut twice = once.clone();

        assert_eq!(twice.reveal((0, 4)).unwrap(), 0);
        assert_eq!(revealed(&once), revealed(&twice));
    }

    #[test]
    fn flood_sweeps_flagged_neighbors() {
        let mut board = board(3, &[]);
        board.toggle_flag((2, 2)).unwrap();

        board.reveal((0, 0)).unwrap();

        assert_eq!(board.cover_at((2, 2)), Cover::Revealed);
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn flagged_origin_is_left_alone() {
        let mut board = board(3, &[]);
        board.toggle_flag((0, 0)).unwrap();

        assert_eq!(board.reveal((0, 0)).unwrap(), 0);
        assert_eq!(board.cover_at((0, 0)), Cover::Flagged);
    }

    #[test]
    fn toggle_flag_ignores_revealed_cells() {
        let mut board = board(3, &[(1, 1)]);
        board.reveal((0, 0)).unwrap();

        assert_eq!(board.toggle_flag((0, 0)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(board.toggle_flag((1, 1)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.mines_left(), 0);
        assert_eq!(board.toggle_flag((1, 1)).unwrap(), MarkOutcome::Changed);
        assert_eq!(board.cover_at((1, 1)), Cover::Hidden);
    }

    #[test]
    fn square_reveal_is_clipped_and_clears_flags() {
        let mut board = board(6, &[(1, 1)]);
        board.toggle_flag((1, 1)).unwrap();

        board.reveal_square((0, 0), 2).unwrap();

        assert_eq!(revealed(&board).len(), 9);
        assert_eq!(board.cover_at((1, 1)), Cover::Revealed);
        assert_eq!(board.cover_at((3, 0)), Cover::Hidden);
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn out_of_range_coords_are_rejected() {
        let mut board = board(3, &[]);
        assert_eq!(board.reveal((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 7)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn layout_must_be_square() {
        let kinds = Array2::from_elem([2, 3], CellKind::Floor);
        assert_eq!(GridLayout::from_kinds(kinds), Err(GameError::BoardTooSmall));
    }
}
