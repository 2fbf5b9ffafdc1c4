use alloc::collections::{BTreeSet, VecDeque};
use core::fmt::Debug;
use smallvec::SmallVec;

use crate::*;

/// A playfield whose sites can be uncovered by [`flood_reveal`].
pub trait Disclose {
    type Site: Copy + Ord + Debug;

    /// Whether the fill may sweep through flagged sites (unflagging them) or has
    /// to stop at them.
    const SWEEPS_FLAGS: bool;

    fn cover(&self, site: Self::Site) -> Cover;

    /// Marks a single site revealed, dropping any flag on it.
    fn uncover(&mut self, site: Self::Site);

    /// Whether revealing `site` also discloses its neighbors.
    fn is_opening(&self, site: Self::Site) -> bool;

    fn neighbors(&self, site: Self::Site) -> SmallVec<[Self::Site; 8]>;
}

/// Reveals `origin` and, through every zero-hint site reached, all connected
/// sites. Returns how many sites were uncovered; a revealed or flagged origin is
/// left untouched.
pub fn flood_reveal<T: Disclose>(field: &mut T, origin: T::Site) -> CellCount {
    if !matches!(field.cover(origin), Cover::Hidden) {
        return 0;
    }

    let mut opened: CellCount = 0;
    let mut visited = BTreeSet::from([origin]);
    let mut to_visit = VecDeque::from([origin]);

    while let Some(site) = to_visit.pop_front() {
        match field.cover(site) {
            Cover::Revealed => continue,
            Cover::Flagged if !T::SWEEPS_FLAGS => {
                log::trace!("Flood stopped at flagged {:?}", site);
                continue;
            }
            _ => {}
        }

        field.uncover(site);
        opened = opened.saturating_add(1);

        if field.is_opening(site) {
            for neighbor in field.neighbors(site) {
                if !field.cover(neighbor).is_revealed() && visited.insert(neighbor) {
                    to_visit.push_back(neighbor);
                }
            }
        }
    }

    log::trace!("Flood from {:?} opened {} sites", origin, opened);
    opened
}
