use ndarray::Array2;

use crate::*;

/// Adjacent wall count for every floor cell of a square grid. Walls keep a hint of 0.
pub fn grid_hints(kinds: &Array2<CellKind>, size: Coord) -> Array2<u8> {
    let mut hints = Array2::zeros(kinds.dim());

    for x in 0..size {
        for y in 0..size {
            let coords = (x, y);
            if kinds[coords.to_nd_index()].is_wall() {
                continue;
            }
            hints[coords.to_nd_index()] = adjacent_walls(kinds, coords, size);
        }
    }

    hints
}

fn adjacent_walls(kinds: &Array2<CellKind>, coords: Coord2, size: Coord) -> u8 {
    let mut count = 0;
    for pos in NeighborIter::new(coords, size) {
        if kinds[pos.to_nd_index()].is_wall() {
            count += 1;
        }
    }
    count
}

/// Adjacent mine count for every safe node. Mines keep a hint of 0.
pub fn chaos_hints(nodes: &mut [ChaosNode]) {
    for index in 0..nodes.len() {
        let hint = if nodes[index].is_mine {
            0
        } else {
            nodes[index]
                .neighbors
                .iter()
                .filter(|&&neighbor| nodes[usize::from(neighbor)].is_mine)
                .count() as u8
        };
        nodes[index].hint = hint;
    }
}
