use alloc::vec;
use ndarray::Array2;

use super::*;

/// Chance for an interior wall to be knocked down after carving.
pub const BRAID_CHANCE: f64 = 0.2;

/// Side of the square cleared around the start.
const ENTRANCE: Coord = 3;

/// Randomized depth-first maze on the even sub-lattice, braided afterwards so that
/// there is more than one way through.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeCarver {
    seed: u64,
}

impl MazeCarver {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PlayfieldGenerator for MazeCarver {
    type Config = MazeConfig;
    type Output = GridLayout;

    fn generate(self, config: MazeConfig) -> GridLayout {
        use rand::prelude::*;

        let size = config.size;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut kinds = Array2::from_elem((size, size).to_nd_index(), CellKind::Wall);

        carve_passages(&mut kinds, size, config.start(), &mut rng);

        // the goal is off the even lattice on even sizes, connect it from one side
        let goal = config.goal();
        kinds[goal.to_nd_index()] = CellKind::Floor;
        let approach = if rng.random_bool(0.5) {
            (goal.0 - 1, goal.1)
        } else {
            (goal.0, goal.1 - 1)
        };
        kinds[approach.to_nd_index()] = CellKind::Floor;

        braid(&mut kinds, size, &mut rng);

        for x in 0..ENTRANCE.min(size) {
            for y in 0..ENTRANCE.min(size) {
                kinds[(x, y).to_nd_index()] = CellKind::Floor;
            }
        }

        let layout = GridLayout::from_square(kinds, size);
        log::debug!(
            "Carved {}x{} maze with {} walls",
            size,
            size,
            layout.wall_count()
        );
        layout
    }
}

fn carve_passages(
    kinds: &mut Array2<CellKind>,
    size: Coord,
    start: Coord2,
    rng: &mut rand::rngs::SmallRng,
) {
    use rand::prelude::*;

    let mut visited = Array2::from_elem(kinds.dim(), false);
    let mut stack = vec![start];
    kinds[start.to_nd_index()] = CellKind::Floor;
    visited[start.to_nd_index()] = true;

    while let Some(&current) = stack.last() {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        let next = directions.iter().find_map(|&direction| {
            let target = direction.stride(current, 2, size)?;
            (!visited[target.to_nd_index()]).then_some((direction, target))
        });

        match next {
            Some((direction, target)) => {
                if let Some(between) = direction.step(current, size) {
                    kinds[between.to_nd_index()] = CellKind::Floor;
                }
                kinds[target.to_nd_index()] = CellKind::Floor;
                visited[target.to_nd_index()] = true;
                stack.push(target);
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Turns interior walls into floor at random, the outer ring is left alone.
fn braid(kinds: &mut Array2<CellKind>, size: Coord, rng: &mut rand::rngs::SmallRng) {
    use rand::prelude::*;

    for y in 1..size.saturating_sub(1) {
        for x in 1..size.saturating_sub(1) {
            let cell = &mut kinds[(x, y).to_nd_index()];
            if cell.is_wall() && rng.random_bool(BRAID_CHANCE) {
                *cell = CellKind::Floor;
            }
        }
    }
}
