use ndarray::Array2;

use super::*;

/// Scatters mines uniformly over the interior, the outer ring always stays safe.
#[derive(Clone, Debug, PartialEq)]
pub struct MinefieldPlacer {
    seed: u64,
}

impl MinefieldPlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PlayfieldGenerator for MinefieldPlacer {
    type Config = MinefieldConfig;
    type Output = GridLayout;

    fn generate(self, config: MinefieldConfig) -> GridLayout {
        use rand::prelude::*;

        let size = config.size;
        let mut kinds: Array2<CellKind> = Array2::default((size, size).to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // MinefieldConfig keeps mines below the interior size, so this terminates
        let mut mines_placed = 0;
        let mut attempts: u32 = 0;
        while mines_placed < config.mines {
            attempts += 1;
            let coords = (rng.random_range(1..size - 1), rng.random_range(1..size - 1));
            let cell = &mut kinds[coords.to_nd_index()];
            if !cell.is_wall() {
                *cell = CellKind::Wall;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} after {} samples",
            mines_placed,
            size,
            size,
            attempts
        );
        GridLayout::from_square(kinds, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_count_inside_border() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let config = difficulty.config();
            for seed in 0..25 {
                let layout = MinefieldPlacer::new(seed).generate(config);

                assert_eq!(layout.wall_count(), config.mines);
                for coords in layout.iter_coords() {
                    if on_border(coords, config.size) {
                        assert_eq!(layout.kind_at(coords), CellKind::Floor, "{:?}", coords);
                    }
                }
            }
        }
    }

    #[test]
    fn dense_interior_still_fills() {
        let config = MinefieldConfig::new(6, 15).unwrap();
        let layout = MinefieldPlacer::new(1).generate(config);
        assert_eq!(layout.wall_count(), 15);
    }

    #[test]
    fn hints_match_brute_force_count() {
        let layout = MinefieldPlacer::new(99).generate(Difficulty::Hard.config());
        for coords in layout.iter_coords() {
            if layout.kind_at(coords).is_wall() {
                continue;
            }
            let mines = layout
                .iter_neighbors(coords)
                .filter(|&pos| layout.kind_at(pos).is_wall())
                .count();
            assert_eq!(usize::from(layout.hint_at(coords)), mines);
        }
    }
}
