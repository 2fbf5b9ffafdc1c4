use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;

use super::*;

/// Nodes with at most this many neighbors never hold a mine and start revealed.
pub const SPARSE_DEGREE: usize = 3;

/// Grows a random lattice animal from the origin, then hides mines among its
/// well-connected nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct ChaosGrower {
    seed: u64,
}

impl ChaosGrower {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PlayfieldGenerator for ChaosGrower {
    type Config = ChaosConfig;
    type Output = ChaosGraph;

    fn generate(self, config: ChaosConfig) -> ChaosGraph {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let target = usize::from(config.cells.max(1));

        let mut points: Vec<LatticePoint> = vec![(0, 0)];
        let mut index: HashMap<LatticePoint, NodeId> = HashMap::with_capacity(target);
        index.insert((0, 0), 0);

        while points.len() < target {
            let parent = points[rng.random_range(0..points.len())];
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let candidate = direction.lattice_step(parent);
            if !index.contains_key(&candidate) {
                index.insert(candidate, points.len() as NodeId);
                points.push(candidate);
            }
        }

        let mut graph = ChaosGraph::from_index(&points, &index);

        let mut candidates: Vec<NodeId> = graph
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.degree() > SPARSE_DEGREE)
            .map(|(id, _)| id as NodeId)
            .collect();
        candidates.shuffle(&mut rng);

        let wanted = usize::from(config.mines);
        if candidates.len() < wanted {
            log::warn!(
                "Only {} nodes can hold a mine, requested {}",
                candidates.len(),
                wanted
            );
        }
        candidates.truncate(wanted);
        graph.plant_mines(&candidates);

        log::debug!(
            "Grew chaos board with {} nodes and {} mines",
            graph.len(),
            graph.mine_count()
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grow(cells: CellCount, mines: CellCount, seed: u64) -> ChaosGraph {
        ChaosGrower::new(seed).generate(ChaosConfig::new(cells, mines).unwrap())
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        let graph = grow(1, 0, 0);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.nodes()[0].position(), (0, 0));
        assert!(graph.nodes()[0].neighbors().is_empty());
        assert_eq!(graph.nodes()[0].hint(), 0);
    }

    #[test]
    fn grows_exact_count_of_unique_connected_points() {
        for seed in 0..20 {
            let graph = grow(60, 8, seed);
            assert_eq!(graph.len(), 60);

            let mut positions: Vec<_> = graph.nodes().iter().map(|node| node.position()).collect();
            positions.sort();
            positions.dedup();
            assert_eq!(positions.len(), 60);

            // growth only ever steps sideways, so every later node has an earlier cardinal neighbor
            for node in &graph.nodes()[1..] {
                let (x, y) = node.position();
                assert!(
                    Direction::ALL
                        .iter()
                        .any(|direction| positions.contains(&direction.lattice_step((x, y))))
                );
            }
        }
    }

    #[test]
    fn mines_only_on_well_connected_nodes() {
        for seed in 0..20 {
            let graph = grow(50, 6, seed);
            for node in graph.nodes() {
                if node.is_mine() {
                    assert!(node.degree() > SPARSE_DEGREE);
                }
            }
            assert!(graph.mine_count() <= 6);
        }
    }

    #[test]
    fn neighbors_are_symmetric_and_hints_exact() {
        let graph = grow(80, 10, 5);
        for (id, node) in graph.nodes().iter().enumerate() {
            let mut mines = 0;
            for &neighbor in node.neighbors() {
                let other = &graph.nodes()[usize::from(neighbor)];
                assert!(other.neighbors().contains(&(id as NodeId)));
                let (dx, dy) = (other.position().0 - node.position().0, other.position().1 - node.position().1);
                assert!(dx.abs() <= 1 && dy.abs() <= 1);
                if other.is_mine() {
                    mines += 1;
                }
            }
            if !node.is_mine() {
                assert_eq!(node.hint(), mines);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        assert_eq!(grow(40, 5, 9), grow(40, 5, 9));
    }
}
