use alloc::vec::Vec;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::DISPLACEMENTS;
use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChaosNode {
    pub(crate) position: LatticePoint,
    pub(crate) is_mine: bool,
    pub(crate) cover: Cover,
    pub(crate) hint: u8,
    pub(crate) neighbors: SmallVec<[NodeId; 8]>,
}

impl ChaosNode {
    fn new(position: LatticePoint) -> Self {
        Self {
            position,
            is_mine: false,
            cover: Cover::Hidden,
            hint: 0,
            neighbors: SmallVec::new(),
        }
    }

    pub fn position(&self) -> LatticePoint {
        self.position
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn cover(&self) -> Cover {
        self.cover
    }

    pub fn hint(&self) -> u8 {
        self.hint
    }

    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Irregular board: nodes on an integer lattice, adjacent when they touch in
/// any of the 8 directions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChaosGraph {
    nodes: Vec<ChaosNode>,
    mine_count: CellCount,
    revealed_safe: CellCount,
    flag_count: CellCount,
}

impl ChaosGraph {
    /// Builds a mine-free graph, node `i` sitting at `points[i]`.
    pub fn from_points(points: &[LatticePoint]) -> Result<Self> {
        if points.is_empty() {
            return Err(GameError::EmptyChaosBoard);
        }
        if points.len() > usize::from(NodeId::MAX) {
            return Err(GameError::InvalidCoords);
        }

        let mut index: HashMap<LatticePoint, NodeId> = HashMap::with_capacity(points.len());
        for (id, &point) in points.iter().enumerate() {
            if index.insert(point, id as NodeId).is_some() {
                return Err(GameError::InvalidCoords);
            }
        }

        Ok(Self::from_index(points, &index))
    }

    /// `index` maps every entry of `points` back to its position.
    pub(crate) fn from_index(points: &[LatticePoint], index: &HashMap<LatticePoint, NodeId>) -> Self {
        let nodes = points
            .iter()
            .map(|&(gx, gy)| {
                let mut node = ChaosNode::new((gx, gy));
                node.neighbors = DISPLACEMENTS
                    .iter()
                    .filter_map(|&(dx, dy)| index.get(&(gx + dx as i32, gy + dy as i32)))
                    .copied()
                    .collect();
                node
            })
            .collect();

        Self {
            nodes,
            mine_count: 0,
            revealed_safe: 0,
            flag_count: 0,
        }
    }

    /// Marks the given nodes as mines and recomputes every hint.
    pub fn with_mines(mut self, mines: &[NodeId]) -> Result<Self> {
        for &id in mines {
            self.validate_id(id)?;
        }
        self.plant_mines(mines);
        Ok(self)
    }

    pub(crate) fn plant_mines(&mut self, mines: &[NodeId]) {
        for &id in mines {
            self.nodes[usize::from(id)].is_mine = true;
        }
        self.mine_count = self.nodes.iter().filter(|node| node.is_mine).count() as CellCount;
        chaos_hints(&mut self.nodes);
    }

    pub fn nodes(&self) -> &[ChaosNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&ChaosNode> {
        self.nodes.get(usize::from(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count as isize)
    }

    pub fn validate_id(&self, id: NodeId) -> Result<NodeId> {
        if usize::from(id) < self.nodes.len() {
            Ok(id)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Lowest and highest lattice coordinates in use, as `((min_x, min_y), (max_x, max_y))`.
    pub fn bounds(&self) -> (LatticePoint, LatticePoint) {
        self.nodes.iter().fold(
            ((i32::MAX, i32::MAX), (i32::MIN, i32::MIN)),
            |((min_x, min_y), (max_x, max_y)), node| {
                let (x, y) = node.position;
                ((min_x.min(x), min_y.min(y)), (max_x.max(x), max_y.max(y)))
            },
        )
    }

    pub fn all_safe_revealed(&self) -> bool {
        usize::from(self.revealed_safe) + usize::from(self.mine_count) == self.nodes.len()
    }

    pub fn reveal(&mut self, id: NodeId) -> Result<CellCount> {
        let id = self.validate_id(id)?;
        Ok(flood_reveal(self, id))
    }

    pub fn toggle_flag(&mut self, id: NodeId) -> Result<MarkOutcome> {
        use Cover::*;
        use MarkOutcome::*;

        let id = self.validate_id(id)?;
        let node = &mut self.nodes[usize::from(id)];

        Ok(match node.cover {
            Hidden => {
                node.cover = Flagged;
                self.flag_count += 1;
                Changed
            }
            Flagged => {
                node.cover = Hidden;
                self.flag_count -= 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    /// Reveals every node whose degree is at most `max_degree`, spreading as usual.
    pub fn reveal_sparse(&mut self, max_degree: usize) -> CellCount {
        let mut opened: CellCount = 0;
        for id in 0..self.nodes.len() {
            let node = &self.nodes[id];
            if node.degree() <= max_degree && !node.is_mine {
                opened = opened.saturating_add(flood_reveal(self, id as NodeId));
            }
        }
        opened
    }

    pub fn reveal_all(&mut self) {
        for id in 0..self.nodes.len() {
            self.uncover(id as NodeId);
        }
    }
}

impl Disclose for ChaosGraph {
    type Site = NodeId;

    const SWEEPS_FLAGS: bool = false;

    fn cover(&self, site: NodeId) -> Cover {
        self.nodes[usize::from(site)].cover
    }

    fn uncover(&mut self, site: NodeId) {
        let node = &mut self.nodes[usize::from(site)];
        match node.cover {
            Cover::Revealed => return,
            Cover::Flagged => self.flag_count -= 1,
            Cover::Hidden => {}
        }
        node.cover = Cover::Revealed;
        if !node.is_mine {
            self.revealed_safe += 1;
        }
    }

    fn is_opening(&self, site: NodeId) -> bool {
        let node = &self.nodes[usize::from(site)];
        !node.is_mine && node.hint == 0
    }

    fn neighbors(&self, site: NodeId) -> SmallVec<[NodeId; 8]> {
        self.nodes[usize::from(site)].neighbors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 1 2
    // 3 . 4
    const RING: [LatticePoint; 5] = [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)];

    fn ring(mines: &[NodeId]) -> ChaosGraph {
        ChaosGraph::from_points(&RING).unwrap().with_mines(mines).unwrap()
    }

    #[test]
    fn neighbor_lists_are_symmetric() {
        let graph = ring(&[]);

        for (id, node) in graph.nodes().iter().enumerate() {
            for &neighbor in node.neighbors() {
                assert!(graph.nodes()[usize::from(neighbor)].neighbors().contains(&(id as NodeId)));
            }
        }
        assert_eq!(graph.nodes()[1].neighbors(), &[0, 3, 2, 4]);
        assert_eq!(graph.nodes()[0].degree(), 2);
    }

    #[test]
    fn hints_count_adjacent_mines() {
        let graph = ring(&[1]);

        assert_eq!(graph.mine_count(), 1);
        assert_eq!(graph.nodes()[0].hint(), 1);
        assert_eq!(graph.nodes()[4].hint(), 1);
        assert_eq!(graph.nodes()[1].hint(), 0, "mines carry no hint");
    }

    #[test]
    fn flood_stops_at_flagged_nodes() {
        let mut graph = ring(&[]);
        graph.toggle_flag(2).unwrap();

        let opened = graph.reveal(0).unwrap();

        assert_eq!(opened, 4);
        assert_eq!(graph.nodes()[2].cover(), Cover::Flagged);
        assert!(!graph.all_safe_revealed());
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut once = ring(&[4]);
        once.toggle_flag(2).unwrap();
        once.reveal(0).unwrap();
        let mut twice = once.clone();

        assert_eq!(twice.reveal(0).unwrap(), 0);
        assert_eq!(twice.reveal(1).unwrap(), 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn revealing_every_safe_node_completes_graph() {
        let mut graph = ring(&[4]);

        graph.reveal(0).unwrap();
        assert!(!graph.all_safe_revealed());
        graph.reveal(2).unwrap();
        assert!(graph.all_safe_revealed());
        assert_eq!(graph.nodes()[4].cover(), Cover::Hidden);
    }

    #[test]
    fn duplicate_points_are_rejected() {
        assert_eq!(
            ChaosGraph::from_points(&[(0, 0), (0, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(ChaosGraph::from_points(&[]), Err(GameError::EmptyChaosBoard));
    }

    #[test]
    fn invalid_ids_are_rejected() {
        let mut graph = ring(&[]);
        assert_eq!(graph.reveal(5), Err(GameError::InvalidCoords));
        assert_eq!(graph.toggle_flag(9), Err(GameError::InvalidCoords));
    }

    #[test]
    fn bounds_span_all_nodes() {
        let graph = ChaosGraph::from_points(&[(0, 0), (-2, 1), (3, -1)]).unwrap();
        assert_eq!(graph.bounds(), ((-2, -1), (3, 1)));
    }
}
