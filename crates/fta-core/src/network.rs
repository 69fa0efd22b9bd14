//! Watts-Strogatz small-world network.
//!
//! Construction runs in three phases: a ring lattice connecting each node to
//! its K/2 nearest neighbors on each side, a rewiring pass that replaces each
//! clockwise lattice edge with probability beta, and a freeze that converts
//! the mutable per-node sets into an immutable adjacency structure. After
//! construction the network is read-only.

use std::collections::BTreeSet;

use crate::rng::SimRng;

/// Rejection-sampling budget per rewired edge, scaled by node count. Hitting
/// the limit means the candidate pool is effectively exhausted.
const REWIRE_ATTEMPT_FACTOR: usize = 64;

/// A fixed undirected graph over node indices `0..n`, built with the
/// Watts-Strogatz algorithm.
///
/// Invariants: no self-loops, no duplicate edges, and symmetry (`j` is a
/// neighbor of `i` exactly when `i` is a neighbor of `j`). The symmetry is
/// maintained edge by edge during rewiring, never re-derived.
#[derive(Debug, Clone)]
pub struct SmallWorldNetwork {
    adjacency: Vec<Box<[usize]>>,
}

impl SmallWorldNetwork {
    /// Builds a network over `n` nodes with mean degree `k` (even, `k < n`)
    /// and per-edge rewiring probability `beta`.
    pub fn new(n: usize, k: usize, beta: f64, rng: &mut SimRng) -> Result<Self, NetworkError> {
        if n == 0 {
            return Err(NetworkError::EmptyNetwork);
        }
        if k % 2 != 0 {
            return Err(NetworkError::OddDegree { k });
        }
        if k >= n {
            return Err(NetworkError::DegreeTooLarge { k, n });
        }
        if !(0.0..=1.0).contains(&beta) {
            return Err(NetworkError::BetaOutOfRange { beta });
        }

        let half_k = k / 2;

        // Phase 1: ring lattice. Each node's set is computed directly from
        // its circular offsets; the set representation absorbs any
        // wraparound duplicates.
        let mut builder: Vec<BTreeSet<usize>> = (0..n)
            .map(|i| {
                (1..=half_k)
                    .flat_map(|d| [(i + d) % n, (i + n - d) % n])
                    .collect()
            })
            .collect();

        // Phase 2: rewiring. Only each node's K/2 clockwise edges are
        // eligible, so every undirected edge is considered exactly once.
        let mut rewired = 0usize;
        for i in 0..n {
            for d in 1..=half_k {
                let j = (i + d) % n;
                if rng.gen_f64() < beta {
                    Self::rewire(&mut builder, i, j, rng)?;
                    rewired += 1;
                }
            }
        }
        tracing::debug!(n, k, beta, rewired, "small-world network constructed");

        // Phase 3: freeze. Neighbor order is the set enumeration order;
        // only membership and count carry meaning.
        let adjacency = builder
            .into_iter()
            .map(|set| set.into_iter().collect())
            .collect();

        Ok(Self { adjacency })
    }

    /// Replaces the edge `(i, j)` with `(i, c)` for a replacement `c` drawn
    /// uniformly from all nodes, resampling while `c` is `i` itself or
    /// already one of `i`'s neighbors.
    ///
    /// The swap is applied symmetrically in one step: `i` keeps its degree,
    /// `j` loses one edge, `c` gains one.
    fn rewire(
        builder: &mut [BTreeSet<usize>],
        i: usize,
        j: usize,
        rng: &mut SimRng,
    ) -> Result<(), NetworkError> {
        let n = builder.len();
        // Every other node already adjacent: no valid replacement exists.
        if builder[i].len() >= n - 1 {
            return Err(NetworkError::DegenerateTopology { node: i });
        }

        let max_attempts = REWIRE_ATTEMPT_FACTOR * n;
        let mut attempts = 0;
        let candidate = loop {
            let c = rng.gen_index(n);
            if c != i && !builder[i].contains(&c) {
                break c;
            }
            attempts += 1;
            if attempts >= max_attempts {
                return Err(NetworkError::DegenerateTopology { node: i });
            }
        };

        builder[i].remove(&j);
        builder[i].insert(candidate);
        builder[j].remove(&i);
        builder[candidate].insert(i);
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// The frozen neighbor list of node `i`.
    pub fn get_neighbors(&self, i: usize) -> Result<&[usize], NetworkError> {
        self.adjacency
            .get(i)
            .map(|neighbors| &**neighbors)
            .ok_or(NetworkError::NodeOutOfRange {
                index: i,
                len: self.adjacency.len(),
            })
    }

    /// Number of neighbors of node `i`.
    pub fn degree(&self, i: usize) -> Result<usize, NetworkError> {
        Ok(self.get_neighbors(i)?.len())
    }

    /// Whether the undirected edge `(i, j)` exists.
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency
            .get(i)
            .map(|neighbors| neighbors.contains(&j))
            .unwrap_or(false)
    }

    /// Total number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|neighbors| neighbors.len()).sum::<usize>() / 2
    }
}

/// Errors from network construction or neighbor lookup.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// A network needs at least one node
    #[error("network must contain at least one node")]
    EmptyNetwork,
    /// The lattice places K/2 neighbors on each side, so K must be even
    #[error("mean degree must be even, got {k}")]
    OddDegree { k: usize },
    /// A node cannot be adjacent to more nodes than exist
    #[error("mean degree ({k}) must be less than node count ({n})")]
    DegreeTooLarge { k: usize, n: usize },
    /// beta is a probability
    #[error("rewiring probability must be in [0, 1], got {beta}")]
    BetaOutOfRange { beta: f64 },
    /// Neighbor lookup outside [0, n)
    #[error("node index {index} out of range for network of {len} nodes")]
    NodeOutOfRange { index: usize, len: usize },
    /// Rewiring could not find a replacement node: the node is already
    /// adjacent to (nearly) every other node
    #[error("no rewiring candidate available for node {node}")]
    DegenerateTopology { node: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(n: usize, k: usize, beta: f64, seed: u64) -> SmallWorldNetwork {
        let mut rng = SimRng::seed_from_u64(seed);
        SmallWorldNetwork::new(n, k, beta, &mut rng).unwrap()
    }

    /// Lattice neighbor set of node `i` for even degree `k`.
    fn lattice_neighbors(n: usize, k: usize, i: usize) -> Vec<usize> {
        let mut set: BTreeSet<usize> = (1..=k / 2)
            .flat_map(|d| [(i + d) % n, (i + n - d) % n])
            .collect();
        set.remove(&i);
        set.into_iter().collect()
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let mut rng = SimRng::seed_from_u64(0);
        assert!(matches!(
            SmallWorldNetwork::new(0, 0, 0.0, &mut rng),
            Err(NetworkError::EmptyNetwork)
        ));
        assert!(matches!(
            SmallWorldNetwork::new(10, 3, 0.0, &mut rng),
            Err(NetworkError::OddDegree { k: 3 })
        ));
        assert!(matches!(
            SmallWorldNetwork::new(4, 4, 0.0, &mut rng),
            Err(NetworkError::DegreeTooLarge { k: 4, n: 4 })
        ));
        assert!(matches!(
            SmallWorldNetwork::new(10, 4, 1.5, &mut rng),
            Err(NetworkError::BetaOutOfRange { .. })
        ));
    }

    #[test]
    fn test_beta_zero_is_exact_ring_lattice() {
        let network = build(10, 4, 0.0, 1);
        for i in 0..10 {
            assert_eq!(
                network.get_neighbors(i).unwrap(),
                lattice_neighbors(10, 4, i).as_slice()
            );
        }
    }

    #[test]
    fn test_six_node_ring() {
        // N=6, K=2, beta=0: each node connects to its two immediate
        // neighbors on the ring.
        let network = build(6, 2, 0.0, 7);
        assert_eq!(network.get_neighbors(0).unwrap(), &[1, 5]);
        assert_eq!(network.get_neighbors(3).unwrap(), &[2, 4]);
        assert_eq!(network.edge_count(), 6);
    }

    #[test]
    fn test_symmetry_and_no_self_loops() {
        for seed in 0..5 {
            let network = build(40, 6, 0.3, seed);
            for i in 0..network.len() {
                let neighbors = network.get_neighbors(i).unwrap();
                assert!(!neighbors.contains(&i), "self-loop at node {i}");
                for &j in neighbors {
                    assert!(
                        network.has_edge(j, i),
                        "edge ({i}, {j}) missing its reverse"
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_duplicate_neighbors() {
        let network = build(30, 4, 1.0, 11);
        for i in 0..network.len() {
            let neighbors = network.get_neighbors(i).unwrap();
            let unique: BTreeSet<usize> = neighbors.iter().copied().collect();
            assert_eq!(unique.len(), neighbors.len());
        }
    }

    #[test]
    fn test_full_rewiring_conserves_edge_count() {
        let n = 50;
        let k = 4;
        let network = build(n, k, 1.0, 3);
        assert_eq!(network.edge_count(), n * k / 2);
        // A node's own clockwise edges survive rewiring (with new
        // endpoints), so degree never drops below K/2.
        for i in 0..n {
            assert!(network.degree(i).unwrap() >= k / 2);
        }
    }

    #[test]
    fn test_total_degree_conserved() {
        // Under any beta, the total degree sum is conserved: rewiring moves
        // an endpoint but never creates or destroys an edge.
        for beta in [0.0, 0.2, 0.7, 1.0] {
            let network = build(25, 6, beta, 13);
            let total: usize = (0..25).map(|i| network.degree(i).unwrap()).sum();
            assert_eq!(total, 25 * 6);
        }
    }

    #[test]
    fn test_degenerate_topology_detected() {
        // n=3, k=2 is a complete triangle; with beta=1 the first rewire has
        // no candidate left and must surface an error instead of spinning.
        let mut rng = SimRng::seed_from_u64(5);
        let result = SmallWorldNetwork::new(3, 2, 1.0, &mut rng);
        assert!(matches!(
            result,
            Err(NetworkError::DegenerateTopology { .. })
        ));
    }

    #[test]
    fn test_neighbor_lookup_out_of_range() {
        let network = build(6, 2, 0.0, 2);
        assert!(matches!(
            network.get_neighbors(6),
            Err(NetworkError::NodeOutOfRange { index: 6, len: 6 })
        ));
        assert!(network.get_neighbors(5).is_ok());
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = build(60, 6, 0.4, 1234);
        let b = build(60, 6, 0.4, 1234);
        for i in 0..60 {
            assert_eq!(a.get_neighbors(i).unwrap(), b.get_neighbors(i).unwrap());
        }
    }

    #[test]
    fn test_single_node_no_edges() {
        let network = build(1, 0, 0.0, 0);
        assert_eq!(network.len(), 1);
        assert_eq!(network.get_neighbors(0).unwrap(), &[] as &[usize]);
    }
}
