//! Random weighted-graph generator.
//!
//! A standalone demo collaborator used by the `generate` binary. It shares
//! nothing with the simulation core beyond the seeded-RNG convention: a
//! graph is fully reproducible from `(num_nodes, seed)`.
//!
//! Construction builds a symmetric cost matrix, prunes non-positive edges,
//! and guarantees every node keeps at least one positive edge so the graph
//! has no isolated nodes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Marker for a pruned edge during construction.
const PRUNED: i32 = -1337;

/// An undirected weighted graph over `num_nodes` nodes, stored as a dense
/// adjacency matrix. `0` means no edge.
#[derive(Debug, Clone)]
pub struct Graph {
    adj: Vec<Vec<i32>>,
}

impl Graph {
    /// Generate a random graph. Edge costs are drawn uniformly from
    /// `-120..=100`; non-positive draws become missing edges afterwards.
    pub fn new(num_nodes: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut adj = vec![vec![0i32; num_nodes]; num_nodes];

        // Symmetric random costs below the diagonal, mirrored above it.
        for i in 0..num_nodes {
            for j in 0..i {
                let cost = rng.gen_range(-120..=100);
                adj[i][j] = cost;
                adj[j][i] = cost;
            }
        }

        // Prune non-positive edges; if that isolates a node, give it one
        // positive edge to its least-negative neighbour.
        for i in 0..num_nodes {
            let mut max = i32::MIN;
            let mut max_index = None;
            for j in 0..num_nodes {
                if i == j {
                    continue;
                }
                if adj[i][j] > max {
                    max = adj[i][j];
                    max_index = Some(j);
                }
                if adj[i][j] <= 0 {
                    adj[i][j] = PRUNED;
                }
            }
            if max <= 0 {
                if let Some(j) = max_index {
                    let cost = rng.gen_range(1..=100);
                    adj[i][j] = cost;
                    adj[j][i] = cost;
                }
            }
        }

        for row in adj.iter_mut() {
            for cell in row.iter_mut() {
                if *cell == PRUNED {
                    *cell = 0;
                }
            }
        }

        Graph { adj }
    }

    /// The adjacency matrix, row-major.
    pub fn adj_matrix(&self) -> &[Vec<i32>] {
        &self.adj
    }

    /// Overwrite the edge between `i` and `j` (both directions).
    pub fn change_edge(&mut self, i: usize, j: usize, cost: i32) {
        self.adj[i][j] = cost;
        self.adj[j][i] = cost;
    }
}
