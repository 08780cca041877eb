use std::collections::BTreeSet;

use rand::Rng;

/// An abstract puzzle unit produced by the synthesizer.
/// Neighbor ids are kept sorted so iteration order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: u32,
    pub neighbors: BTreeSet<u32>,
}

/// A connected undirected graph over dense node ids `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    fn with_nodes(count: u32) -> Self {
        let nodes = (0..count)
            .map(|id| Node {
                id,
                neighbors: BTreeSet::new(),
            })
            .collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.nodes
            .get(a as usize)
            .is_some_and(|n| n.neighbors.contains(&b))
    }

    /// Add the undirected edge `a`-`b`. Self-edges are ignored.
    fn add_edge(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        self.nodes[a as usize].neighbors.insert(b);
        self.nodes[b as usize].neighbors.insert(a);
    }
}

/// Upper bound on edges added beyond the spanning tree.
///
/// A simple planar graph holds at most `3n - 6` edges; the spanning tree
/// already spends `n - 1` of those. The bound keeps edge density in planar
/// range but does not certify an embedding.
fn extra_edge_cap(node_count: u32, target_connectivity: f64) -> usize {
    let n = node_count as i64;
    let planar_budget = (3 * n - 6) - (n - 1);
    let requested = (target_connectivity * node_count as f64 / 2.0).floor() as i64;
    requested.min(planar_budget).max(0) as usize
}

/// Build a random connected graph over `node_count` nodes.
///
/// A spanning tree is grown first (each node attaches to a uniformly random
/// earlier node), which guarantees connectivity in one pass. Extra edges are
/// then sampled between distinct non-adjacent pairs, capped by
/// `extra_edge_cap`. Pair sampling is attempt-bounded so dense requests
/// terminate.
pub fn synthesize(node_count: u32, target_connectivity: f64, rng: &mut impl Rng) -> Graph {
    let mut graph = Graph::with_nodes(node_count);
    if node_count <= 1 {
        return graph;
    }

    for id in 1..node_count {
        let parent = rng.gen_range(0..id);
        graph.add_edge(id, parent);
    }

    let cap = extra_edge_cap(node_count, target_connectivity);
    let mut added = 0;
    let mut attempts = 0;
    let max_attempts = cap * 20 + 20;
    while added < cap && attempts < max_attempts {
        attempts += 1;
        let a = rng.gen_range(0..node_count);
        let b = rng.gen_range(0..node_count);
        if a == b || graph.has_edge(a, b) {
            continue;
        }
        graph.add_edge(a, b);
        added += 1;
    }

    graph
}
