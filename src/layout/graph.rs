//! GraphIR: a diagram's connections as a petgraph DiGraph.
//!
//! Only connections whose endpoints both exist become graph edges; the rest
//! are dropped here so later phases never see them.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::{DfsEvent, EdgeRef, depth_first_search};

use crate::diagram::{Diagram, NodeId};

/// Node data stored in the DiGraph.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: NodeId,
    /// Position of this node in the diagram's node list.
    pub position: usize,
}

/// Edge data stored in the DiGraph.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Position of the connection in the diagram's connection list.
    pub position: usize,
}

/// Graph intermediate representation of a diagram.
pub struct GraphIR {
    pub digraph: DiGraph<NodeData, EdgeData>,
    /// Maps node id → petgraph NodeIndex.
    pub node_index: HashMap<NodeId, NodeIndex>,
    /// Connections dropped because an endpoint is missing.
    pub dangling: usize,
}

impl GraphIR {
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let mut digraph: DiGraph<NodeData, EdgeData> = DiGraph::new();
        let mut node_index: HashMap<NodeId, NodeIndex> = HashMap::new();

        for (position, node) in diagram.nodes.iter().enumerate() {
            if node_index.contains_key(&node.id) {
                tracing::warn!(id = %node.id, "duplicate node id ignored by layout");
                continue;
            }
            let idx = digraph.add_node(NodeData {
                id: node.id.clone(),
                position,
            });
            node_index.insert(node.id.clone(), idx);
        }

        let mut dangling = 0;
        for (position, conn) in diagram.connections.iter().enumerate() {
            match (node_index.get(&conn.from), node_index.get(&conn.to)) {
                (Some(&from), Some(&to)) => {
                    digraph.add_edge(from, to, EdgeData { position });
                }
                _ => {
                    tracing::debug!(from = %conn.from, to = %conn.to, "ignoring dangling connection");
                    dangling += 1;
                }
            }
        }

        Self {
            digraph,
            node_index,
            dangling,
        }
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.node_index.get(id).map_or(0, |&idx| {
            self.digraph
                .edges_directed(idx, petgraph::Direction::Incoming)
                .count()
        })
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.node_index.get(id).map_or(0, |&idx| {
            self.digraph
                .edges_directed(idx, petgraph::Direction::Outgoing)
                .count()
        })
    }

    /// True when the node has no incident edge at all (self-loops count).
    pub fn is_isolated(&self, id: &str) -> bool {
        self.in_degree(id) == 0 && self.out_degree(id) == 0
    }

    /// Node indices in diagram order.
    pub fn nodes_in_order(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        // Indices are assigned in insertion order.
        self.digraph.node_indices()
    }

    /// Edges that close a cycle, found by a depth-first pass over successors
    /// starting from each node in diagram order.
    ///
    /// An edge is a back edge when it reaches a node still on the current
    /// DFS path. Self-loops are always back edges.
    pub fn back_edges(&self) -> HashSet<EdgeIndex> {
        let mut back_pairs: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        depth_first_search(&self.digraph, self.nodes_in_order(), |event| {
            if let DfsEvent::BackEdge(u, v) = event {
                back_pairs.insert((u, v));
            }
        });
        self.digraph
            .edge_references()
            .filter(|e| back_pairs.contains(&(e.source(), e.target())))
            .map(|e| e.id())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;
