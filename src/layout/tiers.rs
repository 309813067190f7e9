//! Tiered layout in three phases.
//!
//! 1. Tier assignment: longest path from the sources over the graph with
//!    back edges and self-loops removed. Nodes without any edge form a
//!    trailing tier of their own.
//! 2. Ordering: within a tier, nodes sort by their first appearance in the
//!    connection list, falling back to diagram order.
//! 3. Coordinates: each tier is a row of extents separated by `h_gap`,
//!    centered on the widest row; rows are stacked `v_gap` apart, each as
//!    tall as its tallest member.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::graph::GraphIR;
use super::types::LayoutNode;
use crate::config::RenderConfig;
use crate::diagram::{NodeId, Point};

// ─── Phase 1: Tier Assignment ─────────────────────────────────────────────────

/// Tier of every node in a GraphIR.
#[derive(Debug, Clone, Default)]
pub struct TierAssignment {
    pub tiers: HashMap<NodeId, usize>,
    pub tier_count: usize,
    /// Edges left out of tiering, as (from, to).
    pub back_edges: Vec<(NodeId, NodeId)>,
}

impl TierAssignment {
    pub fn assign(gir: &GraphIR) -> Self {
        let g = &gir.digraph;
        let back = gir.back_edges();

        // Same node indices, forward edges only.
        let mut dag: DiGraph<(), ()> = DiGraph::with_capacity(g.node_count(), g.edge_count());
        for _ in g.node_indices() {
            dag.add_node(());
        }
        let mut back_edges: Vec<(usize, NodeId, NodeId)> = Vec::new();
        for edge in g.edge_references() {
            if back.contains(&edge.id()) {
                back_edges.push((
                    edge.weight().position,
                    g[edge.source()].id.clone(),
                    g[edge.target()].id.clone(),
                ));
            } else {
                dag.add_edge(edge.source(), edge.target(), ());
            }
        }
        back_edges.sort_by_key(|(pos, _, _)| *pos);

        let order: Vec<NodeIndex> = match toposort(&dag, None) {
            Ok(order) => order,
            Err(cycle) => {
                // Unreachable once back edges are gone; keep diagram order.
                tracing::warn!(node = ?cycle.node_id(), "cycle left after back-edge removal");
                gir.nodes_in_order().collect()
            }
        };

        let mut tier_of: Vec<usize> = vec![0; g.node_count()];
        for &n in &order {
            for succ in dag.neighbors(n) {
                tier_of[succ.index()] = tier_of[succ.index()].max(tier_of[n.index()] + 1);
            }
        }

        let connected_tiers = gir
            .nodes_in_order()
            .filter(|&n| !gir.is_isolated(&g[n].id))
            .map(|n| tier_of[n.index()] + 1)
            .max()
            .unwrap_or(0);

        let mut tiers = HashMap::with_capacity(g.node_count());
        let mut has_isolated = false;
        for n in gir.nodes_in_order() {
            let id = &g[n].id;
            let tier = if gir.is_isolated(id) {
                has_isolated = true;
                connected_tiers
            } else {
                tier_of[n.index()]
            };
            tiers.insert(id.clone(), tier);
        }

        let tier_count = connected_tiers + usize::from(has_isolated);
        tracing::debug!(
            tier_count,
            back_edges = back_edges.len(),
            "assigned tiers"
        );

        Self {
            tiers,
            tier_count,
            back_edges: back_edges
                .into_iter()
                .map(|(_, from, to)| (from, to))
                .collect(),
        }
    }
}

// ─── Phase 2: Ordering ────────────────────────────────────────────────────────

/// Node ids per tier, left to right.
pub fn order_tiers(gir: &GraphIR, assignment: &TierAssignment) -> Vec<Vec<NodeId>> {
    let g = &gir.digraph;

    // Rank by first appearance in the connection list, `from` before `to`.
    let mut edges: Vec<_> = g.edge_references().collect();
    edges.sort_by_key(|e| e.weight().position);
    let mut first_seen: HashMap<NodeIndex, usize> = HashMap::new();
    for e in &edges {
        for n in [e.source(), e.target()] {
            let rank = first_seen.len();
            first_seen.entry(n).or_insert(rank);
        }
    }

    let mut ranked: Vec<(usize, usize, NodeIndex)> = gir
        .nodes_in_order()
        .map(|n| {
            let rank = first_seen.get(&n).copied().unwrap_or(usize::MAX);
            (rank, g[n].position, n)
        })
        .collect();
    ranked.sort();

    let mut ordering: Vec<Vec<NodeId>> = vec![Vec::new(); assignment.tier_count];
    for (_, _, n) in ranked {
        let id = &g[n].id;
        if let Some(&tier) = assignment.tiers.get(id) {
            ordering[tier].push(id.clone());
        }
    }
    ordering
}

// ─── Phase 3: Coordinates ─────────────────────────────────────────────────────

/// Centers for every ordered node, given each node's layout extent.
///
/// Nodes missing from `extents` fall back to the nominal box size.
pub fn assign_coordinates(
    ordering: &[Vec<NodeId>],
    extents: &HashMap<NodeId, (f64, f64)>,
    config: &RenderConfig,
) -> Vec<LayoutNode> {
    let nominal = (config.node_width, config.node_height);
    let extent_of = |id: &NodeId| extents.get(id).copied().unwrap_or(nominal);

    let row_width = |row: &[NodeId]| -> f64 {
        let widths: f64 = row.iter().map(|id| extent_of(id).0).sum();
        widths + config.h_gap * row.len().saturating_sub(1) as f64
    };
    let widest = ordering
        .iter()
        .map(|row| row_width(row.as_slice()))
        .fold(0.0, f64::max);
    let axis = widest / 2.0;

    let mut nodes = Vec::new();
    let mut top = 0.0;
    for (tier, row) in ordering.iter().enumerate() {
        if row.is_empty() {
            continue;
        }
        let row_height = row
            .iter()
            .map(|id| extent_of(id).1)
            .fold(0.0, f64::max);
        let center_y = top + row_height / 2.0;
        let mut left = axis - row_width(row.as_slice()) / 2.0;
        for (order, id) in row.iter().enumerate() {
            let (w, h) = extent_of(id);
            nodes.push(LayoutNode {
                id: id.clone(),
                tier,
                order,
                center: Point::new(left + w / 2.0, center_y),
                width: w,
                height: h,
            });
            left += w + config.h_gap;
        }
        top += row_height + config.v_gap;
    }
    nodes
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_tiers.rs"]
mod tests;
