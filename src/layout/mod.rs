//! Layout engine: convenience API for tiered auto-layout.

pub mod graph;
pub mod tiers;
pub mod types;

use std::collections::HashMap;

pub use graph::GraphIR;
pub use tiers::{TierAssignment, assign_coordinates, order_tiers};
pub use types::{LayoutNode, LayoutResult};

use crate::config::RenderConfig;
use crate::diagram::Diagram;
use crate::geometry::ShapeBox;

/// Compute tiers and centers for every node of `diagram`.
pub fn compute_layout(diagram: &Diagram, config: &RenderConfig) -> LayoutResult {
    let gir = GraphIR::from_diagram(diagram);
    if gir.dangling > 0 {
        tracing::warn!(count = gir.dangling, "connections with missing endpoints left out of layout");
    }
    let assignment = TierAssignment::assign(&gir);
    tracing::debug!(
        nodes = gir.digraph.node_count(),
        tiers = assignment.tier_count,
        back_edges = assignment.back_edges.len(),
        "tiers assigned"
    );
    let ordering = order_tiers(&gir, &assignment);

    let mut extents = HashMap::with_capacity(diagram.nodes.len());
    for node in &diagram.nodes {
        extents
            .entry(node.id.clone())
            .or_insert_with(|| ShapeBox::measure(node, config).extent());
    }

    let mut nodes = assign_coordinates(&ordering, &extents, config);
    nodes.sort_by_key(|n| gir.node_index.get(&n.id).map(|idx| idx.index()));

    LayoutResult {
        nodes,
        tier_count: assignment.tier_count,
        back_edges: assignment.back_edges,
    }
}

/// A copy of `diagram` with every position overwritten by the auto-layout.
pub fn layout(diagram: &Diagram) -> Diagram {
    layout_with_config(diagram, &RenderConfig::default())
}

/// Like [`layout`], with explicit metrics and spacing.
pub fn layout_with_config(diagram: &Diagram, config: &RenderConfig) -> Diagram {
    let result = compute_layout(diagram, config);
    let centers: HashMap<&str, _> = result
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.center))
        .collect();

    let mut out = diagram.clone();
    for node in &mut out.nodes {
        if let Some(&center) = centers.get(node.id.as_str()) {
            node.position = center;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_engine.rs"]
mod tests;
