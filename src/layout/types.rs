//! Layout types: LayoutNode, LayoutResult.

use crate::diagram::{NodeId, Point};

// ─── LayoutNode ───────────────────────────────────────────────────────────────

/// A node with its computed tier, slot, and center.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: NodeId,
    pub tier: usize,
    /// Left-to-right slot within the tier.
    pub order: usize,
    pub center: Point,
    /// Extent used for spacing, which may exceed the nominal box.
    pub width: f64,
    pub height: f64,
}

// ─── LayoutResult ─────────────────────────────────────────────────────────────

/// The full output of the layout pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// One entry per distinct node id, in diagram order.
    pub nodes: Vec<LayoutNode>,
    pub tier_count: usize,
    /// Connections ignored for tiering because they close a cycle.
    pub back_edges: Vec<(NodeId, NodeId)>,
}

impl LayoutResult {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids in `tier`, left to right.
    pub fn tier(&self, tier: usize) -> Vec<&str> {
        let mut members: Vec<&LayoutNode> = self.nodes.iter().filter(|n| n.tier == tier).collect();
        members.sort_by_key(|n| n.order);
        members.into_iter().map(|n| n.id.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
