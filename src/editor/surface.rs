//! The diagram surface: sole owner of the live diagram.
//!
//! Every structural edit runs against a copy of the live diagram. If it
//! succeeds the copy replaces the live diagram, a snapshot goes into the
//! history, and the cached frame is re-rendered. If it fails nothing
//! changes, history included.

use std::time::Instant;

use super::history::History;
use super::view::{LabelDraft, ViewState};
use crate::config::RenderConfig;
use crate::diagram::{Connection, Diagram, Node, NodeId, Point, Rgb, ShapeKind};
use crate::error::EditError;
use crate::layout::layout_with_config;
use crate::renderers::{Renderer, SvgRenderer};

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRequest {
    /// First request: the node is marked and a second request deletes it.
    Armed,
    Deleted,
}

pub struct DiagramSurface {
    diagram: Diagram,
    history: History<Diagram>,
    config: RenderConfig,
    renderer: Box<dyn Renderer>,
    frame: String,
    next_id: usize,
    view: ViewState,
}

impl DiagramSurface {
    /// A surface rendering SVG with default metrics.
    pub fn new(diagram: Diagram) -> Self {
        Self::with_config(diagram, RenderConfig::default())
    }

    pub fn with_config(diagram: Diagram, config: RenderConfig) -> Self {
        let renderer = Box::new(SvgRenderer::new(config.clone()));
        Self::with_renderer(diagram, config, renderer)
    }

    pub fn with_renderer(
        diagram: Diagram,
        config: RenderConfig,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let mut surface = Self {
            history: History::new(diagram.clone()),
            next_id: diagram.nodes.len(),
            diagram,
            config,
            renderer,
            frame: String::new(),
            view: ViewState::default(),
        };
        surface.refresh();
        surface
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Latest output of the configured renderer.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn history(&self) -> &History<Diagram> {
        &self.history
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Render the live diagram with some other renderer, e.g. for export.
    pub fn render_with(&self, renderer: &dyn Renderer) -> String {
        renderer.render(&self.diagram)
    }

    // ── Structural edits ────────────────────────────────────────────────────

    /// Add a node of `kind` centered at `position` and return its id.
    ///
    /// A blank label becomes `New <kind>`. The fill is the kind's default.
    pub fn add_node(
        &mut self,
        kind: ShapeKind,
        label: &str,
        position: Point,
    ) -> Result<NodeId, EditError> {
        let (id, counter) = self.peek_id();
        if !position.is_finite() {
            return Err(EditError::NonFinitePosition { id });
        }
        let label = match label.trim() {
            "" => format!("New {kind}"),
            text => text.to_string(),
        };
        let node = Node::new(id.clone(), kind, label).at(position.x, position.y);
        self.edit(|d| {
            d.nodes.push(node);
            Ok(())
        })?;
        self.next_id = counter + 1;
        tracing::debug!(%id, %kind, "node added");
        Ok(id)
    }

    pub fn move_node(&mut self, id: &str, position: Point) -> Result<(), EditError> {
        if !position.is_finite() {
            return Err(EditError::NonFinitePosition { id: id.to_string() });
        }
        self.edit(|d| {
            let node = d.node_mut(id).ok_or_else(|| EditError::unknown(id))?;
            node.position = position;
            Ok(())
        })
    }

    /// Replace a node's label with `label`, trimmed. Blank labels are rejected.
    pub fn relabel(&mut self, id: &str, label: &str) -> Result<(), EditError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(EditError::EmptyLabel);
        }
        self.edit(|d| {
            let node = d.node_mut(id).ok_or_else(|| EditError::unknown(id))?;
            node.label = label.to_string();
            Ok(())
        })
    }

    /// Remove a node and every connection touching it.
    pub fn delete_node(&mut self, id: &str) -> Result<(), EditError> {
        self.edit(|d| {
            let before = d.nodes.len();
            d.nodes.retain(|n| n.id != id);
            if d.nodes.len() == before {
                return Err(EditError::unknown(id));
            }
            d.connections.retain(|c| !c.touches(id));
            Ok(())
        })?;
        tracing::debug!(%id, "node deleted");
        Ok(())
    }

    /// Connect two existing nodes. Self-loops are allowed, exact duplicates are not.
    pub fn add_connection(
        &mut self,
        from: &str,
        to: &str,
        label: Option<&str>,
    ) -> Result<(), EditError> {
        self.edit(|d| {
            for end in [from, to] {
                if !d.contains(end) {
                    return Err(EditError::unknown(end));
                }
            }
            if d.has_connection(from, to) {
                return Err(EditError::DuplicateConnection {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            let mut conn = Connection::new(from, to);
            if let Some(text) = label.map(str::trim).filter(|t| !t.is_empty()) {
                conn = conn.labeled(text);
            }
            d.connections.push(conn);
            Ok(())
        })
    }

    pub fn set_color(&mut self, id: &str, color: Rgb) -> Result<(), EditError> {
        self.edit(|d| {
            let node = d.node_mut(id).ok_or_else(|| EditError::unknown(id))?;
            node.color = color;
            Ok(())
        })
    }

    /// Reposition every node with the tiered auto-layout, as one undoable edit.
    pub fn auto_layout(&mut self) {
        let laid_out = layout_with_config(&self.diagram, &self.config);
        self.commit(laid_out);
    }

    /// Replace the live diagram wholesale, e.g. with a service result.
    pub fn load(&mut self, diagram: Diagram) {
        self.next_id = self.next_id.max(diagram.nodes.len());
        self.commit(diagram);
        tracing::debug!(nodes = self.diagram.nodes.len(), "diagram loaded");
    }

    // ── History ─────────────────────────────────────────────────────────────

    /// Step back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                let snapshot = snapshot.clone();
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns false at the tip.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                let snapshot = snapshot.clone();
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    // ── View state ──────────────────────────────────────────────────────────

    /// Set or clear the hovered node. Unknown ids clear it.
    pub fn hover(&mut self, id: Option<&str>) {
        self.view.hovered = id.filter(|id| self.diagram.contains(id)).map(str::to_string);
    }

    /// Hover detail: the node's full text, or its label.
    pub fn tooltip(&self) -> Option<&str> {
        let id = self.view.hovered()?;
        self.diagram.node(id).map(Node::detail)
    }

    /// Start editing a node's label in place, seeded with the current label.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), EditError> {
        let node = self.diagram.node(id).ok_or_else(|| EditError::unknown(id))?;
        self.view.draft = Some(LabelDraft {
            id: node.id.clone(),
            text: node.label.clone(),
        });
        Ok(())
    }

    /// Replace the draft text. Returns false when no edit is in progress.
    pub fn update_draft(&mut self, text: &str) -> bool {
        match self.view.draft.as_mut() {
            Some(draft) => {
                draft.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Apply the draft through [`relabel`](Self::relabel) and end the edit.
    ///
    /// Without an edit in progress this does nothing.
    pub fn commit_edit(&mut self) -> Result<(), EditError> {
        match self.view.draft.take() {
            Some(draft) => self.relabel(&draft.id, &draft.text),
            None => Ok(()),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.view.draft = None;
    }

    /// Two-step delete: the first request arms, a second one for the same
    /// node within the confirmation window deletes it.
    pub fn request_delete(&mut self, id: &str) -> Result<DeleteRequest, EditError> {
        self.request_delete_at(id, Instant::now())
    }

    pub fn request_delete_at(
        &mut self,
        id: &str,
        now: Instant,
    ) -> Result<DeleteRequest, EditError> {
        if !self.diagram.contains(id) {
            return Err(EditError::unknown(id));
        }
        if self.view.armed_delete(now) == Some(id) {
            self.delete_node(id)?;
            return Ok(DeleteRequest::Deleted);
        }
        self.view.armed_delete = Some((id.to_string(), now));
        Ok(DeleteRequest::Armed)
    }

    // ── Internals ───────────────────────────────────────────────────────────

    /// Next `node-<n>` id not already taken, and the counter that produced it.
    fn peek_id(&self) -> (NodeId, usize) {
        let mut counter = self.next_id;
        loop {
            let id = format!("node-{counter}");
            if !self.diagram.contains(&id) {
                return (id, counter);
            }
            counter += 1;
        }
    }

    fn edit<T>(
        &mut self,
        apply: impl FnOnce(&mut Diagram) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        let mut next = self.diagram.clone();
        let out = apply(&mut next)?;
        self.commit(next);
        Ok(out)
    }

    fn commit(&mut self, next: Diagram) {
        self.diagram = next;
        self.history.save(self.diagram.clone());
        self.view.disarm();
        self.view.reconcile(&self.diagram);
        self.refresh();
    }

    fn restore(&mut self, snapshot: Diagram) {
        self.diagram = snapshot;
        self.view.disarm();
        self.view.reconcile(&self.diagram);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.frame = self.renderer.render(&self.diagram);
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_editor_surface.rs"]
mod tests;
