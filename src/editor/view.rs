//! Ephemeral interaction state: hover, in-place label editing, and the
//! two-step delete confirmation. None of it is part of the diagram or its
//! history.

use std::time::{Duration, Instant};

use crate::diagram::{Diagram, NodeId};

/// How long an armed delete stays armed.
pub const DELETE_CONFIRM_WINDOW: Duration = Duration::from_secs(3);

/// Label being edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDraft {
    pub id: NodeId,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub(crate) hovered: Option<NodeId>,
    pub(crate) draft: Option<LabelDraft>,
    pub(crate) armed_delete: Option<(NodeId, Instant)>,
}

impl ViewState {
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn draft(&self) -> Option<&LabelDraft> {
        self.draft.as_ref()
    }

    /// Node whose delete is armed at `now`, if any.
    pub fn armed_delete(&self, now: Instant) -> Option<&str> {
        self.armed_delete
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < DELETE_CONFIRM_WINDOW)
            .map(|(id, _)| id.as_str())
    }

    pub(crate) fn disarm(&mut self) {
        self.armed_delete = None;
    }

    /// Forget anything that points at a node `diagram` no longer has.
    pub(crate) fn reconcile(&mut self, diagram: &Diagram) {
        if self.hovered.as_deref().is_some_and(|id| !diagram.contains(id)) {
            self.hovered = None;
        }
        if self
            .draft
            .as_ref()
            .is_some_and(|d| !diagram.contains(&d.id))
        {
            self.draft = None;
        }
        if self
            .armed_delete
            .as_ref()
            .is_some_and(|(id, _)| !diagram.contains(id))
        {
            self.armed_delete = None;
        }
    }
}
