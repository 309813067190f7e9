//! Lenient parsing of service responses into a [`Diagram`].
//!
//! The service's output is generated text, so individual nodes are repaired
//! or dropped rather than failing the whole response.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::diagram::{Connection, Diagram, Node, Rgb, ShapeKind};
use crate::error::ServiceError;

/// An accepted service response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceResult {
    pub diagram: Diagram,
    /// Sections the service expected in a PRD but did not find.
    pub gaps_detected: Vec<String>,
    /// Length of the text the service extracted.
    pub input_length: usize,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: Option<bool>,
    error: Option<String>,
    nodes: Option<Vec<Value>>,
    #[serde(default)]
    connections: Vec<Value>,
    #[serde(default)]
    gaps_detected: Vec<String>,
    #[serde(default)]
    input_length: usize,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: Option<Value>,
    shape: Option<String>,
    #[serde(alias = "label")]
    text: Option<String>,
    #[serde(rename = "fullText")]
    full_text: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConnection {
    from: Option<Value>,
    to: Option<Value>,
    label: Option<String>,
}

/// Parse a response body.
///
/// `error` or `success: false` is a rejection, a body without `nodes` is
/// malformed. Everything else is accepted after per-node repair.
pub fn parse(body: &str) -> Result<ServiceResult, ServiceError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| ServiceError::malformed(e.to_string()))?;

    if envelope.error.is_some() || envelope.success == Some(false) {
        let message = envelope
            .error
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "request failed".to_string());
        return Err(ServiceError::Rejected { message });
    }
    let raw_nodes = envelope
        .nodes
        .ok_or_else(|| ServiceError::malformed("missing `nodes` array"))?;

    let mut seen = HashSet::new();
    let nodes = raw_nodes
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| node_from_value(i, value))
        .filter(|node| {
            let fresh = seen.insert(node.id.clone());
            if !fresh {
                tracing::warn!(id = %node.id, "duplicate node id, keeping the first");
            }
            fresh
        })
        .collect();
    let connections = envelope
        .connections
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| connection_from_value(i, value))
        .collect();

    Ok(ServiceResult {
        diagram: Diagram::with_parts(nodes, connections),
        gaps_detected: envelope.gaps_detected,
        input_length: envelope.input_length,
    })
}

fn node_from_value(index: usize, value: Value) -> Option<Node> {
    let raw: RawNode = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(index, error = %err, "skipping unreadable node");
            return None;
        }
    };
    let Some(id) = raw.id.as_ref().and_then(id_string) else {
        tracing::warn!(index, "skipping node without id");
        return None;
    };
    let kind = raw
        .shape
        .as_deref()
        .map(ShapeKind::from_name_or_default)
        .unwrap_or_default();
    let color = match raw.color.as_deref() {
        None => kind.default_color(),
        Some(text) => Rgb::parse(text).unwrap_or_else(|| {
            tracing::warn!(%id, color = text, "invalid color, using the shape default");
            kind.default_color()
        }),
    };
    let mut node = Node::new(id, kind, raw.text.unwrap_or_default())
        .at(raw.x.unwrap_or(0.0), raw.y.unwrap_or(0.0))
        .with_color(color);
    node.full_text = raw.full_text;
    Some(node)
}

fn connection_from_value(index: usize, value: Value) -> Option<Connection> {
    let raw: RawConnection = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(index, error = %err, "skipping unreadable connection");
            return None;
        }
    };
    let from = raw.from.as_ref().and_then(id_string);
    let to = raw.to.as_ref().and_then(id_string);
    let (Some(from), Some(to)) = (from, to) else {
        tracing::warn!(index, "skipping connection without both endpoints");
        return None;
    };
    let mut conn = Connection::new(from, to);
    conn.label = raw.label;
    Some(conn)
}

/// Ids arrive as strings, though numbers are tolerated.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_service_payload.rs"]
mod tests;
