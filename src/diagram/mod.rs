//! Diagram data model and shape catalogue.

pub mod shapes;
pub mod types;

pub use shapes::{SHAPE_DEFINITIONS, ShapeDefinition, definition, legend};
pub use types::{Connection, Diagram, Node, NodeId, Point, Rgb, ShapeKind};
