//! Shape geometry, text fitting, and connector routing.

pub mod connector;
pub mod shape;
pub mod wrap;

pub use connector::{ConnectorRouter, EdgePath, Route};
pub use shape::{Primitive, ShapeBox, boundary_point, max_chars_per_line, required_height, usable_width_ratio};
pub use wrap::wrap;
