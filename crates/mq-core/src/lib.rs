pub mod geometry;
pub mod id;
pub mod model;
pub mod transform;

pub use geometry::{Polygon, Rect, point_in_rect, polygons_intersect, rects_overlap};
pub use id::NodeId;
pub use model::*;
pub use transform::{local_unit_corner_to_global, node_polygon};

// Re-export kurbo value types so downstream crates share one definition.
pub use kurbo::{Affine, Point, Size, Vec2};
// Re-export petgraph types so downstream crates don't need a direct dependency.
pub use petgraph::graph::NodeIndex;
