//! Local unit-square → global mapping for hit polygons.
//!
//! A node's untransformed box is parameterized by `(u, v) ∈ [0, 1]²`, with
//! `(0, 0)` the top-left and `(1, 1)` the bottom-right corner. The box is
//! centred on the node's pivot in local space, so the local point for `(u, v)`
//! is `original_size · (u − 0.5 + pivot / original_size)`, which is then placed
//! by the node's own local → global transform.

use crate::geometry::Polygon;
use crate::model::Selectable;
use kurbo::{Point, Size};

/// Unit-square corners in polygon order.
pub const UNIT_CORNERS: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Pre-scale content size, or `None` when any extent or scale factor is zero
/// or non-finite (the node cannot be hit reliably).
pub fn original_size<N: Selectable + ?Sized>(node: &N) -> Option<Size> {
    let rendered = node.rendered_size();
    let scale = node.scale();
    let extents = [rendered.width, rendered.height, scale.x, scale.y];
    if extents.iter().any(|v| !v.is_finite() || *v == 0.0) {
        return None;
    }
    Some(Size::new(
        rendered.width / scale.x.abs(),
        rendered.height / scale.y.abs(),
    ))
}

/// Global position of the local unit-square point `(u, v)`.
///
/// Returns `None` for degenerate nodes instead of propagating NaN.
pub fn local_unit_corner_to_global<N: Selectable + ?Sized>(
    node: &N,
    u: f64,
    v: f64,
) -> Option<Point> {
    let size = original_size(node)?;
    let pivot = node.pivot();
    let frac_x = pivot.x / size.width;
    let frac_y = pivot.y / size.height;
    let local = Point::new(size.width * (u - 0.5 + frac_x), size.height * (v - 0.5 + frac_y));
    let global = node.to_global(local);
    (global.x.is_finite() && global.y.is_finite()).then_some(global)
}

/// The node's four global corners, or `None` if it is degenerate.
pub fn node_polygon<N: Selectable + ?Sized>(node: &N) -> Option<Polygon> {
    let mut corners = [Point::ZERO; 4];
    for (slot, (u, v)) in corners.iter_mut().zip(UNIT_CORNERS) {
        *slot = local_unit_corner_to_global(node, u, v)?;
    }
    Some(Polygon::from(corners))
}
