//! Hit testing: drag rectangle → intersecting nodes.
//!
//! Candidates are scanned in z-order (bottom first). Every node passes a cheap
//! AABB reject before the optional precise polygon test. Tiny drags are
//! treated as clicks: instead of selecting every node under the marquee, only
//! the topmost one is kept.

use indexmap::IndexSet;
use mq_core::geometry::{Polygon, Rect, polygons_intersect};
use mq_core::transform::{node_polygon, original_size};
use mq_core::{NodeId, Selectable};

/// A drag whose longer side is at most this many units behaves like a click.
pub const SMALL_TARGET_THRESHOLD: f64 = 9.0;

/// Find the nodes touched by `rect`, in candidate (z-) order.
///
/// With `precise` set, nodes must intersect the rectangle with their exact
/// transformed quadrilateral, not just their bounding box. Nodes that are not
/// interactive, expose no bounds, or have a zero size or scale are skipped.
/// A node listed twice is reported once.
pub fn find_intersecting<N: Selectable>(
    rect: Rect,
    candidates: &[N],
    precise: bool,
) -> Vec<NodeId> {
    let rect = rect.normalized();
    let click_like = rect.max_side() <= SMALL_TARGET_THRESHOLD;
    let rect_poly = rect.to_polygon();

    let mut hits: IndexSet<NodeId> = IndexSet::new();
    let mut topmost_small: Option<NodeId> = None;

    for node in candidates {
        if !touches(node, &rect, &rect_poly, precise) {
            continue;
        }
        if click_like {
            // Later candidates are drawn on top; the last one wins.
            topmost_small = Some(node.id());
        } else {
            hits.insert(node.id());
        }
    }

    if let Some(id) = topmost_small {
        hits.insert(id);
    }

    log::trace!(
        "hit test {:?} precise={} over {} candidates → {} hits",
        rect,
        precise,
        candidates.len(),
        hits.len()
    );
    hits.into_iter().collect()
}

/// Whether a single node is hit by the (normalized) drag rectangle.
fn touches<N: Selectable>(node: &N, rect: &Rect, rect_poly: &Polygon, precise: bool) -> bool {
    if !node.is_interactive() {
        return false;
    }
    let Some(bounds) = node.global_bounds() else {
        return false;
    };
    if original_size(node).is_none() {
        log::trace!("skip {}: zero size or scale", node.id());
        return false;
    }
    if !rect.overlaps(&bounds) {
        return false;
    }
    if !precise {
        return true;
    }
    match node_polygon(node) {
        Some(poly) => polygons_intersect(rect_poly, &poly),
        None => false,
    }
}
