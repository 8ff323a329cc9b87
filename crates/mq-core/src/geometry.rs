//! Geometry primitives for marquee hit testing.
//!
//! Axis-aligned rectangles, convex polygons, and the three predicates the
//! hit-test engine is built on: rect/rect overlap, point-in-rect, and the
//! separating-axis polygon test. Everything here is pure and total for finite
//! inputs; all boundaries are inclusive (touching counts as overlapping).

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Rect ────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in global (screen) space.
///
/// Predicates assume `width, height >= 0`; build drag rectangles with
/// [`Rect::from_corners`] or call [`Rect::normalized`] first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two arbitrary corners, in any drag direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        kurbo::Rect::from_points(a, b).into()
    }

    /// Smallest rectangle containing every point. `None` for an empty input.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let hull = iter.fold(kurbo::Rect::from_points(first, first), |r, p| r.union_pt(p));
        Some(hull.into())
    }

    /// Flip negative extents so that `width, height >= 0`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        kurbo::Rect::from(*self).abs().into()
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The longer of the two sides.
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    pub fn contains_point(&self, p: Point) -> bool {
        point_in_rect(p, self)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::from(self.corners())
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        kurbo::Rect::new(r.x, r.y, r.x + r.width, r.y + r.height)
    }
}

// ─── Polygon ─────────────────────────────────────────────────────────────

/// Closed loop of points. Quadrilaterals stay inline; winding is irrelevant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon(SmallVec<[Point; 4]>);

impl Polygon {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self(points.into_iter().collect())
    }

    pub fn vertices(&self) -> &[Point] {
        &self.0
    }

    /// Edge vectors, including the closing edge from the last vertex back to the first.
    pub fn edges(&self) -> impl Iterator<Item = Vec2> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| self.0[(i + 1) % n] - self.0[i])
    }

    #[must_use]
    pub fn transformed(&self, affine: Affine) -> Self {
        Self(self.0.iter().map(|p| affine * *p).collect())
    }

    /// Closed interval covered by the vertices projected onto `axis`.
    fn project(&self, axis: Vec2) -> (f64, f64) {
        self.0
            .iter()
            .map(|p| p.to_vec2().dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }
}

impl From<[Point; 4]> for Polygon {
    fn from(points: [Point; 4]) -> Self {
        Self(SmallVec::from_buf(points))
    }
}

// ─── Predicates ──────────────────────────────────────────────────────────

/// Inclusive point containment: touching the boundary counts as inside.
pub fn point_in_rect(p: Point, r: &Rect) -> bool {
    r.left() <= p.x && p.x <= r.right() && r.top() <= p.y && p.y <= r.bottom()
}

/// True iff the rectangles share any area or boundary.
///
/// Corner containment covers every arrangement except the "plus sign", where
/// each rectangle spans the other along exactly one axis; that case is tested
/// separately.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    if a.corners().iter().any(|c| point_in_rect(*c, b))
        || b.corners().iter().any(|c| point_in_rect(*c, a))
    {
        return true;
    }
    crosses(a, b) || crosses(b, a)
}

/// `a` spans `b` horizontally while `b` spans `a` vertically.
fn crosses(a: &Rect, b: &Rect) -> bool {
    a.left() <= b.left()
        && a.right() >= b.right()
        && b.top() <= a.top()
        && b.bottom() >= a.bottom()
}

/// Separating Axis Theorem test for two convex polygons.
///
/// Axes are the edge normals `(dy, -dx)` of both polygons. The two coordinate
/// axes are tested as well so that degenerate inputs (a zero-area drag
/// collapses to a segment or a point, which has no usable normals) still
/// resolve correctly. Touching intervals count as intersecting.
pub fn polygons_intersect(p1: &Polygon, p2: &Polygon) -> bool {
    if p1.vertices().is_empty() || p2.vertices().is_empty() {
        return false;
    }

    let coordinate_axes = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
    let edge_normals = p1
        .edges()
        .chain(p2.edges())
        .map(|e| Vec2::new(e.y, -e.x))
        .filter(|n| n.x != 0.0 || n.y != 0.0);

    for axis in coordinate_axes.into_iter().chain(edge_normals) {
        let (min1, max1) = p1.project(axis);
        let (min2, max2) = p2.project(axis);
        if max1 < min2 || max2 < min1 {
            return false;
        }
    }
    true
}
