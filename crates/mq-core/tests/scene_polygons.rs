//! Integration tests: scene graph → world transforms → hit polygons.
//!
//! Builds randomly transformed (and nested) nodes and checks that the
//! unit-square polygon reconstructed by the transform helper agrees with the
//! bounds the scene reports for the same node.

use mq_core::geometry::Rect;
use mq_core::transform::node_polygon;
use mq_core::{NodeId, Point, SceneGraph, SceneNode, Selectable, Size, Transform, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_transform(rng: &mut StdRng) -> Transform {
    Transform {
        position: Point::new(rng.gen_range(-200.0..200.0), rng.gen_range(-200.0..200.0)),
        rotation: rng.gen_range(-3.2..3.2),
        scale: Vec2::new(rng.gen_range(0.25..3.0), rng.gen_range(0.25..3.0)),
        skew: Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)),
        pivot: Point::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0)),
    }
}

fn assert_rect_near(a: Rect, b: Rect) {
    let close = |x: f64, y: f64| (x - y).abs() < 1e-6;
    assert!(
        close(a.x, b.x) && close(a.y, b.y) && close(a.width, b.width) && close(a.height, b.height),
        "{a:?} != {b:?}"
    );
}

// ─── Single nodes ───────────────────────────────────────────────────────

#[test]
fn polygon_hull_equals_reported_bounds() {
    let mut rng = StdRng::seed_from_u64(2024);
    for i in 0..100 {
        let mut sg = SceneGraph::new();
        let size = Size::new(rng.gen_range(1.0..80.0), rng.gen_range(1.0..80.0));
        let node = SceneNode::new(NodeId::intern(&format!("rand_{i}")), size)
            .with_transform(random_transform(&mut rng));
        sg.add_node(sg.root, node);

        let view = sg.candidates()[0];
        let poly = node_polygon(&view).expect("non-degenerate node");
        let hull = Rect::bounding(poly.vertices().iter().copied()).unwrap();
        assert_rect_near(hull, view.global_bounds().unwrap());
    }
}

// ─── Nested groups ──────────────────────────────────────────────────────

#[test]
fn nested_transforms_are_honoured_by_polygons() {
    let mut rng = StdRng::seed_from_u64(99);
    for i in 0..50 {
        let mut sg = SceneGraph::new();
        let outer = sg.add_node(
            sg.root,
            SceneNode::group(NodeId::intern(&format!("outer_{i}")))
                .with_transform(random_transform(&mut rng)),
        );
        let inner = sg.add_node(
            outer,
            SceneNode::group(NodeId::intern(&format!("inner_{i}")))
                .with_transform(random_transform(&mut rng)),
        );
        let leaf_id = NodeId::intern(&format!("leaf_{i}"));
        let leaf = sg.add_node(
            inner,
            SceneNode::new(leaf_id, Size::new(30.0, 12.0))
                .with_transform(random_transform(&mut rng)),
        );

        let views = sg.candidates();
        let view = views.iter().find(|v| v.id() == leaf_id).unwrap();
        let poly = node_polygon(view).unwrap();

        // The polygon's centre is the pivot mapped through the composed transform.
        let centre = poly
            .vertices()
            .iter()
            .fold(Point::ZERO, |acc, p| acc + p.to_vec2() / 4.0);
        let expected = sg.world_transform(leaf) * sg.graph[leaf].transform.pivot;
        assert!(
            (centre - expected).hypot() < 1e-6,
            "centre {centre:?} vs pivot {expected:?}"
        );
    }
}
