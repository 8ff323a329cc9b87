//! Scene model consumed by the selection engine.
//!
//! The engine itself only sees the [`Selectable`] capability trait. This module
//! also provides a concrete scene: a tree of transformable nodes stored in a
//! `petgraph` graph, where each node's world transform is its parent's world
//! transform composed with its own local transform. Paint order (pre-order,
//! children in insertion order) doubles as z-order: later means topmost.

use crate::geometry::Rect;
use crate::id::NodeId;
use kurbo::{Affine, Point, Size, Vec2};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Capability trait ────────────────────────────────────────────────────

/// Anything the marquee can select.
///
/// Implementors report sizes and positions in global (screen) space, the same
/// space the pointer coordinates arrive in.
pub trait Selectable {
    fn id(&self) -> NodeId;

    /// Non-interactive nodes are never hit.
    fn is_interactive(&self) -> bool;

    /// Axis-aligned global bounds, or `None` if the node has no extent of its own.
    fn global_bounds(&self) -> Option<Rect>;

    /// Map a point in the node's local space to global space.
    fn to_global(&self, local: Point) -> Point;

    /// Local point the node rotates and scales around.
    fn pivot(&self) -> Point;

    /// Rendered size: content size multiplied by the node's own scale.
    fn rendered_size(&self) -> Size;

    /// The node's own scale factors (parents excluded).
    fn scale(&self) -> Vec2;
}

impl<T: Selectable + ?Sized> Selectable for &T {
    fn id(&self) -> NodeId {
        (**self).id()
    }
    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }
    fn global_bounds(&self) -> Option<Rect> {
        (**self).global_bounds()
    }
    fn to_global(&self, local: Point) -> Point {
        (**self).to_global(local)
    }
    fn pivot(&self) -> Point {
        (**self).pivot()
    }
    fn rendered_size(&self) -> Size {
        (**self).rendered_size()
    }
    fn scale(&self) -> Vec2 {
        (**self).scale()
    }
}

// ─── Transform ───────────────────────────────────────────────────────────

/// Local placement of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point,
    /// Radians, clockwise in a y-down space.
    pub rotation: f64,
    pub scale: Vec2,
    /// Shear factors (not angles).
    pub skew: Vec2,
    pub pivot: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            skew: Vec2::ZERO,
            pivot: Point::ZERO,
        }
    }
}

impl Transform {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            ..Self::default()
        }
    }

    /// `translate(position) · rotate · skew · scale · translate(−pivot)`
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::skew(self.skew.x, self.skew.y)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-self.pivot.to_vec2())
    }
}

// ─── Scene Node ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,

    /// Untransformed content size. `None` for pure containers (groups, root),
    /// which have no bounds of their own.
    pub size: Option<Size>,

    pub transform: Transform,

    pub interactive: bool,
}

impl SceneNode {
    pub fn new(id: NodeId, size: Size) -> Self {
        Self {
            id,
            size: Some(size),
            transform: Transform::default(),
            interactive: true,
        }
    }

    /// A container without content. Never selectable itself.
    pub fn group(id: NodeId) -> Self {
        Self {
            id,
            size: None,
            transform: Transform::default(),
            interactive: false,
        }
    }

    /// An unrotated node whose content box is exactly `(x, y, w, h)` in its
    /// parent's space.
    pub fn rect(id: NodeId, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(id, Size::new(w, h)).with_transform(Transform::at(x + w / 2.0, y + h / 2.0))
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Content box in local space, centred on the pivot.
    pub fn local_box(&self) -> Option<Rect> {
        let size = self.size?;
        let pivot = self.transform.pivot;
        Some(Rect::new(
            pivot.x - size.width / 2.0,
            pivot.y - size.height / 2.0,
            size.width,
            size.height,
        ))
    }
}

// ─── Scene Graph ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// Parent → child containment edges.
    pub graph: StableDiGraph<SceneNode, ()>,

    pub root: NodeIndex,

    /// NodeId → NodeIndex for fast lookup.
    pub id_index: HashMap<NodeId, NodeIndex>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = NodeId::intern("root");
        let root = graph.add_node(SceneNode::group(root_id));

        let mut id_index = HashMap::new();
        id_index.insert(root_id, root);

        Self {
            graph,
            root,
            id_index,
        }
    }

    /// Add a node as the topmost child of `parent`. Returns the new node's index.
    ///
    /// The id must not already be in the graph; use [`SceneGraph::add_child`] when
    /// that is not known up front.
    pub fn add_node(&mut self, parent: NodeIndex, node: SceneNode) -> NodeIndex {
        let id = node.id;
        debug_assert!(!self.id_index.contains_key(&id), "duplicate node id {id}");
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    /// Add a node under the parent named `parent_id`.
    ///
    /// # Errors
    /// Fails if the parent does not exist or the node's id is already taken.
    pub fn add_child(&mut self, parent_id: NodeId, node: SceneNode) -> Result<NodeIndex, String> {
        let parent = self
            .index_of(parent_id)
            .ok_or_else(|| format!("unknown parent {parent_id}"))?;
        if self.id_index.contains_key(&node.id) {
            log::warn!("rejecting duplicate node id {}", node.id);
            return Err(format!("duplicate node id {}", node.id));
        }
        Ok(self.add_node(parent, node))
    }

    /// Remove a node and its whole subtree.
    pub fn remove_node(&mut self, idx: NodeIndex) -> Option<SceneNode> {
        for child in self.children(idx) {
            self.remove_node(child);
        }
        let removed = self.graph.remove_node(idx)?;
        self.id_index.remove(&removed.id);
        log::trace!("removed {}", removed.id);
        Some(removed)
    }

    pub fn get_by_id(&self, id: NodeId) -> Option<&SceneNode> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Children in insertion order (bottom to top).
    ///
    /// Sorted by `NodeIndex` because petgraph's adjacency iteration order is
    /// not insertion order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Composed local → global transform of a node.
    pub fn world_transform(&self, idx: NodeIndex) -> Affine {
        let mut affine = self.graph[idx].transform.to_affine();
        let mut cursor = self.parent(idx);
        while let Some(parent) = cursor {
            affine = self.graph[parent].transform.to_affine() * affine;
            cursor = self.parent(parent);
        }
        affine
    }

    /// Every non-root node in paint order, bottom first.
    pub fn candidates(&self) -> Vec<NodeView<'_>> {
        let mut out = Vec::with_capacity(self.graph.node_count().saturating_sub(1));
        for child in self.children(self.root) {
            self.collect_views(child, Affine::IDENTITY, &mut out);
        }
        out
    }

    fn collect_views<'a>(
        &'a self,
        idx: NodeIndex,
        parent_world: Affine,
        out: &mut Vec<NodeView<'a>>,
    ) {
        let node = &self.graph[idx];
        let world = parent_world * node.transform.to_affine();
        out.push(NodeView { node, world });
        for child in self.children(idx) {
            self.collect_views(child, world, out);
        }
    }
}

// ─── Node View ───────────────────────────────────────────────────────────

/// A scene node paired with its resolved world transform.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    pub node: &'a SceneNode,
    pub world: Affine,
}

impl Selectable for NodeView<'_> {
    fn id(&self) -> NodeId {
        self.node.id
    }

    fn is_interactive(&self) -> bool {
        self.node.interactive
    }

    fn global_bounds(&self) -> Option<Rect> {
        let local = self.node.local_box()?;
        Rect::bounding(local.corners().map(|c| self.world * c))
    }

    fn to_global(&self, local: Point) -> Point {
        self.world * local
    }

    fn pivot(&self) -> Point {
        self.node.transform.pivot
    }

    fn rendered_size(&self) -> Size {
        let size = self.node.size.unwrap_or(Size::ZERO);
        let scale = self.node.transform.scale;
        Size::new(size.width * scale.x.abs(), size.height * scale.y.abs())
    }

    fn scale(&self) -> Vec2 {
        self.node.transform.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn scene_graph_basics() {
        let mut sg = SceneGraph::new();
        let card = SceneNode::rect(NodeId::intern("card"), 10.0, 20.0, 100.0, 50.0);
        let idx = sg.add_node(sg.root, card);

        assert_eq!(sg.index_of(NodeId::intern("card")), Some(idx));
        assert_eq!(sg.parent(idx), Some(sg.root));
        assert_eq!(sg.children(sg.root), vec![idx]);

        let views = sg.candidates();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].global_bounds(), Some(Rect::new(10.0, 20.0, 100.0, 50.0)));
    }

    #[test]
    fn add_child_rejects_unknown_parent_and_duplicates() {
        let mut sg = SceneGraph::new();
        let root = NodeId::intern("root");
        let dup = NodeId::intern("dup_child");
        sg.add_child(root, SceneNode::rect(dup, 0.0, 0.0, 1.0, 1.0))
            .unwrap();

        let err = sg
            .add_child(root, SceneNode::rect(dup, 0.0, 0.0, 1.0, 1.0))
            .unwrap_err();
        assert!(err.contains("duplicate"), "{err}");

        let err = sg
            .add_child(NodeId::intern("no_such_parent"), SceneNode::group(NodeId::fresh("g")))
            .unwrap_err();
        assert!(err.contains("unknown parent"), "{err}");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "duplicate node id")]
    fn add_node_refuses_reused_id() {
        let mut sg = SceneGraph::new();
        let twin = NodeId::intern("twin_node");
        sg.add_node(sg.root, SceneNode::rect(twin, 0.0, 0.0, 1.0, 1.0));
        sg.add_node(sg.root, SceneNode::rect(twin, 5.0, 5.0, 1.0, 1.0));
    }

    #[test]
    fn remove_node_drops_subtree() {
        let mut sg = SceneGraph::new();
        let group = sg.add_node(sg.root, SceneNode::group(NodeId::intern("frame_rm")));
        sg.add_node(group, SceneNode::rect(NodeId::intern("inner_rm"), 0.0, 0.0, 5.0, 5.0));

        sg.remove_node(group);
        assert!(sg.get_by_id(NodeId::intern("frame_rm")).is_none());
        assert!(sg.get_by_id(NodeId::intern("inner_rm")).is_none());
        assert!(sg.candidates().is_empty());
    }

    #[test]
    fn rotated_node_bounds_swap_extents() {
        let mut sg = SceneGraph::new();
        let node = SceneNode::new(NodeId::intern("bar"), Size::new(40.0, 10.0)).with_transform(
            Transform {
                rotation: FRAC_PI_2,
                ..Transform::at(100.0, 100.0)
            },
        );
        sg.add_node(sg.root, node);

        let b = sg.candidates()[0].global_bounds().unwrap();
        assert!(approx(b.x, 95.0) && approx(b.y, 80.0), "{b:?}");
        assert!(approx(b.width, 10.0) && approx(b.height, 40.0), "{b:?}");
    }

    #[test]
    fn world_transform_composes_parents() {
        let mut sg = SceneGraph::new();
        let group = SceneNode::group(NodeId::intern("zoomed")).with_transform(Transform {
            scale: Vec2::new(2.0, 2.0),
            ..Transform::at(50.0, 0.0)
        });
        let g = sg.add_node(sg.root, group);
        let child = sg.add_node(
            g,
            SceneNode::rect(NodeId::intern("zoomed_child"), 0.0, 0.0, 10.0, 10.0),
        );

        let p = sg.world_transform(child) * Point::new(5.0, 5.0);
        assert!(approx(p.x, 70.0) && approx(p.y, 20.0), "{p:?}");

        // The view carries the same composed transform.
        let views = sg.candidates();
        let view = views.iter().find(|v| v.id() == NodeId::intern("zoomed_child")).unwrap();
        assert_eq!(view.global_bounds(), Some(Rect::new(50.0, 0.0, 20.0, 20.0)));
        assert_eq!(view.rendered_size(), Size::new(10.0, 10.0));
    }

    #[test]
    fn candidates_follow_paint_order() {
        let mut sg = SceneGraph::new();
        let a = NodeId::intern("order_a");
        let g = NodeId::intern("order_group");
        let b = NodeId::intern("order_b");
        let c = NodeId::intern("order_c");
        sg.add_node(sg.root, SceneNode::rect(a, 0.0, 0.0, 1.0, 1.0));
        let gi = sg.add_node(sg.root, SceneNode::group(g));
        sg.add_node(gi, SceneNode::rect(b, 0.0, 0.0, 1.0, 1.0));
        sg.add_node(sg.root, SceneNode::rect(c, 0.0, 0.0, 1.0, 1.0));

        let order: Vec<NodeId> = sg.candidates().iter().map(Selectable::id).collect();
        assert_eq!(order, vec![a, g, b, c]);
    }

    #[test]
    fn groups_have_no_bounds() {
        let mut sg = SceneGraph::new();
        sg.add_node(sg.root, SceneNode::group(NodeId::intern("empty_group")));
        let views = sg.candidates();
        assert!(!views[0].is_interactive());
        assert_eq!(views[0].global_bounds(), None);
        assert_eq!(views[0].rendered_size(), Size::ZERO);
    }
}
