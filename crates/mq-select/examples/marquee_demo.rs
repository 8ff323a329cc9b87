//! Replays a small marquee gesture over a rotated scene and logs the result.
//!
//! Run with `RUST_LOG=debug cargo run -p mq-select --example marquee_demo`.

use mq_core::{NodeId, SceneGraph, SceneNode, Size, Transform};
use mq_select::{InputEvent, Modifiers, SelectionConfig, SelectionSession};

fn main() {
    env_logger::init();

    let mut scene = SceneGraph::new();
    for (i, angle) in [0.0_f64, 0.3, 0.6, 0.9].iter().enumerate() {
        let id = NodeId::intern(&format!("tile_{i}"));
        let node = SceneNode::new(id, Size::new(60.0, 30.0)).with_transform(Transform {
            rotation: *angle,
            ..Transform::at(80.0 + i as f64 * 90.0, 80.0)
        });
        scene.add_node(scene.root, node);
    }

    let gesture = [
        InputEvent::PointerDown {
            x: 20.0,
            y: 40.0,
            modifiers: Modifiers::NONE,
        },
        InputEvent::PointerMove {
            x: 200.0,
            y: 70.0,
            modifiers: Modifiers::NONE,
        },
        InputEvent::PointerUp {
            x: 200.0,
            y: 70.0,
            modifiers: Modifiers::NONE,
        },
    ];

    for precise in [false, true] {
        let mut session = SelectionSession::new(SelectionConfig {
            additive: false,
            precise,
        });
        for event in &gesture {
            for raised in session.handle(event, &scene.candidates()) {
                log::debug!("{raised:?} marquee={:?}", session.drag_rect());
            }
        }
        let names: Vec<&str> = session.selection().iter().map(|id| id.as_str()).collect();
        log::info!("precise={precise}: selected {names:?}");
    }
}
