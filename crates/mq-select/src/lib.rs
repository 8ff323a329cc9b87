//! Rubber-band (marquee) selection over a transformable scene.
//!
//! [`SelectionSession`] owns the drag lifecycle and the selection sets;
//! [`find_intersecting`] is the stateless hit test it runs on every update.

pub mod config;
pub mod hit;
pub mod input;
pub mod selection;
pub mod session;

pub use config::SelectionConfig;
pub use hit::{SMALL_TARGET_THRESHOLD, find_intersecting};
pub use input::{InputEvent, Modifiers};
pub use selection::SelectionSet;
pub use session::{SelectionEvent, SelectionEvents, SelectionSession};
