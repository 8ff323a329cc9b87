//! Marquee selection session: the drag lifecycle state machine.
//!
//! A session is created once per selectable surface. It is idle until a
//! pointer-down anchors a drag; each pointer-move rebuilds the drag rectangle
//! from `(anchor, current)` and recomputes the transient selection from
//! scratch; pointer-up (inside or outside the surface) commits the transient
//! selection as the new persistent one.
//!
//! ## Lifecycle events
//!
//! Every entry point returns the events it raised, in order:
//!
//! | Call | Idle | Dragging |
//! |------|------|----------|
//! | `pointer_down` | `[Start]` | `[]` |
//! | `pointer_move` | `[]` | `[Change]` |
//! | `pointer_up` / `pointer_up_outside` | `[]` | `[Change?, Complete]` |
//!
//! The `Change` on release is only raised when the final recompute altered
//! the transient selection, so `Complete` always follows the final `Change`.

use crate::config::SelectionConfig;
use crate::hit::find_intersecting;
use crate::input::InputEvent;
use crate::selection::SelectionSet;
use mq_core::{NodeId, Point, Rect, Selectable};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Observable lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A drag began. Raised exactly once per drag.
    Start,
    /// The transient selection was recomputed.
    Change,
    /// The drag ended and the transient selection was committed. Raised exactly once per drag.
    Complete,
}

pub type SelectionEvents = SmallVec<[SelectionEvent; 2]>;

#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    config: SelectionConfig,
    anchor: Point,
    current: Point,
    /// Visible marquee, `None` when nothing should be drawn.
    drag_rect: Option<Rect>,
    /// Committed selection; the only state callers should rely on between drags.
    persistent: SelectionSet,
    /// Live selection while dragging, rebuilt on every move.
    transient: SelectionSet,
    active: bool,
}

impl SelectionSession {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> SelectionConfig {
        self.config
    }

    /// Flag changes take effect on the next recompute, including mid-drag.
    pub fn set_additive(&mut self, additive: bool) {
        self.config.additive = additive;
    }

    pub fn set_precise(&mut self, precise: bool) {
        self.config.precise = precise;
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The committed selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.persistent
    }

    /// The in-progress selection of the current drag.
    pub fn transient(&self) -> &SelectionSet {
        &self.transient
    }

    /// The marquee to draw, if any.
    pub fn drag_rect(&self) -> Option<Rect> {
        self.drag_rect
    }

    /// Replace the committed selection programmatically (e.g. select-all).
    ///
    /// Ignored while a drag is in progress; returns whether it was applied.
    pub fn select_only(&mut self, ids: impl IntoIterator<Item = NodeId>) -> bool {
        if self.active {
            return false;
        }
        self.persistent = ids.into_iter().collect();
        true
    }

    // ─── Pointer entry points ────────────────────────────────────────────

    /// Anchor a new drag at `origin`.
    pub fn pointer_down(&mut self, origin: Point) -> SelectionEvents {
        if self.active {
            return SmallVec::new();
        }
        self.anchor = origin;
        self.current = origin;
        self.active = true;
        self.drag_rect = None;
        self.transient.clear();
        if !self.config.additive {
            self.persistent.clear();
        }
        log::debug!(
            "marquee start at ({}, {}) additive={}",
            origin.x,
            origin.y,
            self.config.additive
        );
        smallvec![SelectionEvent::Start]
    }

    /// Extend the drag to `current` and recompute the transient selection.
    pub fn pointer_move<N: Selectable>(
        &mut self,
        current: Point,
        candidates: &[N],
    ) -> SelectionEvents {
        if !self.active {
            return SmallVec::new();
        }
        self.current = current;
        self.recompute(candidates);
        smallvec![SelectionEvent::Change]
    }

    /// End the drag over the surface and commit.
    pub fn pointer_up<N: Selectable>(&mut self, candidates: &[N]) -> SelectionEvents {
        self.commit(candidates)
    }

    /// End the drag outside the surface. Commits exactly like `pointer_up`.
    pub fn pointer_up_outside<N: Selectable>(&mut self, candidates: &[N]) -> SelectionEvents {
        self.commit(candidates)
    }

    /// Drop the committed selection and the marquee. Raises no events.
    pub fn clear_selection(&mut self) {
        self.persistent.clear();
        if !self.config.additive {
            self.transient.clear();
        }
        self.drag_rect = None;
        log::debug!("selection cleared");
    }

    /// Dispatch a normalized input event. Shift drives additive mode.
    ///
    /// Release events update the drag's current point before committing.
    pub fn handle<N: Selectable>(
        &mut self,
        event: &InputEvent,
        candidates: &[N],
    ) -> SelectionEvents {
        self.config.additive = event.modifiers().shift;
        let Some(position) = event.position() else {
            return SmallVec::new();
        };

        match event {
            InputEvent::PointerDown { .. } => self.pointer_down(position),
            InputEvent::PointerMove { .. } => self.pointer_move(position, candidates),
            InputEvent::PointerUp { .. } => {
                self.release_at(position);
                self.pointer_up(candidates)
            }
            InputEvent::PointerUpOutside { .. } => {
                self.release_at(position);
                self.pointer_up_outside(candidates)
            }
            InputEvent::ModifiersChanged(_) => SmallVec::new(),
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn release_at(&mut self, position: Point) {
        if self.active {
            self.current = position;
        }
    }

    fn recompute<N: Selectable>(&mut self, candidates: &[N]) {
        let rect = Rect::from_corners(self.anchor, self.current);
        self.drag_rect = Some(rect);

        let additive = self.config.additive;
        let mut working = if additive {
            self.persistent.clone()
        } else {
            SelectionSet::new()
        };
        for id in find_intersecting(rect, candidates, self.config.precise) {
            if additive {
                working.toggle(id);
            } else {
                working.insert(id);
            }
        }
        self.transient = working;
    }

    fn commit<N: Selectable>(&mut self, candidates: &[N]) -> SelectionEvents {
        if !self.active {
            return SmallVec::new();
        }
        let before = self.transient.clone();
        self.recompute(candidates);

        let mut events = SelectionEvents::new();
        if !before.iter().eq(self.transient.iter()) {
            events.push(SelectionEvent::Change);
        }

        self.drag_rect = None;
        self.persistent = std::mem::take(&mut self.transient);
        self.active = false;
        log::debug!("marquee committed {} nodes", self.persistent.len());

        events.push(SelectionEvent::Complete);
        events
    }
}
