//! Runtime selection flags.
//!
//! Both flags are owned by the host (typically bound to a modifier key or a
//! toolbar toggle) and may change between gestures or mid-drag; the session
//! reads them on every recompute.

use serde::{Deserialize, Serialize};

/// Configuration for a `SelectionSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Merge drag hits into the existing selection, toggling off nodes that
    /// were already selected. Default: **false** (replace).
    pub additive: bool,

    /// Test the node's exact transformed quadrilateral instead of its
    /// axis-aligned bounding box. Default: **false**.
    pub precise: bool,
}
