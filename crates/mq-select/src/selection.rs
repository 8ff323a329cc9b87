//! Insertion-ordered, duplicate-free set of selected node ids.

use indexmap::IndexSet;
use mq_core::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: IndexSet<NodeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` at the end. Returns false if it was already present.
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.ids.insert(id)
    }

    /// Remove `id`, keeping the order of the remaining members.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.ids.shift_remove(&id)
    }

    /// Remove `id` if present, otherwise add it. Returns true if it is now a member.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.insert(id)
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn to_vec(&self) -> Vec<NodeId> {
        self.iter().collect()
    }
}

impl FromIterator<NodeId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<NodeId> for SelectionSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}
