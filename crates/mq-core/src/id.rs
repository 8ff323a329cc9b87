use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Process-wide interner backing every `NodeId`.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identity of a scene node as seen by the selection engine.
///
/// Two views of the same node always produce the same `NodeId`, which is what
/// lets selection sets reject duplicates in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern `name`, returning the existing id if it was seen before.
    pub fn intern(name: &str) -> Self {
        NodeId(INTERNER.get_or_intern(name))
    }

    /// Look up an id without interning. `None` if `name` was never interned.
    pub fn lookup(name: &str) -> Option<Self> {
        INTERNER.get(name).map(NodeId)
    }

    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }

    /// Mint a fresh id such as `shape_7`, unique for the process lifetime.
    pub fn fresh(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        loop {
            let candidate = format!("{prefix}_{}", NEXT.fetch_add(1, Ordering::Relaxed));
            if Self::lookup(&candidate).is_none() {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_id() {
        let a = NodeId::intern("sticky_note");
        let b = NodeId::intern("sticky_note");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "sticky_note");
        assert_eq!(format!("{a:?}"), "#sticky_note");
    }

    #[test]
    fn lookup_does_not_intern() {
        assert!(NodeId::lookup("never_interned_xyz").is_none());
        let id = NodeId::intern("now_interned_xyz");
        assert_eq!(NodeId::lookup("now_interned_xyz"), Some(id));
    }

    #[test]
    fn fresh_ids_never_collide_with_existing() {
        let manual = NodeId::intern("shape_0");
        let a = NodeId::fresh("shape");
        let b = NodeId::fresh("shape");
        assert_ne!(a, b);
        assert_ne!(a, manual);
        assert_ne!(b, manual);
    }
}
