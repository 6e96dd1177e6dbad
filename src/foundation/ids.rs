use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_NODE: AtomicU64 = AtomicU64::new(1);

/// Unique, immutable identity of a scene-graph participant.
///
/// Ids are compared for lookup and removal only. Generated ids take the form
/// `#node-<n>` and are unique within the process; the leading `#` is reserved
/// for them and scene descriptions reject explicit ids that start with it.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Prefix reserved for [`NodeId::generate`].
    pub const GENERATED_PREFIX: &'static str = "#";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        let n = NEXT_NODE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}node-{n}", Self::GENERATED_PREFIX))
    }

    pub fn is_generated(&self) -> bool {
        self.0.starts_with(Self::GENERATED_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Handle to an animation registered on a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub(crate) u64);

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
