//! Node storage.
//!
//! Nodes live in one flat arena and refer to each other by index. The
//! children of a node occupy a contiguous run of the shared children array.

use text_size::TextRange;

use super::token::TokenId;
use super::tree::TreeInner;
use crate::{Field, NodeOrToken, SyntaxKind};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root is always the first node started.
    pub(crate) const ROOT: Self = Self(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A child slot: either a nested node or a significant token.
pub(crate) type Child = NodeOrToken<NodeId, TokenId>;

/// Raw node stored in the tree arena.
pub(crate) struct Node {
    pub(crate) kind: SyntaxKind,
    /// The role this node plays in its parent.
    pub(crate) field: Option<Field>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) range: TextRange,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
}

impl Node {
    /// Returns the child slice (nodes and significant tokens).
    #[inline]
    pub(crate) fn children<'a>(&self, tree: &'a TreeInner) -> &'a [Child] {
        let start = self.children_start as usize;
        &tree.children[start..start + self.children_len as usize]
    }
}
