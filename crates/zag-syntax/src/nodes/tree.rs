use line_index::LineIndex;

use super::node::{Child, Node, NodeId};
use super::token::{Token, TokenId};

pub(crate) struct TreeInner {
    pub(crate) text: Box<str>,
    /// Significant and trivia tokens in source order.
    pub(crate) tokens: Box<[Token]>,
    /// Always starts with the root.
    pub(crate) nodes: Box<[Node]>,
    pub(crate) children: Box<[Child]>,
    pub(crate) line_index: LineIndex,
}

impl TreeInner {
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }
}
