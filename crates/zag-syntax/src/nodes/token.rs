//! Token storage.

use text_size::TextRange;

use super::node::NodeId;
use crate::{Field, SyntaxKind};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) struct TokenId(pub(crate) u32);

impl TokenId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Raw token stored in the tree arena.
///
/// Trivia is stored as tokens too, right before the significant token it is
/// attached to, so walking the array in order reproduces the source text.
#[derive(Clone, Copy)]
pub(crate) struct Token {
    pub(crate) kind: SyntaxKind,
    /// The role this token plays in its parent. Always `None` for trivia.
    pub(crate) field: Option<Field>,
    pub(crate) parent: NodeId,
    pub(crate) range: TextRange,
    /// Number of trivia tokens directly before this one that lead into it.
    pub(crate) leading_trivia: u32,
}
