//! Public syntax tree API built on immutable, parent-linked nodes.

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

use line_index::LineCol;
use text_size::{TextRange, TextSize};

use crate::nodes::{Child, NodeId, TokenId, TreeInner};
use crate::{Field, SyntaxKind};

/// Owned syntax tree for a single source text.
pub struct SyntaxTree {
    pub(crate) tree: TreeInner,
}

impl SyntaxTree {
    /// Returns the root syntax node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: &self.tree, id: NodeId::ROOT }
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.tree.text
    }

    /// Iterates every token, trivia included, in source order.
    ///
    /// Concatenating their texts yields the source text.
    #[inline]
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = SyntaxToken<'_>> + ExactSizeIterator {
        let tree = &self.tree;
        (0..tree.tokens.len()).map(move |index| SyntaxToken::new(tree, index))
    }

    /// Trivia after the last significant token.
    pub fn trailing_trivia(&self) -> impl DoubleEndedIterator<Item = SyntaxToken<'_>> {
        let tree = &self.tree;
        let start =
            tree.tokens.iter().rposition(|token| !token.kind.is_trivia()).map_or(0, |it| it + 1);
        (start..tree.tokens.len()).map(move |index| SyntaxToken::new(tree, index))
    }

    /// Renders the tree as an indented outline, one element per line.
    pub fn debug_dump(&self) -> String {
        let mut buf = String::new();
        dump_node(&mut buf, self.root(), 0);
        for trivia in self.trailing_trivia() {
            dump_token(&mut buf, trivia, 1);
        }
        buf
    }
}

fn dump_node(buf: &mut String, node: SyntaxNode<'_>, depth: usize) {
    let indent = depth * 2;
    match node.field_name() {
        Some(field) => _ = writeln!(buf, "{:indent$}{field}: {node:?}", ""),
        None => _ = writeln!(buf, "{:indent$}{node:?}", ""),
    }

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(child) => dump_node(buf, child, depth + 1),
            NodeOrToken::Token(token) => {
                for trivia in token.leading_trivia() {
                    dump_token(buf, trivia, depth + 1);
                }
                dump_token(buf, token, depth + 1);
            }
        }
    }
}

fn dump_token(buf: &mut String, token: SyntaxToken<'_>, depth: usize) {
    let indent = depth * 2;
    match token.field_name() {
        Some(field) => _ = writeln!(buf, "{:indent$}{field}: {token:?}", ""),
        None => _ = writeln!(buf, "{:indent$}{token:?}", ""),
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree").field("text_len", &self.text().len()).finish_non_exhaustive()
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug_dump())
    }
}

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a TreeInner,
    id: TokenId,
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    fn new(tree: &'a TreeInner, index: usize) -> Self {
        Self { tree, id: TokenId(index as u32) }
    }

    /// Returns this token's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.tree.token(self.id).kind
    }

    /// Returns `true` if this token is trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    /// Returns the token text range, excluding attached trivia.
    #[inline]
    pub fn text_range(self) -> TextRange {
        self.tree.token(self.id).range
    }

    /// Returns the range including leading trivia.
    #[inline]
    pub fn full_range(self) -> TextRange {
        let start = self.leading_trivia().next().unwrap_or(self);
        TextRange::new(start.text_range().start(), self.text_range().end())
    }

    /// Returns the token text, excluding trivia.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the field this token is bound to in its parent.
    #[inline]
    pub fn field_name(self) -> Option<Field> {
        self.tree.token(self.id).field
    }

    /// Zero-based line and column (in bytes) of the token start.
    #[inline]
    pub fn line_col(self) -> LineCol {
        self.tree.line_index.line_col(self.text_range().start())
    }

    /// Returns the previous token, trivia included, if any.
    #[inline]
    pub fn prev_token(self) -> Option<Self> {
        let index = self.id.index().checked_sub(1)?;
        Some(Self::new(self.tree, index))
    }

    /// Returns the next token, trivia included, if any.
    #[inline]
    pub fn next_token(self) -> Option<Self> {
        let index = self.id.index() + 1;
        (index < self.tree.tokens.len()).then(|| Self::new(self.tree, index))
    }

    /// Iterates over the trivia that leads into this token.
    #[inline]
    pub fn leading_trivia(self) -> TriviaIter<'a> {
        let len = self.tree.token(self.id).leading_trivia as usize;
        let end = self.id.index();
        TriviaIter { tree: self.tree, range: end - len..end }
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, id: self.tree.token(self.id).parent }
    }

    /// Returns an iterator of parent nodes, starting from the immediate parent.
    #[inline]
    pub fn parent_ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        self.parent().ancestors()
    }
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxToken<'_> {}

impl Hash for SyntaxToken<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl fmt::Display for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Iterator over trivia tokens.
#[derive(Clone)]
pub struct TriviaIter<'a> {
    tree: &'a TreeInner,
    range: std::ops::Range<usize>,
}

impl<'a> Iterator for TriviaIter<'a> {
    type Item = SyntaxToken<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|index| SyntaxToken::new(self.tree, index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for TriviaIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|index| SyntaxToken::new(self.tree, index))
    }
}

impl ExactSizeIterator for TriviaIter<'_> {}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a TreeInner,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.tree.node(self.id).kind
    }

    /// Returns the grammar rule name, e.g. `"function_declaration"`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.kind().name()
    }

    /// Returns the text range covered by this node.
    ///
    /// Spans from the first to the last significant token; leading and
    /// trailing trivia are excluded, except for the root which covers the
    /// whole text.
    #[inline]
    pub fn text_range(self) -> TextRange {
        self.tree.node(self.id).range
    }

    /// Returns the text slice covered by this node.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the field this node is bound to in its parent.
    #[inline]
    pub fn field_name(self) -> Option<Field> {
        self.tree.node(self.id).field
    }

    /// Returns the parent node if any.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        Some(Self { tree: self.tree, id: self.tree.node(self.id).parent? })
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    /// Iterates children including tokens, in source order.
    #[inline]
    pub fn children_with_tokens(self) -> ChildrenWithTokens<'a> {
        ChildrenWithTokens {
            tree: self.tree,
            children: self.tree.node(self.id).children(self.tree).iter(),
        }
    }

    /// Iterates child nodes, skipping tokens.
    #[inline]
    pub fn children(self) -> Children<'a> {
        Children { inner: self.children_with_tokens() }
    }

    /// Returns the child bound to `field`, if any.
    pub fn field(self, field: Field) -> Option<SyntaxElement<'a>> {
        self.children_with_tokens().find(|child| child.field_name() == Some(field))
    }

    /// Returns the child node bound to `field`, if the child is a node.
    #[inline]
    pub fn field_node(self, field: Field) -> Option<Self> {
        self.field(field)?.into_node()
    }

    /// Returns the child token bound to `field`, if the child is a token.
    #[inline]
    pub fn field_token(self, field: Field) -> Option<SyntaxToken<'a>> {
        self.field(field)?.into_token()
    }

    /// Looks a field up by its grammar name, e.g. `"name"`.
    #[inline]
    pub fn field_by_name(self, name: &str) -> Option<SyntaxElement<'a>> {
        self.field(Field::from_name(name)?)
    }

    /// Returns the first significant token inside this node.
    pub fn first_token(self) -> Option<SyntaxToken<'a>> {
        self.children_with_tokens().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    /// Returns the last significant token inside this node.
    pub fn last_token(self) -> Option<SyntaxToken<'a>> {
        self.children_with_tokens().rev().find_map(|child| match child {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    /// Returns the token at the given offset, if any.
    ///
    /// Trivia tokens are returned as well.
    pub fn token_at_offset(self, offset: TextSize) -> TokenAtOffset<SyntaxToken<'a>> {
        let range = self.text_range();
        if !range.contains_inclusive(offset) {
            return TokenAtOffset::None;
        }

        let tokens = &self.tree.tokens;
        let in_node = |index: usize| {
            let token = tokens.get(index)?;
            range.contains_range(token.range).then(|| SyntaxToken::new(self.tree, index))
        };

        // First token ending at or after `offset`.
        let index = tokens.partition_point(|token| token.range.end() < offset);
        match tokens.get(index) {
            Some(token) if token.range.end() == offset => match (in_node(index), in_node(index + 1)) {
                (Some(left), Some(right)) => TokenAtOffset::Between(left, right),
                (Some(it), None) | (None, Some(it)) => TokenAtOffset::Single(it),
                (None, None) => TokenAtOffset::None,
            },
            Some(_) => in_node(index).map_or(TokenAtOffset::None, TokenAtOffset::Single),
            None => TokenAtOffset::None,
        }
    }

    /// Returns the smallest element that fully covers `range`.
    pub fn covering_element(self, range: TextRange) -> Option<SyntaxElement<'a>> {
        let token = self.token_at_offset(range.start()).right_biased()?;
        if token.text_range().contains_range(range) {
            return Some(NodeOrToken::Token(token));
        }

        token
            .parent_ancestors()
            .find(|ancestor| ancestor.text_range().contains_range(range))
            .map(NodeOrToken::Node)
    }

    /// Returns a preorder iterator over nodes.
    #[inline]
    pub fn preorder(self) -> Preorder<'a> {
        Preorder::new(self)
    }

    /// Returns a preorder iterator over nodes and tokens.
    #[inline]
    pub fn preorder_with_tokens(self) -> PreorderWithTokens<'a> {
        PreorderWithTokens::new(self)
    }

    /// Iterates all descendants (this node included) in preorder.
    pub fn descendants(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl Hash for SyntaxNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl<'a> SyntaxElement<'a> {
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(it) => it.kind(),
            NodeOrToken::Token(it) => it.kind(),
        }
    }

    #[inline]
    pub fn text_range(self) -> TextRange {
        match self {
            NodeOrToken::Node(it) => it.text_range(),
            NodeOrToken::Token(it) => it.text_range(),
        }
    }

    #[inline]
    pub fn text(self) -> &'a str {
        match self {
            NodeOrToken::Node(it) => it.text(),
            NodeOrToken::Token(it) => it.text(),
        }
    }

    #[inline]
    pub fn field_name(self) -> Option<Field> {
        match self {
            NodeOrToken::Node(it) => it.field_name(),
            NodeOrToken::Token(it) => it.field_name(),
        }
    }
}

/// Iterator over children including tokens.
#[derive(Clone)]
pub struct ChildrenWithTokens<'a> {
    tree: &'a TreeInner,
    children: std::slice::Iter<'a, Child>,
}

impl<'a> ChildrenWithTokens<'a> {
    #[inline]
    fn map_child(&self, child: &Child) -> SyntaxElement<'a> {
        let tree = self.tree;
        match *child {
            NodeOrToken::Node(id) => NodeOrToken::Node(SyntaxNode { tree, id }),
            NodeOrToken::Token(id) => NodeOrToken::Token(SyntaxToken { tree, id }),
        }
    }
}

impl<'a> Iterator for ChildrenWithTokens<'a> {
    type Item = SyntaxElement<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let child = self.children.next()?;
        Some(self.map_child(child))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

impl DoubleEndedIterator for ChildrenWithTokens<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let child = self.children.next_back()?;
        Some(self.map_child(child))
    }
}

impl ExactSizeIterator for ChildrenWithTokens<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.children.len()
    }
}

/// Iterator over child nodes only.
#[derive(Clone)]
pub struct Children<'a> {
    inner: ChildrenWithTokens<'a>,
}

impl<'a> Iterator for Children<'a> {
    type Item = SyntaxNode<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(NodeOrToken::into_node)
    }
}

impl DoubleEndedIterator for Children<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().rev().find_map(NodeOrToken::into_node)
    }
}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder<'a> {
    inner: PreorderWithTokens<'a>,
}

impl<'a> Preorder<'a> {
    #[inline]
    fn new(start: SyntaxNode<'a>) -> Preorder<'a> {
        Preorder { inner: PreorderWithTokens::new(start) }
    }

    /// Skips the current subtree during traversal.
    #[inline]
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|item| match item {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder walk event for nodes.
#[derive(Clone, Copy, Debug)]
pub enum WalkEvent<'a> {
    Enter(SyntaxNode<'a>),
    Leave(SyntaxNode<'a>),
}

/// Preorder traversal over nodes and significant tokens.
#[derive(Clone)]
pub struct PreorderWithTokens<'a> {
    stack: Vec<(SyntaxNode<'a>, ChildrenWithTokens<'a>)>,
    root: Option<SyntaxNode<'a>>,
}

impl<'a> PreorderWithTokens<'a> {
    #[inline]
    fn new(start: SyntaxNode<'a>) -> PreorderWithTokens<'a> {
        PreorderWithTokens { stack: Vec::with_capacity(128), root: Some(start) }
    }

    /// Skips the current subtree during traversal.
    #[inline]
    pub fn skip_subtree(&mut self) {
        assert!(self.stack.pop().is_some(), "must have a subtree to skip");
    }
}

impl<'a> Iterator for PreorderWithTokens<'a> {
    type Item = WalkEventWithTokens<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active_node)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root, root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active_node.next() {
            Some(NodeOrToken::Node(child)) => {
                self.stack.push((child, child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(NodeOrToken::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited_node, _) = self.stack.pop().expect("should have an exited-from node");
                Some(WalkEventWithTokens::LeaveNode(exited_node))
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Copy, Debug)]
pub enum WalkEventWithTokens<'a> {
    EnterNode(SyntaxNode<'a>),
    LeaveNode(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// There might be zero, one or two tokens at a given offset.
#[derive(Clone, Debug)]
pub enum TokenAtOffset<T> {
    /// No tokens at offset.
    None,
    /// Only a single token at offset.
    Single(T),
    /// Offset is exactly between two tokens.
    Between(T, T),
}

impl<T> TokenAtOffset<T> {
    /// Maps tokens to a different type.
    pub fn map<F: Fn(T) -> U, U>(self, f: F) -> TokenAtOffset<U> {
        match self {
            TokenAtOffset::None => TokenAtOffset::None,
            TokenAtOffset::Single(it) => TokenAtOffset::Single(f(it)),
            TokenAtOffset::Between(l, r) => TokenAtOffset::Between(f(l), f(r)),
        }
    }

    /// Convert to option, preferring the right token in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(_, right) => Some(right),
        }
    }

    /// Convert to option, preferring the left token in case of a tie.
    pub fn left_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(left, _) => Some(left),
        }
    }
}
