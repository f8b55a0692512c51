//! Incremental builder for the immutable syntax tree.

use line_index::LineIndex;
use text_size::{TextRange, TextSize};

use crate::nodes::{Child, Node, NodeId, Token, TokenId, TreeInner};
use crate::{Field, NodeOrToken, SyntaxKind, SyntaxTree, TriviaPiece};

/// Builds a `SyntaxTree` from parser events.
pub struct Builder {
    nodes: Vec<Node>,
    tokens: Vec<Token>,
    children: Vec<Child>,
    text: Box<str>,

    children_pool: Vec<Vec<Child>>,
    opened: Vec<(NodeId, Vec<Child>)>,
    text_len: TextSize,
    /// End of the last significant token, where empty nodes are placed.
    last_end: TextSize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_TREE_SIZE: usize = 1024;
const DEFAULT_CHILDREN_LEN: usize = 10;

impl Builder {
    /// Creates a new builder for `text`.
    pub fn new(text: &str) -> Self {
        Self {
            nodes: Vec::with_capacity(DEFAULT_TREE_SIZE),
            tokens: Vec::with_capacity(DEFAULT_TREE_SIZE),
            children: Vec::with_capacity(DEFAULT_TREE_SIZE),
            text: text.into(),

            children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            text_len: TextSize::new(0),
            last_end: TextSize::new(0),
        }
    }

    /// Retrieves a recycled children buffer or allocates a new one.
    fn new_children_vec(&mut self) -> Vec<Child> {
        self.children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN))
    }

    /// Returns a children buffer to the pool.
    fn recycle_children_vec(&mut self, mut vec: Vec<Child>) {
        vec.clear();
        self.children_pool.push(vec);
    }

    #[track_caller]
    fn current_node(&self) -> NodeId {
        self.opened.last().expect("no opened nodes?").0
    }

    /// Starts a new node of the given kind, bound to `field` in its parent.
    pub fn start_node(&mut self, kind: SyntaxKind, field: Option<Field>) {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        assert!(
            !self.opened.is_empty() || self.nodes.is_empty(),
            "the tree can only have one root"
        );

        let parent = self.opened.last().map(|(id, _)| *id);
        let id = NodeId(self.nodes.len().try_into().unwrap());
        self.nodes.push(Node {
            kind,
            field,
            parent,
            range: TextRange::empty(self.last_end),
            children_start: 0,
            children_len: 0,
        });

        if let Some((_, children)) = self.opened.last_mut() {
            children.push(NodeOrToken::Node(id));
        }

        let children = self.new_children_vec();
        self.opened.push((id, children));
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let (id, children) = self.opened.pop().expect("no opened nodes?");
        debug_assert!(self.fields_are_unique(&children), "duplicate field in {id:?}");

        let range = match (children.first(), children.last()) {
            // The root covers the whole text, including trivia at both ends.
            _ if id == NodeId::ROOT => TextRange::up_to(self.text.len().try_into().unwrap()),
            (Some(&first), Some(&last)) => {
                TextRange::new(self.child_range(first).start(), self.child_range(last).end())
            }
            _ => TextRange::empty(self.last_end),
        };

        let node = &mut self.nodes[id.index()];
        node.range = range;
        node.children_start = self.children.len().try_into().unwrap();
        node.children_len = children.len().try_into().unwrap();

        self.children.extend_from_slice(&children);
        self.recycle_children_vec(children);
    }

    /// Adds a token with its leading trivia.
    pub fn token(
        &mut self,
        leading_trivia: &[TriviaPiece],
        kind: SyntaxKind,
        text_len: TextSize,
        field: Option<Field>,
    ) {
        debug_assert!(kind.is_token() && !kind.is_trivia(), "{kind:?} is not a significant token");

        let parent = self.current_node();
        self.trivia(leading_trivia);

        let id = TokenId(self.tokens.len().try_into().unwrap());
        let range = self.push_text_len(text_len);
        self.tokens.push(Token {
            kind,
            field,
            parent,
            range,
            leading_trivia: leading_trivia.len().try_into().unwrap(),
        });
        self.last_end = range.end();

        if let Some((_, children)) = self.opened.last_mut() {
            children.push(NodeOrToken::Token(id));
        }
    }

    /// Adds trivia that leads into no token, i.e. the tail of the input.
    pub fn trivia(&mut self, pieces: &[TriviaPiece]) {
        let parent = self.current_node();
        for piece in pieces {
            let range = self.push_text_len(piece.len);
            self.tokens.push(Token {
                kind: piece.kind.syntax_kind(),
                field: None,
                parent,
                range,
                leading_trivia: 0,
            });
        }
    }

    fn push_text_len(&mut self, len: TextSize) -> TextRange {
        let range = TextRange::at(self.text_len, len);
        self.text_len = range.end();
        assert!(self.text.is_char_boundary(usize::from(self.text_len)));
        range
    }

    fn child_range(&self, child: Child) -> TextRange {
        match child {
            NodeOrToken::Node(id) => self.nodes[id.index()].range,
            NodeOrToken::Token(id) => self.tokens[id.index()].range,
        }
    }

    fn fields_are_unique(&self, children: &[Child]) -> bool {
        let fields = children.iter().filter_map(|&child| match child {
            NodeOrToken::Node(id) => self.nodes[id.index()].field,
            NodeOrToken::Token(id) => self.tokens[id.index()].field,
        });

        let mut seen = Vec::with_capacity(children.len());
        for field in fields {
            if seen.contains(&field) {
                return false;
            }
            seen.push(field);
        }
        true
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "unfinished nodes");
        assert!(!self.nodes.is_empty(), "tree without a root");
        assert_eq!(usize::from(self.text_len), self.text.len(), "tokens do not cover the text");

        let text = std::mem::take(&mut self.text);
        let line_index = LineIndex::new(&text);
        let tree = TreeInner {
            text,
            tokens: std::mem::take(&mut self.tokens).into_boxed_slice(),
            nodes: std::mem::take(&mut self.nodes).into_boxed_slice(),
            children: std::mem::take(&mut self.children).into_boxed_slice(),
            line_index,
        };
        SyntaxTree { tree }
    }
}
