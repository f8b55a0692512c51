use drop_bomb::DropBomb;
use text_size::TextRange;
use tracing::{debug, trace};
use zag_errors::Diagnostic;
use zag_syntax::SyntaxKind::{self, *};
use zag_syntax::{Builder, Field, SyntaxSet, SyntaxTree};
use zag_tokenizer::Tokens;

use crate::grammar::exprs::EXPR_FIRST;

/// Tokens every recovery skip stops at: statement ends and item starts.
pub(crate) const RECOVERY_SET: SyntaxSet = SyntaxSet::new([
    SEMICOLON,
    RIGHT_BRACE,
    EOF,
    PACKAGE_KW,
    IMPORT_KW,
    FUNC_KW,
    EXTERN_KW,
    TYPE_KW,
    VAR_KW,
    MUT_KW,
    CONST_KW,
    RETURN_KW,
    IF_KW,
    FOR_KW,
]);

/// Nesting deeper than this is reported instead of recursed into.
const MAX_DEPTH: u32 = 128;

pub(crate) struct Parser<'a> {
    text: &'a str,
    tokens: Tokens,
    pos: usize,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
    /// Token position of the last recorded syntax error.
    last_error: Option<usize>,
    depth: u32,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: zag_tokenizer::tokenize(text),
            pos: 0,
            events: Vec::new(),
            diagnostics: Vec::new(),
            last_error: None,
            depth: 0,
        }
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens.kind(self.pos + n)
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_set(&self, set: SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn current_range(&self) -> TextRange {
        match self.tokens.get(self.pos) {
            Some(token) => token.range,
            None => TextRange::empty(self.text.len().try_into().unwrap_or_default()),
        }
    }

    /// Whether a line break separates the current token from the previous one.
    pub(crate) fn at_line_start(&self) -> bool {
        let Some(prev) = self.pos.checked_sub(1).and_then(|pos| self.tokens.get(pos)) else {
            return true;
        };
        let range = TextRange::new(prev.range.end(), self.current_range().start());
        self.text[range].contains('\n')
    }

    /// A token that can begin an expression statement on a fresh line.
    fn at_statement_start(&self) -> bool {
        self.at_set(EXPR_FIRST) && self.at_line_start()
    }

    pub(crate) fn advance(&mut self) {
        self.bump(None);
    }

    /// Consumes the current token and binds it to `field` in the open node.
    pub(crate) fn bump_field(&mut self, field: Field) {
        self.bump(Some(field));
    }

    fn bump(&mut self, field: Option<Field>) {
        if self.at(EOF) {
            return;
        }

        trace!(kind = ?self.peek_kind(), range = ?self.current_range(), "advance");
        self.events.push(Event::Token { index: self.pos as u32, field });
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }

        self.advance();
        true
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }

        self.error(format!("expected {}, found {}", kind.describe(), self.peek_kind().describe()));
        false
    }

    /// Expects the closing `ket` of a bracketed construct. Stray tokens in
    /// front of it on the same line are skipped into an error node.
    pub(crate) fn expect_closing(&mut self, ket: SyntaxKind) {
        if self.eat(ket) {
            return;
        }
        if self.at_set(RECOVERY_SET) || self.at_statement_start() {
            self.expect(ket);
            return;
        }

        let message = format!("expected {}, found {}", ket.describe(), self.peek_kind().describe());
        self.err_recover(message, SyntaxSet::new([ket]));
        self.eat(ket);
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    /// Records a syntax error at the current token.
    ///
    /// Only the first error at a given token is kept, and error tokens are
    /// skipped since the tokenizer already reported them.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        if self.last_error == Some(self.pos) || self.at(ERROR_TOKEN) {
            return;
        }

        self.last_error = Some(self.pos);
        self.diagnostics.push(Diagnostic::syntax(message, self.current_range()));
    }

    pub(crate) fn structural_error(&mut self, message: impl Into<String>, range: TextRange) {
        self.diagnostics.push(Diagnostic::structural(message, range));
    }

    /// Wraps the current token in an error node.
    pub(crate) fn error_and_bump(&mut self, message: impl Into<String>) {
        let m = self.start();
        self.error(message);
        self.advance();
        m.complete(self, ERROR);
    }

    /// Reports `message` and skips to the next token in `recovery` or the
    /// global recovery set, or to an expression that starts a new line. The
    /// skipped tokens end up in an error node; a terminating `;` is absorbed
    /// too. If nothing can be skipped the error node is empty.
    pub(crate) fn err_recover(
        &mut self,
        message: impl Into<String>,
        recovery: SyntaxSet,
    ) -> CompletedMarker {
        self.error(message);

        let stop = RECOVERY_SET.union(&recovery);
        let m = self.start();
        if !self.at_set(stop) && !self.at_statement_start() {
            self.skip(stop);
        }
        if !recovery.contains(SEMICOLON) {
            self.eat(SEMICOLON);
        }
        m.complete(self, ERROR)
    }

    /// Consumes the current token, then everything up to `stop` or the start
    /// of the next statement.
    fn skip(&mut self, stop: SyntaxSet) {
        let start = self.pos;
        debug!(at = ?self.current_range(), "recovery started");
        self.advance();
        while !self.at_set(stop) && !self.at_statement_start() {
            self.advance();
        }
        debug!(skipped = self.pos - start, stop = ?self.peek_kind(), "recovery finished");
    }

    /// Runs `f` one nesting level deeper. Past [`MAX_DEPTH`] the construct is
    /// reported and skipped instead; the skip always makes progress unless it
    /// is already at a recovery token.
    pub(crate) fn nested(
        &mut self,
        recovery: SyntaxSet,
        f: impl FnOnce(&mut Self) -> CompletedMarker,
    ) -> CompletedMarker {
        if self.depth >= MAX_DEPTH {
            self.error("nesting is too deep");
            let stop = RECOVERY_SET.union(&recovery);
            let m = self.start();
            if !self.at_set(stop) {
                self.skip(stop);
            }
            return m.complete(self, ERROR);
        }

        self.depth += 1;
        let completed = f(self);
        self.depth -= 1;
        completed
    }

    pub(crate) fn finish(self) -> (SyntaxTree, Vec<Diagnostic>) {
        let Parser { text, tokens, mut events, mut diagnostics, .. } = self;
        let mut builder = Builder::new(text);
        let mut forward_parents = Vec::new();
        let mut depth = 0usize;

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent, field } => {
                    if kind == TOMBSTONE {
                        continue;
                    }

                    forward_parents.push((kind, field));
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent, field } => {
                                if kind != TOMBSTONE {
                                    forward_parents.push((kind, field));
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for (kind, field) in forward_parents.drain(..).rev() {
                        builder.start_node(kind, field);
                        depth += 1;
                    }
                }
                Event::Finish => {
                    if depth == 1 {
                        // Trivia after the last token belongs to the root.
                        builder.trivia(tokens.leading_trivia(tokens.len() - 1));
                    }
                    builder.finish_node();
                    depth -= 1;
                }
                Event::Token { index, field } => {
                    let index = index as usize;
                    if let Some(token) = tokens.get(index) {
                        let leading = tokens.leading_trivia(index);
                        builder.token(leading, token.kind, token.range.len(), field);
                    }
                }
            }
        }

        diagnostics.extend(tokens.into_errors());
        diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());

        (builder.finish(), diagnostics)
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32>, field: Option<Field> },
    Token { index: u32, field: Option<Field> },
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: TOMBSTONE, forward_parent: None, field: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker { position: pos, bomb: DropBomb::new("Marker must be either completed or abandoned") }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position, kind)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
    kind: SyntaxKind,
}

impl CompletedMarker {
    fn new(pos: u32, kind: SyntaxKind) -> Self {
        CompletedMarker { pos, kind }
    }

    pub(crate) fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Binds the completed node to `field` in whatever node ends up its parent.
    pub(crate) fn with_field(self, p: &mut Parser<'_>, field: Field) -> Self {
        match &mut p.events[self.pos as usize] {
            Event::Start { field: slot, .. } => {
                *slot = Some(field);
            }
            _ => unreachable!(),
        }
        self
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
