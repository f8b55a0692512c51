use zag_syntax::SyntaxKind::{self, *};
use zag_syntax::{Field, SyntaxSet};

use super::{delimited, field_name, leaf};
use crate::parser::{CompletedMarker, Parser};

const UNARY_OPS: SyntaxSet = SyntaxSet::new([BANG, MINUS, PLUS, AMP, STAR, LT_MINUS]);

const LITERALS: SyntaxSet = SyntaxSet::new([NUMBER, STRING, CHAR, BOOLEAN, NIL]);

pub(crate) const EXPR_FIRST: SyntaxSet =
    LITERALS.union(&UNARY_OPS).union(&SyntaxSet::new([IDENT, TYPE_IDENT, LEFT_PAREN]));

#[derive(Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

/// Binding power of infix operators, loosest first.
fn infix_op(kind: SyntaxKind) -> Option<(u8, Assoc)> {
    let op = match kind {
        EQ | PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | PERCENT_EQ => (1, Assoc::Right),
        AMP_AMP | PIPE_PIPE | BANG => (2, Assoc::Left),
        EQ_EQ | BANG_EQ | LT_EQ | GT_EQ | LT | GT => (3, Assoc::Left),
        PLUS | MINUS => (4, Assoc::Left),
        STAR | SLASH | PERCENT => (5, Assoc::Left),
        _ => return None,
    };
    Some(op)
}

/// Parses a full expression, assignments included. Always produces a node;
/// on failure it is an `ERROR` node.
pub(crate) fn expr(p: &mut Parser<'_>, recovery: SyntaxSet) -> CompletedMarker {
    expr_bp(p, 1, recovery)
}

fn expr_bp(p: &mut Parser<'_>, min_prec: u8, recovery: SyntaxSet) -> CompletedMarker {
    p.nested(recovery, |p| {
        let mut lhs = unary_expr(p, recovery);

        loop {
            let op = p.peek_kind();
            let Some((prec, assoc)) = infix_op(op) else { break };
            if prec < min_prec {
                break;
            }

            let kind = if op.is_assignment_operator() {
                if !matches!(lhs.kind(), IDENTIFIER | INDEX_EXPRESSION | FIELD_EXPRESSION) {
                    p.error("invalid assignment target");
                    if lhs.kind() != ERROR {
                        lhs = lhs.precede(p).complete(p, ERROR);
                    }
                }
                ASSIGNMENT_EXPRESSION
            } else {
                BINARY_EXPRESSION
            };

            let m = lhs.with_field(p, Field::Left).precede(p);
            p.bump_field(Field::Operator);

            let next_prec = match assoc {
                Assoc::Left => prec + 1,
                Assoc::Right => prec,
            };
            expr_bp(p, next_prec, recovery).with_field(p, Field::Right);
            lhs = m.complete(p, kind);
        }

        lhs
    })
}

fn unary_expr(p: &mut Parser<'_>, recovery: SyntaxSet) -> CompletedMarker {
    if !p.at_set(UNARY_OPS) {
        return postfix_expr(p, recovery);
    }

    let m = p.start();
    p.bump_field(Field::Operator);
    p.nested(recovery, |p| unary_expr(p, recovery)).with_field(p, Field::Operand);
    m.complete(p, UNARY_EXPRESSION)
}

/// Calls, indexing and field access, chained left to right.
fn postfix_expr(p: &mut Parser<'_>, recovery: SyntaxSet) -> CompletedMarker {
    let mut lhs = primary_expr(p, recovery);
    if lhs.kind() == ERROR {
        return lhs;
    }

    loop {
        lhs = match p.peek_kind() {
            LEFT_PAREN => {
                let m = lhs.with_field(p, Field::Function).precede(p);
                argument_list(p);
                m.complete(p, CALL_EXPRESSION)
            }
            LEFT_BRACKET => {
                let m = lhs.with_field(p, Field::Value).precede(p);
                p.advance();
                expr(p, SyntaxSet::new([RIGHT_BRACKET])).with_field(p, Field::Index);
                p.expect_closing(RIGHT_BRACKET);
                m.complete(p, INDEX_EXPRESSION)
            }
            DOT => {
                let m = lhs.with_field(p, Field::Value).precede(p);
                p.advance();
                field_name(p, Field::Field, recovery);
                m.complete(p, FIELD_EXPRESSION)
            }
            _ => break,
        };
    }

    lhs
}

fn argument_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LEFT_PAREN, RIGHT_PAREN, EXPR_FIRST, |p, recovery| {
        expr(p, recovery);
    });
    m.complete(p, ARGUMENT_LIST).with_field(p, Field::Arguments);
}

fn primary_expr(p: &mut Parser<'_>, recovery: SyntaxSet) -> CompletedMarker {
    match p.peek_kind() {
        kind if LITERALS.contains(kind) => leaf(p, LITERAL),
        IDENT | TYPE_IDENT => leaf(p, IDENTIFIER),
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            expr(p, SyntaxSet::new([RIGHT_PAREN])).with_field(p, Field::Expression);
            p.expect_closing(RIGHT_PAREN);
            m.complete(p, PARENTHESIZED_EXPRESSION)
        }
        _ => p.err_recover("expected an expression", recovery),
    }
}
