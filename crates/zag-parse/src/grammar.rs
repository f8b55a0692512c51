use zag_syntax::SyntaxKind::{self, *};
use zag_syntax::{Field, SyntaxSet};

use crate::parser::{CompletedMarker, Parser};

pub(crate) mod exprs;
pub(crate) mod items;
pub(crate) mod types;

/// Wraps the current token in a leaf node of the given kind.
pub(crate) fn leaf(p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.advance();
    m.complete(p, kind)
}

/// An `identifier` node. Either identifier class is accepted here.
fn name(p: &mut Parser<'_>, recovery: SyntaxSet) -> CompletedMarker {
    match p.peek_kind() {
        IDENT | TYPE_IDENT => leaf(p, IDENTIFIER),
        _ => p.err_recover("expected an identifier", recovery),
    }
}

pub(crate) fn field_name(p: &mut Parser<'_>, field: Field, recovery: SyntaxSet) {
    name(p, recovery).with_field(p, field);
}

/// Parses `bra (element (, element)*)? ket`. Elements that start with a token
/// in `first` on the same line but are missing the comma before them are
/// still parsed.
pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    first: SyntaxSet,
    mut element: impl FnMut(&mut Parser<'_>, SyntaxSet),
) {
    debug_assert_eq!(p.peek_kind(), bra);
    p.advance();

    if !p.at(ket) {
        let recovery = SyntaxSet::new([COMMA, ket]);
        loop {
            element(p, recovery);

            if p.eat(COMMA) {
                continue;
            }
            if p.at_set(first) && !p.at_line_start() {
                p.expect(COMMA);
                continue;
            }
            break;
        }
    }

    p.expect_closing(ket);
}
