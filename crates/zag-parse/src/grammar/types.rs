use zag_syntax::SyntaxKind::*;
use zag_syntax::{Field, SyntaxSet};

use super::{delimited, leaf};
use crate::parser::{CompletedMarker, Parser};

pub(crate) const TYPE_FIRST: SyntaxSet =
    SyntaxSet::new([IDENT, TYPE_IDENT, STAR, LEFT_BRACKET, MAP_KW, CHAN_KW]);

pub(crate) fn type_(p: &mut Parser<'_>, recovery: SyntaxSet) -> CompletedMarker {
    p.nested(recovery, |p| match p.peek_kind() {
        IDENT | TYPE_IDENT => named_type(p),
        STAR => {
            let m = p.start();
            p.advance();
            type_(p, recovery).with_field(p, Field::Element);
            m.complete(p, POINTER_TYPE)
        }
        LEFT_BRACKET => {
            let m = p.start();
            p.advance();
            if p.at(NUMBER) {
                p.bump_field(Field::Size);
            }
            p.expect(RIGHT_BRACKET);
            type_(p, recovery).with_field(p, Field::Element);
            m.complete(p, ARRAY_TYPE)
        }
        MAP_KW => map_type(p),
        CHAN_KW => {
            let m = p.start();
            p.advance();
            type_(p, recovery).with_field(p, Field::Element);
            m.complete(p, CHAN_TYPE)
        }
        _ => p.err_recover("expected a type", recovery),
    })
}

/// `Name` or `Name<T, ...>`; the `<` right after the name decides.
fn named_type(p: &mut Parser<'_>) -> CompletedMarker {
    let name = leaf(p, TYPE_IDENTIFIER);
    if !p.at(LT) {
        return name;
    }

    let m = name.with_field(p, Field::Name).precede(p);
    let arguments = p.start();
    delimited(p, LT, GT, TYPE_FIRST, |p, recovery| {
        type_(p, recovery);
    });
    arguments.complete(p, TYPE_ARGUMENTS).with_field(p, Field::Arguments);
    m.complete(p, GENERIC_TYPE)
}

/// `map<K, V>`, exactly two type arguments.
fn map_type(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if p.expect(LT) {
        type_(p, SyntaxSet::new([COMMA, GT])).with_field(p, Field::Key);
        p.expect(COMMA);
        type_(p, SyntaxSet::new([GT])).with_field(p, Field::Value);
        p.expect_closing(GT);
    }

    m.complete(p, MAP_TYPE)
}
