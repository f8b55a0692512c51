use zag_syntax::SyntaxKind::{self, *};
use zag_syntax::{Field, SyntaxSet};

use super::exprs::{EXPR_FIRST, expr};
use super::types::{TYPE_FIRST, type_};
use super::{delimited, field_name, leaf};
use crate::parser::{CompletedMarker, Parser};

pub(crate) fn source_file(p: &mut Parser<'_>) {
    let m = p.start();

    while !p.at(EOF) {
        if p.at(RIGHT_BRACE) {
            p.error_and_bump("unmatched `}`");
            continue;
        }
        item(p);
    }

    m.complete(p, SOURCE_FILE);
}

/// Any declaration or statement. The same set is legal at the top level
/// and inside blocks.
fn item(p: &mut Parser<'_>) {
    match p.peek_kind() {
        PACKAGE_KW => package_declaration(p),
        IMPORT_KW => import_declaration(p),
        FUNC_KW | EXTERN_KW => function_declaration(p),
        TYPE_KW => type_declaration(p),
        VAR_KW | MUT_KW => variable_declaration(p, VARIABLE_DECLARATION),
        CONST_KW => variable_declaration(p, CONSTANT_DECLARATION),
        RETURN_KW => return_statement(p),
        IF_KW => _ = if_statement(p),
        FOR_KW => for_statement(p),
        kind if EXPR_FIRST.contains(kind) => expression_statement(p),
        kind => p.error_and_bump(format!("expected an item, found {}", kind.describe())),
    }
}

fn package_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    field_name(p, Field::Name, SyntaxSet::EMPTY);
    p.eat(SEMICOLON);
    m.complete(p, PACKAGE_DECLARATION);
}

fn import_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    if p.at(STRING) {
        p.bump_field(Field::Path);
    } else {
        p.err_recover("expected an import path", SyntaxSet::EMPTY).with_field(p, Field::Path);
    }
    p.eat(SEMICOLON);
    m.complete(p, IMPORT_DECLARATION);
}

fn function_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    p.eat(EXTERN_KW);
    p.expect(FUNC_KW);

    field_name(p, Field::Name, SyntaxSet::new([LT, LEFT_PAREN, LEFT_BRACE]));

    if p.at(LT) {
        type_parameters(p);
    }

    if p.at(LEFT_PAREN) {
        parameter_list(p);
    } else {
        p.err_recover("expected a parameter list", SyntaxSet::new([LEFT_BRACE]))
            .with_field(p, Field::Params);
    }

    if p.at_set(TYPE_FIRST) {
        type_(p, SyntaxSet::new([LEFT_BRACE])).with_field(p, Field::ReturnType);
    }

    if p.at(SEMICOLON) {
        p.bump_field(Field::Body);
    } else {
        block(p).with_field(p, Field::Body);
    }

    m.complete(p, FUNCTION_DECLARATION);
}

fn type_parameters(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LT, GT, SyntaxSet::new([IDENT, TYPE_IDENT]), |p, recovery| {
        let m = p.start();
        field_name(p, Field::Name, recovery);
        m.complete(p, TYPE_PARAMETER);
    });
    m.complete(p, TYPE_PARAMETERS).with_field(p, Field::TypeParams);
}

fn parameter_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LEFT_PAREN, RIGHT_PAREN, TYPE_FIRST, parameter);
    m.complete(p, PARAMETER_LIST).with_field(p, Field::Params);
}

/// `type? name`. A name directly followed by `,` or `)` has no type.
fn parameter(p: &mut Parser<'_>, recovery: SyntaxSet) {
    let m = p.start();

    let untyped =
        matches!(p.peek_kind(), IDENT | TYPE_IDENT) && matches!(p.nth(1), COMMA | RIGHT_PAREN);
    if !untyped && p.at_set(TYPE_FIRST) {
        type_(p, recovery.union(&SyntaxSet::new([IDENT, TYPE_IDENT]))).with_field(p, Field::Type);
    }
    field_name(p, Field::Name, recovery);

    m.complete(p, PARAMETER);
}

fn type_declaration(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    let name = match p.peek_kind() {
        TYPE_IDENT => leaf(p, TYPE_IDENTIFIER),
        IDENT => {
            p.error("type names start with an uppercase letter");
            leaf(p, TYPE_IDENTIFIER)
        }
        _ => p.err_recover("expected a type name", SyntaxSet::new([EQ])),
    };
    name.with_field(p, Field::Name);

    p.expect(EQ);
    type_(p, SyntaxSet::EMPTY).with_field(p, Field::Type);
    p.eat(SEMICOLON);

    m.complete(p, TYPE_DECLARATION);
}

/// `var`, `mut` and `const` declarations share one shape.
fn variable_declaration(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();
    p.advance();

    loop {
        let variable = p.start();
        field_name(p, Field::Name, SyntaxSet::new([COMMA, EQ]));
        variable.complete(p, VARIABLE);

        if !p.eat(COMMA) {
            break;
        }
    }

    if p.eat(EQ) {
        loop {
            expr(p, SyntaxSet::new([COMMA]));
            if !p.eat(COMMA) {
                break;
            }
        }
    }

    p.eat(SEMICOLON);
    m.complete(p, kind);
}

fn expression_statement(p: &mut Parser<'_>) {
    let m = p.start();
    expr(p, SyntaxSet::EMPTY);
    p.eat(SEMICOLON);
    m.complete(p, EXPRESSION_STATEMENT);
}

fn return_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    if p.at_set(EXPR_FIRST) {
        expr(p, SyntaxSet::EMPTY).with_field(p, Field::Value);
    }
    p.eat(SEMICOLON);
    m.complete(p, RETURN_STATEMENT);
}

fn if_statement(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    expr(p, SyntaxSet::new([LEFT_BRACE])).with_field(p, Field::Condition);
    block(p).with_field(p, Field::Consequence);

    if p.eat(ELSE_KW) {
        if p.at(IF_KW) {
            p.nested(SyntaxSet::EMPTY, if_statement).with_field(p, Field::Alternative);
        } else {
            block(p).with_field(p, Field::Alternative);
        }
    }

    m.complete(p, IF_STATEMENT)
}

fn for_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    if !p.at(LEFT_BRACE) {
        expr(p, SyntaxSet::new([LEFT_BRACE])).with_field(p, Field::Condition);
    }
    block(p).with_field(p, Field::Body);

    m.complete(p, FOR_STATEMENT);
}

/// `{ item* }`. Running out of input before the `}` is a structural error.
pub(crate) fn block(p: &mut Parser<'_>) -> CompletedMarker {
    if !p.at(LEFT_BRACE) {
        return p.err_recover("expected a block", SyntaxSet::EMPTY);
    }

    p.nested(SyntaxSet::EMPTY, |p| {
        let m = p.start();
        let open = p.current_range();
        p.advance();

        while !p.at(RIGHT_BRACE) && !p.at(EOF) {
            item(p);
        }

        if p.at(EOF) {
            p.structural_error("unclosed block: expected `}` before end of input", open);
        } else {
            p.advance();
        }

        m.complete(p, BLOCK)
    })
}
