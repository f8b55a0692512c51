use text_size::{TextRange, TextSize};

use crate::SyntaxKind::*;
use crate::ast::{AstNode, Item, SourceFile};
use crate::{Builder, Field, NodeOrToken, SyntaxTree, TokenAtOffset, TriviaPiece, TriviaPieceKind};

fn piece(kind: TriviaPieceKind, len: u32) -> TriviaPiece {
    TriviaPiece::new(kind, TextSize::new(len))
}

/// `package  main\n// end\n`, built by hand.
fn package_tree() -> SyntaxTree {
    let mut builder = Builder::new("package  main\n// end\n");
    builder.start_node(SOURCE_FILE, None);
    builder.start_node(PACKAGE_DECLARATION, None);
    builder.token(&[], PACKAGE_KW, TextSize::new(7), None);
    builder.start_node(IDENTIFIER, Some(Field::Name));
    builder.token(&[piece(TriviaPieceKind::Whitespace, 2)], IDENT, TextSize::new(4), None);
    builder.finish_node();
    builder.finish_node();
    builder.trivia(&[
        piece(TriviaPieceKind::Whitespace, 1),
        piece(TriviaPieceKind::LineComment, 6),
        piece(TriviaPieceKind::Whitespace, 1),
    ]);
    builder.finish_node();
    builder.finish()
}

#[test]
fn ranges_and_fields() {
    let tree = package_tree();
    let root = tree.root();
    assert_eq!(root.kind(), SOURCE_FILE);
    assert_eq!(root.text_range(), TextRange::up_to(TextSize::new(21)));

    let package = root.children().next().unwrap();
    assert_eq!(package.kind(), PACKAGE_DECLARATION);
    assert_eq!(package.text(), "package  main");

    let name = package.field_node(Field::Name).unwrap();
    assert_eq!(name.kind(), IDENTIFIER);
    assert_eq!(name.text(), "main");
    assert_eq!(name.field_name(), Some(Field::Name));
    assert_eq!(package.field_by_name("name").map(|it| it.text()), Some("main"));
    assert!(package.field(Field::Path).is_none());
    assert_eq!(name.parent(), Some(package));
    assert_eq!(name.ancestors().count(), 3);
}

#[test]
fn tokens_are_lossless() {
    let tree = package_tree();
    let text: String = tree.tokens().map(|token| token.text()).collect();
    assert_eq!(text, tree.text());

    let trailing: Vec<_> = tree.trailing_trivia().map(|token| token.kind()).collect();
    assert_eq!(trailing, [WHITESPACE, LINE_COMMENT, WHITESPACE]);
}

#[test]
fn trivia_is_not_a_child() {
    let tree = package_tree();
    let name = tree.root().children().next().unwrap().field_node(Field::Name).unwrap();
    let children: Vec<_> = name.children_with_tokens().map(|it| it.kind()).collect();
    assert_eq!(children, [IDENT]);

    let ident = name.first_token().unwrap();
    let trivia: Vec<_> = ident.leading_trivia().map(|it| it.text()).collect();
    assert_eq!(trivia, ["  "]);
    assert_eq!(ident.full_range(), TextRange::new(7.into(), 13.into()));
    assert_eq!(ident.prev_token().map(|it| it.kind()), Some(WHITESPACE));
}

#[test]
fn line_col() {
    let tree = package_tree();
    let ident = tree.root().last_token().unwrap();
    assert_eq!(ident.kind(), IDENT);
    let pos = ident.line_col();
    assert_eq!((pos.line, pos.col), (0, 9));

    let comment = tree.tokens().find(|it| it.kind() == LINE_COMMENT).unwrap();
    let pos = comment.line_col();
    assert_eq!((pos.line, pos.col), (1, 0));
}

#[test]
fn token_at_offset() {
    let tree = package_tree();
    let root = tree.root();

    match root.token_at_offset(8.into()) {
        TokenAtOffset::Single(token) => assert_eq!(token.kind(), WHITESPACE),
        other => panic!("unexpected {other:?}"),
    }
    match root.token_at_offset(9.into()) {
        TokenAtOffset::Between(left, right) => {
            assert_eq!(left.kind(), WHITESPACE);
            assert_eq!(right.kind(), IDENT);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(root.token_at_offset(0.into()).right_biased().map(|it| it.kind()), Some(PACKAGE_KW));
    assert_eq!(root.token_at_offset(21.into()).left_biased().map(|it| it.kind()), Some(WHITESPACE));
    assert!(matches!(root.token_at_offset(22.into()), TokenAtOffset::None));
}

#[test]
fn covering_element() {
    let tree = package_tree();
    let root = tree.root();

    let ident = root.covering_element(TextRange::new(9.into(), 13.into())).unwrap();
    assert!(matches!(ident, NodeOrToken::Token(it) if it.kind() == IDENT));

    let package = root.covering_element(TextRange::new(0.into(), 13.into())).unwrap();
    assert_eq!(package.kind(), PACKAGE_DECLARATION);
}

#[test]
fn preorder() {
    let tree = package_tree();
    let kinds: Vec<_> = tree.root().descendants().map(|it| it.kind()).collect();
    assert_eq!(kinds, [SOURCE_FILE, PACKAGE_DECLARATION, IDENTIFIER]);

    let tokens = tree.root().preorder_with_tokens().count();
    // Three nodes entered and left, two significant tokens.
    assert_eq!(tokens, 8);
}

#[test]
fn empty_node_sits_after_previous_token() {
    let mut builder = Builder::new("package ");
    builder.start_node(SOURCE_FILE, None);
    builder.start_node(PACKAGE_DECLARATION, None);
    builder.token(&[], PACKAGE_KW, TextSize::new(7), None);
    builder.start_node(ERROR, Some(Field::Name));
    builder.finish_node();
    builder.finish_node();
    builder.trivia(&[piece(TriviaPieceKind::Whitespace, 1)]);
    builder.finish_node();
    let tree = builder.finish();

    let package = tree.root().children().next().unwrap();
    let error = package.field_node(Field::Name).unwrap();
    assert_eq!(error.kind(), ERROR);
    assert_eq!(error.text_range(), TextRange::empty(7.into()));
    assert_eq!(package.text_range(), TextRange::new(0.into(), 7.into()));
}

#[test]
fn debug_dump() {
    let tree = package_tree();
    assert_eq!(
        tree.debug_dump(),
        r#"SOURCE_FILE@0..21
  PACKAGE_DECLARATION@0..13
    PACKAGE_KW@0..7 "package"
    name: IDENTIFIER@9..13
      WHITESPACE@7..9 "  "
      IDENT@9..13 "main"
  WHITESPACE@13..14 "\n"
  LINE_COMMENT@14..20 "// end"
  WHITESPACE@20..21 "\n"
"#
    );
}

#[test]
fn typed_ast() {
    let tree = package_tree();
    let file = SourceFile::cast(tree.root()).unwrap();
    let Some(Item::Package(package)) = file.items().next() else {
        panic!("expected a package declaration");
    };
    assert_eq!(package.name().map(|it| it.text()), Some("main"));
    assert_eq!(package.syntax().kind(), PACKAGE_DECLARATION);
}
