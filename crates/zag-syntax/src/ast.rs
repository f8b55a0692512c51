use crate::SyntaxKind::{self, *};
use crate::{Field, NodeOrToken, SyntaxNode, SyntaxToken};

pub trait AstNode<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>
    where
        Self: Sized;

    fn syntax(self) -> SyntaxNode<'a>;
}

macro_rules! ast_node {
    ($($(#[$meta:meta])* $name:ident => $kind:ident,)*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name<'a>(SyntaxNode<'a>);

        impl<'a> AstNode<'a> for $name<'a> {
            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(self) -> SyntaxNode<'a> {
                self.0
            }
        }
    )*};
}

ast_node! {
    SourceFile => SOURCE_FILE,
    PackageDeclaration => PACKAGE_DECLARATION,
    ImportDeclaration => IMPORT_DECLARATION,
    FunctionDeclaration => FUNCTION_DECLARATION,
    TypeParameters => TYPE_PARAMETERS,
    TypeParameter => TYPE_PARAMETER,
    ParameterList => PARAMETER_LIST,
    Parameter => PARAMETER,
    TypeDeclaration => TYPE_DECLARATION,
    /// Covers both `var`/`mut` and `const` declarations.
    VariableDeclaration => VARIABLE_DECLARATION,
    ConstantDeclaration => CONSTANT_DECLARATION,
    Variable => VARIABLE,
    ExpressionStatement => EXPRESSION_STATEMENT,
    ReturnStatement => RETURN_STATEMENT,
    IfStatement => IF_STATEMENT,
    ForStatement => FOR_STATEMENT,
    Block => BLOCK,
    AssignmentExpression => ASSIGNMENT_EXPRESSION,
    BinaryExpression => BINARY_EXPRESSION,
    UnaryExpression => UNARY_EXPRESSION,
    CallExpression => CALL_EXPRESSION,
    ArgumentList => ARGUMENT_LIST,
    IndexExpression => INDEX_EXPRESSION,
    FieldExpression => FIELD_EXPRESSION,
    ParenthesizedExpression => PARENTHESIZED_EXPRESSION,
    Literal => LITERAL,
    Identifier => IDENTIFIER,
    TypeIdentifier => TYPE_IDENTIFIER,
    PointerType => POINTER_TYPE,
    ArrayType => ARRAY_TYPE,
    MapType => MAP_TYPE,
    ChanType => CHAN_TYPE,
    GenericType => GENERIC_TYPE,
    TypeArguments => TYPE_ARGUMENTS,
}

fn field<'a, N: AstNode<'a>>(node: SyntaxNode<'a>, field: Field) -> Option<N> {
    node.field_node(field).and_then(N::cast)
}

fn children<'a, N: AstNode<'a> + 'a>(node: SyntaxNode<'a>) -> impl Iterator<Item = N> + 'a {
    node.children().filter_map(N::cast)
}

fn token<'a>(node: SyntaxNode<'a>, kind: SyntaxKind) -> Option<SyntaxToken<'a>> {
    node.children_with_tokens().filter_map(NodeOrToken::into_token).find(|it| it.kind() == kind)
}

impl<'a> SourceFile<'a> {
    pub fn items(self) -> impl Iterator<Item = Item<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> PackageDeclaration<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        field(self.0, Field::Name)
    }
}

impl<'a> ImportDeclaration<'a> {
    /// The string token, quotes included.
    pub fn path(self) -> Option<SyntaxToken<'a>> {
        self.0.field_token(Field::Path)
    }
}

impl<'a> FunctionDeclaration<'a> {
    pub fn is_extern(self) -> bool {
        token(self.0, EXTERN_KW).is_some()
    }

    pub fn name(self) -> Option<Identifier<'a>> {
        field(self.0, Field::Name)
    }

    pub fn type_params(self) -> Option<TypeParameters<'a>> {
        field(self.0, Field::TypeParams)
    }

    pub fn params(self) -> Option<ParameterList<'a>> {
        field(self.0, Field::Params)
    }

    pub fn return_type(self) -> Option<Type<'a>> {
        field(self.0, Field::ReturnType)
    }

    /// `None` for `;`-terminated declarations.
    pub fn body(self) -> Option<Block<'a>> {
        field(self.0, Field::Body)
    }
}

impl<'a> TypeParameters<'a> {
    pub fn params(self) -> impl Iterator<Item = TypeParameter<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> TypeParameter<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        field(self.0, Field::Name)
    }
}

impl<'a> ParameterList<'a> {
    pub fn params(self) -> impl Iterator<Item = Parameter<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Parameter<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        field(self.0, Field::Type)
    }

    pub fn name(self) -> Option<Identifier<'a>> {
        field(self.0, Field::Name)
    }
}

impl<'a> TypeDeclaration<'a> {
    pub fn name(self) -> Option<TypeIdentifier<'a>> {
        field(self.0, Field::Name)
    }

    pub fn ty(self) -> Option<Type<'a>> {
        field(self.0, Field::Type)
    }
}

impl<'a> VariableDeclaration<'a> {
    /// Returns `true` for `mut` declarations.
    pub fn is_mut(self) -> bool {
        token(self.0, MUT_KW).is_some()
    }

    pub fn variables(self) -> impl Iterator<Item = Variable<'a>> + 'a {
        children(self.0)
    }

    pub fn initializers(self) -> impl Iterator<Item = Expr<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> ConstantDeclaration<'a> {
    pub fn variables(self) -> impl Iterator<Item = Variable<'a>> + 'a {
        children(self.0)
    }

    pub fn initializers(self) -> impl Iterator<Item = Expr<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Variable<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        field(self.0, Field::Name)
    }
}

impl<'a> ExpressionStatement<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        children(self.0).next()
    }
}

impl<'a> ReturnStatement<'a> {
    pub fn value(self) -> Option<Expr<'a>> {
        field(self.0, Field::Value)
    }
}

impl<'a> IfStatement<'a> {
    pub fn condition(self) -> Option<Expr<'a>> {
        field(self.0, Field::Condition)
    }

    pub fn consequence(self) -> Option<Block<'a>> {
        field(self.0, Field::Consequence)
    }

    /// Either a `Block` or a nested `IfStatement`.
    pub fn alternative(self) -> Option<Item<'a>> {
        field(self.0, Field::Alternative)
    }
}

impl<'a> ForStatement<'a> {
    pub fn condition(self) -> Option<Expr<'a>> {
        field(self.0, Field::Condition)
    }

    pub fn body(self) -> Option<Block<'a>> {
        field(self.0, Field::Body)
    }
}

impl<'a> Block<'a> {
    pub fn items(self) -> impl Iterator<Item = Item<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> AssignmentExpression<'a> {
    pub fn left(self) -> Option<Expr<'a>> {
        field(self.0, Field::Left)
    }

    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.field_token(Field::Operator)
    }

    pub fn right(self) -> Option<Expr<'a>> {
        field(self.0, Field::Right)
    }
}

impl<'a> BinaryExpression<'a> {
    pub fn lhs(self) -> Option<Expr<'a>> {
        field(self.0, Field::Left)
    }

    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.field_token(Field::Operator)
    }

    pub fn rhs(self) -> Option<Expr<'a>> {
        field(self.0, Field::Right)
    }
}

impl<'a> UnaryExpression<'a> {
    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.field_token(Field::Operator)
    }

    pub fn operand(self) -> Option<Expr<'a>> {
        field(self.0, Field::Operand)
    }
}

impl<'a> CallExpression<'a> {
    pub fn function(self) -> Option<Expr<'a>> {
        field(self.0, Field::Function)
    }

    pub fn arguments(self) -> Option<ArgumentList<'a>> {
        field(self.0, Field::Arguments)
    }
}

impl<'a> ArgumentList<'a> {
    pub fn args(self) -> impl Iterator<Item = Expr<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> IndexExpression<'a> {
    pub fn value(self) -> Option<Expr<'a>> {
        field(self.0, Field::Value)
    }

    pub fn index(self) -> Option<Expr<'a>> {
        field(self.0, Field::Index)
    }
}

impl<'a> FieldExpression<'a> {
    pub fn value(self) -> Option<Expr<'a>> {
        field(self.0, Field::Value)
    }

    pub fn field(self) -> Option<Identifier<'a>> {
        field(self.0, Field::Field)
    }
}

impl<'a> ParenthesizedExpression<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        field(self.0, Field::Expression)
    }
}

impl<'a> Literal<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.first_token()
    }

    pub fn kind(self) -> Option<LiteralKind> {
        let kind = match self.token()?.kind() {
            NUMBER => LiteralKind::Number,
            STRING => LiteralKind::String,
            CHAR => LiteralKind::Char,
            BOOLEAN => LiteralKind::Boolean,
            NIL => LiteralKind::Nil,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    Char,
    Boolean,
    Nil,
}

impl<'a> Identifier<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.first_token()
    }

    pub fn text(self) -> &'a str {
        self.0.text()
    }
}

impl<'a> TypeIdentifier<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.first_token()
    }

    pub fn text(self) -> &'a str {
        self.0.text()
    }
}

impl<'a> PointerType<'a> {
    pub fn element(self) -> Option<Type<'a>> {
        field(self.0, Field::Element)
    }
}

impl<'a> ArrayType<'a> {
    /// The size token; `None` for slice-like arrays.
    pub fn size(self) -> Option<SyntaxToken<'a>> {
        self.0.field_token(Field::Size)
    }

    pub fn element(self) -> Option<Type<'a>> {
        field(self.0, Field::Element)
    }
}

impl<'a> MapType<'a> {
    pub fn key(self) -> Option<Type<'a>> {
        field(self.0, Field::Key)
    }

    pub fn value(self) -> Option<Type<'a>> {
        field(self.0, Field::Value)
    }
}

impl<'a> ChanType<'a> {
    pub fn element(self) -> Option<Type<'a>> {
        field(self.0, Field::Element)
    }
}

impl<'a> GenericType<'a> {
    pub fn name(self) -> Option<TypeIdentifier<'a>> {
        field(self.0, Field::Name)
    }

    pub fn arguments(self) -> Option<TypeArguments<'a>> {
        field(self.0, Field::Arguments)
    }
}

impl<'a> TypeArguments<'a> {
    pub fn types(self) -> impl Iterator<Item = Type<'a>> + 'a {
        children(self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    Package(PackageDeclaration<'a>),
    Import(ImportDeclaration<'a>),
    Function(FunctionDeclaration<'a>),
    Type(TypeDeclaration<'a>),
    Variable(VariableDeclaration<'a>),
    Constant(ConstantDeclaration<'a>),
    Expression(ExpressionStatement<'a>),
    Return(ReturnStatement<'a>),
    If(IfStatement<'a>),
    For(ForStatement<'a>),
    Block(Block<'a>),
}

impl<'a> AstNode<'a> for Item<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        let item = match syntax.kind() {
            PACKAGE_DECLARATION => Item::Package(PackageDeclaration(syntax)),
            IMPORT_DECLARATION => Item::Import(ImportDeclaration(syntax)),
            FUNCTION_DECLARATION => Item::Function(FunctionDeclaration(syntax)),
            TYPE_DECLARATION => Item::Type(TypeDeclaration(syntax)),
            VARIABLE_DECLARATION => Item::Variable(VariableDeclaration(syntax)),
            CONSTANT_DECLARATION => Item::Constant(ConstantDeclaration(syntax)),
            EXPRESSION_STATEMENT => Item::Expression(ExpressionStatement(syntax)),
            RETURN_STATEMENT => Item::Return(ReturnStatement(syntax)),
            IF_STATEMENT => Item::If(IfStatement(syntax)),
            FOR_STATEMENT => Item::For(ForStatement(syntax)),
            BLOCK => Item::Block(Block(syntax)),
            _ => return None,
        };
        Some(item)
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Item::Package(it) => it.0,
            Item::Import(it) => it.0,
            Item::Function(it) => it.0,
            Item::Type(it) => it.0,
            Item::Variable(it) => it.0,
            Item::Constant(it) => it.0,
            Item::Expression(it) => it.0,
            Item::Return(it) => it.0,
            Item::If(it) => it.0,
            Item::For(it) => it.0,
            Item::Block(it) => it.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Expr<'a> {
    Assignment(AssignmentExpression<'a>),
    Binary(BinaryExpression<'a>),
    Unary(UnaryExpression<'a>),
    Call(CallExpression<'a>),
    Index(IndexExpression<'a>),
    Field(FieldExpression<'a>),
    Paren(ParenthesizedExpression<'a>),
    Literal(Literal<'a>),
    Identifier(Identifier<'a>),
}

impl<'a> AstNode<'a> for Expr<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        let expr = match syntax.kind() {
            ASSIGNMENT_EXPRESSION => Expr::Assignment(AssignmentExpression(syntax)),
            BINARY_EXPRESSION => Expr::Binary(BinaryExpression(syntax)),
            UNARY_EXPRESSION => Expr::Unary(UnaryExpression(syntax)),
            CALL_EXPRESSION => Expr::Call(CallExpression(syntax)),
            INDEX_EXPRESSION => Expr::Index(IndexExpression(syntax)),
            FIELD_EXPRESSION => Expr::Field(FieldExpression(syntax)),
            PARENTHESIZED_EXPRESSION => Expr::Paren(ParenthesizedExpression(syntax)),
            LITERAL => Expr::Literal(Literal(syntax)),
            IDENTIFIER => Expr::Identifier(Identifier(syntax)),
            _ => return None,
        };
        Some(expr)
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Expr::Assignment(it) => it.0,
            Expr::Binary(it) => it.0,
            Expr::Unary(it) => it.0,
            Expr::Call(it) => it.0,
            Expr::Index(it) => it.0,
            Expr::Field(it) => it.0,
            Expr::Paren(it) => it.0,
            Expr::Literal(it) => it.0,
            Expr::Identifier(it) => it.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Type<'a> {
    Named(TypeIdentifier<'a>),
    Pointer(PointerType<'a>),
    Array(ArrayType<'a>),
    Map(MapType<'a>),
    Chan(ChanType<'a>),
    Generic(GenericType<'a>),
}

impl<'a> AstNode<'a> for Type<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        let ty = match syntax.kind() {
            TYPE_IDENTIFIER => Type::Named(TypeIdentifier(syntax)),
            POINTER_TYPE => Type::Pointer(PointerType(syntax)),
            ARRAY_TYPE => Type::Array(ArrayType(syntax)),
            MAP_TYPE => Type::Map(MapType(syntax)),
            CHAN_TYPE => Type::Chan(ChanType(syntax)),
            GENERIC_TYPE => Type::Generic(GenericType(syntax)),
            _ => return None,
        };
        Some(ty)
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Type::Named(it) => it.0,
            Type::Pointer(it) => it.0,
            Type::Array(it) => it.0,
            Type::Map(it) => it.0,
            Type::Chan(it) => it.0,
            Type::Generic(it) => it.0,
        }
    }
}
