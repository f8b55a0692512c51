//! Token and node kinds.
//!
//! Tokens come first, then nodes. `EOF` marks the boundary, so a single
//! discriminant comparison tells the two apart.

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    SEMICOLON,
    DOT,

    EQ,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_AMP,
    PIPE_PIPE,
    BANG,
    EQ_EQ,
    BANG_EQ,
    LT_EQ,
    GT_EQ,
    LT,
    GT,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    LT_MINUS,

    IF_KW,
    ELSE_KW,
    FOR_KW,
    RETURN_KW,
    SWITCH_KW,
    CASE_KW,
    DEFAULT_KW,
    FALLTHROUGH_KW,
    PACKAGE_KW,
    IMPORT_KW,
    TYPE_KW,
    STRUCT_KW,
    FUNC_KW,
    EXTERN_KW,
    CHAN_KW,
    NEW_KW,
    VAR_KW,
    CONST_KW,
    DEFER_KW,
    MAKE_KW,
    INTERFACE_KW,
    MAP_KW,
    MUT_KW,

    IDENT,
    TYPE_IDENT,
    NUMBER,
    STRING,
    CHAR,
    BOOLEAN,
    NIL,

    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    ERROR_TOKEN,
    EOF,

    SOURCE_FILE,
    PACKAGE_DECLARATION,
    IMPORT_DECLARATION,
    FUNCTION_DECLARATION,
    TYPE_PARAMETERS,
    TYPE_PARAMETER,
    PARAMETER_LIST,
    PARAMETER,
    TYPE_DECLARATION,
    VARIABLE_DECLARATION,
    CONSTANT_DECLARATION,
    VARIABLE,
    EXPRESSION_STATEMENT,
    RETURN_STATEMENT,
    IF_STATEMENT,
    FOR_STATEMENT,
    BLOCK,
    ASSIGNMENT_EXPRESSION,
    BINARY_EXPRESSION,
    UNARY_EXPRESSION,
    CALL_EXPRESSION,
    ARGUMENT_LIST,
    INDEX_EXPRESSION,
    FIELD_EXPRESSION,
    PARENTHESIZED_EXPRESSION,
    LITERAL,
    IDENTIFIER,
    TYPE_IDENTIFIER,
    POINTER_TYPE,
    ARRAY_TYPE,
    MAP_TYPE,
    CHAN_TYPE,
    GENERIC_TYPE,
    TYPE_ARGUMENTS,
    ERROR,
    TOMBSTONE,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub const fn is_token(self) -> bool {
        self as u16 <= EOF as u16
    }

    #[inline]
    pub const fn is_node(self) -> bool {
        !self.is_token()
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | LINE_COMMENT | BLOCK_COMMENT)
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        self as u16 >= IF_KW as u16 && self as u16 <= MUT_KW as u16
    }

    /// Control keywords: `if else for return switch case default fallthrough`.
    #[inline]
    pub const fn is_control_keyword(self) -> bool {
        self as u16 >= IF_KW as u16 && self as u16 <= FALLTHROUGH_KW as u16
    }

    #[inline]
    pub const fn is_assignment_operator(self) -> bool {
        matches!(self, EQ | PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | PERCENT_EQ)
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "if" => IF_KW,
            "else" => ELSE_KW,
            "for" => FOR_KW,
            "return" => RETURN_KW,
            "switch" => SWITCH_KW,
            "case" => CASE_KW,
            "default" => DEFAULT_KW,
            "fallthrough" => FALLTHROUGH_KW,
            "package" => PACKAGE_KW,
            "import" => IMPORT_KW,
            "type" => TYPE_KW,
            "struct" => STRUCT_KW,
            "func" => FUNC_KW,
            "extern" => EXTERN_KW,
            "chan" => CHAN_KW,
            "new" => NEW_KW,
            "var" => VAR_KW,
            "const" => CONST_KW,
            "defer" => DEFER_KW,
            "make" => MAKE_KW,
            "interface" => INTERFACE_KW,
            "map" => MAP_KW,
            "mut" => MUT_KW,
            _ => return None,
        };
        Some(kind)
    }

    /// Source text of fixed tokens (punctuation, operators, keywords).
    pub const fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            COMMA => ",",
            SEMICOLON => ";",
            DOT => ".",
            EQ => "=",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            STAR_EQ => "*=",
            SLASH_EQ => "/=",
            PERCENT_EQ => "%=",
            AMP_AMP => "&&",
            PIPE_PIPE => "||",
            BANG => "!",
            EQ_EQ => "==",
            BANG_EQ => "!=",
            LT_EQ => "<=",
            GT_EQ => ">=",
            LT => "<",
            GT => ">",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            PERCENT => "%",
            AMP => "&",
            PIPE => "|",
            CARET => "^",
            LT_MINUS => "<-",
            IF_KW => "if",
            ELSE_KW => "else",
            FOR_KW => "for",
            RETURN_KW => "return",
            SWITCH_KW => "switch",
            CASE_KW => "case",
            DEFAULT_KW => "default",
            FALLTHROUGH_KW => "fallthrough",
            PACKAGE_KW => "package",
            IMPORT_KW => "import",
            TYPE_KW => "type",
            STRUCT_KW => "struct",
            FUNC_KW => "func",
            EXTERN_KW => "extern",
            CHAN_KW => "chan",
            NEW_KW => "new",
            VAR_KW => "var",
            CONST_KW => "const",
            DEFER_KW => "defer",
            MAKE_KW => "make",
            INTERFACE_KW => "interface",
            MAP_KW => "map",
            MUT_KW => "mut",
            _ => return None,
        };
        Some(text)
    }

    /// The grammar name of this kind: the rule name for nodes, the token
    /// class for variable tokens and the literal text for fixed tokens.
    pub const fn name(self) -> &'static str {
        if let Some(text) = self.fixed_text() {
            return text;
        }

        match self {
            IDENT => "identifier",
            TYPE_IDENT => "type_identifier",
            NUMBER => "number",
            STRING => "string",
            CHAR => "char",
            BOOLEAN => "boolean",
            NIL => "nil",
            WHITESPACE => "whitespace",
            LINE_COMMENT | BLOCK_COMMENT => "comment",
            ERROR_TOKEN => "error",
            EOF => "end of input",
            SOURCE_FILE => "source_file",
            PACKAGE_DECLARATION => "package_declaration",
            IMPORT_DECLARATION => "import_declaration",
            FUNCTION_DECLARATION => "function_declaration",
            TYPE_PARAMETERS => "type_parameters",
            TYPE_PARAMETER => "type_parameter",
            PARAMETER_LIST => "parameter_list",
            PARAMETER => "parameter",
            TYPE_DECLARATION => "type_declaration",
            VARIABLE_DECLARATION => "variable_declaration",
            CONSTANT_DECLARATION => "constant_declaration",
            VARIABLE => "variable",
            EXPRESSION_STATEMENT => "expression_statement",
            RETURN_STATEMENT => "return_statement",
            IF_STATEMENT => "if_statement",
            FOR_STATEMENT => "for_statement",
            BLOCK => "block",
            ASSIGNMENT_EXPRESSION => "assignment_expression",
            BINARY_EXPRESSION => "binary_expression",
            UNARY_EXPRESSION => "unary_expression",
            CALL_EXPRESSION => "call_expression",
            ARGUMENT_LIST => "argument_list",
            INDEX_EXPRESSION => "index_expression",
            FIELD_EXPRESSION => "field_expression",
            PARENTHESIZED_EXPRESSION => "parenthesized_expression",
            LITERAL => "literal",
            IDENTIFIER => "identifier",
            TYPE_IDENTIFIER => "type_identifier",
            POINTER_TYPE => "pointer_type",
            ARRAY_TYPE => "array_type",
            MAP_TYPE => "map_type",
            CHAN_TYPE => "chan_type",
            GENERIC_TYPE => "generic_type",
            TYPE_ARGUMENTS => "type_arguments",
            ERROR => "ERROR",
            _ => "tombstone",
        }
    }

    /// Human readable form used in diagnostics, e.g. "`)`" or "identifier".
    pub fn describe(self) -> String {
        match self.fixed_text() {
            Some(text) => format!("`{text}`"),
            None => self.name().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_precede_nodes() {
        assert!(EOF.is_token());
        assert!(ERROR_TOKEN.is_token());
        assert!(SOURCE_FILE.is_node());
        assert!(TOMBSTONE.is_node());
    }

    #[test]
    fn keyword_ranges() {
        assert!(IF_KW.is_control_keyword());
        assert!(FALLTHROUGH_KW.is_control_keyword());
        assert!(!PACKAGE_KW.is_control_keyword());
        assert!(MUT_KW.is_keyword());
        assert!(!IDENT.is_keyword());
        assert_eq!(SyntaxKind::from_keyword("mut"), Some(MUT_KW));
        assert_eq!(SyntaxKind::from_keyword("zag"), None);
        assert_eq!(SyntaxKind::from_keyword("true"), None);
    }

    #[test]
    fn names() {
        assert_eq!(FUNCTION_DECLARATION.name(), "function_declaration");
        assert_eq!(LT_MINUS.name(), "<-");
        assert_eq!(RIGHT_PAREN.describe(), "`)`");
        assert_eq!(IDENT.describe(), "identifier");
    }
}
