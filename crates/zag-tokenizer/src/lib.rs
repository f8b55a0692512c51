mod cursor;

use std::ops::Range;

use cursor::Cursor;
use text_size::{TextLen, TextRange, TextSize};
use zag_errors::Diagnostic;
pub use zag_syntax::SyntaxKind;
use zag_syntax::SyntaxKind::*;
use zag_syntax::{TriviaPiece, TriviaPieceKind};

/// A significant token. Trivia before it lives in the tokenizer's side list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// Indices of the leading trivia pieces in the trivia list.
    pub leading: Range<usize>,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    trivia: Vec<TriviaPiece>,
    errors: Vec<Diagnostic>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: Cursor::new(text),
            trivia: Vec::with_capacity(16),
            errors: Vec::new(),
            done: false,
        }
    }

    /// Trivia collected so far, indexed by `Token::leading`.
    pub fn trivia_pieces(&self) -> &[TriviaPiece] {
        &self.trivia
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    fn offset(&self) -> TextSize {
        self.text.text_len() - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let len = self.cursor.pos_within_token();
        TextRange::at(self.offset() - len, len)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    /// Lexes the next significant token. At the end of input this keeps
    /// returning `EOF`, whose leading trivia is the tail of the input.
    pub fn next_token(&mut self) -> Token {
        let trivia_start = self.trivia.len();
        self.trivia();
        let kind = self.syntax_kind();
        let range = self.range();
        self.cursor.reset_pos_within_token();

        Token { kind, range, leading: trivia_start..self.trivia.len() }
    }

    fn trivia(&mut self) {
        while !self.cursor.is_eof() {
            let kind = match (self.cursor.peek(), self.cursor.second()) {
                ('/', '/') => {
                    self.cursor.advance_while(|c| c != '\n');
                    TriviaPieceKind::LineComment
                }
                ('/', '*') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    if !self.cursor.advance_past("*/") {
                        let range = self.range();
                        self.errors.push(Diagnostic::lexical("unterminated block comment", range));
                    }
                    TriviaPieceKind::BlockComment
                }
                (c, _) if c.is_whitespace() => {
                    self.cursor.advance_while(char::is_whitespace);
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            self.trivia.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    fn syntax_kind(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() {
            return EOF;
        }

        match self.cursor.advance() {
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            ';' => SEMICOLON,
            '.' => DOT,
            '=' => self.or_eq(EQ_EQ, EQ),
            '+' => self.or_eq(PLUS_EQ, PLUS),
            '-' => self.or_eq(MINUS_EQ, MINUS),
            '*' => self.or_eq(STAR_EQ, STAR),
            '/' => self.or_eq(SLASH_EQ, SLASH),
            '%' => self.or_eq(PERCENT_EQ, PERCENT),
            '!' => self.or_eq(BANG_EQ, BANG),
            '>' => self.or_eq(GT_EQ, GT),
            '<' if self.cursor.eat('-') => LT_MINUS,
            '<' => self.or_eq(LT_EQ, LT),
            '&' if self.cursor.eat('&') => AMP_AMP,
            '&' => AMP,
            '|' if self.cursor.eat('|') => PIPE_PIPE,
            '|' => PIPE,
            '^' => CARET,
            first_char @ '0'..='9' => self.number(first_char),
            quote @ ('"' | '\'') => self.string(quote),
            first_char @ ('A'..='Z' | 'a'..='z' | '_') => self.ident(first_char),
            _ => {
                self.errors.push(Diagnostic::lexical("unrecognized character", self.range()));
                ERROR_TOKEN
            }
        }
    }

    fn or_eq(&mut self, with_eq: SyntaxKind, without: SyntaxKind) -> SyntaxKind {
        if self.cursor.eat('=') { with_eq } else { without }
    }

    fn ident(&mut self, first_char: char) -> SyntaxKind {
        self.cursor.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');

        let text = self.text();
        if let Some(keyword) = SyntaxKind::from_keyword(text) {
            return keyword;
        }

        match text {
            "true" | "false" => BOOLEAN,
            "nil" => NIL,
            _ if first_char.is_ascii_uppercase() => TYPE_IDENT,
            _ => IDENT,
        }
    }

    fn number(&mut self, first_char: char) -> SyntaxKind {
        if first_char == '0' {
            let radix = match self.cursor.peek() {
                'x' | 'X' => 16,
                'o' | 'O' => 8,
                'b' | 'B' => 2,
                _ => 0,
            };
            if radix != 0 && self.cursor.second().is_digit(radix) {
                self.cursor.advance();
                self.cursor.advance_while(|c| c.is_digit(radix));
                return NUMBER;
            }
        }

        self.cursor.advance_while(|c| c.is_ascii_digit());

        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        if matches!(self.cursor.peek(), 'e' | 'E') {
            let digit_at = if matches!(self.cursor.second(), '+' | '-') { 2 } else { 1 };
            if self.cursor.nth(digit_at).is_ascii_digit() {
                for _ in 0..digit_at {
                    self.cursor.advance();
                }
                self.cursor.advance_while(|c| c.is_ascii_digit());
            }
        }

        NUMBER
    }

    /// Lexes a quoted literal after its opening quote. A single-quoted body
    /// of exactly one character or escape is a `CHAR`.
    fn string(&mut self, quote: char) -> SyntaxKind {
        // A lone line break is still one character.
        if quote == '\'' && self.cursor.peek() == '\n' && self.cursor.second() == '\'' {
            self.cursor.advance();
            self.cursor.advance();
            return CHAR;
        }

        let mut units = 0;
        while !self.cursor.is_eof() && self.cursor.peek() != '\n' {
            match self.cursor.advance() {
                c if c == quote => {
                    return if quote == '\'' && units == 1 { CHAR } else { STRING };
                }
                '\\' => {
                    if self.cursor.is_eof() || self.cursor.peek() == '\n' {
                        break;
                    }
                    self.cursor.advance();
                }
                _ => {}
            }
            units += 1;
        }

        let what = if quote == '\'' { "character" } else { "string" };
        self.errors.push(Diagnostic::lexical(format!("unterminated {what} literal"), self.range()));
        ERROR_TOKEN
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields every significant token, `EOF` included, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        let token = self.next_token();
        self.done = token.kind == EOF;
        Some(token)
    }
}

/// The whole input, lexed ahead of parsing.
#[derive(Debug, Clone, Default)]
pub struct Tokens {
    tokens: Vec<Token>,
    trivia: Vec<TriviaPiece>,
    errors: Vec<Diagnostic>,
}

impl Tokens {
    /// Number of significant tokens, the final `EOF` included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Kind of the token at `index`; `EOF` past the end.
    pub fn kind(&self, index: usize) -> SyntaxKind {
        self.tokens.get(index).map_or(EOF, |token| token.kind)
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Trivia that leads into the token at `index`.
    pub fn leading_trivia(&self, index: usize) -> &[TriviaPiece] {
        match self.tokens.get(index) {
            Some(token) => &self.trivia[token.leading.clone()],
            None => &[],
        }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }
}

pub fn tokenize(text: &str) -> Tokens {
    let mut tokenizer = Tokenizer::new(text);
    let tokens = tokenizer.by_ref().collect();
    Tokens { tokens, trivia: tokenizer.trivia, errors: tokenizer.errors }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        tokenize(text).iter().map(|token| token.kind).filter(|&kind| kind != EOF).collect()
    }

    fn single(text: &str) -> SyntaxKind {
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 2, "{text:?} is not a single token: {tokens:?}");
        let token = tokens.get(0).unwrap();
        assert_eq!(token.range, TextRange::up_to(text.text_len()), "{text:?}");
        token.kind
    }

    #[test]
    fn numbers() {
        for text in ["0", "123", "0x1f", "0XAB", "0o755", "0b1010", "1.5", "1e10", "1.0e-5", "2E+3"] {
            assert_eq!(single(text), NUMBER, "{text:?}");
        }
    }

    #[test]
    fn incomplete_numbers_stop_early() {
        assert_eq!(kinds("0x"), [NUMBER, IDENT]);
        assert_eq!(kinds("1."), [NUMBER, DOT]);
        assert_eq!(kinds("1.x"), [NUMBER, DOT, IDENT]);
        assert_eq!(kinds("1e"), [NUMBER, IDENT]);
        assert_eq!(kinds("0b2"), [NUMBER, IDENT]);
        assert_eq!(kinds("1_000"), [NUMBER, IDENT]);
    }

    #[test]
    fn identifiers_and_keywords() {
        assert_eq!(single("main"), IDENT);
        assert_eq!(single("_tmp1"), IDENT);
        assert_eq!(single("Point"), TYPE_IDENT);
        assert_eq!(single("func"), FUNC_KW);
        assert_eq!(single("fallthrough"), FALLTHROUGH_KW);
        assert_eq!(single("mut"), MUT_KW);
        assert_eq!(single("true"), BOOLEAN);
        assert_eq!(single("false"), BOOLEAN);
        assert_eq!(single("nil"), NIL);
        assert_eq!(single("funcs"), IDENT);
        assert_eq!(single("zag"), IDENT);
    }

    #[test]
    fn strings_and_chars() {
        assert_eq!(single(r#""hello""#), STRING);
        assert_eq!(single(r#""a\"b""#), STRING);
        assert_eq!(single(r#""""#), STRING);
        assert_eq!(single("'a'"), CHAR);
        assert_eq!(single(r"'\n'"), CHAR);
        assert_eq!(single(r"'\''"), CHAR);
        assert_eq!(single("'ab'"), STRING);
        assert_eq!(single("''"), STRING);
    }

    #[test]
    fn unterminated_string_stops_at_end_of_line() {
        let text = "\"abc\nx";
        let tokens = tokenize(text);
        let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
        assert_eq!(kinds, [ERROR_TOKEN, IDENT, EOF]);
        assert_eq!(&text[tokens.get(0).unwrap().range], "\"abc");
        assert_eq!(tokens.errors().len(), 1);
        assert_eq!(tokens.errors()[0].message(), "unterminated string literal");
    }

    #[test]
    fn line_break_is_a_char() {
        assert_eq!(single("'\n'"), CHAR);
        assert!(tokenize("'\n'").errors().is_empty());

        let tokens = tokenize("'\nx'");
        assert_eq!(tokens.kind(0), ERROR_TOKEN);
        assert_eq!(tokens.errors()[0].message(), "unterminated character literal");
    }

    #[test]
    fn unterminated_char() {
        let tokens = tokenize("'a");
        assert_eq!(tokens.kind(0), ERROR_TOKEN);
        assert_eq!(tokens.errors()[0].message(), "unterminated character literal");
    }

    #[test]
    fn operators_prefer_longest_match() {
        assert_eq!(
            kinds("== = <= < <- >= > != ! && & || | ^"),
            [EQ_EQ, EQ, LT_EQ, LT, LT_MINUS, GT_EQ, GT, BANG_EQ, BANG, AMP_AMP, AMP, PIPE_PIPE, PIPE, CARET]
        );
        assert_eq!(kinds("+= -= *= /= %="), [PLUS_EQ, MINUS_EQ, STAR_EQ, SLASH_EQ, PERCENT_EQ]);
        assert_eq!(kinds("a<-b"), [IDENT, LT_MINUS, IDENT]);
        assert_eq!(kinds("x=y"), [IDENT, EQ, IDENT]);
        assert_eq!(kinds(">>"), [GT, GT]);
    }

    #[test]
    fn trivia_leads_into_next_token() {
        let text = "  // one\n/* two */ x // tail";
        let mut tokenizer = Tokenizer::new(text);

        let x = tokenizer.next_token();
        assert_eq!(x.kind, IDENT);
        let leading: Vec<_> =
            tokenizer.trivia_pieces()[x.leading.clone()].iter().map(|piece| piece.kind).collect();
        assert_eq!(
            leading,
            [
                TriviaPieceKind::Whitespace,
                TriviaPieceKind::LineComment,
                TriviaPieceKind::Whitespace,
                TriviaPieceKind::BlockComment,
                TriviaPieceKind::Whitespace,
            ]
        );

        let eof = tokenizer.next_token();
        assert_eq!(eof.kind, EOF);
        assert_eq!(eof.range, TextRange::empty(text.text_len()));
        assert_eq!(eof.leading.len(), 2);
    }

    #[test]
    fn block_comments_do_not_nest() {
        assert_eq!(kinds("/* a /* b */ c */"), [IDENT, STAR, SLASH]);
    }

    #[test]
    fn unterminated_block_comment_eats_the_rest() {
        let tokens = tokenize("x /* y");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.leading_trivia(1).len(), 2);
        assert_eq!(tokens.errors()[0].message(), "unterminated block comment");
        assert_eq!(tokens.errors()[0].range(), TextRange::new(2.into(), 6.into()));
    }

    #[test]
    fn unrecognized_characters() {
        let tokens = tokenize("a @ é");
        let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
        assert_eq!(kinds, [IDENT, ERROR_TOKEN, ERROR_TOKEN, EOF]);
        assert_eq!(tokens.errors().len(), 2);
        assert_eq!(tokens.get(2).unwrap().range.len(), TextSize::of('é'));
    }

    #[test]
    fn eof_repeats() {
        let mut tokenizer = Tokenizer::new("");
        assert_eq!(tokenizer.next_token().kind, EOF);
        assert_eq!(tokenizer.next_token().kind, EOF);
    }

    proptest! {
        #[test]
        fn tokens_and_trivia_cover_input(text in "\\PC{0,64}") {
            let tokens = tokenize(&text);
            let mut offset = TextSize::new(0);
            for (index, token) in tokens.iter().enumerate() {
                for piece in tokens.leading_trivia(index) {
                    offset += piece.len;
                }
                prop_assert_eq!(token.range.start(), offset);
                offset = token.range.end();
            }
            prop_assert_eq!(offset, text.text_len());
            prop_assert_eq!(tokens.kind(tokens.len() - 1), EOF);
        }
    }
}
