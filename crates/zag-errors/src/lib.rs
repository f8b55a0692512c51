use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// Which stage of the pipeline found the problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticKind {
    /// Unterminated literal or comment, unrecognized character.
    Lexical,
    /// Unexpected token or missing construct.
    Syntax,
    /// Unbalanced block nesting at end of input.
    Structural,
}

impl DiagnosticKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
            Self::Structural => "structural",
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    range: TextRange,
    message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, range: TextRange) -> Self {
        Self { kind, range, message: message.into() }
    }

    pub fn lexical(message: impl Into<String>, range: TextRange) -> Self {
        Self::new(DiagnosticKind::Lexical, message, range)
    }

    pub fn syntax(message: impl Into<String>, range: TextRange) -> Self {
        Self::new(DiagnosticKind::Syntax, message, range)
    }

    pub fn structural(message: impl Into<String>, range: TextRange) -> Self {
        Self::new(DiagnosticKind::Structural, message, range)
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).id(self.kind.as_str()).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error at {:?}: {}", self.kind, self.range, self.message)
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;

    #[test]
    fn display() {
        let range = TextRange::at(TextSize::new(4), TextSize::new(1));
        let diagnostic = Diagnostic::syntax("expected `)`", range);
        assert_eq!(diagnostic.kind(), DiagnosticKind::Syntax);
        assert_eq!(diagnostic.to_string(), "syntax error at 4..5: expected `)`");
    }

    #[test]
    fn render_mentions_origin_and_message() {
        let text = "var x = \n";
        let range = TextRange::at(TextSize::new(8), TextSize::new(0));
        let diagnostic = Diagnostic::syntax("expected an expression", range);
        let rendered = diagnostic.render(&Renderer::plain(), "main.zag", text).to_string();
        assert!(rendered.contains("expected an expression"), "{rendered}");
        assert!(rendered.contains("main.zag"), "{rendered}");
    }
}
