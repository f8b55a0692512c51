//! Resilient recursive-descent parser producing a lossless syntax tree.
//!
//! Parsing never fails: malformed input yields `ERROR` nodes in the tree and
//! diagnostics alongside it.

use std::fmt::Write as _;

use tracing::trace_span;
pub use zag_errors::{Diagnostic, DiagnosticKind};
use zag_syntax::{SyntaxNode, SyntaxTree};

mod grammar;
mod parser;

/// The result of parsing one source text.
#[derive(Debug)]
pub struct Parse {
    tree: SyntaxTree,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// The `source_file` node.
    pub fn root(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    /// Lexical, syntax and structural errors, ordered by position.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` when no diagnostics were produced.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Tree dump followed by the diagnostics, one per line.
    pub fn debug_tree(&self) -> String {
        let mut buf = self.tree.debug_dump();
        buf.push_str("Errors:\n");
        for diagnostic in &self.diagnostics {
            _ = writeln!(buf, "  {diagnostic}");
        }
        buf
    }
}

unsafe impl salsa::Update for Parse {
    unsafe fn maybe_update(old_pointer: *mut Self, new_value: Self) -> bool {
        let old_value = unsafe { &mut *old_pointer };
        if old_value.tree.text() == new_value.tree.text() {
            false
        } else {
            *old_value = new_value;
            true
        }
    }
}

pub fn parse(text: &str) -> Parse {
    let _span = trace_span!("parse", len = text.len()).entered();

    let mut parser = parser::Parser::new(text);
    grammar::items::source_file(&mut parser);
    let (tree, diagnostics) = parser.finish();
    Parse { tree, diagnostics }
}
