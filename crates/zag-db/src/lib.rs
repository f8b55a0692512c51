use camino::Utf8PathBuf;
pub use line_index::{LineCol, LineIndex};
pub use zag_errors::{Diagnostic, DiagnosticKind};
use zag_parse::Parse;

#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {}

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    /// The syntax tree, reparsed only when the text changes.
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn parse(self, db: &dyn salsa::Database) -> Parse {
        zag_parse::parse(self.text(db))
    }

    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

/// Every diagnostic for `file`, ordered by position.
pub fn check_file(db: &dyn salsa::Database, file: File) -> &[Diagnostic] {
    file.parse(db).diagnostics()
}
