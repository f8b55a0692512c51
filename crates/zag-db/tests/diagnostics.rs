use salsa::Setter;
use zag_db::{Diagnostic, DiagnosticKind, File, RootDatabase, check_file};

#[derive(Debug, PartialEq, Eq)]
struct ExpectedDiag {
    line: usize,
    message: String,
}

#[derive(Debug, PartialEq, Eq)]
struct ActualDiag {
    line: usize,
    message: String,
}

fn parse_expectations(fixture: &str) -> Vec<ExpectedDiag> {
    let mut expected = Vec::new();

    for (idx, line) in fixture.lines().enumerate() {
        let Some((_, comment)) = line.split_once("//~") else {
            continue;
        };
        let comment = comment.trim();
        let comment = comment.strip_prefix("ERROR").unwrap_or(comment).trim();
        if comment.is_empty() {
            continue;
        }
        expected.push(ExpectedDiag { line: idx + 1, message: comment.to_owned() });
    }

    expected
}

fn collect_actual(db: &RootDatabase, file: File, diagnostics: &[Diagnostic]) -> Vec<ActualDiag> {
    let line_index = file.line_index(db);
    let mut actual = diagnostics
        .iter()
        .map(|diag| {
            let line = line_index.line_col(diag.range().start()).line as usize + 1;
            ActualDiag { line, message: diag.message().to_owned() }
        })
        .collect::<Vec<_>>();
    actual.sort_by_key(|diag| (diag.line, diag.message.clone()));
    actual
}

#[track_caller]
fn check(fixture: &str) {
    let db = RootDatabase::default();
    let file = File::new(&db, "check.zag".into(), fixture.to_owned());

    let diagnostics = check_file(&db, file);
    let mut actual = collect_actual(&db, file, diagnostics);
    let mut expected = parse_expectations(fixture);

    expected.sort_by_key(|diag| (diag.line, diag.message.clone()));

    assert_eq!(
        expected.len(),
        actual.len(),
        "expected {} diagnostic(s), got {}\nexpected: {expected:#?}\nactual: {actual:#?}",
        expected.len(),
        actual.len(),
    );

    for expected_diag in expected {
        let Some(pos) = actual.iter().position(|diag| {
            diag.line == expected_diag.line && diag.message.contains(&expected_diag.message)
        }) else {
            panic!(
                "missing diagnostic on line {} containing `{}`\nactual: {actual:#?}",
                expected_diag.line, expected_diag.message
            );
        };
        actual.remove(pos);
    }

    assert!(actual.is_empty(), "unexpected diagnostics:\n{actual:#?}");
}

#[test]
fn clean_file() {
    check(
        r#"
package main

import "fmt"

type Pairs = map<string, []int>

func main() {
    var xs = 1, 2
    if xs > 0 { fmt.print(xs) } else { return }
}
"#,
    );
}

#[test]
fn missing_expression() {
    check(
        r#"
func main() {
    var x = ; //~ ERROR expected an expression
}
"#,
    );
}

#[test]
fn missing_parameter_list() {
    check(
        r#"
func main { //~ ERROR expected a parameter list
}
"#,
    );
}

#[test]
fn invalid_assignment_target() {
    check(
        r#"
func main() {
    f() = 1 //~ ERROR invalid assignment target
}
"#,
    );
}

#[test]
fn unterminated_string() {
    check(
        r#"
func main() {
    print("hello) //~ ERROR unterminated string literal
} //~ ERROR expected `)`
"#,
    );
}

#[test]
fn unmatched_brace() {
    check(
        r#"
func main() {
}
} //~ ERROR unmatched `}`
"#,
    );
}

#[test]
fn unclosed_block() {
    let db = RootDatabase::default();
    let file = File::new(&db, "unclosed.zag".into(), "func main() {\n    x = 1\n".to_owned());

    let [diagnostic] = check_file(&db, file) else { panic!("expected one diagnostic") };
    assert_eq!(diagnostic.kind(), DiagnosticKind::Structural);
    assert_eq!(file.line_index(&db).line_col(diagnostic.range().start()).line, 0);
}

#[test]
fn reparse_after_edit() {
    let mut db = RootDatabase::default();
    let file = File::new(&db, "edit.zag".into(), "var x = ;".to_owned());
    assert_eq!(check_file(&db, file).len(), 1);

    file.set_text(&mut db).to("var x = 1;".to_owned());
    assert!(check_file(&db, file).is_empty());
    assert_eq!(file.parse(&db).root().text(), "var x = 1;");
}
