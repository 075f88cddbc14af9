//! End-to-end parser cases through a shared `Context`.

use luna::error::ParseErrorKind;
use luna::interpreter::{StatementKind, TraceEvaluator};
use luna::{Context, LunaError, Source};
use rstest::rstest;

fn count(text: &str) -> usize {
    let context = Context::with_seed(13);
    let mut parser = context.parser(&Source::from_text(text)).unwrap();
    parser.discover().unwrap()
}

fn failure(text: &str) -> Option<ParseErrorKind> {
    let context = Context::with_seed(13);
    let mut parser = context.parser(&Source::from_text(text)).unwrap();
    parser.discover().unwrap_err().kind()
}

#[rstest]
#[case("", 0)]
#[case("# only a comment", 0)]
#[case("x = 5;", 1)]
#[case("x = 1; y = x << 2 | 1;", 2)]
#[case("if (a == b) { print(a); }", 1)]
#[case("if (a) { } else if (b) { } else { x = 1; }", 1)]
#[case("while (i < 10 && j) { i = i + 1; continue; }", 1)]
#[case("p = struct { x = 1, y = { 2, 3 } }; p.x = 4;", 2)]
#[case("f = funct(a, b) { print(a + b); }; f(1, 2);", 2)]
#[case("s = \"a\" + (\"b\" + \"c\");", 1)]
#[case("m[i] = ~(1 - 2) * 3 % 4;", 1)]
#[case("c = 'x'; d = 1.5; e = null; g = true;", 4)]
fn statement_counts(#[case] text: &str, #[case] expected: usize) {
    assert_eq!(count(text), expected);
}

#[rstest]
#[case("x = 5", ParseErrorKind::ExpectingTerminator)]
#[case("x;", ParseErrorKind::ExpectingAssignment)]
#[case("(x) = 1;", ParseErrorKind::ExpectingStatement)]
#[case("while x", ParseErrorKind::ExpectingOpeningParenthesis)]
#[case("if (a) x = 1;", ParseErrorKind::ExpectingOpeningBrace)]
#[case("f = funct(a b) { };", ParseErrorKind::ExpectingClosingParenthesis)]
#[case("f = funct(1) { };", ParseErrorKind::ExpectingIdentifier)]
#[case("p = struct { x 1 };", ParseErrorKind::ExpectingAssignment)]
#[case("print x;", ParseErrorKind::ExpectingOpeningParenthesis)]
#[case("break", ParseErrorKind::ExpectingTerminator)]
fn syntax_errors(#[case] text: &str, #[case] expected: ParseErrorKind) {
    assert_eq!(failure(text), Some(expected));
}

#[test]
fn parse_errors_become_located_diagnostics() {
    let context = Context::with_seed(13);
    let mut parser = context
        .parser(&Source::from_text("a = 1;\nb = 2\n"))
        .unwrap();
    let err: LunaError = parser.discover().unwrap_err().into();

    assert_eq!(err.code, "E_PARSE");
    assert!(err.message.starts_with("expecting a terminator"));
    assert_eq!(err.span.map(|span| span.line), Some(3));
}

#[test]
fn interpreter_walks_a_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.luna");
    std::fs::write(
        &path,
        "count = 0;\nwhile (count < 3) {\n  count = count + 1;\n}\nprint(count);\n",
    )
    .unwrap();

    let context = Context::with_seed(13);
    let source = Source::from_file(&path).unwrap();
    let mut interpreter = context.interpreter(&source, TraceEvaluator::new()).unwrap();
    assert_eq!(interpreter.run().unwrap(), 3);
    assert_eq!(
        interpreter.evaluator().visited(),
        &[
            StatementKind::Assignment,
            StatementKind::While,
            StatementKind::Print
        ]
    );
}

#[test]
fn missing_script_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.luna");
    let err: LunaError = Source::from_file(&path).unwrap_err().into();
    assert_eq!(err.code, "E_SOURCE");
    assert!(err.message.contains("absent.luna"));
    assert!(err.help.is_some());
}
