//! Table-driven lexer cases.

use luna::error::LexErrorKind;
use luna::lexer::keywords::{Keyword, Operator, Punctuator, Radix};
use luna::lexer::{Subtype, Token, TokenKind};
use luna::{Context, Source};
use rstest::rstest;

fn lex(text: &str) -> Vec<Token> {
    let context = Context::with_seed(7);
    let mut lexer = context.lexer(&Source::from_text(text)).unwrap();
    lexer.discover().unwrap();
    (1..=lexer.len()).map(|pos| lexer.token_at(pos).unwrap()).collect()
}

fn lex_err(text: &str) -> LexErrorKind {
    let context = Context::with_seed(7);
    let mut lexer = context.lexer(&Source::from_text(text)).unwrap();
    lexer.discover().unwrap_err().kind().unwrap()
}

#[rstest]
#[case("0x1F", Radix::Hexadecimal, 31.0)]
#[case("0xfF", Radix::Hexadecimal, 255.0)]
#[case("0b1011", Radix::Binary, 11.0)]
#[case("0755", Radix::Octal, 493.0)]
#[case("0", Radix::Octal, 0.0)]
#[case("1234", Radix::Decimal, 1234.0)]
fn scalar_literals(#[case] text: &str, #[case] radix: Radix, #[case] value: f64) {
    let tokens = lex(text);
    assert_eq!(tokens[0].kind, TokenKind::Scalar);
    assert_eq!(tokens[0].subtype, Subtype::Scalar(radix));
    assert_eq!(tokens[0].value, value);
}

#[rstest]
#[case("\"\\n\"", "\n")]
#[case("\"\\t|\\\\\"", "\t|\\")]
#[case("\"\\x41\\x4a\"", "AJ")]
#[case("\"\\101\"", "A")]
#[case("\"say \\\"hi\\\"\"", "say \"hi\"")]
#[case("\"\"", "")]
fn string_escapes(#[case] text: &str, #[case] expected: &str) {
    let tokens = lex(text);
    assert_eq!(tokens[0].kind, TokenKind::LiteralString);
    assert_eq!(tokens[0].text, expected);
}

#[rstest]
#[case("'a'", 97.0)]
#[case("'\\n'", 10.0)]
#[case("'\\x7e'", 126.0)]
#[case("'\\101'", 65.0)]
fn character_literals(#[case] text: &str, #[case] value: f64) {
    let tokens = lex(text);
    assert_eq!(tokens[0].kind, TokenKind::LiteralCharacter);
    assert_eq!(tokens[0].value, value);
}

#[rstest]
#[case("==", TokenKind::Operator, Subtype::Operator(Operator::Equals))]
#[case("<=", TokenKind::Operator, Subtype::Operator(Operator::LessThanEquals))]
#[case("~=", TokenKind::Operator, Subtype::Operator(Operator::NotEquals))]
#[case("||", TokenKind::Operator, Subtype::Operator(Operator::Or))]
#[case("~", TokenKind::Symbol, Subtype::Symbol(Punctuator::Negate))]
#[case("while", TokenKind::Keyword, Subtype::Keyword(Keyword::While))]
#[case("null", TokenKind::Null, Subtype::Null)]
#[case("false", TokenKind::Boolean, Subtype::Boolean(false))]
fn single_token_classification(
    #[case] text: &str,
    #[case] kind: TokenKind,
    #[case] subtype: Subtype,
) {
    let tokens = lex(text);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, kind);
    assert_eq!(tokens[0].subtype, subtype);
}

#[rstest]
#[case("\"abc", LexErrorKind::UnterminatedStringLiteral)]
#[case("'a", LexErrorKind::UnterminatedCharacterLiteral)]
#[case("''", LexErrorKind::ExpectingCharacterLiteral)]
#[case("1.", LexErrorKind::InvalidScalarFloatValue)]
#[case("0b", LexErrorKind::InvalidScalarValue)]
#[case("99999999999999999999999", LexErrorKind::ScalarParseFailed)]
fn lexical_errors(#[case] text: &str, #[case] kind: LexErrorKind) {
    assert_eq!(lex_err(text), kind);
}

#[test]
fn assignment_scenario() {
    let tokens = lex("x = 5;");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Symbol,
            TokenKind::Scalar,
            TokenKind::Symbol
        ]
    );
    assert_eq!(tokens[0].text, "x");
    assert_eq!(tokens[2].subtype, Subtype::Scalar(Radix::Decimal));
    assert_eq!(tokens[2].value, 5.0);
}

#[test]
fn tokens_from_a_file_carry_its_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.luna");
    std::fs::write(&path, "a = 1;\nb = 2;\n").unwrap();

    let context = Context::with_seed(7);
    let source = Source::from_file(&path).unwrap();
    let mut lexer = context.lexer(&source).unwrap();
    lexer.discover().unwrap();

    let b = lexer.token_at(5).unwrap();
    assert_eq!(b.text, "b");
    assert_eq!(b.span.line, 2);
    assert!(b.render(false).ends_with("demo.luna(2))"));
}
