//! Property-based tests for the lexer and parser.

use luna::ast::StatementView;
use luna::lexer::keywords::Radix;
use luna::lexer::{Token, TokenKind};
use luna::{Context, Source};
use proptest::prelude::*;

fn lex_one(text: &str) -> Token {
    let context = Context::with_seed(19);
    let mut lexer = context.lexer(&Source::from_text(text)).unwrap();
    lexer.discover().unwrap();
    assert_eq!(lexer.len(), 1, "expected a single token in {text:?}");
    lexer.token_at(1).unwrap()
}

/// Renders `value` in one of the four scalar spellings.
fn spell_scalar(value: u64, radix: usize) -> String {
    match radix {
        0 => format!("0b{value:b}"),
        1 => format!("0{value:o}"),
        2 => format!("0x{value:x}"),
        _ => format!("{}", value.max(1)),
    }
}

fn escape_strategy() -> impl Strategy<Value = (String, char)> {
    prop::sample::select(vec![
        ("\\a", '\x07'),
        ("\\b", '\x08'),
        ("\\f", '\x0c'),
        ("\\n", '\n'),
        ("\\r", '\r'),
        ("\\t", '\t'),
        ("\\v", '\x0b'),
        ("\\'", '\''),
        ("\\\"", '"'),
        ("\\?", '?'),
        ("\\\\", '\\'),
        ("\\x41", 'A'),
        ("\\x7E", '~'),
        ("\\060", '0'),
    ])
    .prop_map(|(spelled, decoded)| (spelled.to_string(), decoded))
}

/// A string body chunk: a plain printable run or one escape sequence,
/// paired with its decoded text.
fn chunk_strategy() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        "[ !#-\\[\\]-~]{1,8}".prop_map(|plain| (plain.clone(), plain)),
        escape_strategy().prop_map(|(spelled, decoded)| (spelled, decoded.to_string())),
    ]
}

/// Any scalar, string or character literal, as source text.
fn literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (any::<u32>(), 0usize..4).prop_map(|(value, radix)| spell_scalar(u64::from(value), radix)),
        "[ !#-\\[\\]-~]{0,12}".prop_map(|body| format!("\"{body}\"")),
        "[ -&(-\\[\\]-~]".prop_map(|ch| format!("'{ch}'")),
        escape_strategy().prop_map(|(spelled, _)| format!("'{spelled}'")),
    ]
}

/// Rebuilds literal source text from a rendered scalar, string or
/// character token.
fn respell(rendered: &str) -> Option<String> {
    let (head, rest) = rendered.split_once("] ")?;
    match head {
        "[STRING" => {
            let end = rest.rfind("\" (")?;
            Some(rest[..=end].to_string())
        }
        "[CHARACTER" => {
            let start = rest.find("(0x")? + 3;
            Some(format!("'\\x{}'", rest.get(start..start + 2)?))
        }
        _ => {
            let radix = Radix::from_lexeme(head.strip_prefix("[SCALAR, ")?)?;
            let value: u64 = rest.strip_prefix('(')?.strip_suffix(')')?.parse().ok()?;
            Some(match radix {
                Radix::Binary => format!("0b{value:b}"),
                Radix::Decimal => value.to_string(),
                Radix::Hexadecimal => format!("0x{value:x}"),
                Radix::Octal => format!("0{value:o}"),
            })
        }
    }
}

fn statement_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "x = 5;",
        "y = x * (2 + 3) >> 1;",
        "print(\"hi\" + name);",
        "f(a, b.c[0]);",
        "if (a == b) { print(a); }",
        "if (a) { x = 1; } else if (b) { x = 2; } else { break; }",
        "while (i < 10) { i = i + 1; continue; }",
        "p = struct { x = 1, y = { 2, 3 } };",
        "g = funct(a) { print(a); };",
        "c = '\\n';",
    ])
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(statement_strategy(), 0..8).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn scalar_spellings_round_trip(value in any::<u64>(), radix in 0usize..4) {
        let text = spell_scalar(value, radix);
        let token = lex_one(&text);
        prop_assert_eq!(token.kind, TokenKind::Scalar);
        let expected = if radix == 3 { value.max(1) } else { value };
        prop_assert_eq!(token.value, expected as f64);
    }

    #[test]
    fn string_literals_round_trip(chunks in prop::collection::vec(chunk_strategy(), 0..6)) {
        let spelled: String = chunks.iter().map(|(s, _)| s.as_str()).collect();
        let decoded: String = chunks.iter().map(|(_, d)| d.as_str()).collect();

        let token = lex_one(&format!("\"{spelled}\""));
        prop_assert_eq!(token.kind, TokenKind::LiteralString);
        prop_assert_eq!(token.text, decoded);
    }

    #[test]
    fn character_literals_round_trip(ch in "[ -&(-\\[\\]-~]") {
        let token = lex_one(&format!("'{ch}'"));
        prop_assert_eq!(token.kind, TokenKind::LiteralCharacter);
        let expected = ch.chars().next().map(u32::from).unwrap_or_default();
        prop_assert_eq!(token.value, f64::from(expected));
    }

    #[test]
    fn escaped_characters_round_trip((spelled, decoded) in escape_strategy()) {
        let token = lex_one(&format!("'{spelled}'"));
        prop_assert_eq!(token.value, f64::from(u32::from(decoded)));
    }

    #[test]
    fn rendered_literals_lex_back(text in literal_strategy()) {
        let token = lex_one(&text);
        let rendered = token.render(false);
        let spelled = respell(&rendered);
        prop_assert!(spelled.is_some(), "no literal in {}", rendered);

        let again = lex_one(&spelled.unwrap_or_default());
        prop_assert_eq!(again.kind, token.kind);
        prop_assert_eq!(again.subtype, token.subtype);
        prop_assert_eq!(again.value, token.value);
        prop_assert_eq!(again.text, token.text);
    }

    #[test]
    fn discover_is_idempotent(program in program_strategy()) {
        let context = Context::with_seed(19);
        let source = Source::from_text(program.as_str());

        let mut lexer = context.lexer(&source).unwrap();
        let first = lexer.discover().unwrap();
        prop_assert_eq!(lexer.discover().unwrap(), first);

        let mut parser = context.parser(&source).unwrap();
        let statements = parser.discover().unwrap();
        let rendered: Vec<String> = (1..=statements)
            .map(|pos| parser.statement_as_string(parser.statement_at(pos).unwrap(), false).unwrap())
            .collect();

        prop_assert_eq!(parser.discover().unwrap(), statements);
        let again: Vec<String> = (1..=statements)
            .map(|pos| parser.statement_as_string(parser.statement_at(pos).unwrap(), false).unwrap())
            .collect();
        prop_assert_eq!(again, rendered);
    }

    #[test]
    fn parent_and_child_links_agree(program in program_strategy()) {
        let context = Context::with_seed(19);
        let mut parser = context.parser(&Source::from_text(program.as_str())).unwrap();
        let statements = parser.discover().unwrap();

        for pos in 1..=statements {
            let statement = parser.statement_at(pos).unwrap();
            let view = StatementView::new(statement, parser.nodes(), parser.tokens());

            for slot in 0..statement.len() {
                let node = view.node(slot).unwrap();
                match node.parent() {
                    Some(parent) => {
                        let siblings = view.children(parent).unwrap();
                        let links = siblings.iter().filter(|&&child| child == slot).count();
                        prop_assert_eq!(links, 1);
                    }
                    None => prop_assert_eq!(slot, 0),
                }
                for child in node.children() {
                    prop_assert_eq!(view.node(*child).unwrap().parent(), Some(slot));
                }
            }
        }
    }

    #[test]
    fn has_next_token_is_false_only_at_end(program in program_strategy()) {
        let context = Context::with_seed(19);
        let mut lexer = context.lexer(&Source::from_text(program.as_str())).unwrap();

        loop {
            let at_end = lexer.token().unwrap().kind == TokenKind::End;
            prop_assert_eq!(lexer.has_next_token(), !at_end);
            if at_end {
                break;
            }
            lexer.move_next_token(true).unwrap();
        }
    }

    #[test]
    fn registry_tracks_every_stored_entity(program in program_strategy()) {
        let context = Context::with_seed(19);
        let mut parser = context.parser(&Source::from_text(program.as_str())).unwrap();
        parser.discover().unwrap();

        let stored = context.tokens().len().unwrap() + context.nodes().len().unwrap();
        prop_assert_eq!(context.ids().len().unwrap(), stored);

        drop(parser);
        prop_assert!(context.ids().is_empty().unwrap());
    }
}
