/*
 * ==========================================================================
 * LUNA - Scripting Language Front End
 * ==========================================================================
 * 
 * License:
 * This file is part of the LUNA scripting language project.
 * 
 * LUNA is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

//! The closed lexeme tables of the LUNA language.
//!
//! Every subtype enum here maps one-to-one onto a fixed spelling. The lexer
//! uses these tables to reclassify identifier runs (booleans, control words,
//! keywords, `null`) and to resolve symbol characters into operators and
//! punctuation.

use crate::lexer::token::{Subtype, TokenKind};

/// Arithmetic operators, ordered by spelling table position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Addition,
    Division,
    Modulus,
    Multiplication,
    Subtraction,
}

impl ArithmeticOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "+",
            Self::Division => "/",
            Self::Modulus => "%",
            Self::Multiplication => "*",
            Self::Subtraction => "-",
        }
    }

    pub fn from_lexeme(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Self::Addition),
            "/" => Some(Self::Division),
            "%" => Some(Self::Modulus),
            "*" => Some(Self::Multiplication),
            "-" => Some(Self::Subtraction),
            _ => None,
        }
    }
}

/// Bitwise operators: `&`, `|` and `^`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Xor,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
        }
    }

    pub fn from_lexeme(text: &str) -> Option<Self> {
        match text {
            "&" => Some(Self::And),
            "|" => Some(Self::Or),
            "^" => Some(Self::Xor),
            _ => None,
        }
    }
}

pub fn boolean_from_lexeme(text: &str) -> Option<bool> {
    match text {
        "false" => Some(false),
        "true" => Some(true),
        _ => None,
    }
}

pub fn boolean_as_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Loop control words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Break,
    Continue,
}

impl Control {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Continue => "continue",
        }
    }

    pub fn from_lexeme(text: &str) -> Option<Self> {
        match text {
            "break" => Some(Self::Break),
            "continue" => Some(Self::Continue),
            _ => None,
        }
    }
}

/// Reserved words that introduce statements or literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Else,
    Funct,
    If,
    Print,
    Struct,
    While,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Else => "else",
            Self::Funct => "funct",
            Self::If => "if",
            Self::Print => "print",
            Self::Struct => "struct",
            Self::While => "while",
        }
    }

    pub fn from_lexeme(text: &str) -> Option<Self> {
        match text {
            "else" => Some(Self::Else),
            "funct" => Some(Self::Funct),
            "if" => Some(Self::If),
            "print" => Some(Self::Print),
            "struct" => Some(Self::Struct),
            "while" => Some(Self::While),
            _ => None,
        }
    }
}

/// Comparison and logical operators used in condition lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Equals,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
    NotEquals,
    Or,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Equals => "==",
            Self::GreaterThan => ">",
            Self::GreaterThanEquals => ">=",
            Self::LessThan => "<",
            Self::LessThanEquals => "<=",
            Self::NotEquals => "~=",
            Self::Or => "||",
        }
    }

    pub fn from_lexeme(text: &str) -> Option<Self> {
        match text {
            "&&" => Some(Self::And),
            "==" => Some(Self::Equals),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanEquals),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanEquals),
            "~=" => Some(Self::NotEquals),
            "||" => Some(Self::Or),
            _ => None,
        }
    }
}

pub const NULL_LEXEME: &str = "null";

/// Numeric literal radix, chosen from the literal's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Decimal,
    Hexadecimal,
    Octal,
}

impl Radix {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::Decimal => "DECIMAL",
            Self::Hexadecimal => "HEXIDECIMAL",
            Self::Octal => "OCTAL",
        }
    }

    pub fn base(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
            Self::Octal => 8,
        }
    }

    /// Whether `ch` (already lowercased) is a digit of this radix.
    pub fn accepts(self, ch: char) -> bool {
        ch.is_digit(self.base())
    }

    pub fn from_lexeme(text: &str) -> Option<Self> {
        match text {
            "BINARY" => Some(Self::Binary),
            "DECIMAL" => Some(Self::Decimal),
            "HEXIDECIMAL" => Some(Self::Hexadecimal),
            "OCTAL" => Some(Self::Octal),
            _ => None,
        }
    }
}

/// Bit shift operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftOperator {
    Left,
    Right,
}

impl ShiftOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "<<",
            Self::Right => ">>",
        }
    }

    pub fn from_lexeme(text: &str) -> Option<Self> {
        match text {
            "<<" => Some(Self::Left),
            ">>" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Single-character punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuator {
    Assignment,
    CurlyBraceClose,
    CurlyBraceOpen,
    Negate,
    ParenthesisClose,
    ParenthesisOpen,
    Reference,
    Separator,
    SquareBracketClose,
    SquareBracketOpen,
    Terminator,
}

impl Punctuator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "=",
            Self::CurlyBraceClose => "}",
            Self::CurlyBraceOpen => "{",
            Self::Negate => "~",
            Self::ParenthesisClose => ")",
            Self::ParenthesisOpen => "(",
            Self::Reference => ".",
            Self::Separator => ",",
            Self::SquareBracketClose => "]",
            Self::SquareBracketOpen => "[",
            Self::Terminator => ";",
        }
    }

    pub fn from_lexeme(text: &str) -> Option<Self> {
        match text {
            "=" => Some(Self::Assignment),
            "}" => Some(Self::CurlyBraceClose),
            "{" => Some(Self::CurlyBraceOpen),
            "~" => Some(Self::Negate),
            ")" => Some(Self::ParenthesisClose),
            "(" => Some(Self::ParenthesisOpen),
            "." => Some(Self::Reference),
            "," => Some(Self::Separator),
            "]" => Some(Self::SquareBracketClose),
            "[" => Some(Self::SquareBracketOpen),
            ";" => Some(Self::Terminator),
            _ => None,
        }
    }
}

/// Reclassifies an identifier run as a reserved word.
///
/// Checks, in order: booleans, control words, keywords and `null`.
/// Returns `None` for ordinary identifiers.
///
/// # LUNA Examples
/// ```text
/// true     -> (BOOLEAN, true)
/// break    -> (CONTROL, break)
/// funct    -> (KEYWORD, funct)
/// null     -> (NULL, null)
/// counter  -> None
/// ```
pub fn classify_word(word: &str) -> Option<(TokenKind, Subtype)> {
    if let Some(value) = boolean_from_lexeme(word) {
        return Some((TokenKind::Boolean, Subtype::Boolean(value)));
    }
    if let Some(control) = Control::from_lexeme(word) {
        return Some((TokenKind::Control, Subtype::Control(control)));
    }
    if let Some(keyword) = Keyword::from_lexeme(word) {
        return Some((TokenKind::Keyword, Subtype::Keyword(keyword)));
    }
    if word == NULL_LEXEME {
        return Some((TokenKind::Null, Subtype::Null));
    }
    None
}

/// Resolves a single symbol character into its token category.
///
/// The tables are consulted in order: arithmetic, bitwise, comparison and
/// punctuation. Characters outside all four tables are not LUNA symbols.
pub fn classify_symbol(text: &str) -> Option<TokenKind> {
    if ArithmeticOperator::from_lexeme(text).is_some() {
        Some(TokenKind::ArithmeticOperator)
    } else if BinaryOperator::from_lexeme(text).is_some() {
        Some(TokenKind::BinaryOperator)
    } else if Operator::from_lexeme(text).is_some() {
        Some(TokenKind::Operator)
    } else if Punctuator::from_lexeme(text).is_some() {
        Some(TokenKind::Symbol)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_are_reclassified_in_order() {
        assert_eq!(
            classify_word("true"),
            Some((TokenKind::Boolean, Subtype::Boolean(true)))
        );
        assert_eq!(
            classify_word("continue"),
            Some((TokenKind::Control, Subtype::Control(Control::Continue)))
        );
        assert_eq!(
            classify_word("struct"),
            Some((TokenKind::Keyword, Subtype::Keyword(Keyword::Struct)))
        );
        assert_eq!(classify_word("null"), Some((TokenKind::Null, Subtype::Null)));
        assert_eq!(classify_word("While"), None);
        assert_eq!(classify_word("counter"), None);
    }

    #[test]
    fn symbol_tables_cover_single_characters() {
        assert_eq!(classify_symbol("%"), Some(TokenKind::ArithmeticOperator));
        assert_eq!(classify_symbol("^"), Some(TokenKind::BinaryOperator));
        assert_eq!(classify_symbol("<"), Some(TokenKind::Operator));
        assert_eq!(classify_symbol("~"), Some(TokenKind::Symbol));
        assert_eq!(classify_symbol("!"), None);
        assert_eq!(classify_symbol("$"), None);
    }

    #[test]
    fn spellings_round_trip() {
        for op in [
            Operator::And,
            Operator::Equals,
            Operator::GreaterThan,
            Operator::GreaterThanEquals,
            Operator::LessThan,
            Operator::LessThanEquals,
            Operator::NotEquals,
            Operator::Or,
        ] {
            assert_eq!(Operator::from_lexeme(op.as_str()), Some(op));
        }
        assert_eq!(Radix::from_lexeme(Radix::Hexadecimal.as_str()), Some(Radix::Hexadecimal));
        assert_eq!(ShiftOperator::from_lexeme(">>"), Some(ShiftOperator::Right));
    }

    #[test]
    fn radix_digit_acceptance() {
        assert!(Radix::Binary.accepts('1'));
        assert!(!Radix::Binary.accepts('2'));
        assert!(Radix::Octal.accepts('7'));
        assert!(!Radix::Octal.accepts('8'));
        assert!(Radix::Hexadecimal.accepts('f'));
        assert!(!Radix::Hexadecimal.accepts('g'));
    }
}
