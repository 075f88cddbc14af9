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

use std::fmt;

use crate::id::Id;
use crate::lexer::keywords::{
    boolean_as_str, boolean_from_lexeme, ArithmeticOperator, BinaryOperator, Control, Keyword,
    Operator, Punctuator, Radix, ShiftOperator, NULL_LEXEME,
};
use crate::span::Span;

/// Represents the **category of a lexical token** in the LUNA language.
///
/// Besides the categories the lexer emits from source text, several kinds
/// (`Statement`, `Assignment`, `ExpressionList`, ...) never appear in source:
/// the parser mints tokens of these kinds to label interior AST nodes.
///
/// # Compiler Pipeline Role
/// ```text
/// Source → Cursor → Lexer → TokenKind → Parser → Statement trees
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    ArrayList,
    ArithmeticOperator,
    ArrayIndex,
    Assignment,
    AssignmentList,

    /// Sentinel opening every token list.
    Begin,
    BinaryOperator,
    Boolean,
    ConditionalList,
    Control,

    /// Sentinel closing every token list.
    End,
    Expression,
    ExpressionCompound,
    ExpressionList,
    Float,
    FunctionCall,
    Identifier,
    IdentifierList,
    Keyword,

    /// A quoted character literal such as `'a'` or `'\n'`.
    LiteralCharacter,

    /// A quoted string literal such as `"hello"`.
    LiteralString,
    Operator,
    Null,

    /// An integer literal in one of four radices.
    Scalar,
    ShiftOperator,
    Statement,
    StatementList,

    /// Punctuation: braces, brackets, parentheses, `=`, `~`, `.`, `,`, `;`.
    Symbol,
}

impl TokenKind {
    /// The upper-case display name used in token and tree dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ArrayList => "ARRAY_LIST",
            Self::ArithmeticOperator => "ARITHMETIC_OPERATOR",
            Self::ArrayIndex => "ARRAY_INDEX",
            Self::Assignment => "ASSIGNMENT",
            Self::AssignmentList => "ASSIGNMENT_LIST",
            Self::Begin => "BEGIN",
            Self::BinaryOperator => "BINARY_OPERATOR",
            Self::Boolean => "BOOLEAN",
            Self::ConditionalList => "CONDITIONAL_LIST",
            Self::Control => "CONTROL",
            Self::End => "END",
            Self::Expression => "EXPRESSION",
            Self::ExpressionCompound => "EXPRESSION_COMPOUND",
            Self::ExpressionList => "EXPRESSION_LIST",
            Self::Float => "FLOAT",
            Self::FunctionCall => "FUNCTION_CALL",
            Self::Identifier => "IDENTIFIER",
            Self::IdentifierList => "IDENTIFIER_LIST",
            Self::Keyword => "KEYWORD",
            Self::LiteralCharacter => "CHARACTER",
            Self::LiteralString => "STRING",
            Self::Operator => "OPERATOR",
            Self::Null => "NULL",
            Self::Scalar => "SCALAR",
            Self::ShiftOperator => "SHIFT_OPERATOR",
            Self::Statement => "STATEMENT",
            Self::StatementList => "STATEMENT_LIST",
            Self::Symbol => "SYMBOL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The category-specific refinement of a [`TokenKind`].
///
/// Only operator, reserved-word, scalar and punctuation kinds carry a
/// subtype; everything else is `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Subtype {
    #[default]
    Invalid,
    Arithmetic(ArithmeticOperator),
    Binary(BinaryOperator),
    Boolean(bool),
    Control(Control),
    Keyword(Keyword),
    Operator(Operator),
    Null,
    Scalar(Radix),
    Shift(ShiftOperator),
    Symbol(Punctuator),
}

impl Subtype {
    /// Looks up the subtype spelled `text` within the table for `kind`.
    ///
    /// Returns `Invalid` for kinds without a subtype table, or when the
    /// spelling is not in the table.
    pub fn lookup(kind: TokenKind, text: &str) -> Self {
        let found = match kind {
            TokenKind::ArithmeticOperator => ArithmeticOperator::from_lexeme(text).map(Self::Arithmetic),
            TokenKind::BinaryOperator => BinaryOperator::from_lexeme(text).map(Self::Binary),
            TokenKind::Boolean => boolean_from_lexeme(text).map(Self::Boolean),
            TokenKind::Control => Control::from_lexeme(text).map(Self::Control),
            TokenKind::Keyword => Keyword::from_lexeme(text).map(Self::Keyword),
            TokenKind::Operator => Operator::from_lexeme(text).map(Self::Operator),
            TokenKind::Null => (text == NULL_LEXEME).then_some(Self::Null),
            TokenKind::Scalar => Radix::from_lexeme(text).map(Self::Scalar),
            TokenKind::ShiftOperator => ShiftOperator::from_lexeme(text).map(Self::Shift),
            TokenKind::Symbol => Punctuator::from_lexeme(text).map(Self::Symbol),
            _ => None,
        };
        found.unwrap_or(Self::Invalid)
    }

    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "",
            Self::Arithmetic(op) => op.as_str(),
            Self::Binary(op) => op.as_str(),
            Self::Boolean(value) => boolean_as_str(value),
            Self::Control(control) => control.as_str(),
            Self::Keyword(keyword) => keyword.as_str(),
            Self::Operator(op) => op.as_str(),
            Self::Null => NULL_LEXEME,
            Self::Scalar(radix) => radix.as_str(),
            Self::Shift(op) => op.as_str(),
            Self::Symbol(punct) => punct.as_str(),
        }
    }
}

/// Represents a **single lexical token** produced by the LUNA lexer,
/// or a control token minted by the parser.
///
/// # Example Tokens
/// ```text
/// x        →  [IDENTIFIER] "x"
/// 0x1F     →  [SCALAR, HEXIDECIMAL] (31)
/// 'a'      →  [CHARACTER] 'a' (0x61)
/// ;        →  [SYMBOL, ;]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The id this token is stored under in the token table.
    pub id: Id,

    pub kind: TokenKind,

    pub subtype: Subtype,

    /// Raw text for identifiers and string literals. Empty for reserved
    /// words, operators and numbers, whose meaning lives in the subtype
    /// and value.
    pub text: String,

    /// Numeric value of scalar, float and character literals.
    pub value: f64,

    /// Name of the source file the token was read from.
    pub source: Option<String>,

    /// Where the token starts.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, subtype: Subtype) -> Self {
        Self {
            id: Id::NIL,
            kind,
            subtype,
            text: String::new(),
            value: 0.0,
            source: None,
            span: Span::default(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn located(mut self, source: Option<String>, span: Span) -> Self {
        self.source = source;
        self.span = span;
        self
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_symbol(&self, punct: Punctuator) -> bool {
        self.kind == TokenKind::Symbol && self.subtype == Subtype::Symbol(punct)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword && self.subtype == Subtype::Keyword(keyword)
    }

    pub fn is_arithmetic(&self, op: ArithmeticOperator) -> bool {
        self.kind == TokenKind::ArithmeticOperator && self.subtype == Subtype::Arithmetic(op)
    }

    /// Renders the token for dumps and error details.
    ///
    /// `verbose` prefixes the token id.
    pub fn render(&self, verbose: bool) -> String {
        let mut out = String::new();

        if verbose {
            out.push_str(&format!("{} ", self.id));
        }

        out.push('[');
        out.push_str(self.kind.as_str());
        if self.subtype.is_valid() {
            out.push_str(", ");
            out.push_str(self.subtype.as_str());
        }
        out.push(']');

        if !self.text.is_empty() {
            out.push_str(&format!(" \"{}\"", self.text));
        } else if self.kind == TokenKind::LiteralString {
            out.push_str(" \"\"");
        }

        match self.kind {
            TokenKind::Float | TokenKind::Scalar => out.push_str(&format!(" ({})", self.value)),
            TokenKind::LiteralCharacter => {
                let byte = self.value as u32 as u8;
                let shown = if (0x20..=0x7e).contains(&byte) {
                    byte as char
                } else {
                    ' '
                };
                out.push_str(&format!(" '{shown}' (0x{byte:02x})"));
            }
            TokenKind::LiteralString => {
                out.push_str(&format!(" ({})", self.text.chars().count()))
            }
            _ => {}
        }

        if let Some(source) = &self.source {
            out.push_str(&format!(" ({}({}))", source, self.span.line));
        }

        out
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtype_lookup_uses_the_kind_table() {
        assert_eq!(
            Subtype::lookup(TokenKind::Symbol, ";"),
            Subtype::Symbol(Punctuator::Terminator)
        );
        assert_eq!(
            Subtype::lookup(TokenKind::Operator, "~="),
            Subtype::Operator(Operator::NotEquals)
        );
        assert_eq!(Subtype::lookup(TokenKind::Operator, ";"), Subtype::Invalid);
        assert_eq!(Subtype::lookup(TokenKind::Identifier, "x"), Subtype::Invalid);
    }

    #[test]
    fn render_identifier() {
        let token = Token::new(TokenKind::Identifier, Subtype::Invalid).with_text("count");
        assert_eq!(token.to_string(), "[IDENTIFIER] \"count\"");
    }

    #[test]
    fn render_scalar_with_subtype_and_source() {
        let token = Token::new(TokenKind::Scalar, Subtype::Scalar(Radix::Hexadecimal))
            .with_value(31.0)
            .located(Some("main.lu".into()), Span::new(3, 4));
        assert_eq!(token.to_string(), "[SCALAR, HEXIDECIMAL] (31) (main.lu(3))");
    }

    #[test]
    fn render_literals() {
        let ch = Token::new(TokenKind::LiteralCharacter, Subtype::Invalid).with_value(97.0);
        assert_eq!(ch.to_string(), "[CHARACTER] 'a' (0x61)");

        let newline = Token::new(TokenKind::LiteralCharacter, Subtype::Invalid).with_value(10.0);
        assert_eq!(newline.to_string(), "[CHARACTER] ' ' (0x0a)");

        let empty = Token::new(TokenKind::LiteralString, Subtype::Invalid);
        assert_eq!(empty.to_string(), "[STRING] \"\" (0)");
    }

    #[test]
    fn verbose_render_prefixes_the_id() {
        let mut token = Token::new(TokenKind::Begin, Subtype::Invalid);
        token.id = Id::from_parts(1, 2);
        assert_eq!(
            token.render(true),
            "{00000000-0000-0001-0000-000000000002} [BEGIN]"
        );
    }
}
