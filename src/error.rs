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

//! Error types for every LUNA component.
//!
//! Each component (identity registry, tables, cursor/lexer, parser,
//! interpreter) raises its own closed set of conditions. Lower layers
//! convert upward through `#[from]`, and everything funnels into
//! [`LunaError`] for rendering by the
//! [`DiagnosticPrinter`](crate::diagnostics::DiagnosticPrinter).

use thiserror::Error;

use crate::id::Id;
use crate::span::Span;

/// Formats an optional detail string as a `": detail"` suffix.
fn suffix(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!(": {detail}")
    }
}

/// Failures raised by the [`IdRegistry`](crate::id::IdRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id registry is uninitialized")]
    Uninitialized,

    #[error("id not found: {0}")]
    NotFound(Id),

    #[error("unique id referenced multiple times: {0}")]
    DuplicateUniqueReference(Id),
}

/// Failures raised by the [`TokenTable`](crate::tables::TokenTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token table is uninitialized")]
    Uninitialized,

    #[error("token id was already added: {0}")]
    AlreadyExists(Id),

    #[error("token id was not found: {0}")]
    NotFound(Id),

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Failures raised by [`Node`](crate::ast::Node) and the
/// [`NodeTable`](crate::tables::NodeTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node table is uninitialized")]
    Uninitialized,

    #[error("node id was already added: {0}")]
    AlreadyExists(Id),

    #[error("node id was not found: {0}")]
    NotFound(Id),

    #[error("invalid node position: {position}/{len}")]
    InvalidPosition { position: usize, len: usize },

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Failures raised by [`Scope`](crate::scope::Scope) and the
/// [`ScopeTable`](crate::tables::ScopeTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("scope table is uninitialized")]
    Uninitialized,

    #[error("scope id was already added: {0}")]
    AlreadyExists(Id),

    #[error("scope was not found: {0}")]
    ScopeNotFound(Id),

    #[error("invalid symbol key: \"{0}\"")]
    InvalidKey(String),

    #[error("symbol key already exists in scope: \"{0}\"")]
    KeyAlreadyExists(String),

    #[error("symbol key was not found in scope: \"{0}\"")]
    KeyNotFound(String),

    #[error("symbol id not found in scope: {0}")]
    SymbolNotFound(Id),

    #[error("invalid symbol type: expecting {expected}, found {found}")]
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Failures raised while loading script source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("file not found: '{path}' ({reason})")]
    FileNotFound { path: String, reason: String },
}

/// Failures raised while loading a [`LunaConfig`](crate::config::LunaConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("malformed config: {0}")]
    Malformed(String),
}

/// The closed set of conditions the character cursor and lexer detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("expecting alpha character")]
    ExpectingAlphaCharacter,

    #[error("expecting character delimiter")]
    ExpectingCharacterDelimiter,

    #[error("expecting character literal")]
    ExpectingCharacterLiteral,

    #[error("expecting digit character")]
    ExpectingDigitCharacter,

    #[error("expecting a next character")]
    ExpectingNextCharacter,

    #[error("expecting a next token")]
    ExpectingNextToken,

    #[error("expecting a previous character")]
    ExpectingPreviousCharacter,

    #[error("expecting a previous token")]
    ExpectingPreviousToken,

    #[error("expecting string delimiter")]
    ExpectingStringDelimiter,

    #[error("expecting symbol character")]
    ExpectingSymbolCharacter,

    #[error("invalid character position")]
    InvalidCharacterPosition,

    #[error("invalid character row")]
    InvalidCharacterRow,

    #[error("invalid scalar value")]
    InvalidScalarValue,

    #[error("invalid floating-point value")]
    InvalidScalarFloatValue,

    #[error("invalid token position")]
    InvalidTokenPosition,

    #[error("no next character found")]
    NoNextCharacter,

    #[error("no next token found")]
    NoNextToken,

    #[error("no previous character found")]
    NoPreviousCharacter,

    #[error("no previous token found")]
    NoPreviousToken,

    #[error("failed to parse scalar value")]
    ScalarParseFailed,

    #[error("unknown symbol character")]
    UnknownSymbolCharacter,

    #[error("unterminated character literal")]
    UnterminatedCharacterLiteral,

    #[error("unterminated escape sequence")]
    UnterminatedEscapeSequence,

    #[error("unterminated string literal")]
    UnterminatedStringLiteral,
}

/// A failure raised by the character cursor or the lexer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("{kind}{}", suffix(.detail))]
    Syntax {
        kind: LexErrorKind,
        detail: String,
        span: Span,
    },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl LexError {
    pub fn new(kind: LexErrorKind, detail: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            kind,
            detail: detail.into(),
            span,
        }
    }

    /// The lexical condition, if this is not a token table failure.
    pub fn kind(&self) -> Option<LexErrorKind> {
        match self {
            Self::Syntax { kind, .. } => Some(*kind),
            Self::Token(_) => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Syntax { span, .. } => Some(*span),
            Self::Token(_) => None,
        }
    }
}

/// The closed set of grammar and statement-list conditions the parser detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expecting an assignment")]
    ExpectingAssignment,

    #[error("expecting a closing bracket")]
    ExpectingClosingBracket,

    #[error("expecting a closing brace")]
    ExpectingClosingBrace,

    #[error("expecting a closing parenthesis")]
    ExpectingClosingParenthesis,

    #[error("expecting a conditional expression")]
    ExpectingConditionalExpression,

    #[error("expecting a conditional statement")]
    ExpectingConditionalStatement,

    #[error("expecting a control statement")]
    ExpectingControl,

    #[error("expecting an else conditional")]
    ExpectingElseConditional,

    #[error("expecting an expression")]
    ExpectingExpression,

    #[error("expecting a numeric expression")]
    ExpectingExpressionNumeric,

    #[error("expecting a function")]
    ExpectingFunction,

    #[error("expecting a generic call")]
    ExpectingGenericCall,

    #[error("expecting an identifier")]
    ExpectingIdentifier,

    #[error("expecting an if conditional")]
    ExpectingIfConditional,

    #[error("expecting a keyword")]
    ExpectingKeyword,

    #[error("expecting a next statement")]
    ExpectingNextStatement,

    #[error("expecting an opening brace")]
    ExpectingOpeningBrace,

    #[error("expecting an opening parenthesis")]
    ExpectingOpeningParenthesis,

    #[error("expecting a previous statement")]
    ExpectingPreviousStatement,

    #[error("expecting a scalar value")]
    ExpectingScalar,

    #[error("expecting a statement")]
    ExpectingStatement,

    #[error("expecting a string")]
    ExpectingString,

    #[error("expecting a structure")]
    ExpectingStruct,

    #[error("expecting a terminator")]
    ExpectingTerminator,

    #[error("invalid child statement position")]
    InvalidChildStatementPosition,

    #[error("invalid parent statement position")]
    InvalidParentStatementPosition,

    #[error("invalid statement position")]
    InvalidStatementPosition,

    #[error("no next statement found")]
    NoNextStatement,

    #[error("no previous statement found")]
    NoPreviousStatement,
}

/// A failure raised by the parser, or by a layer underneath it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{kind}{}", suffix(.detail))]
    Syntax {
        kind: ParseErrorKind,
        detail: String,
        span: Span,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, detail: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            kind,
            detail: detail.into(),
            span,
        }
    }

    /// The grammar condition, if this error originated in the parser itself.
    pub fn kind(&self) -> Option<ParseErrorKind> {
        match self {
            Self::Syntax { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Syntax { span, .. } => Some(*span),
            Self::Lex(err) => err.span(),
            _ => None,
        }
    }
}

/// Failures raised while stepping through statements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpreterError {
    #[error("no scope found")]
    NoScope,

    #[error("no next statement to step to")]
    NoNextStatement,

    #[error("expecting a statement{}", suffix(.0))]
    ExpectingStatement(String),

    #[error("expecting an assignment or call{}", suffix(.0))]
    ExpectingAssignment(String),

    #[error("expecting a conditional{}", suffix(.0))]
    ExpectingConditional(String),

    #[error("evaluation failed: {0}")]
    Evaluation(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// The user-facing error: a stable code, a message, and an optional
/// source location plus help text.
///
/// Every component error converts into a `LunaError` so the CLI has a
/// single thing to hand to the diagnostic printer.
#[derive(Debug, Clone, PartialEq)]
pub struct LunaError {
    /// Stable error code (E_LEX, E_PARSE, ...)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Primary source location, when one is known
    pub span: Option<Span>,

    /// Optional note / help text
    pub help: Option<String>,
}

impl LunaError {
    /// Generic constructor
    pub fn new(code: &'static str, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            help: None,
        }
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl std::fmt::Display for LunaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}

impl std::error::Error for LunaError {}

impl From<IdError> for LunaError {
    fn from(err: IdError) -> Self {
        Self::new("E_ID", err.to_string(), None)
    }
}

impl From<TokenError> for LunaError {
    fn from(err: TokenError) -> Self {
        Self::new("E_TOKEN", err.to_string(), None)
    }
}

impl From<NodeError> for LunaError {
    fn from(err: NodeError) -> Self {
        Self::new("E_NODE", err.to_string(), None)
    }
}

impl From<ScopeError> for LunaError {
    fn from(err: ScopeError) -> Self {
        Self::new("E_SCOPE", err.to_string(), None)
    }
}

impl From<SourceError> for LunaError {
    fn from(err: SourceError) -> Self {
        Self::new("E_SOURCE", err.to_string(), None)
            .with_help("Check that the script path exists and is readable.")
    }
}

impl From<ConfigError> for LunaError {
    fn from(err: ConfigError) -> Self {
        Self::new("E_CONFIG", err.to_string(), None)
    }
}

impl From<LexError> for LunaError {
    fn from(err: LexError) -> Self {
        let help = match err.kind() {
            Some(LexErrorKind::UnterminatedStringLiteral) => {
                Some("Close the string literal with a matching '\"'.")
            }
            Some(LexErrorKind::UnterminatedCharacterLiteral) => {
                Some("Character literals hold exactly one character, e.g. 'a' or '\\n'.")
            }
            Some(LexErrorKind::UnknownSymbolCharacter) => {
                Some("This character is not part of the LUNA symbol set.")
            }
            _ => None,
        };
        let span = err.span();
        let out = Self::new("E_LEX", err.to_string(), span);
        match help {
            Some(help) => out.with_help(help),
            None => out,
        }
    }
}

impl From<ParseError> for LunaError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(inner) => inner.into(),
            ParseError::Node(inner) => inner.into(),
            ParseError::Token(inner) => inner.into(),
            syntax => {
                let span = syntax.span();
                let help = match syntax.kind() {
                    Some(ParseErrorKind::ExpectingTerminator) => {
                        Some("Statements end with ';'.")
                    }
                    Some(ParseErrorKind::ExpectingClosingParenthesis) => {
                        Some("Check for a missing ')'.")
                    }
                    _ => None,
                };
                let out = Self::new("E_PARSE", syntax.to_string(), span);
                match help {
                    Some(help) => out.with_help(help),
                    None => out,
                }
            }
        }
    }
}

impl From<InterpreterError> for LunaError {
    fn from(err: InterpreterError) -> Self {
        match err {
            InterpreterError::Parse(inner) => inner.into(),
            InterpreterError::Node(inner) => inner.into(),
            InterpreterError::Token(inner) => inner.into(),
            InterpreterError::Scope(inner) => inner.into(),
            other => Self::new("E_RUNTIME", other.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display_includes_detail() {
        let err = LexError::new(
            LexErrorKind::UnterminatedStringLiteral,
            "'c' (ln. 0)",
            Span::new(1, 4),
        );
        assert_eq!(err.to_string(), "unterminated string literal: 'c' (ln. 0)");
        assert_eq!(err.span(), Some(Span::new(1, 4)));
    }

    #[test]
    fn empty_detail_is_omitted() {
        let err = ParseError::new(ParseErrorKind::NoNextStatement, "", Span::default());
        assert_eq!(err.to_string(), "no next statement found");
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: ParseError = LexError::from(TokenError::Uninitialized).into();
        assert_eq!(err.to_string(), "token table is uninitialized");
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn luna_error_codes_follow_the_component() {
        let lex: LunaError =
            LexError::new(LexErrorKind::UnknownSymbolCharacter, "'$'", Span::new(2, 0)).into();
        assert_eq!(lex.code, "E_LEX");
        assert_eq!(lex.span, Some(Span::new(2, 0)));
        assert!(lex.help.is_some());

        let parse: LunaError = ParseError::Lex(LexError::new(
            LexErrorKind::NoNextToken,
            "",
            Span::new(1, 0),
        ))
        .into();
        assert_eq!(parse.code, "E_LEX");

        let scope: LunaError = ScopeError::KeyNotFound("x".into()).into();
        assert_eq!(scope.code, "E_SCOPE");
        assert_eq!(scope.span, None);
    }
}
