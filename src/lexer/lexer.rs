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

use std::sync::Arc;

use crate::error::{LexError, LexErrorKind};
use crate::id::Id;
use crate::lexer::cursor::{CharClass, CharCursor};
use crate::lexer::keywords::{classify_symbol, classify_word, Radix, ShiftOperator};
use crate::lexer::token::{Subtype, Token, TokenKind};
use crate::source::Source;
use crate::span::Span;
use crate::tables::TokenTable;

/// BEGIN and END bracket every token list.
pub const SENTINEL_COUNT: usize = 2;

/// Comment introducer; the comment runs to the end of the line.
const COMMENT: char = '#';

/// The LUNA lexer.
///
/// Turns the characters of a [`Source`] into tokens stored in a shared
/// [`TokenTable`], keeping an ordered list of their ids bracketed by BEGIN
/// and END sentinels.
///
/// Lexing is lazy: [`move_next_token`](Self::move_next_token) only scans
/// more source when the logical position sits on the last materialized
/// token. Stepping backward and forward again over tokens already scanned
/// never touches the character cursor.
///
/// # Compiler Pipeline Role
/// ```text
/// Source → CharCursor → Lexer → TokenTable → Parser
/// ```
pub struct Lexer {
    cursor: CharCursor,
    tokens: Arc<TokenTable>,

    /// BEGIN, materialized token ids in source order, END.
    list: Vec<Id>,

    /// Logical position within `list`.
    position: usize,
}

impl Lexer {
    /// Creates a lexer over `source`, storing tokens in `tokens`.
    ///
    /// # Errors
    /// Fails when the token table is uninitialized.
    pub fn new(source: &Source, tokens: Arc<TokenTable>) -> Result<Self, LexError> {
        let mut lexer = Self {
            cursor: CharCursor::new(source),
            tokens,
            list: Vec::new(),
            position: 0,
        };
        lexer.clear()?;
        Ok(lexer)
    }

    /// Replaces the input and starts over.
    pub fn set(&mut self, source: &Source) -> Result<(), LexError> {
        self.cursor = CharCursor::new(source);
        self.clear()
    }

    /// Drops every materialized token and rewinds the character cursor.
    ///
    /// Afterwards the list holds only the BEGIN and END sentinels.
    pub fn clear(&mut self) -> Result<(), LexError> {
        self.release()?;
        self.cursor.reset();
        self.skip_whitespace()?;

        let source = self.cursor.source_name().map(str::to_string);
        let begin = self.tokens.create(
            Token::new(TokenKind::Begin, Subtype::Invalid).located(source.clone(), Span::new(1, 0)),
        )?;
        let end = self.tokens.create(
            Token::new(TokenKind::End, Subtype::Invalid).located(source, self.cursor.span()),
        )?;

        self.list = vec![begin, end];
        self.position = 0;
        Ok(())
    }

    /// Removes every token this lexer stored in the token table.
    ///
    /// Every removal is attempted; the first failure is reported afterwards.
    pub fn release(&mut self) -> Result<(), LexError> {
        let mut failure = None;
        for id in self.list.drain(..) {
            if let Err(err) = self.tokens.remove(id) {
                failure.get_or_insert(err);
            }
        }
        self.position = 0;

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Moves the logical position back to BEGIN without discarding tokens.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Materializes every remaining token, returning the token count.
    pub fn discover(&mut self) -> Result<usize, LexError> {
        self.reset();
        while self.has_next_token() {
            self.move_next_token(false)?;
        }
        Ok(self.len())
    }

    /// Number of materialized tokens, sentinels excluded.
    pub fn len(&self) -> usize {
        self.list.len().saturating_sub(SENTINEL_COUNT)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn source_name(&self) -> Option<&str> {
        self.cursor.source_name()
    }

    /// The shared table this lexer stores tokens in.
    pub fn tokens(&self) -> &Arc<TokenTable> {
        &self.tokens
    }

    /// Id of the BEGIN sentinel.
    pub fn begin_id(&self) -> Id {
        self.list.first().copied().unwrap_or(Id::NIL)
    }

    /// Id of the END sentinel.
    pub fn end_id(&self) -> Id {
        self.list.last().copied().unwrap_or(Id::NIL)
    }

    /// Id of the token at the logical position.
    pub fn token_id(&self) -> Id {
        self.list.get(self.position).copied().unwrap_or(Id::NIL)
    }

    pub fn token_id_at(&self, position: usize) -> Result<Id, LexError> {
        self.list.get(position).copied().ok_or_else(|| {
            LexError::new(
                LexErrorKind::InvalidTokenPosition,
                format!("{}/{}", position, self.list.len().saturating_sub(1)),
                self.cursor.span(),
            )
        })
    }

    /// The token at the logical position.
    pub fn token(&self) -> Result<Token, LexError> {
        Ok(self.tokens.get(self.token_id())?)
    }

    /// The token at list `position` (0 is BEGIN).
    pub fn token_at(&self, position: usize) -> Result<Token, LexError> {
        let id = self.token_id_at(position)?;
        Ok(self.tokens.get(id)?)
    }

    /// True until the logical position reaches END.
    pub fn has_next_token(&self) -> bool {
        self.token_id() != self.end_id()
    }

    pub fn has_previous_token(&self) -> bool {
        self.position > 0
    }

    /// Whether the logical position is on the last materialized token,
    /// i.e. the token right before END.
    fn at_tail(&self) -> bool {
        self.position + SENTINEL_COUNT == self.list.len()
    }

    /// Steps to the next token, scanning it from source first when the
    /// position is at the materialized tail.
    ///
    /// `expect` selects the error raised at END: `ExpectingNextToken` when
    /// the caller requires another token, otherwise `NoNextToken`.
    pub fn move_next_token(&mut self, expect: bool) -> Result<Token, LexError> {
        if !self.has_next_token() {
            let kind = if expect {
                LexErrorKind::ExpectingNextToken
            } else {
                LexErrorKind::NoNextToken
            };
            return Err(self.token_error(kind));
        }

        if self.cursor.has_next() && self.at_tail() {
            self.enumerate_token()?;
            self.skip_whitespace()?;
            if !self.cursor.has_next() {
                self.locate_end()?;
            }
        }

        self.position += 1;
        self.token()
    }

    pub fn move_previous_token(&mut self, expect: bool) -> Result<Token, LexError> {
        if !self.has_previous_token() {
            let kind = if expect {
                LexErrorKind::ExpectingPreviousToken
            } else {
                LexErrorKind::NoPreviousToken
            };
            return Err(self.token_error(kind));
        }

        self.position -= 1;
        self.token()
    }

    /// An error carrying the rendered current token.
    fn token_error(&self, kind: LexErrorKind) -> LexError {
        match self.token() {
            Ok(token) => LexError::new(kind, token.render(false), token.span),
            Err(_) => self.cursor.error(kind),
        }
    }

    /// Renders the current token, or the full token list when `verbose`.
    pub fn render(&self, verbose: bool) -> Result<String, LexError> {
        if !verbose {
            return Ok(self.token()?.render(false));
        }

        let mut out = format!("Tokens[{}] (pos: {})", self.len(), self.position);
        for (index, id) in self.list.iter().enumerate() {
            let token = self.tokens.get(*id)?;
            let marker = if index == self.position { "*" } else { " " };
            out.push_str(&format!("\n{}[{}] {}", marker, index, token.render(true)));
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------

    /// Skips whitespace and `#` comments until a token character (or the
    /// end of input) is under the cursor.
    fn skip_whitespace(&mut self) -> Result<(), LexError> {
        loop {
            while self.cursor.has_next() && self.cursor.class() == CharClass::Whitespace {
                self.cursor.advance(false)?;
            }

            if self.cursor.current() != COMMENT {
                return Ok(());
            }

            while self.cursor.has_next() {
                if self.cursor.current() == '\n' {
                    self.cursor.advance(false)?;
                    break;
                }
                self.cursor.advance(false)?;
            }

            if !self.cursor.has_next() {
                return Ok(());
            }
        }
    }

    /// Moves the END sentinel to where the input ran out.
    fn locate_end(&self) -> Result<(), LexError> {
        let span = self.cursor.span();
        self.tokens.with_mut(self.end_id(), |token| {
            token.span = span;
            Ok(())
        })?;
        Ok(())
    }

    /// Stores `token` right after the logical position.
    fn push_token(&mut self, token: Token) -> Result<(), LexError> {
        let rendered = token.render(false);
        let id = self.tokens.create(token)?;
        self.list.insert(self.position + 1, id);
        tracing::trace!(%id, token = %rendered, "token materialized");
        Ok(())
    }

    fn new_token(&self, kind: TokenKind, subtype: Subtype, span: Span) -> Token {
        Token::new(kind, subtype).located(self.cursor.source_name().map(str::to_string), span)
    }

    /// Scans one token starting at the cursor.
    fn enumerate_token(&mut self) -> Result<(), LexError> {
        match self.cursor.class() {
            CharClass::Alpha => self.enumerate_alpha_token(),
            CharClass::Digit => self.enumerate_digit_token(),
            _ => self.enumerate_symbol_token(),
        }
    }

    /// Identifier runs: a letter or `_`, then letters, digits and `_`.
    ///
    /// Reserved spellings are reclassified and lose their text.
    fn enumerate_alpha_token(&mut self) -> Result<(), LexError> {
        let first = self.cursor.current();
        if self.cursor.class() != CharClass::Alpha && first != '_' {
            return Err(self.cursor.error(LexErrorKind::ExpectingAlphaCharacter));
        }

        let span = self.cursor.span();
        let mut text = String::from(first);
        self.cursor.advance(false)?;

        loop {
            let ch = self.cursor.current();
            if !matches!(self.cursor.class(), CharClass::Alpha | CharClass::Digit) && ch != '_' {
                break;
            }
            text.push(ch);
            if !self.cursor.has_next() {
                break;
            }
            self.cursor.advance(false)?;
        }

        let token = match classify_word(&text) {
            Some((kind, subtype)) => self.new_token(kind, subtype, span),
            None => self
                .new_token(TokenKind::Identifier, Subtype::Invalid, span)
                .with_text(text),
        };
        self.push_token(token)
    }

    /// Picks the radix from a literal's prefix.
    ///
    /// `0b` selects binary and `0x` hexadecimal (both prefixes consumed); a
    /// bare leading `0` selects octal; anything else is decimal.
    fn enumerate_radix(&mut self) -> Result<Radix, LexError> {
        if self.cursor.current() != '0' {
            return Ok(Radix::Decimal);
        }

        if self.cursor.has_next() {
            match self.cursor.advance(false)? {
                'b' => return Ok(Radix::Binary),
                'x' => return Ok(Radix::Hexadecimal),
                _ => {
                    self.cursor.retreat(false)?;
                }
            }
        }
        Ok(Radix::Octal)
    }

    /// Numeric literals: scalars in four radices, or decimal floats.
    ///
    /// A `.` inside a decimal literal switches it to a float. A float must
    /// have at least one digit after the point.
    fn enumerate_digit_token(&mut self) -> Result<(), LexError> {
        if self.cursor.class() != CharClass::Digit {
            return Err(self.cursor.error(LexErrorKind::ExpectingDigitCharacter));
        }

        let span = self.cursor.span();
        let radix = self.enumerate_radix()?;
        let mut is_float = false;
        let mut has_fraction = false;
        let mut text = String::new();

        if !matches!(radix, Radix::Binary | Radix::Hexadecimal) {
            text.push(self.cursor.current());
        }

        loop {
            if !self.cursor.has_next() {
                break;
            }
            let ch = self.cursor.advance(false)?.to_ascii_lowercase();

            let done = if is_float {
                if ch.is_ascii_digit() {
                    has_fraction = true;
                    false
                } else if has_fraction {
                    true
                } else {
                    return Err(self.cursor.error(LexErrorKind::InvalidScalarFloatValue));
                }
            } else if radix == Radix::Decimal && ch == '.' {
                is_float = true;
                false
            } else {
                !radix.accepts(ch)
            };

            if done {
                break;
            }
            text.push(ch);
        }

        if text.is_empty() {
            return Err(LexError::new(
                LexErrorKind::InvalidScalarValue,
                self.cursor.render(false),
                span,
            ));
        }

        let token = if is_float {
            let value = text.parse::<f64>().map_err(|_| {
                LexError::new(LexErrorKind::ScalarParseFailed, text.clone(), span)
            })?;
            self.new_token(TokenKind::Float, Subtype::Invalid, span)
                .with_value(value)
        } else {
            let value = u64::from_str_radix(&text, radix.base()).map_err(|_| {
                LexError::new(LexErrorKind::ScalarParseFailed, text.clone(), span)
            })?;
            self.new_token(TokenKind::Scalar, Subtype::Scalar(radix), span)
                .with_value(value as f64)
        };
        self.push_token(token)
    }

    /// Decodes the escape sequence following a `\`.
    ///
    /// Returns the decoded character, leaving the cursor on the last
    /// character of the sequence.
    fn enumerate_escape(&mut self) -> Result<char, LexError> {
        if !self.cursor.has_next() {
            return Err(self.cursor.error(LexErrorKind::UnterminatedEscapeSequence));
        }

        let ch = self.cursor.advance(false)?;
        let decoded = match ch {
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '\'' | '"' | '?' | '\\' => ch,
            'x' => {
                let mut digits = String::with_capacity(2);
                for _ in 0..2 {
                    if !self.cursor.has_next() {
                        return Err(self.cursor.error(LexErrorKind::UnterminatedEscapeSequence));
                    }
                    let digit = self.cursor.advance(false)?;
                    if !digit.is_ascii_hexdigit() {
                        return Err(self.cursor.error(LexErrorKind::UnterminatedEscapeSequence));
                    }
                    digits.push(digit);
                }
                self.escape_char(&digits, 16)?
            }
            _ => {
                let mut digits = String::with_capacity(3);
                for index in 0..3 {
                    let digit = self.cursor.current();
                    if !Radix::Octal.accepts(digit) || !self.cursor.has_next() {
                        return Err(self.cursor.error(LexErrorKind::UnterminatedEscapeSequence));
                    }
                    digits.push(digit);
                    if index < 2 {
                        self.cursor.advance(false)?;
                    }
                }
                self.escape_char(&digits, 8)?
            }
        };
        Ok(decoded)
    }

    /// Numeric escapes name a single byte; `\377` is the largest octal one.
    fn escape_char(&self, digits: &str, radix: u32) -> Result<char, LexError> {
        u8::from_str_radix(digits, radix)
            .map(char::from)
            .map_err(|_| self.cursor.error(LexErrorKind::UnterminatedEscapeSequence))
    }

    /// Character literals: `'c'` or `'\escape'`.
    fn enumerate_character_literal(&mut self) -> Result<(), LexError> {
        if self.cursor.current() != '\'' {
            return Err(self.cursor.error(LexErrorKind::ExpectingCharacterDelimiter));
        }
        if !self.cursor.has_next() {
            return Err(self.cursor.error(LexErrorKind::UnterminatedCharacterLiteral));
        }

        let span = self.cursor.span();
        let mut ch = self.cursor.advance(false)?;
        if ch == '\'' {
            return Err(self.cursor.error(LexErrorKind::ExpectingCharacterLiteral));
        }
        if ch == '\\' {
            ch = self.enumerate_escape()?;
        }

        if !self.cursor.has_next() || self.cursor.advance(false)? != '\'' {
            return Err(self.cursor.error(LexErrorKind::UnterminatedCharacterLiteral));
        }
        if self.cursor.has_next() {
            self.cursor.advance(false)?;
        }

        let token = self
            .new_token(TokenKind::LiteralCharacter, Subtype::Invalid, span)
            .with_value(f64::from(u32::from(ch)));
        self.push_token(token)
    }

    /// String literals: `"text"` with escape sequences decoded.
    fn enumerate_string_literal(&mut self) -> Result<(), LexError> {
        if self.cursor.current() != '"' {
            return Err(self.cursor.error(LexErrorKind::ExpectingStringDelimiter));
        }
        if !self.cursor.has_next() {
            return Err(self.cursor.error(LexErrorKind::UnterminatedStringLiteral));
        }

        let span = self.cursor.span();
        let mut text = String::new();
        let mut ch = self.cursor.advance(false)?;

        loop {
            if !self.cursor.has_next() {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedStringLiteral,
                    format!("\"{text}"),
                    span,
                ));
            }
            if ch == '"' {
                break;
            }
            if ch == '\\' {
                ch = self.enumerate_escape()?;
            }
            text.push(ch);
            ch = self.cursor.advance(false)?;
        }

        if self.cursor.has_next() {
            self.cursor.advance(false)?;
        }

        let token = self
            .new_token(TokenKind::LiteralString, Subtype::Invalid, span)
            .with_text(text);
        self.push_token(token)
    }

    /// Everything that is neither a letter nor a digit.
    ///
    /// Quotes start literals and `_` starts an identifier. Otherwise the
    /// character must be an operator or punctuation; when the following
    /// character is also a symbol, the pair is tried as a two-character
    /// comparison or shift operator first.
    fn enumerate_symbol_token(&mut self) -> Result<(), LexError> {
        if self.cursor.class() != CharClass::Symbol {
            return Err(self.cursor.error(LexErrorKind::ExpectingSymbolCharacter));
        }

        let first = self.cursor.current();
        match first {
            '\'' => return self.enumerate_character_literal(),
            '"' => return self.enumerate_string_literal(),
            '_' => return self.enumerate_alpha_token(),
            _ => {}
        }

        let span = self.cursor.span();
        let mut text = String::from(first);
        let mut kind = classify_symbol(&text)
            .ok_or_else(|| self.cursor.error(LexErrorKind::UnknownSymbolCharacter))?;

        if self.cursor.has_next() {
            let next = self.cursor.advance(false)?;
            if self.cursor.class() == CharClass::Symbol {
                let pair = format!("{first}{next}");
                let merged = if classify_symbol(&pair) == Some(TokenKind::Operator) {
                    Some(TokenKind::Operator)
                } else if ShiftOperator::from_lexeme(&pair).is_some() {
                    Some(TokenKind::ShiftOperator)
                } else {
                    None
                };

                if let Some(merged) = merged {
                    kind = merged;
                    text = pair;
                    if self.cursor.has_next() {
                        self.cursor.advance(false)?;
                    }
                }
            }
        }

        let subtype = Subtype::lookup(kind, &text);
        let token = self.new_token(kind, subtype, span);
        self.push_token(token)
    }
}

impl Drop for Lexer {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::trace!(%err, "lexer tokens already released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenError;
    use crate::id::IdRegistry;
    use crate::lexer::keywords::{ArithmeticOperator, Keyword, Operator, Punctuator};

    fn table() -> Arc<TokenTable> {
        let ids = Arc::new(IdRegistry::with_seed(17));
        let tokens = Arc::new(TokenTable::new(ids));
        tokens.initialize();
        tokens
    }

    fn lex(text: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(&Source::from_text(text), table()).unwrap();
        lexer.discover().unwrap();
        (1..=lexer.len()).map(|pos| lexer.token_at(pos).unwrap()).collect()
    }

    fn lex_err(text: &str) -> LexErrorKind {
        let mut lexer = Lexer::new(&Source::from_text(text), table()).unwrap();
        lexer.discover().unwrap_err().kind().unwrap()
    }

    #[test]
    fn empty_source_has_only_sentinels() {
        let mut lexer = Lexer::new(&Source::from_text(""), table()).unwrap();
        assert_eq!(lexer.discover().unwrap(), 0);
        assert_eq!(lexer.token_at(0).unwrap().kind, TokenKind::Begin);
        assert_eq!(lexer.token_at(1).unwrap().kind, TokenKind::End);
        assert!(lexer.is_empty());
    }

    #[test]
    fn whitespace_and_comments_only() {
        assert!(lex("   # nothing here\n\t# or here").is_empty());
    }

    #[test]
    fn simple_assignment() {
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
        assert_eq!(tokens[1].subtype, Subtype::Symbol(Punctuator::Assignment));
        assert_eq!(tokens[2].subtype, Subtype::Scalar(Radix::Decimal));
        assert_eq!(tokens[2].value, 5.0);
        assert_eq!(tokens[3].subtype, Subtype::Symbol(Punctuator::Terminator));
    }

    #[test]
    fn reserved_words_drop_their_text() {
        let tokens = lex("while true null funct _tmp1");
        assert_eq!(tokens[0].subtype, Subtype::Keyword(Keyword::While));
        assert!(tokens[0].text.is_empty());
        assert_eq!(tokens[1].kind, TokenKind::Boolean);
        assert_eq!(tokens[2].kind, TokenKind::Null);
        assert_eq!(tokens[3].subtype, Subtype::Keyword(Keyword::Funct));
        assert_eq!(tokens[4].kind, TokenKind::Identifier);
        assert_eq!(tokens[4].text, "_tmp1");
    }

    #[test]
    fn numeric_radices() {
        let tokens = lex("0x1F 0b101 017 42 3.25 0");
        let values: Vec<(Subtype, f64)> = tokens.iter().map(|t| (t.subtype, t.value)).collect();
        assert_eq!(
            values,
            vec![
                (Subtype::Scalar(Radix::Hexadecimal), 31.0),
                (Subtype::Scalar(Radix::Binary), 5.0),
                (Subtype::Scalar(Radix::Octal), 15.0),
                (Subtype::Scalar(Radix::Decimal), 42.0),
                (Subtype::Invalid, 3.25),
                (Subtype::Scalar(Radix::Octal), 0.0),
            ]
        );
        assert_eq!(tokens[4].kind, TokenKind::Float);
    }

    #[test]
    fn leading_zero_float_is_octal_then_reference() {
        let tokens = lex("0.5");
        assert_eq!(tokens[0].subtype, Subtype::Scalar(Radix::Octal));
        assert_eq!(tokens[1].subtype, Subtype::Symbol(Punctuator::Reference));
        assert_eq!(tokens[2].value, 5.0);
    }

    #[test]
    fn numeric_errors() {
        assert_eq!(lex_err("1."), LexErrorKind::InvalidScalarFloatValue);
        assert_eq!(lex_err("0x"), LexErrorKind::InvalidScalarValue);
        assert_eq!(
            lex_err("99999999999999999999999"),
            LexErrorKind::ScalarParseFailed
        );
    }

    #[test]
    fn string_and_character_literals() {
        let tokens = lex(r#""a\tb\x41\101" 'z' '\n' '\x7e'"#);
        assert_eq!(tokens[0].kind, TokenKind::LiteralString);
        assert_eq!(tokens[0].text, "a\tbAA");
        assert_eq!(tokens[1].value, f64::from(b'z'));
        assert_eq!(tokens[2].value, 10.0);
        assert_eq!(tokens[3].value, 126.0);
    }

    #[test]
    fn literal_errors() {
        assert_eq!(lex_err("\"abc"), LexErrorKind::UnterminatedStringLiteral);
        assert_eq!(lex_err("'ab'"), LexErrorKind::UnterminatedCharacterLiteral);
        assert_eq!(lex_err("''"), LexErrorKind::ExpectingCharacterLiteral);
        assert_eq!(lex_err("\"\\x4\""), LexErrorKind::UnterminatedEscapeSequence);
        assert_eq!(lex_err("\"\\9\""), LexErrorKind::UnterminatedEscapeSequence);
        assert_eq!(lex_err("'\\400'"), LexErrorKind::UnterminatedEscapeSequence);
        assert_eq!(lex_err("\"\\777\""), LexErrorKind::UnterminatedEscapeSequence);
    }

    #[test]
    fn largest_octal_escape_is_one_byte() {
        let tokens = lex("'\\377' '\\xfF'");
        assert_eq!(tokens[0].value, 255.0);
        assert_eq!(tokens[1].value, 255.0);
    }

    #[test]
    fn two_character_operators_merge() {
        let tokens = lex("a==b <= c << 2 && d ~= e ~f");
        assert_eq!(tokens[1].subtype, Subtype::Operator(Operator::Equals));
        assert_eq!(tokens[3].subtype, Subtype::Operator(Operator::LessThanEquals));
        assert_eq!(tokens[5].kind, TokenKind::ShiftOperator);
        assert_eq!(tokens[7].subtype, Subtype::Operator(Operator::And));
        assert_eq!(tokens[9].subtype, Subtype::Operator(Operator::NotEquals));
        assert_eq!(tokens[11].subtype, Subtype::Symbol(Punctuator::Negate));
    }

    #[test]
    fn adjacent_symbols_that_do_not_merge() {
        let tokens = lex("(-1)");
        assert_eq!(tokens[0].subtype, Subtype::Symbol(Punctuator::ParenthesisOpen));
        assert_eq!(
            tokens[1].subtype,
            Subtype::Arithmetic(ArithmeticOperator::Subtraction)
        );
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn unknown_symbols_fail() {
        assert_eq!(lex_err("a = $;"), LexErrorKind::UnknownSymbolCharacter);
        assert_eq!(lex_err("!"), LexErrorKind::UnknownSymbolCharacter);
    }

    #[test]
    fn tokens_record_their_line() {
        let tokens = lex("a\n# comment\n  b");
        assert_eq!(tokens[0].span, Span::new(1, 0));
        assert_eq!(tokens[1].span, Span::new(3, 2));
    }

    #[test]
    fn lazy_materialization_and_navigation() {
        let mut lexer = Lexer::new(&Source::from_text("a b c"), table()).unwrap();
        assert_eq!(lexer.len(), 0);

        lexer.move_next_token(true).unwrap();
        assert_eq!(lexer.len(), 1);
        lexer.move_next_token(true).unwrap();
        assert_eq!(lexer.len(), 2);

        let back = lexer.move_previous_token(true).unwrap();
        assert_eq!(back.text, "a");
        let again = lexer.move_next_token(true).unwrap();
        assert_eq!(again.text, "b");
        assert_eq!(lexer.len(), 2);

        assert_eq!(lexer.discover().unwrap(), 3);
        assert!(!lexer.has_next_token());
        assert_eq!(
            lexer.move_next_token(true).unwrap_err().kind(),
            Some(LexErrorKind::ExpectingNextToken)
        );
        assert_eq!(
            lexer.move_next_token(false).unwrap_err().kind(),
            Some(LexErrorKind::NoNextToken)
        );

        lexer.reset();
        assert_eq!(
            lexer.move_previous_token(false).unwrap_err().kind(),
            Some(LexErrorKind::NoPreviousToken)
        );
    }

    #[test]
    fn clear_and_drop_release_tokens() {
        let tokens = table();
        {
            let mut lexer = Lexer::new(&Source::from_text("a b"), tokens.clone()).unwrap();
            lexer.discover().unwrap();
            assert_eq!(tokens.len(), Ok(4));

            lexer.clear().unwrap();
            assert_eq!(tokens.len(), Ok(2));
            assert_eq!(lexer.len(), 0);
        }
        assert_eq!(tokens.len(), Ok(0));
    }

    #[test]
    fn release_removes_every_token_before_reporting() {
        let tokens = table();
        let mut lexer = Lexer::new(&Source::from_text("a b c"), tokens.clone()).unwrap();
        lexer.discover().unwrap();
        let missing = lexer.token_id_at(2).unwrap();
        tokens.remove(missing).unwrap();

        let err = lexer.release().unwrap_err();
        assert!(matches!(err, LexError::Token(TokenError::NotFound(id)) if id == missing));
        assert_eq!(tokens.len(), Ok(0));
        assert_eq!(lexer.token_id(), Id::NIL);
    }

    #[test]
    fn token_position_bounds() {
        let lexer = Lexer::new(&Source::from_text("a"), table()).unwrap();
        let err = lexer.token_at(5).unwrap_err();
        assert_eq!(err.kind(), Some(LexErrorKind::InvalidTokenPosition));
    }
}
