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

use crate::ast::Statement;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::keywords::{ArithmeticOperator, Keyword, Punctuator};
use crate::lexer::token::{Token, TokenKind};

use super::Parser;

/// Binding levels of numeric expressions, loosest first.
///
/// Each level parses one operand at the next tighter level, then loops
/// over its own operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Bitwise,
    Shift,
    Subtraction,
    Addition,
    Division,
    Multiplication,
    Primary,
}

impl Precedence {
    pub(crate) fn tighter(self) -> Self {
        match self {
            Self::Bitwise => Self::Shift,
            Self::Shift => Self::Subtraction,
            Self::Subtraction => Self::Addition,
            Self::Addition => Self::Division,
            Self::Division => Self::Multiplication,
            Self::Multiplication | Self::Primary => Self::Primary,
        }
    }

    /// True when `token` is an operator of this level.
    pub(crate) fn matches(self, token: &Token) -> bool {
        match self {
            Self::Bitwise => token.is(TokenKind::BinaryOperator),
            Self::Shift => token.is(TokenKind::ShiftOperator),
            Self::Subtraction => token.is_arithmetic(ArithmeticOperator::Subtraction),
            Self::Addition => token.is_arithmetic(ArithmeticOperator::Addition),
            Self::Division => {
                token.is_arithmetic(ArithmeticOperator::Division)
                    || token.is_arithmetic(ArithmeticOperator::Modulus)
            }
            Self::Multiplication => token.is_arithmetic(ArithmeticOperator::Multiplication),
            Self::Primary => false,
        }
    }
}

impl Parser {
    /// Parses an expression under a fresh EXPRESSION node.
    ///
    /// # Grammar
    /// ```text
    /// expression → function
    ///            | struct
    ///            | "{" expression_list? "}"
    ///            | expression_compound
    /// ```
    pub(crate) fn enumerate_expression(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let token = self.current()?;
        if token.is(TokenKind::End) {
            return Err(self.error(ParseErrorKind::ExpectingExpression));
        }

        let slot = self.add_control_node(statement, TokenKind::Expression, Some(parent))?;
        match token.kind {
            TokenKind::Keyword if token.is_keyword(Keyword::Funct) => {
                self.enumerate_function(statement, slot)?;
            }
            TokenKind::Keyword => {
                self.enumerate_struct(statement, slot)?;
            }
            TokenKind::Symbol
                if !token.is_symbol(Punctuator::Negate)
                    && !token.is_symbol(Punctuator::ParenthesisOpen) =>
            {
                self.enumerate_array_list(statement, slot)?;
            }
            _ => {
                self.enumerate_expression_compound(statement, slot)?;
            }
        }

        Ok(slot)
    }

    /// `expression ( "," expression )*` under an EXPRESSION_LIST node.
    pub(crate) fn enumerate_expression_list(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let slot = self.add_control_node(statement, TokenKind::ExpressionList, Some(parent))?;
        loop {
            self.enumerate_expression(statement, slot)?;
            if !self.check_symbol(Punctuator::Separator)? {
                break;
            }
            self.advance()?;
        }

        Ok(slot)
    }

    /// `"{" expression_list? "}"` under an ARRAY_LIST node.
    fn enumerate_array_list(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.check_symbol(Punctuator::CurlyBraceOpen)? {
            return Err(self.error(ParseErrorKind::ExpectingOpeningBrace));
        }

        let slot = self.add_control_node(statement, TokenKind::ArrayList, Some(parent))?;
        self.advance()?;
        if !self.check_symbol(Punctuator::CurlyBraceClose)? {
            self.enumerate_expression_list(statement, slot)?;
        }
        self.consume_symbol(Punctuator::CurlyBraceClose, ParseErrorKind::ExpectingClosingBrace)?;

        Ok(slot)
    }

    /// A string or numeric expression under an EXPRESSION_COMPOUND node.
    ///
    /// Leading parentheses are looked through to find the first operand:
    /// a string literal selects string concatenation, anything else a
    /// numeric expression. The lexer is rewound before parsing either.
    pub(crate) fn enumerate_expression_compound(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let slot = self.add_control_node(statement, TokenKind::ExpressionCompound, Some(parent))?;

        let mut depth = 0;
        while self.check_symbol(Punctuator::ParenthesisOpen)? {
            self.advance()?;
            depth += 1;
        }
        let is_string = self.current()?.is(TokenKind::LiteralString);
        for _ in 0..depth {
            self.lexer.move_previous_token(true)?;
        }

        if is_string {
            self.enumerate_expression_string(statement, slot)?;
        } else {
            self.enumerate_expression_numeric(statement, slot)?;
        }

        Ok(slot)
    }

    /// ```text
    /// string → ( "(" string ")" | STRING ) ( "+" expression_compound )?
    /// ```
    ///
    /// The `+` node hangs off `parent` and owns the right-hand compound.
    fn enumerate_expression_string(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let token = self.current()?;
        if token.is_symbol(Punctuator::ParenthesisOpen) {
            self.advance()?;
            self.enumerate_expression_string(statement, parent)?;
            self.consume_symbol(
                Punctuator::ParenthesisClose,
                ParseErrorKind::ExpectingClosingParenthesis,
            )?;
        } else if token.is(TokenKind::LiteralString) {
            self.add_token_node(statement, parent)?;
            self.advance()?;
        } else {
            return Err(self.error(ParseErrorKind::ExpectingString));
        }

        if self.current()?.is_arithmetic(ArithmeticOperator::Addition) {
            let slot = self.add_token_node(statement, parent)?;
            self.advance()?;
            self.enumerate_expression_compound(statement, slot)?;
        }

        Ok(parent)
    }

    /// Parses a numeric expression starting at the loosest level.
    pub(crate) fn enumerate_expression_numeric(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        self.enumerate_numeric_level(statement, parent, Precedence::Bitwise)
    }

    /// One precedence level.
    ///
    /// The first operand is attached to `parent`. Each operator of this
    /// level becomes a child of the previous operator (the first one a
    /// child of `parent`) and owns the operand that follows it.
    fn enumerate_numeric_level(
        &mut self,
        statement: &mut Statement,
        parent: usize,
        level: Precedence,
    ) -> Result<usize, ParseError> {
        if level == Precedence::Primary {
            return self.enumerate_numeric_primary(statement, parent);
        }

        self.enumerate_numeric_level(statement, parent, level.tighter())?;

        let mut anchor = parent;
        while level.matches(&self.current()?) {
            anchor = self.add_token_node(statement, anchor)?;
            self.advance()?;
            self.enumerate_numeric_level(statement, anchor, level.tighter())?;
        }

        Ok(parent)
    }

    /// ```text
    /// primary → identifier_reference
    ///         | BOOLEAN | FLOAT | CHARACTER | NULL | SCALAR
    ///         | "(" numeric ")"
    ///         | "~" numeric
    /// ```
    fn enumerate_numeric_primary(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let token = self.current()?;
        match token.kind {
            TokenKind::Identifier => self.enumerate_identifier_reference(statement, parent),
            TokenKind::Boolean
            | TokenKind::Float
            | TokenKind::LiteralCharacter
            | TokenKind::Null
            | TokenKind::Scalar => {
                let slot = self.add_token_node(statement, parent)?;
                self.advance()?;
                Ok(slot)
            }
            TokenKind::Symbol if token.is_symbol(Punctuator::ParenthesisOpen) => {
                self.advance()?;
                self.enumerate_expression_numeric(statement, parent)?;
                self.consume_symbol(
                    Punctuator::ParenthesisClose,
                    ParseErrorKind::ExpectingClosingParenthesis,
                )?;
                Ok(parent)
            }
            TokenKind::Symbol if token.is_symbol(Punctuator::Negate) => {
                let slot = self.add_token_node(statement, parent)?;
                self.advance()?;
                self.enumerate_expression_numeric(statement, slot)?;
                Ok(slot)
            }
            _ => Err(self.error(ParseErrorKind::ExpectingExpressionNumeric)),
        }
    }

    /// `"funct" "(" identifier_list? ")" "{" statement_list "}"`
    ///
    /// Parameters and body both hang off the `funct` node.
    fn enumerate_function(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.check_keyword(Keyword::Funct)? {
            return Err(self.error(ParseErrorKind::ExpectingFunction));
        }

        let slot = self.add_token_node(statement, parent)?;
        self.advance()?;
        self.consume_symbol(
            Punctuator::ParenthesisOpen,
            ParseErrorKind::ExpectingOpeningParenthesis,
        )?;
        if !self.check_symbol(Punctuator::ParenthesisClose)? {
            self.enumerate_identifier_list(statement, slot)?;
        }
        self.consume_symbol(
            Punctuator::ParenthesisClose,
            ParseErrorKind::ExpectingClosingParenthesis,
        )?;
        self.enumerate_block(statement, slot)?;

        Ok(slot)
    }

    /// `"struct" "{" assignment_list? "}"`
    fn enumerate_struct(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.check_keyword(Keyword::Struct)? {
            return Err(self.error(ParseErrorKind::ExpectingStruct));
        }

        let slot = self.add_token_node(statement, parent)?;
        self.advance()?;
        self.consume_symbol(Punctuator::CurlyBraceOpen, ParseErrorKind::ExpectingOpeningBrace)?;
        if !self.check_symbol(Punctuator::CurlyBraceClose)? {
            self.enumerate_assignment_list(statement, slot)?;
        }
        self.consume_symbol(Punctuator::CurlyBraceClose, ParseErrorKind::ExpectingClosingBrace)?;

        Ok(slot)
    }

    /// ```text
    /// assignment_list → identifier_reference "=" expression ( "," ... )*
    /// ```
    ///
    /// Each ASSIGNMENT node is a child of the field it assigns.
    fn enumerate_assignment_list(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let slot = self.add_control_node(statement, TokenKind::AssignmentList, Some(parent))?;
        loop {
            if !self.current()?.is(TokenKind::Identifier) {
                return Err(self.error(ParseErrorKind::ExpectingIdentifier));
            }
            let field = self.enumerate_identifier_reference(statement, slot)?;

            if !self.check_symbol(Punctuator::Assignment)? {
                return Err(self.error(ParseErrorKind::ExpectingAssignment));
            }
            let assignment = self.add_control_node(statement, TokenKind::Assignment, Some(field))?;
            self.advance()?;
            self.enumerate_expression(statement, assignment)?;

            if !self.check_symbol(Punctuator::Separator)? {
                break;
            }
            self.advance()?;
        }

        Ok(slot)
    }

    /// `IDENTIFIER ( "," IDENTIFIER )*` under an IDENTIFIER_LIST node.
    fn enumerate_identifier_list(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let slot = self.add_control_node(statement, TokenKind::IdentifierList, Some(parent))?;
        loop {
            if !self.current()?.is(TokenKind::Identifier) {
                return Err(self.error(ParseErrorKind::ExpectingIdentifier));
            }
            self.add_token_node(statement, slot)?;
            self.advance()?;

            if !self.check_symbol(Punctuator::Separator)? {
                break;
            }
            self.advance()?;
        }

        Ok(slot)
    }

    /// ```text
    /// identifier_reference → IDENTIFIER ( "." IDENTIFIER )* ( "[" index "]" )?
    /// index                → identifier_reference | SCALAR
    /// ```
    ///
    /// Each identifier in a dotted chain is a child of the one before it.
    /// Returns the slot of the last identifier, which also owns the
    /// ARRAY_INDEX node when one is present.
    pub(crate) fn enumerate_identifier_reference(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let mut anchor = parent;
        loop {
            if !self.current()?.is(TokenKind::Identifier) {
                return Err(self.error(ParseErrorKind::ExpectingIdentifier));
            }
            anchor = self.add_token_node(statement, anchor)?;
            self.advance()?;

            if !self.check_symbol(Punctuator::Reference)? {
                break;
            }
            self.advance()?;
        }

        if self.check_symbol(Punctuator::SquareBracketOpen)? {
            let index = self.add_control_node(statement, TokenKind::ArrayIndex, Some(anchor))?;
            self.advance()?;

            let token = self.current()?;
            if token.is(TokenKind::Identifier) {
                self.enumerate_identifier_reference(statement, index)?;
            } else if token.is(TokenKind::Scalar) {
                self.add_token_node(statement, index)?;
                self.advance()?;
            } else {
                return Err(self.error(ParseErrorKind::ExpectingScalar));
            }

            self.consume_symbol(
                Punctuator::SquareBracketClose,
                ParseErrorKind::ExpectingClosingBracket,
            )?;
        }

        Ok(anchor)
    }
}
