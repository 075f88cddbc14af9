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
use crate::lexer::keywords::{Keyword, Punctuator};
use crate::lexer::token::TokenKind;

use super::Parser;

impl Parser {
    /// Parses a single statement under `parent`.
    ///
    /// # Grammar
    /// ```text
    /// statement → control ";"
    ///           | identifier_reference ( "=" expression | "(" expression_list? ")" ) ";"
    ///           | "print" "(" expression ")" ";"
    ///           | if_statement
    ///           | while_statement
    /// ```
    ///
    /// A top-level statement (`root`) hangs directly off `parent`, which is
    /// then the STATEMENT root itself. Nested statements get their own
    /// STATEMENT node first. Returns the slot of that STATEMENT node.
    pub(crate) fn enumerate_statement(
        &mut self,
        statement: &mut Statement,
        parent: usize,
        root: bool,
    ) -> Result<usize, ParseError> {
        let parent = if root {
            parent
        } else {
            self.add_control_node(statement, TokenKind::Statement, Some(parent))?
        };

        let token = self.current()?;
        match token.kind {
            TokenKind::Control => self.enumerate_control(statement, parent)?,
            TokenKind::Identifier => self.enumerate_assignment(statement, parent)?,
            TokenKind::Keyword if token.is_keyword(Keyword::Print) => {
                self.enumerate_call(statement, parent)?
            }
            TokenKind::Keyword => self.enumerate_conditional(statement, parent)?,
            _ => return Err(self.error(ParseErrorKind::ExpectingStatement)),
        };

        Ok(parent)
    }

    /// `break` or `continue`, followed by `;`.
    fn enumerate_control(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.current()?.is(TokenKind::Control) {
            return Err(self.error(ParseErrorKind::ExpectingControl));
        }

        let slot = self.add_token_node(statement, parent)?;
        self.advance()?;
        self.consume_symbol(Punctuator::Terminator, ParseErrorKind::ExpectingTerminator)?;
        Ok(slot)
    }

    /// An assignment or a call through an identifier reference.
    ///
    /// The identifier chain and the ASSIGNMENT (or FUNCTION_CALL) node are
    /// siblings under `parent`.
    fn enumerate_assignment(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.current()?.is(TokenKind::Identifier) {
            return Err(self.error(ParseErrorKind::ExpectingIdentifier));
        }

        self.enumerate_identifier_reference(statement, parent)?;

        let token = self.current()?;
        let slot = if token.is_symbol(Punctuator::Assignment) {
            let slot = self.add_control_node(statement, TokenKind::Assignment, Some(parent))?;
            self.advance()?;
            self.enumerate_expression(statement, slot)?;
            slot
        } else if token.is_symbol(Punctuator::ParenthesisOpen) {
            let slot = self.add_control_node(statement, TokenKind::FunctionCall, Some(parent))?;
            self.advance()?;
            if !self.check_symbol(Punctuator::ParenthesisClose)? {
                self.enumerate_expression_list(statement, slot)?;
            }
            self.consume_symbol(
                Punctuator::ParenthesisClose,
                ParseErrorKind::ExpectingClosingParenthesis,
            )?;
            slot
        } else {
            return Err(self.error(ParseErrorKind::ExpectingAssignment));
        };

        self.consume_symbol(Punctuator::Terminator, ParseErrorKind::ExpectingTerminator)?;
        Ok(slot)
    }

    /// `print "(" expression ")" ";"`
    fn enumerate_call(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.check_keyword(Keyword::Print)? {
            return Err(self.error(ParseErrorKind::ExpectingGenericCall));
        }

        let slot = self.add_token_node(statement, parent)?;
        self.advance()?;
        self.consume_symbol(
            Punctuator::ParenthesisOpen,
            ParseErrorKind::ExpectingOpeningParenthesis,
        )?;
        self.enumerate_expression(statement, slot)?;
        self.consume_symbol(
            Punctuator::ParenthesisClose,
            ParseErrorKind::ExpectingClosingParenthesis,
        )?;
        self.consume_symbol(Punctuator::Terminator, ParseErrorKind::ExpectingTerminator)?;
        Ok(slot)
    }

    fn enumerate_conditional(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let token = self.current()?;
        if !token.is(TokenKind::Keyword) {
            return Err(self.error(ParseErrorKind::ExpectingKeyword));
        }

        if token.is_keyword(Keyword::If) {
            self.enumerate_conditional_if(statement, parent)
        } else if token.is_keyword(Keyword::While) {
            self.enumerate_conditional_while(statement, parent)
        } else {
            Err(self.error(ParseErrorKind::ExpectingConditionalStatement))
        }
    }

    /// ```text
    /// if_statement → "if" "(" conditional_list ")" "{" statement_list "}" else_clause*
    /// ```
    ///
    /// Else clauses, including the `if` of an `else if`, become siblings of
    /// the `if` node.
    fn enumerate_conditional_if(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.check_keyword(Keyword::If)? {
            return Err(self.error(ParseErrorKind::ExpectingIfConditional));
        }

        let slot = self.enumerate_conditional_block(statement, parent)?;
        while self.check_keyword(Keyword::Else)? {
            self.enumerate_conditional_else(statement, parent)?;
        }

        Ok(slot)
    }

    /// ```text
    /// else_clause → "else" ( if_statement | "{" statement_list "}" )
    /// ```
    ///
    /// Only a bare `else` gets a node. In `else if` the `else` is consumed
    /// and the inner `if` joins the chain under the same parent.
    fn enumerate_conditional_else(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.check_keyword(Keyword::Else)? {
            return Err(self.error(ParseErrorKind::ExpectingElseConditional));
        }

        let else_token = self.lexer.token_id();
        self.advance()?;

        if self.check_keyword(Keyword::If)? {
            return self.enumerate_conditional_if(statement, parent);
        }

        let slot = self.add_child_node(statement, else_token, parent)?;
        self.enumerate_block(statement, slot)?;
        Ok(slot)
    }

    /// `"while" "(" conditional_list ")" "{" statement_list "}"`
    fn enumerate_conditional_while(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if !self.check_keyword(Keyword::While)? {
            return Err(self.error(ParseErrorKind::ExpectingConditionalStatement));
        }

        self.enumerate_conditional_block(statement, parent)
    }

    /// The keyword node, its parenthesized condition and its braced body.
    fn enumerate_conditional_block(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let slot = self.add_token_node(statement, parent)?;
        self.advance()?;

        self.consume_symbol(
            Punctuator::ParenthesisOpen,
            ParseErrorKind::ExpectingOpeningParenthesis,
        )?;
        self.enumerate_conditional_list(statement, slot)?;
        self.consume_symbol(
            Punctuator::ParenthesisClose,
            ParseErrorKind::ExpectingClosingParenthesis,
        )?;
        self.enumerate_block(statement, slot)?;

        Ok(slot)
    }

    /// `"{" statement_list "}"` attached to `parent`.
    pub(crate) fn enumerate_block(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        self.consume_symbol(Punctuator::CurlyBraceOpen, ParseErrorKind::ExpectingOpeningBrace)?;
        let slot = self.enumerate_statement_list(statement, parent)?;
        self.consume_symbol(Punctuator::CurlyBraceClose, ParseErrorKind::ExpectingClosingBrace)?;
        Ok(slot)
    }

    /// ```text
    /// conditional_list → expression_compound ( operator expression_compound )*
    /// ```
    fn enumerate_conditional_list(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        if self.check_symbol(Punctuator::ParenthesisClose)? {
            return Err(self.error(ParseErrorKind::ExpectingConditionalExpression));
        }

        let slot = self.add_control_node(statement, TokenKind::ConditionalList, Some(parent))?;
        loop {
            self.enumerate_expression_compound(statement, slot)?;
            if !self.current()?.is(TokenKind::Operator) {
                break;
            }
            self.add_token_node(statement, slot)?;
            self.advance()?;
        }

        Ok(slot)
    }

    /// A STATEMENT_LIST node holding zero or more nested statements.
    pub(crate) fn enumerate_statement_list(
        &mut self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        let slot = self.add_control_node(statement, TokenKind::StatementList, Some(parent))?;
        while matches!(
            self.current()?.kind,
            TokenKind::Control | TokenKind::Identifier | TokenKind::Keyword
        ) {
            self.enumerate_statement(statement, slot, false)?;
        }

        Ok(slot)
    }
}
