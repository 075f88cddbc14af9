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
use crate::id::Id;
use crate::lexer::keywords::{Keyword, Punctuator};
use crate::lexer::token::{Subtype, Token, TokenKind};

use super::Parser;

impl Parser {
    /// Builds a syntax error located at the current token.
    ///
    /// The current token's rendering becomes the error detail, so a message
    /// reads like `expecting a terminator: [IDENTIFIER] "y" (main.luna(3))`.
    pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
        match self.lexer.token() {
            Ok(token) => ParseError::new(kind, token.render(false), token.span),
            Err(_) => ParseError::new(kind, "", Default::default()),
        }
    }

    /// The token under the lexer.
    pub(crate) fn current(&self) -> Result<Token, ParseError> {
        Ok(self.lexer.token()?)
    }

    /// Steps the lexer past the current token.
    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.lexer.move_next_token(true)?;
        Ok(())
    }

    pub(crate) fn check_symbol(&self, punct: Punctuator) -> Result<bool, ParseError> {
        Ok(self.current()?.is_symbol(punct))
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> Result<bool, ParseError> {
        Ok(self.current()?.is_keyword(keyword))
    }

    /// Requires the current token to be `punct`, then steps past it.
    ///
    /// # Errors
    /// Raises `kind` when the current token is anything else.
    pub(crate) fn consume_symbol(
        &mut self,
        punct: Punctuator,
        kind: ParseErrorKind,
    ) -> Result<(), ParseError> {
        if !self.check_symbol(punct)? {
            return Err(self.error(kind));
        }
        self.advance()
    }

    /// Appends a node for `token` to `statement`.
    ///
    /// With a parent, the new slot is also recorded in the parent's child
    /// list. Returns the new node's slot.
    ///
    /// # Errors
    /// `InvalidParentStatementPosition` when `parent` is not a slot of
    /// `statement`.
    pub(crate) fn add_node(
        &self,
        statement: &mut Statement,
        token: Id,
        parent: Option<usize>,
    ) -> Result<usize, ParseError> {
        let parent_id = match parent {
            Some(slot) => Some(statement.node(slot).ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::InvalidParentStatementPosition,
                    format!("{}/{}", slot, statement.len()),
                    Default::default(),
                )
            })?),
            None => None,
        };

        let id = self.nodes.generate(token, parent)?;
        let slot = statement.push(id);

        if let Some(parent_id) = parent_id {
            self.nodes.with_mut(parent_id, |node| {
                node.add_child(slot);
                Ok(())
            })?;
        }

        Ok(slot)
    }

    pub(crate) fn add_child_node(
        &self,
        statement: &mut Statement,
        token: Id,
        parent: usize,
    ) -> Result<usize, ParseError> {
        self.add_node(statement, token, Some(parent))
    }

    /// Adds the current token as a child of `parent`.
    pub(crate) fn add_token_node(
        &self,
        statement: &mut Statement,
        parent: usize,
    ) -> Result<usize, ParseError> {
        self.add_child_node(statement, self.lexer.token_id(), parent)
    }

    /// Mints a control token of `kind` and adds a node for it.
    ///
    /// Control tokens borrow the current token's location and are released
    /// together with the parser's nodes.
    pub(crate) fn add_control_node(
        &mut self,
        statement: &mut Statement,
        kind: TokenKind,
        parent: Option<usize>,
    ) -> Result<usize, ParseError> {
        let anchor = self.current()?;
        let token = Token::new(kind, Subtype::Invalid).located(anchor.source, anchor.span);
        let id = self.lexer.tokens().create(token)?;
        self.control_tokens.push(id);
        self.add_node(statement, id, parent)
    }
}
