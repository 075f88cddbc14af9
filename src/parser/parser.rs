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

use crate::ast::{Statement, StatementView};
use crate::error::{ParseError, ParseErrorKind};
use crate::id::Id;
use crate::lexer::token::TokenKind;
use crate::lexer::Lexer;
use crate::source::Source;
use crate::tables::{NodeTable, TokenTable};

/// BEGIN and END bracket every statement list.
pub const SENTINEL_COUNT: usize = 2;

/// The core LUNA recursive-descent parser.
///
/// This structure maintains:
/// - The lexer it pulls tokens from
/// - The statement list: a BEGIN sentinel, every statement parsed so far,
///   and an END sentinel
/// - The logical position within that list
///
/// Statements are parsed lazily, one per call to
/// [`move_next_statement`](Self::move_next_statement), in the same way the
/// lexer materializes tokens. The grammar itself lives in the `statements`
/// and `expressions` modules via additional `impl Parser` blocks.
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) nodes: Arc<NodeTable>,

    /// Tokens minted to label interior nodes (STATEMENT, ASSIGNMENT, ...).
    pub(crate) control_tokens: Vec<Id>,

    statements: Vec<Statement>,
    position: usize,
}

impl Parser {
    /// Creates a parser over `source`.
    ///
    /// # Errors
    /// Fails when either table is uninitialized.
    pub fn new(
        source: &Source,
        tokens: Arc<TokenTable>,
        nodes: Arc<NodeTable>,
    ) -> Result<Self, ParseError> {
        let mut parser = Self {
            lexer: Lexer::new(source, tokens)?,
            nodes,
            control_tokens: Vec::new(),
            statements: Vec::new(),
            position: 0,
        };
        parser.clear()?;
        Ok(parser)
    }

    /// Replaces the input and starts over.
    pub fn set(&mut self, source: &Source) -> Result<(), ParseError> {
        self.release()?;
        self.lexer.set(source)?;
        self.clear()
    }

    /// Drops every parsed statement and rewinds the lexer, leaving only the
    /// BEGIN and END sentinel statements.
    pub fn clear(&mut self) -> Result<(), ParseError> {
        self.release()?;
        self.lexer.clear()?;

        let mut begin = Statement::new();
        self.add_node(&mut begin, self.lexer.begin_id(), None)?;
        let mut end = Statement::new();
        self.add_node(&mut end, self.lexer.end_id(), None)?;

        self.statements = vec![begin, end];
        self.position = 0;
        Ok(())
    }

    /// Removes every node and control token this parser created.
    ///
    /// Every removal is attempted; the first failure is reported afterwards.
    pub fn release(&mut self) -> Result<(), ParseError> {
        let mut failure = None;
        for statement in std::mem::take(&mut self.statements) {
            if let Err(err) = self.release_statement(&statement) {
                failure.get_or_insert(err);
            }
        }
        for id in std::mem::take(&mut self.control_tokens) {
            if let Err(err) = self.lexer.tokens().remove(id) {
                failure.get_or_insert(err.into());
            }
        }
        self.position = 0;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn release_statement(&self, statement: &Statement) -> Result<(), ParseError> {
        let mut failure = None;
        for id in statement.nodes() {
            if let Err(err) = self.nodes.remove(*id) {
                failure.get_or_insert(err);
            }
        }

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Moves the logical position back to BEGIN without discarding statements.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Parses every remaining statement, returning the statement count.
    pub fn discover(&mut self) -> Result<usize, ParseError> {
        self.reset();
        while self.has_next_statement() {
            self.move_next_statement(false)?;
        }
        Ok(self.len())
    }

    /// Number of parsed statements, sentinels excluded.
    pub fn len(&self) -> usize {
        self.statements.len().saturating_sub(SENTINEL_COUNT)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn nodes(&self) -> &Arc<NodeTable> {
        &self.nodes
    }

    pub fn tokens(&self) -> &Arc<TokenTable> {
        self.lexer.tokens()
    }

    /// The statement at the logical position.
    ///
    /// # Errors
    /// `InvalidStatementPosition` once the statements have been released.
    pub fn statement(&self) -> Result<&Statement, ParseError> {
        self.statement_at(self.position)
    }

    /// The statement at list `position` (0 is BEGIN).
    pub fn statement_at(&self, position: usize) -> Result<&Statement, ParseError> {
        self.statements.get(position).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::InvalidStatementPosition,
                format!("{}/{}", position, self.statements.len().saturating_sub(1)),
                self.lexer.token().map(|token| token.span).unwrap_or_default(),
            )
        })
    }

    /// Node and token access for the current statement.
    pub fn view(&self) -> Result<StatementView<'_>, ParseError> {
        Ok(StatementView::new(
            self.statement()?,
            &self.nodes,
            self.lexer.tokens(),
        ))
    }

    fn end_root(&self) -> Option<Id> {
        self.statements.last().and_then(Statement::root)
    }

    /// True until the logical position reaches the END statement.
    pub fn has_next_statement(&self) -> bool {
        self.statements
            .get(self.position)
            .and_then(Statement::root)
            != self.end_root()
    }

    pub fn has_previous_statement(&self) -> bool {
        self.position > 0
    }

    fn at_tail(&self) -> bool {
        self.position + SENTINEL_COUNT == self.statements.len()
    }

    /// Steps to the next statement, parsing it first when the position is
    /// on the last parsed statement and the lexer has tokens left.
    ///
    /// `expect` selects the error raised at END: `ExpectingNextStatement`
    /// when another statement is required, otherwise `NoNextStatement`.
    pub fn move_next_statement(&mut self, expect: bool) -> Result<&Statement, ParseError> {
        if !self.has_next_statement() {
            let kind = if expect {
                ParseErrorKind::ExpectingNextStatement
            } else {
                ParseErrorKind::NoNextStatement
            };
            return Err(self.error(kind));
        }

        if self.lexer.token_id() == self.lexer.begin_id() {
            self.lexer.move_next_token(false)?;
        }

        if self.lexer.has_next_token() && self.at_tail() {
            let statement = self.parse_statement()?;
            tracing::debug!(
                position = self.position + 1,
                nodes = statement.len(),
                "statement materialized"
            );
            self.statements.insert(self.position + 1, statement);
        }

        self.position += 1;
        self.statement_at(self.position)
    }

    pub fn move_previous_statement(&mut self, expect: bool) -> Result<&Statement, ParseError> {
        if !self.has_previous_statement() {
            let kind = if expect {
                ParseErrorKind::ExpectingPreviousStatement
            } else {
                ParseErrorKind::NoPreviousStatement
            };
            return Err(self.error(kind));
        }

        self.position -= 1;
        self.statement_at(self.position)
    }

    /// Parses one top-level statement under a fresh STATEMENT root.
    ///
    /// Nodes of a statement that fails to parse are released before the
    /// error propagates.
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let mut statement = Statement::new();
        let result = self
            .add_control_node(&mut statement, TokenKind::Statement, None)
            .and_then(|root| self.enumerate_statement(&mut statement, root, true));

        match result {
            Ok(_) => Ok(statement),
            Err(err) => {
                self.release_statement(&statement)?;
                Err(err)
            }
        }
    }

    /// Renders `statement` as a breadth-first tree dump.
    pub fn statement_as_string(
        &self,
        statement: &Statement,
        verbose: bool,
    ) -> Result<String, ParseError> {
        statement.render_tree(&self.nodes, self.lexer.tokens(), verbose)
    }

    /// Renders the current statement.
    pub fn render(&self, verbose: bool) -> Result<String, ParseError> {
        self.statement_as_string(self.statement()?, verbose)
    }
}

impl Drop for Parser {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::trace!(%err, "parser nodes already released");
        }
    }
}
