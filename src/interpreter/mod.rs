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

//! The execution seam over the parser.
//!
//! `Interpreter` walks the parsed statements one at a time, classifies each
//! by the shape of its root, and hands it to an [`Evaluator`] together with
//! the live [`ScopeStack`].

pub mod environment;
pub mod evaluator;

use std::sync::Arc;

pub use environment::ScopeStack;
pub use evaluator::{Evaluator, StatementKind, TraceEvaluator};

use crate::error::{InterpreterError, ParseErrorKind};
use crate::id::Id;
use crate::parser::Parser;
use crate::source::Source;
use crate::tables::ScopeTable;

/// Steps a [`Parser`] statement by statement, dispatching into `E`.
pub struct Interpreter<E: Evaluator = TraceEvaluator> {
    parser: Parser,
    scopes: ScopeStack,
    evaluator: E,
}

impl<E: Evaluator> Interpreter<E> {
    /// Wraps `parser`, storing scopes in `scopes`.
    ///
    /// The interpreter starts with a single global scope.
    pub fn new(
        parser: Parser,
        scopes: Arc<ScopeTable>,
        evaluator: E,
    ) -> Result<Self, InterpreterError> {
        let mut interpreter = Self {
            parser,
            scopes: ScopeStack::new(scopes),
            evaluator,
        };
        interpreter.clear()?;
        Ok(interpreter)
    }

    /// Replaces the script and starts over.
    pub fn set(&mut self, source: &Source) -> Result<(), InterpreterError> {
        self.parser.set(source)?;
        self.clear()
    }

    /// Rewinds to the first statement and resets the scope stack to a fresh
    /// global scope. Parsed statements are kept.
    pub fn clear(&mut self) -> Result<(), InterpreterError> {
        self.parser.reset();
        self.flush_scopes()?;
        self.push_scope()?;
        Ok(())
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut E {
        &mut self.evaluator
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    pub fn push_scope(&mut self) -> Result<Id, InterpreterError> {
        Ok(self.scopes.push()?)
    }

    /// # Errors
    /// `NoScope` when no scope is live.
    pub fn pop_scope(&mut self) -> Result<Id, InterpreterError> {
        self.scopes.pop()
    }

    pub fn current_scope(&self) -> Result<Id, InterpreterError> {
        self.scopes.current()
    }

    pub fn flush_scopes(&mut self) -> Result<(), InterpreterError> {
        self.scopes.flush()
    }

    pub fn has_next_statement(&self) -> bool {
        self.parser.has_next_statement()
    }

    /// Evaluates the next statement and advances past it.
    ///
    /// Stepping from BEGIN first moves onto the first statement. Returns the
    /// category that was dispatched, or `None` when the script turned out
    /// to have no further statements. With `expect_next`, reaching END
    /// after the evaluated statement is an error.
    ///
    /// # Errors
    /// - `NoNextStatement` when already at END
    /// - classification errors from [`StatementKind::classify`]
    /// - parse errors of the statements being materialized
    pub fn step(&mut self, expect_next: bool) -> Result<Option<StatementKind>, InterpreterError> {
        if !self.parser.has_next_statement() {
            return Err(InterpreterError::NoNextStatement);
        }

        if !self.parser.has_previous_statement() {
            self.parser.move_next_statement(false)?;
        }

        if !self.parser.has_next_statement() {
            return Ok(None);
        }

        let statement = self.parser.view()?;
        let kind = StatementKind::classify(&statement)?;
        tracing::trace!(
            kind = kind.as_str(),
            position = self.parser.position(),
            "dispatching statement"
        );

        let scopes = &mut self.scopes;
        match kind {
            StatementKind::Control => self.evaluator.evaluate_control(&statement, scopes)?,
            StatementKind::Assignment => self.evaluator.evaluate_assignment(&statement, scopes)?,
            StatementKind::FunctionCall => {
                self.evaluator.evaluate_function_call(&statement, scopes)?
            }
            StatementKind::If => self.evaluator.evaluate_conditional_if(&statement, scopes)?,
            StatementKind::While => self.evaluator.evaluate_conditional_while(&statement, scopes)?,
            StatementKind::Print => self.evaluator.evaluate_print(&statement, scopes)?,
        }

        self.parser.move_next_statement(false)?;
        if expect_next && !self.parser.has_next_statement() {
            return Err(self.parser.error(ParseErrorKind::ExpectingNextStatement).into());
        }

        Ok(Some(kind))
    }

    /// Evaluates the whole script from the top, returning the number of
    /// statements dispatched.
    pub fn run(&mut self) -> Result<usize, InterpreterError> {
        self.clear()?;

        let mut count = 0;
        while self.parser.has_next_statement() {
            if self.step(false)?.is_some() {
                count += 1;
            }
        }

        tracing::debug!(statements = count, "run complete");
        Ok(count)
    }

    /// The current statement's tree followed by the innermost scope.
    pub fn render(&self, verbose: bool) -> Result<String, InterpreterError> {
        Ok(format!(
            "{}\n---\n{}",
            self.parser.render(verbose)?,
            self.scopes.render(verbose)?
        ))
    }
}
