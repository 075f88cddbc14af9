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

use crate::ast::StatementView;
use crate::error::InterpreterError;
use crate::lexer::keywords::Keyword;
use crate::lexer::token::{Subtype, TokenKind};

use super::environment::ScopeStack;

/// The category a statement is dispatched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementKind {
    Control,
    Assignment,
    FunctionCall,
    If,
    While,
    Print,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Assignment => "assignment",
            Self::FunctionCall => "function call",
            Self::If => "if",
            Self::While => "while",
            Self::Print => "print",
        }
    }

    /// Classifies a top-level statement by the token types of its root's
    /// children.
    ///
    /// - A CONTROL first child is a control statement.
    /// - An IDENTIFIER first child is an assignment or a call, decided by
    ///   the token type of the second child.
    /// - A KEYWORD first child must be `if`, `while` or `print`.
    ///
    /// # Errors
    /// - `ExpectingStatement` when the root is not a STATEMENT with children,
    ///   or the first child has any other type
    /// - `ExpectingAssignment` when an identifier is not followed by an
    ///   ASSIGNMENT or FUNCTION_CALL node
    /// - `ExpectingConditional` for any other keyword
    pub fn classify(view: &StatementView<'_>) -> Result<Self, InterpreterError> {
        let root = view.node(0)?;
        let root_token = view.token(0)?;
        if root.is_leaf() || !root_token.is(TokenKind::Statement) {
            return Err(InterpreterError::ExpectingStatement(root_token.render(false)));
        }

        let left = view.token(root.child(0)?)?;
        match left.kind {
            TokenKind::Control => Ok(Self::Control),
            TokenKind::Identifier => {
                let Some(&right_slot) = root.children().get(1) else {
                    return Err(InterpreterError::ExpectingAssignment(left.render(false)));
                };
                let right = view.token(right_slot)?;
                match right.kind {
                    TokenKind::Assignment => Ok(Self::Assignment),
                    TokenKind::FunctionCall => Ok(Self::FunctionCall),
                    _ => Err(InterpreterError::ExpectingAssignment(right.render(false))),
                }
            }
            TokenKind::Keyword => match left.subtype {
                Subtype::Keyword(Keyword::If) => Ok(Self::If),
                Subtype::Keyword(Keyword::While) => Ok(Self::While),
                Subtype::Keyword(Keyword::Print) => Ok(Self::Print),
                _ => Err(InterpreterError::ExpectingConditional(left.render(false))),
            },
            _ => Err(InterpreterError::ExpectingStatement(left.render(false))),
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Executes classified statements.
///
/// The interpreter classifies each statement and hands it to the matching
/// method together with the live scope stack. Every method defaults to
/// doing nothing, so an implementation only overrides the categories it
/// evaluates.
pub trait Evaluator {
    fn evaluate_control(
        &mut self,
        _statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        Ok(())
    }

    fn evaluate_assignment(
        &mut self,
        _statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        Ok(())
    }

    fn evaluate_function_call(
        &mut self,
        _statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        Ok(())
    }

    fn evaluate_conditional_if(
        &mut self,
        _statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        Ok(())
    }

    fn evaluate_conditional_while(
        &mut self,
        _statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        Ok(())
    }

    fn evaluate_print(
        &mut self,
        _statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        Ok(())
    }
}

/// An evaluator that records and logs each dispatched statement without
/// evaluating it.
#[derive(Debug, Default, Clone)]
pub struct TraceEvaluator {
    visited: Vec<StatementKind>,
}

impl TraceEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Categories dispatched so far, in order.
    pub fn visited(&self) -> &[StatementKind] {
        &self.visited
    }

    fn record(&mut self, kind: StatementKind, statement: &StatementView<'_>) {
        tracing::info!(
            kind = kind.as_str(),
            at = %statement.span(),
            nodes = statement.statement().len(),
            "statement"
        );
        self.visited.push(kind);
    }
}

impl Evaluator for TraceEvaluator {
    fn evaluate_control(
        &mut self,
        statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        self.record(StatementKind::Control, statement);
        Ok(())
    }

    fn evaluate_assignment(
        &mut self,
        statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        self.record(StatementKind::Assignment, statement);
        Ok(())
    }

    fn evaluate_function_call(
        &mut self,
        statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        self.record(StatementKind::FunctionCall, statement);
        Ok(())
    }

    fn evaluate_conditional_if(
        &mut self,
        statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        self.record(StatementKind::If, statement);
        Ok(())
    }

    fn evaluate_conditional_while(
        &mut self,
        statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        self.record(StatementKind::While, statement);
        Ok(())
    }

    fn evaluate_print(
        &mut self,
        statement: &StatementView<'_>,
        _scopes: &mut ScopeStack,
    ) -> Result<(), InterpreterError> {
        self.record(StatementKind::Print, statement);
        Ok(())
    }
}
