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

//! Wiring for a LUNA session.
//!
//! A [`Context`] owns the id registry and the three tables, and hands
//! shared handles to every lexer, parser and interpreter it builds. All
//! components built from one context share ids and storage.

use std::sync::Arc;

use crate::config::LunaConfig;
use crate::error::{InterpreterError, LexError, LunaError, ParseError};
use crate::id::IdRegistry;
use crate::interpreter::{Evaluator, Interpreter};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::source::Source;
use crate::tables::{NodeTable, ScopeTable, TokenTable};

#[derive(Debug)]
pub struct Context {
    ids: Arc<IdRegistry>,
    tokens: Arc<TokenTable>,
    nodes: Arc<NodeTable>,
    scopes: Arc<ScopeTable>,
}

impl Context {
    /// Builds an initialized context seeded from `config`.
    pub fn new(config: &LunaConfig) -> Self {
        Self::with_seed(config.resolved_seed())
    }

    pub fn with_seed(seed: u64) -> Self {
        let ids = Arc::new(IdRegistry::with_seed(seed));
        let context = Self {
            tokens: Arc::new(TokenTable::new(ids.clone())),
            nodes: Arc::new(NodeTable::new(ids.clone())),
            scopes: Arc::new(ScopeTable::new(ids.clone())),
            ids,
        };
        context.initialize(seed);
        context
    }

    /// Reseeds the registry and empties every table.
    pub fn initialize(&self, seed: u64) {
        self.tokens.destroy();
        self.nodes.destroy();
        self.scopes.destroy();
        self.ids.initialize(seed);
        self.tokens.initialize();
        self.nodes.initialize();
        self.scopes.initialize();
        tracing::debug!(seed, "context initialized");
    }

    /// Tears down every table and the registry.
    pub fn destroy(&self) {
        self.tokens.destroy();
        self.nodes.destroy();
        self.scopes.destroy();
        self.ids.destroy();
        tracing::debug!("context destroyed");
    }

    pub fn is_initialized(&self) -> bool {
        self.ids.is_initialized()
            && self.tokens.is_initialized()
            && self.nodes.is_initialized()
            && self.scopes.is_initialized()
    }

    pub fn ids(&self) -> &Arc<IdRegistry> {
        &self.ids
    }

    pub fn tokens(&self) -> &Arc<TokenTable> {
        &self.tokens
    }

    pub fn nodes(&self) -> &Arc<NodeTable> {
        &self.nodes
    }

    pub fn scopes(&self) -> &Arc<ScopeTable> {
        &self.scopes
    }

    pub fn lexer(&self, source: &Source) -> Result<Lexer, LexError> {
        Lexer::new(source, self.tokens.clone())
    }

    pub fn parser(&self, source: &Source) -> Result<Parser, ParseError> {
        Parser::new(source, self.tokens.clone(), self.nodes.clone())
    }

    pub fn interpreter<E: Evaluator>(
        &self,
        source: &Source,
        evaluator: E,
    ) -> Result<Interpreter<E>, InterpreterError> {
        Interpreter::new(self.parser(source)?, self.scopes.clone(), evaluator)
    }

    /// Dumps the registry and all three tables.
    pub fn render(&self, verbose: bool) -> Result<String, LunaError> {
        Ok([
            self.ids.render(verbose)?,
            self.tokens.render(verbose)?,
            self.nodes.render(verbose)?,
            self.scopes.render(verbose)?,
        ]
        .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TraceLevel;
    use crate::interpreter::TraceEvaluator;

    #[test]
    fn components_share_storage() {
        let context = Context::with_seed(3);
        let mut parser = context.parser(&Source::from_text("x = 1;")).unwrap();
        parser.discover().unwrap();

        assert!(!context.tokens().is_empty().unwrap());
        assert!(!context.nodes().is_empty().unwrap());
        assert_eq!(
            context.ids().len().unwrap(),
            context.tokens().len().unwrap() + context.nodes().len().unwrap()
        );
    }

    #[test]
    fn dropping_components_leaves_empty_tables() {
        let context = Context::with_seed(3);
        {
            let mut interpreter = context
                .interpreter(&Source::from_text("print(1);"), TraceEvaluator::new())
                .unwrap();
            interpreter.run().unwrap();
        }
        assert!(context.tokens().is_empty().unwrap());
        assert!(context.nodes().is_empty().unwrap());
        assert!(context.scopes().is_empty().unwrap());
        assert!(context.ids().is_empty().unwrap());
    }

    #[test]
    fn config_seed_is_used() {
        let config = LunaConfig {
            seed: Some(11),
            trace: TraceLevel::Error,
        };
        let first = Context::new(&config);
        let second = Context::new(&config);
        let a = first.lexer(&Source::from_text("")).unwrap().begin_id();
        let b = second.lexer(&Source::from_text("")).unwrap().begin_id();
        assert_eq!(a, b);
    }

    #[test]
    fn destroy_uninitializes() {
        let context = Context::with_seed(1);
        assert!(context.is_initialized());
        context.destroy();
        assert!(!context.is_initialized());
        assert!(context.lexer(&Source::from_text("")).is_err());
    }

    #[test]
    fn render_lists_every_table() {
        let context = Context::with_seed(1);
        let text = context.render(false).unwrap();
        assert!(text.contains("tokens entries: 0"));
        assert!(text.contains("nodes entries: 0"));
        assert!(text.contains("scopes entries: 0"));
    }
}
