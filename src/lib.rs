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

//! LUNA scripting language front end.
//!
//! The pipeline runs:
//!
//! ```text
//! Source → CharCursor → Lexer → Parser → Statement trees → Interpreter
//! ```
//!
//! Tokens, nodes and scopes live in shared tables keyed by 128-bit ids
//! from an [`IdRegistry`](id::IdRegistry). A [`Context`](context::Context)
//! builds the tables and hands them to each stage. Both the lexer and the
//! parser materialize their output lazily, one token or statement at a
//! time.

pub mod ast;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod id;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod source;
pub mod span;
pub mod symbol;
pub mod tables;

pub use config::{LunaConfig, TraceLevel};
pub use context::Context;
pub use diagnostics::DiagnosticPrinter;
pub use error::LunaError;
pub use id::{Id, IdRegistry};
pub use interpreter::{Evaluator, Interpreter, StatementKind, TraceEvaluator};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use source::Source;
pub use span::Span;
