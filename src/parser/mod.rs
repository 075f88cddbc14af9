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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Maintains the lazily grown statement list
pub mod parser;

/// Statement-level grammar:
/// - control, assignment and call statements
/// - if / else / while
/// - statement and conditional lists
mod statements;

/// Expression-level grammar:
/// - bitwise → shift → subtraction → addition → division → multiplication → primary
/// - strings, arrays, structs, functions
/// - identifier references and indexing
mod expressions;

/// Shared parser helpers:
/// - node construction and control tokens
/// - token matching and consumption
/// - error construction
mod helpers;

pub use parser::{Parser, SENTINEL_COUNT};
