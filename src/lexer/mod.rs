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

/// Character classification and the bidirectional source cursor.
pub mod cursor;

/// Closed lexeme tables:
/// - reserved words (keywords, control words, booleans, null)
/// - operator and punctuation spellings
/// - scalar radices
pub mod keywords;

/// The lazy, table-backed lexer.
pub mod lexer;

/// Token kinds, subtypes and the `Token` record.
pub mod token;

pub use cursor::{CharClass, CharCursor};
pub use lexer::Lexer;
pub use token::{Subtype, Token, TokenKind};
