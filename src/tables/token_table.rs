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

use crate::error::TokenError;
use crate::id::Id;
use crate::lexer::token::{Subtype, Token, TokenKind};
use crate::tables::{Entity, Table, TableFault};

/// Owns every token produced by lexers and parsers.
pub type TokenTable = Table<Token>;

impl From<TableFault> for TokenError {
    fn from(fault: TableFault) -> Self {
        match fault {
            TableFault::Uninitialized => Self::Uninitialized,
            TableFault::AlreadyExists(id) => Self::AlreadyExists(id),
            TableFault::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl Entity for Token {
    type Error = TokenError;

    const LABEL: &'static str = "tokens";

    fn assign_id(&mut self, id: Id) {
        self.id = id;
    }

    fn render(&self, verbose: bool) -> String {
        Token::render(self, verbose)
    }
}

impl Table<Token> {
    /// Mints and stores a bare token of `kind`/`subtype`.
    pub fn generate(&self, kind: TokenKind, subtype: Subtype) -> Result<Id, TokenError> {
        self.create(Token::new(kind, subtype))
    }
}
