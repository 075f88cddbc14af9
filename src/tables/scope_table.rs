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

use crate::error::ScopeError;
use crate::id::Id;
use crate::scope::Scope;
use crate::tables::{Entity, Table, TableFault};

/// Owns every scope; removing a scope frees all of its symbols.
pub type ScopeTable = Table<Scope>;

impl From<TableFault> for ScopeError {
    fn from(fault: TableFault) -> Self {
        match fault {
            TableFault::Uninitialized => Self::Uninitialized,
            TableFault::AlreadyExists(id) => Self::AlreadyExists(id),
            TableFault::NotFound(id) => Self::ScopeNotFound(id),
        }
    }
}

impl Entity for Scope {
    type Error = ScopeError;

    const LABEL: &'static str = "scopes";

    fn assign_id(&mut self, id: Id) {
        self.set_id(id);
    }

    fn render(&self, verbose: bool) -> String {
        format!("---\n{}", Scope::render(self, verbose))
    }

    fn release(&mut self) {
        self.clear();
    }
}

impl Table<Scope> {
    /// Mints and stores an empty scope.
    pub fn generate(&self) -> Result<Id, ScopeError> {
        self.create(Scope::new(self.registry().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdRegistry;
    use std::sync::Arc;

    #[test]
    fn symbols_live_and_die_with_their_scope() {
        let ids = Arc::new(IdRegistry::with_seed(9));
        let table = ScopeTable::new(ids.clone());
        table.initialize();

        let scope = table.generate().unwrap();
        let symbol = table
            .with_mut(scope, |scope| scope.add_integer("x", 3))
            .unwrap();

        let owner = table
            .with(scope, |scope| Ok(scope.symbol(symbol)?.scope()))
            .unwrap();
        assert_eq!(owner, scope);
        assert_eq!(ids.len(), Ok(2));

        table.remove(scope).unwrap();
        assert_eq!(ids.len(), Ok(0));
        assert_eq!(table.get(scope).unwrap_err(), ScopeError::ScopeNotFound(scope));
    }

    #[test]
    fn uninitialized_scope_table() {
        let ids = Arc::new(IdRegistry::with_seed(9));
        let table = ScopeTable::new(ids);
        assert_eq!(table.generate(), Err(ScopeError::Uninitialized));
    }
}
