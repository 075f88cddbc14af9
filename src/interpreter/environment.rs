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

use crate::error::{InterpreterError, ScopeError};
use crate::id::Id;
use crate::scope::Scope;
use crate::symbol::Symbol;
use crate::tables::ScopeTable;

/// The interpreter's stack of live scopes.
///
/// Scopes are stored in the scope table; the stack holds their ids,
/// innermost last. Name lookup walks from the innermost scope outwards,
/// the same way a child environment defers to its parent.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Arc<ScopeTable>,
    stack: Vec<Id>,
}

impl ScopeStack {
    pub fn new(scopes: Arc<ScopeTable>) -> Self {
        Self {
            scopes,
            stack: Vec::new(),
        }
    }

    pub fn table(&self) -> &Arc<ScopeTable> {
        &self.scopes
    }

    /// Creates a new innermost scope and returns its id.
    pub fn push(&mut self) -> Result<Id, ScopeError> {
        let id = self.scopes.generate()?;
        self.stack.push(id);
        tracing::trace!(scope = %id, depth = self.stack.len(), "scope pushed");
        Ok(id)
    }

    /// Removes the innermost scope, freeing its symbols.
    ///
    /// # Errors
    /// `NoScope` when the stack is empty.
    pub fn pop(&mut self) -> Result<Id, InterpreterError> {
        let id = self.stack.pop().ok_or(InterpreterError::NoScope)?;
        self.scopes.remove(id)?;
        tracing::trace!(scope = %id, depth = self.stack.len(), "scope popped");
        Ok(id)
    }

    /// Id of the innermost scope.
    pub fn current(&self) -> Result<Id, InterpreterError> {
        self.stack.last().copied().ok_or(InterpreterError::NoScope)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pops every scope.
    pub fn flush(&mut self) -> Result<(), InterpreterError> {
        while !self.stack.is_empty() {
            self.pop()?;
        }
        Ok(())
    }

    /// Finds the symbol bound to `key`, innermost scope first.
    ///
    /// Returns a copy of the symbol, or `None` when no live scope binds it.
    pub fn lookup(&self, key: &str) -> Result<Option<Symbol>, ScopeError> {
        for id in self.stack.iter().rev() {
            let found = self.scopes.with(*id, |scope| {
                if scope.has_symbol(key)? {
                    Ok(Some(scope.get_symbol(key)?.clone()))
                } else {
                    Ok(None)
                }
            })?;
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    /// Runs `f` against the innermost scope.
    pub fn with_current<R>(
        &self,
        f: impl FnOnce(&mut Scope) -> Result<R, ScopeError>,
    ) -> Result<R, InterpreterError> {
        let id = self.current()?;
        Ok(self.scopes.with_mut(id, f)?)
    }

    pub fn render(&self, verbose: bool) -> Result<String, InterpreterError> {
        let id = self.current()?;
        Ok(self.scopes.with(id, |scope| Ok(scope.render(verbose)))?)
    }
}

impl Drop for ScopeStack {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            tracing::trace!(%err, "scopes already released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdRegistry;

    fn stack() -> ScopeStack {
        let scopes = Arc::new(ScopeTable::new(Arc::new(IdRegistry::with_seed(41))));
        scopes.initialize();
        ScopeStack::new(scopes)
    }

    #[test]
    fn push_and_pop() {
        let mut stack = stack();
        let outer = stack.push().unwrap();
        let inner = stack.push().unwrap();
        assert_eq!(stack.current().unwrap(), inner);
        assert_eq!(stack.depth(), 2);

        assert_eq!(stack.pop().unwrap(), inner);
        assert_eq!(stack.current().unwrap(), outer);
        assert!(!stack.table().has(inner).unwrap());
    }

    #[test]
    fn pop_on_empty_stack_fails() {
        let mut stack = stack();
        assert_eq!(stack.pop().unwrap_err(), InterpreterError::NoScope);
        assert_eq!(stack.current().unwrap_err(), InterpreterError::NoScope);
    }

    #[test]
    fn lookup_prefers_the_innermost_binding() {
        let mut stack = stack();
        stack.push().unwrap();
        stack.with_current(|scope| scope.add_integer("x", 1)).unwrap();
        stack.with_current(|scope| scope.add_boolean("flag", true)).unwrap();
        stack.push().unwrap();
        stack.with_current(|scope| scope.add_integer("x", 2)).unwrap();

        let x = stack.lookup("x").unwrap().unwrap();
        assert_eq!(x.as_integer().unwrap(), 2);
        assert!(stack.lookup("flag").unwrap().unwrap().as_boolean().unwrap());
        assert!(stack.lookup("missing").unwrap().is_none());

        stack.pop().unwrap();
        assert_eq!(stack.lookup("x").unwrap().unwrap().as_integer().unwrap(), 1);
    }

    #[test]
    fn flush_empties_the_table() {
        let mut stack = stack();
        stack.push().unwrap();
        stack.push().unwrap();
        stack.flush().unwrap();
        assert!(stack.is_empty());
        assert!(stack.table().is_empty().unwrap());
    }
}
