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

//! Values bound in a scope.

use std::collections::BTreeMap;

use crate::error::ScopeError;
use crate::id::Id;

/// The payload of a [`Symbol`].
///
/// Arrays and structures hold the ids of other symbols in the same scope
/// rather than embedding them, so nested values are shared, not copied.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolValue {
    Array(Vec<Id>),
    Boolean(bool),
    Float(f64),
    Function {
        parameters: Vec<String>,
        statements: Vec<Id>,
    },
    /// An alias for another name.
    Identifier(String),
    Integer(i64),
    LiteralString(String),
    Null,
    Structure(BTreeMap<String, Id>),
}

impl SymbolValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Array(_) => "ARRAY",
            Self::Boolean(_) => "BOOLEAN",
            Self::Float(_) => "FLOAT",
            Self::Function { .. } => "FUNCTION",
            Self::Identifier(_) => "IDENTIFIER",
            Self::Integer(_) => "INTEGER",
            Self::LiteralString(_) => "STRING",
            Self::Null => "NULL",
            Self::Structure(_) => "STRUCTURE",
        }
    }

    /// Ids of the symbols this value refers to.
    pub fn references(&self) -> Vec<Id> {
        match self {
            Self::Array(items) => items.clone(),
            Self::Structure(fields) => fields.values().copied().collect(),
            _ => Vec::new(),
        }
    }
}

/// A value owned by a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    id: Id,

    /// The scope that owns this symbol. Not an ownership edge.
    scope: Id,

    value: SymbolValue,
}

impl Symbol {
    pub(crate) fn new(id: Id, scope: Id, value: SymbolValue) -> Self {
        Self { id, scope, value }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn scope(&self) -> Id {
        self.scope
    }

    pub fn value(&self) -> &SymbolValue {
        &self.value
    }

    pub fn set_value(&mut self, value: SymbolValue) {
        self.value = value;
    }

    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    fn mismatch(&self, expected: &'static str) -> ScopeError {
        ScopeError::InvalidType {
            expected,
            found: self.type_name(),
        }
    }

    pub fn as_boolean(&self) -> Result<bool, ScopeError> {
        match self.value {
            SymbolValue::Boolean(value) => Ok(value),
            _ => Err(self.mismatch("BOOLEAN")),
        }
    }

    pub fn as_integer(&self) -> Result<i64, ScopeError> {
        match self.value {
            SymbolValue::Integer(value) => Ok(value),
            _ => Err(self.mismatch("INTEGER")),
        }
    }

    /// Numeric view of integers and floats.
    pub fn as_float(&self) -> Result<f64, ScopeError> {
        match self.value {
            SymbolValue::Float(value) => Ok(value),
            SymbolValue::Integer(value) => Ok(value as f64),
            _ => Err(self.mismatch("FLOAT")),
        }
    }

    pub fn as_str(&self) -> Result<&str, ScopeError> {
        match &self.value {
            SymbolValue::LiteralString(text) | SymbolValue::Identifier(text) => Ok(text),
            _ => Err(self.mismatch("STRING")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let scope = Id::from_parts(1, 0);
        let int = Symbol::new(Id::from_parts(2, 0), scope, SymbolValue::Integer(4));
        assert_eq!(int.as_integer(), Ok(4));
        assert_eq!(int.as_float(), Ok(4.0));
        assert_eq!(
            int.as_boolean(),
            Err(ScopeError::InvalidType {
                expected: "BOOLEAN",
                found: "INTEGER"
            })
        );

        let text = Symbol::new(
            Id::from_parts(3, 0),
            scope,
            SymbolValue::LiteralString("hi".into()),
        );
        assert_eq!(text.as_str(), Ok("hi"));
        assert_eq!(text.scope(), scope);
    }

    #[test]
    fn references_of_composites() {
        let a = Id::from_parts(1, 1);
        let b = Id::from_parts(1, 2);
        assert_eq!(SymbolValue::Array(vec![a, b]).references(), vec![a, b]);

        let fields = BTreeMap::from([("x".to_string(), a)]);
        assert_eq!(SymbolValue::Structure(fields).references(), vec![a]);
        assert!(SymbolValue::Null.references().is_empty());
    }
}
