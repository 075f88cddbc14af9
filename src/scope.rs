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

//! Symbol namespaces.
//!
//! A [`Scope`] binds string keys to symbols it owns. Symbols are also
//! addressable by id, which is how arrays, structures and aliasing keys
//! refer to them.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ScopeError;
use crate::id::{Id, IdRegistry};
use crate::symbol::{Symbol, SymbolValue};

/// Nesting limit when rendering composite symbols.
const RENDER_DEPTH: usize = 32;

#[derive(Debug, Clone)]
pub struct Scope {
    id: Id,
    ids: Arc<IdRegistry>,

    /// Name → symbol id.
    keys: BTreeMap<String, Id>,

    /// Symbol id → owned symbol.
    symbols: BTreeMap<Id, Symbol>,
}

impl Scope {
    pub fn new(ids: Arc<IdRegistry>) -> Self {
        Self {
            id: Id::NIL,
            ids,
            keys: BTreeMap::new(),
            symbols: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: Id) {
        self.id = id;
        for symbol in self.symbols.values_mut() {
            *symbol = Symbol::new(symbol.id(), id, symbol.value().clone());
        }
    }

    fn check_key(key: &str) -> Result<(), ScopeError> {
        if key.is_empty() {
            Err(ScopeError::InvalidKey(key.to_string()))
        } else {
            Ok(())
        }
    }

    /// Stores `value` under a fresh id without binding a key.
    pub fn add_unnamed(&mut self, value: SymbolValue) -> Result<Id, ScopeError> {
        let id = self.ids.generate(true)?;
        self.symbols.insert(id, Symbol::new(id, self.id, value));
        Ok(id)
    }

    /// Stores `value` and binds it to `key`, returning the new symbol's id.
    ///
    /// # Errors
    /// - `InvalidKey` for an empty key
    /// - `KeyAlreadyExists` when `key` is already bound
    pub fn add_symbol(&mut self, key: &str, value: SymbolValue) -> Result<Id, ScopeError> {
        Self::check_key(key)?;
        if self.keys.contains_key(key) {
            return Err(ScopeError::KeyAlreadyExists(key.to_string()));
        }

        let id = self.add_unnamed(value)?;
        self.keys.insert(key.to_string(), id);
        tracing::trace!(scope = %self.id, key, %id, "symbol added");
        Ok(id)
    }

    pub fn add_array(&mut self, key: &str, items: Vec<Id>) -> Result<Id, ScopeError> {
        self.add_symbol(key, SymbolValue::Array(items))
    }

    pub fn add_boolean(&mut self, key: &str, value: bool) -> Result<Id, ScopeError> {
        self.add_symbol(key, SymbolValue::Boolean(value))
    }

    pub fn add_float(&mut self, key: &str, value: f64) -> Result<Id, ScopeError> {
        self.add_symbol(key, SymbolValue::Float(value))
    }

    pub fn add_function(
        &mut self,
        key: &str,
        parameters: Vec<String>,
        statements: Vec<Id>,
    ) -> Result<Id, ScopeError> {
        self.add_symbol(
            key,
            SymbolValue::Function {
                parameters,
                statements,
            },
        )
    }

    pub fn add_identifier(&mut self, key: &str, alias: &str) -> Result<Id, ScopeError> {
        self.add_symbol(key, SymbolValue::Identifier(alias.to_string()))
    }

    pub fn add_integer(&mut self, key: &str, value: i64) -> Result<Id, ScopeError> {
        self.add_symbol(key, SymbolValue::Integer(value))
    }

    pub fn add_literal_string(&mut self, key: &str, text: &str) -> Result<Id, ScopeError> {
        self.add_symbol(key, SymbolValue::LiteralString(text.to_string()))
    }

    pub fn add_null(&mut self, key: &str) -> Result<Id, ScopeError> {
        self.add_symbol(key, SymbolValue::Null)
    }

    pub fn add_structure(
        &mut self,
        key: &str,
        fields: BTreeMap<String, Id>,
    ) -> Result<Id, ScopeError> {
        self.add_symbol(key, SymbolValue::Structure(fields))
    }

    /// Whether `key` is bound. Empty keys are rejected rather than reported
    /// as absent.
    pub fn has_symbol(&self, key: &str) -> Result<bool, ScopeError> {
        Self::check_key(key)?;
        Ok(self.keys.contains_key(key))
    }

    /// The id bound to `key`.
    pub fn symbol_id(&self, key: &str) -> Result<Id, ScopeError> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| ScopeError::KeyNotFound(key.to_string()))
    }

    pub fn symbol(&self, id: Id) -> Result<&Symbol, ScopeError> {
        self.symbols.get(&id).ok_or(ScopeError::SymbolNotFound(id))
    }

    pub fn symbol_mut(&mut self, id: Id) -> Result<&mut Symbol, ScopeError> {
        self.symbols
            .get_mut(&id)
            .ok_or(ScopeError::SymbolNotFound(id))
    }

    /// The symbol bound to `key`.
    pub fn get_symbol(&self, key: &str) -> Result<&Symbol, ScopeError> {
        self.symbol(self.symbol_id(key)?)
    }

    /// Rebinds an existing `key` to the symbol `id`.
    ///
    /// The previously bound symbol stays owned by the scope and remains
    /// reachable by id.
    pub fn set_symbol(&mut self, key: &str, id: Id) -> Result<(), ScopeError> {
        if !self.symbols.contains_key(&id) {
            return Err(ScopeError::SymbolNotFound(id));
        }
        let slot = self
            .keys
            .get_mut(key)
            .ok_or_else(|| ScopeError::KeyNotFound(key.to_string()))?;
        *slot = id;
        Ok(())
    }

    /// Frees the symbol `id` and every key bound to it.
    pub fn remove_symbol(&mut self, id: Id) -> Result<Symbol, ScopeError> {
        let symbol = self
            .symbols
            .remove(&id)
            .ok_or(ScopeError::SymbolNotFound(id))?;
        self.keys.retain(|_, bound| *bound != id);
        self.ids.unregister(id)?;
        Ok(symbol)
    }

    /// Unbinds `key` and frees the symbol it was bound to.
    pub fn remove_key(&mut self, key: &str) -> Result<Symbol, ScopeError> {
        let id = self.symbol_id(key)?;
        self.remove_symbol(id)
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of owned symbols, bound or not.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Frees every symbol.
    pub fn clear(&mut self) {
        self.keys.clear();
        for id in std::mem::take(&mut self.symbols).into_keys() {
            if let Err(err) = self.ids.unregister(id) {
                tracing::trace!(scope = %self.id, %id, %err, "symbol id already released");
            }
        }
    }

    /// Renders the symbol `id`, following array and structure members.
    pub fn symbol_as_string(&self, id: Id) -> Result<String, ScopeError> {
        let symbol = self.symbol(id)?;
        Ok(self.render_value(symbol.value(), 0))
    }

    fn render_member(&self, id: Id, depth: usize) -> String {
        match self.symbols.get(&id) {
            Some(symbol) if depth < RENDER_DEPTH => self.render_value(symbol.value(), depth + 1),
            _ => id.to_string(),
        }
    }

    fn render_value(&self, value: &SymbolValue, depth: usize) -> String {
        match value {
            SymbolValue::Array(items) => {
                let members: Vec<String> = items
                    .iter()
                    .map(|item| self.render_member(*item, depth))
                    .collect();
                format!("ARRAY [{}] {{{}}}", items.len(), members.join(", "))
            }
            SymbolValue::Boolean(value) => format!("BOOLEAN {value}"),
            SymbolValue::Float(value) => format!("FLOAT {value}"),
            SymbolValue::Function {
                parameters,
                statements,
            } => format!(
                "FUNCTION ({}) [{}]",
                parameters.join(", "),
                statements.len()
            ),
            SymbolValue::Identifier(alias) => format!("IDENTIFIER -> {alias}"),
            SymbolValue::Integer(value) => format!("INTEGER {value}"),
            SymbolValue::LiteralString(text) => {
                format!("STRING \"{}\" ({})", text, text.chars().count())
            }
            SymbolValue::Null => "NULL".to_string(),
            SymbolValue::Structure(fields) => {
                let members: Vec<String> = fields
                    .iter()
                    .map(|(name, id)| format!("{}: {}", name, self.render_member(*id, depth)))
                    .collect();
                format!("STRUCTURE [{}] {{{}}}", fields.len(), members.join(", "))
            }
        }
    }

    pub fn render(&self, verbose: bool) -> String {
        let mut out = String::new();
        if verbose {
            out.push_str(&format!("{} ", self.id));
        }
        out.push_str(&format!("Entries: {}", self.keys.len()));

        if verbose {
            for (index, (key, id)) in self.keys.iter().enumerate() {
                let shown = self
                    .symbol_as_string(*id)
                    .unwrap_or_else(|_| id.to_string());
                out.push_str(&format!(
                    "\n--- [{}/{}] '{}' {}",
                    index,
                    self.keys.len(),
                    key,
                    shown
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> (Arc<IdRegistry>, Scope) {
        let ids = Arc::new(IdRegistry::with_seed(21));
        let scope = Scope::new(ids.clone());
        (ids, scope)
    }

    #[test]
    fn add_and_lookup() {
        let (_ids, mut scope) = scope();
        let id = scope.add_integer("x", 5).unwrap();

        assert_eq!(scope.has_symbol("x"), Ok(true));
        assert_eq!(scope.symbol_id("x"), Ok(id));
        assert_eq!(scope.get_symbol("x").unwrap().as_integer(), Ok(5));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn key_validation() {
        let (_ids, mut scope) = scope();
        scope.add_null("n").unwrap();

        assert_eq!(
            scope.add_boolean("n", true),
            Err(ScopeError::KeyAlreadyExists("n".into()))
        );
        assert_eq!(
            scope.add_float("", 1.0),
            Err(ScopeError::InvalidKey(String::new()))
        );
        assert_eq!(scope.has_symbol(""), Err(ScopeError::InvalidKey(String::new())));
        assert_eq!(
            scope.symbol_id("missing"),
            Err(ScopeError::KeyNotFound("missing".into()))
        );
    }

    #[test]
    fn removal_by_key_frees_the_symbol() {
        let (ids, mut scope) = scope();
        let id = scope.add_literal_string("s", "abc").unwrap();
        assert_eq!(ids.contains(id), Ok(true));

        scope.remove_key("s").unwrap();
        assert_eq!(scope.has_symbol("s"), Ok(false));
        assert_eq!(scope.symbol(id), Err(ScopeError::SymbolNotFound(id)));
        assert_eq!(ids.contains(id), Ok(false));
    }

    #[test]
    fn removal_by_id_unbinds_every_alias() {
        let (_ids, mut scope) = scope();
        let id = scope.add_integer("a", 1).unwrap();
        let other = scope.add_integer("b", 2).unwrap();
        scope.set_symbol("b", id).unwrap();

        scope.remove_symbol(id).unwrap();
        assert_eq!(scope.len(), 0);
        assert!(scope.symbol(other).is_ok());
    }

    #[test]
    fn set_symbol_requires_both_sides() {
        let (_ids, mut scope) = scope();
        let id = scope.add_integer("a", 1).unwrap();
        let ghost = Id::from_parts(4, 4);

        assert_eq!(
            scope.set_symbol("a", ghost),
            Err(ScopeError::SymbolNotFound(ghost))
        );
        assert_eq!(
            scope.set_symbol("z", id),
            Err(ScopeError::KeyNotFound("z".into()))
        );
    }

    #[test]
    fn composite_rendering_follows_members() {
        let (_ids, mut scope) = scope();
        let one = scope.add_integer("one", 1).unwrap();
        let name = scope.add_literal_string("name", "luna").unwrap();
        let list = scope.add_array("list", vec![one, name]).unwrap();
        let record = scope
            .add_structure("record", BTreeMap::from([("items".to_string(), list)]))
            .unwrap();

        assert_eq!(
            scope.symbol_as_string(record).unwrap(),
            "STRUCTURE [1] {items: ARRAY [2] {INTEGER 1, STRING \"luna\" (4)}}"
        );

        let funct = scope
            .add_function("f", vec!["a".into(), "b".into()], Vec::new())
            .unwrap();
        assert_eq!(scope.symbol_as_string(funct).unwrap(), "FUNCTION (a, b) [0]");
    }

    #[test]
    fn clear_releases_all_ids() {
        let (ids, mut scope) = scope();
        scope.add_integer("a", 1).unwrap();
        scope.add_unnamed(SymbolValue::Null).unwrap();
        assert_eq!(ids.len(), Ok(2));

        scope.clear();
        assert_eq!(scope.symbol_count(), 0);
        assert_eq!(ids.len(), Ok(0));
    }
}
