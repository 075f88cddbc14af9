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

//! Id-keyed storage for tokens, nodes and scopes.
//!
//! All three tables share one shape: a mutex-guarded map from [`Id`] to
//! entity that must be initialized before use. A table owns the registry
//! reference of every id it stores, so dropping an entry (through
//! `remove`, `clear` or `destroy`) also unregisters its id.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::IdError;
use crate::id::{Id, IdRegistry};

pub mod node_table;
pub mod scope_table;
pub mod token_table;

pub use node_table::NodeTable;
pub use scope_table::ScopeTable;
pub use token_table::TokenTable;

/// Storage-level failures, translated into each table's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFault {
    Uninitialized,
    AlreadyExists(Id),
    NotFound(Id),
}

/// Something a [`Table`] can hold.
pub trait Entity: Clone {
    /// The component error this table reports.
    type Error: From<TableFault> + From<IdError>;

    /// Table name used in dumps and log events.
    const LABEL: &'static str;

    /// Records the id the entity is stored under.
    fn assign_id(&mut self, id: Id);

    fn render(&self, verbose: bool) -> String;

    /// Frees anything the entity owns before it leaves the table.
    fn release(&mut self) {}
}

#[derive(Debug)]
struct Store<T> {
    initialized: bool,
    entries: BTreeMap<Id, T>,
}

impl<T> Store<T> {
    fn check(&self) -> Result<(), TableFault> {
        if self.initialized {
            Ok(())
        } else {
            Err(TableFault::Uninitialized)
        }
    }
}

/// A shared, independently lockable id → entity map.
#[derive(Debug)]
pub struct Table<T: Entity> {
    ids: Arc<IdRegistry>,
    store: Mutex<Store<T>>,
}

impl<T: Entity> Table<T> {
    /// Creates an uninitialized table minting ids from `ids`.
    pub fn new(ids: Arc<IdRegistry>) -> Self {
        Self {
            ids,
            store: Mutex::new(Store {
                initialized: false,
                entries: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store<T>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The registry this table mints ids from.
    pub fn registry(&self) -> &Arc<IdRegistry> {
        &self.ids
    }

    /// Releases the registry reference held by each dropped entry.
    ///
    /// A registry that has been reinitialized underneath the table no longer
    /// knows these ids; that is not an error for the table.
    fn release_all(&self, entries: BTreeMap<Id, T>) {
        for (id, mut entity) in entries {
            entity.release();
            if let Err(err) = self.ids.unregister(id) {
                tracing::trace!(table = T::LABEL, %id, %err, "id already released");
            }
        }
    }

    /// Marks the table ready for use, dropping anything it held before.
    pub fn initialize(&self) {
        let previous = {
            let mut store = self.lock();
            store.initialized = true;
            std::mem::take(&mut store.entries)
        };
        self.release_all(previous);
        tracing::debug!(table = T::LABEL, "table initialized");
    }

    /// Drops every entry and returns the table to the uninitialized state.
    pub fn destroy(&self) {
        let previous = {
            let mut store = self.lock();
            store.initialized = false;
            std::mem::take(&mut store.entries)
        };
        self.release_all(previous);
        tracing::debug!(table = T::LABEL, "table destroyed");
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    /// Stores `entity` under a freshly minted id and returns that id.
    pub fn create(&self, mut entity: T) -> Result<Id, T::Error> {
        self.lock().check()?;

        let id = self.ids.generate(true)?;
        entity.assign_id(id);
        if let Err(err) = self.add(id, entity) {
            self.ids.unregister(id)?;
            return Err(err);
        }
        Ok(id)
    }

    /// Stores `entity` under `id`.
    ///
    /// `id` must already be registered; the caller's reference passes to the
    /// table. On failure the reference stays with the caller.
    pub fn add(&self, id: Id, mut entity: T) -> Result<(), T::Error> {
        let mut store = self.lock();
        store.check()?;

        if store.entries.contains_key(&id) {
            return Err(TableFault::AlreadyExists(id).into());
        }
        entity.assign_id(id);
        store.entries.insert(id, entity);
        Ok(())
    }

    /// Returns a copy of the entity stored under `id`.
    pub fn get(&self, id: Id) -> Result<T, T::Error> {
        self.with(id, |entity| Ok(entity.clone()))
    }

    /// Runs `f` against the entity stored under `id`.
    pub fn with<R>(
        &self,
        id: Id,
        f: impl FnOnce(&T) -> Result<R, T::Error>,
    ) -> Result<R, T::Error> {
        let store = self.lock();
        store.check()?;
        let entity = store.entries.get(&id).ok_or(TableFault::NotFound(id))?;
        f(entity)
    }

    /// Runs `f` against a mutable borrow of the entity stored under `id`.
    pub fn with_mut<R>(
        &self,
        id: Id,
        f: impl FnOnce(&mut T) -> Result<R, T::Error>,
    ) -> Result<R, T::Error> {
        let mut store = self.lock();
        store.check()?;
        let entity = store
            .entries
            .get_mut(&id)
            .ok_or(TableFault::NotFound(id))?;
        f(entity)
    }

    pub fn has(&self, id: Id) -> Result<bool, T::Error> {
        let store = self.lock();
        store.check()?;
        Ok(store.entries.contains_key(&id))
    }

    /// Removes and returns the entity stored under `id`, releasing its id.
    pub fn remove(&self, id: Id) -> Result<T, T::Error> {
        let mut entity = {
            let mut store = self.lock();
            store.check()?;
            store
                .entries
                .remove(&id)
                .ok_or(TableFault::NotFound(id))?
        };
        entity.release();
        self.ids.unregister(id)?;
        Ok(entity)
    }

    pub fn len(&self) -> Result<usize, T::Error> {
        let store = self.lock();
        store.check()?;
        Ok(store.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, T::Error> {
        Ok(self.len()? == 0)
    }

    /// Removes every entry, releasing their ids.
    pub fn clear(&self) -> Result<(), T::Error> {
        let previous = {
            let mut store = self.lock();
            store.check()?;
            std::mem::take(&mut store.entries)
        };
        self.release_all(previous);
        Ok(())
    }

    /// Renders the table: an entry count, then one entity per line.
    pub fn render(&self, verbose: bool) -> Result<String, T::Error> {
        let store = self.lock();
        store.check()?;

        let mut out = format!("{} entries: {}", T::LABEL, store.entries.len());
        for entity in store.entries.values() {
            out.push('\n');
            out.push_str(&entity.render(verbose));
        }
        Ok(out)
    }
}
