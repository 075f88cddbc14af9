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

//! 128-bit identifiers and the reference-counting registry that mints them.
//!
//! Tokens, nodes, scopes and symbols are all addressed by [`Id`]. The
//! [`IdRegistry`] hands out fresh ids from a seeded PRNG and tracks how
//! many holders currently reference each one.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::IdError;

/// A 128-bit identifier stored as two 64-bit halves.
///
/// Ordering compares the first half, then the second, so two distinct ids
/// never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Id {
    high: u64,
    low: u64,
}

impl Id {
    /// The all-zero id. Never produced by a registry generator in practice,
    /// used as the placeholder for entities not yet stored.
    pub const NIL: Id = Id { high: 0, low: 0 };

    pub const fn from_parts(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    pub fn high(&self) -> u64 {
        self.high
    }

    pub fn low(&self) -> u64 {
        self.low
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }
}

impl fmt::Display for Id {
    /// Renders as `{xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{:08x}-{:04x}-{:04x}-{:04x}-{:04x}{:08x}}}",
            (self.high >> 32) as u32,
            (self.high >> 16) as u16,
            self.high as u16,
            (self.low >> 48) as u16,
            (self.low >> 32) as u16,
            self.low as u32
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    references: usize,
    unique: bool,
}

#[derive(Debug)]
struct RegistryState {
    seed: u64,
    rng: Option<StdRng>,
    entries: BTreeMap<Id, Entry>,
}

impl RegistryState {
    fn rng(&mut self) -> Result<&mut StdRng, IdError> {
        self.rng.as_mut().ok_or(IdError::Uninitialized)
    }

    fn ensure_initialized(&self) -> Result<(), IdError> {
        if self.rng.is_some() {
            Ok(())
        } else {
            Err(IdError::Uninitialized)
        }
    }

    /// Draws four 32-bit words and composes them into two 64-bit halves.
    fn generate_block(&mut self) -> Result<Id, IdError> {
        let rng = self.rng()?;
        let a = u64::from(rng.next_u32());
        let b = u64::from(rng.next_u32());
        let c = u64::from(rng.next_u32());
        let d = u64::from(rng.next_u32());
        Ok(Id::from_parts((a << 32) | b, (c << 32) | d))
    }

    fn register(&mut self, id: Id, unique: bool) -> Result<usize, IdError> {
        self.ensure_initialized()?;

        match self.entries.get_mut(&id) {
            None => {
                self.entries.insert(
                    id,
                    Entry {
                        references: 1,
                        unique,
                    },
                );
                Ok(1)
            }
            Some(entry) if entry.unique => Err(IdError::DuplicateUniqueReference(id)),
            Some(entry) => {
                entry.references += 1;
                Ok(entry.references)
            }
        }
    }

    fn entry(&self, id: &Id) -> Result<&Entry, IdError> {
        self.ensure_initialized()?;
        self.entries.get(id).ok_or(IdError::NotFound(*id))
    }
}

/// Mints ids and tracks their reference counts.
///
/// An id registered as *unique* may only ever have one holder; any attempt
/// to register it again fails with [`IdError::DuplicateUniqueReference`]. Every
/// operation requires a prior [`initialize`](Self::initialize).
///
/// The registry is shared between tables behind an `Arc`, so all state sits
/// behind a single mutex.
#[derive(Debug)]
pub struct IdRegistry {
    state: Mutex<RegistryState>,
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdRegistry {
    /// Creates an uninitialized registry.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                seed: 0,
                rng: None,
                entries: BTreeMap::new(),
            }),
        }
    }

    /// Creates a registry that is already initialized with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let registry = Self::new();
        registry.initialize(seed);
        registry
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops every entry and (re)seeds the generator.
    pub fn initialize(&self, seed: u64) {
        let mut state = self.lock();
        state.entries.clear();
        state.seed = seed;
        state.rng = Some(StdRng::seed_from_u64(seed));
        tracing::debug!(seed, "id registry initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().rng.is_some()
    }

    /// Returns the registry to the uninitialized state.
    pub fn destroy(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.rng = None;
        tracing::debug!("id registry destroyed");
    }

    /// Drops every entry and reseeds the generator with the original seed.
    pub fn clear(&self) -> Result<(), IdError> {
        let mut state = self.lock();
        state.ensure_initialized()?;
        state.entries.clear();
        state.rng = Some(StdRng::seed_from_u64(state.seed));
        Ok(())
    }

    /// Produces a fresh id and registers it with a reference count of one.
    ///
    /// When `unique` is set the generator re-rolls until it lands on an id
    /// that is not currently registered.
    pub fn generate(&self, unique: bool) -> Result<Id, IdError> {
        let mut state = self.lock();
        let mut id = state.generate_block()?;
        if unique {
            while state.entries.contains_key(&id) {
                id = state.generate_block()?;
            }
        }
        state.register(id, false)?;
        Ok(id)
    }

    /// Adds a reference to `id`, returning the new reference count.
    pub fn register(&self, id: Id, unique: bool) -> Result<usize, IdError> {
        self.lock().register(id, unique)
    }

    /// Drops a reference to `id`, returning the remaining count. The entry
    /// is erased once the count reaches zero.
    pub fn unregister(&self, id: Id) -> Result<usize, IdError> {
        let mut state = self.lock();
        state.ensure_initialized()?;

        let remaining = {
            let entry = state.entries.get_mut(&id).ok_or(IdError::NotFound(id))?;
            entry.references -= 1;
            entry.references
        };

        if remaining == 0 {
            state.entries.remove(&id);
        }
        Ok(remaining)
    }

    pub fn reference_count(&self, id: Id) -> Result<usize, IdError> {
        Ok(self.lock().entry(&id)?.references)
    }

    pub fn is_unique(&self, id: Id) -> Result<bool, IdError> {
        Ok(self.lock().entry(&id)?.unique)
    }

    pub fn contains(&self, id: Id) -> Result<bool, IdError> {
        let state = self.lock();
        state.ensure_initialized()?;
        Ok(state.entries.contains_key(&id))
    }

    pub fn len(&self) -> Result<usize, IdError> {
        let state = self.lock();
        state.ensure_initialized()?;
        Ok(state.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, IdError> {
        Ok(self.len()? == 0)
    }

    /// Renders the registry contents, one id per line when `verbose`.
    pub fn render(&self, verbose: bool) -> Result<String, IdError> {
        let state = self.lock();
        state.ensure_initialized()?;

        let mut out = format!("IdRegistry (seed: {}) [{}]", state.seed, state.entries.len());
        if verbose {
            for (id, entry) in &state.entries {
                out.push_str(&format!(
                    "\n--- {id} (refs: {}{})",
                    entry.references,
                    if entry.unique { ", UNIQUE" } else { "" }
                ));
            }
        }
        Ok(out)
    }
}
