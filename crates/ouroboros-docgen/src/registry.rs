//! Program symbol registry
//!
//! One [`TypeReference`] per program symbol per extraction pass. Entries are
//! written as soon as a reference's identity is known, before the declaration
//! body is built, so re-entrant lookups on cyclic types hit the cache.

use std::collections::HashMap;

use crate::ids::{ReferenceId, SymbolId};
use crate::model::{ReferenceKind, TypeReference};

#[derive(Debug, Default)]
pub struct SymbolRegistry {
    references: HashMap<SymbolId, TypeReference>,
    next_id: u32,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: SymbolId) -> Option<&TypeReference> {
        self.references.get(&symbol)
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.references.contains_key(&symbol)
    }

    pub fn insert(&mut self, symbol: SymbolId, reference: TypeReference) {
        self.references.insert(symbol, reference);
    }

    /// Allocate a reference with a fresh id, without caching it
    pub fn mint(&mut self, name: impl Into<String>, kind: ReferenceKind) -> TypeReference {
        let id = ReferenceId(self.next_id);
        self.next_id += 1;
        TypeReference::new(id, name, kind)
    }

    /// Number of cached symbols
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
