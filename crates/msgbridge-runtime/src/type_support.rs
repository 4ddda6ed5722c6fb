//! Process-wide type support registry
//!
//! Native type support addresses are resolved once per type on first use and
//! kept for the life of the process. Entries are never removed, and a null
//! address is never recorded.

use crate::traits::{MessageDefinition, ServiceType};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::OnceCell;

/// Global registry
static REGISTRY: OnceCell<TypeSupportRegistry> = OnceCell::new();

/// Maps type names to resolved type support addresses
pub struct TypeSupportRegistry {
    entries: DashMap<&'static str, usize>,
}

impl TypeSupportRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Get the global registry
    pub fn global() -> &'static TypeSupportRegistry {
        REGISTRY.get_or_init(TypeSupportRegistry::new)
    }

    /// Return the address for `type_name`, calling `resolve` only if the
    /// type has not been seen before.
    ///
    /// Concurrent first calls for the same name run `resolve` once. A null
    /// address is returned but not cached, so the next call resolves again.
    pub fn resolve(&self, type_name: &'static str, resolve: impl FnOnce() -> usize) -> usize {
        match self.entries.entry(type_name) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let address = resolve();
                if address == 0 {
                    tracing::warn!(type_name, "type support resolved to a null address");
                    return 0;
                }
                tracing::debug!(type_name, address, "registered type support");
                *entry.insert(address)
            }
        }
    }

    /// Look up an already resolved address
    pub fn get(&self, type_name: &str) -> Option<usize> {
        self.entries.get(type_name).map(|entry| *entry)
    }

    /// Number of resolved types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeSupportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Type support for message `T`, through the global registry.
pub fn message_type_support<T: MessageDefinition>() -> usize {
    TypeSupportRegistry::global().resolve(T::TYPE_NAME, T::get_type_support)
}

/// Type support for service `S`, through the global registry.
pub fn service_type_support<S: ServiceType>() -> usize {
    TypeSupportRegistry::global().resolve(S::TYPE_NAME, S::get_type_support)
}
