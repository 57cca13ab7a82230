//! Handle registry for objects exposed over the wire.
//!
//! The registry owns the mapping from client-visible integer handles to live
//! objects. Handles are minted monotonically from 1 and are never reused
//! within a process lifetime, so a released handle stays invalid instead of
//! silently aliasing a newer object.
//!
//! The registry is agnostic to what it stores: it manages identity and
//! lifetime only and never inspects the referent. It is owned by the server
//! loop and threaded through dispatch explicitly; there is no global
//! instance, which keeps independent registries per test case cheap.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Client-visible identifier of a registered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u64);

impl Handle {
    /// Reconstructs a handle from its wire form. The result is only useful
    /// for lookups; the registry decides whether it refers to anything.
    #[must_use]
    pub fn from_wire(value: u64) -> Self {
        Self(value)
    }

    /// The handle's wire form.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Errors surfaced by registry lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The handle was never issued or has been removed.
    #[error("handle {handle} is not registered")]
    NotFound {
        /// The offending handle.
        handle: Handle,
    },
}

/// In-memory table of handle-to-object bindings.
#[derive(Debug)]
pub struct ObjectRegistry<T> {
    entries: HashMap<Handle, T>,
    next: u64,
}

impl<T> ObjectRegistry<T> {
    /// Creates an empty registry. The first handle issued is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next: 1,
        }
    }

    /// Registers `object` and returns its freshly minted handle.
    pub fn put(&mut self, object: T) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        self.entries.insert(handle, object);
        handle
    }

    /// Resolves a handle to its object.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for handles that were never
    /// issued or have been removed.
    pub fn get(&self, handle: Handle) -> Result<&T, RegistryError> {
        self.entries
            .get(&handle)
            .ok_or(RegistryError::NotFound { handle })
    }

    /// Whether the handle is currently registered.
    #[must_use]
    pub fn has(&self, handle: Handle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Removes the entry for `handle`, returning the object.
    ///
    /// Callers are expected to have resolved the handle immediately
    /// beforehand; removing an unknown handle is a caller bug and is
    /// reported as an error rather than ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unregistered handles.
    pub fn remove(&mut self, handle: Handle) -> Result<T, RegistryError> {
        self.entries
            .remove(&handle)
            .ok_or(RegistryError::NotFound { handle })
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ObjectRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_distinct_and_strictly_increasing() {
        let mut registry = ObjectRegistry::new();
        let handles: Vec<Handle> = (0..16).map(|n| registry.put(n)).collect();
        for pair in handles.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(handles[0].value(), 1);
    }

    #[test]
    fn resolution_is_total() {
        let mut registry = ObjectRegistry::new();
        let handle = registry.put("object");
        assert!(registry.has(handle));
        assert_eq!(*registry.get(handle).expect("registered"), "object");

        registry.remove(handle).expect("registered");
        assert!(!registry.has(handle));
        assert!(matches!(
            registry.get(handle),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn never_issued_handle_is_not_found() {
        let registry: ObjectRegistry<u8> = ObjectRegistry::new();
        let phantom = Handle::from_wire(7);
        assert!(!registry.has(phantom));
        assert!(matches!(
            registry.get(phantom),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn removed_handles_are_not_reused() {
        let mut registry = ObjectRegistry::new();
        let first = registry.put("a");
        registry.remove(first).expect("registered");
        let second = registry.put("b");
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn removing_unknown_handle_is_an_error() {
        let mut registry: ObjectRegistry<u8> = ObjectRegistry::new();
        assert!(matches!(
            registry.remove(Handle::from_wire(3)),
            Err(RegistryError::NotFound { .. })
        ));
    }
}
