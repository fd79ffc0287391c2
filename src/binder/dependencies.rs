//! Registry of injectable singleton dependencies.

use crate::error::RegistrationError;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared, type-erased dependency instance.
pub type Dependency = Arc<dyn Any + Send + Sync>;

/// Registry of dependency instances keyed by type name.
///
/// A handler parameter whose declared type name matches a key here is
/// filled with the registered instance instead of a token.
#[derive(Clone, Default)]
pub struct DependencyRegistry {
    entries: HashMap<String, Dependency>,
}

impl DependencyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance of `T`. Fails if `T` is already registered.
    pub fn register<T: Any + Send + Sync>(&mut self, value: T) -> Result<(), RegistrationError> {
        let key = type_name::<T>();
        if self.entries.contains_key(key) {
            return Err(RegistrationError::dependency(key));
        }
        self.entries.insert(key.to_string(), Arc::new(value));
        Ok(())
    }

    /// Replace the instance of `T`. Fails if `T` was never registered.
    pub fn replace<T: Any + Send + Sync>(&mut self, value: T) -> Result<(), RegistrationError> {
        let key = type_name::<T>();
        match self.entries.get_mut(key) {
            Some(slot) => {
                *slot = Arc::new(value);
                Ok(())
            }
            None => Err(RegistrationError::missing_dependency(key)),
        }
    }

    /// Register or replace the instance of `T`.
    pub fn register_or_replace<T: Any + Send + Sync>(&mut self, value: T) {
        self.entries
            .insert(type_name::<T>().to_string(), Arc::new(value));
    }

    /// Typed lookup.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.entries
            .get(type_name::<T>())
            .and_then(|dep| dep.clone().downcast::<T>().ok())
    }

    /// Lookup by type name, as declared by a parameter.
    pub fn get_by_name(&self, name: &str) -> Option<Dependency> {
        self.entries.get(name).cloned()
    }

    /// Whether a type name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered dependencies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for DependencyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyRegistry")
            .field("types", &self.names())
            .finish()
    }
}
