//! Bound arguments handed to command handlers.

use super::dependencies::Dependency;
use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::fmt;

#[derive(Clone)]
enum Slot {
    Value(Value),
    Injected(Dependency),
}

/// Arguments produced by the binder, or assembled by hand for direct calls.
///
/// Positional values keep the name of the parameter they were bound to, so
/// handlers look values up by name regardless of how they were supplied.
#[derive(Clone, Default)]
pub struct BoundArgs {
    positional: Vec<(String, Slot)>,
    keyword: Vec<(String, Value)>,
}

impl BoundArgs {
    /// Empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional value bound to `param`.
    pub fn push_positional(&mut self, param: impl Into<String>, value: Value) {
        self.positional.push((param.into(), Slot::Value(value)));
    }

    /// Append an injected dependency bound to `param`.
    pub fn push_dependency(&mut self, param: impl Into<String>, dependency: Dependency) {
        self.positional.push((param.into(), Slot::Injected(dependency)));
    }

    /// Insert or overwrite a keyword value.
    pub fn insert_keyword(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.keyword.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.keyword.push((name, value)),
        }
    }

    /// Builder form of [`push_positional`](Self::push_positional).
    pub fn with_positional(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_positional(param, value.into());
        self
    }

    /// Builder form of [`insert_keyword`](Self::insert_keyword).
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_keyword(name, value.into());
        self
    }

    /// Builder form of [`push_dependency`](Self::push_dependency).
    pub fn with_dependency<T: Any + Send + Sync>(mut self, param: impl Into<String>, value: T) -> Self {
        self.push_dependency(param, std::sync::Arc::new(value));
        self
    }

    /// Positional values (dependencies excluded) in binding order.
    pub fn positional(&self) -> Vec<&Value> {
        self.positional
            .iter()
            .filter_map(|(_, slot)| match slot {
                Slot::Value(value) => Some(value),
                Slot::Injected(_) => None,
            })
            .collect()
    }

    /// Keyword values in binding order.
    pub fn keyword(&self) -> &[(String, Value)] {
        &self.keyword
    }

    /// Raw value bound to `name`, checking keywords before positionals.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.keyword
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .or_else(|| {
                self.positional.iter().find_map(|(param, slot)| match slot {
                    Slot::Value(value) if param == name => Some(value),
                    _ => None,
                })
            })
    }

    /// Deserialize the value bound to `name`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> anyhow::Result<T> {
        let value = self
            .value(name)
            .ok_or_else(|| anyhow!("argument '{}' was not bound", name))?;
        serde_json::from_value(value.clone())
            .with_context(|| format!("argument '{}' has an unexpected type", name))
    }

    /// Deserialize every positional value bound to the variadic `name`.
    pub fn rest<T: DeserializeOwned>(&self, name: &str) -> anyhow::Result<Vec<T>> {
        self.positional
            .iter()
            .filter_map(|(param, slot)| match slot {
                Slot::Value(value) if param == name => Some(value),
                _ => None,
            })
            .map(|value| {
                serde_json::from_value(value.clone())
                    .with_context(|| format!("argument '{}' has an unexpected type", name))
            })
            .collect()
    }

    /// First injected dependency of type `T`.
    pub fn dependency<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.positional.iter().find_map(|(_, slot)| match slot {
            Slot::Injected(dep) => dep.downcast_ref::<T>(),
            Slot::Value(_) => None,
        })
    }

    /// Like [`dependency`](Self::dependency), failing when it was not injected.
    pub fn require<T: Any + Send + Sync>(&self) -> anyhow::Result<&T> {
        self.dependency::<T>()
            .ok_or_else(|| anyhow!("dependency {} was not injected", std::any::type_name::<T>()))
    }

    /// Total number of bound values, dependencies included.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for BoundArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positional: Vec<(&str, String)> = self
            .positional
            .iter()
            .map(|(param, slot)| {
                let shown = match slot {
                    Slot::Value(value) => value.to_string(),
                    Slot::Injected(_) => "<dependency>".to_string(),
                };
                (param.as_str(), shown)
            })
            .collect();
        f.debug_struct("BoundArgs")
            .field("positional", &positional)
            .field("keyword", &self.keyword)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_lookup() {
        let args = BoundArgs::new()
            .with_positional("count", 3)
            .with_keyword("loud", true);

        assert_eq!(args.get::<i64>("count").unwrap(), 3);
        assert!(args.get::<bool>("loud").unwrap());
        assert!(args.get::<String>("count").is_err());
        assert!(args.get::<i64>("missing").is_err());
    }

    #[test]
    fn test_rest_collects_variadic_values() {
        let args = BoundArgs::new()
            .with_positional("first", "a")
            .with_positional("files", "b")
            .with_positional("files", "c");
        assert_eq!(args.rest::<String>("files").unwrap(), vec!["b", "c"]);
        assert!(args.rest::<String>("none").unwrap().is_empty());
    }

    #[test]
    fn test_keyword_shadows_positional() {
        let args = BoundArgs::new()
            .with_positional("x", 1)
            .with_keyword("x", 2);
        assert_eq!(args.value("x"), Some(&json!(2)));
    }

    #[test]
    fn test_dependencies_are_not_values() {
        let args = BoundArgs::new()
            .with_dependency("db", String::from("conn"))
            .with_positional("n", 1);
        assert_eq!(args.positional(), vec![&json!(1)]);
        assert_eq!(args.dependency::<String>().map(String::as_str), Some("conn"));
        assert!(args.dependency::<u8>().is_none());
        assert!(args.require::<u8>().is_err());
        assert_eq!(args.len(), 2);
    }
}
