//! Module discovery.
//!
//! Providers hand ready-to-register modules to a session. Discovery may
//! fail as a whole (the provider returns an error) or per module (a factory
//! fails); either way the session logs and carries on.

use super::Module;
use tracing::{debug, warn};

/// Source of modules for [`Session::include_modules`](crate::Session::include_modules).
///
/// # Object Safety
///
/// This trait is object-safe and can be used with `dyn ModuleProvider`.
///
/// # Example
///
/// ```
/// use spaceworld::module::{Module, ModuleProvider};
///
/// struct Plugins;
///
/// impl ModuleProvider for Plugins {
///     fn source(&self) -> &str {
///         "plugins"
///     }
///
///     fn discover(&self) -> anyhow::Result<Vec<Module>> {
///         Ok(vec![Module::new("net", "Network tools")])
///     }
/// }
///
/// assert_eq!(Plugins.discover().unwrap().len(), 1);
/// ```
pub trait ModuleProvider {
    /// Name of the source, used in log messages.
    fn source(&self) -> &str;

    /// Produce the modules this provider knows about.
    fn discover(&self) -> anyhow::Result<Vec<Module>>;
}

/// Provider over a fixed list of modules.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    source: String,
    modules: Vec<Module>,
}

impl StaticProvider {
    /// Create a provider returning `modules`.
    pub fn new(source: impl Into<String>, modules: Vec<Module>) -> Self {
        Self {
            source: source.into(),
            modules,
        }
    }

    /// Add a module.
    pub fn add(&mut self, module: Module) {
        self.modules.push(module);
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the provider is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleProvider for StaticProvider {
    fn source(&self) -> &str {
        &self.source
    }

    fn discover(&self) -> anyhow::Result<Vec<Module>> {
        Ok(self.modules.clone())
    }
}

/// Zero-argument function building one module.
pub type ModuleFactory = Box<dyn Fn() -> anyhow::Result<Module> + Send + Sync>;

/// Provider that calls a list of factories.
///
/// A failing factory is logged and skipped; the others still contribute.
pub struct FactoryProvider {
    source: String,
    factories: Vec<(String, ModuleFactory)>,
}

impl FactoryProvider {
    /// Create an empty provider.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            factories: Vec::new(),
        }
    }

    /// Add a named factory.
    pub fn factory<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> anyhow::Result<Module> + Send + Sync + 'static,
    {
        self.factories.push((name.into(), Box::new(factory)));
        self
    }

    /// Number of factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no factories were added.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl ModuleProvider for FactoryProvider {
    fn source(&self) -> &str {
        &self.source
    }

    fn discover(&self) -> anyhow::Result<Vec<Module>> {
        let mut modules = Vec::with_capacity(self.factories.len());
        for (name, factory) in &self.factories {
            match factory() {
                Ok(module) => {
                    debug!(source = %self.source, factory = %name, "module discovered");
                    modules.push(module);
                }
                Err(e) => {
                    warn!(source = %self.source, factory = %name, error = %e, "module factory failed, skipping");
                }
            }
        }
        Ok(modules)
    }
}

impl std::fmt::Debug for FactoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.factories.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("FactoryProvider")
            .field("source", &self.source)
            .field("factories", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider() {
        let mut provider = StaticProvider::new("static", vec![Module::new("a", "")]);
        provider.add(Module::new("b", ""));
        assert_eq!(provider.source(), "static");
        assert_eq!(provider.len(), 2);

        let names: Vec<String> = provider
            .discover()
            .unwrap()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_factory_failures_are_skipped() {
        let provider = FactoryProvider::new("factories")
            .factory("good", || Ok(Module::new("good", "")))
            .factory("bad", || anyhow::bail!("missing config"))
            .factory("other", || Ok(Module::new("other", "")));

        assert_eq!(provider.len(), 3);
        let modules = provider.discover().unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[1].name(), "other");
    }
}
