use std::{collections::HashMap, sync::Arc, time::Duration};

use super::checker::{AreaCheckError, AreaChecker, LocalAreaChecker};
use crate::messages::Locale;

/// Backend-agnostic checker configuration.
///
/// `backend` must match the [`CheckerFactory::backend_name`] of a registered
/// factory. `endpoint` is only meaningful to remote backends.
///
/// | backend | endpoint example                              |
/// |---------|-----------------------------------------------|
/// | `local` | ignored                                       |
/// | `http`  | `http://127.0.0.1:3030/api/area-check`        |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    pub backend: String,
    pub endpoint: Option<String>,
    pub timeout: Duration,
    pub locale: Locale,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            endpoint: None,
            timeout: Duration::from_secs(5),
            locale: Locale::default(),
        }
    }
}

/// One implementation per checker backend, registered with a
/// [`CheckerRegistry`] at startup.
pub trait CheckerFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    fn create(
        &self,
        config: &CheckerConfig,
    ) -> Result<Arc<dyn AreaChecker>, AreaCheckError>;
}

/// Builds the in-process [`LocalAreaChecker`].
pub struct LocalCheckerFactory;

impl CheckerFactory for LocalCheckerFactory {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    fn create(
        &self,
        config: &CheckerConfig,
    ) -> Result<Arc<dyn AreaChecker>, AreaCheckError> {
        Ok(Arc::new(LocalAreaChecker::new(config.locale)))
    }
}

/// Registry of [`CheckerFactory`] instances, keyed by backend name.
pub struct CheckerRegistry {
    factories: HashMap<&'static str, Box<dyn CheckerFactory>>,
}

impl CheckerRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry with the `local` backend already registered.
    pub fn with_local() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(LocalCheckerFactory));
        registry
    }

    /// Register a backend factory, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn CheckerFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`AreaCheckError::Configuration`] when no factory is registered for
    ///   the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub fn create(
        &self,
        config: &CheckerConfig,
    ) -> Result<Arc<dyn AreaChecker>, AreaCheckError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                AreaCheckError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config)
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
