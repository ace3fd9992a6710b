use std::sync::Arc;

use elec_core::{AreaCheckError, AreaChecker, CheckerConfig, CheckerFactory};

use crate::client::HttpAreaChecker;

/// Endpoint used when neither the configuration nor the environment names one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3030/api/area-check";

/// Resolve the endpoint URL.
///
/// Resolution order:
/// 1. `config.endpoint`, when set.
/// 2. **`ELEC_AREA_CHECK_ENDPOINT`**, when set.
/// 3. [`DEFAULT_ENDPOINT`].
fn endpoint(config: &CheckerConfig) -> String {
    if let Some(endpoint) = &config.endpoint {
        return endpoint.clone();
    }
    if let Ok(endpoint) = std::env::var("ELEC_AREA_CHECK_ENDPOINT") {
        return endpoint;
    }
    DEFAULT_ENDPOINT.to_string()
}

/// [`CheckerFactory`] for the HTTP backend.
///
/// Register this with a [`elec_core::CheckerRegistry`] to make the `"http"`
/// backend available:
///
/// ```rust
/// use elec_core::CheckerRegistry;
/// use elec_area_http::HttpCheckerFactory;
///
/// let mut registry = CheckerRegistry::with_local();
/// registry.register(Box::new(HttpCheckerFactory));
/// assert_eq!(registry.available_backends(), vec!["http", "local"]);
/// ```
pub struct HttpCheckerFactory;

impl CheckerFactory for HttpCheckerFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    fn create(
        &self,
        config: &CheckerConfig,
    ) -> Result<Arc<dyn AreaChecker>, AreaCheckError> {
        let url = endpoint(config);
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AreaCheckError::Configuration(format!(
                "area check endpoint must be an http(s) URL, got '{url}'"
            )));
        }
        Ok(Arc::new(HttpAreaChecker::new(url, config.timeout)?))
    }
}
