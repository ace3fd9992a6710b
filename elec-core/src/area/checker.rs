use async_trait::async_trait;
use thiserror::Error;

use super::resolver::{AreaCheckResponse, resolve};
use crate::messages::Locale;

/// Transport-level failures of an area check.
///
/// Business outcomes such as "out of service" are never errors; they arrive
/// as an [`AreaCheckResponse`] with `is_valid == false`.
#[derive(Debug, Error)]
pub enum AreaCheckError {
    #[error("area check request failed: {0}")]
    Transport(String),

    #[error("area check rejected with status {status}")]
    Rejected { status: u16 },

    #[error("malformed area check response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Anything that can classify a 7-digit postal code, locally or remotely.
#[async_trait]
pub trait AreaChecker: Send + Sync {
    async fn check_area(
        &self,
        postal_code: &str,
    ) -> Result<AreaCheckResponse, AreaCheckError>;
}

/// Runs the resolver in-process. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAreaChecker {
    locale: Locale,
}

impl LocalAreaChecker {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

#[async_trait]
impl AreaChecker for LocalAreaChecker {
    async fn check_area(
        &self,
        postal_code: &str,
    ) -> Result<AreaCheckResponse, AreaCheckError> {
        Ok(resolve(postal_code, self.locale))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn local_checker_matches_resolver() {
        let checker = LocalAreaChecker::new(Locale::Ja);

        for code in ["1234567", "5678901", "9876543"] {
            let response = checker.check_area(code).await.unwrap();
            assert_eq!(response, resolve(code, Locale::Ja));
        }
    }
}
