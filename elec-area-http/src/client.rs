use std::time::Duration;

use async_trait::async_trait;
use elec_core::{AreaCheckError, AreaCheckResponse, AreaChecker};
use tracing::debug;

use crate::wire::{AreaCheckRequest, ErrorBody};

/// Calls a remote area-check endpoint.
///
/// Any non-2xx status is reported as [`AreaCheckError::Rejected`] regardless
/// of the body; the body is only logged.
#[derive(Debug, Clone)]
pub struct HttpAreaChecker {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAreaChecker {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AreaCheckError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AreaCheckError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AreaChecker for HttpAreaChecker {
    async fn check_area(
        &self,
        postal_code: &str,
    ) -> Result<AreaCheckResponse, AreaCheckError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AreaCheckRequest { postal_code })
            .send()
            .await
            .map_err(|e| AreaCheckError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.ok();
            debug!(
                status = status.as_u16(),
                error = body.as_ref().map(|b| b.error.as_str()).unwrap_or(""),
                "area check rejected"
            );
            return Err(AreaCheckError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<AreaCheckResponse>()
            .await
            .map_err(|e| AreaCheckError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Port 9 (discard) on localhost is never served in test environments.
        let checker =
            HttpAreaChecker::new("http://127.0.0.1:9/api/area-check", Duration::from_millis(500))
                .unwrap();

        let err = checker.check_area("1234567").await.unwrap_err();

        assert!(matches!(err, AreaCheckError::Transport(_)));
    }
}
