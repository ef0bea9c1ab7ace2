//! HTTP client for the payment provider's verification API

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ports::{PaymentGateway, ProviderVerification};
use crate::shared::errors::{DomainError, DomainResult};

/// Per-request timeout against the provider API
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Charge state the provider reports for a settled successful payment
const PROVIDER_SUCCESS_STATUS: &str = "success";

/// Gateway configuration, passed in at construction time
#[derive(Debug, Clone)]
pub struct PaymentGatewayConfig {
    /// Provider API base URL
    pub base_url: String,
    /// Secret API key for the Authorization header
    pub secret_key: String,
}

/// Payment gateway backed by the provider's REST API
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    config: PaymentGatewayConfig,
}

/// Provider verify-transaction response envelope
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    status: bool,
    data: Option<VerifyResponseData>,
}

#[derive(Debug, Deserialize)]
struct VerifyResponseData {
    reference: String,
    status: String,
    #[serde(default)]
    amount: Option<i64>,
}

impl HttpPaymentGateway {
    pub fn new(config: PaymentGatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn verify_url(&self, provider_reference: &str) -> String {
        format!(
            "{}/transaction/verify/{}",
            self.config.base_url.trim_end_matches('/'),
            provider_reference
        )
    }
}

/// Fold the provider's response body into a verification result.
fn map_response(body: VerifyResponse) -> ProviderVerification {
    match body.data {
        Some(data) if body.status => ProviderVerification {
            succeeded: data.status == PROVIDER_SUCCESS_STATUS,
            reference: data.reference,
            amount: data.amount,
        },
        _ => ProviderVerification {
            reference: String::new(),
            succeeded: false,
            amount: None,
        },
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn verify_transaction(
        &self,
        provider_reference: &str,
    ) -> DomainResult<ProviderVerification> {
        let url = self.verify_url(provider_reference);
        debug!(url = %url, "Verifying transaction with payment provider");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| DomainError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            warn!(status = %status, "Provider verification endpoint errored");
            return Err(DomainError::ProviderUnavailable(format!(
                "provider returned {}",
                status
            )));
        }
        if !status.is_success() {
            // 4xx: the provider has no successful record of this reference
            debug!(status = %status, "Provider rejected the verification request");
            return Err(DomainError::PaymentUnconfirmed(
                provider_reference.to_string(),
            ));
        }

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ProviderUnavailable(format!("malformed response: {}", e)))?;

        Ok(map_response(body))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> VerifyResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn successful_charge_maps_to_succeeded() {
        let v = map_response(parse(
            r#"{"status":true,"data":{"reference":"PAY-1","status":"success","amount":50000}}"#,
        ));
        assert_eq!(
            v,
            ProviderVerification {
                reference: "PAY-1".into(),
                succeeded: true,
                amount: Some(50_000),
            }
        );
    }

    #[test]
    fn failed_charge_maps_to_not_succeeded() {
        let v = map_response(parse(
            r#"{"status":true,"data":{"reference":"PAY-1","status":"failed"}}"#,
        ));
        assert!(!v.succeeded);
        assert_eq!(v.reference, "PAY-1");
        assert_eq!(v.amount, None);
    }

    #[test]
    fn envelope_failure_maps_to_not_succeeded() {
        let v = map_response(parse(r#"{"status":false,"data":null}"#));
        assert!(!v.succeeded);
        assert!(v.reference.is_empty());
    }

    #[test]
    fn verify_url_joins_without_double_slash() {
        let gateway = HttpPaymentGateway::new(PaymentGatewayConfig {
            base_url: "https://api.provider.test/".into(),
            secret_key: "sk_test".into(),
        });
        assert_eq!(
            gateway.verify_url("prov-1"),
            "https://api.provider.test/transaction/verify/prov-1"
        );
    }
}
