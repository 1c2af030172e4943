use crate::core::{Currency, PaymentError, Result};
use serde::{Deserialize, Serialize};

/// Provider tag this implementation answers to
pub const PROVIDER: &str = "braintree";

/// Braintree gateway settings as stored by the host ERP
///
/// The host's generic gateway record carries a provider tag; this model is
/// the braintree-specific slice of it. Braintree needs a separate merchant
/// account per currency, so the settlement currency is part of the settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraintreeGateway {
    pub id: String,
    pub name: String,

    /// Provider tag from the host's gateway record
    pub provider: String,

    pub merchant_id: String,
    pub public_key: String,

    #[serde(skip_serializing)]
    pub private_key: String,

    /// Settlement currency for this merchant account
    pub currency: Currency,

    pub environment: GatewayEnvironment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    Sandbox,
    Production,
}

impl GatewayEnvironment {
    /// API base URL for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            GatewayEnvironment::Sandbox => "https://api.sandbox.braintreegateway.com",
            GatewayEnvironment::Production => "https://api.braintreegateway.com",
        }
    }
}

impl std::fmt::Display for GatewayEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayEnvironment::Sandbox => write!(f, "sandbox"),
            GatewayEnvironment::Production => write!(f, "production"),
        }
    }
}

/// Ready-to-use remote client configuration
///
/// Built fresh per operation scope; the remote client is never configured
/// through shared mutable state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: GatewayEnvironment,
    pub merchant_id: String,
    pub public_key: String,
    pub private_key: String,
}

impl ClientConfig {
    pub fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }
}

impl BraintreeGateway {
    /// Validate the settings and produce a remote client configuration
    ///
    /// Calling this on a gateway record whose provider tag is not braintree
    /// is a programming error in the host's provider dispatch, surfaced as a
    /// configuration error rather than a user-facing one.
    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.provider != PROVIDER {
            return Err(PaymentError::configuration(format!(
                "Gateway '{}' is configured for provider '{}', not braintree",
                self.id, self.provider
            )));
        }
        for (field, value) in [
            ("merchant_id", &self.merchant_id),
            ("public_key", &self.public_key),
            ("private_key", &self.private_key),
        ] {
            if value.trim().is_empty() {
                return Err(PaymentError::configuration(format!(
                    "Gateway '{}' is missing required credential '{}'",
                    self.id, field
                )));
            }
        }

        Ok(ClientConfig {
            environment: self.environment,
            merchant_id: self.merchant_id.clone(),
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
        })
    }
}
