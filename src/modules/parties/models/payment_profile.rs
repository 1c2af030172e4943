use crate::core::{PaymentError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Saved payment method (tokenized card)
///
/// Stores the provider's token for a saved card plus the provider-side
/// customer id it is attached to. Created once per token exchange and
/// updated in place when billing details change; never silently recreated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProfile {
    /// Unique profile ID (UUID)
    pub id: String,

    /// Owning party
    pub party_id: String,

    /// Gateway this token belongs to
    pub gateway_id: String,

    /// Cardholder name as known to the provider
    pub name: Option<String>,

    /// Last 4 digits of the card number, for display
    pub last_4_digits: String,

    pub expiry_month: String,
    pub expiry_year: String,

    /// Provider token for the saved card
    pub provider_reference: String,

    /// Provider-side customer id this card is attached to
    pub customer_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentProfile {
    pub fn new(
        party_id: String,
        gateway_id: String,
        provider_reference: String,
        customer_id: Option<String>,
        last_4_digits: String,
        expiry_month: String,
        expiry_year: String,
    ) -> Result<Self> {
        if provider_reference.trim().is_empty() {
            return Err(PaymentError::validation(
                "Payment profile token cannot be empty",
            ));
        }
        if party_id.trim().is_empty() {
            return Err(PaymentError::validation("Party ID cannot be empty"));
        }
        if gateway_id.trim().is_empty() {
            return Err(PaymentError::validation("Gateway ID cannot be empty"));
        }

        let now = Utc::now();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            party_id,
            gateway_id,
            name: None,
            last_4_digits,
            expiry_month,
            expiry_year,
            provider_reference,
            customer_id,
            created_at: now,
            updated_at: now,
        })
    }
}
