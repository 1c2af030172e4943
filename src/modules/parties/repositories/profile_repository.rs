use crate::core::{PaymentError, Result};
use crate::modules::parties::models::PaymentProfile;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Persistence boundary for payment profiles
///
/// The host ERP owns profile storage; this core only reads and writes
/// profiles through this trait, inside whatever unit of work the host
/// supplies.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist a new profile
    async fn create(&self, profile: PaymentProfile) -> Result<PaymentProfile>;

    /// Persist changes to an existing profile
    async fn update(&self, profile: PaymentProfile) -> Result<PaymentProfile>;

    /// All profiles a party holds against a gateway
    async fn find_by_party_and_gateway(
        &self,
        party_id: &str,
        gateway_id: &str,
    ) -> Result<Vec<PaymentProfile>>;
}

/// Provider-side customer id for a party, if one was ever established
///
/// Discovered by scanning the party's saved profiles for this gateway; the
/// first profile carrying a customer id wins. Reusing it keeps the provider
/// from accumulating duplicate customer records.
pub async fn find_customer_id(
    repository: &dyn ProfileRepository,
    party_id: &str,
    gateway_id: &str,
) -> Result<Option<String>> {
    let profiles = repository
        .find_by_party_and_gateway(party_id, gateway_id)
        .await?;
    Ok(profiles.into_iter().find_map(|p| p.customer_id))
}

/// Thread-safe in-memory profile store
///
/// Stands in for the host's persistence in tests and embedded use.
#[derive(Default, Clone)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<String, PaymentProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: PaymentProfile) -> Result<PaymentProfile> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| PaymentError::internal("profile store lock poisoned"))?;
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn update(&self, profile: PaymentProfile) -> Result<PaymentProfile> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| PaymentError::internal("profile store lock poisoned"))?;
        if !profiles.contains_key(&profile.id) {
            return Err(PaymentError::validation(format!(
                "Payment profile '{}' not found",
                profile.id
            )));
        }
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn find_by_party_and_gateway(
        &self,
        party_id: &str,
        gateway_id: &str,
    ) -> Result<Vec<PaymentProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| PaymentError::internal("profile store lock poisoned"))?;
        let mut found: Vec<PaymentProfile> = profiles
            .values()
            .filter(|p| p.party_id == party_id && p.gateway_id == gateway_id)
            .cloned()
            .collect();
        // Stable order for customer-id discovery
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }
}
