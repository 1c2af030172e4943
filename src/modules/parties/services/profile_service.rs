use crate::core::{PaymentError, Result};
use crate::modules::gateways::models::BraintreeGateway;
use crate::modules::gateways::services::{
    BraintreeClient, RemoteGatewayClient, SavedCardData, SavedCardUpdate,
};
use crate::modules::parties::models::{Address, Party, PaymentProfile};
use crate::modules::parties::repositories::{find_customer_id, ProfileRepository};
use crate::modules::transactions::models::CardInput;
use std::sync::Arc;
use tracing::info;

/// Saved payment method management
///
/// Tokenizes cards into payment profiles, imports profiles from existing
/// provider tokens, and pushes profile changes back to the gateway. Unlike
/// the lifecycle operations, provider declines here surface directly as
/// errors: there is no transaction to record them against.
pub struct ProfileService {
    gateway: BraintreeGateway,
    client: Arc<dyn RemoteGatewayClient>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(
        gateway: BraintreeGateway,
        client: Arc<dyn RemoteGatewayClient>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            gateway,
            client,
            profiles,
        }
    }

    /// Build a service backed by the HTTP client for this gateway's
    /// validated configuration.
    pub fn over_http(
        gateway: BraintreeGateway,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Result<Self> {
        let config = gateway.client_config()?;
        Ok(Self::new(
            gateway,
            Arc::new(BraintreeClient::new(config)),
            profiles,
        ))
    }

    /// Tokenize a card and persist it as a payment profile
    ///
    /// Reuses the party's provider-side customer id when one exists; creates
    /// the remote customer first otherwise, so repeated tokenizations never
    /// produce duplicate customer records.
    pub async fn add_profile(
        &self,
        party: &Party,
        address: &Address,
        card: &CardInput,
    ) -> Result<PaymentProfile> {
        let customer_id = match find_customer_id(
            self.profiles.as_ref(),
            &party.id,
            &self.gateway.id,
        )
        .await?
        {
            Some(id) => id,
            None => {
                let created = self.client.create_customer(party.to_customer_data()).await?;
                if !created.success {
                    return Err(PaymentError::gateway(created.all_messages()));
                }
                created.customer_id
            }
        };

        let cardholder_name = card
            .owner
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| address.name.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| party.name.clone());

        let result = self
            .client
            .create_saved_card(SavedCardData {
                number: card.number.clone(),
                expiration_month: card.expiry_month.clone(),
                expiration_year: card.expiry_year.clone(),
                cvv: card.csc.clone(),
                cardholder_name: cardholder_name.clone(),
                billing_address: address.to_address_data(),
                customer_id: Some(customer_id),
            })
            .await?;
        if !result.success {
            return Err(PaymentError::gateway(result.all_messages()));
        }
        let saved = result
            .card
            .ok_or_else(|| PaymentError::internal("Gateway returned no card on success"))?;

        let mut profile = PaymentProfile::new(
            party.id.clone(),
            self.gateway.id.clone(),
            saved.token,
            Some(saved.customer_id),
            saved.last_4,
            saved.expiration_month,
            saved.expiration_year,
        )?;
        profile.name = saved.cardholder_name.or(Some(cardholder_name));

        let profile = self.profiles.create(profile).await?;
        info!(
            profile_id = %profile.id,
            party_id = %party.id,
            "Payment profile created"
        );
        Ok(profile)
    }

    /// Import a card already tokenized on the provider side
    pub async fn create_profile_from_token(
        &self,
        party: &Party,
        token: &str,
    ) -> Result<PaymentProfile> {
        let saved = self.client.find_saved_card(token).await?;

        let mut profile = PaymentProfile::new(
            party.id.clone(),
            self.gateway.id.clone(),
            saved.token,
            Some(saved.customer_id),
            saved.last_4,
            saved.expiration_month,
            saved.expiration_year,
        )?;
        profile.name = saved.cardholder_name;

        self.profiles.create(profile).await
    }

    /// Push cardholder name, expiry and billing address to the gateway
    pub async fn update_profile(
        &self,
        profile: &PaymentProfile,
        party: &Party,
        address: &Address,
    ) -> Result<()> {
        let result = self
            .client
            .update_saved_card(
                &profile.provider_reference,
                SavedCardUpdate {
                    cardholder_name: profile
                        .name
                        .clone()
                        .unwrap_or_else(|| party.name.clone()),
                    expiration_month: profile.expiry_month.clone(),
                    expiration_year: profile.expiry_year.clone(),
                    billing_address: address.to_address_data(),
                },
            )
            .await?;

        if !result.success {
            return Err(PaymentError::gateway(result.all_messages()));
        }
        Ok(())
    }
}
