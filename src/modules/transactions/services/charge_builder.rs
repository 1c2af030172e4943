use crate::core::{PaymentError, Result};
use crate::modules::gateways::models::BraintreeGateway;
use crate::modules::gateways::services::{CardData, ChargeRequest, PaymentSource};
use crate::modules::transactions::models::{CardInput, PaymentTransaction};

/// Provider limit on cardholder name length
const MAX_CARDHOLDER_NAME: usize = 175;

/// Assembles the normalized charge request for a transaction
///
/// All invariants that must hold before money moves live here: the currency
/// match against the gateway's settlement currency, and the
/// one-of-profile-or-card rule. A failed build means no remote call was made.
pub struct ChargeRequestBuilder<'a> {
    gateway: &'a BraintreeGateway,
}

impl<'a> ChargeRequestBuilder<'a> {
    pub fn new(gateway: &'a BraintreeGateway) -> Self {
        Self { gateway }
    }

    /// Build the outbound request
    ///
    /// `customer_id` is the provider-side customer id already known for the
    /// payer, if any; the customer block is only sent when there is none.
    pub fn build(
        &self,
        transaction: &PaymentTransaction,
        card_info: Option<&CardInput>,
        customer_id: Option<&str>,
        submit_for_settlement: bool,
    ) -> Result<ChargeRequest> {
        if transaction.currency != self.gateway.currency {
            return Err(PaymentError::validation(format!(
                "Transaction currency '{}' does not match gateway settlement currency '{}'",
                transaction.currency, self.gateway.currency
            )));
        }

        let source = if let Some(card) = card_info {
            PaymentSource::Card {
                card: CardData {
                    number: card.number.clone(),
                    expiration_month: card.expiry_month.clone(),
                    expiration_year: card.expiry_year.clone(),
                    cvv: card.csc.clone(),
                    cardholder_name: self.cardholder_name(transaction, card),
                },
                billing: transaction.address.to_address_data(),
            }
        } else if let Some(profile) = &transaction.payment_profile {
            PaymentSource::Token(profile.provider_reference.clone())
        } else {
            return Err(PaymentError::MissingPaymentMethod);
        };

        let customer = if customer_id.is_none() {
            Some(transaction.party.to_customer_data())
        } else {
            None
        };

        Ok(ChargeRequest {
            amount: transaction.amount,
            submit_for_settlement,
            customer,
            source,
        })
    }

    /// Cardholder name: explicit owner on the card, else the billing address
    /// name, else the party name; truncated for provider compatibility.
    fn cardholder_name(&self, transaction: &PaymentTransaction, card: &CardInput) -> String {
        let name = card
            .owner
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(transaction.address.name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&transaction.party.name);
        name.chars().take(MAX_CARDHOLDER_NAME).collect()
    }
}
