use super::gateway_client::{
    CardResult, ChargeRequest, CustomerResult, ErrorDetail, PaymentSource, RemoteGatewayClient,
    RemoteResult, RemoteTransaction, RemoteTransactionStatus, SavedCard, SavedCardData,
    SavedCardUpdate,
};
use crate::core::{PaymentError, Result};
use crate::modules::gateways::models::ClientConfig;
use crate::modules::parties::models::CustomerData;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

/// Braintree HTTP client
///
/// Transport adapter implementing RemoteGatewayClient against the Braintree
/// REST surface. Constructed per operation scope from a validated
/// ClientConfig; holds no shared mutable state.
pub struct BraintreeClient {
    client: Client,
    config: ClientConfig,
}

impl BraintreeClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn merchant_url(&self, path: &str) -> String {
        format!(
            "{}/merchants/{}{}",
            self.config.base_url(),
            self.config.merchant_id,
            path
        )
    }

    async fn post(&self, url: &str, body: serde_json::Value) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.public_key, Some(&self.config.private_key))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    PaymentError::transport(format!(
                        "Braintree gateway unavailable: {} ({})",
                        if e.is_timeout() { "timeout" } else { "connection failed" },
                        e
                    ))
                } else {
                    PaymentError::transport(format!("Braintree API request failed: {}", e))
                }
            })?;
        Ok(response)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .basic_auth(&self.config.public_key, Some(&self.config.private_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| PaymentError::transport(format!("Braintree API request failed: {}", e)))
    }

    /// Map an HTTP response onto the decline-as-value contract: 2xx carries a
    /// transaction envelope, 422 carries a decline body, anything else is a
    /// transport failure.
    async fn decode_transaction_result(&self, response: reqwest::Response) -> Result<RemoteResult> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PaymentError::transport(format!("Failed to read Braintree response: {}", e))
        })?;

        if status.is_success() {
            let envelope: TransactionEnvelope = serde_json::from_str(&body).map_err(|e| {
                PaymentError::transport(format!("Failed to parse Braintree response: {}", e))
            })?;
            return Ok(RemoteResult {
                success: true,
                reference: envelope.transaction.id,
                message: String::new(),
                errors: Vec::new(),
            });
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let decline: DeclineBody = serde_json::from_str(&body).map_err(|e| {
                PaymentError::transport(format!("Failed to parse Braintree decline: {}", e))
            })?;
            return Ok(RemoteResult {
                success: false,
                reference: String::new(),
                message: decline.message,
                errors: decline
                    .errors
                    .into_iter()
                    .map(|e| ErrorDetail { message: e.message })
                    .collect(),
            });
        }

        Err(PaymentError::transport(format!(
            "Braintree API error - HTTP {} ({})",
            status.as_u16(),
            body
        )))
    }

    async fn decode_card_result(&self, response: reqwest::Response) -> Result<CardResult> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PaymentError::transport(format!("Failed to read Braintree response: {}", e))
        })?;

        if status.is_success() {
            let envelope: CardEnvelope = serde_json::from_str(&body).map_err(|e| {
                PaymentError::transport(format!("Failed to parse Braintree response: {}", e))
            })?;
            return Ok(CardResult {
                success: true,
                card: Some(envelope.credit_card),
                message: String::new(),
                errors: Vec::new(),
            });
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let decline: DeclineBody = serde_json::from_str(&body).map_err(|e| {
                PaymentError::transport(format!("Failed to parse Braintree decline: {}", e))
            })?;
            return Ok(CardResult {
                success: false,
                card: None,
                message: decline.message,
                errors: decline
                    .errors
                    .into_iter()
                    .map(|e| ErrorDetail { message: e.message })
                    .collect(),
            });
        }

        Err(PaymentError::transport(format!(
            "Braintree API error - HTTP {} ({})",
            status.as_u16(),
            body
        )))
    }
}

#[async_trait::async_trait]
impl RemoteGatewayClient for BraintreeClient {
    async fn sale(&self, request: ChargeRequest) -> Result<RemoteResult> {
        let url = self.merchant_url("/transactions");

        let mut body = json!({
            "transaction": {
                "type": "sale",
                "amount": request.amount.to_string(),
                "options": {
                    "submit_for_settlement": request.submit_for_settlement,
                },
            }
        });
        match &request.source {
            PaymentSource::Card { card, billing } => {
                body["transaction"]["credit_card"] = serde_json::to_value(card)
                    .map_err(|e| PaymentError::internal(e.to_string()))?;
                body["transaction"]["billing"] = serde_json::to_value(billing)
                    .map_err(|e| PaymentError::internal(e.to_string()))?;
            }
            PaymentSource::Token(token) => {
                body["transaction"]["payment_method_token"] = json!(token);
            }
        }
        if let Some(customer) = &request.customer {
            body["transaction"]["customer"] =
                serde_json::to_value(customer).map_err(|e| PaymentError::internal(e.to_string()))?;
        }

        let response = self.post(&url, body).await?;
        self.decode_transaction_result(response).await
    }

    async fn submit_for_settlement(
        &self,
        reference: &str,
        amount: Decimal,
    ) -> Result<RemoteResult> {
        let url = self.merchant_url(&format!("/transactions/{}/submit_for_settlement", reference));
        let body = json!({ "transaction": { "amount": amount.to_string() } });
        let response = self.post(&url, body).await?;
        self.decode_transaction_result(response).await
    }

    async fn void(&self, reference: &str) -> Result<RemoteResult> {
        let url = self.merchant_url(&format!("/transactions/{}/void", reference));
        let response = self.post(&url, json!({})).await?;
        self.decode_transaction_result(response).await
    }

    async fn refund(&self, reference: &str, amount: Decimal) -> Result<RemoteResult> {
        let url = self.merchant_url(&format!("/transactions/{}/refund", reference));
        let body = json!({ "transaction": { "amount": amount.to_string() } });
        let response = self.post(&url, body).await?;
        self.decode_transaction_result(response).await
    }

    async fn find_transaction(&self, reference: &str) -> Result<RemoteTransaction> {
        let url = self.merchant_url(&format!("/transactions/{}", reference));
        let response = self.get(&url).await?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PaymentError::transport(format!("Failed to read Braintree response: {}", e))
        })?;
        if !status.is_success() {
            return Err(PaymentError::transport(format!(
                "Braintree API error - HTTP {} ({})",
                status.as_u16(),
                body
            )));
        }

        let envelope: FindEnvelope = serde_json::from_str(&body).map_err(|e| {
            PaymentError::transport(format!("Failed to parse Braintree response: {}", e))
        })?;
        Ok(RemoteTransaction {
            reference: envelope.transaction.id,
            status: envelope.transaction.status,
            amount: envelope.transaction.amount,
        })
    }

    async fn find_saved_card(&self, token: &str) -> Result<SavedCard> {
        let url = self.merchant_url(&format!("/payment_methods/credit_card/{}", token));
        let response = self.get(&url).await?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PaymentError::transport(format!("Failed to read Braintree response: {}", e))
        })?;
        if !status.is_success() {
            return Err(PaymentError::transport(format!(
                "Braintree API error - HTTP {} ({})",
                status.as_u16(),
                body
            )));
        }

        let envelope: CardEnvelope = serde_json::from_str(&body).map_err(|e| {
            PaymentError::transport(format!("Failed to parse Braintree response: {}", e))
        })?;
        Ok(envelope.credit_card)
    }

    async fn create_customer(&self, customer: CustomerData) -> Result<CustomerResult> {
        let url = self.merchant_url("/customers");
        let body = json!({ "customer": customer });
        let response = self.post(&url, body).await?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            PaymentError::transport(format!("Failed to read Braintree response: {}", e))
        })?;

        if status.is_success() {
            let envelope: CustomerEnvelope = serde_json::from_str(&text).map_err(|e| {
                PaymentError::transport(format!("Failed to parse Braintree response: {}", e))
            })?;
            return Ok(CustomerResult {
                success: true,
                customer_id: envelope.customer.id,
                message: String::new(),
                errors: Vec::new(),
            });
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let decline: DeclineBody = serde_json::from_str(&text).map_err(|e| {
                PaymentError::transport(format!("Failed to parse Braintree decline: {}", e))
            })?;
            return Ok(CustomerResult {
                success: false,
                customer_id: String::new(),
                message: decline.message,
                errors: decline
                    .errors
                    .into_iter()
                    .map(|e| ErrorDetail { message: e.message })
                    .collect(),
            });
        }

        Err(PaymentError::transport(format!(
            "Braintree API error - HTTP {} ({})",
            status.as_u16(),
            text
        )))
    }

    async fn create_saved_card(&self, card: SavedCardData) -> Result<CardResult> {
        let url = self.merchant_url("/payment_methods");
        let body = json!({ "credit_card": card });
        let response = self.post(&url, body).await?;
        self.decode_card_result(response).await
    }

    async fn update_saved_card(&self, token: &str, update: SavedCardUpdate) -> Result<CardResult> {
        let url = self.merchant_url(&format!("/payment_methods/credit_card/{}", token));
        let body = json!({ "credit_card": update });
        let response = self.post(&url, body).await?;
        self.decode_card_result(response).await
    }
}

// Braintree API response structures

#[derive(Debug, Deserialize)]
struct TransactionEnvelope {
    transaction: TransactionBody,
}

#[derive(Debug, Deserialize)]
struct TransactionBody {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FindEnvelope {
    transaction: FindBody,
}

#[derive(Debug, Deserialize)]
struct FindBody {
    id: String,
    status: RemoteTransactionStatus,
    amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct CardEnvelope {
    credit_card: SavedCard,
}

#[derive(Debug, Deserialize)]
struct CustomerEnvelope {
    customer: CustomerBody,
}

#[derive(Debug, Deserialize)]
struct CustomerBody {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DeclineBody {
    message: String,
    #[serde(default)]
    errors: Vec<DeclineError>,
}

#[derive(Debug, Deserialize)]
struct DeclineError {
    message: String,
}
