use crate::core::Result;
use crate::modules::parties::models::{AddressData, CustomerData};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Remote payment gateway boundary
///
/// A business decline (the provider answered but rejected the request) comes
/// back as a value with `success == false`; an `Err` from any method means
/// the call itself could not complete (`PaymentError::Transport`).
#[async_trait]
pub trait RemoteGatewayClient: Send + Sync {
    /// Charge a payment method. `submit_for_settlement` on the request
    /// selects authorization-only versus authorize-and-capture.
    async fn sale(&self, request: ChargeRequest) -> Result<RemoteResult>;

    /// Settle a prior authorization
    async fn submit_for_settlement(&self, reference: &str, amount: Decimal)
        -> Result<RemoteResult>;

    /// Reverse an unsettled transaction
    async fn void(&self, reference: &str) -> Result<RemoteResult>;

    /// Reverse a settled transaction, partially or fully
    async fn refund(&self, reference: &str, amount: Decimal) -> Result<RemoteResult>;

    /// Look up a transaction by its provider reference
    async fn find_transaction(&self, reference: &str) -> Result<RemoteTransaction>;

    /// Resolve a saved card by its token
    async fn find_saved_card(&self, token: &str) -> Result<SavedCard>;

    /// Create a provider-side customer record
    async fn create_customer(&self, customer: CustomerData) -> Result<CustomerResult>;

    /// Tokenize a card, optionally attached to an existing customer
    async fn create_saved_card(&self, card: SavedCardData) -> Result<CardResult>;

    /// Update cardholder name, expiry, or billing address on a saved card
    async fn update_saved_card(&self, token: &str, update: SavedCardUpdate) -> Result<CardResult>;
}

/// Normalized charge request produced by the charge builder
#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    pub amount: Decimal,
    pub submit_for_settlement: bool,

    /// Present only when no provider-side customer exists yet for the payer
    pub customer: Option<CustomerData>,

    pub source: PaymentSource,
}

/// Either inline card data with its billing address, or a stored token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    Card { card: CardData, billing: AddressData },
    Token(String),
}

/// Inline card block in the gateway's field layout
#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub cvv: String,
    pub cardholder_name: String,
}

/// Outcome of a money-movement call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteResult {
    pub success: bool,

    /// Provider reference for the created/affected transaction
    pub reference: String,

    /// Top-level provider message
    pub message: String,

    /// Granular field-level errors
    pub errors: Vec<ErrorDetail>,
}

impl RemoteResult {
    /// Top-level message plus every granular error, one per line
    pub fn all_messages(&self) -> String {
        let mut text = vec![self.message.clone()];
        text.extend(self.errors.iter().map(|e| e.message.clone()));
        text.join("\r\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Provider-side view of an existing transaction
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTransaction {
    pub reference: String,
    pub status: RemoteTransactionStatus,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteTransactionStatus {
    Authorized,
    SubmittedForSettlement,
    Settling,
    Settled,
    Voided,
    Refunded,
}

impl RemoteTransactionStatus {
    /// Whether funds have moved (or are moving) for this transaction.
    /// Before this point the provider only supports voiding, not refunding.
    pub fn is_settled_or_settling(&self) -> bool {
        matches!(
            self,
            RemoteTransactionStatus::Settled | RemoteTransactionStatus::Settling
        )
    }
}

/// A saved card as the provider reports it
#[derive(Debug, Clone, Deserialize)]
pub struct SavedCard {
    pub token: String,
    pub customer_id: String,
    pub cardholder_name: Option<String>,
    pub last_4: String,
    pub expiration_month: String,
    pub expiration_year: String,
}

/// Outcome of a customer-creation call
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerResult {
    pub success: bool,
    pub customer_id: String,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
}

impl CustomerResult {
    pub fn all_messages(&self) -> String {
        let mut text = vec![self.message.clone()];
        text.extend(self.errors.iter().map(|e| e.message.clone()));
        text.join("\r\n")
    }
}

/// Outcome of a saved-card create/update call
#[derive(Debug, Clone, Deserialize)]
pub struct CardResult {
    pub success: bool,
    pub card: Option<SavedCard>,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
}

impl CardResult {
    pub fn all_messages(&self) -> String {
        let mut text = vec![self.message.clone()];
        text.extend(self.errors.iter().map(|e| e.message.clone()));
        text.join("\r\n")
    }
}

/// Card fields sent when tokenizing a new saved card
#[derive(Debug, Clone, Serialize)]
pub struct SavedCardData {
    pub number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub cvv: String,
    pub cardholder_name: String,
    pub billing_address: AddressData,

    /// Attach to this provider-side customer instead of creating a new one
    pub customer_id: Option<String>,
}

/// Mutable fields of a saved card
#[derive(Debug, Clone, Serialize)]
pub struct SavedCardUpdate {
    pub cardholder_name: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub billing_address: AddressData,
}
