use crate::core::{Currency, PaymentError, Result};
use crate::modules::parties::models::{Address, Party, PaymentProfile};
use crate::modules::transactions::models::FailureLogEntry;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction lifecycle state
///
/// `Cancel`, `Completed` and `Failed` are terminal; a failed transaction is
/// retried by creating a fresh transaction, never by re-driving this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionState {
    Draft,
    Authorized,
    Completed,
    Failed,
    Cancel,
}

impl Default for TransactionState {
    fn default() -> Self {
        TransactionState::Draft
    }
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionState::Draft => write!(f, "draft"),
            TransactionState::Authorized => write!(f, "authorized"),
            TransactionState::Completed => write!(f, "completed"),
            TransactionState::Failed => write!(f, "failed"),
            TransactionState::Cancel => write!(f, "cancel"),
        }
    }
}

impl std::str::FromStr for TransactionState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TransactionState::Draft),
            "authorized" => Ok(TransactionState::Authorized),
            "completed" => Ok(TransactionState::Completed),
            "failed" => Ok(TransactionState::Failed),
            "cancel" => Ok(TransactionState::Cancel),
            _ => Err(format!("Invalid transaction state: {}", s)),
        }
    }
}

/// Back-reference from a refund transaction to the transaction it reverses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundOrigin {
    /// Provider reference of the original transaction
    pub provider_reference: String,

    /// Full amount of the original transaction
    pub amount: Decimal,
}

/// A payment transaction against the gateway
///
/// Created in `Draft` by the host; state moves only through the lifecycle
/// operations. Amounts are not sign-checked here: a bad amount is the
/// gateway's decline to report, and the failure path depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    /// Unique transaction ID (UUID)
    pub id: String,

    pub gateway_id: String,

    /// The payer
    pub party: Party,

    /// Billing address
    pub address: Address,

    pub amount: Decimal,
    pub currency: Currency,

    /// Saved payment method, when charging a stored card
    pub payment_profile: Option<PaymentProfile>,

    /// Opaque reference assigned by the remote service
    pub provider_reference: Option<String>,

    pub state: TransactionState,

    /// Set only on refund transactions
    pub origin: Option<RefundOrigin>,

    /// Provider failures recorded against this transaction
    pub logs: Vec<FailureLogEntry>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentTransaction {
    pub fn new(
        gateway_id: String,
        party: Party,
        address: Address,
        amount: Decimal,
        currency: Currency,
        payment_profile: Option<PaymentProfile>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            gateway_id,
            party,
            address,
            amount,
            currency,
            payment_profile,
            provider_reference: None,
            state: TransactionState::Draft,
            origin: None,
            logs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Spawn a refund transaction for this one
    ///
    /// The refund runs its own lifecycle; `origin` points back here. Requires
    /// this transaction to have reached the provider.
    pub fn create_refund(&self, amount: Decimal) -> Result<PaymentTransaction> {
        let provider_reference = self.provider_reference.clone().ok_or_else(|| {
            PaymentError::validation(format!(
                "Transaction '{}' has no provider reference to refund against",
                self.id
            ))
        })?;

        let mut refund = PaymentTransaction::new(
            self.gateway_id.clone(),
            self.party.clone(),
            self.address.clone(),
            amount,
            self.currency,
            self.payment_profile.clone(),
        );
        refund.origin = Some(RefundOrigin {
            provider_reference,
            amount: self.amount,
        });
        Ok(refund)
    }

    pub fn set_state(&mut self, state: TransactionState) {
        self.state = state;
        self.updated_at = Utc::now();
    }

    pub fn set_provider_reference(&mut self, reference: String) {
        self.provider_reference = Some(reference);
        self.updated_at = Utc::now();
    }

    /// Record a provider failure against this transaction
    pub fn log_failure(&mut self, text: impl Into<String>) {
        self.logs.push(FailureLogEntry::system(text));
        self.updated_at = Utc::now();
    }
}
