// Scripted stand-ins for the remote gateway and the host ERP.
//
// Each remote operation is programmed with an Outcome; every call is
// recorded so tests can assert exactly which remote operations were issued.

use async_trait::async_trait;
use braintree_payments::core::{PaymentError, Result};
use braintree_payments::gateways::services::{
    CardResult, ChargeRequest, CustomerResult, ErrorDetail, RemoteGatewayClient, RemoteResult,
    RemoteTransaction, RemoteTransactionStatus, SavedCard, SavedCardData, SavedCardUpdate,
};
use braintree_payments::parties::models::CustomerData;
use braintree_payments::transactions::{PaymentTransaction, TransactionHost, TransactionState};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Programmed outcome for a remote operation
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Call succeeds with a generated provider reference
    Success,
    /// Provider answers but rejects: top-level message plus granular errors
    Decline {
        message: &'static str,
        errors: Vec<&'static str>,
    },
    /// Call never completes
    Transport(&'static str),
}

impl Outcome {
    pub fn decline(message: &'static str, errors: &[&'static str]) -> Self {
        Outcome::Decline {
            message,
            errors: errors.to_vec(),
        }
    }
}

/// Scripted gateway client
pub struct StubGateway {
    pub sale: Outcome,
    pub settlement: Outcome,
    pub void_op: Outcome,
    pub refund_op: Outcome,
    pub card_op: Outcome,
    pub customer_op: Outcome,

    /// What find_transaction reports for the origin transaction
    pub remote_status: RemoteTransactionStatus,
    pub remote_amount: Decimal,

    calls: Mutex<Vec<String>>,
    sequence: AtomicU32,
}

impl Default for StubGateway {
    fn default() -> Self {
        Self {
            sale: Outcome::Success,
            settlement: Outcome::Success,
            void_op: Outcome::Success,
            refund_op: Outcome::Success,
            card_op: Outcome::Success,
            customer_op: Outcome::Success,
            remote_status: RemoteTransactionStatus::Authorized,
            remote_amount: Decimal::ZERO,
            calls: Mutex::new(Vec::new()),
            sequence: AtomicU32::new(0),
        }
    }
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operation names in call order, e.g. `["sale", "void"]`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.as_str() == operation || c.starts_with(&format!("{}(", operation)))
            .count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn next_reference(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.sequence.fetch_add(1, Ordering::SeqCst))
    }

    fn remote_result(&self, outcome: &Outcome, prefix: &str) -> Result<RemoteResult> {
        match outcome {
            Outcome::Success => Ok(RemoteResult {
                success: true,
                reference: self.next_reference(prefix),
                message: String::new(),
                errors: Vec::new(),
            }),
            Outcome::Decline { message, errors } => Ok(RemoteResult {
                success: false,
                reference: String::new(),
                message: message.to_string(),
                errors: errors
                    .iter()
                    .map(|m| ErrorDetail {
                        message: m.to_string(),
                    })
                    .collect(),
            }),
            Outcome::Transport(message) => Err(PaymentError::transport(*message)),
        }
    }
}

#[async_trait]
impl RemoteGatewayClient for StubGateway {
    async fn sale(&self, request: ChargeRequest) -> Result<RemoteResult> {
        self.record(format!("sale(submit={})", request.submit_for_settlement));
        self.remote_result(&self.sale, "bt-txn")
    }

    async fn submit_for_settlement(
        &self,
        _reference: &str,
        _amount: Decimal,
    ) -> Result<RemoteResult> {
        self.record("submit_for_settlement");
        self.remote_result(&self.settlement, "bt-txn")
    }

    async fn void(&self, _reference: &str) -> Result<RemoteResult> {
        self.record("void");
        self.remote_result(&self.void_op, "bt-void")
    }

    async fn refund(&self, _reference: &str, _amount: Decimal) -> Result<RemoteResult> {
        self.record("refund");
        self.remote_result(&self.refund_op, "bt-refund")
    }

    async fn find_transaction(&self, reference: &str) -> Result<RemoteTransaction> {
        self.record("find_transaction");
        Ok(RemoteTransaction {
            reference: reference.to_string(),
            status: self.remote_status,
            amount: self.remote_amount,
        })
    }

    async fn find_saved_card(&self, token: &str) -> Result<SavedCard> {
        self.record("find_saved_card");
        Ok(SavedCard {
            token: token.to_string(),
            customer_id: "cust-found".to_string(),
            cardholder_name: Some("Jen Smith".to_string()),
            last_4: "1111".to_string(),
            expiration_month: "06".to_string(),
            expiration_year: "2027".to_string(),
        })
    }

    async fn create_customer(&self, _customer: CustomerData) -> Result<CustomerResult> {
        self.record("create_customer");
        match &self.customer_op {
            Outcome::Success => Ok(CustomerResult {
                success: true,
                customer_id: self.next_reference("cust"),
                message: String::new(),
                errors: Vec::new(),
            }),
            Outcome::Decline { message, errors } => Ok(CustomerResult {
                success: false,
                customer_id: String::new(),
                message: message.to_string(),
                errors: errors
                    .iter()
                    .map(|m| ErrorDetail {
                        message: m.to_string(),
                    })
                    .collect(),
            }),
            Outcome::Transport(message) => Err(PaymentError::transport(*message)),
        }
    }

    async fn create_saved_card(&self, card: SavedCardData) -> Result<CardResult> {
        self.record(format!(
            "create_saved_card(customer={})",
            card.customer_id.as_deref().unwrap_or("none")
        ));
        match &self.card_op {
            Outcome::Success => {
                let last_4 = card
                    .number
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                Ok(CardResult {
                    success: true,
                    card: Some(SavedCard {
                        token: self.next_reference("tok"),
                        customer_id: card.customer_id.unwrap_or_else(|| "cust-new".to_string()),
                        cardholder_name: Some(card.cardholder_name),
                        last_4,
                        expiration_month: card.expiration_month,
                        expiration_year: card.expiration_year,
                    }),
                    message: String::new(),
                    errors: Vec::new(),
                })
            }
            Outcome::Decline { message, errors } => Ok(CardResult {
                success: false,
                card: None,
                message: message.to_string(),
                errors: errors
                    .iter()
                    .map(|m| ErrorDetail {
                        message: m.to_string(),
                    })
                    .collect(),
            }),
            Outcome::Transport(message) => Err(PaymentError::transport(*message)),
        }
    }

    async fn update_saved_card(&self, token: &str, update: SavedCardUpdate) -> Result<CardResult> {
        self.record("update_saved_card");
        match &self.card_op {
            Outcome::Success => Ok(CardResult {
                success: true,
                card: Some(SavedCard {
                    token: token.to_string(),
                    customer_id: "cust-found".to_string(),
                    cardholder_name: Some(update.cardholder_name),
                    last_4: "1111".to_string(),
                    expiration_month: update.expiration_month,
                    expiration_year: update.expiration_year,
                }),
                message: String::new(),
                errors: Vec::new(),
            }),
            Outcome::Decline { message, errors } => Ok(CardResult {
                success: false,
                card: None,
                message: message.to_string(),
                errors: errors
                    .iter()
                    .map(|m| ErrorDetail {
                        message: m.to_string(),
                    })
                    .collect(),
            }),
            Outcome::Transport(message) => Err(PaymentError::transport(*message)),
        }
    }
}

/// Recording stand-in for the host's persistence and accounting boundary
///
/// `safe_post` keeps a running receivable balance the way the ERP's posting
/// would: a posted charge credits the payer's receivable, a posted refund
/// debits it back. Posting is idempotent per transaction id.
#[derive(Default)]
pub struct RecordingHost {
    saves: Mutex<Vec<(String, TransactionState)>>,
    posted: Mutex<Vec<String>>,
    receivable: Mutex<Decimal>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    pub fn last_saved_state(&self) -> Option<TransactionState> {
        self.saves.lock().unwrap().last().map(|(_, s)| *s)
    }

    pub fn post_count(&self) -> usize {
        self.posted.lock().unwrap().len()
    }

    pub fn receivable(&self) -> Decimal {
        *self.receivable.lock().unwrap()
    }
}

#[async_trait]
impl TransactionHost for RecordingHost {
    async fn save(&self, transaction: &PaymentTransaction) -> Result<()> {
        self.saves
            .lock()
            .unwrap()
            .push((transaction.id.clone(), transaction.state));
        Ok(())
    }

    async fn safe_post(&self, transaction: &PaymentTransaction) -> Result<()> {
        let mut posted = self.posted.lock().unwrap();
        if posted.iter().any(|id| id == &transaction.id) {
            // Already posted; tolerated by contract
            return Ok(());
        }
        posted.push(transaction.id.clone());

        let mut receivable = self.receivable.lock().unwrap();
        if transaction.origin.is_some() {
            *receivable += transaction.amount;
        } else {
            *receivable -= transaction.amount;
        }
        Ok(())
    }
}
