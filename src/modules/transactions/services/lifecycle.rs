use crate::core::{PaymentError, Result};
use crate::modules::gateways::models::BraintreeGateway;
use crate::modules::gateways::services::{BraintreeClient, RemoteGatewayClient};
use crate::modules::parties::repositories::{find_customer_id, ProfileRepository};
use crate::modules::transactions::models::{CardInput, PaymentTransaction, TransactionState};
use crate::modules::transactions::services::ChargeRequestBuilder;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Host-side persistence and accounting boundary
///
/// The host supplies the unit of work; a transaction is durable once `save`
/// returns Ok. `safe_post` is the host's accounting hook: idempotent, and it
/// must tolerate a transaction that is already posted.
#[async_trait]
pub trait TransactionHost: Send + Sync {
    async fn save(&self, transaction: &PaymentTransaction) -> Result<()>;

    async fn safe_post(&self, transaction: &PaymentTransaction) -> Result<()>;
}

/// The transaction lifecycle state machine
///
/// Drives authorize/capture/settle/cancel/refund against the gateway and
/// records the outcome. Remote failures never surface as `Err` from these
/// operations; the caller reads the transaction's state and failure logs.
/// Only precondition violations (missing payment method, bad currency, wrong
/// state for cancel, unsupported operation) propagate.
pub struct TransactionLifecycle {
    gateway: BraintreeGateway,
    client: Arc<dyn RemoteGatewayClient>,
    profiles: Arc<dyn ProfileRepository>,
    host: Arc<dyn TransactionHost>,
}

impl TransactionLifecycle {
    pub fn new(
        gateway: BraintreeGateway,
        client: Arc<dyn RemoteGatewayClient>,
        profiles: Arc<dyn ProfileRepository>,
        host: Arc<dyn TransactionHost>,
    ) -> Self {
        Self {
            gateway,
            client,
            profiles,
            host,
        }
    }

    /// Build a lifecycle backed by the HTTP client for this gateway's
    /// validated configuration.
    pub fn over_http(
        gateway: BraintreeGateway,
        profiles: Arc<dyn ProfileRepository>,
        host: Arc<dyn TransactionHost>,
    ) -> Result<Self> {
        let config = gateway.client_config()?;
        Ok(Self::new(
            gateway,
            Arc::new(BraintreeClient::new(config)),
            profiles,
            host,
        ))
    }

    /// Place an authorization hold for the transaction amount
    pub async fn authorize(
        &self,
        transaction: &mut PaymentTransaction,
        card_info: Option<&CardInput>,
    ) -> Result<()> {
        let request = self.build_charge(transaction, card_info, false).await?;

        match self.client.sale(request).await {
            Err(err) => {
                self.record_transport_failure(transaction, "authorize", &err)
                    .await?;
            }
            Ok(result) if result.success => {
                transaction.set_provider_reference(result.reference);
                transaction.set_state(TransactionState::Authorized);
                self.host.save(transaction).await?;
                info!(
                    transaction_id = %transaction.id,
                    provider_reference = ?transaction.provider_reference,
                    "Authorization succeeded"
                );
            }
            Ok(result) => {
                self.record_decline(transaction, "authorize", result.all_messages())
                    .await?;
            }
        }
        Ok(())
    }

    /// Authorize and capture in one step
    pub async fn capture(
        &self,
        transaction: &mut PaymentTransaction,
        card_info: Option<&CardInput>,
    ) -> Result<()> {
        let request = self.build_charge(transaction, card_info, true).await?;

        match self.client.sale(request).await {
            Err(err) => {
                self.record_transport_failure(transaction, "capture", &err)
                    .await?;
            }
            Ok(result) if result.success => {
                transaction.set_provider_reference(result.reference);
                transaction.set_state(TransactionState::Completed);
                self.host.save(transaction).await?;
                self.host.safe_post(transaction).await?;
                info!(
                    transaction_id = %transaction.id,
                    provider_reference = ?transaction.provider_reference,
                    "Capture succeeded"
                );
            }
            Ok(result) => {
                self.record_decline(transaction, "capture", result.all_messages())
                    .await?;
            }
        }
        Ok(())
    }

    /// Settle a prior authorization at the current transaction amount
    ///
    /// Only internal code reaches settle; a non-authorized transaction here
    /// is a programming error. A settlement failure does not reverse the
    /// authorization side effect.
    pub async fn settle(&self, transaction: &mut PaymentTransaction) -> Result<()> {
        assert_eq!(
            transaction.state,
            TransactionState::Authorized,
            "settle called on a non-authorized transaction"
        );
        let reference = transaction.provider_reference.clone().ok_or_else(|| {
            PaymentError::internal(format!(
                "Authorized transaction '{}' has no provider reference",
                transaction.id
            ))
        })?;

        match self
            .client
            .submit_for_settlement(&reference, transaction.amount)
            .await
        {
            Err(err) => {
                self.record_transport_failure(transaction, "settle", &err)
                    .await?;
            }
            Ok(result) if result.success => {
                transaction.set_provider_reference(result.reference);
                transaction.set_state(TransactionState::Completed);
                self.host.save(transaction).await?;
                self.host.safe_post(transaction).await?;
                info!(transaction_id = %transaction.id, "Settlement succeeded");
            }
            Ok(result) => {
                self.record_decline(transaction, "settle", result.all_messages())
                    .await?;
            }
        }
        Ok(())
    }

    /// Void an authorization
    ///
    /// On a remote failure the transaction keeps its state; the failure log
    /// is the only signal, and the caller decides whether to retry.
    pub async fn cancel(&self, transaction: &mut PaymentTransaction) -> Result<()> {
        if transaction.state != TransactionState::Authorized {
            return Err(PaymentError::InvalidStateForCancel(transaction.state));
        }
        let reference = transaction.provider_reference.clone().ok_or_else(|| {
            PaymentError::internal(format!(
                "Authorized transaction '{}' has no provider reference",
                transaction.id
            ))
        })?;

        match self.client.void(&reference).await {
            Err(err) => {
                warn!(
                    transaction_id = %transaction.id,
                    error = %err,
                    "Void failed in transport, transaction state left unchanged"
                );
                transaction.log_failure(err.to_string());
                self.host.save(transaction).await?;
            }
            Ok(result) if result.success => {
                transaction.set_state(TransactionState::Cancel);
                self.host.save(transaction).await?;
                info!(transaction_id = %transaction.id, "Authorization voided");
            }
            Ok(result) => {
                warn!(
                    transaction_id = %transaction.id,
                    "Void declined, transaction state left unchanged"
                );
                transaction.log_failure(result.all_messages());
                self.host.save(transaction).await?;
            }
        }
        Ok(())
    }

    /// Reverse the origin transaction, fully or partially
    ///
    /// The provider only supports voiding before settlement, and only for
    /// the full amount; a full-amount refund of an unsettled origin is
    /// therefore issued as a void, everything else as a refund.
    pub async fn refund(&self, transaction: &mut PaymentTransaction) -> Result<()> {
        let origin = transaction.origin.clone().ok_or_else(|| {
            PaymentError::validation(format!(
                "Transaction '{}' is not a refund: it has no origin transaction",
                transaction.id
            ))
        })?;

        let remote = match self.client.find_transaction(&origin.provider_reference).await {
            Err(err) => {
                self.record_transport_failure(transaction, "refund", &err)
                    .await?;
                return Ok(());
            }
            Ok(remote) => remote,
        };

        let result = if !remote.status.is_settled_or_settling() && remote.amount == transaction.amount
        {
            self.client.void(&origin.provider_reference).await
        } else {
            self.client
                .refund(&origin.provider_reference, transaction.amount)
                .await
        };

        match result {
            Err(err) => {
                // Transport failure skips the accounting hook
                self.record_transport_failure(transaction, "refund", &err)
                    .await?;
            }
            Ok(result) if result.success => {
                transaction.set_provider_reference(result.reference);
                transaction.set_state(TransactionState::Completed);
                self.host.save(transaction).await?;
                self.host.safe_post(transaction).await?;
                info!(transaction_id = %transaction.id, "Refund succeeded");
            }
            Ok(result) => {
                // A declined refund keeps its state; the accounting hook
                // still runs, and hosts reconcile the declined reversal
                // from the failure log.
                warn!(
                    transaction_id = %transaction.id,
                    "Refund declined, transaction state left unchanged"
                );
                transaction.log_failure(result.all_messages());
                self.host.save(transaction).await?;
                self.host.safe_post(transaction).await?;
            }
        }
        Ok(())
    }

    /// Status polling is not offered by this provider integration
    pub async fn update(&self, _transaction: &mut PaymentTransaction) -> Result<()> {
        Err(PaymentError::UnsupportedOperation("update"))
    }

    /// Automatic retry is not offered by this provider integration
    pub async fn retry(
        &self,
        _transaction: &mut PaymentTransaction,
        _card_info: Option<&CardInput>,
    ) -> Result<()> {
        Err(PaymentError::UnsupportedOperation("retry"))
    }

    async fn build_charge(
        &self,
        transaction: &PaymentTransaction,
        card_info: Option<&CardInput>,
        submit_for_settlement: bool,
    ) -> Result<crate::modules::gateways::services::ChargeRequest> {
        let customer_id = find_customer_id(
            self.profiles.as_ref(),
            &transaction.party.id,
            &self.gateway.id,
        )
        .await?;

        ChargeRequestBuilder::new(&self.gateway).build(
            transaction,
            card_info,
            customer_id.as_deref(),
            submit_for_settlement,
        )
    }

    /// Transport failure: the error message is logged verbatim
    async fn record_transport_failure(
        &self,
        transaction: &mut PaymentTransaction,
        operation: &str,
        err: &PaymentError,
    ) -> Result<()> {
        error!(
            transaction_id = %transaction.id,
            operation = operation,
            error = %err,
            "Remote call failed"
        );
        transaction.set_state(TransactionState::Failed);
        transaction.log_failure(err.to_string());
        self.host.save(transaction).await
    }

    /// Business decline: the top-level message plus every granular error is
    /// logged, newline-joined
    async fn record_decline(
        &self,
        transaction: &mut PaymentTransaction,
        operation: &str,
        messages: String,
    ) -> Result<()> {
        warn!(
            transaction_id = %transaction.id,
            operation = operation,
            "Charge declined by gateway"
        );
        transaction.set_state(TransactionState::Failed);
        transaction.log_failure(messages);
        self.host.save(transaction).await
    }
}
