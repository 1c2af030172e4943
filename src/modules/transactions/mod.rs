pub mod models;
pub mod services;

pub use models::{CardInput, FailureLogEntry, PaymentTransaction, RefundOrigin, TransactionState};
pub use services::{ChargeRequestBuilder, TransactionHost, TransactionLifecycle};
