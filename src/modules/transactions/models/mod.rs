pub mod card;
pub mod failure_log;
pub mod transaction;

pub use card::CardInput;
pub use failure_log::FailureLogEntry;
pub use transaction::{PaymentTransaction, RefundOrigin, TransactionState};
