//! Braintree payment processing core for an ERP host
//!
//! Owns the payment transaction lifecycle (authorize, capture, settle,
//! cancel, refund) and saved payment profile management against a
//! Braintree-style gateway. Persistence, accounting and UI belong to the
//! host and are reached through the `TransactionHost` and
//! `ProfileRepository` traits.

pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::gateways;
pub use modules::parties;
pub use modules::transactions;

pub use crate::core::{Currency, PaymentError, Result};
