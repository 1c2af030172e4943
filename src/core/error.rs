use crate::modules::transactions::models::TransactionState;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Main error type for the payment core
///
/// Remote failures inside lifecycle operations (transport errors, business
/// declines) are recorded on the transaction and never surface through this
/// type; the variants below are the errors callers actually observe.
#[derive(thiserror::Error, Debug)]
pub enum PaymentError {
    /// Gateway misconfigured or wrong provider for this implementation
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Neither a saved payment profile nor inline card data was supplied
    #[error("No payment profile or card data available for this transaction")]
    MissingPaymentMethod,

    /// Remote call could not complete (network/protocol failure)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Cancel requested on a transaction that is not authorized
    #[error("Only authorized transactions can be cancelled, current state is '{0}'")]
    InvalidStateForCancel(TransactionState),

    /// Operation not offered by this provider
    #[error("Operation '{0}' is not available for the braintree provider")]
    UnsupportedOperation(&'static str),

    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider rejected a profile-management request
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::Transport(err.to_string())
    }
}

// Helper functions for common error scenarios
impl PaymentError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        PaymentError::Configuration(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        PaymentError::Transport(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        PaymentError::Validation(msg.into())
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        PaymentError::Gateway(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        PaymentError::Internal(msg.into())
    }
}
