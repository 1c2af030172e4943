pub mod charge_builder;
pub mod lifecycle;

pub use charge_builder::ChargeRequestBuilder;
pub use lifecycle::{TransactionHost, TransactionLifecycle};
