pub mod gateways;
pub mod parties;
pub mod transactions;
