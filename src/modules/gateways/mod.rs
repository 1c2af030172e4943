pub mod models;
pub mod services;

pub use models::{BraintreeGateway, ClientConfig, GatewayEnvironment};
pub use services::{
    BraintreeClient, ChargeRequest, PaymentSource, RemoteGatewayClient, RemoteResult,
    RemoteTransaction, RemoteTransactionStatus,
};
