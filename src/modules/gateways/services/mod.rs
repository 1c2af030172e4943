pub mod braintree;
pub mod gateway_client;

pub use braintree::BraintreeClient;
pub use gateway_client::{
    CardData, CardResult, ChargeRequest, CustomerResult, ErrorDetail, PaymentSource,
    RemoteGatewayClient, RemoteResult, RemoteTransaction, RemoteTransactionStatus, SavedCard,
    SavedCardData, SavedCardUpdate,
};
